//! Ordered metadata for a single request.

use std::path::{Path, PathBuf};

use super::encode::{field_line, included_lines, push_pair, read_file, FileSource};
use crate::error_handling::AnvlError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    /// Literal key and value, written as given.
    Field { key: String, value: String },
    /// Value read from a file at encode time.
    FileValue { key: String, path: PathBuf },
    /// File whose lines are copied into the document.
    Include(PathBuf),
    /// Pair in the encoder's argument convention (see [`crate::anvl::encode`]).
    Arg { key: String, value: String },
}

/// Ordered `(key, value)` metadata sent with one request.
///
/// Fields added with [`push`](Self::push) are always written literally,
/// whatever `@` markers they contain. File directives are explicit
/// ([`push_file_value`](Self::push_file_value),
/// [`include_file`](Self::include_file)), and [`from_args`](Self::from_args)
/// keeps a command-line style argument list as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    entries: Vec<Entry>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a flat `key value ...` list in the argument
    /// convention, so `@` directives keep their file meaning.
    ///
    /// # Errors
    ///
    /// Returns [`AnvlError::OddArgumentCount`] when the list has odd length.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, AnvlError> {
        if args.len() % 2 != 0 {
            return Err(AnvlError::OddArgumentCount(args.len()));
        }
        let entries = args
            .chunks_exact(2)
            .map(|pair| Entry::Arg {
                key: pair[0].as_ref().to_string(),
                value: pair[1].as_ref().to_string(),
            })
            .collect();
        Ok(Self { entries })
    }

    /// Appends a literal field.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.push(Entry::Field {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Appends a field whose value is read from `path` at encode time.
    pub fn push_file_value(&mut self, key: impl Into<String>, path: impl AsRef<Path>) -> &mut Self {
        self.entries.push(Entry::FileValue {
            key: key.into(),
            path: path.as_ref().to_path_buf(),
        });
        self
    }

    /// Appends a directive that copies the lines of `path` into the document.
    pub fn include_file(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.entries.push(Entry::Include(path.as_ref().to_path_buf()));
        self
    }

    /// Returns the value of the first inline field with `key`.
    ///
    /// File-backed entries are not read and never match.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Inline `(key, value)` fields in insertion order.
    ///
    /// Entries from [`from_args`](Self::from_args) are yielded as given.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Field { key, value } | Entry::Arg { key, value } => {
                Some((key.as_str(), value.as_str()))
            }
            Entry::FileValue { .. } | Entry::Include(_) => None,
        })
    }

    /// Number of entries, file directives included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the record as an ANVL document.
    ///
    /// # Errors
    ///
    /// Returns [`AnvlError::FileAccess`] if a referenced file cannot be read.
    pub fn encode<F: FileSource + ?Sized>(&self, files: &F) -> Result<String, AnvlError> {
        let mut lines = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            match entry {
                Entry::Field { key, value } => lines.push(field_line(key, value)),
                Entry::FileValue { key, path } => {
                    lines.push(field_line(key, &read_file(files, path)?))
                }
                Entry::Include(path) => lines.extend(included_lines(files, path)?),
                Entry::Arg { key, value } => push_pair(&mut lines, key, value, files)?,
            }
        }
        Ok(lines.join("\n"))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetadataRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Self::new();
        record.extend(iter);
        record
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for MetadataRecord {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.push(key, value);
        }
    }
}
