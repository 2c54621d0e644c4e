//! ANVL request encoding.
//!
//! Pairs use the argument convention shared with the command line:
//!
//! - key `@`: the value is a path; the file's lines are written verbatim
//! - key `@@`: a literal `@` key
//! - value `@path`: replaced by the contents of `path`
//! - value `@@text`: the literal value `@text`

use std::fs;
use std::io;
use std::path::Path;

use log::debug;

use super::escape::{escape_key, escape_value};
use crate::error_handling::AnvlError;

/// Marker for file inclusion and file-valued fields.
pub const FILE_MARKER: &str = "@";

/// Escaped form of a literal `@` key or a leading `@` in a value.
pub const ESCAPED_FILE_MARKER: &str = "@@";

/// Source of files referenced by `@` directives.
///
/// The encoder never touches the filesystem itself; callers pass
/// [`FsFileSource`] for real files or their own implementation in tests.
pub trait FileSource {
    /// Returns the full text of the file at `path`.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// [`FileSource`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileSource;

impl FileSource for FsFileSource {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

impl<F: FileSource + ?Sized> FileSource for &F {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }
}

pub(crate) fn read_file<F: FileSource + ?Sized>(
    files: &F,
    path: &Path,
) -> Result<String, AnvlError> {
    debug!("Reading ANVL substitution file {}", path.display());
    files
        .read_to_string(path)
        .map_err(|source| AnvlError::FileAccess {
            path: path.to_path_buf(),
            source,
        })
}

/// Lines of an included file, each without its line terminator.
pub(crate) fn included_lines<F: FileSource + ?Sized>(
    files: &F,
    path: &Path,
) -> Result<Vec<String>, AnvlError> {
    let contents = read_file(files, path)?;
    // lines() keeps a bare '\r' on the last line when it has no '\n'
    Ok(contents
        .lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect())
}

/// Formats one `key: value` line from literal text.
pub(crate) fn field_line(key: &str, value: &str) -> String {
    format!("{}: {}", escape_key(key), escape_value(value))
}

/// Appends the line(s) for one pair in the argument convention.
pub(crate) fn push_pair<F: FileSource + ?Sized>(
    lines: &mut Vec<String>,
    key: &str,
    value: &str,
    files: &F,
) -> Result<(), AnvlError> {
    if key == FILE_MARKER {
        lines.extend(included_lines(files, Path::new(value))?);
        return Ok(());
    }

    let key = if key == ESCAPED_FILE_MARKER {
        FILE_MARKER
    } else {
        key
    };

    let value = match value.strip_prefix(FILE_MARKER) {
        Some(literal) if literal.starts_with(FILE_MARKER) => literal.to_string(),
        Some(path) if !path.is_empty() => read_file(files, Path::new(path))?,
        _ => value.to_string(),
    };

    lines.push(field_line(key, &value));
    Ok(())
}

/// Encodes `(key, value)` pairs as an ANVL document.
///
/// Lines are joined with `\n` and the document has no trailing newline.
///
/// # Errors
///
/// Returns [`AnvlError::FileAccess`] if a referenced file cannot be read.
pub fn encode<I, K, V, F>(pairs: I, files: &F) -> Result<String, AnvlError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
    F: FileSource + ?Sized,
{
    let mut lines: Vec<String> = Vec::new();
    for (key, value) in pairs {
        push_pair(&mut lines, key.as_ref(), value.as_ref(), files)?;
    }
    Ok(lines.join("\n"))
}

/// Encodes a flat `key value key value ...` argument list.
///
/// # Errors
///
/// Returns [`AnvlError::OddArgumentCount`] when a key has no value, or
/// [`AnvlError::FileAccess`] if a referenced file cannot be read.
pub fn encode_args<S, F>(args: &[S], files: &F) -> Result<String, AnvlError>
where
    S: AsRef<str>,
    F: FileSource + ?Sized,
{
    if args.len() % 2 != 0 {
        return Err(AnvlError::OddArgumentCount(args.len()));
    }
    encode(
        args.chunks_exact(2)
            .map(|pair| (pair[0].as_ref(), pair[1].as_ref())),
        files,
    )
}
