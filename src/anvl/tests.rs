//! ANVL codec tests.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, TimeZone};

use super::*;
use crate::error_handling::AnvlError;

/// In-memory [`FileSource`] so tests never touch the disk.
#[derive(Default)]
struct MemoryFiles(HashMap<PathBuf, String>);

impl MemoryFiles {
    fn with(mut self, path: &str, contents: &str) -> Self {
        self.0.insert(PathBuf::from(path), contents.to_string());
        self
    }
}

impl FileSource for MemoryFiles {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.0
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }
}

fn raw() -> DecodeOptions {
    DecodeOptions {
        format_timestamps: false,
        decode_percent: false,
    }
}

fn percent() -> DecodeOptions {
    DecodeOptions {
        format_timestamps: false,
        decode_percent: true,
    }
}

#[test]
fn test_encode_basic_pairs() {
    let files = MemoryFiles::default();
    let doc = encode(
        [("target", "http://example.net/"), ("erc.who", "ezid-testing")],
        &files,
    )
    .unwrap();
    assert_eq!(doc, "target: http://example.net/\nerc.who: ezid-testing");
}

#[test]
fn test_encode_no_trailing_newline() {
    let doc = encode([("a", "1")], &MemoryFiles::default()).unwrap();
    assert!(!doc.ends_with('\n'));
}

#[test]
fn test_encode_empty_input() {
    let pairs: Vec<(String, String)> = Vec::new();
    assert_eq!(encode(pairs, &MemoryFiles::default()).unwrap(), "");
}

#[test]
fn test_encode_escapes_percent_in_value() {
    let doc = encode([("erc.what", "100% done")], &MemoryFiles::default()).unwrap();
    assert_eq!(doc, "erc.what: 100%25 done");
}

#[test]
fn test_encode_escapes_colon_in_key_only() {
    let doc = encode([("a:b", "c:d")], &MemoryFiles::default()).unwrap();
    assert_eq!(doc, "a%3Ab: c:d");
}

#[test]
fn test_encode_escapes_newlines_in_value() {
    let doc = encode([("crossref", "<a>\r\n<b/>\n</a>")], &MemoryFiles::default()).unwrap();
    assert_eq!(doc, "crossref: <a>%0D%0A<b/>%0A</a>");
}

#[test]
fn test_encode_double_at_value_is_literal() {
    let doc = encode([("erc.who", "@@literal")], &MemoryFiles::default()).unwrap();
    assert_eq!(doc, "erc.who: @literal");
}

#[test]
fn test_encode_lone_at_value_is_literal() {
    let doc = encode([("erc.who", "@")], &MemoryFiles::default()).unwrap();
    assert_eq!(doc, "erc.who: @");
}

#[test]
fn test_encode_value_from_file() {
    let files = MemoryFiles::default().with("meta.xml", "<x>\n50%</x>\n");
    let doc = encode([("datacite", "@meta.xml")], &files).unwrap();
    assert_eq!(doc, "datacite: <x>%0A50%25</x>%0A");
}

#[test]
fn test_encode_include_directive_copies_lines() {
    let files = MemoryFiles::default().with("extra.anvl", "erc.who: a\r\nerc.what: b\r\n");
    let doc = encode([("target", "t"), ("@", "extra.anvl"), ("x", "y")], &files).unwrap();
    assert_eq!(doc, "target: t\nerc.who: a\nerc.what: b\nx: y");
}

#[test]
fn test_decode_body_lines_are_concatenated() {
    let envelope = decode_str("success: ok\nfirst\nsecond", raw());
    assert_eq!(envelope.body, "firstsecond");
}

#[test]
fn test_encode_include_strips_bare_trailing_cr() {
    let files = MemoryFiles::default().with("cr.anvl", "erc.who: a\r\nerc.what: b\r");
    let doc = encode([("@", "cr.anvl")], &files).unwrap();
    assert_eq!(doc, "erc.who: a\nerc.what: b");
}

#[test]
fn test_encode_double_at_key_is_literal_at() {
    let doc = encode([("@@", "comment")], &MemoryFiles::default()).unwrap();
    assert_eq!(doc, "@: comment");
}

#[test]
fn test_encode_missing_file_is_error() {
    let err = encode([("@", "missing.anvl")], &MemoryFiles::default()).unwrap_err();
    match err {
        AnvlError::FileAccess { path, source } => {
            assert_eq!(path, PathBuf::from("missing.anvl"));
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = encode([("k", "@missing.txt")], &MemoryFiles::default()).unwrap_err();
    assert!(matches!(err, AnvlError::FileAccess { .. }));
    assert!(err.to_string().contains("missing.txt"));
}

#[test]
fn test_encode_args_pairs_up_flat_list() {
    let args = ["target", "http://example.net/", "erc.who", "someone"];
    let doc = encode_args(&args, &MemoryFiles::default()).unwrap();
    assert_eq!(doc, "target: http://example.net/\nerc.who: someone");
}

#[test]
fn test_encode_args_rejects_odd_length() {
    let args = ["target", "http://example.net/", "erc.who"];
    let err = encode_args(&args, &MemoryFiles::default()).unwrap_err();
    assert!(matches!(err, AnvlError::OddArgumentCount(3)));
}

#[test]
fn test_record_push_keeps_at_markers_literal() {
    let mut record = MetadataRecord::new();
    record.push("@", "note").push("erc.who", "@handle");
    assert_eq!(record.get("@"), Some("note"));
    assert_eq!(record.get("erc.who"), Some("@handle"));

    let doc = record.encode(&MemoryFiles::default()).unwrap();
    assert_eq!(doc, "@: note\nerc.who: @handle");
}

#[test]
fn test_record_literal_at_round_trips() {
    let record: MetadataRecord = [("@", "a"), ("who", "@b"), ("what", "@@c")]
        .into_iter()
        .collect();
    let doc = record.encode(&MemoryFiles::default()).unwrap();
    // No bare "@" line may appear; that would read as a file directive.
    assert!(doc.lines().all(|line| line != "@"));

    let envelope = decode_str(&format!("success: ok\n{doc}"), raw());
    assert_eq!(envelope.get("@"), Some("a"));
    assert_eq!(envelope.get("who"), Some("@b"));
    assert_eq!(envelope.get("what"), Some("@@c"));
}

#[test]
fn test_record_double_at_key_round_trips() {
    let mut record = MetadataRecord::new();
    record.push("@@", "x").push("@@note", "y");
    assert_eq!(record.get("@@"), Some("x"));

    let doc = record.encode(&MemoryFiles::default()).unwrap();
    assert_eq!(doc, "@@: x\n@@note: y");

    let envelope = decode_str(&format!("success: ok\n{doc}"), raw());
    assert_eq!(
        envelope.fields(),
        &[
            ("@@".to_string(), "x".to_string()),
            ("@@note".to_string(), "y".to_string())
        ]
    );
    assert_eq!(envelope.get("@"), None);
}

#[test]
fn test_record_file_value_key_is_literal() {
    let files = MemoryFiles::default().with("v.txt", "from file");
    let mut record = MetadataRecord::new();
    record.push_file_value("@@", "v.txt");
    assert_eq!(record.get("@@"), None);
    assert_eq!(record.encode(&files).unwrap(), "@@: from file");
}

#[test]
fn test_record_file_helpers() {
    let files = MemoryFiles::default()
        .with("value.txt", "from file")
        .with("more.anvl", "erc.when: 2021");
    let mut record = MetadataRecord::new();
    record
        .push("target", "http://example.net/")
        .push_file_value("erc.what", "value.txt")
        .include_file("more.anvl");
    assert_eq!(record.len(), 3);

    let doc = record.encode(&files).unwrap();
    assert_eq!(
        doc,
        "target: http://example.net/\nerc.what: from file\nerc.when: 2021"
    );
}

#[test]
fn test_record_from_args() {
    let record = MetadataRecord::from_args(&["@", "f.anvl", "k", "v"]).unwrap();
    assert_eq!(record.get("@"), Some("f.anvl"));
    assert_eq!(record.get("k"), Some("v"));
    assert!(matches!(
        MetadataRecord::from_args(&["k"]),
        Err(AnvlError::OddArgumentCount(1))
    ));
}

#[test]
fn test_record_preserves_insertion_order() {
    let record: MetadataRecord = [("z", "1"), ("a", "2"), ("m", "3")].into_iter().collect();
    let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_decode_status_line() {
    let envelope = decode_str("success: ark:/99999/fk4test", DecodeOptions::default());
    assert_eq!(envelope.status, "success");
    assert_eq!(envelope.status_message, "ark:/99999/fk4test");
    assert!(envelope.is_success());
    assert!(envelope.fields().is_empty());
    assert_eq!(envelope.body, "");
}

#[test]
fn test_decode_error_status() {
    let envelope = decode_str("error: bad request - no such identifier", raw());
    assert!(envelope.is_error());
    assert_eq!(envelope.status_message, "bad request - no such identifier");
}

#[test]
fn test_decode_empty_and_missing() {
    for envelope in [decode(None, raw()), decode_str("", raw())] {
        assert_eq!(envelope.status, UNKNOWN_STATUS);
        assert_eq!(envelope.status_message, NO_CONTENT_MESSAGE);
        assert_eq!(envelope.body, "");
        assert!(envelope.fields().is_empty());
    }
}

#[test]
fn test_decode_status_without_colon() {
    let envelope = decode_str("teapot", raw());
    assert_eq!(envelope.status, "teapot");
    assert_eq!(envelope.status_message, "");
}

#[test]
fn test_decode_body_accumulation() {
    let envelope = decode_str("success: ok\nfree text line", raw());
    assert_eq!(envelope.body, "free text line");
    assert!(envelope.fields().is_empty());
    assert_eq!(envelope.get("free text line"), None);
}

#[test]
fn test_decode_body_lines_and_fields_interleaved() {
    let envelope = decode_str("success: ok\nfirst\ntarget: http://x/\n\nsecond", raw());
    assert_eq!(envelope.body, "firstsecond");
    assert_eq!(envelope.get("target"), Some("http://x/"));
}

#[test]
fn test_decode_fields_keep_order_and_colons_in_values() {
    let envelope = decode_str(
        "success: ark:/99999/fk4x\ntarget: http://example.net/\n_owner: apitest\nerc.when: 2021-01-01T00:00:00+00:00",
        raw(),
    );
    let keys: Vec<&str> = envelope.fields().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["target", "_owner", "erc.when"]);
    assert_eq!(envelope.get("erc.when"), Some("2021-01-01T00:00:00+00:00"));
}

#[test]
fn test_decode_strips_only_separator_space() {
    let envelope = decode_str("success: ok\nk:   padded\nj:tight", raw());
    assert_eq!(envelope.get("k"), Some("  padded"));
    assert_eq!(envelope.get("j"), Some("tight"));
}

#[test]
fn test_decode_formats_timestamps() {
    let expected = Local
        .timestamp_opt(1609459200, 0)
        .unwrap()
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string();
    let envelope = decode_str(
        "success: ok\n_created: 1609459200\n_updated: 1609459200",
        DecodeOptions::default(),
    );
    assert_eq!(envelope.get("_created"), Some(expected.as_str()));
    assert_eq!(envelope.get("_updated"), Some(expected.as_str()));
    assert_ne!(envelope.get("_created"), Some("1609459200"));

    let rendered = envelope.get("_created").unwrap();
    assert_eq!(rendered.len(), "YYYY-MM-DDTHH:MM:SS".len());
    assert_eq!(&rendered[10..11], "T");
}

#[test]
fn test_decode_leaves_timestamps_when_disabled() {
    let envelope = decode_str("success: ok\n_created: 1609459200", raw());
    assert_eq!(envelope.get("_created"), Some("1609459200"));
}

#[test]
fn test_decode_non_numeric_timestamp_kept() {
    let envelope = decode_str("success: ok\n_created: yesterday", DecodeOptions::default());
    assert_eq!(envelope.get("_created"), Some("yesterday"));
}

#[test]
fn test_decode_only_named_fields_are_timestamps() {
    let envelope = decode_str("success: ok\n_export: 1609459200", DecodeOptions::default());
    assert_eq!(envelope.get("_export"), Some("1609459200"));
}

#[test]
fn test_decode_percent_when_requested() {
    let doc = "success: ok\na%3Ab: 50%25 done%0Anext\nbad: 100%";
    let decoded = decode_str(doc, percent());
    assert_eq!(decoded.get("a:b"), Some("50% done\nnext"));
    assert_eq!(decoded.get("bad"), Some("100%"));

    let untouched = decode_str(doc, raw());
    assert_eq!(untouched.get("a%3Ab"), Some("50%25 done%0Anext"));
}

#[test]
fn test_round_trip_plain_pairs() {
    let pairs = vec![
        ("target".to_string(), "http://example.net/".to_string()),
        ("erc.who".to_string(), "ezid-testing".to_string()),
        ("erc.what".to_string(), "test case".to_string()),
        ("erc.when".to_string(), "2021-06-01T10:20:30+00:00".to_string()),
        ("datacite.publicationyear".to_string(), "2021".to_string()),
    ];
    let record: MetadataRecord = pairs.clone().into_iter().collect();
    let doc = record.encode(&MemoryFiles::default()).unwrap();
    let envelope = decode_str(&format!("success: ark:/99999/fk4x\n{doc}"), raw());
    assert_eq!(envelope.fields(), pairs.as_slice());
}

#[test]
fn test_round_trip_reserved_characters_with_percent_decoding() {
    let xml = "<book>\r\n  <title>50% off: a story</title>\n</book>";
    let record: MetadataRecord = [("crossref", xml), ("odd:key", "v")].into_iter().collect();
    let doc = record.encode(&MemoryFiles::default()).unwrap();
    assert_eq!(doc.lines().count(), 2);

    let envelope = decode_str(&format!("success: ok\n{doc}"), percent());
    assert_eq!(envelope.get("crossref"), Some(xml));
    assert_eq!(envelope.get("odd:key"), Some("v"));
}

#[test]
fn test_envelope_json_view() {
    let envelope = decode_str("success: ok\ntarget: http://x/\nloose", raw());
    let json = envelope.to_json();
    assert_eq!(json["status"], "success");
    assert_eq!(json["status_message"], "ok");
    assert_eq!(json["body"], "loose");
    assert_eq!(json["fields"]["target"], "http://x/");
}
