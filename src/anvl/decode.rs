//! ANVL response decoding.

use chrono::{Local, TimeZone};
use log::debug;
use serde_json::{json, Map, Value};

use super::escape::unescape;

/// Status token reported when a response has no content.
pub const UNKNOWN_STATUS: &str = "unknown";
/// Status message reported when a response has no content.
pub const NO_CONTENT_MESSAGE: &str = "no content";
/// Status token of a successful response.
pub const SUCCESS_STATUS: &str = "success";
/// Status token of a failed response.
pub const ERROR_STATUS: &str = "error";

/// Fields holding Unix epoch timestamps.
pub(crate) static TIMESTAMP_FIELDS: &[&str] = &["_created", "_updated"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Decoder switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Render `_created` / `_updated` epochs as local `YYYY-MM-DDTHH:MM:SS`.
    pub format_timestamps: bool,
    /// Reverse `%XX` escapes in keys and values.
    pub decode_percent: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            format_timestamps: true,
            decode_percent: false,
        }
    }
}

/// A decoded ANVL response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    /// Text before the first colon of the first line.
    pub status: String,
    /// Rest of the first line.
    pub status_message: String,
    /// Lines that were not `key: value` pairs, concatenated as received.
    pub body: String,
    fields: Vec<(String, String)>,
}

impl ResponseEnvelope {
    fn empty() -> Self {
        Self {
            status: UNKNOWN_STATUS.to_string(),
            status_message: NO_CONTENT_MESSAGE.to_string(),
            body: String::new(),
            fields: Vec::new(),
        }
    }

    /// Value of the first field named `key` (no trailing colon).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Fields in the order they were received.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }

    pub fn is_error(&self) -> bool {
        self.status == ERROR_STATUS
    }

    /// JSON view with the fields collected into an object.
    pub fn to_json(&self) -> Value {
        let fields: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        json!({
            "status": self.status,
            "status_message": self.status_message,
            "body": self.body,
            "fields": fields,
        })
    }
}

/// Decodes a response body into a [`ResponseEnvelope`].
///
/// `None` and empty documents give status `unknown` / `no content`. The
/// first line is the status line. Every later line with a colon becomes a
/// field; any other line is appended to the body. Decoding never fails.
pub fn decode(document: Option<&str>, options: DecodeOptions) -> ResponseEnvelope {
    let Some(document) = document else {
        return ResponseEnvelope::empty();
    };
    let mut lines = document.lines();
    let Some(status_line) = lines.next() else {
        return ResponseEnvelope::empty();
    };

    let (status, status_message) = match status_line.split_once(':') {
        Some((token, message)) => (token.to_string(), message.trim_matches(' ').to_string()),
        None => (status_line.to_string(), String::new()),
    };

    let mut envelope = ResponseEnvelope {
        status,
        status_message,
        body: String::new(),
        fields: Vec::new(),
    };

    for line in lines {
        let Some((key, value)) = line.split_once(':') else {
            envelope.body.push_str(line);
            continue;
        };

        let mut value = value.strip_prefix(' ').unwrap_or(value).to_string();
        if options.format_timestamps && TIMESTAMP_FIELDS.contains(&key) {
            value = format_timestamp(&value).unwrap_or(value);
        }

        let (key, value) = if options.decode_percent {
            (unescape(key).into_owned(), unescape(&value).into_owned())
        } else {
            (key.to_string(), value)
        };
        envelope.fields.push((key, value));
    }
    envelope
}

/// Shorthand for [`decode`] on a body that is known to be present.
pub fn decode_str(document: &str, options: DecodeOptions) -> ResponseEnvelope {
    decode(Some(document), options)
}

/// Renders a Unix epoch as local time, or `None` if it is not an integer.
pub fn format_timestamp(epoch: &str) -> Option<String> {
    let seconds: i64 = match epoch.trim().parse() {
        Ok(seconds) => seconds,
        Err(e) => {
            debug!("Leaving non-numeric timestamp {:?} as is: {}", epoch, e);
            return None;
        }
    };
    Local
        .timestamp_opt(seconds, 0)
        .single()
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
}
