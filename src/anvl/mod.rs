//! ANVL (A Name-Value Language) codec.
//!
//! EZID's plain-text API speaks ANVL: one `key: value` pair per line, with
//! `%`, `\r` and `\n` (and `:` in keys) written as `%XX`. Responses start
//! with a status line such as `success: ark:/99999/fk4test`.
//!
//! - [`encode`] / [`MetadataRecord`] build request bodies
//! - [`decode`] turns a response body into a [`ResponseEnvelope`]
//!
//! The codec holds no state and only reads files through the [`FileSource`]
//! handed to the encoder.

mod decode;
mod encode;
mod escape;
mod record;

pub use decode::{
    decode, decode_str, format_timestamp, DecodeOptions, ResponseEnvelope, ERROR_STATUS,
    NO_CONTENT_MESSAGE, SUCCESS_STATUS, UNKNOWN_STATUS,
};
pub use encode::{
    encode, encode_args, FileSource, FsFileSource, ESCAPED_FILE_MARKER, FILE_MARKER,
};
pub use escape::{escape_key, escape_value, unescape};
pub use record::MetadataRecord;

#[cfg(test)]
mod tests;
