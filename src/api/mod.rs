//! EZID plain-text API client.
//!
//! Requests and responses are ANVL documents handled by [`crate::anvl`].
//! The search page is HTML and goes through [`crate::search`].

mod client;
mod types;

pub(crate) use client::parse_base_url;
pub use client::EzidClient;
pub use types::{MintedIdentifier, SearchResponse};
