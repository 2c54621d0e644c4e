//! ezid_probe library: ANVL codec and EZID API helpers
//!
//! This library provides the pieces needed to drive an EZID identifier
//! service from tests and scripts:
//!
//! - [`anvl`]: encode request metadata and decode ANVL response bodies
//! - [`EzidClient`]: status, view, mint and search calls
//! - [`datacite`]: wait for a minted DOI to reach DataCite
//!
//! # Example
//!
//! ```no_run
//! use ezid_probe::anvl::{FsFileSource, MetadataRecord};
//! use ezid_probe::{ClientConfig, Credentials, EzidClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = EzidClient::new(&ClientConfig {
//!     credentials: Some(Credentials {
//!         username: "apitest".into(),
//!         password: "apitest".into(),
//!     }),
//!     ..Default::default()
//! })?;
//!
//! let mut metadata = MetadataRecord::new();
//! metadata
//!     .push("target", "http://example.net/")
//!     .push("erc.who", "ezid-testing")
//!     .push("erc.what", "test case");
//!
//! let minted = client.mint("ark:/99999/fk4", &metadata, &FsFileSource).await?;
//! let stored = client.view(&minted.identifier, Default::default()).await?;
//! assert_eq!(stored.get("erc.who"), Some("ezid-testing"));
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! The codec is synchronous. The HTTP helpers need a Tokio runtime.

pub mod anvl;
pub mod api;
pub mod config;
pub mod datacite;
pub mod error_handling;
pub mod initialization;
pub mod search;

// Re-export public API
pub use anvl::{DecodeOptions, MetadataRecord, ResponseEnvelope};
pub use api::{EzidClient, MintedIdentifier, SearchResponse};
pub use config::{ClientConfig, Credentials, LogFormat, LogLevel};
pub use error_handling::{AnvlError, ApiError, DataciteError, SearchError};
