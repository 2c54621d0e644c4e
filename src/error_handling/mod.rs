//! Error handling.
//!
//! This module provides:
//! - Error type definitions for each layer (codec, API client, search, DataCite)
//! - Categorization of HTTP transport failures
//! - The fixed-interval polling strategy used while waiting for propagation

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, polling_strategy};
pub use types::{
    AnvlError, ApiError, DataciteError, InitializationError, RequestErrorKind, SearchError,
};
