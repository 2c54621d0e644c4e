//! Search page helpers.
//!
//! The service has no plain-text search API, so searches go through the
//! HTML search (or manage) page. This module builds the form parameters and
//! scrapes the returned results table.

mod query;
mod results;

pub use query::{IdStatus, IdentifierType, ManageFilters, ObjectType, SearchQuery, SearchTarget};
pub use results::{parse_search_results, parse_total, SearchResults};
