//! Configuration constants.
//!
//! Service endpoints, timeouts and polling parameters used throughout the
//! crate.

use std::time::Duration;

/// EZID staging service; the default target for exploratory runs.
pub const DEFAULT_BASE_URL: &str = "https://ezid-stg.cdlib.org";

/// DataCite test API, where DOIs minted against staging show up.
pub const DEFAULT_DATACITE_URL: &str = "https://api.test.datacite.org";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("ezid_probe/", env!("CARGO_PKG_VERSION"));

/// Content type of ANVL request bodies.
pub const ANVL_CONTENT_TYPE: &str = "text/plain; charset=UTF-8";

/// Accept header sent with search requests.
pub const SEARCH_ACCEPT: &str = "application/json";

/// HTTP statuses treated as success for ANVL calls and polling.
pub const ACCEPTED_STATUS_CODES: &[u16] = &[200, 201];

// Propagation polling
/// Delay between polls of an external registry
pub const POLL_INTERVAL: Duration = Duration::from_secs(3);
/// Total time to keep polling before giving up
pub const POLL_MAX_WAIT: Duration = Duration::from_secs(30);

// API paths
pub const STATUS_PATH: &str = "status";
pub const IDENTIFIER_PATH: &str = "id";
pub const SHOULDER_PATH: &str = "shoulder";
pub const SEARCH_PATH: &str = "search";
pub const MANAGE_PATH: &str = "manage";
pub const DATACITE_DOIS_PATH: &str = "dois";

// Environment variables
pub const ENV_BASE_URL: &str = "EZID_BASE_URL";
pub const ENV_USER: &str = "EZID_USER";
pub const ENV_PASSWORD: &str = "EZID_PASS";
