//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    DEFAULT_BASE_URL, DEFAULT_DATACITE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    ENV_BASE_URL, ENV_PASSWORD, ENV_USER, POLL_MAX_WAIT,
};
use crate::search::{IdStatus, IdentifierType, ManageFilters, ObjectType, SearchQuery};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Basic-auth credentials attached to each request.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Settings for [`EzidClient`](crate::api::EzidClient).
///
/// # Examples
///
/// ```no_run
/// use ezid_probe::ClientConfig;
///
/// let config = ClientConfig {
///     base_url: "http://localhost:18880".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service root, e.g. `https://ezid-stg.cdlib.org`
    pub base_url: String,

    /// Credentials for operations that need an account (minting)
    pub credentials: Option<Credentials>,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Command-line interface of the `ezid-probe` binary.
///
/// # Examples
///
/// ```bash
/// # Encode metadata, pulling a value from a file
/// ezid-probe encode target http://example.net/ datacite @datacite.xml
///
/// # Mint an ARK on the test shoulder
/// EZID_USER=apitest EZID_PASS=... ezid-probe mint ark:/99999/fk4 erc.who me
///
/// # Decode a saved response
/// ezid-probe decode response.txt --percent-decode
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "ezid-probe",
    version,
    about = "Encode, decode and exercise EZID's ANVL API."
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// EZID service URL
    #[arg(long, env = ENV_BASE_URL, default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Account name, sent as HTTP basic auth
    #[arg(long, env = ENV_USER, global = true)]
    pub user: Option<String>,

    /// Account password
    #[arg(long, env = ENV_PASSWORD, hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_seconds: u64,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Client settings derived from the global options.
    ///
    /// Credentials are only set when both user and password are present.
    pub fn client_config(&self) -> ClientConfig {
        let credentials = match (&self.user, &self.password) {
            (Some(username), Some(password)) if !username.is_empty() => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        };
        ClientConfig {
            base_url: self.base_url.clone(),
            credentials,
            timeout_seconds: self.timeout_seconds,
            ..Default::default()
        }
    }
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the ANVL document for KEY VALUE pairs
    ///
    /// A key of "@" copies the lines of the file named by its value; "@@"
    /// is a literal "@" key. A value "@path" is replaced by the file's
    /// contents; "@@text" is the literal value "@text".
    Encode {
        /// KEY VALUE [KEY VALUE ...]
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Decode an ANVL response from a file or stdin
    Decode {
        /// Input file (stdin when omitted or "-")
        file: Option<PathBuf>,

        #[command(flatten)]
        output: DecodeArgs,
    },

    /// Show the service status line
    Status,

    /// Show the metadata of an identifier
    View {
        /// Identifier, e.g. ark:/99999/fk4xyz
        identifier: String,

        #[command(flatten)]
        output: DecodeArgs,
    },

    /// Mint a new identifier on a shoulder
    Mint {
        /// Shoulder, e.g. ark:/99999/fk4 or doi:10.5072/FK2
        shoulder: String,

        /// KEY VALUE [KEY VALUE ...] metadata, same conventions as `encode`
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run a search and print the hit count and result rows
    Search(SearchArgs),

    /// Wait for a DOI to show up at DataCite
    Datacite {
        /// DOI without the "doi:" prefix, e.g. 10.5072/FK2ABC
        doi: String,

        /// DataCite API root
        #[arg(long, default_value = DEFAULT_DATACITE_URL)]
        datacite_url: String,

        /// Give up after this many seconds
        #[arg(long, default_value_t = POLL_MAX_WAIT.as_secs())]
        max_wait_seconds: u64,
    },
}

/// Output switches shared by commands that print an ANVL response.
#[derive(Debug, Clone, Args)]
pub struct DecodeArgs {
    /// Keep `_created` / `_updated` as raw epoch seconds
    #[arg(long)]
    pub raw_timestamps: bool,

    /// Reverse %XX escapes in keys and values
    #[arg(long)]
    pub percent_decode: bool,

    /// Print the envelope as JSON
    #[arg(long)]
    pub json: bool,
}

/// Search form options.
#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    /// Search the manage page (own identifiers) instead of public search
    #[arg(long)]
    pub manage: bool,

    #[arg(long)]
    pub keywords: Option<String>,
    #[arg(long)]
    pub identifier: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub creator: Option<String>,
    #[arg(long)]
    pub publisher: Option<String>,
    #[arg(long)]
    pub pubyear_from: Option<String>,
    #[arg(long)]
    pub pubyear_to: Option<String>,

    /// Resource type, e.g. Dataset
    #[arg(long)]
    pub object_type: Option<ObjectType>,

    /// ark|doi
    #[arg(long)]
    pub id_type: Option<IdentifierType>,

    /// Manage only: public|reserved|unavailable
    #[arg(long, requires = "manage")]
    pub id_status: Option<IdStatus>,

    /// Manage only: owner filter, e.g. user_apitest
    #[arg(long, requires = "manage")]
    pub owner: Option<String>,

    /// Manage only: created on or after (YYYY-MM-DD)
    #[arg(long, requires = "manage")]
    pub created_from: Option<String>,

    /// Manage only: created on or before (YYYY-MM-DD)
    #[arg(long, requires = "manage")]
    pub created_to: Option<String>,
}

impl From<SearchArgs> for SearchQuery {
    fn from(args: SearchArgs) -> Self {
        let manage = args.manage.then(|| ManageFilters {
            id_status: args.id_status,
            owner_selected: args.owner,
            create_time_from: args.created_from,
            create_time_to: args.created_to,
            ..Default::default()
        });
        SearchQuery {
            keywords: args.keywords,
            identifier: args.identifier,
            title: args.title,
            creator: args.creator,
            publisher: args.publisher,
            pubyear_from: args.pubyear_from,
            pubyear_to: args.pubyear_to,
            object_type: args.object_type,
            id_type: args.id_type,
            filtered: None,
            manage,
        }
    }
}

impl DecodeArgs {
    pub fn decode_options(&self) -> crate::anvl::DecodeOptions {
        crate::anvl::DecodeOptions {
            format_timestamps: !self.raw_timestamps,
            decode_percent: self.percent_decode,
        }
    }
}
