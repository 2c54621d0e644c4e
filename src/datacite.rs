//! DataCite propagation check.
//!
//! A DOI minted through EZID is registered with DataCite asynchronously, so
//! a fresh DOI may take a few seconds to appear. [`verify_doi`] polls the
//! DataCite REST API on a fixed interval until the record shows up or the
//! wait window closes.

use std::time::Duration;

use log::{debug, info};
use reqwest::StatusCode;
use serde::Deserialize;
use tokio_retry::RetryIf;

use crate::api::parse_base_url;
use crate::config::{ACCEPTED_STATUS_CODES, DATACITE_DOIS_PATH};
use crate::error_handling::{categorize_reqwest_error, polling_strategy, DataciteError};

#[derive(Debug, Deserialize)]
struct DoiDocument {
    data: DoiData,
}

#[derive(Debug, Deserialize)]
struct DoiData {
    id: String,
}

/// A DOI record as returned by DataCite.
#[derive(Debug, Clone)]
pub struct DataciteRecord {
    /// DOI as DataCite spells it (lowercase)
    pub id: String,
    /// The full JSON document
    pub document: serde_json::Value,
}

/// Why a single poll attempt did not produce an answer.
#[derive(Debug)]
enum PollFailure {
    Status(StatusCode),
    Http(reqwest::Error),
}

impl PollFailure {
    fn is_retriable(&self) -> bool {
        match self {
            PollFailure::Status(_) => true,
            PollFailure::Http(e) => categorize_reqwest_error(e).is_transient(),
        }
    }
}

/// GETs `url` until it answers 200/201, waiting `interval` between tries.
///
/// Non-accepted statuses and transient transport errors are retried until
/// `max_wait` is used up. Returns the body of the first accepted response.
async fn get_with_retry(
    client: &reqwest::Client,
    url: &url::Url,
    interval: Duration,
    max_wait: Duration,
) -> Result<String, PollFailure> {
    let attempt = move || async move {
        let response = client.get(url.clone()).send().await.map_err(PollFailure::Http)?;
        let status = response.status();
        info!("{}: {}", status.as_u16(), response.url());
        if !ACCEPTED_STATUS_CODES.contains(&status.as_u16()) {
            return Err(PollFailure::Status(status));
        }
        response.text().await.map_err(PollFailure::Http)
    };
    RetryIf::spawn(
        polling_strategy(interval, max_wait),
        attempt,
        |failure: &PollFailure| failure.is_retriable(),
    )
    .await
}

/// Waits for `doi` to appear at DataCite and checks the record's id.
///
/// `doi` is given without the `doi:` scheme, e.g. `10.5072/FK2ABC`. The
/// comparison with DataCite's id is case-insensitive.
///
/// # Errors
///
/// - [`DataciteError::NotFound`] if the DOI never answers 200/201
/// - [`DataciteError::IdMismatch`] if DataCite returns another DOI
/// - [`DataciteError::Json`] if the body is not a DOI document
pub async fn verify_doi(
    client: &reqwest::Client,
    datacite_url: &str,
    doi: &str,
    interval: Duration,
    max_wait: Duration,
) -> Result<DataciteRecord, DataciteError> {
    let url = parse_base_url(datacite_url)?.join(&format!("{DATACITE_DOIS_PATH}/{doi}"))?;
    debug!("Polling {} for up to {:?}", url, max_wait);

    let body = match get_with_retry(client, &url, interval, max_wait).await {
        Ok(body) => body,
        Err(PollFailure::Status(status)) => {
            debug!("Last DataCite status for {}: {}", doi, status);
            return Err(DataciteError::NotFound {
                doi: doi.to_string(),
            });
        }
        Err(PollFailure::Http(e)) => return Err(DataciteError::Http(e)),
    };

    let document: serde_json::Value = serde_json::from_str(&body)?;
    let parsed: DoiDocument = serde_json::from_value(document.clone())?;
    if !parsed.data.id.eq_ignore_ascii_case(doi) {
        return Err(DataciteError::IdMismatch {
            expected: doi.to_string(),
            found: parsed.data.id,
        });
    }
    info!("DOI {} is registered at DataCite", doi);
    Ok(DataciteRecord {
        id: parsed.data.id,
        document,
    })
}
