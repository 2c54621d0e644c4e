//! Async client for the EZID plain-text API.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response};
use url::Url;

use super::types::{MintedIdentifier, SearchResponse};
use crate::anvl::{decode, DecodeOptions, FileSource, MetadataRecord, ResponseEnvelope};
use crate::config::{
    ClientConfig, Credentials, ACCEPTED_STATUS_CODES, ANVL_CONTENT_TYPE, IDENTIFIER_PATH,
    SEARCH_ACCEPT, SHOULDER_PATH, STATUS_PATH,
};
use crate::error_handling::{categorize_reqwest_error, ApiError, SearchError};
use crate::initialization::init_client;
use crate::search::{parse_search_results, SearchQuery};

/// Client for one EZID service instance.
///
/// Cheap to clone; clones share the underlying connection pool. When
/// credentials are configured they are sent as HTTP basic auth on every
/// request. No session cookie is kept between calls.
#[derive(Debug, Clone)]
pub struct EzidClient {
    http: Arc<reqwest::Client>,
    base_url: Url,
    credentials: Option<Credentials>,
}

/// Parses a service root so that relative paths join beneath it.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, url::ParseError> {
    if base_url.ends_with('/') {
        Url::parse(base_url)
    } else {
        Url::parse(&format!("{base_url}/"))
    }
}

fn log_response(response: &Response, started: Instant) {
    info!("Request: {}", response.url());
    debug!("Elapsed: {:?}", started.elapsed());
    info!("Status: {}", response.status());
}

impl EzidClient {
    /// Builds a client with its own HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be created.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = init_client(config)?;
        Self::with_http_client(http, config)
    }

    /// Builds a client that shares an existing `reqwest::Client`.
    pub fn with_http_client(
        http: Arc<reqwest::Client>,
        config: &ClientConfig,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            http,
            base_url: parse_base_url(&config.base_url)?,
            credentials: config.credentials.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(creds) => request.basic_auth(&creds.username, Some(&creds.password)),
            None => request,
        }
    }

    /// Sends a request whose response body is ANVL and decodes it.
    ///
    /// Statuses other than 200/201 and `error:` responses become errors.
    async fn send_anvl(
        &self,
        request: RequestBuilder,
        options: DecodeOptions,
    ) -> Result<ResponseEnvelope, ApiError> {
        let started = Instant::now();
        let response = self.authorize(request).send().await.map_err(|e| {
            warn!("{}: {}", categorize_reqwest_error(&e), e);
            ApiError::Http(e)
        })?;
        log_response(&response, started);

        let status = response.status();
        let body = response.text().await?;
        let envelope = decode(Some(body.as_str()), options);
        debug!("Response status line: {}: {}", envelope.status, envelope.status_message);

        if !ACCEPTED_STATUS_CODES.contains(&status.as_u16()) {
            return Err(ApiError::UnexpectedStatus {
                status,
                envelope: Box::new(envelope),
            });
        }
        if envelope.is_error() {
            return Err(ApiError::Rejected {
                message: envelope.status_message,
            });
        }
        Ok(envelope)
    }

    /// Fetches the service status line (`success: EZID is up`).
    pub async fn server_status(&self) -> Result<ResponseEnvelope, ApiError> {
        let url = self.endpoint(STATUS_PATH)?;
        self.send_anvl(self.http.get(url), DecodeOptions::default())
            .await
    }

    /// Fetches the metadata of `identifier`.
    pub async fn view(
        &self,
        identifier: &str,
        options: DecodeOptions,
    ) -> Result<ResponseEnvelope, ApiError> {
        let url = self.endpoint(&format!("{IDENTIFIER_PATH}/{identifier}"))?;
        self.send_anvl(self.http.get(url), options).await
    }

    /// Mints a new identifier on `shoulder` with `metadata`.
    ///
    /// File directives in `metadata` are resolved through `files` before
    /// anything is sent.
    ///
    /// # Errors
    ///
    /// Besides transport and status errors, returns
    /// [`ApiError::MissingIdentifier`] if the service reports success without
    /// naming the new identifier.
    pub async fn mint<F: FileSource + ?Sized>(
        &self,
        shoulder: &str,
        metadata: &MetadataRecord,
        files: &F,
    ) -> Result<MintedIdentifier, ApiError> {
        if self.credentials.is_none() {
            warn!("Minting without credentials; the service will most likely refuse");
        }
        let body = metadata.encode(files)?;
        let url = self.endpoint(&format!("{SHOULDER_PATH}/{shoulder}"))?;
        debug!("Minting on {} with {} metadata entries", shoulder, metadata.len());

        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, ANVL_CONTENT_TYPE)
            .body(body);
        let envelope = self.send_anvl(request, DecodeOptions::default()).await?;
        let minted = MintedIdentifier::from_envelope(envelope).ok_or(ApiError::MissingIdentifier)?;
        info!("Minted {}", minted.identifier);
        Ok(minted)
    }

    /// Runs a search against the HTML search or manage page.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError> {
        let url = self.endpoint(query.target().path())?;
        let started = Instant::now();
        let response = self
            .authorize(
                self.http
                    .get(url)
                    .header(ACCEPT, SEARCH_ACCEPT)
                    .query(&query.to_params()),
            )
            .send()
            .await
            .map_err(|e| {
                warn!("{}: {}", categorize_reqwest_error(&e), e);
                SearchError::Http(e)
            })?;
        log_response(&response, started);

        let status = response.status();
        let url = response.url().to_string();
        if !status.is_success() {
            return Err(SearchError::UnexpectedStatus(status));
        }
        let body = response.text().await?;
        let results = parse_search_results(&body);
        Ok(SearchResponse {
            results,
            url,
            status,
            elapsed: started.elapsed(),
        })
    }
}
