//! Result types returned by [`EzidClient`](super::EzidClient).

use std::time::Duration;

use reqwest::StatusCode;

use crate::anvl::ResponseEnvelope;
use crate::search::SearchResults;

/// Outcome of a successful mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintedIdentifier {
    /// The new identifier, e.g. `doi:10.5072/FK2ABC`
    pub identifier: String,
    /// ARK that shadows a DOI, when the service reports one after `|`
    pub shadow_ark: Option<String>,
    /// The full decoded response
    pub envelope: ResponseEnvelope,
}

impl MintedIdentifier {
    /// Splits a mint status message such as `doi:10.5072/FK2ABC | ark:/b5072/fk2abc`.
    ///
    /// Returns `None` when the message has no identifier token.
    pub fn from_envelope(envelope: ResponseEnvelope) -> Option<Self> {
        let mut parts = envelope.status_message.splitn(2, '|');
        let identifier = parts.next()?.split_whitespace().next()?.to_string();
        let shadow_ark = parts
            .next()
            .and_then(|rest| rest.split_whitespace().next())
            .map(str::to_string);
        Some(Self {
            identifier,
            shadow_ark,
            envelope,
        })
    }

    /// The part after the scheme, e.g. `10.5072/FK2ABC` for a DOI.
    pub fn without_scheme(&self) -> &str {
        self.identifier
            .split_once(':')
            .map(|(_, rest)| rest)
            .unwrap_or(&self.identifier)
    }
}

/// A fetched and scraped search page.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    pub results: SearchResults,
    /// Final URL including the query string
    pub url: String,
    pub status: StatusCode,
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anvl::{decode_str, DecodeOptions};

    #[test]
    fn test_minted_identifier_with_shadow_ark() {
        let envelope = decode_str(
            "success: doi:10.5072/FK2ABC | ark:/b5072/fk2abc",
            DecodeOptions::default(),
        );
        let minted = MintedIdentifier::from_envelope(envelope).unwrap();
        assert_eq!(minted.identifier, "doi:10.5072/FK2ABC");
        assert_eq!(minted.shadow_ark.as_deref(), Some("ark:/b5072/fk2abc"));
        assert_eq!(minted.without_scheme(), "10.5072/FK2ABC");
    }

    #[test]
    fn test_minted_identifier_ark_only() {
        let envelope = decode_str("success: ark:/99999/fk4test", DecodeOptions::default());
        let minted = MintedIdentifier::from_envelope(envelope).unwrap();
        assert_eq!(minted.identifier, "ark:/99999/fk4test");
        assert_eq!(minted.shadow_ark, None);
        assert_eq!(minted.without_scheme(), "/99999/fk4test");
    }

    #[test]
    fn test_minted_identifier_missing() {
        let envelope = decode_str("success:   ", DecodeOptions::default());
        assert!(MintedIdentifier::from_envelope(envelope).is_none());
    }
}
