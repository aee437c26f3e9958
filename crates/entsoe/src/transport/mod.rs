//! HTTP transport for ENTSO-E market documents.
//!
//! One logical request maps to one HTTP GET; the response body resolves to
//! either the success schema or the acknowledgement schema. No retries and
//! no pagination - a single upstream failure surfaces immediately.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use reqwest::{Client, StatusCode, Url};

use crate::errors::EntsoeError;
use crate::models::{
    parse_document, AcknowledgementMarketDocument, EntsoeRequest, GlMarketDocument, ParsedDocument,
};

/// The transparency platform endpoint.
pub const ENTSOE_ENDPOINT: &str = "https://web-api.tp.entsoe.eu/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Issues market-document requests.
///
/// The facade and aggregation layers depend on this trait rather than the
/// HTTP implementation so they can run against an in-memory transport in
/// tests.
#[async_trait]
pub trait EntsoeTransport: Send + Sync {
    /// Fetches and deserializes one market document.
    async fn fetch(&self, request: &EntsoeRequest) -> Result<GlMarketDocument, EntsoeError>;

    /// Fetches one report and returns the raw response body unparsed.
    async fn fetch_raw(&self, request: &EntsoeRequest) -> Result<String, EntsoeError>;
}

/// The production transport against the transparency platform.
pub struct EntsoeHttpTransport {
    client: Client,
}

impl EntsoeHttpTransport {
    /// Creates a transport with a 30-second request timeout.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    async fn send(&self, request: &EntsoeRequest) -> Result<(StatusCode, String), EntsoeError> {
        let url = request_url(request)?;
        debug!(
            "ENTSO-E request: {}",
            url.as_str().replace(&request.security_token, "***")
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

impl Default for EntsoeHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntsoeTransport for EntsoeHttpTransport {
    async fn fetch(&self, request: &EntsoeRequest) -> Result<GlMarketDocument, EntsoeError> {
        let (status, body) = self.send(request).await?;
        if !status.is_success() {
            return Err(upstream_failure(status, &body));
        }

        match parse_document(&body)? {
            ParsedDocument::Market(document) => {
                debug!(
                    "ENTSO-E returned {} time series for {}",
                    document.time_series.len(),
                    request.domain
                );
                Ok(document)
            }
            // A declared error inside a success status is still an upstream
            // failure, not a malformed response.
            ParsedDocument::Acknowledgement(acknowledgement) => {
                let reason = acknowledgement
                    .first_reason()
                    .unwrap_or("acknowledgement without reason text")
                    .to_string();
                warn!("ENTSO-E acknowledged an error inside a {status} response: {reason}");
                Err(EntsoeError::UpstreamFailure {
                    status: status.as_u16(),
                    reason,
                })
            }
        }
    }

    async fn fetch_raw(&self, request: &EntsoeRequest) -> Result<String, EntsoeError> {
        let (status, body) = self.send(request).await?;
        if !status.is_success() {
            return Err(upstream_failure(status, &body));
        }
        Ok(body)
    }
}

/// Builds the request URL with the per-document-type parameter naming
/// rules applied.
fn request_url(request: &EntsoeRequest) -> Result<Url, EntsoeError> {
    Url::parse_with_params(ENTSOE_ENDPOINT, query_params(request))
        .map_err(|error| EntsoeError::InvalidRequest(format!("failed to build request URL: {error}")))
}

fn query_params(request: &EntsoeRequest) -> Vec<(&'static str, String)> {
    // Total-load reports take the domain under a different key; the wrong
    // key yields an empty upstream result rather than an error.
    let domain_key = if request.document_type.is_total_load() {
        "outBiddingZone_Domain"
    } else {
        "in_Domain"
    };

    let mut params = vec![
        ("securityToken", request.security_token.clone()),
        ("processType", request.process_type.code().to_string()),
        ("documentType", request.document_type.code().to_string()),
        ("periodStart", format_period(request.start)),
        ("periodEnd", format_period(request.end)),
        (domain_key, request.domain.clone()),
    ];
    if let Some(psr_type) = &request.psr_type {
        params.push(("psrType", psr_type.clone()));
    }
    params
}

/// Formats a period bound as the fixed-width `yyyyMMddHH00` form the
/// service expects, minutes truncated to the hour.
fn format_period(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%d%H00").to_string()
}

/// Decodes a non-success response body into an upstream failure, falling
/// back to the raw body when it is not an acknowledgement document.
fn upstream_failure(status: StatusCode, body: &str) -> EntsoeError {
    let reason = match quick_xml::de::from_str::<AcknowledgementMarketDocument>(body) {
        Ok(acknowledgement) => acknowledgement
            .first_reason()
            .unwrap_or(body.trim())
            .to_string(),
        Err(_) => body.trim().to_string(),
    };
    EntsoeError::UpstreamFailure {
        status: status.as_u16(),
        reason,
    }
}
