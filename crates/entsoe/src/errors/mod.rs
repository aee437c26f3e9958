//! Error types for the ENTSO-E client.

use thiserror::Error;

/// Errors that can occur while requesting or aggregating ENTSO-E data.
///
/// No variant is recovered inside the crate; every failure propagates to
/// the caller as a typed result.
#[derive(Error, Debug)]
pub enum EntsoeError {
    /// Caller-supplied parameters failed validation before any request was
    /// sent. Fatal to the call.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The service answered with a non-success status, or declared an error
    /// inside a success response. `reason` carries the decoded
    /// acknowledgement text when one could be extracted, the raw body
    /// otherwise.
    #[error("Upstream failure ({status}): {reason}")]
    UpstreamFailure {
        /// HTTP status code of the response
        status: u16,
        /// Decoded acknowledgement reason or raw response body
        reason: String,
    },

    /// The service returned a success status with a body that parses as
    /// neither a market document nor an acknowledgement. A protocol
    /// anomaly, distinct from a declared upstream failure.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A domain identifier has no entry in the country reference table.
    /// Surfaced as a data-integrity error, never silently substituted.
    #[error("Unknown domain: {0}")]
    UnknownDomain(String),

    /// A network error occurred while communicating with the service.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
