use chrono::{DateTime, Utc};

use crate::errors::EntsoeError;

use super::types::{DocumentType, ProcessType};

/// A validated request descriptor for the transparency platform.
///
/// Built once per call and immutable afterwards. The constructor rejects
/// descriptors the service would silently mishandle: an empty domain, an
/// empty token, or a reversed time window.
#[derive(Clone, Debug)]
pub struct EntsoeRequest {
    /// Start of the requested period, UTC
    pub start: DateTime<Utc>,
    /// End of the requested period, UTC
    pub end: DateTime<Utc>,
    /// Timing semantics of the report
    pub process_type: ProcessType,
    /// Content of the report
    pub document_type: DocumentType,
    /// Bidding zone / control area identifier
    pub domain: String,
    /// Optional generation-type filter, sent as `psrType` when present
    pub psr_type: Option<String>,
    /// Access token issued by the transparency platform
    pub security_token: String,
}

impl EntsoeRequest {
    /// Builds a validated request.
    ///
    /// # Errors
    ///
    /// Returns [`EntsoeError::InvalidRequest`] when the domain or token is
    /// empty, or when `start` is not strictly before `end`.
    pub fn new(
        document_type: DocumentType,
        process_type: ProcessType,
        domain: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        security_token: impl Into<String>,
    ) -> Result<Self, EntsoeError> {
        let domain = domain.into();
        let security_token = security_token.into();

        if domain.trim().is_empty() {
            return Err(EntsoeError::InvalidRequest(
                "domain identifier must not be empty".to_string(),
            ));
        }
        if security_token.trim().is_empty() {
            return Err(EntsoeError::InvalidRequest(
                "security token must not be empty".to_string(),
            ));
        }
        if start >= end {
            return Err(EntsoeError::InvalidRequest(format!(
                "period start {} must precede period end {}",
                start, end
            )));
        }

        Ok(Self {
            start,
            end,
            process_type,
            document_type,
            domain,
            psr_type: None,
            security_token,
        })
    }

    /// Attaches a generation-type filter. An empty filter is treated as
    /// absent and omitted from the query string.
    pub fn with_psr_type(mut self, psr_type: impl Into<String>) -> Self {
        let psr_type = psr_type.into();
        self.psr_type = (!psr_type.is_empty()).then_some(psr_type);
        self
    }
}
