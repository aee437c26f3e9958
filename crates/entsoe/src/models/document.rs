//! XML document shapes returned by the transparency platform.
//!
//! A request yields one of two schemas: a `GL_MarketDocument` carrying the
//! time-series payload, or an `Acknowledgement_MarketDocument` carrying the
//! reasons a request could not be serviced. The two are told apart by
//! fields each schema requires and the other lacks - the overall time
//! interval for the market document, the reason list for the
//! acknowledgement - so an acknowledgement body can never deserialize as an
//! empty success document.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::errors::EntsoeError;

/// A successfully serviced generation/load report.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GlMarketDocument {
    /// The overall interval the document covers
    #[serde(rename = "time_Period.timeInterval")]
    pub time_period: TimeInterval,
    /// Ordered report series; may legitimately be empty
    #[serde(rename = "TimeSeries", default)]
    pub time_series: Vec<TimeSeries>,
}

/// One series of period data, usually carrying a single generation type.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TimeSeries {
    /// Generation-type markers; zero or more, typically one
    #[serde(rename = "MktPSRType", default)]
    pub psr_types: Vec<MktPsrType>,
    /// Ordered periods of point data
    #[serde(rename = "Period", default)]
    pub periods: Vec<Period>,
}

impl TimeSeries {
    /// The series' generation-type code, when one is present.
    pub fn psr_code(&self) -> Option<&str> {
        self.psr_types.first().map(|marker| marker.psr_type.as_str())
    }
}

/// Generation-type marker element.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MktPsrType {
    #[serde(rename = "psrType")]
    pub psr_type: String,
}

/// A contiguous run of points over one time interval.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Period {
    #[serde(rename = "timeInterval")]
    pub time_interval: TimeInterval,
    /// Declared resolution, e.g. `PT60M`. Informational; point spacing is
    /// derived from the interval length and the point count instead.
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(rename = "Point", default)]
    pub points: Vec<Point>,
}

/// A single quantity at a position within a period.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Point {
    pub position: u32,
    pub quantity: i64,
}

/// Interval bounds as the service renders them.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TimeInterval {
    pub start: String,
    pub end: String,
}

impl TimeInterval {
    /// Parsed start bound, `None` when the raw text is unparseable.
    pub fn start_utc(&self) -> Option<DateTime<Utc>> {
        parse_entsoe_timestamp(&self.start)
    }

    /// Parsed end bound, `None` when the raw text is unparseable.
    pub fn end_utc(&self) -> Option<DateTime<Utc>> {
        parse_entsoe_timestamp(&self.end)
    }
}

/// Interval bounds arrive as `2016-01-01T00:00Z`, without seconds; full
/// RFC 3339 timestamps also occur.
fn parse_entsoe_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// The error-report schema returned when a request cannot be serviced.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AcknowledgementMarketDocument {
    #[serde(rename = "Reason")]
    pub reasons: Vec<Reason>,
}

impl AcknowledgementMarketDocument {
    /// The leading human-readable reason, when one is present.
    pub fn first_reason(&self) -> Option<&str> {
        self.reasons.first().and_then(|reason| reason.text.as_deref())
    }
}

/// One reason record inside an acknowledgement.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Reason {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// A response body resolved to one of the two upstream schemas.
#[derive(Clone, Debug, PartialEq)]
pub enum ParsedDocument {
    /// The success schema
    Market(GlMarketDocument),
    /// The declared-error schema
    Acknowledgement(AcknowledgementMarketDocument),
}

/// Resolves a response body with a two-stage parse: the market-document
/// schema first, the acknowledgement schema second.
///
/// # Errors
///
/// Returns [`EntsoeError::MalformedResponse`] when the body parses as
/// neither schema, carrying the market-schema parse error.
pub fn parse_document(body: &str) -> Result<ParsedDocument, EntsoeError> {
    match quick_xml::de::from_str::<GlMarketDocument>(body) {
        Ok(document) => Ok(ParsedDocument::Market(document)),
        Err(market_error) => match quick_xml::de::from_str::<AcknowledgementMarketDocument>(body) {
            Ok(acknowledgement) => Ok(ParsedDocument::Acknowledgement(acknowledgement)),
            Err(_) => Err(EntsoeError::MalformedResponse(market_error.to_string())),
        },
    }
}
