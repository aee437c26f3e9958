//! Data model for ENTSO-E requests, documents, and aggregation outputs.
//!
//! - `types` - document and process code tables
//! - `request` - the validated request descriptor
//! - `document` - the two XML response schemas and the dual-shape parse
//! - `output` - aggregated records returned to callers

mod document;
mod output;
mod request;
mod types;

pub use document::{
    parse_document, AcknowledgementMarketDocument, GlMarketDocument, MktPsrType, ParsedDocument,
    Period, Point, Reason, TimeInterval, TimeSeries,
};
pub use output::{AggregatePeriodValue, CountryPsrCapacity};
pub use request::EntsoeRequest;
pub use types::{DocumentType, ProcessType};
