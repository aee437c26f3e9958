//! ENTSO-E transparency platform client.
//!
//! This crate fetches electricity generation and load reports from the
//! ENTSO-E transparency API, deserializes the XML documents into typed
//! values, and folds the time-series payload into per-country aggregates
//! joined against two static reference tables.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |     Facade       | --> |  EntsoeRequest   |  (validated descriptor)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Transport     |  (one GET per request)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | GlMarketDocument |  (or acknowledgement)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   Aggregation    |  (group, sum, align)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  Output records  |  (capacity, forecast)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`EuropeanLoadService`] - the public operations (installed capacity,
//!   forecast with renewable overlay, raw current value)
//! - [`EntsoeRequest`] - a validated request descriptor
//! - [`GlMarketDocument`] / [`AcknowledgementMarketDocument`] - the two
//!   response schemas
//! - [`CodeSet`] / [`CodeLookup`] - the read-only reference tables
//! - [`EntsoeError`] - the error taxonomy; nothing is retried or recovered
//!   inside the crate

pub mod aggregate;
pub mod codes;
pub mod errors;
pub mod models;
pub mod service;
pub mod transport;

// Re-export the reference-table types
pub use codes::{CodeLookup, CodeSet, CodesError, CountryCode, FuelCode};

// Re-export the error taxonomy
pub use errors::EntsoeError;

// Re-export the data model
pub use models::{
    AcknowledgementMarketDocument, AggregatePeriodValue, CountryPsrCapacity, DocumentType,
    EntsoeRequest, GlMarketDocument, ProcessType,
};

// Re-export the service facade and transport
pub use service::EuropeanLoadService;
pub use transport::{EntsoeHttpTransport, EntsoeTransport, ENTSOE_ENDPOINT};
