use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Installed generation capacity of one generation type in one country.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryPsrCapacity {
    /// Resolved country name
    pub country: String,
    /// Combined generation-type label, `"{Type} | {Info}"`
    pub psr: String,
    /// Summed installed capacity in MW
    pub capacity: i64,
    /// The as-of instant of the report window
    pub date: DateTime<Utc>,
}

/// One interval of the day-ahead generation forecast.
///
/// `renewable_value` is filled by a second pass over the wind/solar
/// forecast; intervals the renewable report does not cover keep zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatePeriodValue {
    /// Start of the interval
    pub start_date: DateTime<Utc>,
    /// Forecast generation across all types
    pub total_value: i64,
    /// Forecast wind and solar generation
    pub renewable_value: i64,
}
