//! ENTSO-E code tables.
//!
//! Readable names for transparency-platform resources use an alphanumeric
//! code, e.g. `A71` for the generation forecast series. Those in use:
//!
//! - `A65` = Total Load
//! - `A69` = Generation Forecast (Wind/Solar)
//! - `A71` = Generation Forecast By Type
//! - `A73` = Generation Actual
//! - `A75` = Generation Actual By Type
//!
//! Within these are codes for the timing of the report:
//!
//! - `A01` = Day ahead
//! - `A16` = Realised
//! - `A33` = Year ahead

use serde::{Deserialize, Serialize};

/// The content of a requested report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// A65 - total load of a bidding zone
    TotalLoad,
    /// A69 - wind and solar generation forecast
    WindSolarForecast,
    /// A71 - generation forecast broken down by type
    GenerationForecastByType,
    /// A73 - realised generation
    ActualGeneration,
    /// A75 - realised generation broken down by type
    ActualGenerationByType,
}

impl DocumentType {
    /// The wire code sent as the `documentType` query parameter.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TotalLoad => "A65",
            Self::WindSolarForecast => "A69",
            Self::GenerationForecastByType => "A71",
            Self::ActualGeneration => "A73",
            Self::ActualGenerationByType => "A75",
        }
    }

    /// Total-load reports address the consumption side of a bidding zone,
    /// so the service expects the domain under `outBiddingZone_Domain`
    /// rather than `in_Domain`. Using the wrong key yields an empty result,
    /// not an HTTP error.
    pub fn is_total_load(&self) -> bool {
        matches!(self, Self::TotalLoad)
    }
}

/// The timing semantics of a requested report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessType {
    /// A01 - day-ahead schedule
    DayAhead,
    /// A16 - realised values
    Realised,
    /// A33 - year-ahead outlook
    YearAhead,
}

impl ProcessType {
    /// The wire code sent as the `processType` query parameter.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DayAhead => "A01",
            Self::Realised => "A16",
            Self::YearAhead => "A33",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_codes() {
        assert_eq!(DocumentType::TotalLoad.code(), "A65");
        assert_eq!(DocumentType::WindSolarForecast.code(), "A69");
        assert_eq!(DocumentType::GenerationForecastByType.code(), "A71");
        assert_eq!(DocumentType::ActualGeneration.code(), "A73");
        assert_eq!(DocumentType::ActualGenerationByType.code(), "A75");
    }

    #[test]
    fn test_process_type_codes() {
        assert_eq!(ProcessType::DayAhead.code(), "A01");
        assert_eq!(ProcessType::Realised.code(), "A16");
        assert_eq!(ProcessType::YearAhead.code(), "A33");
    }

    #[test]
    fn test_only_total_load_is_total_load() {
        assert!(DocumentType::TotalLoad.is_total_load());
        assert!(!DocumentType::WindSolarForecast.is_total_load());
        assert!(!DocumentType::GenerationForecastByType.is_total_load());
        assert!(!DocumentType::ActualGeneration.is_total_load());
        assert!(!DocumentType::ActualGenerationByType.is_total_load());
    }
}
