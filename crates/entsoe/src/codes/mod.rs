//! Static reference code tables.
//!
//! Two read-only tables correlate upstream identifiers with human-readable
//! records: country entries keyed by ENTSO-E domain identifier, and
//! fuel/generation-type entries keyed by PSR code. Both are loaded once at
//! startup and shared read-only for the process lifetime.

use std::fs::File;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One country entry, matching the field names of the source JSON table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCode {
    /// Country display name
    pub country: String,
    /// Short human country code, e.g. `GB`
    #[serde(rename = "Code")]
    pub code: String,
    /// ENTSO-E domain identifier, e.g. `10YGB----------A`
    #[serde(rename = "ENTSOe_ID")]
    pub entsoe_id: String,
    #[serde(rename = "gen_freq", default)]
    pub gen_freq: Option<String>,
    #[serde(rename = "gen_market", default)]
    pub gen_market: Option<String>,
}

/// One fuel/generation-type entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelCode {
    /// PSR code, e.g. `B01`
    pub code: String,
    /// Generation technology, e.g. `Biomass`
    #[serde(rename = "type")]
    pub fuel_type: String,
    /// Optional qualifier, e.g. `Offshore`
    #[serde(default)]
    pub info: String,
}

impl FuelCode {
    /// Combined display label, `"{Type} | {Info}"` with `N/A` standing in
    /// for a missing qualifier.
    pub fn label(&self) -> String {
        if self.info.is_empty() {
            format!("{} | N/A", self.fuel_type)
        } else {
            format!("{} | {}", self.fuel_type, self.info)
        }
    }
}

/// Read-only lookups over the two reference tables.
///
/// Passed explicitly into the aggregation layer rather than held as
/// ambient state.
pub trait CodeLookup: Send + Sync {
    /// Resolves an ENTSO-E domain identifier to its country entry.
    fn resolve_country(&self, domain_id: &str) -> Option<&CountryCode>;

    /// Resolves a PSR code to its fuel entry.
    fn resolve_fuel(&self, psr_code: &str) -> Option<&FuelCode>;

    /// Maps a human country code to its ENTSO-E domain identifier,
    /// matching case-insensitively.
    fn entsoe_id(&self, country_code: &str) -> Option<&str>;
}

/// Errors raised while loading the reference tables.
#[derive(Error, Debug)]
pub enum CodesError {
    /// A codes file could not be opened or read.
    #[error("failed to read codes file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A codes file was readable but not valid JSON for its table.
    #[error("failed to parse codes file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The in-memory reference tables.
#[derive(Clone, Debug, Default)]
pub struct CodeSet {
    countries: Vec<CountryCode>,
    fuels: Vec<FuelCode>,
}

impl CodeSet {
    /// Wraps already-parsed tables.
    pub fn new(countries: Vec<CountryCode>, fuels: Vec<FuelCode>) -> Self {
        Self { countries, fuels }
    }

    /// Parses both tables from JSON array strings.
    pub fn from_json(countries_json: &str, fuels_json: &str) -> Result<Self, serde_json::Error> {
        let countries: Vec<CountryCode> = serde_json::from_str(countries_json)?;
        let fuels: Vec<FuelCode> = serde_json::from_str(fuels_json)?;
        info!(
            "loaded {} country codes and {} fuel codes",
            countries.len(),
            fuels.len()
        );
        Ok(Self { countries, fuels })
    }

    /// Reads both tables from JSON files.
    pub fn load(
        countries_path: impl AsRef<Path>,
        fuels_path: impl AsRef<Path>,
    ) -> Result<Self, CodesError> {
        let countries: Vec<CountryCode> = read_table(countries_path.as_ref())?;
        let fuels: Vec<FuelCode> = read_table(fuels_path.as_ref())?;
        info!(
            "loaded {} country codes and {} fuel codes",
            countries.len(),
            fuels.len()
        );
        Ok(Self { countries, fuels })
    }
}

fn read_table<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, CodesError> {
    debug!("reading codes from {}", path.display());
    let file = File::open(path).map_err(|source| CodesError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_reader(file).map_err(|source| CodesError::Parse {
        path: path.display().to_string(),
        source,
    })
}

impl CodeLookup for CodeSet {
    fn resolve_country(&self, domain_id: &str) -> Option<&CountryCode> {
        self.countries.iter().find(|entry| entry.entsoe_id == domain_id)
    }

    fn resolve_fuel(&self, psr_code: &str) -> Option<&FuelCode> {
        self.fuels.iter().find(|entry| entry.code == psr_code)
    }

    fn entsoe_id(&self, country_code: &str) -> Option<&str> {
        self.countries
            .iter()
            .find(|entry| entry.code.eq_ignore_ascii_case(country_code))
            .map(|entry| entry.entsoe_id.as_str())
    }
}
