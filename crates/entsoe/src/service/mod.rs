//! Orchestration facade over the transport, the aggregation folds, and the
//! reference code tables.

use std::sync::Arc;

use chrono::{DateTime, Duration, Timelike, Utc};
use log::info;

use crate::aggregate;
use crate::codes::{CodeLookup, FuelCode};
use crate::errors::EntsoeError;
use crate::models::{
    AggregatePeriodValue, CountryPsrCapacity, DocumentType, EntsoeRequest, ProcessType,
};
use crate::transport::EntsoeTransport;

/// The public operations over European generation and load data.
///
/// Each call is stateless end-to-end: a request descriptor is built, one
/// or two documents are fetched, and the fold result is returned. The only
/// shared state is the read-only code tables.
pub struct EuropeanLoadService {
    transport: Arc<dyn EntsoeTransport>,
    codes: Arc<dyn CodeLookup>,
    security_token: String,
}

impl EuropeanLoadService {
    pub fn new(
        transport: Arc<dyn EntsoeTransport>,
        codes: Arc<dyn CodeLookup>,
        security_token: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            codes,
            security_token: security_token.into(),
        }
    }

    /// Maps a human country code to its ENTSO-E domain identifier.
    pub fn entsoe_id(&self, country_code: &str) -> Option<String> {
        self.codes.entsoe_id(country_code).map(str::to_owned)
    }

    /// Gets the installed capacity of each generation type for a country.
    ///
    /// Year-ahead forecasts are published as a single flat value per type,
    /// so a one-hour historical window is enough to retrieve them.
    pub async fn installed_capacity_by_country(
        &self,
        domain: &str,
    ) -> Result<Vec<CountryPsrCapacity>, EntsoeError> {
        let now = Utc::now();
        let request = EntsoeRequest::new(
            DocumentType::GenerationForecastByType,
            ProcessType::YearAhead,
            domain,
            now - Duration::hours(4),
            now - Duration::hours(3),
            &self.security_token,
        )?;
        let as_of = request.start;
        info!(
            "fetching installed capacity for {domain} as of {}",
            as_of.format("%Y-%m-%d")
        );

        let document = self.transport.fetch(&request).await?;
        let totals = aggregate::capacity_by_psr(&document);
        if totals.is_empty() {
            return Ok(Vec::new());
        }

        let country = self
            .codes
            .resolve_country(domain)
            .map(|entry| entry.country.clone())
            .ok_or_else(|| EntsoeError::UnknownDomain(domain.to_string()))?;

        let mut capacities = Vec::with_capacity(totals.len());
        for (psr_code, capacity) in totals {
            let psr = self
                .codes
                .resolve_fuel(&psr_code)
                .map(FuelCode::label)
                .unwrap_or_else(|| psr_code.clone());
            info!("{country} with {capacity}MW for PSR: {psr}");
            capacities.push(CountryPsrCapacity {
                country: country.clone(),
                psr,
                capacity,
                date: as_of,
            });
        }
        Ok(capacities)
    }

    /// Gets the day-ahead generation forecast with the wind/solar share
    /// overlaid per interval.
    pub async fn forecast(&self, domain: &str) -> Result<Vec<AggregatePeriodValue>, EntsoeError> {
        let window_start = truncate_to_hour(Utc::now()) - Duration::hours(2);
        let window_end = window_start + Duration::days(1);

        let totals_request = EntsoeRequest::new(
            DocumentType::GenerationForecastByType,
            ProcessType::DayAhead,
            domain,
            window_start,
            window_end,
            &self.security_token,
        )?;
        let renewables_request = EntsoeRequest::new(
            DocumentType::WindSolarForecast,
            ProcessType::DayAhead,
            domain,
            window_start,
            window_end,
            &self.security_token,
        )?;

        // The two reads are independent and share no state; fetch them
        // together.
        let (totals_document, renewables_document) = tokio::try_join!(
            self.transport.fetch(&totals_request),
            self.transport.fetch(&renewables_request),
        )?;

        let mut baseline = aggregate::forecast_baseline(&totals_document)?;
        aggregate::overlay_renewables(&mut baseline, &renewables_document)?;
        Ok(baseline.into_values().collect())
    }

    /// Gets the previous 24 hours of realised values for one generation
    /// type, as the raw unparsed report body.
    pub async fn current_value(
        &self,
        psr_type: &str,
        domain: &str,
    ) -> Result<String, EntsoeError> {
        let now = Utc::now();
        let request = EntsoeRequest::new(
            DocumentType::ActualGeneration,
            ProcessType::Realised,
            domain,
            now - Duration::days(1),
            now,
            &self.security_token,
        )?
        .with_psr_type(psr_type);
        self.transport.fetch_raw(&request).await
    }
}

fn truncate_to_hour(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .with_minute(0)
        .and_then(|truncated| truncated.with_second(0))
        .and_then(|truncated| truncated.with_nanosecond(0))
        .unwrap_or(instant)
}
