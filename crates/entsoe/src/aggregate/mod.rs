//! Folds deserialized market documents into per-country aggregates.
//!
//! All functions here are pure over document values; I/O stays in the
//! transport. Grouping is keyed on `BTreeMap` so repeated runs over the
//! same document produce identically ordered output.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use log::debug;

use crate::errors::EntsoeError;
use crate::models::{AggregatePeriodValue, GlMarketDocument, Period};

/// Sums installed capacity per PSR code.
///
/// Year-ahead figures arrive as a single flat value per series, so the
/// first point of the first period already carries the aggregate; series
/// sharing a code (sub-domains of the same area) are summed. Series
/// without a PSR code or without any points are skipped.
pub fn capacity_by_psr(document: &GlMarketDocument) -> BTreeMap<String, i64> {
    let mut totals = BTreeMap::new();
    for series in &document.time_series {
        let Some(psr_code) = series.psr_code() else {
            debug!("skipping time series without a PSR type");
            continue;
        };
        let Some(quantity) = series
            .periods
            .first()
            .and_then(|period| period.points.first())
            .map(|point| point.quantity)
        else {
            debug!("skipping time series with no points for PSR {psr_code}");
            continue;
        };
        *totals.entry(psr_code.to_string()).or_insert(0) += quantity;
    }
    totals
}

/// Builds the per-interval total-generation baseline from a forecast
/// document, keyed by interval start.
pub fn forecast_baseline(
    document: &GlMarketDocument,
) -> Result<BTreeMap<DateTime<Utc>, AggregatePeriodValue>, EntsoeError> {
    let mut baseline = BTreeMap::new();
    for series in &document.time_series {
        for period in &series.periods {
            for (timestamp, quantity) in period_points(period)? {
                baseline
                    .entry(timestamp)
                    .or_insert_with(|| AggregatePeriodValue {
                        start_date: timestamp,
                        total_value: 0,
                        renewable_value: 0,
                    })
                    .total_value += quantity;
            }
        }
    }
    Ok(baseline)
}

/// Adds wind/solar quantities onto the baseline by exact timestamp match.
///
/// A renewable point whose computed timestamp has no baseline interval is
/// dropped: the overlay only annotates intervals the total forecast
/// already covers.
pub fn overlay_renewables(
    baseline: &mut BTreeMap<DateTime<Utc>, AggregatePeriodValue>,
    document: &GlMarketDocument,
) -> Result<(), EntsoeError> {
    for series in &document.time_series {
        for period in &series.periods {
            for (timestamp, quantity) in period_points(period)? {
                match baseline.get_mut(&timestamp) {
                    Some(value) => value.renewable_value += quantity,
                    None => debug!("dropping renewable point at {timestamp}: no baseline interval"),
                }
            }
        }
    }
    Ok(())
}

/// Computes wall-clock timestamps for a period's points.
///
/// The spacing is derived from the period window and the point count:
/// `interval minutes = window minutes / point count`, and the point at
/// index `i` lands at `start + i * interval`.
///
/// # Errors
///
/// Returns [`EntsoeError::MalformedResponse`] when a period with points
/// carries unparseable interval bounds or a non-positive window.
pub fn period_points(period: &Period) -> Result<Vec<(DateTime<Utc>, i64)>, EntsoeError> {
    if period.points.is_empty() {
        return Ok(Vec::new());
    }

    let start = period.time_interval.start_utc().ok_or_else(|| {
        EntsoeError::MalformedResponse(format!(
            "unparseable period start {:?}",
            period.time_interval.start
        ))
    })?;
    let end = period.time_interval.end_utc().ok_or_else(|| {
        EntsoeError::MalformedResponse(format!(
            "unparseable period end {:?}",
            period.time_interval.end
        ))
    })?;

    let window_minutes = (end - start).num_minutes();
    if window_minutes <= 0 {
        return Err(EntsoeError::MalformedResponse(format!(
            "period window {} .. {} is empty",
            period.time_interval.start, period.time_interval.end
        )));
    }

    let interval_minutes = window_minutes / period.points.len() as i64;
    Ok(period
        .points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            (
                start + Duration::minutes(interval_minutes * index as i64),
                point.quantity,
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MktPsrType, Point, TimeInterval, TimeSeries};
    use chrono::TimeZone;

    fn series(psr: Option<&str>, periods: Vec<Period>) -> TimeSeries {
        TimeSeries {
            psr_types: psr
                .map(|code| {
                    vec![MktPsrType {
                        psr_type: code.to_string(),
                    }]
                })
                .unwrap_or_default(),
            periods,
        }
    }

    fn period(start: &str, end: &str, quantities: &[i64]) -> Period {
        Period {
            time_interval: TimeInterval {
                start: start.to_string(),
                end: end.to_string(),
            },
            resolution: None,
            points: quantities
                .iter()
                .enumerate()
                .map(|(index, quantity)| Point {
                    position: index as u32 + 1,
                    quantity: *quantity,
                })
                .collect(),
        }
    }

    fn document(time_series: Vec<TimeSeries>) -> GlMarketDocument {
        GlMarketDocument {
            time_period: TimeInterval {
                start: "2024-05-01T00:00Z".to_string(),
                end: "2024-05-02T00:00Z".to_string(),
            },
            time_series,
        }
    }

    #[test]
    fn test_capacity_takes_first_point_of_first_period() {
        let doc = document(vec![series(
            Some("B01"),
            vec![
                period("2024-05-01T00:00Z", "2024-05-02T00:00Z", &[500, 9999]),
                period("2024-05-02T00:00Z", "2024-05-03T00:00Z", &[7777]),
            ],
        )]);
        let totals = capacity_by_psr(&doc);
        assert_eq!(totals.get("B01"), Some(&500));
    }

    #[test]
    fn test_capacity_sums_series_sharing_a_code() {
        let doc = document(vec![
            series(
                Some("B18"),
                vec![period("2024-05-01T00:00Z", "2024-05-02T00:00Z", &[300])],
            ),
            series(
                Some("B18"),
                vec![period("2024-05-01T00:00Z", "2024-05-02T00:00Z", &[200])],
            ),
            series(
                Some("B01"),
                vec![period("2024-05-01T00:00Z", "2024-05-02T00:00Z", &[50])],
            ),
        ]);
        let totals = capacity_by_psr(&doc);
        assert_eq!(totals.get("B18"), Some(&500));
        assert_eq!(totals.get("B01"), Some(&50));
    }

    #[test]
    fn test_capacity_skips_incomplete_series() {
        let doc = document(vec![
            series(
                None,
                vec![period("2024-05-01T00:00Z", "2024-05-02T00:00Z", &[100])],
            ),
            series(Some("B01"), vec![]),
            series(
                Some("B01"),
                vec![period("2024-05-01T00:00Z", "2024-05-02T00:00Z", &[])],
            ),
        ]);
        assert!(capacity_by_psr(&doc).is_empty());
    }

    #[test]
    fn test_empty_document_yields_empty_totals() {
        assert!(capacity_by_psr(&document(vec![])).is_empty());
    }

    #[test]
    fn test_point_timestamps_divide_the_window() {
        // 4 points over 24 hours: one every 360 minutes.
        let p = period("2024-05-01T00:00Z", "2024-05-02T00:00Z", &[1, 2, 3, 4]);
        let points = period_points(&p).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(points.len(), 4);
        for (index, (timestamp, quantity)) in points.iter().enumerate() {
            assert_eq!(*timestamp, start + Duration::minutes(360 * index as i64));
            assert_eq!(*quantity, index as i64 + 1);
        }
    }

    #[test]
    fn test_hourly_points_over_a_day() {
        let quantities: Vec<i64> = (0..24).collect();
        let p = period("2024-05-01T00:00Z", "2024-05-02T00:00Z", &quantities);
        let points = period_points(&p).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(points[1].0, start + Duration::minutes(60));
        assert_eq!(points[23].0, start + Duration::minutes(1380));
    }

    #[test]
    fn test_unparseable_interval_is_malformed() {
        let p = period("whenever", "2024-05-02T00:00Z", &[1]);
        assert!(matches!(
            period_points(&p),
            Err(EntsoeError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_empty_window_with_points_is_malformed() {
        let p = period("2024-05-01T00:00Z", "2024-05-01T00:00Z", &[1]);
        assert!(matches!(
            period_points(&p),
            Err(EntsoeError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_period_without_points_is_empty_not_an_error() {
        let p = period("whenever", "whenever", &[]);
        assert_eq!(period_points(&p).unwrap(), Vec::new());
    }

    #[test]
    fn test_baseline_accumulates_across_series() {
        let doc = document(vec![
            series(
                None,
                vec![period("2024-05-01T00:00Z", "2024-05-01T02:00Z", &[10, 20])],
            ),
            series(
                None,
                vec![period("2024-05-01T00:00Z", "2024-05-01T02:00Z", &[1, 2])],
            ),
        ]);
        let baseline = forecast_baseline(&doc).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(baseline.len(), 2);
        assert_eq!(baseline[&start].total_value, 11);
        assert_eq!(baseline[&(start + Duration::minutes(60))].total_value, 22);
    }

    #[test]
    fn test_overlay_adds_matching_points() {
        let totals = document(vec![series(
            None,
            vec![period("2024-05-01T00:00Z", "2024-05-01T02:00Z", &[100, 200])],
        )]);
        let renewables = document(vec![series(
            None,
            vec![period("2024-05-01T00:00Z", "2024-05-01T02:00Z", &[30, 60])],
        )]);
        let mut baseline = forecast_baseline(&totals).unwrap();
        overlay_renewables(&mut baseline, &renewables).unwrap();

        let values: Vec<AggregatePeriodValue> = baseline.into_values().collect();
        assert_eq!(values[0].total_value, 100);
        assert_eq!(values[0].renewable_value, 30);
        assert_eq!(values[1].total_value, 200);
        assert_eq!(values[1].renewable_value, 60);
    }

    #[test]
    fn test_overlay_drops_unmatched_points() {
        // Baseline is hourly; the renewable report is half-hourly, so every
        // second renewable point has no baseline interval and is dropped.
        let totals = document(vec![series(
            None,
            vec![period("2024-05-01T00:00Z", "2024-05-01T02:00Z", &[100, 200])],
        )]);
        let renewables = document(vec![series(
            None,
            vec![period(
                "2024-05-01T00:00Z",
                "2024-05-01T02:00Z",
                &[10, 999, 20, 999],
            )],
        )]);
        let mut baseline = forecast_baseline(&totals).unwrap();
        overlay_renewables(&mut baseline, &renewables).unwrap();

        let values: Vec<AggregatePeriodValue> = baseline.into_values().collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].renewable_value, 10);
        assert_eq!(values[1].renewable_value, 20);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let doc = document(vec![
            series(
                Some("B18"),
                vec![period("2024-05-01T00:00Z", "2024-05-02T00:00Z", &[300])],
            ),
            series(
                Some("B01"),
                vec![period("2024-05-01T00:00Z", "2024-05-02T00:00Z", &[50])],
            ),
        ]);
        let first: Vec<(String, i64)> = capacity_by_psr(&doc).into_iter().collect();
        let second: Vec<(String, i64)> = capacity_by_psr(&doc).into_iter().collect();
        assert_eq!(first, second);
        // BTreeMap keys come out sorted regardless of document order.
        assert_eq!(first[0].0, "B01");
        assert_eq!(first[1].0, "B18");
    }
}
