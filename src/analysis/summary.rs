//! Display-oriented summaries of a city's augmented data.
//!
//! Two panels: a seasonal summary (one row per season present, carrying
//! the group aggregates already broadcast onto the rows) and a
//! describe-style panel of the whole temperature column.

use serde::Serialize;

use crate::model::AugmentedObservation;
use crate::season::Season;

// ---------------------------------------------------------------------------
// Seasonal summary
// ---------------------------------------------------------------------------

/// One season's aggregate statistics for a single city.
///
/// Values are read from any member row of the season — they are already
/// the group aggregate, constant within the (city, season) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalSummaryRow {
    pub season: Season,
    pub seasonal_mean: Option<f64>,
    pub seasonal_std: Option<f64>,
}

/// Builds the seasonal summary for one city's augmented observations.
///
/// One row per distinct season present, in order of first appearance.
/// Seasons absent from the data are omitted, not zero-filled. A
/// single-observation season appears with its mean and an undefined std.
pub fn seasonal_summary(rows: &[AugmentedObservation]) -> Vec<SeasonalSummaryRow> {
    let mut seen: Vec<Season> = Vec::new();
    let mut out = Vec::new();

    for row in rows {
        if seen.contains(&row.season) {
            continue;
        }
        seen.push(row.season);
        out.push(SeasonalSummaryRow {
            season: row.season,
            seasonal_mean: row.seasonal_mean,
            seasonal_std: row.seasonal_std,
        });
    }

    out
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Describe-style panel over the temperature column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (divisor N−1); undefined for fewer
    /// than 2 observations.
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
}

/// Computes descriptive statistics over all temperatures in the set.
///
/// Returns `None` for an empty set — there is nothing to describe.
pub fn describe_temperature(rows: &[AugmentedObservation]) -> Option<DescriptiveStats> {
    if rows.is_empty() {
        return None;
    }

    let count = rows.len();
    let sum: f64 = rows.iter().map(|r| r.temperature).sum();
    let mean = sum / count as f64;
    let min = rows.iter().map(|r| r.temperature).fold(f64::INFINITY, f64::min);
    let max = rows.iter().map(|r| r.temperature).fold(f64::NEG_INFINITY, f64::max);

    let std = if count >= 2 {
        let ss: f64 = rows.iter().map(|r| (r.temperature - mean).powi(2)).sum();
        Some((ss / (count - 1) as f64).sqrt())
    } else {
        None
    };

    Some(DescriptiveStats { count, mean, std, min, max })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::features::add_features;
    use crate::model::Observation;
    use chrono::{TimeZone, Utc};

    fn obs(month: u32, day: u32, temperature: f64) -> Observation {
        Observation {
            city: "Riga".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, month, day, 0, 0, 0).unwrap(),
            temperature,
            season: Season::from_month(month).unwrap(),
        }
    }

    #[test]
    fn test_summary_one_row_per_season_present() {
        let augmented = add_features(&[
            obs(1, 1, 0.0),
            obs(1, 2, 4.0),
            obs(7, 1, 20.0),
            obs(7, 2, 24.0),
            obs(1, 3, 2.0),
        ]);
        let summary = seasonal_summary(&augmented);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].season, Season::Winter);
        assert_eq!(summary[1].season, Season::Summer);
        assert_eq!(summary[0].seasonal_mean, Some(2.0));
        assert_eq!(summary[1].seasonal_mean, Some(22.0));
    }

    #[test]
    fn test_summary_omits_absent_seasons() {
        let augmented = add_features(&[obs(7, 1, 20.0), obs(7, 2, 24.0)]);
        let summary = seasonal_summary(&augmented);

        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].season, Season::Summer);
    }

    #[test]
    fn test_summary_preserves_undefined_std() {
        let augmented = add_features(&[obs(4, 1, 12.0)]);
        let summary = seasonal_summary(&augmented);

        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].seasonal_mean, Some(12.0));
        assert_eq!(summary[0].seasonal_std, None);
    }

    #[test]
    fn test_describe_panel() {
        let augmented = add_features(&[obs(1, 1, 0.0), obs(1, 2, 4.0), obs(7, 1, 20.0)]);
        let stats = describe_temperature(&augmented).unwrap();

        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean, 8.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 20.0);
        // SS = 64 + 16 + 144 = 224; sample var 112.
        assert!((stats.std.unwrap() - 112.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_describe_empty_is_none() {
        assert_eq!(describe_temperature(&[]), None);
    }
}
