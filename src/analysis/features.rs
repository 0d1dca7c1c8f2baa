//! Feature computation over a city's temperature series.
//!
//! Derives, for each observation: a trailing rolling mean (window 30,
//! partial at the start), the mean and sample standard deviation of its
//! season's temperatures, and an outlier flag for readings more than two
//! standard deviations from the seasonal mean.
//!
//! Statistics are computed per (city, season) group and broadcast back to
//! every member row. They never mix data from different cities: the
//! grouped entry point partitions by city before anything is aggregated.

use std::collections::HashMap;

use crate::model::{AugmentedObservation, Observation};
use crate::season::Season;

/// Trailing rolling-mean window, in observations.
pub const ROLLING_WINDOW: usize = 30;

/// Outlier band width, in standard deviations.
pub const OUTLIER_SIGMA: f64 = 2.0;

// ---------------------------------------------------------------------------
// Per-season aggregates
// ---------------------------------------------------------------------------

/// Mean and sample standard deviation of one season's temperatures.
///
/// `std` is `None` for a season with fewer than 2 observations — there is
/// no sample standard deviation for a single point, and callers must treat
/// that as "no usable band", not as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonStats {
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
}

/// Computes per-season aggregates for one city's observations.
///
/// Two passes: sum for the mean, then squared deviations with divisor N−1.
/// Row order within a season does not affect the result.
pub fn seasonal_stats(observations: &[Observation]) -> HashMap<Season, SeasonStats> {
    let mut sums: HashMap<Season, (usize, f64)> = HashMap::new();
    for obs in observations {
        let entry = sums.entry(obs.season).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += obs.temperature;
    }

    let mut stats = HashMap::new();
    for (&season, &(count, sum)) in &sums {
        let mean = sum / count as f64;
        let std = if count >= 2 {
            let ss: f64 = observations
                .iter()
                .filter(|o| o.season == season)
                .map(|o| (o.temperature - mean).powi(2))
                .sum();
            Some((ss / (count - 1) as f64).sqrt())
        } else {
            None
        };
        stats.insert(season, SeasonStats { count, mean, std });
    }
    stats
}

// ---------------------------------------------------------------------------
// Feature engine
// ---------------------------------------------------------------------------

/// Augments a single city's time-ordered observations with derived features.
///
/// Output is one-to-one with input, input order preserved. An empty input
/// produces an empty output. The caller is responsible for the input being
/// one city's data ordered by timestamp ascending; use
/// [`add_features_by_city`] for mixed-city datasets.
pub fn add_features(observations: &[Observation]) -> Vec<AugmentedObservation> {
    let stats = seasonal_stats(observations);

    let mut window_sum = 0.0;
    let mut out = Vec::with_capacity(observations.len());

    for (i, obs) in observations.iter().enumerate() {
        window_sum += obs.temperature;
        if i >= ROLLING_WINDOW {
            window_sum -= observations[i - ROLLING_WINDOW].temperature;
        }
        let window_len = (i + 1).min(ROLLING_WINDOW);
        let rolling_mean = window_sum / window_len as f64;

        // Present by construction: every season in the input has an entry.
        let season_stats = &stats[&obs.season];
        let seasonal_mean = Some(season_stats.mean);
        let seasonal_std = season_stats.std;
        let outlier = season_stats
            .std
            .map(|std| (obs.temperature - season_stats.mean).abs() > OUTLIER_SIGMA * std);

        out.push(AugmentedObservation {
            city: obs.city.clone(),
            timestamp: obs.timestamp,
            temperature: obs.temperature,
            season: obs.season,
            rolling_mean,
            seasonal_mean,
            seasonal_std,
            outlier,
        });
    }

    out
}

/// Splits a mixed-city dataset into per-city partitions.
///
/// Partitions are keyed strictly by the `city` value and returned in order
/// of each city's first appearance, with row order preserved inside each
/// partition. Used by both the sequential grouped variant below and the
/// parallel batch runner.
pub fn partition_by_city(observations: &[Observation]) -> Vec<Vec<Observation>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut partitions: Vec<Vec<Observation>> = Vec::new();

    for obs in observations {
        match index.get(obs.city.as_str()) {
            Some(&i) => partitions[i].push(obs.clone()),
            None => {
                index.insert(obs.city.as_str(), partitions.len());
                partitions.push(vec![obs.clone()]);
            }
        }
    }

    partitions
}

/// Grouped variant of [`add_features`] for multi-city datasets.
///
/// Partitions by city first so seasonal statistics never cross city
/// boundaries, then concatenates the augmented partitions in order of
/// first appearance.
pub fn add_features_by_city(observations: &[Observation]) -> Vec<AugmentedObservation> {
    partition_by_city(observations)
        .iter()
        .flat_map(|partition| add_features(partition))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn obs(city: &str, month: u32, day: u32, temperature: f64) -> Observation {
        let timestamp = Utc.with_ymd_and_hms(2024, month, day, 12, 0, 0).unwrap();
        Observation {
            city: city.to_string(),
            timestamp,
            temperature,
            season: Season::from_month(month).unwrap(),
        }
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(add_features(&[]).is_empty());
        assert!(add_features_by_city(&[]).is_empty());
    }

    #[test]
    fn test_row_count_and_order_preserved() {
        let input = vec![
            obs("Moscow", 1, 1, -5.0),
            obs("Moscow", 1, 2, -3.0),
            obs("Moscow", 7, 1, 25.0),
            obs("Moscow", 7, 2, 27.0),
        ];
        let out = add_features(&input);

        assert_eq!(out.len(), input.len());
        for (a, b) in input.iter().zip(&out) {
            assert_eq!(a.timestamp, b.timestamp);
            assert_eq!(a.temperature, b.temperature);
            assert_eq!(a.season, b.season);
        }
    }

    #[test]
    fn test_rolling_mean_partial_window() {
        let input = vec![
            obs("Berlin", 1, 1, 0.0),
            obs("Berlin", 1, 2, 4.0),
            obs("Berlin", 1, 3, 8.0),
        ];
        let out = add_features(&input);

        // Position 0: the row's own temperature.
        assert_eq!(out[0].rolling_mean, 0.0);
        assert_eq!(out[1].rolling_mean, 2.0);
        assert_eq!(out[2].rolling_mean, 4.0);
    }

    #[test]
    fn test_rolling_mean_full_window_drops_oldest() {
        // 31 winter days of January 2024: temperatures 0, 1, ..., 30.
        let input: Vec<Observation> = (0..31)
            .map(|i| obs("Berlin", 1, i as u32 + 1, i as f64))
            .collect();
        let out = add_features(&input);

        // 30th row (index 29): mean of rows 0-29 = mean of 0..=29 = 14.5.
        assert_eq!(out[29].rolling_mean, 14.5);
        // 31st row (index 30): window slides, mean of 1..=30 = 15.5.
        assert_eq!(out[30].rolling_mean, 15.5);
    }

    #[test]
    fn test_seasonal_std_is_sample_std() {
        // Winter temps 0 and 4: mean 2, sample std sqrt(8) ≈ 2.8284.
        let input = vec![obs("Oslo", 1, 1, 0.0), obs("Oslo", 2, 1, 4.0)];
        let out = add_features(&input);

        for row in &out {
            assert_eq!(row.seasonal_mean, Some(2.0));
            let std = row.seasonal_std.unwrap();
            assert!((std - 8.0_f64.sqrt()).abs() < 1e-12);
            assert_eq!(row.outlier, Some(false));
        }
    }

    #[test]
    fn test_seasonal_std_order_independent() {
        let forward = vec![
            obs("Oslo", 1, 1, 1.0),
            obs("Oslo", 1, 2, 5.0),
            obs("Oslo", 1, 3, 9.0),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let std_a = add_features(&forward)[0].seasonal_std.unwrap();
        let std_b = add_features(&reversed)[0].seasonal_std.unwrap();
        assert!((std_a - std_b).abs() < 1e-12);
    }

    #[test]
    fn test_single_row_season_has_undefined_std_and_outlier() {
        let input = vec![
            obs("Kyiv", 1, 1, 0.0),
            obs("Kyiv", 1, 2, 4.0),
            obs("Kyiv", 4, 1, 12.0), // lone spring row
        ];
        let out = add_features(&input);

        let spring = &out[2];
        assert_eq!(spring.seasonal_mean, Some(12.0));
        assert_eq!(spring.seasonal_std, None);
        assert_eq!(spring.outlier, None); // undefined, not false

        // The winter rows still get a full band.
        assert!(out[0].seasonal_std.is_some());
        assert_eq!(out[0].outlier, Some(false));
    }

    #[test]
    fn test_outlier_flag_uses_two_sigma_band() {
        // Nine winter days at 0 °C and one at 9 °C. A lone spike inflates
        // the std it is judged against, so the flat baseline has to be
        // long enough for the spike to clear the band.
        let mut temps = vec![0.0; 9];
        temps.push(9.0);
        let input: Vec<Observation> = temps
            .iter()
            .enumerate()
            .map(|(i, &t)| obs("Minsk", 1, i as u32 + 1, t))
            .collect();
        let out = add_features(&input);

        // mean 0.9, SS = 9*0.81 + 65.61 = 72.9, sample std sqrt(8.1) ≈ 2.846.
        // |9 - 0.9| = 8.1 > 2 * 2.846 ≈ 5.692, so the spike is an outlier.
        assert_eq!(out[9].outlier, Some(true));
        assert_eq!(out[0].outlier, Some(false));
    }

    #[test]
    fn test_grouped_variant_keeps_cities_separate() {
        let input = vec![
            obs("Cairo", 1, 1, 20.0),
            obs("Oslo", 1, 1, -10.0),
            obs("Cairo", 1, 2, 22.0),
            obs("Oslo", 1, 2, -8.0),
        ];
        let out = add_features_by_city(&input);

        assert_eq!(out.len(), 4);
        // First-appearance order: all Cairo rows, then all Oslo rows.
        assert_eq!(out[0].city, "Cairo");
        assert_eq!(out[1].city, "Cairo");
        assert_eq!(out[2].city, "Oslo");
        assert_eq!(out[3].city, "Oslo");

        // Cairo's winter mean is 21, untouched by Oslo's readings.
        assert_eq!(out[0].seasonal_mean, Some(21.0));
        assert_eq!(out[2].seasonal_mean, Some(-9.0));
    }

    #[test]
    fn test_partition_by_city_is_exhaustive_and_disjoint() {
        let input = vec![
            obs("A", 1, 1, 1.0),
            obs("B", 1, 1, 2.0),
            obs("A", 1, 2, 3.0),
            obs("C", 1, 1, 4.0),
        ];
        let partitions = partition_by_city(&input);

        assert_eq!(partitions.len(), 3);
        let total: usize = partitions.iter().map(|p| p.len()).sum();
        assert_eq!(total, input.len());
        assert_eq!(partitions[0][0].city, "A");
        assert_eq!(partitions[1][0].city, "B");
        assert_eq!(partitions[2][0].city, "C");
    }
}
