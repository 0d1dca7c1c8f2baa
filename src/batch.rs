//! Parallel feature computation over multi-city datasets.
//!
//! A fork-join over city partitions: each city's observations form one
//! task, tasks run on a fixed-size rayon thread pool, and the augmented
//! partitions are concatenated in order of each city's first appearance
//! in the input. Partitions are disjoint by city, so workers share no
//! mutable state and no locking is needed.
//!
//! Fail-fast: a panic inside one partition's computation propagates out
//! of the pool and aborts the whole join. Feature computation never
//! panics on structurally valid input, so in practice this only fires on
//! a bug.

use rayon::prelude::*;

use crate::analysis::features::{add_features, partition_by_city};
use crate::model::{AugmentedObservation, Observation};

/// Errors configuring the batch worker pool.
#[derive(Debug)]
pub enum BatchError {
    /// The rayon pool could not be built (e.g. zero workers requested on
    /// a platform where thread spawning failed).
    PoolBuild(String),
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::PoolBuild(msg) => write!(f, "failed to build worker pool: {}", msg),
        }
    }
}

impl std::error::Error for BatchError {}

/// Applies the feature engine to every city of a multi-city dataset in
/// parallel.
///
/// Equivalent to `analysis::features::add_features_by_city` row for row:
/// same row count, same order (first appearance of each city, input order
/// within a city), same statistics. `num_workers` caps concurrency; the
/// dataset may contain more cities than workers.
pub fn add_features_parallel(
    observations: &[Observation],
    num_workers: usize,
) -> Result<Vec<AugmentedObservation>, BatchError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_workers)
        .build()
        .map_err(|e| BatchError::PoolBuild(e.to_string()))?;

    let partitions = partition_by_city(observations);

    // par_iter preserves partition order in the collected output, so the
    // join is deterministic regardless of completion order.
    let augmented: Vec<Vec<AugmentedObservation>> = pool.install(|| {
        partitions
            .par_iter()
            .map(|partition| add_features(partition))
            .collect()
    });

    Ok(augmented.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::features::add_features_by_city;
    use crate::season::Season;
    use chrono::{TimeZone, Utc};

    fn obs(city: &str, month: u32, day: u32, temperature: f64) -> Observation {
        Observation {
            city: city.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, month, day, 0, 0, 0).unwrap(),
            temperature,
            season: Season::from_month(month).unwrap(),
        }
    }

    fn interleaved_three_cities() -> Vec<Observation> {
        let mut rows = Vec::new();
        for day in 1..=10 {
            rows.push(obs("Lisbon", 1, day, 12.0 + day as f64));
            rows.push(obs("Warsaw", 1, day, -2.0 + day as f64 * 0.5));
            rows.push(obs("Athens", 7, day, 28.0 + (day % 3) as f64));
        }
        rows
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let input = interleaved_three_cities();

        let sequential = add_features_by_city(&input);
        let parallel = add_features_parallel(&input, 3).unwrap();

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_row_count_preserved() {
        let input = interleaved_three_cities();
        let out = add_features_parallel(&input, 2).unwrap();
        assert_eq!(out.len(), input.len());
    }

    #[test]
    fn test_more_cities_than_workers() {
        let input = interleaved_three_cities();
        // One worker: still correct, just serialized.
        let out = add_features_parallel(&input, 1).unwrap();
        assert_eq!(out, add_features_by_city(&input));
    }

    #[test]
    fn test_empty_input() {
        let out = add_features_parallel(&[], 4).unwrap();
        assert!(out.is_empty());
    }
}
