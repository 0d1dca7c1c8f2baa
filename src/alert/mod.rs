/// Alerting layer: turns computed statistics into user-facing verdicts.
///
/// Submodules:
/// - `anomaly` — checks a live temperature reading against a city's
///   seasonal ±2σ band.

pub mod anomaly;
