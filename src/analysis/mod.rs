/// Statistical analysis for the temperature monitoring service.
///
/// Submodules:
/// - `features` — rolling mean, seasonal mean/std, and outlier flags
///   over a city's observation series.
/// - `summary` — display-oriented seasonal and descriptive summaries.

pub mod features;
pub mod summary;
