/// Data ingestion for the temperature monitoring service.
///
/// Submodules:
/// - `csv` — historical weather dataset loading and city extraction.
/// - `openweather` — current-conditions fetch from the OpenWeather API,
///   blocking and async.

pub mod csv;
pub mod openweather;
