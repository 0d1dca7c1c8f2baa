//! Temperature anomaly monitoring service.
//!
//! Loads a historical weather CSV, derives per-city seasonal statistics
//! (rolling mean, seasonal mean/std, outlier flags), summarizes them for
//! display, and checks a live temperature reading from the OpenWeather
//! API against the current season's ±2σ band. A parallel batch runner
//! applies the feature computation per city on a worker pool.

pub mod alert;
pub mod analysis;
pub mod batch;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod season;
