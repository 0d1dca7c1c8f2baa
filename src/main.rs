//! Interactive analysis session.
//!
//! Usage: `tempmon_service <data.csv> [city] [current-temperature]`
//!
//! Loads the historical dataset, lists the cities it contains, and for a
//! selected city prints the descriptive statistics and seasonal summary.
//! When `API_KEY` and `ENDPOINT_URL` are configured, also fetches the
//! current temperature for the city and prints whether it is anomalous
//! for the current season; a third argument substitutes a temperature
//! reading for the live fetch.

use std::error::Error;
use std::path::Path;

use tempmon_service::alert::anomaly::{self, TemperatureVerdict};
use tempmon_service::analysis::{features, summary};
use tempmon_service::config::Config;
use tempmon_service::ingest::{csv, openweather};
use tempmon_service::logging::{self, LogLevel, LogSource};

fn main() {
    logging::init_logger(LogLevel::Info, None, false);

    if let Err(e) = run() {
        logging::error(LogSource::System, None, &e.to_string());
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    let csv_path = args
        .get(1)
        .ok_or("usage: tempmon_service <data.csv> [city] [current-temperature]")?;

    let observations = csv::load_observations(Path::new(csv_path))?;
    let cities = csv::list_cities(&observations);
    logging::info(
        LogSource::Csv,
        None,
        &format!("loaded {} rows, {} cities", observations.len(), cities.len()),
    );

    println!("Cities: {}", cities.join(", "));

    let city = match args.get(2) {
        Some(city) => city.clone(),
        None => match cities.first() {
            Some(first) => first.clone(),
            None => {
                println!("Dataset is empty - nothing to analyze.");
                return Ok(());
            }
        },
    };
    if !cities.iter().any(|c| c == &city) {
        return Err(format!("city {:?} not present in the dataset", city).into());
    }

    let city_rows = csv::observations_for_city(&observations, &city);
    let augmented = features::add_features(&city_rows);

    println!("\n=== {} ===", city);

    if let Some(stats) = summary::describe_temperature(&augmented) {
        println!("Observations: {}", stats.count);
        println!("Mean temperature: {:.2} °C", stats.mean);
        match stats.std {
            Some(std) => println!("Std deviation:    {:.2} °C", std),
            None => println!("Std deviation:    n/a (single observation)"),
        }
        println!("Min / max:        {:.2} / {:.2} °C", stats.min, stats.max);
    }

    println!("\nSeasonal statistics:");
    for row in summary::seasonal_summary(&augmented) {
        let mean = row
            .seasonal_mean
            .map(|m| format!("{:.2}", m))
            .unwrap_or_else(|| "n/a".to_string());
        let std = row
            .seasonal_std
            .map(|s| format!("{:.2}", s))
            .unwrap_or_else(|| "n/a".to_string());
        println!("  {:<8} mean {:>7} °C   std {:>7} °C", row.season, mean, std);
    }

    let outliers = augmented.iter().filter(|r| r.outlier == Some(true)).count();
    println!("\nOutliers in history: {}", outliers);

    // Live check: an explicit temperature argument wins over the fetch.
    let current = match args.get(3) {
        Some(raw) => Some(raw.parse::<f64>().map_err(|_| {
            format!("current-temperature must be a number, got {:?}", raw)
        })?),
        None => match Config::from_env() {
            Ok(config) => match openweather::current_temperature(&config, &city) {
                Ok(temp) => Some(temp),
                Err(e) => {
                    logging::log_fetch_failure(&city, &e);
                    return Err(e.into());
                }
            },
            Err(e) => {
                logging::info(
                    LogSource::System,
                    None,
                    &format!("skipping live check ({})", e),
                );
                None
            }
        },
    };

    if let Some(current) = current {
        println!("\nCurrent temperature in {}: {:.1} °C", city, current);
        match anomaly::check_temperature(&augmented, current) {
            TemperatureVerdict::Normal => println!("Verdict: normal for the season"),
            TemperatureVerdict::Anomalous => println!("Verdict: ANOMALOUS for the season"),
            TemperatureVerdict::Indeterminate => {
                println!("Verdict: cannot determine (no usable seasonal history)")
            }
        }
    }

    Ok(())
}
