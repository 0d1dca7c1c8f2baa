//! Service configuration.
//!
//! The API key and endpoint URL come from the environment (`API_KEY`,
//! `ENDPOINT_URL`), with `.env` file support via dotenv. Configuration is
//! read once at process entry into an explicit [`Config`] value and
//! passed into the fetch layer — no module reads ambient environment
//! state after startup.

use std::fmt;

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_VAR: &str = "API_KEY";

/// Environment variable holding the weather endpoint base URL.
pub const ENDPOINT_URL_VAR: &str = "ENDPOINT_URL";

/// Runtime configuration for the remote weather lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub endpoint_url: String,
}

/// A required configuration variable is missing or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing configuration: set {} in the environment or a .env file",
            self.variable
        )
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Loads configuration from the process environment, reading a `.env`
    /// file first if one exists. Call once at startup.
    pub fn from_env() -> Result<Config, ConfigError> {
        // Absence of a .env file is fine; real env vars still apply.
        let _ = dotenv::dotenv();

        let read = |variable: &'static str| -> Result<String, ConfigError> {
            match std::env::var(variable) {
                Ok(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(ConfigError { variable }),
            }
        };

        Ok(Config {
            api_key: read(API_KEY_VAR)?,
            endpoint_url: read(ENDPOINT_URL_VAR)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names_the_variable() {
        let err = ConfigError { variable: API_KEY_VAR };
        assert!(err.to_string().contains("API_KEY"));
    }
}
