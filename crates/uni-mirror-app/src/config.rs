//! Environment-based process configuration.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use uni_mirror_core::SyncError;

const DEFAULT_PROJECT: &str = "UNI";
const DEFAULT_LABEL: &str = "abgabe";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATA_FILE: &str = "assignments.json";

/// Process configuration resolved from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Todoist API credential; may be empty, in which case syncs are
    /// refused but cached reads keep working.
    pub api_token: String,
    /// Display name of the project to mirror.
    pub project_name: String,
    /// Deliverable label to filter tasks by; empty syncs everything.
    pub assignment_label: String,
    /// HTTP listen port.
    pub port: u16,
    /// Path of the on-disk cache file.
    pub data_file: PathBuf,
}

impl AppConfig {
    /// Resolve configuration from the process environment.
    ///
    /// `TODOIST_API_TOKEN` (empty allowed), `TODOIST_PROJECT`,
    /// `ASSIGNMENT_LABEL`, `PORT`, and `DATA_FILE` are consulted; all but
    /// the token have defaults.
    ///
    /// # Errors
    /// Returns an error when `PORT` is set but not a valid port number.
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {raw}"))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            api_token: env::var("TODOIST_API_TOKEN").unwrap_or_default(),
            project_name: env::var("TODOIST_PROJECT").unwrap_or_else(|_| DEFAULT_PROJECT.to_owned()),
            assignment_label: env::var("ASSIGNMENT_LABEL").unwrap_or_else(|_| DEFAULT_LABEL.to_owned()),
            port,
            data_file: env::var("DATA_FILE")
                .map_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE), PathBuf::from),
        })
    }

    /// Whether an API credential is present.
    #[must_use]
    pub fn token_configured(&self) -> bool {
        !self.api_token.trim().is_empty()
    }

    /// Gate a sync cycle on the presence of a credential.
    ///
    /// # Errors
    /// Returns [`SyncError::ConfigurationMissing`] when no token is set;
    /// the cycle must not be attempted in that case.
    pub fn require_token(&self) -> Result<(), SyncError> {
        if self.token_configured() {
            Ok(())
        } else {
            Err(SyncError::ConfigurationMissing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_is_refused() {
        let config = AppConfig {
            api_token: "  ".to_owned(),
            project_name: DEFAULT_PROJECT.to_owned(),
            assignment_label: DEFAULT_LABEL.to_owned(),
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        };
        assert!(!config.token_configured());
        assert!(matches!(
            config.require_token(),
            Err(SyncError::ConfigurationMissing)
        ));
    }

    #[test]
    fn present_token_passes_the_gate() {
        let config = AppConfig {
            api_token: "secret".to_owned(),
            project_name: DEFAULT_PROJECT.to_owned(),
            assignment_label: String::new(),
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        };
        assert!(config.token_configured());
        assert!(config.require_token().is_ok());
    }
}
