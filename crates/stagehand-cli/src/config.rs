//! Configuration for a terminal play session, read from the environment.

use std::path::PathBuf;

use chrono::TimeDelta;

use crate::error::AppError;

const DEFAULT_CHARACTER_NAME: &str = "Wanderer";
const DEFAULT_NEW_DAY_SECONDS: u32 = 60;

/// Configuration for a play session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// YAML scene graph to play (`STAGEHAND_CONTENT`).
    pub content_path: PathBuf,
    /// RNG seed for reproducible action ids (`STAGEHAND_SEED`). Seeded from
    /// the OS when absent.
    pub seed: Option<u64>,
    /// Time between new days (`STAGEHAND_NEW_DAY_SECONDS`); `None` when set
    /// to zero, which turns the rule off.
    pub new_day_interval: Option<TimeDelta>,
    /// Name of the character created for the session
    /// (`STAGEHAND_CHARACTER_NAME`).
    pub character_name: String,
    /// Emit JSON logs (`STAGEHAND_LOG_JSON` set to anything).
    pub log_json: bool,
}

impl CliConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `STAGEHAND_CONTENT` is missing or a
    /// numeric variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// As [`CliConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let content_path = lookup("STAGEHAND_CONTENT")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| {
                AppError::Config("STAGEHAND_CONTENT environment variable must be set".into())
            })?;

        let seed = lookup("STAGEHAND_SEED")
            .map(|v| {
                v.trim()
                    .parse::<u64>()
                    .map_err(|e| AppError::Config(format!("STAGEHAND_SEED must be a valid u64: {e}")))
            })
            .transpose()?;

        let new_day_seconds = match lookup("STAGEHAND_NEW_DAY_SECONDS") {
            Some(v) => v.trim().parse::<u32>().map_err(|e| {
                AppError::Config(format!(
                    "STAGEHAND_NEW_DAY_SECONDS must be a non-negative number of seconds: {e}"
                ))
            })?,
            None => DEFAULT_NEW_DAY_SECONDS,
        };
        let new_day_interval =
            (new_day_seconds > 0).then(|| TimeDelta::seconds(i64::from(new_day_seconds)));

        let character_name = lookup("STAGEHAND_CHARACTER_NAME")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_CHARACTER_NAME.to_owned());

        Ok(Self {
            content_path,
            seed,
            new_day_interval,
            character_name,
            log_json: lookup("STAGEHAND_LOG_JSON").is_some(),
        })
    }
}
