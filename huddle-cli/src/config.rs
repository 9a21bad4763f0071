use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

static DEFAULT_USER: &str = "user1";

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("huddle"))
        .unwrap_or_else(|| PathBuf::from("~/.huddle"))
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

/// Configuration at ~/.config/huddle/config.toml
///
/// Every key can also be set from the environment with a `HUDDLE_` prefix
/// (e.g. `HUDDLE_CURRENT_USER=user3`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HuddleConfig {
    /// Where events.json and settings.json are kept
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Profile to act as when `--as` isn't given
    #[serde(default = "default_user")]
    pub current_user: String,

    /// IANA time zone for calendar days; the system zone when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Default for HuddleConfig {
    fn default() -> Self {
        HuddleConfig {
            data_dir: default_data_dir(),
            current_user: default_user(),
            timezone: None,
        }
    }
}

impl HuddleConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("huddle");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix("HUDDLE"))
            .build()
            .context("Could not read config")?
            .try_deserialize()
            .context("Invalid config")?;

        Ok(config)
    }

    /// Create a config file with all options commented out.
    pub fn create_default_config(path: &Path) -> Result<()> {
        let contents = format!(
            "\
# huddle configuration

# Where events and settings are stored:
# data_dir = \"{}\"

# Profile to act as (user1 to user5):
# current_user = \"{}\"

# Time zone used for calendar days (defaults to the system zone):
# timezone = \"Europe/Berlin\"
",
            default_data_dir().display(),
            DEFAULT_USER
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Could not create config directory")?;
        }
        std::fs::write(path, contents).context("Could not write config file")?;

        Ok(())
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned())
    }

    pub fn time_zone(&self) -> Result<Tz> {
        match &self.timezone {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| anyhow::anyhow!("Unknown time zone '{}' in config", name)),
            None => Ok(system_time_zone()),
        }
    }
}

fn system_time_zone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse().ok())
        .unwrap_or(Tz::UTC)
}
