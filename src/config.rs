use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_FILENAME: &str = ".gatorconfig.json";
const DEFAULT_DB_FILENAME: &str = ".gator.db";

/// Application configuration, stored as JSON in the user's home directory
/// and rewritten wholesale whenever the current user changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite database file
    pub db_url: String,
    /// Name of the logged-in user, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user_name: Option<String>,
}

impl Config {
    /// Loads the config file, creating one with defaults on first run
    pub fn read() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            let config = Self::default_config()?;
            config.write()?;
            return Ok(config);
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("invalid JSON in {}", path.display()))?;
        Ok(config)
    }

    /// Records the given user as the current one and persists the change
    pub fn set_user(&mut self, name: &str) -> Result<()> {
        self.current_user_name = Some(name.to_owned());
        self.write()
    }

    fn write(&self) -> Result<()> {
        let path = Self::path()?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write config at {}", path.display()))?;
        Ok(())
    }

    fn default_config() -> Result<Self> {
        let home = home_dir()?;
        Ok(Self {
            db_url: home.join(DEFAULT_DB_FILENAME).to_string_lossy().into_owned(),
            current_user_name: None,
        })
    }

    fn path() -> Result<PathBuf> {
        Ok(home_dir()?.join(CONFIG_FILENAME))
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow!("could not determine home directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_current_user_deserializes_to_none() {
        let config: Config = serde_json::from_str(r#"{"db_url": "/tmp/gator.db"}"#).unwrap();
        assert_eq!(config.db_url, "/tmp/gator.db");
        assert!(config.current_user_name.is_none());
    }

    #[test]
    fn test_round_trip_preserves_user() {
        let config = Config {
            db_url: "/tmp/gator.db".into(),
            current_user_name: Some("alice".into()),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.current_user_name.as_deref(), Some("alice"));
    }
}
