use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default data file name, looked up relative to the working directory
pub const DEFAULT_DATA_PATH: &str = "expanded_years_data.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the nutrition/obesity CSV file
    pub data_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".obesity-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Resolve the data path for this session
    ///
    /// A path given on the command line wins over the config file, which
    /// wins over the default.
    pub fn resolve_data_path(cli_arg: Option<String>) -> PathBuf {
        if let Some(path) = cli_arg {
            return PathBuf::from(path);
        }
        let config = Self::load().unwrap_or_default();
        PathBuf::from(config.data_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_arg_wins() {
        let path = Config::resolve_data_path(Some("custom.csv".to_string()));
        assert_eq!(path, PathBuf::from("custom.csv"));
    }

    #[test]
    fn test_default_data_path() {
        let config = Config::default();
        assert_eq!(config.data_path, DEFAULT_DATA_PATH);
    }
}
