use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_FILE: &str = "sheetfeed.toml";

/// Named feeds: `[feeds] lunch = "https://…/pub?output=csv"` (a local path works too)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feeds: BTreeMap<String, String>,
}

impl Config {
    /// A missing file is an empty config
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn feed(&self, name: &str) -> Result<&str> {
        self.feeds.get(name).map(String::as_str).ok_or_else(|| {
            let known: Vec<&str> = self.feeds.keys().map(String::as_str).collect();
            anyhow!("unknown feed '{}' (configured: {})", name, known.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_feed_table() {
        let config: Config =
            toml::from_str("[feeds]\nlunch = \"https://example.org/a.csv\"\n").unwrap();
        assert_eq!(config.feed("lunch").unwrap(), "https://example.org/a.csv");
        assert!(config.feed("dinner").is_err());
    }

    #[test]
    fn missing_file_is_empty() {
        let config = Config::load_from(Path::new("/nonexistent/sheetfeed.toml")).unwrap();
        assert!(config.feeds.is_empty());
    }
}
