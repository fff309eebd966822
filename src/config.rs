use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://fragment.com";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9,ru;q=0.8";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen: String,
    pub fragment: FragmentConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FragmentConfig {
    pub base_url: String,
    pub user_agent: String,
    pub accept_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:80".to_string(),
            fragment: FragmentConfig::default(),
        }
    }
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

impl FragmentConfig {
    /// Points the client at a different origin, keeping the browser headers.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Config {
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.listen, "0.0.0.0:80");
        assert_eq!(config.fragment.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.fragment.accept_language, DEFAULT_ACCEPT_LANGUAGE);
    }

    #[test]
    fn partial_fragment_section() {
        let config = Config::from_yaml(
            "listen: 127.0.0.1:8080\nfragment:\n  base_url: http://localhost:9000\n",
        )
        .unwrap();
        assert_eq!(config.listen, "127.0.0.1:8080");
        assert_eq!(config.fragment.base_url, "http://localhost:9000");
        assert_eq!(config.fragment.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        let err = Config::from_yaml("listen: [unterminated").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Config::load("/nonexistent/fragment-price.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
