use hyper::http::uri::InvalidUri;
use hyper::Uri;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;

const DEFAULT_SOURCE_URL: &str = "http://localhost:4000/openapi.json";
const DEFAULT_OUTPUT_PATH: &str = "openapi.json";
const DEFAULT_SCHEME_NAME: &str = "API Key";
const DEFAULT_HEADER: &str = "Api-Key";
const DEFAULT_SERVER_URL: &str = "https://api.retab.dev";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub source_url: String,
    pub output_path: String,
    pub patch: PatchConfig,
}

/// Values written into the fetched document.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PatchConfig {
    pub scheme_name: String,
    pub header: String,
    pub server_url: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid source url {url:?}: {source}")]
    InvalidUri { url: String, source: InvalidUri },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            patch: PatchConfig::default(),
        }
    }
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            scheme_name: DEFAULT_SCHEME_NAME.to_string(),
            header: DEFAULT_HEADER.to_string(),
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

impl Config {
    /// Reads the TOML file at `path`, falling back to defaults when it does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn source_uri(&self) -> Result<Uri, ConfigError> {
        Uri::try_from(self.source_url.as_str()).map_err(|source| ConfigError::InvalidUri {
            url: self.source_url.clone(),
            source,
        })
    }
}
