use super::Config;
use super::schema::RawConfig;
use super::validator::validate_config;
use crate::error::ConfigError;
use std::path::Path;

pub fn parse_json_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json_str(&content)
}

pub fn parse_json_str(json: &str) -> Result<Config, ConfigError> {
    let raw: RawConfig = serde_json::from_str(json)?;
    validate_config(raw)
}
