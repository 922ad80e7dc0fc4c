use crate::{error::ConfigError, policy::MatchPolicy, report::ExportOrder};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Scan and export settings, read from a TOML file such as:
///
/// ```toml
/// policy = "substring-isolation"
/// order = "instruction"
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub policy: MatchPolicy,
    pub order: ExportOrder,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load<P>(path: P) -> Result<Config, ConfigError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|inner| ConfigError::Io {
            path: path.to_owned(),
            inner,
        })?;

        let config = Config::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");

        Ok(config)
    }
}
