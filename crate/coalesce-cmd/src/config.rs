use std::fs;
use std::path::Path;

/// What to do with a range whose lower bound is above its upper bound.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Report the range as a warning, drop it and keep going.
    #[default]
    Skip,

    /// Stop with an error.
    Fail,
}

/// Config file structure.
///
/// All fields are optional. Command-line flags take precedence.
#[derive(Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    pub malformed: MalformedPolicy,
    pub show_intervals: bool,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let content = fs::read_to_string(path)?;

        Ok(toml::from_str(&content)?)
    }
}
