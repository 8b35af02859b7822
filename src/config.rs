use anyhow::{Context, Result};
use config::{File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime settings, loaded once at startup from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// News listing page to scrape.
    pub url: String,
    /// Keywords matched against article titles (case-sensitive substring).
    pub keys: Vec<String>,
    pub email_from: String,
    pub email_to: String,
    pub email_smtp: String,
    pub email_smtp_port: u16,
    pub email_user: String,
    pub email_password: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let path_str = path
            .to_str()
            .with_context(|| format!("Config path is not valid UTF-8: {}", path.display()))?;

        let raw = config::Config::builder()
            .add_source(File::new(path_str, FileFormat::Yaml))
            .build()
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        raw.try_deserialize()
            .with_context(|| format!("Invalid config file {}", path.display()))
    }
}
