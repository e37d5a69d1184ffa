//! Application configuration: seed catalog and ticket numbering.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    catalog::{self, TrainSpec},
    models::TicketId,
};

/// Directory under the user's config dir holding `config.json`.
pub const CONFIG_DIR: &str = "railres";
/// Name of the configuration file.
pub const CONFIG_FILE: &str = "config.json";
/// Prefix for environment overrides, e.g. `RAILRES_TICKET_ID_BASE`.
pub const ENV_PREFIX: &str = "RAILRES";
/// First ticket id handed out when nothing else is configured.
pub const DEFAULT_TICKET_ID_BASE: TicketId = 1001;

/// Settings read at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Id assigned to the first ticket of a run.
    #[serde(default = "default_ticket_id_base")]
    pub ticket_id_base: TicketId,
    /// Trains available for booking, in listing order.
    #[serde(default = "catalog::default_catalog")]
    pub trains: Vec<TrainSpec>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ticket_id_base: DEFAULT_TICKET_ID_BASE,
            trains: catalog::default_catalog(),
        }
    }
}

impl AppConfig {
    /// Default location of the configuration file.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    /// Load configuration from the default path plus environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path())
    }

    /// Load configuration from `path` (if it exists) plus environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Json)
                    .required(false),
            )
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;

        let config: Self = settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }
}

/// Write the default configuration file if none exists yet.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = AppConfig::default_path();
    ensure_default_config_at(&path)?;
    Ok(path)
}

/// Write the default configuration to `path` unless a file is already there.
pub fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let serialized = serde_json::to_string_pretty(&AppConfig::default())
        .context("failed to serialize default config")?;
    fs::write(path, serialized).with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote default configuration to {}", path.display());
    Ok(())
}

fn default_ticket_id_base() -> TicketId {
    DEFAULT_TICKET_ID_BASE
}
