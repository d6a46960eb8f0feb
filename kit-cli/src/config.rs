//! Optional TOML configuration for the quote tool.
//!
//! ```toml
//! [pricing]
//! freight_rate_per_tonne = "1150"
//! max_cash_discount = 12
//!
//! [share]
//! base_url = "https://api.whatsapp.com/send"
//!
//! [export]
//! banner = "banner.png"
//! header_title = "Proposta - MCPF BAHIA"
//! default_file_token = "mcpf"
//! ```
//!
//! Every table and key is optional.

use std::path::{Path, PathBuf};

use kit_core::{PricingConfig, PricingConfigError};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid pricing config: {0}")]
    Pricing(#[from] PricingConfigError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pricing: PricingConfig,
    pub share: ShareConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Messaging endpoint that accepts a `text` query parameter.
    pub base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.whatsapp.com/send".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Image drawn across the top of the proposal.
    pub banner: Option<PathBuf>,
    /// Header written instead of the banner when it is missing.
    pub header_title: String,
    /// File name token used when no customer name is given.
    pub default_file_token: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            banner: None,
            header_title: "Proposta - MCPF BAHIA".to_string(),
            default_file_token: "mcpf".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(input)?;
        config.pricing.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_toml_str(&contents)?;

        // A relative banner path is relative to the config file.
        if let (Some(banner), Some(dir)) = (config.export.banner.as_mut(), path.parent()) {
            if banner.is_relative() {
                *banner = dir.join(&*banner);
            }
        }

        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }
}
