//! Global configuration at ~/.config/printcal/config.toml.
//!
//! The original page injected the site root and nonce as ambient page
//! state; here they are explicit configuration handed to the gateway at
//! startup. Missing configuration disables the features that need it with
//! a pointer to the fix, never a crash.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

use printcal_core::view::DEFAULT_FONT_SIZE_PX;

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE_PX
}

#[derive(Debug, Clone, Deserialize)]
pub struct GlobalConfig {
    /// Root URL of the member site, e.g. "https://example.org".
    pub site_url: Option<String>,

    /// Short-lived token authorizing note and upload writes.
    pub rest_nonce: Option<String>,

    /// Event font size (pixels) for exported documents.
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Background image for exported documents.
    pub bg_image: Option<String>,

    /// Logo for the exported document's header band.
    pub logo_url: Option<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            site_url: None,
            rest_nonce: None,
            font_size: DEFAULT_FONT_SIZE_PX,
            bg_image: None,
            logo_url: None,
        }
    }
}

impl GlobalConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("printcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing. A present-but-broken file is an error.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            log::warn!(
                "no config file at {}; network features are disabled",
                path.display()
            );
            return Ok(GlobalConfig::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// The validated site root, or a friendly setup message.
    pub fn require_site(&self) -> Result<Url> {
        let path = Self::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "~/.config/printcal/config.toml".to_string());

        let raw = self.site_url.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "No site configured.\n\n\
                Add your member site to {path}:\n  \
                site_url = \"https://example.org\"\n  \
                rest_nonce = \"<nonce>\""
            )
        })?;

        Url::parse(raw).with_context(|| format!("Invalid site_url '{raw}'"))
    }

    /// The nonce, required for note writes and uploads.
    pub fn require_nonce(&self) -> Result<&str> {
        self.rest_nonce.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "No rest_nonce configured; note and upload features are disabled.\n\
                Add rest_nonce = \"<nonce>\" to your config file."
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config() {
        let config: GlobalConfig = toml::from_str(
            r#"
            site_url = "https://example.org"
            rest_nonce = "abc123"
            font_size = 16
            bg_image = "uploads/summer.png"
            "#,
        )
        .unwrap();

        assert_eq!(config.site_url.as_deref(), Some("https://example.org"));
        assert_eq!(config.rest_nonce.as_deref(), Some("abc123"));
        assert_eq!(config.font_size, 16);
        assert!(config.require_site().is_ok());
        assert!(config.require_nonce().is_ok());
    }

    #[test]
    fn font_size_defaults_when_absent() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.font_size, DEFAULT_FONT_SIZE_PX);
    }

    #[test]
    fn missing_site_or_nonce_degrades_with_guidance() {
        let config = GlobalConfig::default();

        let err = config.require_site().unwrap_err().to_string();
        assert!(err.contains("site_url"));

        let err = config.require_nonce().unwrap_err().to_string();
        assert!(err.contains("rest_nonce"));
    }

    #[test]
    fn bad_site_url_is_rejected() {
        let config = GlobalConfig {
            site_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(config.require_site().is_err());
    }
}
