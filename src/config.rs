//! Runtime configuration for invite-card.
//!
//! Everything the process needs besides the render parameters lives in a
//! single `Config` struct that serializes to/from TOML. Every section carries
//! `#[serde(default)]`, so a partial file only overrides what it names.

use std::path::{Path, PathBuf};

use crate::error::{CardError, Result};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Root configuration container.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    pub fonts: FontPaths,
    pub discord: DiscordSettings,
    pub server: ServerSettings,
    pub locale: LocaleSettings,
}

// --- Sub-structs ---

/// Font files for the three card faces.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct FontPaths {
    pub bold: PathBuf,
    pub semibold: PathBuf,
    pub medium: PathBuf,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct DiscordSettings {
    /// REST API root, e.g. `https://discord.com/api/v10`.
    pub api_base: String,
    /// CDN root serving guild icons.
    pub cdn_base: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Requested icon edge length in pixels.
    pub icon_size: u32,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct LocaleSettings {
    pub default_language: String,
    /// JSON strings table merged over the built-in catalogs.
    pub strings_path: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Default implementations
// ---------------------------------------------------------------------------

impl Default for FontPaths {
    fn default() -> Self {
        Self {
            bold: PathBuf::from("fonts/WhitneyBoldRegular.ttf"),
            semibold: PathBuf::from("fonts/WhitneySemiboldRegular.ttf"),
            medium: PathBuf::from("fonts/WhitneyMediumRegular.ttf"),
        }
    }
}

impl Default for DiscordSettings {
    fn default() -> Self {
        Self {
            api_base: "https://discord.com/api/v10".to_string(),
            cdn_base: "https://cdn.discordapp.com".to_string(),
            timeout_secs: 10,
            user_agent: format!("invite-card/{}", env!("CARGO_PKG_VERSION")),
            icon_size: 128,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            strings_path: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Helper methods
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a TOML file. A missing file yields the
    /// defaults so the service always starts with sensible values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(
                "Config file not found at '{}'; using defaults.",
                path.display()
            );
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| CardError::Config(format!("cannot read '{}': {e}", path.display())))?;

        Self::from_toml(&raw).map_err(|e| CardError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialize from a TOML string.
    pub fn from_toml(s: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
