//! Directory layout for invite-card.
//!
//! - Config: `$XDG_CONFIG_HOME/invite-card/` or `~/.config/invite-card/`
//! - Logs:   `~/Library/Logs/invite-card/` on macOS,
//!   `$XDG_DATA_HOME/invite-card/logs/` elsewhere

use std::path::{Path, PathBuf};

use tracing::info;

const APP_NAME: &str = "invite-card";
const CONFIG_FILE: &str = "config.toml";

/// Resolved application directories.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config: PathBuf,
    pub logs: PathBuf,
}

impl AppPaths {
    /// Resolve all paths from the user's home directory.
    /// Does not create any directories; call `ensure()` for that.
    pub fn resolve() -> Option<Self> {
        let home = std::env::var("HOME").ok().map(PathBuf::from)?;
        Some(Self {
            config: resolve_config_dir(&home),
            logs: resolve_log_dir(&home),
        })
    }

    /// Default location of the TOML configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.config.join(CONFIG_FILE)
    }

    pub fn ensure(&self) -> std::io::Result<()> {
        for dir in [&self.config, &self.logs] {
            std::fs::create_dir_all(dir)?;
            info!("ensured directory: {}", dir.display());
        }
        Ok(())
    }
}

/// Config file path used when none is given on the command line.
pub fn default_config_file() -> PathBuf {
    AppPaths::resolve()
        .map(|p| p.config_file())
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

fn resolve_config_dir(home: &Path) -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join(APP_NAME)
    } else {
        home.join(".config").join(APP_NAME)
    }
}

#[cfg(target_os = "macos")]
fn resolve_log_dir(home: &Path) -> PathBuf {
    home.join("Library").join("Logs").join(APP_NAME)
}

#[cfg(not(target_os = "macos"))]
fn resolve_log_dir(home: &Path) -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join(APP_NAME).join("logs")
    } else {
        home.join(".local").join("share").join(APP_NAME).join("logs")
    }
}
