use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "CTF_TERMINAL_CONFIG";

pub const DEFAULT_USER: &str = "alex";
pub const DEFAULT_HOST: &str = "cybersec-terminal";
pub const DEFAULT_BANNER: &[&str] = &[
    "Welcome to Alex's CTF Terminal v2.1.0",
    "Type \"help\" for available commands",
];

#[derive(Debug, Default, Deserialize)]
pub struct TerminalConfig {
    pub app: Option<AppConfig>,
    pub terminal: Option<TerminalSection>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs and success markers.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
}

/// Prompt identity and the welcome banner.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TerminalSection {
    pub user: Option<String>,
    pub host: Option<String>,
    pub banner: Option<Vec<String>>,
}

impl TerminalConfig {
    /// Load from the default location. `Ok(None)` when no file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn ascii_only(&self) -> bool {
        self.app.is_some_and(|app| app.ascii_only)
    }

    #[must_use]
    pub fn high_contrast(&self) -> bool {
        self.app.is_some_and(|app| app.high_contrast)
    }

    #[must_use]
    pub fn user(&self) -> &str {
        self.terminal
            .as_ref()
            .and_then(|t| t.user.as_deref())
            .filter(|user| !user.trim().is_empty())
            .unwrap_or(DEFAULT_USER)
    }

    #[must_use]
    pub fn host(&self) -> &str {
        self.terminal
            .as_ref()
            .and_then(|t| t.host.as_deref())
            .filter(|host| !host.trim().is_empty())
            .unwrap_or(DEFAULT_HOST)
    }

    /// Banner lines; an explicit empty list disables the banner.
    #[must_use]
    pub fn banner(&self) -> Vec<String> {
        match self.terminal.as_ref().and_then(|t| t.banner.as_ref()) {
            Some(lines) => lines.clone(),
            None => DEFAULT_BANNER.iter().map(ToString::to_string).collect(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".ctf-terminal").join("config.toml"))
}
