use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_PORT: u16 = 3333;
const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Server settings: defaults, then `game.json`, then environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub port: u16,
    pub max_attempts: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Contents of `game.json`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameFile {
    port: Option<u16>,
    max_attempts: Option<u32>,
}

/// Resolves a path relative to the config directory.
fn config_path(sub: &str) -> PathBuf {
    let base = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config".to_string());
    Path::new(&base).join(sub)
}

fn read_game_file(path: &Path) -> Result<GameFile, ConfigError> {
    if !path.exists() {
        return Ok(GameFile::default());
    }
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: format!("{value:?}: {e}"),
    })
}

impl Settings {
    /// Load settings from `$CONFIG_PATH/game.json` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let file = read_game_file(&config_path("game.json"))?;
        Self::resolve(file, |name| std::env::var(name).ok())
    }

    fn resolve(file: GameFile, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Some(port) = file.port {
            settings.port = port;
        }
        if let Some(max_attempts) = file.max_attempts {
            settings.max_attempts = max_attempts;
        }

        if let Some(port) = env("PORT") {
            settings.port = parse_var("PORT", &port)?;
        }
        if let Some(max_attempts) = env("MAX_ATTEMPTS") {
            settings.max_attempts = parse_var("MAX_ATTEMPTS", &max_attempts)?;
        }

        if settings.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                name: "maxAttempts",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(settings)
    }
}
