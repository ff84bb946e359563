use serde::Deserialize;
use std::{
    env, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const SEED_ENV: &str = "VOTE_RACE_SEED";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub race: Option<RaceConfig>,
    pub audio: Option<AudioConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RaceConfig {
    /// Seed for the race generator; the same seed replays the same series.
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AudioConfig {
    pub enabled: Option<bool>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    /// Load from the default location, falling back to defaults on any
    /// problem.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(Some(config)) => {
                tracing::info!(path = %path.display(), "config loaded");
                config
            }
            Ok(None) => Self::default(),
            Err(err) => {
                tracing::warn!("{err}");
                Self::default()
            }
        }
    }

    /// `Ok(None)` when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(config))
    }

    pub fn path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }

    /// The seed from [`SEED_ENV`] if set, else from the file.
    pub fn seed(&self) -> Option<u64> {
        self.seed_with(env::var(SEED_ENV).ok().as_deref())
    }

    fn seed_with(&self, env_value: Option<&str>) -> Option<u64> {
        if let Some(raw) = env_value {
            match raw.trim().parse() {
                Ok(seed) => return Some(seed),
                Err(_) => tracing::warn!("Ignoring non-numeric {SEED_ENV}: {raw}"),
            }
        }
        self.race.as_ref().and_then(|race| race.seed)
    }

    pub fn sound_enabled(&self) -> bool {
        self.audio
            .as_ref()
            .and_then(|audio| audio.enabled)
            .unwrap_or(true)
    }
}

/// `~/.vote-race`, home of the config file and logs.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vote-race"))
}
