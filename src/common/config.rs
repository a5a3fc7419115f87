//! Configuration loading for the game math engine
//!
//! The engine configuration is read once at startup: defaults, then an
//! optional TOML file, then environment variables, then validation.

use crate::config::{EngineConfig, GameConfig, RtpBounds};
use crate::errors::{ConfigurationError, GameMathResult};
use crate::games::registry::ConfigRegistry;
use crate::games::types::GameType;
use std::env;
use std::path::Path;

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "GAMEMATH";

/// Configuration loader with environment variable support
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> GameMathResult<EngineConfig> {
        let mut config = match self.config_path {
            Some(ref path) => self.load_from_file(path)?,
            None => EngineConfig::default(),
        };

        self.apply_env_overrides(&mut config)?;
        self.validate(&config)?;

        Ok(config)
    }

    /// Load and wrap in a registry
    pub fn load_registry(&self) -> GameMathResult<ConfigRegistry> {
        ConfigRegistry::new(self.load()?)
    }

    /// Load configuration from TOML file
    fn load_from_file(&self, path: &str) -> GameMathResult<EngineConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path, e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e)).into())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&self, config: &mut EngineConfig) -> GameMathResult<()> {
        apply_overrides_from(config, |key| env::var(key).ok())
    }

    /// Validate configuration values
    fn validate(&self, config: &EngineConfig) -> GameMathResult<()> {
        config.validate().map_err(Into::into)
    }

    /// Save configuration to file
    pub fn save(&self, config: &EngineConfig, path: &str) -> GameMathResult<()> {
        let toml_string = toml::to_string_pretty(config)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_string)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to write to {}: {}", path, e)).into())
    }
}

/// Environment variable holding the raw RTP override for `game`,
/// e.g. `GAMEMATH_COIN_FLIP_RTP`
pub fn rtp_env_key(game: GameType) -> String {
    format!("{}_{}_RTP", ENV_PREFIX, game.id().to_uppercase())
}

/// Apply `GAMEMATH_*` overrides read through `lookup`
fn apply_overrides_from<F>(config: &mut EngineConfig, lookup: F) -> GameMathResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let min_key = format!("{}_RTP_MIN", ENV_PREFIX);
    if let Some(raw) = lookup(&min_key) {
        config.rtp_bounds.min = parse_rtp(&min_key, raw)?;
    }
    let max_key = format!("{}_RTP_MAX", ENV_PREFIX);
    if let Some(raw) = lookup(&max_key) {
        config.rtp_bounds.max = parse_rtp(&max_key, raw)?;
    }

    for game in GameType::ALL {
        let key = rtp_env_key(game);
        if let Some(raw) = lookup(&key) {
            *config.rtp_mut(game) = parse_rtp(&key, raw)?;
        }
    }

    Ok(())
}

fn parse_rtp(key: &str, raw: String) -> Result<f64, ConfigurationError> {
    raw.trim().parse().map_err(|_| ConfigurationError::InvalidValue {
        field: key.to_string(),
        value: raw,
        reason: "Invalid RTP value".to_string(),
    })
}

/// Builder pattern for creating configurations
pub struct ConfigBuilder {
    config: EngineConfig,
}

impl ConfigBuilder {
    /// Create a new config builder with defaults
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Set the platform RTP range
    pub fn rtp_bounds(mut self, min: f64, max: f64) -> Self {
        self.config.rtp_bounds = RtpBounds { min, max };
        self
    }

    /// Replace one game's record
    pub fn game(mut self, config: GameConfig) -> Self {
        self.config.set_game(config);
        self
    }

    /// Set one game's raw RTP
    pub fn rtp(mut self, game: GameType, rtp: f64) -> Self {
        *self.config.rtp_mut(game) = rtp;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> EngineConfig {
        self.config
    }

    /// Validate and wrap in a registry
    pub fn build_registry(self) -> GameMathResult<ConfigRegistry> {
        ConfigRegistry::new(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a sample configuration file
pub fn generate_sample_config(path: &str) -> GameMathResult<()> {
    let config = EngineConfig::default();
    let loader = ConfigLoader::new();
    loader.save(&config, path)
}
