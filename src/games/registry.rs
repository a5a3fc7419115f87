//! Config registry: the immutable engine configuration plus per-call
//! resolution of overrides.

use crate::config::{ConfigOverrides, EngineConfig, GameConfig};
use crate::errors::GameMathResult;
use crate::games::types::GameType;
use serde::Serialize;
use tracing::warn;

/// A game whose raw RTP lies outside the platform range
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RtpDiscrepancy {
    pub game: GameType,
    pub raw_rtp: f64,
    pub effective_rtp: f64,
}

/// Read-only view over a validated [`EngineConfig`]
#[derive(Clone, Debug)]
pub struct ConfigRegistry {
    config: EngineConfig,
}

impl ConfigRegistry {
    /// Validate the configuration and build the registry.
    ///
    /// Games whose raw RTP differs from the clamped platform RTP are logged
    /// once here; generators keep using the raw value.
    pub fn new(config: EngineConfig) -> GameMathResult<Self> {
        config.validate()?;
        let registry = Self { config };

        for d in registry.rtp_discrepancies() {
            warn!(
                "{} raw rtp {} is outside [{}, {}]; reported rtp is {}",
                d.game, d.raw_rtp, registry.config.rtp_bounds.min, registry.config.rtp_bounds.max, d.effective_rtp
            );
        }

        Ok(registry)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Base config for a game
    pub fn get_config(&self, game: GameType) -> GameConfig {
        self.config.game(game)
    }

    /// Base config by string id; `None` for ids that are not games
    pub fn lookup(&self, game_id: &str) -> Option<GameConfig> {
        GameType::from_id(game_id).map(|game| self.get_config(game))
    }

    /// Effective config for one call: the base record with `overrides`
    /// shallow-merged onto a copy.
    pub fn resolve(&self, game: GameType, overrides: Option<&ConfigOverrides>) -> GameMathResult<GameConfig> {
        let base = self.get_config(game);
        match overrides {
            Some(overrides) if !overrides.is_empty() => Ok(base.with_overrides(overrides)?),
            _ => Ok(base),
        }
    }

    /// Raw RTP clamped into the platform bounds, for reporting
    pub fn effective_rtp(&self, game: GameType) -> f64 {
        self.config.rtp_bounds.clamp(self.get_config(game).rtp())
    }

    pub fn rtp_discrepancies(&self) -> Vec<RtpDiscrepancy> {
        GameType::ALL
            .iter()
            .filter_map(|&game| {
                let raw_rtp = self.get_config(game).rtp();
                let effective_rtp = self.effective_rtp(game);
                (raw_rtp != effective_rtp).then_some(RtpDiscrepancy {
                    game,
                    raw_rtp,
                    effective_rtp,
                })
            })
            .collect()
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }
}
