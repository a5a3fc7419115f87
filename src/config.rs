//! Per-game configuration records
//!
//! One record per game, each carrying the raw `rtp` the generator reads plus
//! the game-specific bounds and tables. [`EngineConfig`] aggregates them with
//! the platform-wide RTP bounds and is built once at startup; per-call
//! overrides are shallow-merged into a fresh copy and never touch it.

use crate::errors::ConfigurationError;
use crate::games::types::GameType;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lower bound of the platform RTP range used for reporting
pub const MIN_RTP: f64 = 0.90;
/// Upper bound of the platform RTP range used for reporting
pub const MAX_RTP: f64 = 0.96;

/// Largest magnitude allowed for either end of the dice roll range
pub const MAX_ROLL_MAGNITUDE: i64 = 1_000_000_000_000;
/// Largest mines board
pub const MAX_TOTAL_TILES: u32 = 1024;
/// Most reels a slots line may have
pub const MAX_REELS: u32 = 64;

/// Shallow per-call overrides: field name to replacement value
pub type ConfigOverrides = serde_json::Map<String, serde_json::Value>;

/// Engine configuration: platform bounds plus one record per game
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub rtp_bounds: RtpBounds,
    pub coin_flip: CoinFlipConfig,
    pub dice: DiceConfig,
    pub crash: CrashConfig,
    pub limbo: LimboConfig,
    pub plinko: PlinkoConfig,
    pub mines: MinesConfig,
    pub roulette: RouletteConfig,
    pub hi_lo: HiLoConfig,
    pub slots: SlotsConfig,
}

impl EngineConfig {
    /// Copy of the record for one game
    pub fn game(&self, game: GameType) -> GameConfig {
        match game {
            GameType::CoinFlip => GameConfig::CoinFlip(self.coin_flip.clone()),
            GameType::Dice => GameConfig::Dice(self.dice.clone()),
            GameType::Crash => GameConfig::Crash(self.crash.clone()),
            GameType::Limbo => GameConfig::Limbo(self.limbo.clone()),
            GameType::Plinko => GameConfig::Plinko(self.plinko.clone()),
            GameType::Mines => GameConfig::Mines(self.mines.clone()),
            GameType::Roulette => GameConfig::Roulette(self.roulette.clone()),
            GameType::HiLo => GameConfig::HiLo(self.hi_lo.clone()),
            GameType::Slots => GameConfig::Slots(self.slots.clone()),
        }
    }

    /// Replace the record for one game
    pub fn set_game(&mut self, config: GameConfig) {
        match config {
            GameConfig::CoinFlip(c) => self.coin_flip = c,
            GameConfig::Dice(c) => self.dice = c,
            GameConfig::Crash(c) => self.crash = c,
            GameConfig::Limbo(c) => self.limbo = c,
            GameConfig::Plinko(c) => self.plinko = c,
            GameConfig::Mines(c) => self.mines = c,
            GameConfig::Roulette(c) => self.roulette = c,
            GameConfig::HiLo(c) => self.hi_lo = c,
            GameConfig::Slots(c) => self.slots = c,
        }
    }

    /// Mutable access to a game's raw RTP (used by environment overrides)
    pub fn rtp_mut(&mut self, game: GameType) -> &mut f64 {
        match game {
            GameType::CoinFlip => &mut self.coin_flip.rtp,
            GameType::Dice => &mut self.dice.rtp,
            GameType::Crash => &mut self.crash.rtp,
            GameType::Limbo => &mut self.limbo.rtp,
            GameType::Plinko => &mut self.plinko.rtp,
            GameType::Mines => &mut self.mines.rtp,
            GameType::Roulette => &mut self.roulette.rtp,
            GameType::HiLo => &mut self.hi_lo.rtp,
            GameType::Slots => &mut self.slots.rtp,
        }
    }

    /// Validate the bounds and every game record
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.rtp_bounds.validate()?;
        for game in GameType::ALL {
            self.game(game).validate()?;
        }
        Ok(())
    }
}

/// Platform-wide RTP range for reporting and compliance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RtpBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for RtpBounds {
    fn default() -> Self {
        Self {
            min: MIN_RTP,
            max: MAX_RTP,
        }
    }
}

impl RtpBounds {
    /// Clamp a raw RTP into the platform range
    pub fn clamp(&self, rtp: f64) -> f64 {
        rtp.max(self.min).min(self.max)
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        check_rtp("rtp_bounds.min", self.min)?;
        check_rtp("rtp_bounds.max", self.max)?;
        if self.min > self.max {
            return Err(ConfigurationError::invalid_value(
                "rtp_bounds.min",
                self.min,
                "Lower RTP bound exceeds upper bound",
            ));
        }
        Ok(())
    }
}

/// Coin flip: fixed payout below the fair 2.0
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoinFlipConfig {
    pub rtp: f64,
    pub payout_multiplier: f64,
}

impl Default for CoinFlipConfig {
    fn default() -> Self {
        Self {
            rtp: 0.98,
            payout_multiplier: 1.96,
        }
    }
}

/// Dice: inclusive roll range and payout cap
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiceConfig {
    pub rtp: f64,
    pub min_roll: i64,
    pub max_roll: i64,
    pub max_payout: f64,
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self {
            rtp: 0.96,
            min_roll: 0,
            max_roll: 100,
            max_payout: 9900.0,
        }
    }
}

/// Crash: inverse power-law curve and multiplier bounds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrashConfig {
    pub rtp: f64,
    pub curve_exponent: f64,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
}

impl Default for CrashConfig {
    fn default() -> Self {
        Self {
            rtp: 0.97,
            curve_exponent: 1.0,
            min_multiplier: 1.0,
            max_multiplier: 1000.0,
        }
    }
}

/// Limbo: same curve as crash with a much higher cap
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimboConfig {
    pub rtp: f64,
    pub curve_exponent: f64,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
}

impl Default for LimboConfig {
    fn default() -> Self {
        Self {
            rtp: 0.97,
            curve_exponent: 1.0,
            min_multiplier: 1.0,
            max_multiplier: 1_000_000.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlinkoConfig {
    pub rtp: f64,
    pub rows: u32,
    pub buckets: u32,
    pub min_payout: f64,
    pub max_payout: f64,
}

impl Default for PlinkoConfig {
    fn default() -> Self {
        Self {
            rtp: 0.96,
            rows: 16,
            buckets: 17,
            min_payout: 0.1,
            max_payout: 10.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinesConfig {
    pub rtp: f64,
    pub total_tiles: u32,
    pub mine_count: u32,
}

impl Default for MinesConfig {
    fn default() -> Self {
        Self {
            rtp: 0.97,
            total_tiles: 25,
            mine_count: 3,
        }
    }
}

/// Roulette: pocket count (37 for a single-zero wheel)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouletteConfig {
    pub rtp: f64,
    pub pockets: u32,
}

impl Default for RouletteConfig {
    fn default() -> Self {
        Self {
            rtp: 0.973,
            pockets: 37,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HiLoConfig {
    pub rtp: f64,
    pub payout_scale: f64,
}

impl Default for HiLoConfig {
    fn default() -> Self {
        Self {
            rtp: 0.96,
            payout_scale: 1.0,
        }
    }
}

/// Slots: weighted symbol table shared by every reel, paid on a full line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlotsConfig {
    pub rtp: f64,
    pub reels: u32,
    pub symbols: Vec<String>,
    pub weights: Vec<f64>,
    pub paytable: BTreeMap<String, f64>,
}

impl Default for SlotsConfig {
    fn default() -> Self {
        let table = [
            ("cherry", 30.0, 12.0),
            ("lemon", 25.0, 18.0),
            ("orange", 20.0, 25.0),
            ("plum", 15.0, 40.0),
            ("bell", 7.0, 100.0),
            ("seven", 3.0, 1000.0),
        ];
        Self {
            rtp: 0.95,
            reels: 3,
            symbols: table.iter().map(|(s, _, _)| s.to_string()).collect(),
            weights: table.iter().map(|(_, w, _)| *w).collect(),
            paytable: table.iter().map(|(s, _, p)| (s.to_string(), *p)).collect(),
        }
    }
}

/// Resolved configuration for a single game
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum GameConfig {
    CoinFlip(CoinFlipConfig),
    Dice(DiceConfig),
    Crash(CrashConfig),
    Limbo(LimboConfig),
    Plinko(PlinkoConfig),
    Mines(MinesConfig),
    Roulette(RouletteConfig),
    HiLo(HiLoConfig),
    Slots(SlotsConfig),
}

impl GameConfig {
    /// Default record for a game
    pub fn default_for(game: GameType) -> Self {
        EngineConfig::default().game(game)
    }

    pub fn game_type(&self) -> GameType {
        match self {
            Self::CoinFlip(_) => GameType::CoinFlip,
            Self::Dice(_) => GameType::Dice,
            Self::Crash(_) => GameType::Crash,
            Self::Limbo(_) => GameType::Limbo,
            Self::Plinko(_) => GameType::Plinko,
            Self::Mines(_) => GameType::Mines,
            Self::Roulette(_) => GameType::Roulette,
            Self::HiLo(_) => GameType::HiLo,
            Self::Slots(_) => GameType::Slots,
        }
    }

    /// Raw RTP as read by the generator (not clamped)
    pub fn rtp(&self) -> f64 {
        match self {
            Self::CoinFlip(c) => c.rtp,
            Self::Dice(c) => c.rtp,
            Self::Crash(c) => c.rtp,
            Self::Limbo(c) => c.rtp,
            Self::Plinko(c) => c.rtp,
            Self::Mines(c) => c.rtp,
            Self::Roulette(c) => c.rtp,
            Self::HiLo(c) => c.rtp,
            Self::Slots(c) => c.rtp,
        }
    }

    /// Shallow-merge overrides onto a copy of this record.
    ///
    /// Every key must name a field of the record; the merged record is
    /// validated before it is returned.
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Result<Self, ConfigurationError> {
        let game = self.game_type();
        let merged = match self {
            Self::CoinFlip(c) => Self::CoinFlip(merge_record(game, c, overrides)?),
            Self::Dice(c) => Self::Dice(merge_record(game, c, overrides)?),
            Self::Crash(c) => Self::Crash(merge_record(game, c, overrides)?),
            Self::Limbo(c) => Self::Limbo(merge_record(game, c, overrides)?),
            Self::Plinko(c) => Self::Plinko(merge_record(game, c, overrides)?),
            Self::Mines(c) => Self::Mines(merge_record(game, c, overrides)?),
            Self::Roulette(c) => Self::Roulette(merge_record(game, c, overrides)?),
            Self::HiLo(c) => Self::HiLo(merge_record(game, c, overrides)?),
            Self::Slots(c) => Self::Slots(merge_record(game, c, overrides)?),
        };
        merged.validate()?;
        Ok(merged)
    }

    /// Check the record's invariants
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let game = self.game_type();
        check_rtp(&format!("{}.rtp", game), self.rtp())?;

        match self {
            Self::CoinFlip(c) => {
                check_non_negative("coin_flip.payout_multiplier", c.payout_multiplier)
            }
            Self::Dice(c) => {
                let roll_range = -MAX_ROLL_MAGNITUDE..=MAX_ROLL_MAGNITUDE;
                for (field, roll) in [("dice.min_roll", c.min_roll), ("dice.max_roll", c.max_roll)] {
                    if !roll_range.contains(&roll) {
                        return Err(ConfigurationError::invalid_value(
                            field,
                            roll,
                            &format!("Roll bounds must be within -{0}..={0}", MAX_ROLL_MAGNITUDE),
                        ));
                    }
                }
                if c.min_roll >= c.max_roll {
                    return Err(ConfigurationError::invalid_value(
                        "dice.min_roll",
                        c.min_roll,
                        "Minimum roll must be below maximum roll",
                    ));
                }
                check_non_negative("dice.max_payout", c.max_payout)
            }
            Self::Crash(c) => check_curve("crash", c.curve_exponent, c.min_multiplier, c.max_multiplier),
            Self::Limbo(c) => check_curve("limbo", c.curve_exponent, c.min_multiplier, c.max_multiplier),
            Self::Plinko(c) => {
                if c.buckets == 0 {
                    return Err(ConfigurationError::invalid_value(
                        "plinko.buckets",
                        c.buckets,
                        "At least one bucket is required",
                    ));
                }
                check_non_negative("plinko.min_payout", c.min_payout)?;
                check_non_negative("plinko.max_payout", c.max_payout)?;
                if c.min_payout > c.max_payout {
                    return Err(ConfigurationError::invalid_value(
                        "plinko.min_payout",
                        c.min_payout,
                        "Minimum payout exceeds maximum payout",
                    ));
                }
                Ok(())
            }
            Self::Mines(c) => {
                if c.total_tiles > MAX_TOTAL_TILES {
                    return Err(ConfigurationError::invalid_value(
                        "mines.total_tiles",
                        c.total_tiles,
                        &format!("A board has at most {} tiles", MAX_TOTAL_TILES),
                    ));
                }
                if c.mine_count == 0 || c.mine_count >= c.total_tiles {
                    return Err(ConfigurationError::invalid_value(
                        "mines.mine_count",
                        c.mine_count,
                        "Mine count must be at least 1 and below the tile count",
                    ));
                }
                Ok(())
            }
            Self::Roulette(c) => {
                if c.pockets == 0 {
                    return Err(ConfigurationError::invalid_value(
                        "roulette.pockets",
                        c.pockets,
                        "At least one pocket is required",
                    ));
                }
                Ok(())
            }
            Self::HiLo(c) => check_non_negative("hi_lo.payout_scale", c.payout_scale),
            Self::Slots(c) => {
                if c.reels == 0 || c.reels > MAX_REELS {
                    return Err(ConfigurationError::invalid_value(
                        "slots.reels",
                        c.reels,
                        &format!("Reel count must be within 1..={}", MAX_REELS),
                    ));
                }
                check_symbol_table(&c.symbols, &c.weights)
                    .map_err(|reason| ConfigurationError::ValidationFailed(format!("slots: {}", reason)))?;
                for (symbol, payout) in &c.paytable {
                    check_non_negative(&format!("slots.paytable.{}", symbol), *payout)?;
                }
                Ok(())
            }
        }
    }
}

/// Check a symbol/weight table: equal non-zero lengths, non-negative
/// weights, finite positive total. Returns the reason on failure.
pub(crate) fn check_symbol_table(symbols: &[String], weights: &[f64]) -> Result<(), String> {
    if symbols.is_empty() {
        return Err("symbol table is empty".to_string());
    }
    if symbols.len() != weights.len() {
        return Err(format!(
            "{} symbols but {} weights",
            symbols.len(),
            weights.len()
        ));
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err("weights must be finite and non-negative".to_string());
    }
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err("total weight must be finite and positive".to_string());
    }
    Ok(())
}

fn merge_record<T>(game: GameType, base: &T, overrides: &ConfigOverrides) -> Result<T, ConfigurationError>
where
    T: Serialize + DeserializeOwned,
{
    let invalid = |reason: String| ConfigurationError::InvalidOverride { game, reason };

    let mut merged = match serde_json::to_value(base) {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(_) => return Err(invalid("base record is not an object".to_string())),
        Err(e) => return Err(invalid(e.to_string())),
    };

    for (key, value) in overrides {
        if !merged.contains_key(key) {
            return Err(invalid(format!("unknown field '{}'", key)));
        }
        merged.insert(key.clone(), value.clone());
    }

    serde_json::from_value(serde_json::Value::Object(merged)).map_err(|e| invalid(e.to_string()))
}

fn check_rtp(field: &str, rtp: f64) -> Result<(), ConfigurationError> {
    if !(rtp > 0.0 && rtp <= 1.0) {
        return Err(ConfigurationError::invalid_value(
            field,
            rtp,
            "RTP must be within (0, 1]",
        ));
    }
    Ok(())
}

fn check_non_negative(field: &str, value: f64) -> Result<(), ConfigurationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigurationError::invalid_value(
            field,
            value,
            "Value must be finite and non-negative",
        ));
    }
    Ok(())
}

fn check_curve(game: &str, exponent: f64, min: f64, max: f64) -> Result<(), ConfigurationError> {
    if !exponent.is_finite() || exponent <= 0.0 {
        return Err(ConfigurationError::invalid_value(
            &format!("{}.curve_exponent", game),
            exponent,
            "Curve exponent must be positive",
        ));
    }
    if !min.is_finite() || min < 1.0 {
        return Err(ConfigurationError::invalid_value(
            &format!("{}.min_multiplier", game),
            min,
            "Minimum multiplier must be at least 1",
        ));
    }
    if !max.is_finite() || max < min {
        return Err(ConfigurationError::invalid_value(
            &format!("{}.max_multiplier", game),
            max,
            "Maximum multiplier must be finite and not below the minimum",
        ));
    }
    Ok(())
}
