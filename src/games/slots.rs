//! Slots: one weighted symbol per reel, paid when every reel shows the same
//! symbol.
//!
//! Reel `i` uses the `i`-th item of the derived sequence (the round value
//! itself for the first reel). A round may swap in its own symbol/weight
//! table; the paytable always comes from config.

use crate::common::traits::OutcomeGenerator;
use crate::common::types::RoundValue;
use crate::config::{check_symbol_table, SlotsConfig};
use crate::errors::{GameMathError, GameMathResult};
use crate::games::sequence::DerivedSequence;
use crate::games::types::{GameOptions, GameResult, GameType, Outcome, VerificationData};

pub struct Slots;

/// Index of the symbol whose cumulative-weight bucket contains
/// `value * total_weight mod total_weight`. The table must pass
/// [`check_symbol_table`].
pub fn pick_symbol(value: f64, weights: &[f64]) -> usize {
    let total: f64 = weights.iter().sum();
    let pick = (value * total) % total;

    let mut cumulative = 0.0;
    for (index, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if pick < cumulative {
            return index;
        }
    }
    // float rounding at the top edge: last symbol that can be hit
    weights.iter().rposition(|w| *w > 0.0).unwrap_or(0)
}

impl OutcomeGenerator for Slots {
    type Config = SlotsConfig;
    const GAME: GameType = GameType::Slots;

    fn generate(value: RoundValue, config: &SlotsConfig, options: &GameOptions) -> GameMathResult<GameResult> {
        let (symbols, weights) = match (&options.symbols, &options.weights) {
            (None, None) => (&config.symbols, &config.weights),
            (Some(symbols), Some(weights)) => {
                check_symbol_table(symbols, weights)
                    .map_err(|reason| GameMathError::invalid_option(Self::GAME, "symbols", reason))?;
                (symbols, weights)
            }
            (Some(_), None) => {
                return Err(GameMathError::invalid_option(
                    Self::GAME,
                    "weights",
                    "symbols supplied without weights",
                ))
            }
            (None, Some(_)) => {
                return Err(GameMathError::invalid_option(
                    Self::GAME,
                    "symbols",
                    "weights supplied without symbols",
                ))
            }
        };

        let reel_values: Vec<f64> = DerivedSequence::new(value.get())
            .take(config.reels as usize)
            .collect();
        let reels: Vec<String> = reel_values
            .iter()
            .map(|u| symbols[pick_symbol(*u, weights)].clone())
            .collect();

        let line = reels.first().filter(|first| reels.iter().all(|s| s == *first));
        let payout = line
            .and_then(|symbol| config.paytable.get(symbol))
            .map(|pays| pays * config.rtp);
        let win = payout.is_some();

        Ok(GameResult {
            game: Self::GAME,
            value: value.get(),
            outcome: Outcome::Slots {
                symbols: reels.clone(),
                win,
            },
            payout_multiplier: Some(payout.unwrap_or(0.0)),
            verification: VerificationData::Slots {
                value: value.get(),
                reels,
                reel_values,
                rtp: config.rtp,
                symbols: symbols.clone(),
                weights: weights.clone(),
                paytable: config.paytable.clone(),
            },
        })
    }
}
