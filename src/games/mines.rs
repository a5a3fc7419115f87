//! Mines: places the mines for a round. The payout depends on how many safe
//! tiles the player later reveals, so it is settled by the reveal session
//! outside this engine and reported as `None` here.

use crate::common::traits::OutcomeGenerator;
use crate::common::types::{scaled_index, RoundValue};
use crate::config::MinesConfig;
use crate::errors::GameMathResult;
use crate::games::sequence::DerivedSequence;
use crate::games::types::{GameOptions, GameResult, GameType, Outcome, VerificationData};

pub struct Mines;

/// Draw `mine_count` distinct tiles from `0..total_tiles` without replacement.
///
/// The first draw uses `value`, each further draw the next derived value.
/// Indices are returned in draw order.
pub fn place_mines(value: f64, total_tiles: u32, mine_count: u32) -> Vec<u32> {
    let mut remaining: Vec<u32> = (0..total_tiles).collect();
    DerivedSequence::new(value)
        .take(mine_count.min(total_tiles) as usize)
        .map(|u| {
            let index = scaled_index(u, remaining.len());
            remaining.remove(index)
        })
        .collect()
}

impl OutcomeGenerator for Mines {
    type Config = MinesConfig;
    const GAME: GameType = GameType::Mines;

    fn generate(value: RoundValue, config: &MinesConfig, _options: &GameOptions) -> GameMathResult<GameResult> {
        let mine_indices = place_mines(value.get(), config.total_tiles, config.mine_count);

        Ok(GameResult {
            game: Self::GAME,
            value: value.get(),
            outcome: Outcome::Mines {
                mine_indices: mine_indices.clone(),
            },
            payout_multiplier: None,
            verification: VerificationData::Mines {
                value: value.get(),
                mine_indices,
                total_tiles: config.total_tiles,
                mine_count: config.mine_count,
                rtp: config.rtp,
            },
        })
    }
}
