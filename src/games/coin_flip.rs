use crate::common::traits::OutcomeGenerator;
use crate::common::types::RoundValue;
use crate::config::CoinFlipConfig;
use crate::errors::{GameMathError, GameMathResult};
use crate::games::types::{CoinSide, GameOptions, GameResult, GameType, Outcome, VerificationData};

pub struct CoinFlip;

/// Side the coin lands on
pub fn flip(value: f64) -> CoinSide {
    if value < 0.5 {
        CoinSide::Heads
    } else {
        CoinSide::Tails
    }
}

impl OutcomeGenerator for CoinFlip {
    type Config = CoinFlipConfig;
    const GAME: GameType = GameType::CoinFlip;

    fn generate(
        value: RoundValue,
        config: &CoinFlipConfig,
        options: &GameOptions,
    ) -> GameMathResult<GameResult> {
        let player_choice = match options.choice {
            None => CoinSide::Heads,
            Some(choice) => choice.coin_side().ok_or_else(|| {
                GameMathError::invalid_option(Self::GAME, "choice", "expected heads or tails")
            })?,
        };

        let side = flip(value.get());
        let win = side == player_choice;
        let payout = if win { config.payout_multiplier } else { 0.0 };

        Ok(GameResult {
            game: Self::GAME,
            value: value.get(),
            outcome: Outcome::CoinFlip { side, win },
            payout_multiplier: Some(payout),
            verification: VerificationData::CoinFlip {
                value: value.get(),
                side,
                player_choice,
                payout_multiplier: config.payout_multiplier,
                rtp: config.rtp,
            },
        })
    }
}
