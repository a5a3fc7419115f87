//! Roulette: single spin with straight-up, red and black bets.
//!
//! Bet types:
//! number = straight-up on `number_bet`, pays 36x
//! red    = pays 2x on a red pocket
//! black  = pays 2x on a pocket that is neither red nor zero (default)
//!
//! Every multiplier is scaled by RTP.

use crate::common::traits::OutcomeGenerator;
use crate::common::types::{scaled_index, RoundValue};
use crate::config::RouletteConfig;
use crate::errors::{GameMathError, GameMathResult};
use crate::games::types::{GameOptions, GameResult, GameType, Outcome, RouletteBet, VerificationData};

/// Red numbers on a roulette wheel.
const RED_NUMBERS: [u32; 18] = [1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36];

const STRAIGHT_PAYOUT: f64 = 36.0;
const EVEN_MONEY_PAYOUT: f64 = 2.0;

pub struct Roulette;

/// Check if a number is red.
pub fn is_red(number: u32) -> bool {
    RED_NUMBERS.contains(&number)
}

/// Check if a bet wins for a given result.
fn bet_wins(bet_type: RouletteBet, bet_number: u32, result: u32) -> bool {
    match bet_type {
        RouletteBet::Number => bet_number == result,
        RouletteBet::Red => is_red(result),
        RouletteBet::Black => !is_red(result) && result != 0,
    }
}

/// Gross payout multiplier before RTP
fn base_payout(bet_type: RouletteBet) -> f64 {
    match bet_type {
        RouletteBet::Number => STRAIGHT_PAYOUT,
        RouletteBet::Red | RouletteBet::Black => EVEN_MONEY_PAYOUT,
    }
}

impl OutcomeGenerator for Roulette {
    type Config = RouletteConfig;
    const GAME: GameType = GameType::Roulette;

    fn generate(value: RoundValue, config: &RouletteConfig, options: &GameOptions) -> GameMathResult<GameResult> {
        let bet_type = options.bet_type.unwrap_or(RouletteBet::Black);

        let number_bet = match bet_type {
            RouletteBet::Number => {
                let number = options.number_bet.unwrap_or(0);
                if number >= config.pockets {
                    return Err(GameMathError::invalid_option(
                        Self::GAME,
                        "number_bet",
                        format!("{} is not a pocket on a {}-pocket wheel", number, config.pockets),
                    ));
                }
                Some(number)
            }
            _ => None,
        };

        let number = scaled_index(value.get(), config.pockets as usize) as u32;
        let red = is_red(number);
        let win = bet_wins(bet_type, number_bet.unwrap_or(0), number);
        let payout = if win {
            base_payout(bet_type) * config.rtp
        } else {
            0.0
        };

        Ok(GameResult {
            game: Self::GAME,
            value: value.get(),
            outcome: Outcome::Roulette {
                number,
                is_red: red,
                win,
            },
            payout_multiplier: Some(payout),
            verification: VerificationData::Roulette {
                value: value.get(),
                number,
                pockets: config.pockets,
                bet_type,
                number_bet,
                rtp: config.rtp,
            },
        })
    }
}
