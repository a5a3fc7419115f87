//! Hi-Lo: draw a card from the 13-rank cycle and compare it with the previous
//! card.
//!
//! Without a previous card the draw is a baseline that pays 1x and only sets
//! the next comparison point. Correct higher/lower guesses pay
//! `2 * rtp * payout_scale`, a correct same guess `4 * rtp * payout_scale`.

use crate::common::traits::OutcomeGenerator;
use crate::common::types::{scaled_index, RoundValue};
use crate::config::HiLoConfig;
use crate::errors::GameMathResult;
use crate::games::types::{Card, GameOptions, GameResult, GameType, HiLoGuess, Outcome, VerificationData};

const DIRECTIONAL_PAYOUT: f64 = 2.0;
const SAME_PAYOUT: f64 = 4.0;

pub struct HiLo;

/// Card drawn for `value`
pub fn draw_card(value: f64) -> Card {
    Card::from_cycle(scaled_index(value, Card::RANKS))
}

fn guess_correct(guess: HiLoGuess, card: Card, previous: Card) -> bool {
    match guess {
        HiLoGuess::Higher => card.rank() > previous.rank(),
        HiLoGuess::Lower => card.rank() < previous.rank(),
        HiLoGuess::Same => card.rank() == previous.rank(),
    }
}

impl OutcomeGenerator for HiLo {
    type Config = HiLoConfig;
    const GAME: GameType = GameType::HiLo;

    fn generate(value: RoundValue, config: &HiLoConfig, options: &GameOptions) -> GameMathResult<GameResult> {
        let guess = options.guess.unwrap_or(HiLoGuess::Higher);
        let card = draw_card(value.get());

        let (win, payout) = match options.previous_card {
            None => (false, 1.0),
            Some(previous) if guess_correct(guess, card, previous) => {
                let base = match guess {
                    HiLoGuess::Same => SAME_PAYOUT,
                    HiLoGuess::Higher | HiLoGuess::Lower => DIRECTIONAL_PAYOUT,
                };
                (true, base * config.rtp * config.payout_scale)
            }
            Some(_) => (false, 0.0),
        };

        Ok(GameResult {
            game: Self::GAME,
            value: value.get(),
            outcome: Outcome::HiLo {
                card,
                previous_card: options.previous_card,
                baseline: options.previous_card.is_none(),
                win,
            },
            payout_multiplier: Some(payout),
            verification: VerificationData::HiLo {
                value: value.get(),
                card,
                previous_card: options.previous_card,
                guess,
                rtp: config.rtp,
                payout_scale: config.payout_scale,
            },
        })
    }
}
