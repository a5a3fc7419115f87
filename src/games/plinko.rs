//! Plinko: the value picks a bucket and the bucket's distance from the centre
//! picks the multiplier. There is no win/loss, the multiplier is the result.

use crate::common::traits::OutcomeGenerator;
use crate::common::types::RoundValue;
use crate::config::PlinkoConfig;
use crate::errors::GameMathResult;
use crate::games::types::{GameOptions, GameResult, GameType, Outcome, VerificationData};

pub struct Plinko;

/// Bucket hit for `value`, within `0..buckets`
pub fn bucket_index(value: f64, buckets: u32) -> u32 {
    ((value * buckets as f64).floor() as u32).min(buckets - 1)
}

/// Multiplier for a bucket: `clamp((0.5 + 2 * (1 - distance / max_distance)) * rtp, min, max)`
pub fn bucket_multiplier(bucket: u32, config: &PlinkoConfig) -> f64 {
    let center = (config.buckets - 1) as f64 / 2.0;
    let distance = (bucket as f64 - center).abs();
    let normalized = if center > 0.0 { distance / center } else { 0.0 };
    let curve = 0.5 + 2.0 * (1.0 - normalized);
    (curve * config.rtp).clamp(config.min_payout, config.max_payout)
}

impl OutcomeGenerator for Plinko {
    type Config = PlinkoConfig;
    const GAME: GameType = GameType::Plinko;

    fn generate(value: RoundValue, config: &PlinkoConfig, _options: &GameOptions) -> GameMathResult<GameResult> {
        let bucket = bucket_index(value.get(), config.buckets);
        let multiplier = bucket_multiplier(bucket, config);

        Ok(GameResult {
            game: Self::GAME,
            value: value.get(),
            outcome: Outcome::Plinko {
                bucket_index: bucket,
                multiplier,
            },
            payout_multiplier: Some(multiplier),
            verification: VerificationData::Plinko {
                value: value.get(),
                bucket_index: bucket,
                buckets: config.buckets,
                rows: config.rows,
                rtp: config.rtp,
                min_payout: config.min_payout,
                max_payout: config.max_payout,
            },
        })
    }
}
