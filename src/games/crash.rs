//! Crash: inverse power-law crash point with an optional auto cash-out.
//!
//! `crash_point = clamp((1 - value)^(-1 / curve_exponent), min, max)` rounded
//! to two decimals. Low multipliers are common and high ones exponentially
//! rare; the exponent shapes the tail. Limbo reuses the same curve.

use crate::common::traits::OutcomeGenerator;
use crate::common::types::{round2, RoundValue};
use crate::config::CrashConfig;
use crate::errors::{GameMathError, GameMathResult};
use crate::games::types::{GameOptions, GameResult, GameType, Outcome, VerificationData};

/// Smallest tail probability fed to the curve, so `value` near 1 stays finite
const MIN_TAIL: f64 = 1e-10;

pub struct Crash;

/// Multiplier on the inverse power-law curve for `value`.
///
/// Non-decreasing in `value` and always within `[min_multiplier, max_multiplier]`.
pub fn curve_multiplier(value: f64, curve_exponent: f64, min_multiplier: f64, max_multiplier: f64) -> f64 {
    let tail = (1.0 - value).max(MIN_TAIL);
    let raw = tail.powf(-1.0 / curve_exponent);
    round2(raw.clamp(min_multiplier, max_multiplier)).clamp(min_multiplier, max_multiplier)
}

/// Reject multiplier targets below 1 or not finite
pub(crate) fn check_multiplier_option(game: GameType, option: &'static str, target: f64) -> GameMathResult<f64> {
    if !target.is_finite() || target < 1.0 {
        return Err(GameMathError::invalid_option(
            game,
            option,
            format!("{} must be a finite multiplier of at least 1", target),
        ));
    }
    Ok(target)
}

impl OutcomeGenerator for Crash {
    type Config = CrashConfig;
    const GAME: GameType = GameType::Crash;

    fn generate(value: RoundValue, config: &CrashConfig, options: &GameOptions) -> GameMathResult<GameResult> {
        let cash_out = options
            .cash_out_multiplier
            .map(|target| check_multiplier_option(Self::GAME, "cash_out_multiplier", target))
            .transpose()?;

        let crash_point = curve_multiplier(
            value.get(),
            config.curve_exponent,
            config.min_multiplier,
            config.max_multiplier,
        );

        let win = cash_out.map_or(false, |target| crash_point >= target);
        let payout = match cash_out {
            Some(target) if win => (target * config.rtp).min(config.max_multiplier * config.rtp),
            _ => 0.0,
        };

        Ok(GameResult {
            game: Self::GAME,
            value: value.get(),
            outcome: Outcome::Crash { crash_point, win },
            payout_multiplier: Some(payout),
            verification: VerificationData::Crash {
                value: value.get(),
                crash_point,
                curve_exponent: config.curve_exponent,
                cash_out_multiplier: cash_out,
                min_multiplier: config.min_multiplier,
                max_multiplier: config.max_multiplier,
                rtp: config.rtp,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(value: f64, cash_out: Option<f64>) -> GameMathResult<GameResult> {
        let options = GameOptions {
            cash_out_multiplier: cash_out,
            ..Default::default()
        };
        Crash::generate(RoundValue::new(value)?, &CrashConfig::default(), &options)
    }

    fn crash_point(result: &GameResult) -> f64 {
        match result.outcome {
            Outcome::Crash { crash_point, .. } => crash_point,
            _ => panic!("Expected crash outcome"),
        }
    }

    #[test]
    fn test_curve_values() {
        assert_eq!(curve_multiplier(0.0, 1.0, 1.0, 1000.0), 1.0);
        assert_eq!(curve_multiplier(0.5, 1.0, 1.0, 1000.0), 2.0);
        assert_eq!(curve_multiplier(0.75, 2.0, 1.0, 1000.0), 2.0);
        assert_eq!(curve_multiplier(0.999_999_999_9, 1.0, 1.0, 1000.0), 1000.0);
    }

    #[test]
    fn test_curve_is_monotonic() {
        let mut previous = 0.0;
        for i in 0..10_000 {
            let m = curve_multiplier(i as f64 / 10_000.0, 1.5, 1.0, 1000.0);
            assert!(m >= previous);
            previous = m;
        }
    }

    #[test]
    fn test_cash_out_win() {
        let result = play(0.6, Some(2.0)).unwrap();
        assert_eq!(crash_point(&result), 2.5);
        assert_eq!(result.win(), Some(true));
        assert!((result.payout_multiplier.unwrap() - 1.94).abs() < 1e-12);
    }

    #[test]
    fn test_crash_before_cash_out() {
        let result = play(0.3, Some(2.0)).unwrap();
        assert_eq!(crash_point(&result), 1.43);
        assert_eq!(result.win(), Some(false));
        assert_eq!(result.payout_multiplier, Some(0.0));
    }

    #[test]
    fn test_no_cash_out_pays_nothing() {
        let result = play(0.99, None).unwrap();
        assert_eq!(crash_point(&result), 100.0);
        assert_eq!(result.payout_multiplier, Some(0.0));
    }

    #[test]
    fn test_cash_out_payout_capped_at_max() {
        let options = GameOptions {
            cash_out_multiplier: Some(5000.0),
            ..Default::default()
        };
        let config = CrashConfig::default();
        let result = Crash::generate(RoundValue::new(0.999_999_9).unwrap(), &config, &options).unwrap();
        // crash point is capped at 1000, so a 5000x cash-out never triggers
        assert_eq!(result.payout_multiplier, Some(0.0));

        let config = CrashConfig {
            max_multiplier: 4.0,
            ..Default::default()
        };
        let options = GameOptions {
            cash_out_multiplier: Some(4.0),
            ..Default::default()
        };
        let result = Crash::generate(RoundValue::new(0.9).unwrap(), &config, &options).unwrap();
        assert!((result.payout_multiplier.unwrap() - 4.0 * 0.97).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_cash_out() {
        assert!(matches!(
            play(0.5, Some(0.5)),
            Err(GameMathError::InvalidOption { option: "cash_out_multiplier", .. })
        ));
        assert!(play(0.5, Some(f64::NAN)).is_err());
    }
}
