//! Engine-level behaviour through the public API

use gamemath::games::types::{Choice, DiceDirection, RouletteBet};
use gamemath::{
    simulate, ConfigBuilder, ConfigLoader, ConfigOverrides, GameMathError, GameOptions, GameProcessor,
    GameResult, GameType, Outcome, VerificationData,
};
use serde_json::json;
use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const TRIALS: u64 = 200_000;
const RTP_TOLERANCE: f64 = 0.01;

fn play(game: &str, value: f64, options: GameOptions) -> GameResult {
    GameProcessor::default()
        .run_game_math(game, value, None, &options)
        .expect("round should succeed")
        .expect("game should be known")
}

fn values(steps: usize) -> impl Iterator<Item = f64> {
    (0..steps).map(move |i| i as f64 / steps as f64)
}

fn overrides(value: serde_json::Value) -> ConfigOverrides {
    value.as_object().cloned().expect("object")
}

#[test]
fn dice_high_roll_over_fifty() {
    let result = play(
        "dice",
        0.999,
        GameOptions {
            choice: Some(Choice::Over),
            target: Some(50.0),
            ..Default::default()
        },
    );

    assert_eq!(result.outcome, Outcome::Dice { roll: 100, win: true, push: false });
    let payout = result.payout_multiplier.unwrap();
    assert!((payout - (1.0 / 0.4950495) * 0.96).abs() < 1e-3, "payout {}", payout);

    match result.verification {
        VerificationData::Dice { target, choice, win_chance, rtp, .. } => {
            assert_eq!(target, 50.0);
            assert_eq!(choice, DiceDirection::Over);
            assert!((win_chance - 50.0 / 101.0).abs() < 1e-12);
            assert_eq!(rtp, 0.96);
        }
        other => panic!("unexpected verification {:?}", other),
    }
}

#[test]
fn coin_flip_heads_wins_low_value() {
    let result = play(
        "coin_flip",
        0.2,
        GameOptions {
            choice: Some(Choice::Heads),
            ..Default::default()
        },
    );
    assert_eq!(result.win(), Some(true));
    assert_eq!(result.payout_multiplier, Some(1.96));
    assert!(matches!(
        result.outcome,
        Outcome::CoinFlip { side: gamemath::games::types::CoinSide::Heads, .. }
    ));
}

#[test]
fn roulette_red_on_one() {
    let result = play(
        "roulette",
        0.05,
        GameOptions {
            bet_type: Some(RouletteBet::Red),
            ..Default::default()
        },
    );
    assert_eq!(result.outcome, Outcome::Roulette { number: 1, is_red: true, win: true });
    assert!((result.payout_multiplier.unwrap() - 1.946).abs() < 1e-12);
}

#[test]
fn limbo_target_two_hit() {
    let result = play(
        "limbo",
        0.6,
        GameOptions {
            target_multiplier: Some(2.0),
            ..Default::default()
        },
    );
    match result.outcome {
        Outcome::Limbo { outcome_multiplier, win } => {
            assert!(outcome_multiplier >= 2.0);
            assert!(win);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!((result.payout_multiplier.unwrap() - 1.94).abs() < 1e-12);
}

#[test]
fn unknown_game_is_absent() {
    let processor = GameProcessor::default();
    let result = processor
        .run_game_math("poker", 0.5, None, &GameOptions::default())
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn rounds_are_deterministic() {
    let processor = GameProcessor::default();
    for game in GameType::ALL {
        for value in values(50) {
            let a = processor.play(game, value, None, &GameOptions::default()).unwrap();
            let b = processor.play(game, value, None, &GameOptions::default()).unwrap();
            assert_eq!(a, b);
            assert_eq!(a.fingerprint(), b.fingerprint());
        }
    }
}

#[test]
fn outcomes_stay_in_domain() {
    let processor = GameProcessor::default();
    let registry = processor.registry().config().clone();

    for value in values(5_000).chain([0.999_999_999_9]) {
        let options = GameOptions::default();

        match processor.play(GameType::Crash, value, None, &options).unwrap().outcome {
            Outcome::Crash { crash_point, .. } => {
                assert!(crash_point >= registry.crash.min_multiplier);
                assert!(crash_point <= registry.crash.max_multiplier);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        match processor.play(GameType::Limbo, value, None, &options).unwrap().outcome {
            Outcome::Limbo { outcome_multiplier, .. } => {
                assert!(outcome_multiplier >= registry.limbo.min_multiplier);
                assert!(outcome_multiplier <= registry.limbo.max_multiplier);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        match processor.play(GameType::Roulette, value, None, &options).unwrap().outcome {
            Outcome::Roulette { number, .. } => assert!(number < registry.roulette.pockets),
            other => panic!("unexpected outcome {:?}", other),
        }
        match processor.play(GameType::Dice, value, None, &options).unwrap().outcome {
            Outcome::Dice { roll, .. } => {
                assert!(roll >= registry.dice.min_roll && roll <= registry.dice.max_roll)
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        match processor.play(GameType::Plinko, value, None, &options).unwrap().outcome {
            Outcome::Plinko { bucket_index, .. } => assert!(bucket_index < registry.plinko.buckets),
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}

#[test]
fn crash_and_limbo_are_monotonic() {
    let processor = GameProcessor::default();
    let mut last_crash = 0.0;
    let mut last_limbo = 0.0;

    for value in values(20_000) {
        let crash = match processor.play(GameType::Crash, value, None, &GameOptions::default()).unwrap().outcome {
            Outcome::Crash { crash_point, .. } => crash_point,
            other => panic!("unexpected outcome {:?}", other),
        };
        let limbo = match processor.play(GameType::Limbo, value, None, &GameOptions::default()).unwrap().outcome {
            Outcome::Limbo { outcome_multiplier, .. } => outcome_multiplier,
            other => panic!("unexpected outcome {:?}", other),
        };
        assert!(crash >= last_crash, "crash dropped at {}", value);
        assert!(limbo >= last_limbo, "limbo dropped at {}", value);
        last_crash = crash;
        last_limbo = limbo;
    }
}

#[test]
fn payouts_are_never_negative() {
    let processor = GameProcessor::default();
    let option_sets = [
        GameOptions::default(),
        GameOptions {
            choice: Some(Choice::Under),
            target: Some(3.0),
            ..Default::default()
        },
        GameOptions {
            cash_out_multiplier: Some(1.5),
            target_multiplier: Some(50.0),
            bet_type: Some(RouletteBet::Number),
            number_bet: Some(17),
            ..Default::default()
        },
    ];

    for game in GameType::ALL {
        for options in &option_sets {
            for value in values(1_000) {
                let result = match processor.play(game, value, None, options) {
                    Ok(result) => result,
                    // option set not meant for this game
                    Err(GameMathError::InvalidOption { .. }) => break,
                    Err(e) => panic!("{} failed: {}", game, e),
                };
                if let Some(payout) = result.payout_multiplier {
                    assert!(payout >= 0.0, "{} paid {} at {}", game, payout, value);
                    if result.win() == Some(false) && !result.is_push() {
                        assert_eq!(payout, 0.0, "{} loss paid {}", game, payout);
                    }
                }
            }
        }
    }
}

fn observed_rtp(game: GameType, options: GameOptions) -> (f64, f64) {
    let processor = GameProcessor::default();
    let report = simulate(&processor, game, None, &options, TRIALS, 2024).unwrap();
    (report.observed_rtp, report.configured_rtp)
}

#[test]
fn dice_rtp_converges() {
    let (observed, configured) = observed_rtp(
        GameType::Dice,
        GameOptions {
            choice: Some(Choice::Over),
            target: Some(50.0),
            ..Default::default()
        },
    );
    assert!((observed - configured).abs() < RTP_TOLERANCE, "observed {}", observed);
}

#[test]
fn dice_fractional_target_rtp_converges() {
    // rarer wins pay more, so the sample spread grows as the chance shrinks
    for (choice, target, tolerance) in [
        (Choice::Over, 50.5, RTP_TOLERANCE),
        (Choice::Under, 10.5, 0.025),
        (Choice::Under, 0.5, 0.15),
    ] {
        let options = GameOptions {
            choice: Some(choice),
            target: Some(target),
            ..Default::default()
        };
        let (observed, configured) = observed_rtp(GameType::Dice, options);
        assert!(
            (observed - configured).abs() < tolerance,
            "{:?} {}: observed {}",
            choice,
            target,
            observed
        );
    }
}

#[test]
fn coin_flip_rtp_converges() {
    let (observed, configured) = observed_rtp(
        GameType::CoinFlip,
        GameOptions {
            choice: Some(Choice::Tails),
            ..Default::default()
        },
    );
    assert!((observed - configured).abs() < RTP_TOLERANCE, "observed {}", observed);
}

#[test]
fn crash_fixed_cash_out_rtp_converges() {
    let (observed, configured) = observed_rtp(
        GameType::Crash,
        GameOptions {
            cash_out_multiplier: Some(2.0),
            ..Default::default()
        },
    );
    assert!((observed - configured).abs() < RTP_TOLERANCE, "observed {}", observed);
}

#[test]
fn roulette_rtp_converges() {
    let (observed, configured) = observed_rtp(
        GameType::Roulette,
        GameOptions {
            bet_type: Some(RouletteBet::Red),
            ..Default::default()
        },
    );
    // the zero pocket takes its share on top of the configured rtp
    let expected = configured * 36.0 / 37.0;
    assert!((observed - expected).abs() < RTP_TOLERANCE, "observed {}", observed);
}

#[test]
fn mines_draws_are_valid() {
    let processor = GameProcessor::default();
    let small_board = overrides(json!({ "total_tiles": 16, "mine_count": 10 }));

    for value in values(2_000) {
        for layout in [None, Some(&small_board)] {
            let result = processor.play(GameType::Mines, value, layout, &GameOptions::default()).unwrap();
            assert_eq!(result.payout_multiplier, None);
            match result.verification {
                VerificationData::Mines { mine_indices, total_tiles, mine_count, .. } => {
                    assert_eq!(mine_indices.len(), mine_count as usize);
                    let distinct: HashSet<_> = mine_indices.iter().collect();
                    assert_eq!(distinct.len(), mine_indices.len());
                    assert!(mine_indices.iter().all(|&m| m < total_tiles));
                }
                other => panic!("unexpected verification {:?}", other),
            }
        }
    }
}

#[test]
fn overrides_do_not_touch_base_config() {
    let registry = Arc::new(ConfigBuilder::new().build_registry().unwrap());
    let processor = GameProcessor::new(registry.clone());
    let before = registry.config().clone();

    let tweak = overrides(json!({ "rtp": 0.5, "max_roll": 10 }));
    let options = GameOptions {
        target: Some(5.0),
        ..Default::default()
    };
    let result = processor.play(GameType::Dice, 0.99, Some(&tweak), &options).unwrap();
    assert_eq!(result.outcome, Outcome::Dice { roll: 10, win: true, push: false });

    assert_eq!(registry.config(), &before);
    assert_eq!(registry.get_config(GameType::Dice).rtp(), 0.96);
}

#[test]
fn invalid_inputs_are_reported() {
    let processor = GameProcessor::default();

    assert!(matches!(
        processor.run_game_math("dice", 1.0, None, &GameOptions::default()),
        Err(GameMathError::InvalidInput { .. })
    ));

    let options = GameOptions {
        target: Some(150.0),
        ..Default::default()
    };
    assert!(matches!(
        processor.run_game_math("dice", 0.5, None, &options),
        Err(GameMathError::InvalidOption { option: "target", .. })
    ));

    let options = GameOptions {
        target_multiplier: Some(0.5),
        ..Default::default()
    };
    assert!(matches!(
        processor.run_game_math("limbo", 0.5, None, &options),
        Err(GameMathError::InvalidOption { option: "target_multiplier", .. })
    ));

    let bad_override = overrides(json!({ "rtp": 2.0 }));
    assert!(matches!(
        processor.run_game_math("plinko", 0.5, Some(&bad_override), &GameOptions::default()),
        Err(GameMathError::Configuration(_))
    ));
}

#[test]
fn extreme_roll_ranges_are_rejected() {
    let processor = GameProcessor::default();
    let options = GameOptions {
        target: Some(1.0),
        ..Default::default()
    };

    for tweak in [
        json!({ "min_roll": 0, "max_roll": i64::MAX }),
        json!({ "min_roll": i64::MIN, "max_roll": 0 }),
        json!({ "min_roll": i64::MIN, "max_roll": i64::MAX }),
    ] {
        let tweak = overrides(tweak);
        assert!(matches!(
            processor.run_game_math("dice", 0.5, Some(&tweak), &options),
            Err(GameMathError::Configuration(_))
        ));
    }
}

#[test]
fn oversized_layouts_are_rejected() {
    let processor = GameProcessor::default();
    let huge_board = overrides(json!({ "total_tiles": u32::MAX, "mine_count": 1 }));
    assert!(matches!(
        processor.play(GameType::Mines, 0.5, Some(&huge_board), &GameOptions::default()),
        Err(GameMathError::Configuration(_))
    ));

    let endless_reels = overrides(json!({ "reels": u32::MAX }));
    assert!(matches!(
        processor.play(GameType::Slots, 0.5, Some(&endless_reels), &GameOptions::default()),
        Err(GameMathError::Configuration(_))
    ));
}

#[test]
fn non_finite_config_file_values_are_rejected() {
    for body in [
        "[plinko]\nmax_payout = nan",
        "[plinko]\nmin_payout = nan",
        "[dice]\nmax_payout = inf",
        "[limbo]\ncurve_exponent = nan",
        "[hi_lo]\npayout_scale = -inf",
        "[coin_flip]\nrtp = nan",
        "[slots]\nweights = [1e308, 1e308, 1.0, 1.0, 1.0, 1.0]",
    ] {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", body).unwrap();
        assert!(
            matches!(
                ConfigLoader::new().with_path(file.path()).load_registry(),
                Err(GameMathError::Configuration(_))
            ),
            "accepted {}",
            body
        );
    }
}

#[test]
fn recorded_rounds_verify() {
    let processor = GameProcessor::default();
    let options = GameOptions {
        symbols: Some(vec!["a".into(), "b".into()]),
        weights: Some(vec![1.0, 1.0]),
        ..Default::default()
    };
    let result = processor.play(GameType::Slots, 0.31, None, &options).unwrap();
    assert!(processor.verify(&result, None, &options));
    assert_eq!(result.fingerprint().len(), 64);

    // a round replayed under a different config does not verify
    let cheaper = overrides(json!({ "rtp": 0.5 }));
    assert!(!processor.verify(&result, Some(&cheaper), &options));
}
