//! Shared game types: identifiers, player options, outcomes and the
//! verification records an auditor replays.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// Supported game types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    CoinFlip,
    Dice,
    Crash,
    Limbo,
    Plinko,
    Mines,
    Roulette,
    HiLo,
    Slots,
}

impl GameType {
    /// Every supported game, in registry order
    pub const ALL: [GameType; 9] = [
        GameType::CoinFlip,
        GameType::Dice,
        GameType::Crash,
        GameType::Limbo,
        GameType::Plinko,
        GameType::Mines,
        GameType::Roulette,
        GameType::HiLo,
        GameType::Slots,
    ];

    /// Stable string identifier
    pub fn id(self) -> &'static str {
        match self {
            GameType::CoinFlip => "coin_flip",
            GameType::Dice => "dice",
            GameType::Crash => "crash",
            GameType::Limbo => "limbo",
            GameType::Plinko => "plinko",
            GameType::Mines => "mines",
            GameType::Roulette => "roulette",
            GameType::HiLo => "hi_lo",
            GameType::Slots => "slots",
        }
    }

    /// Look up a game by identifier; `None` for anything unsupported
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|game| game.id() == id)
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Player choice for coin flip (`heads`/`tails`) and dice (`over`/`under`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Heads,
    Tails,
    Over,
    Under,
}

impl Choice {
    pub fn coin_side(self) -> Option<CoinSide> {
        match self {
            Choice::Heads => Some(CoinSide::Heads),
            Choice::Tails => Some(CoinSide::Tails),
            _ => None,
        }
    }

    pub fn dice_direction(self) -> Option<DiceDirection> {
        match self {
            Choice::Over => Some(DiceDirection::Over),
            Choice::Under => Some(DiceDirection::Under),
            _ => None,
        }
    }
}

/// Coin flip result (what the coin landed on)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CoinSide {
    Heads,
    Tails,
}

impl fmt::Display for CoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinSide::Heads => write!(f, "heads"),
            CoinSide::Tails => write!(f, "tails"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiceDirection {
    Over,
    Under,
}

/// Roulette bet types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RouletteBet {
    /// Straight-up bet on `number_bet`
    Number,
    Red,
    Black,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HiLoGuess {
    Higher,
    Lower,
    Same,
}

/// Card rank in the 13-card cycle `A, 2, ..., 10, J, Q, K`
///
/// Serialized as its label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Card(u8);

impl Card {
    pub const RANKS: usize = 13;
    const LABELS: [&'static str; 13] = [
        "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
    ];

    /// Card from a rank in `0..13`
    pub fn from_rank(rank: u8) -> Option<Self> {
        ((rank as usize) < Self::RANKS).then_some(Self(rank))
    }

    /// Card at position `index` of the cycle, wrapping past `K`
    pub fn from_cycle(index: usize) -> Self {
        Self((index % Self::RANKS) as u8)
    }

    pub fn rank(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        Self::LABELS[self.0 as usize]
    }
}

impl TryFrom<String> for Card {
    type Error = String;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Self::LABELS
            .iter()
            .position(|l| l.eq_ignore_ascii_case(&label))
            .map(|rank| Card(rank as u8))
            .ok_or_else(|| format!("unknown card '{}'", label))
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.label().to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-round player choices. Absent fields take each game's default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameOptions {
    /// Coin side (coin flip) or direction (dice)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<Choice>,
    /// Dice target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    /// Crash auto cash-out point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_out_multiplier: Option<f64>,
    /// Limbo target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bet_type: Option<RouletteBet>,
    /// Pocket for a roulette `number` bet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_bet: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guess: Option<HiLoGuess>,
    /// Hi-lo comparison card; absent means a baseline draw
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_card: Option<Card>,
    /// Slots symbol table for this round (requires `weights`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbols: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,
}

/// Game-specific outcome of a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum Outcome {
    CoinFlip {
        side: CoinSide,
        win: bool,
    },
    Dice {
        roll: i64,
        win: bool,
        push: bool,
    },
    Crash {
        crash_point: f64,
        win: bool,
    },
    Limbo {
        outcome_multiplier: f64,
        win: bool,
    },
    Plinko {
        bucket_index: u32,
        multiplier: f64,
    },
    Mines {
        mine_indices: Vec<u32>,
    },
    Roulette {
        number: u32,
        is_red: bool,
        win: bool,
    },
    HiLo {
        card: Card,
        #[serde(skip_serializing_if = "Option::is_none")]
        previous_card: Option<Card>,
        /// No previous card: this draw only sets the comparison point
        baseline: bool,
        win: bool,
    },
    Slots {
        symbols: Vec<String>,
        win: bool,
    },
}

/// Everything an auditor needs to recompute a round from its value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum VerificationData {
    CoinFlip {
        value: f64,
        side: CoinSide,
        player_choice: CoinSide,
        payout_multiplier: f64,
        rtp: f64,
    },
    Dice {
        value: f64,
        roll: i64,
        target: f64,
        choice: DiceDirection,
        win_chance: f64,
        rtp: f64,
        min_roll: i64,
        max_roll: i64,
        max_payout: f64,
    },
    Crash {
        value: f64,
        crash_point: f64,
        curve_exponent: f64,
        cash_out_multiplier: Option<f64>,
        min_multiplier: f64,
        max_multiplier: f64,
        rtp: f64,
    },
    Limbo {
        value: f64,
        outcome_multiplier: f64,
        target_multiplier: f64,
        curve_exponent: f64,
        min_multiplier: f64,
        max_multiplier: f64,
        rtp: f64,
    },
    Plinko {
        value: f64,
        bucket_index: u32,
        buckets: u32,
        rows: u32,
        rtp: f64,
        min_payout: f64,
        max_payout: f64,
    },
    Mines {
        value: f64,
        mine_indices: Vec<u32>,
        total_tiles: u32,
        mine_count: u32,
        rtp: f64,
    },
    Roulette {
        value: f64,
        number: u32,
        pockets: u32,
        bet_type: RouletteBet,
        number_bet: Option<u32>,
        rtp: f64,
    },
    HiLo {
        value: f64,
        card: Card,
        previous_card: Option<Card>,
        guess: HiLoGuess,
        rtp: f64,
        payout_scale: f64,
    },
    Slots {
        value: f64,
        /// Symbol landed on each reel
        reels: Vec<String>,
        /// Derived value used for each reel
        reel_values: Vec<f64>,
        rtp: f64,
        symbols: Vec<String>,
        weights: Vec<f64>,
        paytable: BTreeMap<String, f64>,
    },
}

/// Result of one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub game: GameType,
    pub value: f64,
    pub outcome: Outcome,
    /// `None` when the payout is settled outside the engine (mines)
    pub payout_multiplier: Option<f64>,
    pub verification: VerificationData,
}

impl GameResult {
    /// Binary outcome, if the game has one for this round
    pub fn win(&self) -> Option<bool> {
        match &self.outcome {
            Outcome::CoinFlip { win, .. }
            | Outcome::Dice { win, .. }
            | Outcome::Crash { win, .. }
            | Outcome::Limbo { win, .. }
            | Outcome::Roulette { win, .. }
            | Outcome::Slots { win, .. } => Some(*win),
            Outcome::HiLo { baseline, win, .. } => (!baseline).then_some(*win),
            Outcome::Plinko { .. } | Outcome::Mines { .. } => None,
        }
    }

    /// Dice roll landing exactly on the target
    pub fn is_push(&self) -> bool {
        matches!(self.outcome, Outcome::Dice { push: true, .. })
    }

    /// Contribution of this round to long-run RTP: the payout on a win,
    /// the multiplier itself for plinko, zero otherwise.
    pub fn rtp_contribution(&self) -> f64 {
        match (&self.outcome, self.payout_multiplier) {
            (Outcome::Plinko { .. }, Some(payout)) => payout,
            (_, Some(payout)) if self.win() == Some(true) => payout,
            _ => 0.0,
        }
    }

    /// Hex SHA-256 of the canonical JSON verification record
    pub fn fingerprint(&self) -> String {
        let canonical = serde_json::to_vec(&self.verification).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_type_ids() {
        for game in GameType::ALL {
            assert_eq!(GameType::from_id(game.id()), Some(game));
            let json = serde_json::to_string(&game).unwrap();
            assert_eq!(json, format!("\"{}\"", game.id()));
        }
        assert_eq!(GameType::from_id("poker"), None);
        assert_eq!(GameType::HiLo.to_string(), "hi_lo");
    }

    #[test]
    fn test_card_labels() {
        assert_eq!(Card::from_rank(0).unwrap().label(), "A");
        assert_eq!(Card::from_rank(12).unwrap().label(), "K");
        assert!(Card::from_rank(13).is_none());

        let card: Card = serde_json::from_str("\"q\"").unwrap();
        assert_eq!(card.rank(), 11);
        assert_eq!(serde_json::to_string(&card).unwrap(), "\"Q\"");
        assert!(serde_json::from_str::<Card>("\"Z\"").is_err());
    }

    #[test]
    fn test_options_deserialize() {
        let options: GameOptions = serde_json::from_str(
            r#"{ "choice": "over", "target": 50, "previous_card": "7", "guess": "same" }"#,
        )
        .unwrap();
        assert_eq!(options.choice, Some(Choice::Over));
        assert_eq!(options.target, Some(50.0));
        assert_eq!(options.previous_card.map(Card::rank), Some(6));
        assert_eq!(options.guess, Some(HiLoGuess::Same));

        assert!(serde_json::from_str::<GameOptions>(r#"{ "colour": "red" }"#).is_err());
    }

    #[test]
    fn test_choice_mapping() {
        assert_eq!(Choice::Heads.coin_side(), Some(CoinSide::Heads));
        assert_eq!(Choice::Heads.dice_direction(), None);
        assert_eq!(Choice::Under.dice_direction(), Some(DiceDirection::Under));
    }
}
