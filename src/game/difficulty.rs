use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::GameError;

pub const EASY_DELAY_MS: u32 = 1500;
pub const NORMAL_DELAY_MS: u32 = 1000;
/// Inclusive bounds of the random hard delay.
pub const HARD_DELAY_MS: (u32, u32) = (600, 1200);

/// How long a mole stays up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    Easy,
    Normal,
    #[default]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Delay in milliseconds before a raised mole drops again.
    pub fn delay_ms<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        match self {
            Difficulty::Easy => EASY_DELAY_MS,
            Difficulty::Normal => NORMAL_DELAY_MS,
            Difficulty::Hard => rng.gen_range(HARD_DELAY_MS.0..=HARD_DELAY_MS.1),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GameError::UnknownDifficulty(s.to_string()))
    }
}
