//! Game settings. Everything has a default matching the classic 9-hole,
//! 10-second round; the web adapter overrides `target_count` with whatever
//! the page actually contains.

use crate::error::GameError;
use crate::game::Difficulty;

pub const DEFAULT_DURATION_SECS: u32 = 10;
pub const DEFAULT_TARGET_COUNT: usize = 9;
pub const DEFAULT_TICK_MS: u32 = 1000;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Round length in countdown ticks.
    pub duration_secs: u32,
    pub target_count: usize,
    pub difficulty: Difficulty,
    /// Countdown period; one tick removes one second from the clock.
    pub tick_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            target_count: DEFAULT_TARGET_COUNT,
            difficulty: Difficulty::default(),
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

impl GameConfig {
    pub fn with_duration(mut self, secs: u32) -> Self {
        self.duration_secs = secs;
        self
    }

    pub fn with_targets(mut self, count: usize) -> Self {
        self.target_count = count;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_tick_ms(mut self, ms: u32) -> Self {
        self.tick_ms = ms;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.target_count < 2 {
            return Err(GameError::TooFewTargets { count: self.target_count });
        }
        if self.duration_secs == 0 {
            return Err(GameError::InvalidConfig("duration must be at least one second".into()));
        }
        if self.tick_ms == 0 {
            return Err(GameError::InvalidConfig("tick period must be positive".into()));
        }
        // browser timers take an i32 delay
        if i32::try_from(self.tick_ms).is_err() {
            return Err(GameError::InvalidConfig(format!(
                "tick period {}ms exceeds {}ms",
                self.tick_ms,
                i32::MAX
            )));
        }
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
