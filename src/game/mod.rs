//! Whack-a-mole game loop.
//!
//! [`GameController`] owns the whole session: score, countdown, the hole
//! chooser and the single pending hide callback. It never touches the browser
//! directly; every side effect goes through a [`Platform`], and the platform
//! calls back into [`GameController::tick`] and
//! [`GameController::hide_elapsed`] when its timers fire.
//!
//! One round looks like this:
//!
//! ```text
//! start_game ─▶ raise hole ─(delay)─▶ hide ─▶ raise hole ─(delay)─▶ hide ─▶ … ─▶ stop_game
//!      └─▶ countdown: 10 ─(1s)─▶ 9 ─(1s)─▶ … ─▶ 0
//! ```
//!
//! The cycle checks the clock each time a mole drops, so the round ends on
//! the first hide after the countdown reached zero.

use log::{debug, info, warn};
use rand::Rng;

mod config;
mod difficulty;
mod holes;
mod platform;

pub use config::{DEFAULT_DURATION_SECS, DEFAULT_TARGET_COUNT, DEFAULT_TICK_MS, GameConfig};
pub use difficulty::{Difficulty, EASY_DELAY_MS, HARD_DELAY_MS, NORMAL_DELAY_MS};
pub use holes::HoleChooser;
pub use platform::{Platform, TimerHandle, Track};

use crate::error::GameError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Phase {
    /// No round has been started yet.
    #[default]
    Idle,
    Running,
    Stopped,
}

/// Read-only copy of the session state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub phase: Phase,
    pub points: u32,
    pub remaining_time: u32,
    pub difficulty: Difficulty,
    /// Hole whose mole is currently up.
    pub raised: Option<usize>,
    pub last_target: Option<usize>,
}

#[derive(Clone, Copy, Debug)]
struct PendingHide {
    handle: TimerHandle,
    cycle: u64,
}

#[derive(Debug, Default)]
struct GameState {
    phase: Phase,
    remaining_time: u32,
    points: u32,
    difficulty: Difficulty,
    countdown: Option<TimerHandle>,
    pending: Option<PendingHide>,
    raised: Option<usize>,
}

pub struct GameController<P: Platform, R: Rng> {
    config: GameConfig,
    platform: P,
    rng: R,
    state: GameState,
    holes: HoleChooser,
    input_bound: bool,
    cycles: u64,
}

impl<P: Platform, R: Rng> GameController<P, R> {
    pub fn new(config: GameConfig, platform: P, rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let state = GameState {
            difficulty: config.difficulty,
            ..GameState::default()
        };
        Ok(Self {
            config,
            platform,
            rng,
            state,
            holes: HoleChooser::new(),
            input_bound: false,
            cycles: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.state.phase,
            points: self.state.points,
            remaining_time: self.state.remaining_time,
            difficulty: self.state.difficulty,
            raised: self.state.raised,
            last_target: self.holes.last(),
        }
    }

    pub fn points(&self) -> u32 {
        self.state.points
    }

    pub fn remaining_time(&self) -> u32 {
        self.state.remaining_time
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == Phase::Running
    }

    /// Takes effect from the next raised mole.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.state.difficulty = difficulty;
    }

    /// Replace the settings. Any round in progress is stopped first.
    pub fn reconfigure(&mut self, config: GameConfig) -> Result<(), GameError> {
        config.validate()?;
        if self.input_bound && config.target_count != self.config.target_count {
            return Err(GameError::InvalidConfig(
                "target count cannot change once input is bound".into(),
            ));
        }
        self.stop_game();
        self.state.difficulty = config.difficulty;
        self.config = config;
        Ok(())
    }

    // --- Orchestration ------------------------------------------------------

    /// Start a fresh round, abandoning any round in progress.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        self.reset_score();
        self.stop_game();
        if let Err(err) = self.launch() {
            self.stop_game();
            return Err(err);
        }
        info!(
            "game started: {}s on {} holes, difficulty {}",
            self.config.duration_secs, self.config.target_count, self.state.difficulty
        );
        Ok(())
    }

    fn launch(&mut self) -> Result<(), GameError> {
        self.set_duration(self.config.duration_secs);
        self.bind_input()?;
        self.start_timer()?;
        self.state.phase = Phase::Running;
        self.advance()?;
        self.platform.play_from_start(Track::Music);
        Ok(())
    }

    /// Cancel both timers, drop any raised mole and silence the music.
    pub fn stop_game(&mut self) {
        if let Some(handle) = self.state.countdown.take() {
            self.platform.stop_countdown(handle);
        }
        if let Some(pending) = self.state.pending.take() {
            self.platform.cancel_hide(pending.handle);
        }
        if let Some(target) = self.state.raised.take() {
            self.platform.set_target_visible(target, false);
        }
        self.platform.halt(Track::Music);
        if self.state.phase == Phase::Running {
            self.state.phase = Phase::Stopped;
        }
    }

    // --- Show / hide cycle --------------------------------------------------

    /// Raise the next mole, or end the round once the clock shows zero.
    pub fn advance(&mut self) -> Result<(), GameError> {
        if self.state.phase != Phase::Running {
            return Ok(());
        }
        if self.state.remaining_time > 0 {
            self.show_up()
        } else {
            self.stop_game();
            info!("game over with {} points", self.state.points);
            Ok(())
        }
    }

    fn show_up(&mut self) -> Result<(), GameError> {
        let delay = self.state.difficulty.delay_ms(&mut self.rng);
        let target = self.holes.choose(&mut self.rng, self.config.target_count)?;
        self.show_and_hide(target, delay)
    }

    fn show_and_hide(&mut self, target: usize, delay_ms: u32) -> Result<(), GameError> {
        self.platform.set_target_visible(target, true);
        self.state.raised = Some(target);
        self.cycles += 1;
        let cycle = self.cycles;
        let handle = self.platform.schedule_hide(delay_ms, cycle)?;
        self.state.pending = Some(PendingHide { handle, cycle });
        debug!("cycle {cycle}: hole {target} up for {delay_ms}ms");
        Ok(())
    }

    /// Hide callback. Anything but the currently pending cycle is ignored.
    pub fn hide_elapsed(&mut self, cycle: u64) -> Result<(), GameError> {
        match self.state.pending {
            Some(pending) if pending.cycle == cycle => {
                self.state.pending = None;
                if let Some(target) = self.state.raised.take() {
                    self.platform.set_target_visible(target, false);
                }
                self.advance()
            }
            _ => {
                warn!("ignoring stale hide callback for cycle {cycle}");
                Ok(())
            }
        }
    }

    // --- Countdown ----------------------------------------------------------

    pub fn set_duration(&mut self, secs: u32) -> u32 {
        self.state.remaining_time = secs;
        self.platform.render_time(secs);
        secs
    }

    fn start_timer(&mut self) -> Result<(), GameError> {
        let handle = self.platform.start_countdown(self.config.tick_ms)?;
        self.state.countdown = Some(handle);
        Ok(())
    }

    /// Countdown callback: one second off the clock, never below zero.
    pub fn tick(&mut self) -> u32 {
        if self.state.phase == Phase::Running && self.state.remaining_time > 0 {
            self.state.remaining_time -= 1;
            self.platform.render_time(self.state.remaining_time);
        }
        self.state.remaining_time
    }

    // --- Score & input ------------------------------------------------------

    pub fn increment_score(&mut self) -> u32 {
        self.state.points += 1;
        self.platform.render_score(self.state.points);
        self.state.points
    }

    pub fn reset_score(&mut self) -> u32 {
        self.state.points = 0;
        self.platform.render_score(0);
        0
    }

    /// Click handler for the mole in `target`.
    pub fn whack(&mut self, target: usize) -> Result<u32, GameError> {
        let count = self.config.target_count;
        if target >= count {
            return Err(GameError::NoSuchTarget { target, count });
        }
        self.platform.play_from_start(Track::Hit);
        let points = self.increment_score();
        debug!("hit hole {target}, {points} points");
        Ok(points)
    }

    /// Attach the click handlers, once per controller.
    pub fn bind_input(&mut self) -> Result<(), GameError> {
        if !self.input_bound {
            self.platform.bind_targets(self.config.target_count)?;
            self.input_bound = true;
        }
        Ok(())
    }
}
