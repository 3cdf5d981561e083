// Shared test harness: a Platform that records everything and a virtual clock
// that fires its timers in due order.
#![allow(dead_code)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use whack_a_mole::game::{GameConfig, GameController, Platform, TimerHandle, Track};
use whack_a_mole::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fire {
    Tick,
    Hide(u64),
}

#[derive(Debug)]
struct FakeTimer {
    id: i32,
    due: u64,
    period: Option<u64>,
    fire: Fire,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FakeAudio {
    pub playing: bool,
    /// Playback position is still zero.
    pub at_start: bool,
    pub plays: usize,
}

#[derive(Debug)]
pub struct FakePlatform {
    pub now: u64,
    next_id: i32,
    timers: Vec<FakeTimer>,
    pub visible: Vec<bool>,
    pub toggles: usize,
    /// Holes in the order they were raised.
    pub raised: Vec<usize>,
    pub delays: Vec<u32>,
    pub max_visible: usize,
    pub score_text: String,
    pub time_text: String,
    pub music: FakeAudio,
    pub hit: FakeAudio,
    pub binds: usize,
}

impl FakePlatform {
    pub fn new(targets: usize) -> Self {
        Self {
            now: 0,
            next_id: 0,
            timers: Vec::new(),
            visible: vec![false; targets],
            toggles: 0,
            raised: Vec::new(),
            delays: Vec::new(),
            max_visible: 0,
            score_text: String::new(),
            time_text: String::new(),
            music: FakeAudio { at_start: true, ..FakeAudio::default() },
            hit: FakeAudio { at_start: true, ..FakeAudio::default() },
            binds: 0,
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_hides(&self) -> Vec<u64> {
        self.timers
            .iter()
            .filter_map(|t| match t.fire {
                Fire::Hide(cycle) => Some(cycle),
                Fire::Tick => None,
            })
            .collect()
    }

    pub fn countdowns(&self) -> usize {
        self.timers.iter().filter(|t| t.fire == Fire::Tick).count()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    fn audio(&mut self, track: Track) -> &mut FakeAudio {
        match track {
            Track::Music => &mut self.music,
            Track::Hit => &mut self.hit,
        }
    }

    fn add_timer(&mut self, delay: u64, period: Option<u64>, fire: Fire) -> TimerHandle {
        self.next_id += 1;
        self.timers.push(FakeTimer { id: self.next_id, due: self.now + delay, period, fire });
        TimerHandle(self.next_id)
    }

    fn remove_timer(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.id != handle.0);
    }

    /// Pop the next timer due at or before `end`, rescheduling intervals.
    fn next_due(&mut self, end: u64) -> Option<Fire> {
        let pos = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= end)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i)?;
        let due = self.timers[pos].due;
        self.now = due;
        let fire = self.timers[pos].fire;
        match self.timers[pos].period {
            Some(period) => self.timers[pos].due += period,
            None => {
                self.timers.remove(pos);
            }
        }
        Some(fire)
    }

    fn elapse(&mut self, ms: u64) {
        if ms > 0 {
            for audio in [&mut self.music, &mut self.hit] {
                if audio.playing {
                    audio.at_start = false;
                }
            }
        }
    }
}

impl Platform for FakePlatform {
    fn set_target_visible(&mut self, target: usize, visible: bool) {
        if self.visible[target] != visible {
            self.toggles += 1;
        }
        self.visible[target] = visible;
        if visible {
            self.raised.push(target);
        }
        self.max_visible = self.max_visible.max(self.visible_count());
    }

    fn render_score(&mut self, points: u32) {
        self.score_text = points.to_string();
    }

    fn render_time(&mut self, remaining_secs: u32) {
        self.time_text = remaining_secs.to_string();
    }

    fn play_from_start(&mut self, track: Track) {
        let audio = self.audio(track);
        audio.playing = true;
        audio.at_start = true;
        audio.plays += 1;
    }

    fn halt(&mut self, track: Track) {
        let audio = self.audio(track);
        audio.playing = false;
        audio.at_start = true;
    }

    fn start_countdown(&mut self, period_ms: u32) -> Result<TimerHandle, GameError> {
        let period = u64::from(period_ms);
        Ok(self.add_timer(period, Some(period), Fire::Tick))
    }

    fn stop_countdown(&mut self, handle: TimerHandle) {
        self.remove_timer(handle);
    }

    fn schedule_hide(&mut self, delay_ms: u32, cycle: u64) -> Result<TimerHandle, GameError> {
        self.delays.push(delay_ms);
        Ok(self.add_timer(u64::from(delay_ms), None, Fire::Hide(cycle)))
    }

    fn cancel_hide(&mut self, handle: TimerHandle) {
        self.remove_timer(handle);
    }

    fn bind_targets(&mut self, _count: usize) -> Result<(), GameError> {
        self.binds += 1;
        Ok(())
    }
}

pub type TestGame = GameController<FakePlatform, StdRng>;

pub fn game(config: GameConfig, seed: u64) -> TestGame {
    let platform = FakePlatform::new(config.target_count);
    GameController::new(config, platform, StdRng::seed_from_u64(seed)).expect("valid config")
}

/// Move the virtual clock forward, firing every timer that falls due.
pub fn advance_by(game: &mut TestGame, ms: u64) {
    let start = game.platform().now;
    let end = start + ms;
    while let Some(fire) = game.platform_mut().next_due(end) {
        match fire {
            Fire::Tick => {
                game.tick();
            }
            Fire::Hide(cycle) => game.hide_elapsed(cycle).expect("hide callback"),
        }
    }
    let platform = game.platform_mut();
    platform.now = end;
    platform.elapse(ms);
}
