use crate::error::GameError;

/// Opaque id of a scheduled browser timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Track {
    /// Looping background music.
    Music,
    /// One-shot hit effect.
    Hit,
}

/// Everything the controller needs from the outside world: the board, the
/// two displays, the audio elements and the timers.
///
/// Scheduled work never runs inside these calls. The implementation arranges
/// for [`GameController::tick`](super::GameController::tick) to be called on
/// every countdown period and for
/// [`GameController::hide_elapsed`](super::GameController::hide_elapsed) to be
/// called with `cycle` once `delay_ms` has passed.
pub trait Platform {
    fn set_target_visible(&mut self, target: usize, visible: bool);

    fn render_score(&mut self, points: u32);

    fn render_time(&mut self, remaining_secs: u32);

    /// Seek to zero and play.
    fn play_from_start(&mut self, track: Track);

    /// Pause and seek to zero.
    fn halt(&mut self, track: Track);

    fn start_countdown(&mut self, period_ms: u32) -> Result<TimerHandle, GameError>;

    fn stop_countdown(&mut self, handle: TimerHandle);

    fn schedule_hide(&mut self, delay_ms: u32, cycle: u64) -> Result<TimerHandle, GameError>;

    fn cancel_hide(&mut self, handle: TimerHandle);

    /// Attach click handlers to the `count` targets. Called at most once per
    /// controller.
    fn bind_targets(&mut self, count: usize) -> Result<(), GameError>;
}
