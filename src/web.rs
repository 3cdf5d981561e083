//! Browser side of the game: DOM lookup, `show` class toggling, `<audio>`
//! control and `setTimeout` / `setInterval` plumbing.
//!
//! Page contract:
//! - `.hole` containers and `.mole` buttons, same count, same order
//! - `#start`, `#score`, `#timer`
//! - `<audio id="game-music">` and `<audio id="hit-sound">`

use std::cell::RefCell;

use log::{debug, error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlAudioElement, Window, window};

use crate::error::GameError;
use crate::game::{GameConfig, GameController, Platform, TimerHandle, Track};

pub const HOLE_SELECTOR: &str = ".hole";
pub const MOLE_SELECTOR: &str = ".mole";
pub const START_SELECTOR: &str = "#start";
pub const SCORE_SELECTOR: &str = "#score";
pub const TIMER_SELECTOR: &str = "#timer";
pub const MUSIC_SELECTOR: &str = "#game-music";
pub const HIT_SELECTOR: &str = "#hit-sound";
/// Class on a hole that reveals (and enables) its mole.
pub const SHOW_CLASS: &str = "show";

pub type WebGame = GameController<WebPlatform, StdRng>;

thread_local! {
    static GAME: RefCell<Option<WebGame>> = RefCell::new(None);
}

/// Run `f` against the page's game.
pub fn with_game<T>(f: impl FnOnce(&mut WebGame) -> T) -> Result<T, GameError> {
    GAME.with(|cell| cell.borrow_mut().as_mut().map(f).ok_or(GameError::NoGame))
}

/// Timer and click callbacks have nobody to return an error to.
fn run_callback(what: &str, f: impl FnOnce(&mut WebGame) -> Result<(), GameError>) {
    if let Err(err) = with_game(f).and_then(|r| r) {
        error!("{what} failed: {err}");
    }
}

/// Look up the page, build the controller and wire the start button.
pub fn init(mut config: GameConfig) -> Result<(), GameError> {
    let win = window().ok_or_else(|| GameError::MissingElement("window".into()))?;
    let doc = win
        .document()
        .ok_or_else(|| GameError::MissingElement("document".into()))?;

    let platform = WebPlatform::from_document(win, &doc)?;
    config.target_count = platform.target_count();
    let game = GameController::new(config, platform, StdRng::from_entropy())?;

    let start = query(&doc, START_SELECTOR)?;
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        run_callback("start", |game| game.start_game());
    }) as Box<dyn FnMut(_)>);
    start.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();

    info!("whack-a-mole ready with {} holes", game.config().target_count);
    GAME.with(|cell| cell.replace(Some(game)));
    Ok(())
}

/// Swap in new settings, keeping the hole count the page provides.
pub fn reconfigure(mut config: GameConfig) -> Result<(), GameError> {
    with_game(|game| {
        config.target_count = game.config().target_count;
        game.reconfigure(config)
    })?
}

fn query(doc: &Document, selector: &str) -> Result<Element, GameError> {
    doc.query_selector(selector)?
        .ok_or_else(|| GameError::MissingElement(selector.to_string()))
}

fn query_all(doc: &Document, selector: &str) -> Result<Vec<Element>, GameError> {
    let list = doc.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Browser timers take a signed millisecond delay.
fn browser_delay(ms: u32) -> Result<i32, GameError> {
    i32::try_from(ms)
        .map_err(|_| GameError::InvalidConfig(format!("delay {ms}ms is too long for a browser timer")))
}

fn audio(doc: &Document, selector: &str) -> Result<HtmlAudioElement, GameError> {
    query(doc, selector)?
        .dyn_into::<HtmlAudioElement>()
        .map_err(|_| GameError::MissingElement(format!("audio {selector}")))
}

pub struct WebPlatform {
    window: Window,
    holes: Vec<Element>,
    moles: Vec<Element>,
    score: Element,
    timer: Element,
    music: HtmlAudioElement,
    hit: HtmlAudioElement,
    // Dropped on stop_countdown, after the interval is cleared.
    countdown: Option<Closure<dyn FnMut()>>,
    // Shared rejection handler for every play() promise.
    refused: Closure<dyn FnMut(JsValue)>,
}

impl WebPlatform {
    pub fn from_document(window: Window, doc: &Document) -> Result<Self, GameError> {
        let holes = query_all(doc, HOLE_SELECTOR)?;
        let moles = query_all(doc, MOLE_SELECTOR)?;
        if holes.is_empty() {
            return Err(GameError::MissingElement(HOLE_SELECTOR.into()));
        }
        if holes.len() != moles.len() {
            return Err(GameError::TargetMismatch {
                holes: holes.len(),
                moles: moles.len(),
            });
        }
        Ok(Self {
            window,
            holes,
            moles,
            score: query(doc, SCORE_SELECTOR)?,
            timer: query(doc, TIMER_SELECTOR)?,
            music: audio(doc, MUSIC_SELECTOR)?,
            hit: audio(doc, HIT_SELECTOR)?,
            countdown: None,
            refused: Closure::wrap(Box::new(|err: JsValue| {
                debug!("playback refused: {err:?}");
            }) as Box<dyn FnMut(JsValue)>),
        })
    }

    pub fn target_count(&self) -> usize {
        self.holes.len()
    }

    fn track(&self, track: Track) -> &HtmlAudioElement {
        match track {
            Track::Music => &self.music,
            Track::Hit => &self.hit,
        }
    }
}

impl Platform for WebPlatform {
    fn set_target_visible(&mut self, target: usize, visible: bool) {
        if let Some(hole) = self.holes.get(target) {
            if let Err(err) = hole.class_list().toggle_with_force(SHOW_CLASS, visible) {
                debug!("hole {target}: class toggle failed: {err:?}");
            }
        }
    }

    fn render_score(&mut self, points: u32) {
        self.score.set_text_content(Some(&points.to_string()));
    }

    fn render_time(&mut self, remaining_secs: u32) {
        self.timer.set_text_content(Some(&remaining_secs.to_string()));
    }

    fn play_from_start(&mut self, track: Track) {
        let el = self.track(track);
        el.set_current_time(0.0);
        // Autoplay refusals reject the promise; the game carries on without sound.
        match el.play() {
            Ok(promise) => {
                let _: js_sys::Promise = promise.catch(&self.refused);
            }
            Err(err) => debug!("{track:?} playback failed: {err:?}"),
        }
    }

    fn halt(&mut self, track: Track) {
        let el = self.track(track);
        let _ = el.pause();
        el.set_current_time(0.0);
    }

    fn start_countdown(&mut self, period_ms: u32) -> Result<TimerHandle, GameError> {
        let period = browser_delay(period_ms)?;
        let closure = Closure::wrap(Box::new(|| {
            run_callback("tick", |game| {
                game.tick();
                Ok(())
            });
        }) as Box<dyn FnMut()>);
        let id = self.window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period,
        )?;
        self.countdown = Some(closure);
        Ok(TimerHandle(id))
    }

    fn stop_countdown(&mut self, handle: TimerHandle) {
        self.window.clear_interval_with_handle(handle.0);
        self.countdown = None;
    }

    fn schedule_hide(&mut self, delay_ms: u32, cycle: u64) -> Result<TimerHandle, GameError> {
        let delay = browser_delay(delay_ms)?;
        let callback = Closure::once_into_js(move || {
            run_callback("hide", |game| game.hide_elapsed(cycle));
        });
        let id = self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            delay,
        )?;
        Ok(TimerHandle(id))
    }

    fn cancel_hide(&mut self, handle: TimerHandle) {
        self.window.clear_timeout_with_handle(handle.0);
    }

    fn bind_targets(&mut self, count: usize) -> Result<(), GameError> {
        for (idx, mole) in self.moles.iter().take(count).enumerate() {
            let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
                run_callback("click", |game| game.whack(idx).map(|_| ()));
            }) as Box<dyn FnMut(_)>);
            mole.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }
}
