//! Whack-a-mole core crate.
//!
//! The game loop lives in [`game`] and is plain Rust, testable on the host.
//! [`web`] binds it to the page: holes, moles, displays, audio and browser
//! timers. The functions below are the JS-facing interface; on load the
//! module wires the page by itself, so a bare `import init from ...` is enough
//! to make the start button work.

use wasm_bindgen::prelude::*;

pub mod error;
pub mod game;
pub mod web;

pub use error::GameError;
pub use game::{Difficulty, GameConfig, GameController, GameSnapshot, Phase, Platform};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Info);

    // A page without the expected elements just has no game.
    if let Err(err) = web::init(GameConfig::default()) {
        log::error!("whack-a-mole not started: {err}");
    }
}

// -----------------------------------------------------------------------------
// Exported interface
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::with_game(|game| game.start_game())??;
    Ok(())
}

#[wasm_bindgen]
pub fn stop_game() -> Result<(), JsValue> {
    web::with_game(|game| game.stop_game())?;
    Ok(())
}

/// `easy`, `normal` or `hard`.
#[wasm_bindgen]
pub fn set_difficulty(label: &str) -> Result<(), JsValue> {
    let difficulty: Difficulty = label.parse()?;
    web::with_game(|game| game.set_difficulty(difficulty))?;
    Ok(())
}

/// Same as clicking the mole in hole `index`; returns the new score.
#[wasm_bindgen]
pub fn whack(index: usize) -> Result<u32, JsValue> {
    Ok(web::with_game(|game| game.whack(index))??)
}

#[wasm_bindgen]
pub fn points() -> Result<u32, JsValue> {
    Ok(web::with_game(|game| game.points())?)
}

#[wasm_bindgen]
pub fn remaining_time() -> Result<u32, JsValue> {
    Ok(web::with_game(|game| game.remaining_time())?)
}

/// Current state as JSON.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn game_state() -> Result<String, JsValue> {
    let snapshot = web::with_game(|game| game.snapshot())?;
    serde_json::to_string(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Replace the settings from JSON; missing fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    web::reconfigure(GameConfig::from_json(json)?)?;
    Ok(())
}
