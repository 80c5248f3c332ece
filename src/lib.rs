//! Mini-game engine for the Vui học STEM site.
//!
//! Eight quiz-style games (counting, arithmetic, sorting, racing, animal
//! habitats, color mixing, block counting, solar system) share one modal
//! surface and one five-question session loop. Game logic is pure Rust in
//! [`games`]; the browser only ever sees the rendered view, so everything up
//! to the DOM boundary runs under native `cargo test`.
//!
//! The page drives the crate through two exports: [`open_game`] with a kind
//! id (`"count"`, `"math"`, `"sort"`, `"racing"`, `"animal"`, `"color"`,
//! `"blocks"`, `"solar"`) and [`close_game`].

use wasm_bindgen::prelude::*;

mod dom;
pub mod games;
pub mod manager;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Open (or re-show) the modal and start the requested game.
///
/// Unknown kind ids are ignored. Calling with the kind that is already
/// active re-shows the modal without touching the running session.
#[wasm_bindgen]
pub fn open_game(kind: &str) -> Result<(), JsValue> {
    dom::open_game(kind)
}

/// Hide the modal, cancel any pending delayed step, and drop the session.
#[wasm_bindgen]
pub fn close_game() {
    dom::close_game()
}
