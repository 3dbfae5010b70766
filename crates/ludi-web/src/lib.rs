pub mod runner;

pub use runner::{ActiveRunner, SessionRunner};

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use ludi_gesture::InputEvent;

thread_local! {
    static RUNNER: RefCell<Option<ActiveRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut ActiveRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Recognizer not initialized. Call recognizer_init() first.");
        f(runner)
    })
}

/// Create the capture session. `split` selects the two-zone variant.
#[wasm_bindgen]
pub fn recognizer_init(config_json: &str, user_templates_json: &str, split: bool, surface_width: f32) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = ActiveRunner::from_json(config_json, user_templates_json, split, surface_width);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("ludi-web: initialized ({})", if split { "split" } else { "single" });
}

/// Advance one frame. Returns the recognition as JSON, or an empty string.
#[wasm_bindgen]
pub fn tick(dt: f32) -> String {
    with_runner(|r| r.tick(dt))
        .and_then(|recognition| match serde_json::to_string(&recognition) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("Failed to serialize recognition: {}", e);
                None
            }
        })
        .unwrap_or_default()
}

#[wasm_bindgen]
pub fn pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn clear_canvas() {
    with_runner(|r| r.clear());
}

#[wasm_bindgen]
pub fn set_suspended(suspended: bool) {
    with_runner(|r| r.set_suspended(suspended));
}

#[wasm_bindgen]
pub fn set_expected_answer(answer: i32) {
    with_runner(|r| r.set_expected_answer(Some(i64::from(answer))));
}

#[wasm_bindgen]
pub fn clear_expected_answer() {
    with_runner(|r| r.set_expected_answer(None));
}

#[wasm_bindgen]
pub fn set_surface_width(width: f32) {
    with_runner(|r| r.set_surface_width(width));
}

/// 0 idle, 1 drawing, 2 awaiting, 3 cooldown, 4 suspended.
#[wasm_bindgen]
pub fn session_state() -> u32 {
    with_runner(|r| r.state().code())
}
