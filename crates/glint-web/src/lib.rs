pub mod clock;
pub mod runner;
pub mod storage;

pub use runner::DiscoveryRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use glint_engine::{
    ActivationSource, ControllerTimings, EngineConfig, InputEvent, MarkerHandle, PulseTimings,
    Rect, SignInPolicy,
};

thread_local! {
    static RUNNER: RefCell<Option<DiscoveryRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut DiscoveryRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Engine not initialized. Call glint_init() first.");
        f(runner)
    })
}

/// Initialize the engine from a catalog manifest and environment flags.
/// Returns false (and logs) if the manifest is unreadable.
#[wasm_bindgen]
pub fn glint_init(
    catalog_json: &str,
    touch_device: bool,
    reduced_motion: bool,
    debug_reveal: bool,
    debug_tools: bool,
    require_sign_in: bool,
    reward_seed: f64,
) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = EngineConfig {
        touch_device,
        reduced_motion,
        debug_reveal,
        debug_tools,
        sign_in_policy: if require_sign_in {
            SignInPolicy::RequireSignIn
        } else {
            SignInPolicy::Open
        },
        reward_seed: reward_seed as u64,
        pulse: PulseTimings::default(),
        timings: ControllerTimings::default(),
        ..Default::default()
    };

    match DiscoveryRunner::new(catalog_json, config) {
        Ok(runner) => {
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("glint: initialized");
            true
        }
        Err(err) => {
            log::error!("glint: init failed: {err}");
            false
        }
    }
}

// ---- Marker lifecycle ----

/// Mount a marker by catalog id. Returns the handle, or 0 for unknown ids.
#[wasm_bindgen]
pub fn glint_mount(id: &str) -> u32 {
    with_runner(|r| r.engine_mut().mount(id).map(|h| h.0).unwrap_or(0))
}

#[wasm_bindgen]
pub fn glint_unmount(handle: u32) {
    with_runner(|r| r.engine_mut().unmount(MarkerHandle(handle)));
}

#[wasm_bindgen]
pub fn glint_layout(handle: u32, x: f32, y: f32, w: f32, h: f32) {
    with_runner(|r| {
        r.push_input(InputEvent::LayoutChange {
            marker: MarkerHandle(handle),
            rect: Rect::from_xywh(x, y, w, h),
        })
    });
}

// ---- Input ----

#[wasm_bindgen]
pub fn glint_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

/// `source`: 0 = pointer, 1 = touch, 2 = keyboard.
#[wasm_bindgen]
pub fn glint_activate(handle: u32, source: u32) {
    let source = match source {
        1 => ActivationSource::Touch,
        2 => ActivationSource::Key,
        _ => ActivationSource::Pointer,
    };
    with_runner(|r| {
        r.push_input(InputEvent::Activate {
            marker: MarkerHandle(handle),
            source,
        })
    });
}

#[wasm_bindgen]
pub fn glint_hover(handle: u32, entered: bool) {
    let marker = MarkerHandle(handle);
    with_runner(|r| {
        r.push_input(if entered {
            InputEvent::HoverEnter { marker }
        } else {
            InputEvent::HoverLeave { marker }
        })
    });
}

#[wasm_bindgen]
pub fn glint_focus(handle: u32, gained: bool) {
    let marker = MarkerHandle(handle);
    with_runner(|r| {
        r.push_input(if gained {
            InputEvent::FocusGained { marker }
        } else {
            InputEvent::FocusLost { marker }
        })
    });
}

#[wasm_bindgen]
pub fn glint_long_press(handle: u32) {
    with_runner(|r| {
        r.push_input(InputEvent::LongPress {
            marker: MarkerHandle(handle),
        })
    });
}

#[wasm_bindgen]
pub fn glint_escape() {
    with_runner(|r| r.push_input(InputEvent::Escape));
}

// ---- Frame tick ----

#[wasm_bindgen]
pub fn glint_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- Data accessors ----

/// Wire-format version; the JS reader checks this before interpreting the
/// snapshot and event buffers.
#[wasm_bindgen]
pub fn glint_protocol_version() -> f32 {
    glint_engine::PROTOCOL_VERSION
}

#[wasm_bindgen]
pub fn glint_snapshot_ptr() -> *const f32 {
    with_runner(|r| r.snapshot_ptr())
}

#[wasm_bindgen]
pub fn glint_snapshot_len() -> u32 {
    with_runner(|r| r.snapshot_len())
}

#[wasm_bindgen]
pub fn glint_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr())
}

#[wasm_bindgen]
pub fn glint_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

// ---- Progress API ----

#[wasm_bindgen]
pub fn glint_is_found(id: &str) -> bool {
    with_runner(|r| r.engine().is_found(id))
}

#[wasm_bindgen]
pub fn glint_mark_found(id: &str) {
    with_runner(|r| r.engine_mut().mark_found(id));
}

#[wasm_bindgen]
pub fn glint_progress() -> u32 {
    with_runner(|r| r.engine().progress())
}

#[wasm_bindgen]
pub fn glint_total() -> u32 {
    with_runner(|r| r.engine().total())
}

#[wasm_bindgen]
pub fn glint_completed() -> bool {
    with_runner(|r| r.engine().completed())
}

/// Debug-only; a logged no-op unless the engine was initialized with
/// debug tools enabled.
#[wasm_bindgen]
pub fn glint_reset() {
    with_runner(|r| r.engine_mut().reset());
}

// ---- Completion notice / indicator ----

#[wasm_bindgen]
pub fn glint_reward_message() -> Option<String> {
    with_runner(|r| r.reward_message())
}

#[wasm_bindgen]
pub fn glint_dismiss_reward() {
    with_runner(|r| r.engine_mut().dismiss_reward());
}

#[wasm_bindgen]
pub fn glint_indicator_visible() -> bool {
    with_runner(|r| r.engine().indicator_visible())
}

#[wasm_bindgen]
pub fn glint_dismiss_indicator() {
    with_runner(|r| r.engine_mut().dismiss_indicator());
}

// ---- Environment updates ----

#[wasm_bindgen]
pub fn glint_set_signed_in(signed_in: bool) {
    with_runner(|r| r.engine_mut().set_signed_in(signed_in));
}

#[wasm_bindgen]
pub fn glint_set_reduced_motion(reduced_motion: bool) {
    with_runner(|r| r.engine_mut().set_reduced_motion(reduced_motion));
}

#[wasm_bindgen]
pub fn glint_set_touch_device(touch_device: bool) {
    with_runner(|r| r.engine_mut().set_touch_device(touch_device));
}

#[wasm_bindgen]
pub fn glint_set_debug_reveal(debug_reveal: bool) {
    with_runner(|r| r.engine_mut().set_debug_reveal(debug_reveal));
}
