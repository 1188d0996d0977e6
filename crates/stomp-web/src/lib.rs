use wasm_bindgen::prelude::*;

use stomp_engine::InputEvent;

pub mod runner;

pub use runner::SessionRunner;

/// Generate all `#[wasm_bindgen]` exports for a session.
///
/// Generates:
/// - `thread_local!` storage for the SessionRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (init, tick, input handlers, data accessors)
///
/// Expanded once at the bottom of this file; `$name` tags the init log line.
#[macro_export]
macro_rules! export_session {
    ($name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SessionRunner>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SessionRunner) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Session not initialized. Call session_init() first.");
                f(runner)
            })
        }

        /// Build the session. Either document may be empty to use defaults.
        #[wasm_bindgen]
        pub fn session_init(config_json: &str, level_json: &str) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let runner = $crate::SessionRunner::from_json(Some(config_json), Some(level_json))
                .map_err(|e| JsValue::from_str(&e.to_string()))?;

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn session_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn session_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn session_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn session_release_all() {
            with_runner(|r| r.push_input(InputEvent::ReleaseAll));
        }

        #[wasm_bindgen]
        pub fn session_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_frame_ptr() -> *const f32 {
            with_runner(|r| r.frame_ptr())
        }

        #[wasm_bindgen]
        pub fn get_frame_len() -> u32 {
            with_runner(|r| r.frame_len())
        }

        /// Copy of the whole frame buffer, for hosts that cannot read
        /// wasm memory directly.
        #[wasm_bindgen]
        pub fn get_frame() -> js_sys::Float32Array {
            with_runner(|r| js_sys::Float32Array::from(r.frame()))
        }

        #[wasm_bindgen]
        pub fn get_snapshots_ptr() -> *const f32 {
            with_runner(|r| r.snapshots_ptr())
        }

        #[wasm_bindgen]
        pub fn get_snapshot_count() -> u32 {
            with_runner(|r| r.snapshot_count())
        }

        #[wasm_bindgen]
        pub fn get_events_ptr() -> *const f32 {
            with_runner(|r| r.events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_event_count() -> u32 {
            with_runner(|r| r.event_count())
        }

        #[wasm_bindgen]
        pub fn get_lives() -> u32 {
            with_runner(|r| r.lives())
        }

        #[wasm_bindgen]
        pub fn get_session_state() -> u32 {
            with_runner(|r| r.session_state())
        }

        #[wasm_bindgen]
        pub fn is_goal_reached() -> bool {
            with_runner(|r| r.is_goal_reached())
        }

        #[wasm_bindgen]
        pub fn is_goal_animation_complete() -> bool {
            with_runner(|r| r.is_goal_animation_complete())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_snapshots() -> u32 {
            with_runner(|r| r.max_snapshots())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }
    };
}

export_session!("stomp");
