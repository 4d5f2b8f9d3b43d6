//! Debug logging.
//!
//! With the `debug-log` feature on `wasm32`, messages go to the browser
//! console. Everywhere else the macro compiles away; its arguments are still
//! type-checked.

macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(all(feature = "debug-log", target_arch = "wasm32"))]
        {
            web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(&format!($($arg)*)));
        }
        #[cfg(not(all(feature = "debug-log", target_arch = "wasm32")))]
        {
            let _ = || format!($($arg)*);
        }
    }};
}

pub(crate) use debug_log;
