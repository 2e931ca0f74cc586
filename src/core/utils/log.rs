//! Console logging for the host page.
//!
//! On wasm32 messages go to the browser console through `web_sys`.
//! On native targets (tests, benches) the arguments are still type-checked
//! but nothing is printed, so no JS import is ever called outside the browser.

#[cfg(target_arch = "wasm32")]
pub fn console_log(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn console_log(_msg: &str) {}

#[cfg(target_arch = "wasm32")]
pub fn console_warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn console_warn(_msg: &str) {}

/// `format!`-style logging to the browser console
#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {
        $crate::core::log::console_log(&format!($($arg)*))
    };
}

/// `format!`-style warning to the browser console
#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {
        $crate::core::log::console_warn(&format!($($arg)*))
    };
}
