//! Step timing: `Date.now()` in the browser, the monotonic clock elsewhere.

#[cfg(target_arch = "wasm32")]
mod clock {
    pub(crate) type Stamp = f64;

    #[inline]
    pub(crate) fn now() -> Stamp {
        js_sys::Date::now()
    }

    #[inline]
    pub(crate) fn elapsed_ms(since: Stamp) -> f64 {
        js_sys::Date::now() - since
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod clock {
    pub(crate) type Stamp = std::time::Instant;

    #[inline]
    pub(crate) fn now() -> Stamp {
        Stamp::now()
    }

    #[inline]
    pub(crate) fn elapsed_ms(since: Stamp) -> f64 {
        since.elapsed().as_secs_f64() * 1000.0
    }
}

/// Run `f`, timing it only when `enabled`. Returns its result and the
/// elapsed milliseconds (0 when off). Wall-clock steps backwards read as 0.
#[inline]
pub(crate) fn measure<T>(enabled: bool, f: impl FnOnce() -> T) -> (T, f64) {
    if !enabled {
        return (f(), 0.0);
    }
    let start = clock::now();
    let out = f();
    (out, clock::elapsed_ms(start).max(0.0))
}
