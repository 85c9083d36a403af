//! Millisecond clock for the tick metrics: `Date.now()` in the browser,
//! the monotonic clock elsewhere.

#[cfg(not(target_arch = "wasm32"))]
use std::sync::OnceLock;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Splits a tick into consecutive phases
#[derive(Clone, Copy, Debug)]
pub(crate) struct PerfTimer {
    origin: f64,
    last_lap: f64,
}

impl PerfTimer {
    pub(crate) fn start() -> Self {
        let now = now_ms();
        Self { origin: now, last_lap: now }
    }

    /// Time spent since the previous lap, or since the start
    pub(crate) fn lap(&mut self) -> f64 {
        let now = now_ms();
        let phase = now - self.last_lap;
        self.last_lap = now;
        phase
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        now_ms() - self.origin
    }
}
