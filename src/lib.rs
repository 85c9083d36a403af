//! Universe Engine - tick-driven 2D item physics, native or in WASM
//!
//! Architecture:
//! - core/        - geometry, errors
//! - domain/      - items, handles, per-tick bookkeeping, settings
//! - systems/     - collisions, forced movements, links, environment rules
//! - spatial/     - static geometry index
//! - simulation/  - the world orchestrator and its JS facade

pub mod console_log;
pub mod core;
pub mod domain;
pub mod simulation;
pub mod spatial;
pub mod systems;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    console_log::init_with_level(log::LevelFilter::Info);
    log::info!("universe engine {} initialized", version());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::{Rect, Region, Result, TimeType, UniverseError, Vec2};
pub use domain::{ItemBehavior, ItemHandle, ItemId, LinkId, PhysicalItem, Solid, WorldSettings};
pub use simulation::{ItemPickingFilter, PerfStats, World, WorldCore};
pub use systems::{ForcedMovement, Link, LinkKind};
