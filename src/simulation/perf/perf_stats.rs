use wasm_bindgen::prelude::*;

/// Timings and counters of the last tick
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) select_ms: f64,
    pub(super) dependencies_ms: f64,
    pub(super) move_ms: f64,
    pub(super) links_ms: f64,
    pub(super) collisions_ms: f64,
    pub(super) traffic_ms: f64,
    pub(super) selected_items: u32,
    pub(super) collisions_processed: u32,
    pub(super) links_adjusted: u32,
    pub(super) entity_count: u32,
    pub(super) static_count: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn select_ms(&self) -> f64 { self.select_ms }
    #[wasm_bindgen(getter)]
    pub fn dependencies_ms(&self) -> f64 { self.dependencies_ms }
    #[wasm_bindgen(getter)]
    pub fn move_ms(&self) -> f64 { self.move_ms }
    #[wasm_bindgen(getter)]
    pub fn links_ms(&self) -> f64 { self.links_ms }
    #[wasm_bindgen(getter)]
    pub fn collisions_ms(&self) -> f64 { self.collisions_ms }
    #[wasm_bindgen(getter)]
    pub fn traffic_ms(&self) -> f64 { self.traffic_ms }
    #[wasm_bindgen(getter)]
    pub fn selected_items(&self) -> u32 { self.selected_items }
    #[wasm_bindgen(getter)]
    pub fn collisions_processed(&self) -> u32 { self.collisions_processed }
    #[wasm_bindgen(getter)]
    pub fn links_adjusted(&self) -> u32 { self.links_adjusted }
    #[wasm_bindgen(getter)]
    pub fn entity_count(&self) -> u32 { self.entity_count }
    #[wasm_bindgen(getter)]
    pub fn static_count(&self) -> u32 { self.static_count }
}
