use slotmap::{Key, KeyData};
use wasm_bindgen::prelude::*;

use crate::core::{Rect, Region, Vec2};
use crate::domain::{ItemId, PhysicalItem, Solid};

use super::perf_stats::PerfStats;
use super::WorldCore;

fn item_id(raw: u64) -> ItemId {
    ItemId::from(KeyData::from_ffi(raw))
}

fn raw_id(id: ItemId) -> u64 {
    id.data().as_ffi()
}

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create a new world with given dimensions
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            core: WorldCore::new(width, height),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 { self.core.size().x }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 { self.core.size().y }

    #[wasm_bindgen(getter)]
    pub fn time(&self) -> f64 { self.core.time() }

    #[wasm_bindgen(getter)]
    pub fn tick_count(&self) -> u64 { self.core.tick_count() }

    #[wasm_bindgen(getter)]
    pub fn item_count(&self) -> u32 {
        (self.core.entity_count() + self.core.static_count()) as u32
    }

    /// Adds a solid dynamic box; returns its id
    pub fn add_box(&mut self, x: f64, y: f64, width: f64, height: f64, mass: f64) -> u64 {
        let item = PhysicalItem::new(Rect::new(x, y, width, height))
            .with_mass(mass)
            .with_behavior(Solid);
        raw_id(self.core.register(item))
    }

    /// Adds a solid piece of static geometry; returns its id
    pub fn add_static_box(&mut self, x: f64, y: f64, width: f64, height: f64) -> u64 {
        let item = PhysicalItem::new(Rect::new(x, y, width, height)).with_behavior(Solid);
        raw_id(self.core.add_static(item))
    }

    /// False when the id does not name a living item
    pub fn release_item(&mut self, id: u64) -> bool {
        let id = item_id(id);
        if !self.core.contains(id) {
            return false;
        }
        self.core.release(id);
        true
    }

    /// Runs one tick over the items intersecting the given rectangle
    pub fn progress(&mut self, x: f64, y: f64, width: f64, height: f64, elapsed: f64) -> Result<(), JsValue> {
        let region = Region::from(Rect::new(x, y, width, height));
        self.core
            .progress_entities(&region, elapsed)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// `[left, bottom, width, height]`, empty for an unknown id
    pub fn item_box(&self, id: u64) -> Vec<f64> {
        self.core
            .item(item_id(id))
            .map(|item| {
                let r = item.bounding_box();
                vec![r.left, r.bottom, r.width, r.height]
            })
            .unwrap_or_default()
    }

    pub fn set_item_speed(&mut self, id: u64, vx: f64, vy: f64) -> bool {
        match self.core.item_mut(item_id(id)) {
            Some(item) => {
                item.state_mut().set_speed(Vec2::new(vx, vy));
                true
            }
            None => false,
        }
    }

    pub fn set_gravity(&mut self, x: f64, y: f64) {
        self.core.set_gravity(Vec2::new(x, y));
    }

    pub fn load_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.core
            .load_settings_json(json)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last tick perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }
}
