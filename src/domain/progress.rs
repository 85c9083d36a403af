//! Per-tick bookkeeping attached to every item.
//!
//! The structure is initialized the first time an item is touched during a
//! tick and reset when the tick ends. Nothing stored here survives a tick
//! except `was_selected`, used to detect region traffic.

use super::handle::ItemId;
use super::state::ItemState;

#[derive(Clone, Debug, Default)]
pub struct ProgressStructure {
    initial_state: Option<ItemState>,
    is_selected: bool,
    was_selected: bool,
    move_done: bool,
    waiting_for_collision: bool,
    neighborhood: Vec<ItemId>,
    collision_mass: f64,
    collision_area: f64,
    already_met: Vec<ItemId>,
}

impl ProgressStructure {
    /// Snapshots the state at the start of the tick. No-op when already done.
    pub fn init(&mut self, state: &ItemState) {
        if self.initial_state.is_some() {
            return;
        }

        self.initial_state = Some(state.clone());
        self.move_done = false;
        self.waiting_for_collision = false;
        self.neighborhood.clear();
        self.collision_mass = 0.0;
        self.collision_area = 0.0;
        self.already_met.clear();
    }

    /// Ends the tick for this item
    pub fn deinit(&mut self) {
        self.was_selected = self.is_selected;
        self.is_selected = false;
        self.initial_state = None;
        self.move_done = false;
        self.waiting_for_collision = false;
        self.neighborhood.clear();
        self.collision_mass = 0.0;
        self.collision_area = 0.0;
        self.already_met.clear();
    }

    /// Drops the tick for this item as if it never started
    pub fn abort(&mut self) {
        let was_selected = self.was_selected;
        self.deinit();
        self.was_selected = was_selected;
    }

    pub fn is_initialized(&self) -> bool {
        self.initial_state.is_some()
    }

    /// State at the start of the tick, or `fallback` when not initialized
    pub fn initial_state<'a>(&'a self, fallback: &'a ItemState) -> &'a ItemState {
        self.initial_state.as_ref().unwrap_or(fallback)
    }

    pub fn select(&mut self) {
        self.is_selected = true;
    }

    pub fn unselect(&mut self) {
        self.is_selected = false;
        self.was_selected = false;
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn was_selected(&self) -> bool {
        self.was_selected
    }

    pub fn set_move_done(&mut self) {
        self.move_done = true;
    }

    pub fn move_is_done(&self) -> bool {
        self.move_done
    }

    pub fn set_waiting_for_collision(&mut self) {
        self.waiting_for_collision = true;
    }

    pub fn unset_waiting_for_collision(&mut self) {
        self.waiting_for_collision = false;
    }

    pub fn is_waiting_for_collision(&self) -> bool {
        self.waiting_for_collision
    }

    pub fn neighborhood(&self) -> &[ItemId] {
        &self.neighborhood
    }

    pub fn neighborhood_mut(&mut self) -> &mut Vec<ItemId> {
        &mut self.neighborhood
    }

    pub fn collision_mass(&self) -> f64 {
        self.collision_mass
    }

    pub fn collision_area(&self) -> f64 {
        self.collision_area
    }

    /// Keeps the largest (mass, area) pair seen in the neighborhood
    pub fn offer_collision(&mut self, mass: f64, area: f64) {
        if mass > self.collision_mass || (mass == self.collision_mass && area > self.collision_area) {
            self.collision_mass = mass;
            self.collision_area = area;
        }
    }

    pub fn reset_collision(&mut self) {
        self.collision_mass = 0.0;
        self.collision_area = 0.0;
    }

    pub(crate) fn remember_met(&mut self, other: ItemId) {
        if !self.already_met.contains(&other) {
            self.already_met.push(other);
        }
    }

    pub(crate) fn has_met_recorded(&self, other: ItemId) -> bool {
        self.already_met.contains(&other)
    }
}
