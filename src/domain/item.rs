//! Simulated item: physical state plus the slots the world drives.

use std::collections::HashMap;

use crate::core::{Rect, TimeType, Vec2};
use crate::systems::forced_movement::ForcedMovement;

use super::behavior::ItemBehavior;
use super::handle::{ItemHandle, LinkId};
use super::progress::ProgressStructure;
use super::state::ItemState;

pub struct PhysicalItem {
    state: ItemState,
    behavior: Option<Box<dyn ItemBehavior>>,
    forced_movement: Option<ForcedMovement>,
    movement_reference: ItemHandle,
    links: Vec<LinkId>,
    marks: HashMap<String, Vec2>,
    age: TimeType,
    serial: u64,
    registered: bool,
    pub(crate) progress: ProgressStructure,
}

impl PhysicalItem {
    pub fn new(bounding_box: Rect) -> Self {
        Self {
            state: ItemState::new(bounding_box),
            behavior: None,
            forced_movement: None,
            movement_reference: ItemHandle::empty(),
            links: Vec::new(),
            marks: HashMap::new(),
            age: 0.0,
            serial: 0,
            registered: false,
            progress: ProgressStructure::default(),
        }
    }

    pub fn with_behavior(mut self, behavior: impl ItemBehavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.state.set_mass(mass);
        self
    }

    pub fn state(&self) -> &ItemState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ItemState {
        &mut self.state
    }

    pub fn bounding_box(&self) -> Rect {
        self.state.bounding_box()
    }

    pub fn center_of_mass(&self) -> Vec2 {
        self.state.center_of_mass()
    }

    pub fn progress(&self) -> &ProgressStructure {
        &self.progress
    }

    /// State at the start of the current tick, or the current state between ticks
    pub fn initial_state(&self) -> &ItemState {
        self.progress.initial_state(&self.state)
    }

    /// Snapshots the state for the current tick; false when already done
    pub(crate) fn init_progress(&mut self) -> bool {
        if self.progress.is_initialized() {
            return false;
        }

        self.progress.init(&self.state);
        true
    }

    pub fn age(&self) -> TimeType {
        self.age
    }

    pub(crate) fn add_age(&mut self, elapsed: TimeType) {
        self.age += elapsed;
    }

    /// Creation rank, stable for the lifetime of the item in a world
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub(crate) fn attach(&mut self, serial: u64) {
        self.serial = serial;
        self.registered = true;
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    // Behavior

    pub fn set_behavior(&mut self, behavior: Box<dyn ItemBehavior>) {
        self.behavior = Some(behavior);
    }

    pub(crate) fn take_behavior(&mut self) -> Option<Box<dyn ItemBehavior>> {
        self.behavior.take()
    }

    pub(crate) fn restore_behavior(&mut self, behavior: Option<Box<dyn ItemBehavior>>) {
        if self.behavior.is_none() {
            self.behavior = behavior;
        }
    }

    pub(crate) fn behavior(&self) -> Option<&dyn ItemBehavior> {
        self.behavior.as_deref()
    }

    // Forced movement

    /// Installs a movement, initialized on the next move of the item
    pub fn set_forced_movement(&mut self, movement: ForcedMovement) {
        if self.state.is_fixed() {
            log::warn!("setting a forced movement on a fixed item has no effect");
        }

        self.state.set_acceleration(Vec2::zero());
        self.forced_movement = Some(movement);
    }

    pub fn clear_forced_movement(&mut self) {
        self.forced_movement = None;
    }

    pub fn has_forced_movement(&self) -> bool {
        self.forced_movement.is_some()
    }

    pub fn forced_movement(&self) -> Option<&ForcedMovement> {
        self.forced_movement.as_ref()
    }

    pub fn forced_movement_mut(&mut self) -> Option<&mut ForcedMovement> {
        self.forced_movement.as_mut()
    }

    pub(crate) fn take_forced_movement(&mut self) -> Option<ForcedMovement> {
        self.forced_movement.take()
    }

    pub(crate) fn restore_forced_movement(&mut self, movement: ForcedMovement) {
        if self.forced_movement.is_none() {
            self.forced_movement = Some(movement);
        }
    }

    // Movement reference

    /// Item whose move must be done before this one moves
    pub fn movement_reference(&self) -> ItemHandle {
        self.movement_reference
    }

    pub fn set_movement_reference(&mut self, handle: ItemHandle) {
        self.movement_reference = handle;
    }

    // Links

    pub fn links(&self) -> &[LinkId] {
        &self.links
    }

    pub(crate) fn add_link(&mut self, link: LinkId) {
        if !self.links.contains(&link) {
            self.links.push(link);
        }
    }

    pub(crate) fn remove_link(&mut self, link: LinkId) {
        self.links.retain(|l| *l != link);
    }

    pub(crate) fn take_links(&mut self) -> Vec<LinkId> {
        std::mem::take(&mut self.links)
    }

    // Marks

    /// Named point, relative to the bottom-left corner
    pub fn set_mark(&mut self, name: impl Into<String>, offset: Vec2) {
        self.marks.insert(name.into(), offset);
    }

    pub fn mark_position(&self, name: &str) -> Option<Vec2> {
        self.marks.get(name).map(|offset| self.state.bottom_left() + *offset)
    }
}

impl std::fmt::Debug for PhysicalItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicalItem")
            .field("serial", &self.serial)
            .field("box", &self.state.bounding_box())
            .field("speed", &self.state.speed())
            .field("mass", &self.state.mass())
            .finish()
    }
}
