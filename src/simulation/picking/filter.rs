//! Conditions an item must meet to be picked.

use crate::core::Vec2;
use crate::domain::PhysicalItem;

/// Each unset condition accepts every item
#[derive(Default)]
pub struct ItemPickingFilter {
    artificial: Option<bool>,
    phantom: Option<bool>,
    can_move_items: Option<bool>,
    fixed: Option<bool>,
    forbidden_position: Option<Vec2>,
    predicate: Option<Box<dyn Fn(&PhysicalItem) -> bool>>,
}

impl ItemPickingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artificial(mut self, b: bool) -> Self {
        self.artificial = Some(b);
        self
    }

    pub fn phantom(mut self, b: bool) -> Self {
        self.phantom = Some(b);
        self
    }

    pub fn can_move_items(mut self, b: bool) -> Self {
        self.can_move_items = Some(b);
        self
    }

    pub fn fixed(mut self, b: bool) -> Self {
        self.fixed = Some(b);
        self
    }

    /// Rejects the items whose box includes `p`
    pub fn forbidden_position(mut self, p: Vec2) -> Self {
        self.forbidden_position = Some(p);
        self
    }

    pub fn predicate(mut self, f: impl Fn(&PhysicalItem) -> bool + 'static) -> Self {
        self.predicate = Some(Box::new(f));
        self
    }

    pub fn satisfies_condition(&self, item: &PhysicalItem) -> bool {
        let state = item.state();
        let flag = |wanted: Option<bool>, actual: bool| wanted.map_or(true, |w| w == actual);

        flag(self.artificial, state.is_artificial())
            && flag(self.phantom, state.is_phantom())
            && flag(self.can_move_items, state.can_move_items())
            && flag(self.fixed, state.is_fixed())
            && self
                .forbidden_position
                .map_or(true, |p| !item.bounding_box().includes(p))
            && self.predicate.as_ref().map_or(true, |f| f(item))
    }
}
