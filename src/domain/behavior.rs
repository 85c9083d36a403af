//! Hooks through which an item customizes what the world does with it.

use crate::core::TimeType;
use crate::systems::collision::CollisionContext;
use crate::systems::forced_movement::{self, MovementScope};

use super::commands::CommandQueue;
use super::handle::ItemId;
use super::item::PhysicalItem;

/// Access to one item from a hook
pub struct ItemContext<'a> {
    pub id: ItemId,
    pub item: &'a mut PhysicalItem,
    pub commands: &'a mut CommandQueue,
}

/// Access to the moving item and, read-mostly, to the rest of the world
pub struct MoveContext<'a> {
    pub id: ItemId,
    pub scope: MovementScope<'a>,
    pub commands: &'a mut CommandQueue,
}

impl<'a> MoveContext<'a> {
    pub fn item(&self) -> &PhysicalItem {
        &self.scope.items[self.id]
    }

    pub fn item_mut(&mut self) -> &mut PhysicalItem {
        &mut self.scope.items[self.id]
    }

    /// Runs the item's forced movement, or natural physics without one
    pub fn default_move(&mut self, elapsed: TimeType) {
        forced_movement::default_move(&mut self.scope, self.id, elapsed);
    }
}

/// Overridable behavior of an item. Every hook has a default.
pub trait ItemBehavior {
    /// Called once per tick, before any item moves
    fn time_step(&mut self, _ctx: &mut ItemContext<'_>, _elapsed: TimeType) {}

    fn move_item(&mut self, ctx: &mut MoveContext<'_>, elapsed: TimeType) {
        ctx.default_move(elapsed);
    }

    /// Called once for each collision partner met during a tick
    fn collision(&mut self, _ctx: &mut CollisionContext<'_>) {}

    /// Items that must move after this one
    fn dependent_items(&self, _item: &PhysicalItem, _out: &mut Vec<ItemId>) {}

    fn enters_active_region(&mut self, _ctx: &mut ItemContext<'_>) {}

    fn leaves_active_region(&mut self, _ctx: &mut ItemContext<'_>) {}
}

/// Item that pushes away whatever it collides with
#[derive(Clone, Copy, Debug, Default)]
pub struct Solid;

impl ItemBehavior for Solid {
    fn collision(&mut self, ctx: &mut CollisionContext<'_>) {
        ctx.default_collision();
    }
}
