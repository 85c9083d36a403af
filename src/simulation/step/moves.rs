use crate::core::TimeType;
use crate::domain::{ItemContext, ItemId, MoveContext};
use crate::systems::forced_movement::MovementScope;

use super::WorldCore;

/// Ages every selected item and runs its `time_step` hook
pub(super) fn advance_time(world: &mut WorldCore, elapsed: TimeType) {
    for i in 0..world.selected.len() {
        let id = world.selected[i];
        let Some(item) = world.items.get_mut(id) else {
            continue;
        };

        item.add_age(elapsed);

        if let Some(mut behavior) = item.take_behavior() {
            let mut ctx = ItemContext { id, item, commands: &mut world.commands };
            behavior.time_step(&mut ctx, elapsed);
            ctx.item.restore_behavior(Some(behavior));
        }
    }
}

/// Moves the selected items in dependency order. Every selected item,
/// moved or not, starts the collision phase without contacts.
pub(super) fn move_items(world: &mut WorldCore, elapsed: TimeType) {
    for i in 0..world.selected.len() {
        let id = world.selected[i];
        let Some(item) = world.items.get_mut(id) else {
            continue;
        };

        if item.state().is_fixed() {
            item.progress.set_move_done();
        } else if reference_pending(world, id) {
            log::warn!("item {:?} moves before its movement reference, move skipped", id);
        } else {
            move_item(world, id, elapsed);
        }

        if let Some(item) = world.items.get_mut(id) {
            item.state_mut().clear_contacts();
        }
    }
}

/// Whether the movement reference of `id` has not moved yet this tick
fn reference_pending(world: &WorldCore, id: ItemId) -> bool {
    let Some(item) = world.items.get(id) else {
        return false;
    };

    item.movement_reference()
        .live_id(&world.items)
        .filter(|reference| *reference != id)
        .is_some_and(|reference| !world.items[reference].progress().move_is_done())
}

fn move_item(world: &mut WorldCore, id: ItemId, elapsed: TimeType) {
    let mut behavior = world.items.get_mut(id).and_then(|item| item.take_behavior());
    let mut ctx = MoveContext {
        id,
        scope: MovementScope::new(&mut world.items, &world.environment),
        commands: &mut world.commands,
    };
    match behavior.as_mut() {
        Some(behavior) => behavior.move_item(&mut ctx, elapsed),
        None => ctx.default_move(elapsed),
    }

    if let Some(item) = world.items.get_mut(id) {
        item.restore_behavior(behavior);
        item.progress.set_move_done();
    }
}
