use crate::domain::{ItemBehavior, ItemContext, ItemId};

use super::WorldCore;

/// Notifies the items entering and leaving the active region
pub(super) fn region_traffic(world: &mut WorldCore) {
    for i in 0..world.selected.len() {
        let id = world.selected[i];
        let entering = world.items.get(id).is_some_and(|item| !item.progress().was_selected());
        if entering {
            notify(world, id, |behavior, ctx| behavior.enters_active_region(ctx));
        }
    }

    let leaving: Vec<ItemId> = world
        .last_interesting
        .iter()
        .copied()
        .filter(|id| world.items.get(*id).is_some_and(|item| !item.progress().is_selected()))
        .collect();

    for id in leaving {
        notify(world, id, |behavior, ctx| behavior.leaves_active_region(ctx));
        if let Some(item) = world.items.get_mut(id) {
            item.progress.unselect();
        }
    }

    world.last_interesting = world.selected.clone();
}

fn notify(
    world: &mut WorldCore,
    id: ItemId,
    hook: impl FnOnce(&mut dyn ItemBehavior, &mut ItemContext<'_>),
) {
    let Some(item) = world.items.get_mut(id) else {
        return;
    };
    let Some(mut behavior) = item.take_behavior() else {
        return;
    };

    let mut ctx = ItemContext { id, item, commands: &mut world.commands };
    hook(behavior.as_mut(), &mut ctx);
    ctx.item.restore_behavior(Some(behavior));
}
