use crate::core::Region;
use crate::domain::ItemId;

use super::WorldCore;

/// Starts the tick for `id` if not done yet
pub(super) fn touch_item(world: &mut WorldCore, id: ItemId) {
    if let Some(item) = world.items.get_mut(id) {
        if item.init_progress() {
            world.touched.push(id);
        }
    }
}

/// Touches and selects `id`; false when it was already selected or is gone
pub(super) fn select_item(world: &mut WorldCore, id: ItemId) -> bool {
    touch_item(world, id);

    let Some(item) = world.items.get_mut(id) else {
        return false;
    };
    if item.progress.is_selected() {
        return false;
    }

    item.progress.select();
    world.selected.push(id);
    true
}

/// Selects the global statics and the statics overlapping `regions`, then
/// the global entities and the entities overlapping `regions`
pub(super) fn search_interesting_items(world: &mut WorldCore, regions: &Region) {
    let mut statics = Vec::new();
    for r in regions.iter() {
        world.static_grid.query(r, &mut statics);
    }
    statics.retain(|id| {
        world
            .items
            .get(*id)
            .is_some_and(|item| regions.intersects(&item.bounding_box()))
    });
    statics.extend(
        world
            .statics
            .iter()
            .copied()
            .filter(|id| world.items.get(*id).is_some_and(|item| item.state().is_global())),
    );
    statics.sort_unstable();
    statics.dedup();
    statics.sort_by_key(|id| world.items[*id].serial());

    let entities: Vec<ItemId> = world
        .entities
        .iter()
        .copied()
        .filter(|id| {
            world.items.get(*id).is_some_and(|item| {
                item.state().is_global() || regions.intersects(&item.bounding_box())
            })
        })
        .collect();

    for id in statics.into_iter().chain(entities) {
        select_item(world, id);
    }
}
