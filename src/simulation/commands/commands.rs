use crate::domain::{ItemId, LinkId, PhysicalItem, WorldCommand};
use crate::systems::forced_movement::MovementScope;
use crate::systems::{ForcedMovement, Link};

use super::WorldCore;

pub(super) fn register(world: &mut WorldCore, mut item: PhysicalItem) -> ItemId {
    item.attach(next_serial(world));
    let id = world.items.insert(item);
    world.entities.push(id);
    id
}

pub(super) fn add_static(world: &mut WorldCore, mut item: PhysicalItem) -> ItemId {
    item.state_mut().fix();
    item.attach(next_serial(world));

    let bounding_box = item.bounding_box();
    let id = world.items.insert(item);
    world.static_grid.insert(id, &bounding_box);
    world.statics.push(id);
    id
}

fn next_serial(world: &mut WorldCore) -> u64 {
    let serial = world.next_serial;
    world.next_serial += 1;
    serial
}

pub(super) fn release(world: &mut WorldCore, id: ItemId) -> PhysicalItem {
    let Some(mut item) = world.items.remove(id) else {
        panic!("releasing an item that is not in the world");
    };

    for link in item.take_links() {
        unlink(world, link);
    }

    world.entities.retain(|e| *e != id);
    world.last_interesting.retain(|e| *e != id);
    world.selected.retain(|e| *e != id);
    world.touched.retain(|e| *e != id);

    if let Some(pos) = world.statics.iter().position(|s| *s == id) {
        world.statics.remove(pos);
        world.static_grid.remove(id, &item.bounding_box());
    }

    item.progress.deinit();
    log::debug!("item {:?} released", id);
    item
}

pub(super) fn link(world: &mut WorldCore, mut link: Link) -> LinkId {
    let first = link.first_item(&world.items);
    let second = link.second_item(&world.items);
    let (Some(first), Some(second)) = (first, second) else {
        panic!("linking an item that is not in the world");
    };
    assert!(first != second, "linking an item to itself");

    link.set_serial(world.next_link_serial);
    world.next_link_serial += 1;

    let id = world.links.insert(link);
    for item in [first, second] {
        if let Some(item) = world.items.get_mut(item) {
            item.add_link(id);
        }
    }
    id
}

pub(super) fn unlink(world: &mut WorldCore, id: LinkId) -> Option<Link> {
    let link = world.links.remove(id)?;
    for item in [link.first_item(&world.items), link.second_item(&world.items)].into_iter().flatten() {
        if let Some(item) = world.items.get_mut(item) {
            item.remove_link(id);
        }
    }
    Some(link)
}

pub(super) fn set_forced_movement(world: &mut WorldCore, id: ItemId, mut movement: ForcedMovement) {
    assert!(world.items.contains_key(id), "forced movement set on an item that is not in the world");

    movement.set_item(id);
    {
        let mut scope = MovementScope::new(&mut world.items, &world.environment);
        movement.init(&mut scope);
    }
    if let Some(item) = world.items.get_mut(id) {
        item.set_forced_movement(movement);
    }
}

/// Applies the changes queued by item hooks during the last tick
pub(super) fn apply_commands(world: &mut WorldCore) {
    for command in world.commands.drain() {
        match command {
            WorldCommand::Register(item) => {
                register(world, item);
            }
            WorldCommand::AddStatic(item) => {
                add_static(world, item);
            }
            WorldCommand::Release(id) => {
                if world.items.contains_key(id) {
                    release(world, id);
                } else {
                    log::warn!("queued release of {:?} ignored, item already gone", id);
                }
            }
        }
    }
}
