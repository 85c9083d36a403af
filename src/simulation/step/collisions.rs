use std::cmp::Ordering;

use crate::core::Rect;
use crate::domain::ItemId;
use crate::systems::collision::{CollisionContext, CollisionInfo, CollisionRepair};

use super::select::{select_item, touch_item};
use super::WorldCore;

/// Finds and repairs the collisions of the selected items, heaviest and
/// largest contacts first. Returns the number of pairs processed.
pub(super) fn process_collisions(world: &mut WorldCore) -> u32 {
    let mut pending = Vec::new();

    for i in 0..world.selected.len() {
        let id = world.selected[i];
        let movable = world.items.get(id).is_some_and(|item| !item.state().is_fixed());
        if movable {
            add_to_collision_queue(world, id, &mut pending);
        }
    }

    let mut processed = 0;
    while let Some(id) = pop_pending(world, &mut pending) {
        match pick_next_neighbor(world, id) {
            Some(other) => {
                if process_pair(world, id, other, &mut pending) {
                    processed += 1;
                }
            }
            None => update_collision_penetration(world, id, &mut pending),
        }
    }
    processed
}

/// Rebuilds the neighborhood of `id` and queues it when it is not empty
fn add_to_collision_queue(world: &mut WorldCore, id: ItemId, pending: &mut Vec<ItemId>) {
    let Some(item) = world.items.get(id) else {
        return;
    };
    if item.state().has_weak_collisions() || item.state().is_artificial() {
        return;
    }

    let bounding_box = item.bounding_box();
    let mut candidates = Vec::new();
    world.static_grid.query(&bounding_box, &mut candidates);
    candidates.extend(world.entities.iter().copied());

    candidates.retain(|c| {
        *c != id
            && world.items.get(*c).is_some_and(|other| {
                !other.state().is_artificial() && bounding_box.intersection_area(&other.bounding_box()) > 0.0
            })
    });
    candidates.sort_unstable();
    candidates.dedup();
    candidates.retain(|c| !has_met(world, id, *c));

    for &c in &candidates {
        touch_item(world, c);
    }

    if let Some(item) = world.items.get_mut(id) {
        *item.progress.neighborhood_mut() = candidates;
    }
    refresh_priority(world, id);
    enqueue(world, id, pending);
}

/// Drops the stale neighbors of `id`, recomputes its priority and queues it
/// again if partners remain
fn update_collision_penetration(world: &mut WorldCore, id: ItemId, pending: &mut Vec<ItemId>) {
    let Some(item) = world.items.get(id) else {
        return;
    };

    let bounding_box = item.bounding_box();
    let neighborhood: Vec<ItemId> = item
        .progress()
        .neighborhood()
        .iter()
        .copied()
        .filter(|n| {
            !has_met(world, id, *n)
                && world
                    .items
                    .get(*n)
                    .is_some_and(|other| bounding_box.intersection_area(&other.bounding_box()) > 0.0)
        })
        .collect();

    if let Some(item) = world.items.get_mut(id) {
        *item.progress.neighborhood_mut() = neighborhood;
    }
    refresh_priority(world, id);
    enqueue(world, id, pending);
}

fn refresh_priority(world: &mut WorldCore, id: ItemId) {
    let Some(item) = world.items.get(id) else {
        return;
    };

    // Only partners able to push a movable item raise its priority
    let pushable = !(item.state().is_phantom() || item.state().is_fixed());
    let bounding_box = item.bounding_box();
    let offers: Vec<(f64, f64)> = item
        .progress()
        .neighborhood()
        .iter()
        .filter_map(|n| world.items.get(*n))
        .filter(|other| pushable && other.state().can_move_items())
        .map(|other| (other.state().mass(), bounding_box.intersection_area(&other.bounding_box())))
        .collect();

    if let Some(item) = world.items.get_mut(id) {
        item.progress.reset_collision();
        for (mass, area) in offers {
            item.progress.offer_collision(mass, area);
        }
    }
}

fn enqueue(world: &mut WorldCore, id: ItemId, pending: &mut Vec<ItemId>) {
    let Some(item) = world.items.get_mut(id) else {
        return;
    };
    if item.progress.neighborhood().is_empty() || item.progress.is_waiting_for_collision() {
        return;
    }

    item.progress.set_waiting_for_collision();
    pending.push(id);
}

/// Compares by mass, then area, then favors the oldest item
fn priority_cmp(a: (f64, f64, u64), b: (f64, f64, u64)) -> Ordering {
    a.0.partial_cmp(&b.0)
        .unwrap_or(Ordering::Equal)
        .then(a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        .then(b.2.cmp(&a.2))
}

fn pop_pending(world: &mut WorldCore, pending: &mut Vec<ItemId>) -> Option<ItemId> {
    pending.retain(|id| world.items.contains_key(*id));

    let best = pending
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let item = &world.items[*id];
            let key = (
                item.progress().collision_mass(),
                item.progress().collision_area(),
                item.serial(),
            );
            (i, key)
        })
        .max_by(|(_, a), (_, b)| priority_cmp(*a, *b))
        .map(|(i, _)| i)?;

    let id = pending.swap_remove(best);
    if let Some(item) = world.items.get_mut(id) {
        item.progress.unset_waiting_for_collision();
    }
    Some(id)
}

/// Takes the best partner out of the neighborhood of `id`
fn pick_next_neighbor(world: &mut WorldCore, id: ItemId) -> Option<ItemId> {
    let item = world.items.get(id)?;
    let bounding_box = item.bounding_box();

    let best = item
        .progress()
        .neighborhood()
        .iter()
        .copied()
        .filter(|n| !has_met(world, id, *n))
        .filter_map(|n| {
            let other = world.items.get(n)?;
            let key = (
                other.state().mass(),
                bounding_box.intersection_area(&other.bounding_box()),
                other.serial(),
            );
            Some((n, key))
        })
        .max_by(|(_, a), (_, b)| priority_cmp(*a, *b))
        .map(|(n, _)| n);

    let stale: Vec<ItemId> = item
        .progress()
        .neighborhood()
        .iter()
        .copied()
        .filter(|n| Some(*n) == best || !world.items.contains_key(*n) || has_met(world, id, *n))
        .collect();

    if let Some(item) = world.items.get_mut(id) {
        item.progress.neighborhood_mut().retain(|n| !stale.contains(n));
    }
    best
}

/// Resolves `id` against `other`; false when the boxes no longer overlap
fn process_pair(world: &mut WorldCore, id: ItemId, other: ItemId, pending: &mut Vec<ItemId>) -> bool {
    let (Some(a), Some(b)) = (world.items.get(id), world.items.get(other)) else {
        return false;
    };
    let (box_a, box_b) = (a.bounding_box(), b.bounding_box());

    if box_a.intersection_area(&box_b) <= 0.0 {
        update_collision_penetration(world, id, pending);
        return false;
    }

    process_collision(world, id, other);
    meet(world, id, other);
    select_item(world, other);

    if bounding_box_of(world, other).is_some_and(|r| r != box_b) {
        add_to_collision_queue(world, other, pending);
    }
    if bounding_box_of(world, id).is_some_and(|r| r != box_a) {
        add_to_collision_queue(world, id, pending);
    } else {
        update_collision_penetration(world, id, pending);
    }
    true
}

fn bounding_box_of(world: &WorldCore, id: ItemId) -> Option<Rect> {
    world.items.get(id).map(|item| item.bounding_box())
}

/// Calls both collision hooks, then exchanges the impulse
fn process_collision(world: &mut WorldCore, a: ItemId, b: ItemId) {
    let (Some(item_a), Some(item_b)) = (world.items.get(a), world.items.get(b)) else {
        return;
    };

    let previous_a = item_a.initial_state().clone();
    let previous_b = item_b.initial_state().clone();
    let (box_a, box_b) = (item_a.bounding_box(), item_b.bounding_box());

    let info_ab = CollisionInfo::new(&previous_a, &previous_b, &box_a, &box_b, b);
    let info_ba = CollisionInfo::new(&previous_b, &previous_a, &box_b, &box_a, a);

    let mut repair = CollisionRepair::new(a, b);
    repair.set_contact_normal(b, info_ab.side_normal());

    run_collision_hook(world, a, &info_ab, &mut repair);
    run_collision_hook(world, b, &info_ba, &mut repair);

    let speed_epsilon = world.environment.speed_epsilon();
    let angular_speed_epsilon = world.environment.angular_speed_epsilon();
    if let Some([first, second]) = world.items.get_disjoint_mut([a, b]) {
        repair.apply(first.state_mut(), second.state_mut());
        first.state_mut().adjust_cinetic(speed_epsilon, angular_speed_epsilon);
        second.state_mut().adjust_cinetic(speed_epsilon, angular_speed_epsilon);
    }
}

fn run_collision_hook(world: &mut WorldCore, id: ItemId, info: &CollisionInfo, repair: &mut CollisionRepair) {
    let Some(mut behavior) = world.items.get_mut(id).and_then(|item| item.take_behavior()) else {
        return;
    };

    if world.items.contains_key(info.other()) {
        let mut ctx = CollisionContext {
            items: &mut world.items,
            id,
            info,
            repair,
            align_epsilon: world.environment.align_epsilon(),
            commands: &mut world.commands,
        };
        behavior.collision(&mut ctx);
    }

    if let Some(item) = world.items.get_mut(id) {
        item.restore_behavior(Some(behavior));
    }
}

/// The pair is stored once, on the older item
fn pair_keeper(world: &WorldCore, a: ItemId, b: ItemId) -> (ItemId, ItemId) {
    let serial = |id: ItemId| world.items.get(id).map_or(u64::MAX, |item| item.serial());
    if serial(b) < serial(a) {
        (b, a)
    } else {
        (a, b)
    }
}

fn meet(world: &mut WorldCore, a: ItemId, b: ItemId) {
    let (keeper, other) = pair_keeper(world, a, b);
    if let Some(item) = world.items.get_mut(keeper) {
        item.progress.remember_met(other);
    }
}

fn has_met(world: &WorldCore, a: ItemId, b: ItemId) -> bool {
    let (keeper, other) = pair_keeper(world, a, b);
    world
        .items
        .get(keeper)
        .is_some_and(|item| item.progress().has_met_recorded(other))
}
