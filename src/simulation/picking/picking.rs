use crate::core::{Rect, Vec2};
use crate::domain::{ItemId, PhysicalItem};

use super::filter::ItemPickingFilter;
use super::WorldCore;

/// Statics stored around `area` followed by every entity, in serial order
fn candidates(world: &WorldCore, area: &Rect) -> Vec<ItemId> {
    let mut ids = Vec::new();
    world.static_grid.query(area, &mut ids);
    ids.extend(world.entities.iter().copied());
    ids.sort_by_key(|id| world.items.get(*id).map_or(u64::MAX, |item| item.serial()));
    ids.dedup();
    ids
}

fn pick(
    world: &WorldCore,
    area: &Rect,
    filter: &ItemPickingFilter,
    accept: impl Fn(&PhysicalItem) -> bool,
) -> Vec<ItemId> {
    candidates(world, area)
        .into_iter()
        .filter(|id| {
            world
                .items
                .get(*id)
                .is_some_and(|item| accept(item) && filter.satisfies_condition(item))
        })
        .collect()
}

pub(super) fn pick_items_by_point(world: &WorldCore, p: Vec2, filter: &ItemPickingFilter) -> Vec<ItemId> {
    let area = Rect::new(p.x - 1.0, p.y - 1.0, 2.0, 2.0);
    pick(world, &area, filter, |item| item.bounding_box().includes(p))
}

pub(super) fn pick_items_in_rectangle(world: &WorldCore, r: &Rect, filter: &ItemPickingFilter) -> Vec<ItemId> {
    pick(world, r, filter, |item| item.bounding_box().intersects(r))
}

pub(super) fn pick_items_in_circle(
    world: &WorldCore,
    center: Vec2,
    radius: f64,
    filter: &ItemPickingFilter,
) -> Vec<ItemId> {
    let area = Rect::new(center.x - radius, center.y - radius, 2.0 * radius, 2.0 * radius);
    pick(world, &area, filter, |item| item.center_of_mass().distance(center) <= radius)
}

pub(super) fn pick_item_in_direction(
    world: &WorldCore,
    origin: Vec2,
    direction: Vec2,
    filter: &ItemPickingFilter,
) -> Option<ItemId> {
    let area = Rect::from_points(origin, origin + direction);
    let mut best: Option<(f64, ItemId)> = None;

    // candidates come in serial order, a strict comparison keeps the oldest
    for id in candidates(world, &area) {
        let Some(item) = world.items.get(id) else {
            continue;
        };
        if !filter.satisfies_condition(item) {
            continue;
        }
        let Some(t) = segment_entry(&item.bounding_box(), origin, direction) else {
            continue;
        };
        if best.map_or(true, |(bt, _)| t < bt) {
            best = Some((t, id));
        }
    }
    best.map(|(_, id)| id)
}

/// Parameter in `[0, 1]` where the segment enters `r`, slab method
fn segment_entry(r: &Rect, origin: Vec2, direction: Vec2) -> Option<f64> {
    let mut t_min = 0.0_f64;
    let mut t_max = 1.0_f64;

    for (o, d, lo, hi) in [
        (origin.x, direction.x, r.left, r.right()),
        (origin.y, direction.y, r.bottom, r.top()),
    ] {
        if d == 0.0 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let (mut t0, mut t1) = ((lo - o) / d, (hi - o) / d);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}
