use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::core::{Result, UniverseError};
use crate::domain::ItemId;

use super::select::select_item;
use super::WorldCore;

/// Orders the selected items so every item comes after the items it depends
/// on. Items referenced by a selected item are selected too.
pub(super) fn stabilize_dependencies(world: &mut WorldCore) -> Result<()> {
    let mut edges: Vec<(ItemId, ItemId)> = Vec::new();
    let mut dependents = Vec::new();
    let mut i = 0;

    // `selected` grows while we walk it
    while i < world.selected.len() {
        let id = world.selected[i];
        i += 1;

        let start = edges.len();
        let Some(item) = world.items.get(id) else {
            continue;
        };

        if let Some(reference) = item.movement_reference().live_id(&world.items) {
            edges.push((reference, id));
        }
        if let Some(reference) = item.forced_movement().and_then(|m| m.reference_item(&world.items)) {
            edges.push((reference, id));
        }

        dependents.clear();
        if let Some(behavior) = item.behavior() {
            behavior.dependent_items(item, &mut dependents);
        }
        edges.extend(
            dependents
                .iter()
                .filter(|d| world.items.contains_key(**d))
                .map(|d| (id, *d)),
        );

        for k in start..edges.len() {
            let (from, to) = edges[k];
            select_item(world, from);
            select_item(world, to);
        }
    }

    edges.retain(|(from, to)| from != to);

    match topological_order(&world.selected, &edges) {
        Ok(order) => {
            world.selected = order;
            Ok(())
        }
        Err(count) => {
            log::error!("dependency cycle between {} items, tick aborted", count);
            for id in world.touched.drain(..) {
                if let Some(item) = world.items.get_mut(id) {
                    item.progress.abort();
                }
            }
            world.selected.clear();
            Err(UniverseError::DependencyCycle { count })
        }
    }
}

/// Kahn's algorithm; among the ready nodes the earliest in `nodes` goes
/// first. Fails with the number of nodes left on a cycle.
pub(super) fn topological_order(nodes: &[ItemId], edges: &[(ItemId, ItemId)]) -> std::result::Result<Vec<ItemId>, usize> {
    let index: HashMap<ItemId, usize> = nodes.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut in_degree = vec![0usize; nodes.len()];

    for (from, to) in edges {
        let (Some(&a), Some(&b)) = (index.get(from), index.get(to)) else {
            continue;
        };
        if successors[a].contains(&b) {
            continue;
        }
        successors[a].push(b);
        in_degree[b] += 1;
    }

    let mut ready: BinaryHeap<Reverse<usize>> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, d)| **d == 0)
        .map(|(i, _)| Reverse(i))
        .collect();

    let mut order = Vec::with_capacity(nodes.len());
    while let Some(Reverse(n)) = ready.pop() {
        order.push(nodes[n]);
        for &s in &successors[n] {
            in_degree[s] -= 1;
            if in_degree[s] == 0 {
                ready.push(Reverse(s));
            }
        }
    }

    if order.len() == nodes.len() {
        Ok(order)
    } else {
        Err(nodes.len() - order.len())
    }
}
