use std::collections::HashSet;

use crate::domain::LinkId;

use super::WorldCore;

/// Adjusts each link touching a selected item once; returns how many ran
pub(super) fn apply_links(world: &mut WorldCore) -> usize {
    let mut seen: HashSet<LinkId> = HashSet::new();
    let mut order = Vec::new();

    for id in &world.selected {
        let Some(item) = world.items.get(*id) else {
            continue;
        };
        for link in item.links() {
            if seen.insert(*link) {
                order.push(*link);
            }
        }
    }

    let mut adjusted = 0;
    for id in order {
        if let Some(link) = world.links.get(id) {
            link.adjust(&mut world.items);
            adjusted += 1;
        }
    }
    adjusted
}
