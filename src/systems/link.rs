//! Constraints tying the reference points of two items, applied every tick
//! after the items moved.

use crate::core::Vec2;
use crate::domain::{ItemArena, ItemId, ItemState};
use crate::systems::reference_point::ReferencePoint;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LinkKind {
    /// Pulls or pushes the items with a force proportional to how far the
    /// distance is out of `[min_length, max_length]`
    Elastic { strength: f64, min_length: f64, max_length: f64 },
    /// Moves the items so that the distance stays in `[min_length, max_length]`
    Rigid { min_length: f64, max_length: f64 },
}

#[derive(Clone, Debug)]
pub struct Link {
    serial: u64,
    first: ReferencePoint,
    second: ReferencePoint,
    kind: LinkKind,
}

impl Link {
    pub fn new(first: ReferencePoint, second: ReferencePoint, kind: LinkKind) -> Self {
        Self { serial: 0, first, second, kind }
    }

    pub fn elastic(first: ItemId, second: ItemId, strength: f64, min_length: f64, max_length: f64) -> Self {
        Self::new(
            ReferencePoint::center_of(first),
            ReferencePoint::center_of(second),
            LinkKind::Elastic { strength, min_length, max_length },
        )
    }

    pub fn rigid(first: ItemId, second: ItemId, min_length: f64, max_length: f64) -> Self {
        Self::new(
            ReferencePoint::center_of(first),
            ReferencePoint::center_of(second),
            LinkKind::Rigid { min_length, max_length },
        )
    }

    /// Identifier handed out by the world when the link was created
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub(crate) fn set_serial(&mut self, serial: u64) {
        self.serial = serial;
    }

    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    pub fn first(&self) -> &ReferencePoint {
        &self.first
    }

    pub fn second(&self) -> &ReferencePoint {
        &self.second
    }

    pub fn first_item(&self, items: &ItemArena) -> Option<ItemId> {
        self.first.get_item(items)
    }

    pub fn second_item(&self, items: &ItemArena) -> Option<ItemId> {
        self.second.get_item(items)
    }

    /// Applies the constraint to the two items
    pub fn adjust(&self, items: &mut ItemArena) {
        let (Some(a), Some(b)) = (self.first_item(items), self.second_item(items)) else {
            return;
        };
        let (Some(p1), Some(p2)) = (self.first.get_point(items), self.second.get_point(items)) else {
            return;
        };
        let Some([first, second]) = items.get_disjoint_mut([a, b]) else {
            return;
        };

        let delta = p2 - p1;
        let length = delta.length();
        if length == 0.0 {
            return;
        }
        let dir = delta / length;

        match self.kind {
            LinkKind::Elastic { strength, min_length, max_length } => {
                let target = length.clamp(min_length, max_length);
                if target != length {
                    let force = dir * ((length - target) * strength);
                    first.state_mut().add_external_force(force);
                    second.state_mut().add_external_force(-force);
                }
            }
            LinkKind::Rigid { min_length, max_length } => {
                let target = length.clamp(min_length, max_length);
                if target != length {
                    constrain(first.state_mut(), second.state_mut(), dir, length - target);
                }
            }
        }
    }
}

/// Closes a gap of `excess` along `dir` by moving the items in proportion
/// of their inverse masses, and removes the relative speed widening it
fn constrain(first: &mut ItemState, second: &mut ItemState, dir: Vec2, excess: f64) {
    let inv_first = inverse_mass(first);
    let inv_second = inverse_mass(second);
    let total = inv_first + inv_second;
    if total == 0.0 {
        return;
    }

    let correction = dir * excess;
    let p = first.bottom_left() + correction * (inv_first / total);
    first.set_bottom_left(p);
    let p = second.bottom_left() - correction * (inv_second / total);
    second.set_bottom_left(p);

    let relative = (second.speed() - first.speed()).dot(dir);
    if relative * excess > 0.0 {
        let v = first.speed() + dir * (relative * inv_first / total);
        first.set_speed(v);
        let v = second.speed() - dir * (relative * inv_second / total);
        second.set_speed(v);
    }
}

fn inverse_mass(s: &ItemState) -> f64 {
    if s.is_fixed() || !s.mass().is_finite() || s.mass() <= 0.0 {
        0.0
    } else {
        1.0 / s.mass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rect;
    use crate::domain::PhysicalItem;

    fn pair(distance: f64) -> (ItemArena, ItemId, ItemId) {
        let mut items = ItemArena::with_key();
        let a = items.insert(PhysicalItem::new(Rect::new(0.0, 0.0, 2.0, 2.0)));
        let b = items.insert(PhysicalItem::new(Rect::new(distance, 0.0, 2.0, 2.0)));
        (items, a, b)
    }

    #[test]
    fn elastic_link_pulls_items_together() {
        let (mut items, a, b) = pair(30.0);
        let link = Link::elastic(a, b, 2.0, 0.0, 10.0);

        link.adjust(&mut items);

        assert_eq!(items[a].state().external_force(), Vec2::new(40.0, 0.0));
        assert_eq!(items[b].state().external_force(), Vec2::new(-40.0, 0.0));
    }

    #[test]
    fn elastic_link_is_idle_within_bounds() {
        let (mut items, a, b) = pair(5.0);
        Link::elastic(a, b, 2.0, 0.0, 10.0).adjust(&mut items);
        assert_eq!(items[a].state().external_force(), Vec2::zero());
    }

    #[test]
    fn rigid_link_keeps_the_distance_and_spares_fixed_items() {
        let (mut items, a, b) = pair(30.0);
        items[a].state_mut().fix();
        items[b].state_mut().set_speed(Vec2::new(5.0, 0.0));

        Link::rigid(a, b, 0.0, 10.0).adjust(&mut items);

        assert_eq!(items[a].state().bottom_left(), Vec2::zero());
        assert_eq!(items[b].state().bottom_left(), Vec2::new(10.0, 0.0));
        assert_eq!(items[b].state().speed(), Vec2::zero());
    }

    #[test]
    fn rigid_link_splits_the_correction_by_mass() {
        let (mut items, a, b) = pair(20.0);
        items[b].state_mut().set_mass(3.0);

        Link::rigid(a, b, 0.0, 12.0).adjust(&mut items);

        assert!((items[a].state().left() - 6.0).abs() < 1e-9);
        assert!((items[b].state().left() - 18.0).abs() < 1e-9);
    }

    #[test]
    fn dead_endpoint_makes_the_link_idle() {
        let (mut items, a, b) = pair(30.0);
        let link = Link::elastic(a, b, 1.0, 0.0, 1.0);
        items.remove(b);

        link.adjust(&mut items);
        assert_eq!(items[a].state().external_force(), Vec2::zero());
    }
}
