use crate::core::Vec2;
use crate::domain::{ItemId, ItemState};

/// Impulse exchanged by the two items of a collision along the contact normal
#[derive(Clone, Debug)]
pub struct CollisionRepair {
    first: ItemId,
    second: ItemId,
    /// From `first` toward `second`
    normal: Vec2,
}

impl CollisionRepair {
    pub fn new(first: ItemId, second: ItemId) -> Self {
        Self { first, second, normal: Vec2::zero() }
    }

    pub fn first(&self) -> ItemId {
        self.first
    }

    pub fn second(&self) -> ItemId {
        self.second
    }

    /// Sets the normal of the contact surface of `item`, pointing from its
    /// partner toward it
    pub fn set_contact_normal(&mut self, item: ItemId, normal: Vec2) {
        self.normal = if item == self.first { -normal } else { normal };
    }

    /// Normal pointing from the first item toward the second
    pub fn contact_normal(&self) -> Vec2 {
        self.normal
    }

    /// Applies the impulse to the speeds of `first` and `second`. Nothing
    /// happens when the items are separating or when neither can move.
    pub fn apply(&self, first: &mut ItemState, second: &mut ItemState) {
        let n = self.normal.normalize();
        if n.is_zero() {
            return;
        }

        let vn = (second.speed() - first.speed()).dot(n);
        if vn >= 0.0 {
            return;
        }

        let inv_first = inverse_mass(first);
        let inv_second = inverse_mass(second);
        let total = inv_first + inv_second;
        if total == 0.0 {
            return;
        }

        let restitution = restitution(first, second);
        let j = -(1.0 + restitution) * vn / total;

        let v = first.speed() - n * (j * inv_first);
        first.set_speed(v);
        let v = second.speed() + n * (j * inv_second);
        second.set_speed(v);
    }
}

/// Restitution coefficient of a contact between `a` and `b`
pub fn restitution(a: &ItemState, b: &ItemState) -> f64 {
    a.hardness() * b.elasticity() + a.elasticity() * b.hardness()
}

fn inverse_mass(s: &ItemState) -> f64 {
    if s.is_fixed() || !s.mass().is_finite() || s.mass() <= 0.0 {
        0.0
    } else {
        1.0 / s.mass()
    }
}
