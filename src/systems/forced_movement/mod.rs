//! Scripted movements driving an item instead of (or as) natural physics.
//!
//! A movement is attached to one item, initialized once, then advanced by
//! `next_position()` which returns the part of the elapsed time it did not
//! use because it finished. Unless disabled, the item's speed and angular
//! speed are then derived from how far it moved.

mod aiming;
mod goto;
mod join;
mod natural;
mod rotation;
mod sequence;
mod speed_generator;
mod stay_around;
mod tracking;
mod translation;

pub use aiming::Aiming;
pub use goto::Goto;
pub use join::Join;
pub use natural::NaturalMovement;
pub use rotation::{AngleApplication, Rotation};
pub use sequence::Sequence;
pub use speed_generator::SpeedGenerator;
pub use stay_around::StayAround;
pub use tracking::Tracking;
pub use translation::Translation;

use crate::core::{TimeType, Vec2};
use crate::domain::{ItemArena, ItemId, PhysicalItem};
use crate::systems::environment::PhysicsEnvironment;
use crate::systems::reference_point::ReferencePoint;

/// What a movement may touch while it runs
pub struct MovementScope<'a> {
    pub items: &'a mut ItemArena,
    pub environment: &'a PhysicsEnvironment,
}

impl<'a> MovementScope<'a> {
    pub fn new(items: &'a mut ItemArena, environment: &'a PhysicsEnvironment) -> Self {
        Self { items, environment }
    }
}

#[derive(Clone, Debug)]
pub enum MovementKind {
    Natural(NaturalMovement),
    Goto(Goto),
    Rotation(Rotation),
    Tracking(Tracking),
    Aiming(Aiming),
    Join(Join),
    StayAround(StayAround),
    Translation(Translation),
    Sequence(Sequence),
}

macro_rules! movement_kind_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for MovementKind {
                fn from(m: $variant) -> Self {
                    MovementKind::$variant(m)
                }
            }
        )*
    };
}

movement_kind_from!(Goto, Rotation, Tracking, Aiming, Join, StayAround, Translation, Sequence);

impl From<NaturalMovement> for MovementKind {
    fn from(m: NaturalMovement) -> Self {
        MovementKind::Natural(m)
    }
}

impl MovementKind {
    fn init(&mut self, m: &mut Mover<'_, '_>) {
        match self {
            MovementKind::Natural(k) => k.init(m),
            MovementKind::Goto(k) => k.init(m),
            MovementKind::Rotation(k) => k.init(m),
            MovementKind::Tracking(k) => k.init(m),
            MovementKind::Aiming(k) => k.init(m),
            MovementKind::Join(k) => k.init(m),
            MovementKind::StayAround(k) => k.init(m),
            MovementKind::Translation(k) => k.init(m),
            MovementKind::Sequence(k) => k.init(m),
        }
    }

    fn next_position(&mut self, m: &mut Mover<'_, '_>, elapsed: TimeType) -> TimeType {
        match self {
            MovementKind::Natural(k) => k.next_position(m, elapsed),
            MovementKind::Goto(k) => k.next_position(m, elapsed),
            MovementKind::Rotation(k) => k.next_position(m, elapsed),
            MovementKind::Tracking(k) => k.next_position(m, elapsed),
            MovementKind::Aiming(k) => k.next_position(m, elapsed),
            MovementKind::Join(k) => k.next_position(m, elapsed),
            MovementKind::StayAround(k) => k.next_position(m, elapsed),
            MovementKind::Translation(k) => k.next_position(m, elapsed),
            MovementKind::Sequence(k) => k.next_position(m, elapsed),
        }
    }

    fn is_finished(&self, has_reference: bool) -> bool {
        match self {
            MovementKind::Natural(k) => k.is_finished(),
            MovementKind::Goto(k) => k.is_finished(),
            MovementKind::Rotation(k) => k.is_finished(),
            MovementKind::Tracking(k) => k.is_finished(has_reference),
            MovementKind::Aiming(k) => k.is_finished(has_reference),
            MovementKind::Join(k) => k.is_finished(has_reference),
            MovementKind::StayAround(k) => k.is_finished(has_reference),
            MovementKind::Translation(k) => k.is_finished(),
            MovementKind::Sequence(k) => k.is_finished(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ForcedMovement {
    kind: MovementKind,
    reference: Option<ReferencePoint>,
    moving_item: Option<ItemId>,
    ratio: Vec2,
    gap: Vec2,
    auto_remove: bool,
    auto_angle: bool,
    derive_cinetic: bool,
    initialized: bool,
}

impl ForcedMovement {
    pub fn new(kind: impl Into<MovementKind>) -> Self {
        Self {
            kind: kind.into(),
            reference: None,
            moving_item: None,
            ratio: Vec2::new(0.5, 0.5),
            gap: Vec2::zero(),
            auto_remove: false,
            auto_angle: false,
            derive_cinetic: true,
            initialized: false,
        }
    }

    pub fn with_reference(mut self, reference: ReferencePoint) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Anchors the movement on the center of mass of `item`
    pub fn with_reference_item(self, item: ItemId) -> Self {
        self.with_reference(ReferencePoint::center_of(item))
    }

    pub fn with_auto_remove(mut self, b: bool) -> Self {
        self.auto_remove = b;
        self
    }

    pub fn with_auto_angle(mut self, b: bool) -> Self {
        self.auto_angle = b;
        self
    }

    /// Point of the moving item that follows the trajectory, as a ratio of its size
    pub fn with_moving_item_ratio(mut self, ratio: Vec2) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn with_moving_item_gap(mut self, gap: Vec2) -> Self {
        self.gap = gap;
        self
    }

    /// Whether speeds are recomputed from the displacement after each step
    pub fn with_derived_cinetic(mut self, b: bool) -> Self {
        self.derive_cinetic = b;
        self
    }

    pub fn kind(&self) -> &MovementKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut MovementKind {
        &mut self.kind
    }

    pub fn reference(&self) -> Option<&ReferencePoint> {
        self.reference.as_ref()
    }

    pub fn set_reference(&mut self, reference: Option<ReferencePoint>) {
        self.reference = reference;
    }

    pub fn has_reference_point(&self, items: &ItemArena) -> bool {
        self.reference.as_ref().map_or(false, |r| r.is_valid(items))
    }

    /// Item whose position drives this movement, if any
    pub fn reference_item(&self, items: &ItemArena) -> Option<ItemId> {
        if let MovementKind::Sequence(s) = &self.kind {
            if let Some(id) = s.current_reference_item(items) {
                return Some(id);
            }
        }

        self.reference.as_ref().and_then(|r| r.get_item(items))
    }

    pub fn moving_item(&self) -> Option<ItemId> {
        self.moving_item
    }

    pub fn set_item(&mut self, item: ItemId) {
        self.moving_item = Some(item);
    }

    pub fn clear_item(&mut self) {
        self.moving_item = None;
    }

    pub fn moving_item_ratio(&self) -> Vec2 {
        self.ratio
    }

    pub fn set_moving_item_ratio(&mut self, ratio: Vec2) {
        self.ratio = ratio;
    }

    pub fn moving_item_gap(&self) -> Vec2 {
        self.gap
    }

    pub fn set_moving_item_gap(&mut self, gap: Vec2) {
        self.gap = gap;
    }

    pub fn auto_remove(&self) -> bool {
        self.auto_remove
    }

    pub fn set_auto_remove(&mut self, b: bool) {
        self.auto_remove = b;
    }

    pub fn set_auto_angle(&mut self, b: bool) {
        self.auto_angle = b;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Starts the movement from the current state of the item.
    ///
    /// Panics if no item is attached.
    pub fn init(&mut self, scope: &mut MovementScope<'_>) {
        let item = self
            .moving_item
            .filter(|id| scope.items.contains_key(*id));
        assert!(item.is_some(), "forced movement initialized without a moving item");

        if let Some(item) = item {
            self.initialized = true;
            let mut mover = Mover::new(scope, item, self.reference.as_ref(), self.ratio, self.gap);
            self.kind.init(&mut mover);
        }
    }

    pub fn is_finished(&self, items: &ItemArena) -> bool {
        self.kind.is_finished(self.has_reference_point(items))
    }

    /// Advances the movement; returns the time left unused
    pub fn next_position(&mut self, scope: &mut MovementScope<'_>, elapsed: TimeType) -> TimeType {
        let Some(item) = self.moving_item.filter(|id| scope.items.contains_key(*id)) else {
            log::warn!("forced movement advanced without a moving item");
            return elapsed;
        };

        if !self.initialized {
            self.init(scope);
        }

        let mut mover = Mover::new(scope, item, self.reference.as_ref(), self.ratio, self.gap);
        let initial_position = mover.position();
        let initial_angle = mover.angle();

        let remaining = self.kind.next_position(&mut mover, elapsed);
        let dt = elapsed - remaining;

        if self.auto_angle {
            let s = mover.item().state().angular_speed();
            let a = mover.angle();
            mover.set_angle(a + s * dt);
        }

        if dt > 0.0 && self.derive_cinetic {
            let angular = (mover.angle() - initial_angle) / dt;
            let speed = (mover.position() - initial_position) / dt;
            let state = mover.item_mut().state_mut();
            state.set_angular_speed(angular);
            state.set_speed(speed);
        }

        remaining
    }
}

/// Moves the item with its forced movement, or with natural physics
pub fn default_move(scope: &mut MovementScope<'_>, id: ItemId, elapsed: TimeType) {
    let Some(item) = scope.items.get_mut(id) else {
        return;
    };

    match item.take_forced_movement() {
        Some(mut movement) => {
            if movement.moving_item().is_none() {
                movement.set_item(id);
            }

            movement.next_position(scope, elapsed);

            let done = movement.auto_remove() && movement.is_finished(scope.items);
            if !done {
                if let Some(item) = scope.items.get_mut(id) {
                    item.restore_forced_movement(movement);
                }
            }
        }
        None => {
            let mut natural = ForcedMovement::new(NaturalMovement::default());
            natural.set_item(id);
            natural.next_position(scope, elapsed);
        }
    }
}

/// View of the moving item given to the movement variants
pub(crate) struct Mover<'s, 'a> {
    scope: &'s mut MovementScope<'a>,
    item: ItemId,
    reference: Option<&'s ReferencePoint>,
    ratio: Vec2,
    gap: Vec2,
}

impl<'s, 'a> Mover<'s, 'a> {
    fn new(
        scope: &'s mut MovementScope<'a>,
        item: ItemId,
        reference: Option<&'s ReferencePoint>,
        ratio: Vec2,
        gap: Vec2,
    ) -> Self {
        Self { scope, item, reference, ratio, gap }
    }

    pub(crate) fn id(&self) -> ItemId {
        self.item
    }

    pub(crate) fn item(&self) -> &PhysicalItem {
        &self.scope.items[self.item]
    }

    pub(crate) fn item_mut(&mut self) -> &mut PhysicalItem {
        &mut self.scope.items[self.item]
    }

    pub(crate) fn scope(&mut self) -> &mut MovementScope<'a> {
        self.scope
    }

    pub(crate) fn environment(&self) -> &PhysicsEnvironment {
        self.scope.environment
    }

    pub(crate) fn ratio(&self) -> Vec2 {
        self.ratio
    }

    pub(crate) fn gap(&self) -> Vec2 {
        self.gap
    }

    /// Point of the item following the trajectory
    pub(crate) fn position(&self) -> Vec2 {
        let s = self.item().state();
        Vec2::new(
            s.left() + s.width() * self.ratio.x + self.gap.x,
            s.bottom() + s.height() * self.ratio.y + self.gap.y,
        )
    }

    pub(crate) fn set_position(&mut self, p: Vec2) {
        let (ratio, gap) = (self.ratio, self.gap);
        let state = self.item_mut().state_mut();
        let bottom_left = Vec2::new(
            p.x - state.width() * ratio.x - gap.x,
            p.y - state.height() * ratio.y - gap.y,
        );
        state.set_bottom_left(bottom_left);
    }

    pub(crate) fn angle(&self) -> f64 {
        self.item().state().system_angle()
    }

    pub(crate) fn set_angle(&mut self, a: f64) {
        self.item_mut().state_mut().set_system_angle(a);
    }

    pub(crate) fn has_reference_point(&self) -> bool {
        self.reference_position().is_some()
    }

    pub(crate) fn reference_position(&self) -> Option<Vec2> {
        self.reference.and_then(|r| r.get_point(self.scope.items))
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
