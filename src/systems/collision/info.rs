use crate::core::{Rect, Vec2};
use crate::domain::{ItemId, ItemState};

use super::alignment;
use super::zone::Zone;

/// One side of a collision, seen from the reference item
#[derive(Clone, Debug)]
pub struct CollisionInfo {
    side: Zone,
    position_on_contact: Vec2,
    reference_previous: ItemState,
    other_previous: ItemState,
    other: ItemId,
}

impl CollisionInfo {
    /// `reference_box` and `other_box` are the current boxes, the states are
    /// the snapshots taken at the start of the tick.
    pub fn new(
        reference_previous: &ItemState,
        other_previous: &ItemState,
        reference_box: &Rect,
        other_box: &Rect,
        other: ItemId,
    ) -> Self {
        let zone = Zone::find(&other_previous.bounding_box(), &reference_previous.bounding_box());
        let (aligned, side) =
            alignment::align(zone, reference_box, other_previous.bottom_left(), other_box);

        Self {
            side: side.to_side(),
            position_on_contact: aligned.bottom_left(),
            reference_previous: reference_previous.clone(),
            other_previous: other_previous.clone(),
            other,
        }
    }

    /// Side of the reference item hit first: `Top`, `Bottom`, `MiddleLeft`,
    /// `MiddleRight` or `Middle`
    pub fn side(&self) -> Zone {
        self.side
    }

    /// Bottom-left corner of the other item when it touched the reference item
    pub fn position_on_contact(&self) -> Vec2 {
        self.position_on_contact
    }

    pub fn reference_previous_state(&self) -> &ItemState {
        &self.reference_previous
    }

    pub fn other_previous_state(&self) -> &ItemState {
        &self.other_previous
    }

    pub fn other(&self) -> ItemId {
        self.other
    }

    /// Normal pointing from the reference item toward the other one
    pub fn side_normal(&self) -> Vec2 {
        match self.side {
            Zone::Top => Vec2::new(0.0, 1.0),
            Zone::Bottom => Vec2::new(0.0, -1.0),
            Zone::MiddleLeft => Vec2::new(-1.0, 0.0),
            Zone::MiddleRight => Vec2::new(1.0, 0.0),
            _ => Vec2::zero(),
        }
    }
}
