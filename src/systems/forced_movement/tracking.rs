use crate::core::{TimeType, Vec2};

use super::Mover;

/// Keeps the item at a constant offset from the reference point
#[derive(Clone, Copy, Debug)]
pub struct Tracking {
    distance: Option<Vec2>,
    total_time: TimeType,
    remaining_time: TimeType,
}

impl Default for Tracking {
    fn default() -> Self {
        Self::new(TimeType::INFINITY)
    }
}

impl Tracking {
    pub fn new(total_time: TimeType) -> Self {
        Self { distance: None, total_time, remaining_time: total_time }
    }

    /// Offset from the reference; taken from the positions at init when unset
    pub fn with_distance(mut self, distance: Vec2) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn distance(&self) -> Option<Vec2> {
        self.distance
    }

    pub(super) fn is_finished(&self, has_reference: bool) -> bool {
        !has_reference || self.remaining_time == 0.0
    }

    pub(super) fn init(&mut self, m: &mut Mover<'_, '_>) {
        self.remaining_time = self.total_time;

        if let Some(r) = m.reference_position() {
            if self.distance.is_none() {
                self.distance = Some(m.position() - r);
            }
        }

        self.next_position(m, 0.0);
    }

    pub(super) fn next_position(&mut self, m: &mut Mover<'_, '_>, elapsed: TimeType) -> TimeType {
        let Some(r) = m.reference_position() else {
            return elapsed;
        };

        m.set_position(r + self.distance.unwrap_or_default());

        if self.remaining_time < elapsed {
            let result = elapsed - self.remaining_time;
            self.remaining_time = 0.0;
            result
        } else {
            self.remaining_time -= elapsed;
            0.0
        }
    }
}
