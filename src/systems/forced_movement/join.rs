use crate::core::{TimeType, Vec2};

use super::Mover;

/// Closes the gap to the reference point linearly over a fixed duration,
/// following the reference if it moves meanwhile
#[derive(Clone, Copy, Debug)]
pub struct Join {
    total_time: TimeType,
    elapsed_time: TimeType,
    initial_offset: Vec2,
}

impl Join {
    pub fn new(total_time: TimeType) -> Self {
        Self { total_time, elapsed_time: 0.0, initial_offset: Vec2::zero() }
    }

    pub(super) fn is_finished(&self, has_reference: bool) -> bool {
        !has_reference || self.elapsed_time >= self.total_time
    }

    pub(super) fn init(&mut self, m: &mut Mover<'_, '_>) {
        self.elapsed_time = 0.0;
        self.initial_offset = match m.reference_position() {
            Some(r) => m.position() - r,
            None => Vec2::zero(),
        };
    }

    pub(super) fn next_position(&mut self, m: &mut Mover<'_, '_>, elapsed: TimeType) -> TimeType {
        let Some(r) = m.reference_position() else {
            return elapsed;
        };

        let end = (self.elapsed_time + elapsed).min(self.total_time);
        let remaining = self.elapsed_time + elapsed - end;
        self.elapsed_time = end;

        let progress = if self.total_time > 0.0 {
            self.elapsed_time / self.total_time
        } else {
            1.0
        };

        m.set_position(r + self.initial_offset * (1.0 - progress));
        remaining
    }
}
