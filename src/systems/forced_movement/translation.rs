use crate::core::{TimeType, Vec2};

use super::Mover;

/// Constant speed, optionally forcing the item's angle
#[derive(Clone, Copy, Debug)]
pub struct Translation {
    speed: Vec2,
    total_time: TimeType,
    remaining_time: TimeType,
    angle: f64,
    force_angle: bool,
}

impl Default for Translation {
    fn default() -> Self {
        Self::new(Vec2::zero(), TimeType::INFINITY)
    }
}

impl Translation {
    pub fn new(speed: Vec2, total_time: TimeType) -> Self {
        Self { speed, total_time, remaining_time: total_time, angle: 0.0, force_angle: false }
    }

    /// Angle added to the item at each step, or set once when forced
    pub fn with_angle(mut self, angle: f64, force: bool) -> Self {
        self.angle = angle;
        self.force_angle = force;
        self
    }

    pub fn speed(&self) -> Vec2 {
        self.speed
    }

    pub(super) fn is_finished(&self) -> bool {
        self.remaining_time == 0.0
    }

    pub(super) fn init(&mut self, _m: &mut Mover<'_, '_>) {
        self.remaining_time = self.total_time;
    }

    pub(super) fn next_position(&mut self, m: &mut Mover<'_, '_>, elapsed: TimeType) -> TimeType {
        let (dt, remaining) = if elapsed > self.remaining_time {
            (self.remaining_time, elapsed - self.remaining_time)
        } else {
            (elapsed, 0.0)
        };

        let p = m.position();
        m.set_position(p + self.speed * dt);

        if self.force_angle {
            m.set_angle(self.angle);
        } else {
            let a = m.angle();
            m.set_angle(a + self.angle);
        }

        self.remaining_time -= dt;
        remaining
    }
}
