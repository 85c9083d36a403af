use crate::core::{TimeType, Vec2};

use super::Mover;

/// Heads for the reference point with a bounded turn rate
#[derive(Clone, Copy, Debug)]
pub struct Aiming {
    max_angle: f64,
    max_speed: f64,
    acceleration: f64,
    total_time: TimeType,
    remaining_time: TimeType,
    apply_angle: bool,
}

impl Default for Aiming {
    fn default() -> Self {
        Self::new(TimeType::INFINITY)
    }
}

impl Aiming {
    pub fn new(total_time: TimeType) -> Self {
        Self {
            max_angle: f64::INFINITY,
            max_speed: f64::INFINITY,
            acceleration: f64::INFINITY,
            total_time,
            remaining_time: total_time,
            apply_angle: false,
        }
    }

    /// Largest change of direction per step, in radians
    pub fn with_max_angle(mut self, a: f64) -> Self {
        self.max_angle = a.abs();
        self
    }

    pub fn with_max_speed(mut self, s: f64) -> Self {
        self.max_speed = s.abs();
        self
    }

    pub fn with_acceleration(mut self, a: f64) -> Self {
        self.acceleration = a.abs();
        self
    }

    /// Also turns the item toward its direction
    pub fn with_apply_angle(mut self, b: bool) -> Self {
        self.apply_angle = b;
        self
    }

    pub(super) fn is_finished(&self, has_reference: bool) -> bool {
        !has_reference || self.remaining_time == 0.0
    }

    pub(super) fn init(&mut self, _m: &mut Mover<'_, '_>) {
        self.remaining_time = self.total_time;
    }

    pub(super) fn next_position(&mut self, m: &mut Mover<'_, '_>, elapsed: TimeType) -> TimeType {
        let Some(target) = m.reference_position() else {
            return elapsed;
        };

        let (dt, remaining) = consume(&mut self.remaining_time, elapsed);
        if dt <= 0.0 {
            return remaining;
        }

        let current = m.item().state().speed();
        let s = self.compute_speed(current.length(), dt);
        let (dir, angle) = steer(current, target - m.position(), 0.0, self.max_angle);

        let p = m.position();
        m.set_position(p + dir * s * dt);

        if self.apply_angle {
            m.set_angle(angle);
        }

        remaining
    }

    fn compute_speed(&self, s: f64, dt: TimeType) -> f64 {
        if s < self.max_speed {
            (s + self.acceleration * dt).min(self.max_speed)
        } else if s > self.max_speed {
            (s - self.acceleration * dt).max(self.max_speed)
        } else {
            s
        }
    }
}

/// Takes up to `elapsed` from `remaining_time`; returns (used, left over)
pub(super) fn consume(remaining_time: &mut TimeType, elapsed: TimeType) -> (TimeType, TimeType) {
    if elapsed > *remaining_time {
        let used = *remaining_time;
        *remaining_time = 0.0;
        (used, elapsed - used)
    } else {
        *remaining_time -= elapsed;
        (elapsed, 0.0)
    }
}

/// Turns `current` toward `wanted`, by at most `max_angle` after adding
/// `jitter` to the needed rotation. Returns the new unit direction and its angle.
pub(super) fn steer(current: Vec2, wanted: Vec2, jitter: f64, max_angle: f64) -> (Vec2, f64) {
    let wanted = wanted.normalize();
    let mut current = current.normalize();
    if current.is_zero() {
        current = wanted;
    }

    let v = wanted.dot(current).clamp(-1.0, 1.0);
    let delta = (v.acos() + jitter).min(max_angle);
    let current_angle = current.y.atan2(current.x);

    let final_angle = if current.cross(wanted) > 0.0 {
        current_angle + delta
    } else {
        current_angle - delta
    };

    (Vec2::from_angle(final_angle), final_angle)
}
