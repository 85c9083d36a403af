use std::f64::consts::PI;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::core::{TimeType, Vec2};

use super::aiming::{consume, steer};
use super::Mover;

const DEFAULT_SEED: u64 = 0x5EED_A120_0D00;

/// Random wandering around the reference point. The further the item is,
/// the less random its direction and the more it heads back.
#[derive(Clone, Debug)]
pub struct StayAround {
    max_angle: f64,
    speed: f64,
    max_distance: f64,
    total_time: TimeType,
    remaining_time: TimeType,
    apply_angle: bool,
    position_delta: Vec2,
    previous_reference: Vec2,
    rng: SmallRng,
}

impl Default for StayAround {
    fn default() -> Self {
        Self::new(TimeType::INFINITY)
    }
}

impl StayAround {
    pub fn new(total_time: TimeType) -> Self {
        Self {
            max_angle: f64::INFINITY,
            speed: f64::INFINITY,
            max_distance: f64::INFINITY,
            total_time,
            remaining_time: total_time,
            apply_angle: false,
            position_delta: Vec2::zero(),
            previous_reference: Vec2::zero(),
            rng: SmallRng::seed_from_u64(DEFAULT_SEED),
        }
    }

    pub fn with_max_angle(mut self, a: f64) -> Self {
        self.max_angle = a.abs();
        self
    }

    pub fn with_speed(mut self, s: f64) -> Self {
        self.speed = s.abs();
        self
    }

    pub fn with_max_distance(mut self, d: f64) -> Self {
        self.max_distance = d.abs();
        self
    }

    pub fn with_apply_angle(mut self, b: bool) -> Self {
        self.apply_angle = b;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    pub(super) fn is_finished(&self, has_reference: bool) -> bool {
        !has_reference || self.remaining_time == 0.0
    }

    pub(super) fn init(&mut self, m: &mut Mover<'_, '_>) {
        self.remaining_time = self.total_time;

        match m.reference_position() {
            Some(r) => {
                self.previous_reference = r;
                self.position_delta = m.position() - r;
            }
            None => {
                self.previous_reference = Vec2::zero();
                self.position_delta = Vec2::zero();
            }
        }
    }

    pub(super) fn next_position(&mut self, m: &mut Mover<'_, '_>, elapsed: TimeType) -> TimeType {
        let Some(r) = m.reference_position() else {
            return elapsed;
        };

        let (dt, remaining) = consume(&mut self.remaining_time, elapsed);
        if dt <= 0.0 {
            return remaining;
        }

        // direction relative to the reference, which may move too
        let current = m.item().state().speed() - (r - self.previous_reference) / dt;
        let to_reference = r - m.position();

        let closeness = (to_reference.length() / self.max_distance).min(1.0);
        let max_jitter = 2.0 * PI * (1.0 - closeness);
        let jitter = if max_jitter > 0.0 {
            self.rng.gen_range(0.0..max_jitter) - max_jitter / 2.0
        } else {
            0.0
        };

        let (dir, angle) = steer(current, to_reference, jitter, self.max_angle);
        self.position_delta += dir * self.speed * dt;
        m.set_position(r + self.position_delta);

        if self.apply_angle {
            m.set_angle(angle);
        }

        self.previous_reference = r;
        remaining
    }
}
