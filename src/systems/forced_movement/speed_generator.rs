//! Ease-in/ease-out profile covering a distance in a given time.
//!
//! The speed rises along a half cosine during the acceleration time, stays
//! constant, then falls symmetrically. The covered distance is computed in
//! closed form so the result does not depend on how time is split.

use std::f64::consts::PI;

use crate::core::TimeType;

#[derive(Clone, Copy, Debug)]
pub struct SpeedGenerator {
    distance: f64,
    total_time: TimeType,
    acceleration_time: TimeType,
}

impl Default for SpeedGenerator {
    fn default() -> Self {
        Self {
            distance: 0.0,
            total_time: 0.0,
            acceleration_time: TimeType::INFINITY,
        }
    }
}

impl SpeedGenerator {
    pub fn set_distance(&mut self, d: f64) {
        self.distance = d;
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn set_total_time(&mut self, t: TimeType) {
        self.total_time = t;
    }

    /// Duration of each of the acceleration and deceleration phases
    pub fn set_acceleration_time(&mut self, t: TimeType) {
        self.acceleration_time = t;
    }

    pub fn acceleration_time(&self) -> TimeType {
        self.acceleration_time
    }

    fn ramp(&self) -> TimeType {
        self.acceleration_time.max(0.0).min(self.total_time / 2.0)
    }

    fn max_speed(&self) -> f64 {
        self.distance / (self.total_time - self.ramp())
    }

    fn is_degenerate(&self) -> bool {
        !(self.total_time > 0.0) || !self.total_time.is_finite()
    }

    /// Distance covered after `t` units of time
    pub fn distance_at(&self, t: TimeType) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }

        let t = t.max(0.0).min(self.total_time);
        let ramp = self.ramp();
        let v = self.max_speed();

        if t > self.total_time - ramp {
            return self.distance - self.distance_at(self.total_time - t);
        }

        if t < ramp {
            v * (t / 2.0 - ramp / (2.0 * PI) * (PI * t / ramp).sin())
        } else {
            v * (ramp / 2.0 + (t - ramp))
        }
    }

    /// Instantaneous speed at time `t`
    pub fn speed_at(&self, t: TimeType) -> f64 {
        if self.is_degenerate() || t < 0.0 || t > self.total_time {
            return 0.0;
        }

        let ramp = self.ramp();
        let v = self.max_speed();

        if t < ramp {
            v * (1.0 - (PI * t / ramp).cos()) / 2.0
        } else if t > self.total_time - ramp {
            self.speed_at(self.total_time - t)
        } else {
            v
        }
    }
}
