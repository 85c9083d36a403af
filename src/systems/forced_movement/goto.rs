use crate::core::{TimeType, Vec2};

use super::speed_generator::SpeedGenerator;
use super::Mover;

/// Straight move by a given length, easing in and out
#[derive(Clone, Copy, Debug)]
pub struct Goto {
    total_time: TimeType,
    elapsed_time: TimeType,
    length: Vec2,
    origin: Vec2,
    target: Vec2,
    speed_generator: SpeedGenerator,
}

impl Goto {
    pub fn new(total_time: TimeType) -> Self {
        Self {
            total_time,
            elapsed_time: 0.0,
            length: Vec2::zero(),
            origin: Vec2::zero(),
            target: Vec2::zero(),
            speed_generator: SpeedGenerator::default(),
        }
    }

    pub fn with_length(mut self, length: Vec2) -> Self {
        self.length = length;
        self
    }

    /// Duration of the ease-in phase, and of the ease-out phase
    pub fn with_acceleration_time(mut self, t: TimeType) -> Self {
        self.speed_generator.set_acceleration_time(t);
        self
    }

    pub fn set_total_time(&mut self, t: TimeType) {
        self.total_time = t;
    }

    pub fn set_length(&mut self, length: Vec2) {
        self.length = length;
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub(super) fn init(&mut self, m: &mut Mover<'_, '_>) {
        self.elapsed_time = 0.0;
        self.origin = m.position();
        self.target = self.origin + self.length;
        self.speed_generator.set_distance(self.length.length());
        self.speed_generator.set_total_time(self.total_time);
    }

    pub(super) fn is_finished(&self) -> bool {
        self.elapsed_time == self.total_time
    }

    pub(super) fn next_position(&mut self, m: &mut Mover<'_, '_>, elapsed: TimeType) -> TimeType {
        if self.elapsed_time + elapsed >= self.total_time {
            let remaining = self.elapsed_time + elapsed - self.total_time;
            self.elapsed_time = self.total_time;
            m.set_position(self.target);
            remaining
        } else {
            self.elapsed_time += elapsed;
            let d = self.length.normalize() * self.speed_generator.distance_at(self.elapsed_time);
            m.set_position(self.origin + d);
            0.0
        }
    }
}
