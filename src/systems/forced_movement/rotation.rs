use crate::core::{TimeType, Vec2};

use super::speed_generator::SpeedGenerator;
use super::Mover;

/// How the rotation angle is reflected on the item's own angle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AngleApplication {
    /// Adds the current angle to the item's angle
    Add,
    /// The item's angle is the current angle
    Force,
    /// The item's angle is the angle travelled since the start
    ForceDelta,
    /// The item's angle is the angle remaining to the end
    ForceRemaining,
    #[default]
    Keep,
}

/// Circular move around the reference point, between two angles
#[derive(Clone, Copy, Debug)]
pub struct Rotation {
    start_angle: f64,
    end_angle: f64,
    angle: f64,
    segment_origin: f64,
    radius: Option<f64>,
    total_time: TimeType,
    elapsed_time: TimeType,
    loop_back: bool,
    loops: u32,
    loop_count: u32,
    playing_forward: bool,
    angle_application: AngleApplication,
    speed_generator: SpeedGenerator,
}

impl Default for Rotation {
    fn default() -> Self {
        Self {
            start_angle: -3.14159,
            end_angle: 3.14159,
            angle: 0.0,
            segment_origin: 0.0,
            radius: None,
            total_time: TimeType::INFINITY,
            elapsed_time: 0.0,
            loop_back: false,
            loops: 0,
            loop_count: 0,
            playing_forward: true,
            angle_application: AngleApplication::Keep,
            speed_generator: SpeedGenerator::default(),
        }
    }
}

impl Rotation {
    pub fn new(start_angle: f64, end_angle: f64, total_time: TimeType) -> Self {
        Self { start_angle, end_angle, total_time, ..Self::default() }
    }

    /// Distance to the reference; computed from the positions at init when unset
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Number of sweeps before finishing, zero meaning forever
    pub fn with_loops(mut self, loops: u32) -> Self {
        self.loops = loops;
        self
    }

    pub fn with_loop_back(mut self, b: bool) -> Self {
        self.loop_back = b;
        self
    }

    pub fn with_angle_application(mut self, a: AngleApplication) -> Self {
        self.angle_application = a;
        self
    }

    pub fn with_acceleration_time(mut self, t: TimeType) -> Self {
        self.speed_generator.set_acceleration_time(t);
        self
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn radius(&self) -> Option<f64> {
        self.radius
    }

    pub(super) fn is_finished(&self) -> bool {
        self.loops != 0 && self.loop_count == self.loops
    }

    pub(super) fn init(&mut self, m: &mut Mover<'_, '_>) {
        if self.radius.is_none() {
            if let Some(r) = m.reference_position() {
                self.radius = Some(r.distance(m.position()));
            }
        }

        self.speed_generator.set_distance(self.end_angle - self.start_angle);
        self.speed_generator.set_total_time(self.total_time);

        self.angle = self.start_angle;
        self.segment_origin = self.start_angle;
        self.elapsed_time = 0.0;
        self.loop_count = 0;
        self.playing_forward = true;
        self.set_item_position(m);
    }

    pub(super) fn next_position(&mut self, m: &mut Mover<'_, '_>, elapsed: TimeType) -> TimeType {
        if self.is_finished() {
            return elapsed;
        }

        let remaining = self.update_angle(elapsed);
        self.set_item_position(m);
        remaining
    }

    fn update_angle(&mut self, elapsed: TimeType) -> TimeType {
        let mut remaining = 0.0;
        let mut t = elapsed;
        let mut boundary = false;

        if self.elapsed_time + t > self.total_time {
            remaining = self.elapsed_time + t - self.total_time;
            t = self.total_time - self.elapsed_time;
            boundary = true;
        }

        if self.total_time == 0.0 {
            self.angle = self.end_angle;
        } else {
            self.elapsed_time += t;
            self.angle = self.segment_origin + self.speed_generator.distance_at(self.elapsed_time);
        }

        if boundary {
            if self.playing_forward {
                self.end_reached();
            } else {
                self.start_reached();
            }

            if remaining > 0.0 && !self.is_finished() && remaining != elapsed {
                remaining = self.update_angle(remaining);
            }
        }

        remaining
    }

    fn end_reached(&mut self) {
        self.elapsed_time = 0.0;

        if self.loop_back {
            let d = self.speed_generator.distance();
            self.speed_generator.set_distance(-d);
            self.angle = self.end_angle;
            self.segment_origin = self.end_angle;
            self.playing_forward = false;
        } else {
            self.loop_count += 1;
            self.angle = if self.loop_count == self.loops {
                self.end_angle
            } else {
                self.start_angle
            };
            self.segment_origin = self.start_angle;
        }
    }

    fn start_reached(&mut self) {
        self.loop_count += 1;
        self.elapsed_time = 0.0;
        self.angle = self.start_angle;
        self.segment_origin = self.start_angle;
        let d = self.speed_generator.distance();
        self.speed_generator.set_distance(-d);
        self.playing_forward = true;
    }

    fn set_item_position(&self, m: &mut Mover<'_, '_>) {
        if let (Some(center), Some(radius)) = (m.reference_position(), self.radius) {
            m.set_position(center + Vec2::from_angle(self.angle) * radius);
        }

        match self.angle_application {
            AngleApplication::Add => {
                let a = m.angle();
                m.set_angle(a + self.angle);
            }
            AngleApplication::Force => m.set_angle(self.angle),
            AngleApplication::ForceDelta => m.set_angle(self.angle - self.start_angle),
            AngleApplication::ForceRemaining => m.set_angle(self.angle - self.end_angle),
            AngleApplication::Keep => {}
        }
    }
}
