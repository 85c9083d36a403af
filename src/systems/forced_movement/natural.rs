use crate::core::{TimeType, Vec2};

use super::Mover;

/// Plain physics: forces, gravity, buoyancy and friction
#[derive(Clone, Copy, Debug)]
pub struct NaturalMovement {
    total_time: TimeType,
    remaining_time: TimeType,
}

impl Default for NaturalMovement {
    fn default() -> Self {
        Self::new(TimeType::INFINITY)
    }
}

impl NaturalMovement {
    pub fn new(duration: TimeType) -> Self {
        Self { total_time: duration, remaining_time: duration }
    }

    pub(super) fn init(&mut self, _m: &mut Mover<'_, '_>) {
        self.remaining_time = self.total_time;
    }

    pub(super) fn is_finished(&self) -> bool {
        self.remaining_time == 0.0
    }

    pub(super) fn next_position(&mut self, m: &mut Mover<'_, '_>, elapsed: TimeType) -> TimeType {
        let (dt, remaining) = if elapsed > self.remaining_time {
            (self.remaining_time, elapsed - self.remaining_time)
        } else {
            (elapsed, 0.0)
        };
        self.remaining_time -= dt;

        let env = m.environment();
        let gravity = env.gravity();
        let state = m.item().state();
        let bounding_box = state.bounding_box();

        let mut force = state.force() + env.average_force(&bounding_box);
        let mass = state.mass();

        if state.density() != 0.0 && mass.is_finite() {
            let displaced = mass / state.density();
            force -= gravity * (env.average_density(&bounding_box) * displaced);
        }

        let acceleration = if mass.is_finite() {
            force / mass + gravity
        } else {
            Vec2::zero()
        };

        // World friction only slows down items that gravity can pull
        let mut friction = state.friction() * state.contact_friction();
        if mass.is_finite() {
            friction *= env.average_friction(&bounding_box);
        }
        let speed = (acceleration * dt + state.speed()) * friction;
        let angle = state.system_angle() + state.angular_speed() * dt * friction;
        let position = bounding_box.bottom_left() + speed * dt;

        let state = m.item_mut().state_mut();
        state.set_bottom_left(position);
        state.set_system_angle(angle);
        state.set_speed(speed);
        state.clear_forces();
        state.set_acceleration(acceleration);

        remaining
    }
}
