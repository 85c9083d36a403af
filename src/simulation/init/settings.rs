use crate::core::{Result, Vec2};
use crate::domain::{Environment, WorldSettings};
use crate::spatial::StaticGrid;
use crate::systems::environment::PhysicsEnvironment;

use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    if world.perf_enabled {
        world.perf_stats.clone()
    } else {
        PerfStats::default()
    }
}

pub(super) fn set_gravity(world: &mut WorldCore, gravity: Vec2) {
    world.environment.gravity = gravity;
}

pub(super) fn set_unit(world: &mut WorldCore, unit: f64) {
    if unit > 0.0 && unit.is_finite() {
        world.environment.unit = unit;
    } else {
        log::warn!("ignoring invalid world unit {}", unit);
    }
}

pub(super) fn set_position_epsilon(world: &mut WorldCore, eps: f64) {
    world.environment.position_epsilon = eps.abs();
}

pub(super) fn set_speed_epsilon(world: &mut WorldCore, eps: Vec2) {
    world.environment.speed_epsilon = Vec2::new(eps.x.abs(), eps.y.abs());
}

pub(super) fn set_angular_speed_epsilon(world: &mut WorldCore, eps: f64) {
    world.environment.angular_speed_epsilon = eps.abs();
}

pub(super) fn set_default_friction(world: &mut WorldCore, friction: f64) {
    world.environment.default_friction = friction;
}

pub(super) fn set_default_density(world: &mut WorldCore, density: f64) {
    world.environment.default_density = density;
}

pub(super) fn set_default_environment(world: &mut WorldCore, environment: Environment) {
    world.environment.default_environment = environment;
}

pub(super) fn load_settings_json(world: &mut WorldCore, json: &str) -> Result<()> {
    let settings = WorldSettings::from_json(json)?;
    world.environment = PhysicsEnvironment::from_settings(&settings);

    if world.static_grid.cell_size() != settings.static_cell_size as f64 {
        rebuild_static_grid(world, settings.static_cell_size);
    }

    log::info!(
        "world settings loaded: unit {}, gravity {:?}",
        world.environment.unit(),
        world.environment.gravity()
    );
    Ok(())
}

fn rebuild_static_grid(world: &mut WorldCore, cell_size: u32) {
    let mut grid = StaticGrid::new(world.size.x, world.size.y, cell_size);
    for &id in &world.statics {
        if let Some(item) = world.items.get(id) {
            grid.insert(id, &item.bounding_box());
        }
    }
    world.static_grid = grid;
}
