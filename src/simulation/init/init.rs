use slotmap::SlotMap;

use crate::core::Vec2;
use crate::domain::{CommandQueue, ItemArena, WorldSettings};
use crate::spatial::StaticGrid;
use crate::systems::environment::PhysicsEnvironment;

use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn create_world_core(width: f64, height: f64, settings: &WorldSettings) -> WorldCore {
    log::debug!(
        "creating a {}x{} world, static cells of {}",
        width,
        height,
        settings.static_cell_size
    );

    WorldCore {
        items: ItemArena::with_key(),
        links: SlotMap::with_key(),
        environment: PhysicsEnvironment::from_settings(settings),
        static_grid: StaticGrid::new(width, height, settings.static_cell_size),
        statics: Vec::new(),
        entities: Vec::new(),
        selected: Vec::with_capacity(256),
        touched: Vec::with_capacity(256),
        last_interesting: Vec::new(),
        commands: CommandQueue::new(),
        size: Vec2::new(width, height),
        time: 0.0,
        ticks: 0,
        next_serial: 0,
        next_link_serial: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
