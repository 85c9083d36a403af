use crate::core::{Region, Result, TimeType};

use super::{collisions, commands, dependencies, links, moves, select, traffic};
use super::{PerfTimer, WorldCore};

/// Runs one tick. On a dependency cycle nothing moves, the tick is not
/// counted and the error is returned.
pub(super) fn progress_entities(world: &mut WorldCore, regions: &Region, elapsed: TimeType) -> Result<()> {
    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
    }
    let mut timer = PerfTimer::start();

    // === SELECT ===
    select::search_interesting_items(world, regions);
    let select_ms = timer.lap();

    // === DEPENDENCIES ===
    if let Err(e) = dependencies::stabilize_dependencies(world) {
        commands::apply_commands(world);
        return Err(e);
    }
    let dependencies_ms = timer.lap();

    // === TIME & MOVE ===
    moves::advance_time(world, elapsed);
    moves::move_items(world, elapsed);
    let move_ms = timer.lap();

    // === LINKS ===
    let adjusted = links::apply_links(world);
    let links_ms = timer.lap();

    // === COLLISIONS ===
    let processed = collisions::process_collisions(world);
    let collisions_ms = timer.lap();

    // === REGION TRAFFIC ===
    traffic::region_traffic(world);
    let traffic_ms = timer.lap();
    let selected = world.selected.len();

    end_tick(world);
    world.time += elapsed;
    world.ticks += 1;

    commands::apply_commands(world);

    if perf_on {
        let stats = &mut world.perf_stats;
        stats.select_ms = select_ms;
        stats.dependencies_ms = dependencies_ms;
        stats.move_ms = move_ms;
        stats.links_ms = links_ms;
        stats.collisions_ms = collisions_ms;
        stats.traffic_ms = traffic_ms;
        stats.step_ms = timer.elapsed_ms();
        stats.selected_items = selected as u32;
        stats.collisions_processed = processed;
        stats.links_adjusted = adjusted as u32;
        stats.entity_count = world.entities.len() as u32;
        stats.static_count = world.statics.len() as u32;
    }
    Ok(())
}

fn end_tick(world: &mut WorldCore) {
    for id in world.touched.drain(..) {
        if let Some(item) = world.items.get_mut(id) {
            item.progress.deinit();
        }
    }
    world.selected.clear();
}
