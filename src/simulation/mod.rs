//! World - tick-driven orchestration of the physical items.
//!
//! `WorldCore` owns every item, link and environment rule. Each call to
//! `progress_entities` runs one tick:
//! - select the items inside the active region
//! - order them so that referenced items move first
//! - age, move, apply links
//! - find and repair collisions, heaviest contacts first
//! - notify items entering or leaving the active region
//!
//! Structural changes requested by item hooks during a tick are queued and
//! applied once the tick is over.

use slotmap::SlotMap;

use crate::core::{Rect, Region, Result, TimeType, Vec2};
use crate::domain::{CommandQueue, Environment, ItemArena, ItemId, LinkId, PhysicalItem, WorldSettings};
use crate::spatial::StaticGrid;
use crate::systems::environment::{
    DensityRectangle, EnvironmentRectangle, ForceRectangle, FrictionRectangle, PhysicsEnvironment, RuleId,
};
use crate::systems::{ForcedMovement, Link};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/select.rs"]
mod select;
#[path = "step/dependencies.rs"]
mod dependencies;
#[path = "step/moves.rs"]
mod moves;
#[path = "step/links.rs"]
mod links;
#[path = "step/collisions.rs"]
mod collisions;
#[path = "step/traffic.rs"]
mod traffic;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "picking/filter.rs"]
mod filter;
#[path = "picking/picking.rs"]
mod picking;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::World;
pub use filter::ItemPickingFilter;
pub use perf_stats::PerfStats;

use perf_timer::PerfTimer;

/// The simulation world
pub struct WorldCore {
    items: ItemArena,
    links: SlotMap<LinkId, Link>,
    environment: PhysicsEnvironment,
    static_grid: StaticGrid,
    statics: Vec<ItemId>,
    entities: Vec<ItemId>,

    // Tick bookkeeping
    selected: Vec<ItemId>,
    touched: Vec<ItemId>,
    last_interesting: Vec<ItemId>,
    commands: CommandQueue,

    // State
    size: Vec2,
    time: TimeType,
    ticks: u64,
    next_serial: u64,
    next_link_serial: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Create a world of the given size with the default settings
    pub fn new(width: f64, height: f64) -> Self {
        init::create_world_core(width, height, &WorldSettings::default())
    }

    pub fn with_settings(width: f64, height: f64, settings: &WorldSettings) -> Result<Self> {
        settings.validate()?;
        Ok(init::create_world_core(width, height, settings))
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Simulated time, sum of every tick duration
    pub fn time(&self) -> TimeType {
        self.time
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    // === ITEMS ===

    pub fn items(&self) -> &ItemArena {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&PhysicalItem> {
        self.items.get(id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut PhysicalItem> {
        self.items.get_mut(id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(id)
    }

    /// Dynamic items, in registration order
    pub fn entities(&self) -> &[ItemId] {
        &self.entities
    }

    pub fn statics(&self) -> &[ItemId] {
        &self.statics
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn static_count(&self) -> usize {
        self.statics.len()
    }

    /// Adds a dynamic item
    pub fn register(&mut self, item: PhysicalItem) -> ItemId {
        commands::register(self, item)
    }

    /// Adds a piece of static geometry. The item is fixed.
    pub fn add_static(&mut self, item: PhysicalItem) -> ItemId {
        commands::add_static(self, item)
    }

    /// Removes an item, unlinking its links. Every key or handle on it stops
    /// resolving.
    ///
    /// Panics if the item is not in the world.
    pub fn release(&mut self, id: ItemId) -> PhysicalItem {
        commands::release(self, id)
    }

    /// Installs a forced movement on `id` and starts it now
    pub fn set_forced_movement(&mut self, id: ItemId, movement: ForcedMovement) {
        commands::set_forced_movement(self, id, movement)
    }

    // === LINKS ===

    /// Adds a link between two distinct living items.
    ///
    /// Panics if an end point has no item or both ends are the same item.
    pub fn link(&mut self, link: Link) -> LinkId {
        commands::link(self, link)
    }

    pub fn unlink(&mut self, id: LinkId) -> Option<Link> {
        commands::unlink(self, id)
    }

    pub fn get_link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id)
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    // === SIMULATION ===

    /// Runs one tick of `elapsed` seconds over the items in `regions`
    pub fn progress_entities(&mut self, regions: &Region, elapsed: TimeType) -> Result<()> {
        step::progress_entities(self, regions, elapsed)
    }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last tick perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === PICKING ===

    /// Items whose box includes `p`
    pub fn pick_items_by_point(&self, p: Vec2, filter: &ItemPickingFilter) -> Vec<ItemId> {
        picking::pick_items_by_point(self, p, filter)
    }

    /// Items whose box intersects `r`
    pub fn pick_items_in_rectangle(&self, r: &Rect, filter: &ItemPickingFilter) -> Vec<ItemId> {
        picking::pick_items_in_rectangle(self, r, filter)
    }

    /// Items whose center of mass is at most `radius` away from `center`
    pub fn pick_items_in_circle(&self, center: Vec2, radius: f64, filter: &ItemPickingFilter) -> Vec<ItemId> {
        picking::pick_items_in_circle(self, center, radius, filter)
    }

    /// First item met on the segment from `origin` to `origin + direction`
    pub fn pick_item_in_direction(
        &self,
        origin: Vec2,
        direction: Vec2,
        filter: &ItemPickingFilter,
    ) -> Option<ItemId> {
        picking::pick_item_in_direction(self, origin, direction, filter)
    }

    // === ENVIRONMENT ===

    pub fn environment(&self) -> &PhysicsEnvironment {
        &self.environment
    }

    pub fn gravity(&self) -> Vec2 {
        self.environment.gravity()
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        settings::set_gravity(self, gravity);
    }

    pub fn unit(&self) -> f64 {
        self.environment.unit()
    }

    pub fn set_unit(&mut self, unit: f64) {
        settings::set_unit(self, unit);
    }

    pub fn set_position_epsilon(&mut self, eps: f64) {
        settings::set_position_epsilon(self, eps);
    }

    pub fn set_speed_epsilon(&mut self, eps: Vec2) {
        settings::set_speed_epsilon(self, eps);
    }

    pub fn set_angular_speed_epsilon(&mut self, eps: f64) {
        settings::set_angular_speed_epsilon(self, eps);
    }

    pub fn set_default_friction(&mut self, friction: f64) {
        settings::set_default_friction(self, friction);
    }

    pub fn set_default_density(&mut self, density: f64) {
        settings::set_default_density(self, density);
    }

    pub fn set_default_environment(&mut self, environment: Environment) {
        settings::set_default_environment(self, environment);
    }

    /// Replaces every tunable and zone rule with the content of a JSON document
    pub fn load_settings_json(&mut self, json: &str) -> Result<()> {
        settings::load_settings_json(self, json)
    }

    pub fn add_friction_rectangle(&mut self, rectangle: Rect, friction: f64) -> RuleId {
        self.environment.add_friction_rectangle(rectangle, friction)
    }

    pub fn friction_rectangle_mut(&mut self, id: RuleId) -> Option<&mut FrictionRectangle> {
        self.environment.friction_rectangle_mut(id)
    }

    pub fn add_force_rectangle(&mut self, rectangle: Rect, force: Vec2) -> RuleId {
        self.environment.add_force_rectangle(rectangle, force)
    }

    pub fn force_rectangle_mut(&mut self, id: RuleId) -> Option<&mut ForceRectangle> {
        self.environment.force_rectangle_mut(id)
    }

    pub fn add_density_rectangle(&mut self, rectangle: Rect, density: f64) -> RuleId {
        self.environment.add_density_rectangle(rectangle, density)
    }

    pub fn density_rectangle_mut(&mut self, id: RuleId) -> Option<&mut DensityRectangle> {
        self.environment.density_rectangle_mut(id)
    }

    pub fn add_environment_rectangle(&mut self, rectangle: Rect, environment: Environment) -> RuleId {
        self.environment.add_environment_rectangle(rectangle, environment)
    }

    pub fn environment_rectangle_mut(&mut self, id: RuleId) -> Option<&mut EnvironmentRectangle> {
        self.environment.environment_rectangle_mut(id)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
