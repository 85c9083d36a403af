use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::*;
use crate::core::UniverseError;
use crate::domain::{ContactRange, ItemBehavior, ItemContext, ItemHandle, MoveContext, Solid};
use crate::systems::CollisionContext;

type Log<T> = Rc<RefCell<Vec<T>>>;

fn world() -> WorldCore {
    let settings = WorldSettings { gravity: Some(Vec2::zero()), ..WorldSettings::default() };
    WorldCore::with_settings(1000.0, 1000.0, &settings).unwrap()
}

fn everywhere() -> Region {
    Region::from(Rect::new(-1000.0, -1000.0, 3000.0, 3000.0))
}

fn square(left: f64, bottom: f64) -> PhysicalItem {
    PhysicalItem::new(Rect::new(left, bottom, 10.0, 10.0))
}

/// Records every collision as (self, other); optionally jumps to a position
/// in `time_step`
struct Recorder {
    log: Log<(ItemId, ItemId)>,
    jump_to: Option<Vec2>,
}

impl ItemBehavior for Recorder {
    fn time_step(&mut self, ctx: &mut ItemContext<'_>, _elapsed: TimeType) {
        if let Some(p) = self.jump_to.take() {
            ctx.item.state_mut().set_bottom_left(p);
        }
    }

    fn collision(&mut self, ctx: &mut CollisionContext<'_>) {
        self.log.borrow_mut().push((ctx.id(), ctx.other_id()));
    }
}

#[test]
fn overlapping_pair_collides_once_per_item() {
    let mut world = world();
    let log: Log<(ItemId, ItemId)> = Rc::default();

    let a = world.register(
        square(0.0, 0.0)
            .with_mass(50.0)
            .with_behavior(Recorder { log: log.clone(), jump_to: None }),
    );
    let b = world.register(
        square(100.0, 0.0)
            .with_mass(50.0)
            .with_behavior(Recorder { log: log.clone(), jump_to: Some(Vec2::zero()) }),
    );

    world.progress_entities(&everywhere(), 0.1).unwrap();

    assert_eq!(*log.borrow(), vec![(a, b), (b, a)]);
    assert_eq!(world.item(b).unwrap().bounding_box(), Rect::new(0.0, 0.0, 10.0, 10.0));
}

#[test]
fn heaviest_partner_is_met_first_even_when_phantom() {
    let mut world = world();
    let log: Log<(ItemId, ItemId)> = Rc::default();

    let a = world.register(square(0.0, 0.0).with_behavior(Recorder { log: log.clone(), jump_to: None }));
    let light = world.register(square(-5.0, 0.0));
    let mut ghost = square(5.0, 0.0).with_mass(100.0);
    ghost.state_mut().set_phantom(true);
    let ghost = world.register(ghost);

    world.progress_entities(&everywhere(), 0.1).unwrap();

    assert_eq!(*log.borrow(), vec![(a, ghost), (a, light)]);
}

#[test]
fn solid_item_lands_on_static_floor() {
    let mut world = world();
    world.add_static(PhysicalItem::new(Rect::new(0.0, 0.0, 100.0, 10.0)).with_behavior(Solid));

    let mut falling = square(10.0, 12.0).with_behavior(Solid);
    falling.state_mut().set_speed(Vec2::new(0.0, -100.0));
    let id = world.register(falling);

    world.progress_entities(&everywhere(), 0.1).unwrap();

    let state = world.item(id).unwrap().state();
    assert!((state.bottom() - 10.001).abs() < 1e-9, "{}", state.bottom());
    assert_eq!(state.speed(), Vec2::zero());
    assert!(state.has_bottom_contact());
}

#[test]
fn fixed_items_lose_their_contacts_on_the_next_tick() {
    let mut world = world();
    let floor = world.add_static(PhysicalItem::new(Rect::new(0.0, 0.0, 100.0, 10.0)).with_behavior(Solid));

    let mut falling = square(10.0, 12.0).with_behavior(Solid);
    falling.state_mut().set_speed(Vec2::new(0.0, -100.0));
    let id = world.register(falling);

    world.progress_entities(&everywhere(), 0.1).unwrap();
    assert!(world.item(floor).unwrap().state().has_contact());

    world.release(id);
    world.progress_entities(&everywhere(), 0.1).unwrap();
    assert!(!world.item(floor).unwrap().state().has_contact());
}

#[test]
fn skipped_move_keeps_dependents_waiting() {
    let mut world = world();
    let reference = world.register(square(0.0, 0.0));
    let mut follower = square(50.0, 0.0);
    follower.state_mut().set_speed(Vec2::new(10.0, 0.0));
    follower.state_mut().set_right_contact(ContactRange { min: 0.0, max: 10.0 });
    let follower = world.register(follower);
    world.item_mut(follower).unwrap().set_movement_reference(ItemHandle::new(reference));

    world.selected = vec![follower, reference];
    for id in [follower, reference] {
        select::touch_item(&mut world, id);
    }
    moves::move_items(&mut world, 1.0);

    let state = world.item(follower).unwrap().state();
    assert_eq!(state.left(), 50.0);
    assert!(!state.has_contact());
    assert!(!world.item(follower).unwrap().progress().move_is_done());
    assert!(world.item(reference).unwrap().progress().move_is_done());
}

#[test]
fn infinite_mass_keeps_its_speed() {
    let mut world = world();

    let mut heavy = square(0.0, 0.0).with_mass(f64::INFINITY).with_behavior(Solid);
    heavy.state_mut().set_speed(Vec2::new(10.0, 0.0));
    let heavy = world.register(heavy);
    let light = world.register(square(15.0, 0.0).with_behavior(Solid));

    world.progress_entities(&everywhere(), 1.0).unwrap();

    assert_eq!(world.item(heavy).unwrap().state().speed().x, 10.0);
    assert_eq!(world.item(light).unwrap().state().speed().x, 10.0);
}

#[test]
fn fixed_items_never_move() {
    let mut world = WorldCore::new(1000.0, 1000.0);
    let floor = world.add_static(PhysicalItem::new(Rect::new(0.0, 0.0, 100.0, 10.0)));
    let mut item = square(0.0, 5.0).with_behavior(Solid);
    item.state_mut().set_speed(Vec2::new(0.0, -50.0));
    world.register(item);

    for _ in 0..5 {
        world.progress_entities(&everywhere(), 0.05).unwrap();
    }

    let floor = world.item(floor).unwrap();
    assert_eq!(floor.bounding_box(), Rect::new(0.0, 0.0, 100.0, 10.0));
    assert_eq!(floor.state().speed(), Vec2::zero());
}

/// Records the order of the moves
struct MoveOrder {
    log: Log<ItemId>,
}

impl ItemBehavior for MoveOrder {
    fn move_item(&mut self, ctx: &mut MoveContext<'_>, elapsed: TimeType) {
        self.log.borrow_mut().push(ctx.id);
        ctx.default_move(elapsed);
    }
}

#[test]
fn movement_reference_moves_first() {
    let mut world = world();
    let log: Log<ItemId> = Rc::default();

    let follower = world.register(square(0.0, 0.0).with_behavior(MoveOrder { log: log.clone() }));
    let leader = world.register(square(50.0, 0.0).with_behavior(MoveOrder { log: log.clone() }));
    world
        .item_mut(follower)
        .unwrap()
        .set_movement_reference(ItemHandle::new(leader));

    world.progress_entities(&everywhere(), 0.1).unwrap();

    assert_eq!(*log.borrow(), vec![leader, follower]);
}

#[test]
fn reference_outside_the_region_is_pulled_in() {
    let mut world = world();
    let log: Log<ItemId> = Rc::default();

    let follower = world.register(square(0.0, 0.0).with_behavior(MoveOrder { log: log.clone() }));
    let leader = world.register(square(900.0, 900.0).with_behavior(MoveOrder { log: log.clone() }));
    world
        .item_mut(follower)
        .unwrap()
        .set_movement_reference(ItemHandle::new(leader));

    let region = Region::from(Rect::new(0.0, 0.0, 100.0, 100.0));
    world.progress_entities(&region, 0.1).unwrap();

    assert_eq!(*log.borrow(), vec![leader, follower]);
}

#[test]
fn dependency_cycle_aborts_the_tick() {
    let mut world = world();
    let a = world.register(square(0.0, 0.0));
    let b = world.register(square(50.0, 0.0));
    world.item_mut(a).unwrap().set_movement_reference(ItemHandle::new(b));
    world.item_mut(b).unwrap().set_movement_reference(ItemHandle::new(a));

    let result = world.progress_entities(&everywhere(), 0.1);

    assert!(matches!(result, Err(UniverseError::DependencyCycle { count: 2 })));
    assert_eq!(world.tick_count(), 0);
    assert!(!world.item(a).unwrap().progress().is_initialized());

    // breaking the cycle lets the world run again
    world.item_mut(b).unwrap().set_movement_reference(ItemHandle::empty());
    world.progress_entities(&everywhere(), 0.1).unwrap();
    assert_eq!(world.tick_count(), 1);
}

fn keys(n: usize) -> Vec<ItemId> {
    let mut map: SlotMap<ItemId, ()> = SlotMap::with_key();
    (0..n).map(|_| map.insert(())).collect()
}

#[test]
fn topological_order_keeps_ties_in_input_order() {
    let ids = keys(5);
    let edges = [(ids[3], ids[1]), (ids[1], ids[2]), (ids[0], ids[3])];

    let order = dependencies::topological_order(&ids, &edges).unwrap();

    assert_eq!(order, vec![ids[0], ids[3], ids[1], ids[2], ids[4]]);
}

#[test]
fn topological_order_respects_random_graphs() {
    let mut rng = SmallRng::seed_from_u64(7);

    for _ in 0..50 {
        let n = rng.gen_range(2..40);
        let rank = keys(n);
        let mut edges = Vec::new();
        for _ in 0..rng.gen_range(0..n * 3) {
            let i = rng.gen_range(0..n);
            let j = rng.gen_range(0..n);
            if i < j {
                edges.push((rank[i], rank[j]));
            }
        }

        let mut nodes = rank.clone();
        nodes.shuffle(&mut rng);
        let order = dependencies::topological_order(&nodes, &edges).unwrap();

        assert_eq!(order.len(), n);
        let position = |id: ItemId| order.iter().position(|o| *o == id).unwrap();
        for (from, to) in &edges {
            assert!(position(*from) < position(*to));
        }
    }
}

#[test]
fn topological_order_reports_cycles() {
    let ids = keys(4);
    let edges = [(ids[0], ids[1]), (ids[1], ids[2]), (ids[2], ids[1])];

    assert_eq!(dependencies::topological_order(&ids, &edges), Err(2));
}

#[derive(Default)]
struct Traffic {
    enters: Rc<RefCell<u32>>,
    leaves: Rc<RefCell<u32>>,
}

impl ItemBehavior for Traffic {
    fn enters_active_region(&mut self, _ctx: &mut ItemContext<'_>) {
        *self.enters.borrow_mut() += 1;
    }

    fn leaves_active_region(&mut self, _ctx: &mut ItemContext<'_>) {
        *self.leaves.borrow_mut() += 1;
    }
}

#[test]
fn region_traffic_is_notified_once() {
    let mut world = world();
    let traffic = Traffic::default();
    let (enters, leaves) = (traffic.enters.clone(), traffic.leaves.clone());
    world.register(square(10.0, 10.0).with_behavior(traffic));

    let inside = Region::from(Rect::new(0.0, 0.0, 100.0, 100.0));
    let outside = Region::from(Rect::new(500.0, 500.0, 100.0, 100.0));

    world.progress_entities(&inside, 0.1).unwrap();
    world.progress_entities(&inside, 0.1).unwrap();
    assert_eq!((*enters.borrow(), *leaves.borrow()), (1, 0));

    world.progress_entities(&outside, 0.1).unwrap();
    world.progress_entities(&outside, 0.1).unwrap();
    assert_eq!((*enters.borrow(), *leaves.borrow()), (1, 1));

    world.progress_entities(&inside, 0.1).unwrap();
    assert_eq!((*enters.borrow(), *leaves.borrow()), (2, 1));
}

#[test]
fn global_items_are_always_selected() {
    let mut world = world();
    let traffic = Traffic::default();
    let enters = traffic.enters.clone();
    let mut item = square(900.0, 900.0).with_behavior(traffic);
    item.state_mut().set_global(true);
    world.register(item);

    world.progress_entities(&Region::from(Rect::new(0.0, 0.0, 10.0, 10.0)), 0.1).unwrap();
    assert_eq!(*enters.borrow(), 1);
}

#[test]
fn global_statics_are_always_selected() {
    let mut world = world();
    let traffic = Traffic::default();
    let enters = traffic.enters.clone();
    let mut wall = square(900.0, 900.0).with_behavior(traffic);
    wall.state_mut().set_global(true);
    world.add_static(wall);
    world.add_static(square(800.0, 800.0).with_behavior(Traffic::default()));

    world.enable_perf_metrics(true);
    world.progress_entities(&Region::from(Rect::new(0.0, 0.0, 10.0, 10.0)), 0.1).unwrap();

    assert_eq!(*enters.borrow(), 1);
    assert_eq!(world.get_perf_stats().selected_items(), 1);
}

#[test]
fn release_invalidates_handles_and_links() {
    let mut world = world();
    let a = world.register(square(0.0, 0.0));
    let b = world.register(square(50.0, 0.0));
    let link = world.link(Link::elastic(a, b, 1.0, 0.0, 100.0));
    let handle = ItemHandle::new(b);

    assert_eq!(world.item(a).unwrap().links(), &[link]);
    assert!(handle.is_valid(world.items()));

    world.release(b);

    assert!(!handle.is_valid(world.items()));
    assert!(handle.get(world.items()).is_none());
    assert!(world.get_link(link).is_none());
    assert!(world.item(a).unwrap().links().is_empty());
    assert_eq!(world.entities(), &[a]);

    // a new item reusing the slot is not reachable through the old handle
    let c = world.register(square(0.0, 50.0));
    assert_ne!(c, b);
    assert!(!handle.is_valid(world.items()));
}

#[test]
#[should_panic(expected = "releasing an item that is not in the world")]
fn double_release_panics() {
    let mut world = world();
    let a = world.register(square(0.0, 0.0));
    world.release(a);
    world.release(a);
}

#[test]
#[should_panic(expected = "linking an item to itself")]
fn self_link_panics() {
    let mut world = world();
    let a = world.register(square(0.0, 0.0));
    world.link(Link::rigid(a, a, 0.0, 10.0));
}

#[test]
fn shared_link_is_adjusted_once() {
    let mut world = world();
    world.enable_perf_metrics(true);
    let a = world.register(square(0.0, 0.0));
    let b = world.register(square(100.0, 0.0));
    world.link(Link::rigid(a, b, 0.0, 50.0));

    world.progress_entities(&everywhere(), 0.1).unwrap();

    let stats = world.get_perf_stats();
    assert_eq!(stats.links_adjusted(), 1);
    assert_eq!(stats.selected_items(), 2);
    let distance = world
        .item(a)
        .unwrap()
        .center_of_mass()
        .distance(world.item(b).unwrap().center_of_mass());
    assert!(distance <= 50.0 + 1e-9, "{distance}");
}

/// Spawns an item on its first tick and releases itself on its first collision
struct Spawner {
    spawned: bool,
}

impl ItemBehavior for Spawner {
    fn time_step(&mut self, ctx: &mut ItemContext<'_>, _elapsed: TimeType) {
        if !self.spawned {
            self.spawned = true;
            ctx.commands.register(square(500.0, 500.0));
        }
    }

    fn collision(&mut self, ctx: &mut CollisionContext<'_>) {
        let id = ctx.id();
        ctx.commands.release(id);
    }
}

#[test]
fn hook_requests_are_applied_after_the_tick() {
    let mut world = world();
    let spawner = world.register(square(0.0, 0.0).with_behavior(Spawner { spawned: false }));
    assert_eq!(world.entity_count(), 1);

    world.progress_entities(&everywhere(), 0.1).unwrap();
    assert_eq!(world.entity_count(), 2);
    assert!(world.contains(spawner));

    world.add_static(PhysicalItem::new(Rect::new(0.0, 0.0, 5.0, 5.0)));
    world.progress_entities(&everywhere(), 0.1).unwrap();
    assert!(!world.contains(spawner));
    assert_eq!(world.entity_count(), 1);
}

#[test]
fn picking_by_point_rectangle_and_circle() {
    let mut world = world();
    let floor = world.add_static(PhysicalItem::new(Rect::new(0.0, 0.0, 100.0, 10.0)));
    let a = world.register(square(0.0, 10.0));
    let b = world.register(square(50.0, 10.0));

    let all = ItemPickingFilter::new();
    assert_eq!(world.pick_items_by_point(Vec2::new(5.0, 10.0), &all), vec![floor, a]);
    assert_eq!(
        world.pick_items_by_point(Vec2::new(5.0, 10.0), &ItemPickingFilter::new().fixed(false)),
        vec![a]
    );
    assert_eq!(
        world.pick_items_in_rectangle(&Rect::new(40.0, 15.0, 30.0, 30.0), &all),
        vec![b]
    );
    assert_eq!(world.pick_items_in_circle(Vec2::new(55.0, 15.0), 1.0, &all), vec![b]);

    let not_a = ItemPickingFilter::new().predicate(move |item| item.serial() != 1);
    assert_eq!(world.pick_items_by_point(Vec2::new(5.0, 15.0), &not_a), Vec::<ItemId>::new());
}

#[test]
fn picking_in_direction_finds_the_nearest_item() {
    let mut world = world();
    let far = world.register(square(80.0, 0.0));
    let near = world.register(square(40.0, 0.0));
    let all = ItemPickingFilter::new();

    let hit = world.pick_item_in_direction(Vec2::new(0.0, 5.0), Vec2::new(200.0, 0.0), &all);
    assert_eq!(hit, Some(near));

    let hit = world.pick_item_in_direction(
        Vec2::new(0.0, 5.0),
        Vec2::new(200.0, 0.0),
        &ItemPickingFilter::new().forbidden_position(Vec2::new(45.0, 5.0)),
    );
    assert_eq!(hit, Some(far));

    assert_eq!(world.pick_item_in_direction(Vec2::new(0.0, 5.0), Vec2::new(30.0, 0.0), &all), None);
}

#[test]
fn settings_json_replaces_the_environment() {
    let mut world = world();
    world
        .load_settings_json(r#"{ "unit": 10, "staticCellSize": 64 }"#)
        .unwrap();

    assert_eq!(world.unit(), 10.0);
    assert!((world.gravity().y + 98.1).abs() < 1e-9);
    assert_eq!(world.static_grid.cell_size(), 64.0);

    let err = world.load_settings_json(r#"{ "unit": -1 }"#).unwrap_err();
    assert!(matches!(err, UniverseError::InvalidSettings(_)));
    assert_eq!(world.unit(), 10.0);
}

#[test]
fn statics_survive_a_grid_rebuild() {
    let mut world = world();
    let floor = world.add_static(PhysicalItem::new(Rect::new(300.0, 300.0, 10.0, 10.0)));
    world.load_settings_json(r#"{ "staticCellSize": 32 }"#).unwrap();

    let picked = world.pick_items_by_point(Vec2::new(305.0, 305.0), &ItemPickingFilter::new());
    assert_eq!(picked, vec![floor]);
}

#[test]
fn perf_stats_are_zero_when_disabled() {
    let mut world = world();
    world.register(square(0.0, 0.0));
    world.progress_entities(&everywhere(), 0.1).unwrap();

    let stats = world.get_perf_stats();
    assert_eq!(stats.selected_items(), 0);
    assert_eq!(stats.step_ms(), 0.0);
    assert_eq!(world.time(), 0.1);
}
