use super::*;
use crate::core::Rect;
use crate::domain::settings::WorldSettings;

fn no_gravity() -> PhysicsEnvironment {
    let settings = WorldSettings {
        gravity: Some(Vec2::zero()),
        ..WorldSettings::default()
    };
    PhysicsEnvironment::from_settings(&settings)
}

fn spawn(items: &mut ItemArena, left: f64, bottom: f64) -> ItemId {
    items.insert(PhysicalItem::new(Rect::new(left, bottom, 10.0, 10.0)))
}

fn attach(items: &mut ItemArena, env: &PhysicsEnvironment, id: ItemId, movement: ForcedMovement) -> ForcedMovement {
    let mut movement = movement;
    movement.set_item(id);
    movement.init(&mut MovementScope::new(items, env));
    movement
}

fn step(items: &mut ItemArena, env: &PhysicsEnvironment, movement: &mut ForcedMovement, dt: f64) -> f64 {
    movement.next_position(&mut MovementScope::new(items, env), dt)
}

fn center(items: &ItemArena, id: ItemId) -> Vec2 {
    items[id].center_of_mass()
}

fn close(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < 1e-6
}

#[test]
fn goto_reaches_target_and_reports_leftover_time() {
    let env = no_gravity();
    let mut items = ItemArena::with_key();
    let id = spawn(&mut items, 0.0, 0.0);

    let mut m = attach(
        &mut items,
        &env,
        id,
        ForcedMovement::new(Goto::new(2.0).with_length(Vec2::new(30.0, -10.0))),
    );

    let left = step(&mut items, &env, &mut m, 2.5);
    assert!((left - 0.5).abs() < 1e-12);
    assert!(m.is_finished(&items));
    assert!(close(center(&items, id), Vec2::new(35.0, -5.0)));
}

#[test]
fn goto_is_additive_over_time_splits() {
    let env = no_gravity();
    let mut items = ItemArena::with_key();
    let a = spawn(&mut items, 0.0, 0.0);
    let b = spawn(&mut items, 0.0, 0.0);

    let goto = Goto::new(1.0)
        .with_length(Vec2::new(100.0, 40.0))
        .with_acceleration_time(0.3);
    let mut single = attach(&mut items, &env, a, ForcedMovement::new(goto));
    let mut split = attach(&mut items, &env, b, ForcedMovement::new(goto));

    step(&mut items, &env, &mut single, 0.6);
    for _ in 0..3 {
        step(&mut items, &env, &mut split, 0.2);
    }
    assert!(close(center(&items, a), center(&items, b)));

    step(&mut items, &env, &mut single, 1.0);
    for _ in 0..7 {
        step(&mut items, &env, &mut split, 0.1);
    }
    assert!(close(center(&items, a), Vec2::new(105.0, 45.0)));
    assert!(close(center(&items, a), center(&items, b)));
    assert!(single.is_finished(&items) && split.is_finished(&items));
}

#[test]
fn speed_is_derived_from_displacement() {
    let env = no_gravity();
    let mut items = ItemArena::with_key();
    let id = spawn(&mut items, 0.0, 0.0);

    let mut m = attach(
        &mut items,
        &env,
        id,
        ForcedMovement::new(Translation::new(Vec2::new(4.0, 0.0), 10.0)),
    );
    step(&mut items, &env, &mut m, 0.5);

    assert!(close(center(&items, id), Vec2::new(7.0, 5.0)));
    assert!(close(items[id].state().speed(), Vec2::new(4.0, 0.0)));
}

#[test]
fn tracking_keeps_offset_and_finishes_without_reference() {
    let env = no_gravity();
    let mut items = ItemArena::with_key();
    let leader = spawn(&mut items, 0.0, 0.0);
    let follower = spawn(&mut items, 20.0, 0.0);

    let mut m = attach(
        &mut items,
        &env,
        follower,
        ForcedMovement::new(Tracking::default()).with_reference_item(leader),
    );

    items[leader].state_mut().set_bottom_left(Vec2::new(5.0, 7.0));
    step(&mut items, &env, &mut m, 0.1);
    assert!(close(center(&items, follower), Vec2::new(30.0, 12.0)));
    assert!(!m.is_finished(&items));

    items.remove(leader);
    assert!(m.is_finished(&items));
    assert_eq!(step(&mut items, &env, &mut m, 0.1), 0.1);
}

#[test]
fn rotation_sweeps_on_a_circle_and_stops_after_loops() {
    let env = no_gravity();
    let mut items = ItemArena::with_key();
    let pivot = spawn(&mut items, -5.0, -5.0);
    let satellite = spawn(&mut items, 15.0, -5.0);

    let rotation = Rotation::new(0.0, std::f64::consts::PI, 1.0)
        .with_loops(1)
        .with_acceleration_time(0.0)
        .with_angle_application(AngleApplication::Force);
    let mut m = attach(
        &mut items,
        &env,
        satellite,
        ForcedMovement::new(rotation).with_reference_item(pivot),
    );
    assert!(close(center(&items, satellite), Vec2::new(20.0, 0.0)));

    step(&mut items, &env, &mut m, 0.5);
    assert!(close(center(&items, satellite), Vec2::new(0.0, 20.0)));

    let left = step(&mut items, &env, &mut m, 0.75);
    assert!((left - 0.25).abs() < 1e-9);
    assert!(m.is_finished(&items));
    assert!(close(center(&items, satellite), Vec2::new(-20.0, 0.0)));
    assert!((items[satellite].state().system_angle() - std::f64::consts::PI).abs() < 1e-9);
}

#[test]
fn rotation_loop_back_returns_to_start() {
    let env = no_gravity();
    let mut items = ItemArena::with_key();
    let pivot = spawn(&mut items, -5.0, -5.0);
    let satellite = spawn(&mut items, 5.0, -5.0);

    let rotation = Rotation::new(0.0, 1.0, 1.0)
        .with_loops(1)
        .with_loop_back(true)
        .with_acceleration_time(0.0);
    let mut m = attach(
        &mut items,
        &env,
        satellite,
        ForcedMovement::new(rotation).with_reference_item(pivot),
    );

    step(&mut items, &env, &mut m, 1.5);
    assert!(!m.is_finished(&items));
    if let MovementKind::Rotation(r) = m.kind() {
        assert!((r.angle() - 0.5).abs() < 1e-9);
    }

    step(&mut items, &env, &mut m, 0.6);
    assert!(m.is_finished(&items));
    assert!(close(center(&items, satellite), Vec2::new(10.0, 0.0)));
}

#[test]
fn join_converges_on_a_moving_reference() {
    let env = no_gravity();
    let mut items = ItemArena::with_key();
    let target = spawn(&mut items, 0.0, 0.0);
    let runner = spawn(&mut items, 40.0, 0.0);

    let mut m = attach(
        &mut items,
        &env,
        runner,
        ForcedMovement::new(Join::new(1.0)).with_reference_item(target),
    );

    step(&mut items, &env, &mut m, 0.5);
    assert!(close(center(&items, runner), Vec2::new(25.0, 5.0)));

    items[target].state_mut().set_bottom_left(Vec2::new(0.0, 10.0));
    step(&mut items, &env, &mut m, 0.5);
    assert!(m.is_finished(&items));
    assert!(close(center(&items, runner), center(&items, target)));
}

#[test]
fn aiming_heads_toward_reference() {
    let env = no_gravity();
    let mut items = ItemArena::with_key();
    let target = spawn(&mut items, 100.0, 0.0);
    let missile = spawn(&mut items, 0.0, 0.0);

    let aiming = Aiming::new(10.0).with_max_speed(10.0).with_acceleration(1000.0);
    let mut m = attach(
        &mut items,
        &env,
        missile,
        ForcedMovement::new(aiming).with_reference_item(target),
    );

    step(&mut items, &env, &mut m, 1.0);
    assert!(close(center(&items, missile), Vec2::new(15.0, 5.0)));
}

#[test]
fn stay_around_remains_finite_and_moves() {
    let env = no_gravity();
    let mut items = ItemArena::with_key();
    let anchor = spawn(&mut items, 0.0, 0.0);
    let fly = spawn(&mut items, 20.0, 0.0);

    let wander = StayAround::new(5.0)
        .with_speed(10.0)
        .with_max_distance(50.0)
        .with_max_angle(0.5)
        .with_seed(7);
    let mut m = attach(
        &mut items,
        &env,
        fly,
        ForcedMovement::new(wander).with_reference_item(anchor),
    );

    let start = center(&items, fly);
    for _ in 0..10 {
        step(&mut items, &env, &mut m, 0.1);
    }
    let end = center(&items, fly);
    assert!(end.x.is_finite() && end.y.is_finite());
    assert!(start.distance(end) > 0.0);
    assert!(start.distance(end) <= 10.0 + 1e-9);
}

#[test]
fn sequence_plays_each_movement_in_turn() {
    let env = no_gravity();
    let mut items = ItemArena::with_key();
    let id = spawn(&mut items, 0.0, 0.0);

    let sequence = Sequence::new()
        .with(ForcedMovement::new(Translation::new(Vec2::new(10.0, 0.0), 1.0)))
        .with(ForcedMovement::new(Translation::new(Vec2::new(0.0, 10.0), 1.0)))
        .with_loops(1);
    let mut m = attach(&mut items, &env, id, ForcedMovement::new(sequence));

    let left = step(&mut items, &env, &mut m, 1.5);
    assert_eq!(left, 0.0);
    assert!(close(center(&items, id), Vec2::new(15.0, 10.0)));

    let left = step(&mut items, &env, &mut m, 1.0);
    assert!((left - 0.5).abs() < 1e-12);
    assert!(m.is_finished(&items));
    assert!(close(center(&items, id), Vec2::new(15.0, 15.0)));
}

#[test]
fn endless_sequence_of_instant_movements_stops() {
    let env = no_gravity();
    let mut items = ItemArena::with_key();
    let id = spawn(&mut items, 0.0, 0.0);

    let sequence = Sequence::new().with(ForcedMovement::new(Goto::new(0.0)));
    let mut m = attach(&mut items, &env, id, ForcedMovement::new(sequence));

    step(&mut items, &env, &mut m, 1.0);
    assert!(m.is_finished(&items));
}

#[test]
fn natural_movement_applies_gravity_and_friction() {
    let mut env = no_gravity();
    env.gravity = Vec2::new(0.0, -10.0);
    let mut items = ItemArena::with_key();
    let id = spawn(&mut items, 0.0, 0.0);
    items[id].state_mut().set_friction(0.5);

    default_move(&mut MovementScope::new(&mut items, &env), id, 1.0);

    let state = items[id].state();
    assert!(close(state.speed(), Vec2::new(0.0, -5.0)));
    assert!(close(state.bottom_left(), Vec2::new(0.0, -5.0)));
    assert_eq!(state.acceleration(), Vec2::new(0.0, -10.0));
}

#[test]
fn infinite_mass_ignores_world_gravity_and_friction() {
    let mut env = no_gravity();
    env.gravity = Vec2::new(0.0, -10.0);
    env.default_friction = 0.5;
    let mut items = ItemArena::with_key();
    let id = spawn(&mut items, 0.0, 0.0);
    items[id].state_mut().set_mass(f64::INFINITY);
    items[id].state_mut().set_speed(Vec2::new(10.0, 0.0));

    default_move(&mut MovementScope::new(&mut items, &env), id, 1.0);

    let state = items[id].state();
    assert!(close(state.speed(), Vec2::new(10.0, 0.0)));
    assert!(close(state.bottom_left(), Vec2::new(10.0, 0.0)));
}

#[test]
fn natural_movement_consumes_external_forces() {
    let env = no_gravity();
    let mut items = ItemArena::with_key();
    let id = spawn(&mut items, 0.0, 0.0);
    items[id].state_mut().set_mass(2.0);
    items[id].state_mut().add_external_force(Vec2::new(4.0, 0.0));

    default_move(&mut MovementScope::new(&mut items, &env), id, 1.0);
    assert!(close(items[id].state().speed(), Vec2::new(2.0, 0.0)));
    assert_eq!(items[id].state().external_force(), Vec2::zero());

    default_move(&mut MovementScope::new(&mut items, &env), id, 1.0);
    assert!(close(items[id].state().speed(), Vec2::new(2.0, 0.0)));
}

#[test]
fn auto_removed_movement_is_dropped_once_finished() {
    let env = no_gravity();
    let mut items = ItemArena::with_key();
    let id = spawn(&mut items, 0.0, 0.0);

    items[id].set_forced_movement(
        ForcedMovement::new(Translation::new(Vec2::new(1.0, 0.0), 1.0)).with_auto_remove(true),
    );

    default_move(&mut MovementScope::new(&mut items, &env), id, 0.5);
    assert!(items[id].has_forced_movement());

    default_move(&mut MovementScope::new(&mut items, &env), id, 0.5);
    assert!(!items[id].has_forced_movement());
}

#[test]
#[should_panic(expected = "without a moving item")]
fn init_without_item_is_fatal() {
    let env = no_gravity();
    let mut items = ItemArena::with_key();
    let mut m = ForcedMovement::new(Goto::new(1.0));
    m.init(&mut MovementScope::new(&mut items, &env));
}
