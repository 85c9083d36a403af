use universe_engine::systems::forced_movement::Goto;
use universe_engine::{
    ForcedMovement, ItemHandle, Link, PhysicalItem, Rect, Region, UniverseError, Vec2, WorldCore,
    WorldSettings,
};

const SETTINGS: &str = r#"{
    "unit": 10,
    "gravity": { "x": 0, "y": 0 },
    "speedEpsilon": { "x": 0.01, "y": 0.01 },
    "frictionRectangles": [
        { "rectangle": { "left": 0, "bottom": 0, "width": 50, "height": 50 }, "value": 0.5 }
    ]
}"#;

fn world() -> WorldCore {
    let settings = WorldSettings::from_json(SETTINGS).unwrap();
    WorldCore::with_settings(500.0, 500.0, &settings).unwrap()
}

fn region() -> Region {
    Region::from(Rect::new(0.0, 0.0, 500.0, 500.0))
}

#[test]
fn settings_document_drives_the_world() {
    let world = world();
    assert_eq!(world.unit(), 10.0);
    assert_eq!(world.gravity(), Vec2::zero());
    assert_eq!(world.environment().average_friction(&Rect::new(0.0, 0.0, 10.0, 10.0)), 0.5);

    let err = WorldSettings::from_json(r#"{ "staticCellSize": 0 }"#).unwrap_err();
    assert!(matches!(err, UniverseError::InvalidSettings(_)));
    assert!(matches!(
        WorldSettings::from_json("{ not json"),
        Err(UniverseError::Json(_))
    ));
}

#[test]
fn forced_movement_runs_to_completion() {
    let mut world = world();
    let id = world.register(PhysicalItem::new(Rect::new(100.0, 100.0, 10.0, 10.0)));
    world.set_forced_movement(
        id,
        ForcedMovement::new(Goto::new(1.0).with_length(Vec2::new(30.0, 0.0))).with_auto_remove(true),
    );

    for _ in 0..4 {
        world.progress_entities(&region(), 0.25).unwrap();
    }

    let item = world.item(id).unwrap();
    assert!((item.bounding_box().left - 130.0).abs() < 1e-9);
    assert!(!item.has_forced_movement());
    assert!((item.age() - 1.0).abs() < 1e-12);
}

#[test]
fn released_items_drop_out_of_links_and_handles() {
    let mut world = world();
    let a = world.register(PhysicalItem::new(Rect::new(100.0, 100.0, 10.0, 10.0)));
    let b = world.register(PhysicalItem::new(Rect::new(200.0, 100.0, 10.0, 10.0)));
    let link = world.link(Link::elastic(a, b, 2.0, 0.0, 20.0));
    let handle = ItemHandle::from(a);

    // the link force is applied after the moves, it shows on the next tick
    world.progress_entities(&region(), 0.1).unwrap();
    world.progress_entities(&region(), 0.1).unwrap();
    assert!(world.item(a).unwrap().bounding_box().left > 100.0);

    world.release(a);
    assert!(handle.get(world.items()).is_none());
    assert!(world.get_link(link).is_none());
    assert_eq!(world.link_count(), 0);
    assert!(world.item(b).unwrap().links().is_empty());

    world.progress_entities(&region(), 0.1).unwrap();
    assert_eq!(world.tick_count(), 3);
}
