use universe_engine::World;

#[test]
fn perf_smoke_step() {
    let mut world = World::new(2048.0, 1024.0);
    world.enable_perf_metrics(true);
    world.add_static_box(0.0, 0.0, 2048.0, 16.0);
    for x in 0..32 {
        for y in 0..8 {
            world.add_box(x as f64 * 40.0, 40.0 + y as f64 * 40.0, 20.0, 20.0, 1.0);
        }
    }

    for _ in 0..10 {
        assert!(world.progress(0.0, 0.0, 2048.0, 1024.0, 1.0 / 60.0).is_ok());
    }

    let stats = world.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert_eq!(stats.entity_count(), 256);
    assert_eq!(stats.static_count(), 1);
    assert_eq!(world.tick_count(), 10);
}

#[test]
fn boxes_rest_on_the_floor() {
    let mut world = World::new(512.0, 512.0);
    world.add_static_box(0.0, 0.0, 512.0, 10.0);
    let id = world.add_box(100.0, 30.0, 10.0, 10.0, 1.0);

    for _ in 0..120 {
        assert!(world.progress(0.0, 0.0, 512.0, 512.0, 1.0 / 60.0).is_ok());
    }

    let r = world.item_box(id);
    assert_eq!(r.len(), 4);
    assert!(r[1] >= 10.0 && r[1] < 10.5, "box sank or bounced: {:?}", r);

    assert!(world.release_item(id));
    assert!(!world.release_item(id));
    assert!(world.item_box(id).is_empty());
}
