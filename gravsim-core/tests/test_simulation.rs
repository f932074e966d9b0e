//! Frame driver: pause gating, mutation queue, selection and input routing

use glam::Vec2;
use gravsim_core::tests::test_helpers::{kinematics, rel_eq_f64, store_with};
use gravsim_core::{
    Body, BoundaryPolicy, Edit, EntityId, EntityKind, InputEvent, Mutation, PointerButton,
    SceneConfig, SimError, Simulation,
};
use std::time::{Duration, Instant};

fn two_body_sim() -> Simulation {
    let store = store_with(&[
        Body::regular(Vec2::new(-0.3, 0.0), Vec2::ZERO, 5.0, 0.05),
        Body::heavy(Vec2::new(0.3, 0.3), Vec2::ZERO, 5.0, 0.07),
    ]);
    Simulation::new(store, BoundaryPolicy::default())
}

fn paused_with_selection(id: EntityId) -> Simulation {
    let mut sim = two_body_sim();
    sim.set_paused(true);
    sim.select(Some(id));
    sim
}

#[test]
fn test_paused_simulation_is_frozen() {
    let mut sim = two_body_sim();
    sim.set_paused(true);
    let before = kinematics(sim.store());

    for _ in 0..50 {
        sim.step(0.016);
    }

    assert_eq!(kinematics(sim.store()), before);
}

#[test]
fn test_running_simulation_moves() {
    let mut sim = two_body_sim();
    let before = kinematics(sim.store());

    sim.step(1e-12);

    let after = kinematics(sim.store());
    assert_ne!(after[0], before[0]);
    // The fixed heavy body stays put
    assert_eq!(after[1], before[1]);
}

#[test]
fn test_frame_uses_wall_clock() {
    let mut sim = two_body_sim();
    let t0 = Instant::now();
    let before = kinematics(sim.store());

    // First frame has no previous tick to measure against
    assert_eq!(sim.frame(t0), 0.0);
    assert_eq!(kinematics(sim.store()), before);

    let dt = sim.frame(t0 + Duration::from_nanos(1));
    assert!(dt > 0.0);
    assert_ne!(kinematics(sim.store())[0], before[0]);
}

#[test]
fn test_edits_require_pause() {
    let mut sim = two_body_sim();
    sim.select(Some(EntityId::regular(0)));

    let err = sim.edit(Edit::Mass(2.0)).unwrap_err();
    assert!(matches!(err, SimError::NotPaused));
    assert_eq!(sim.pending(), 0);
}

#[test]
fn test_edits_require_selection() {
    let mut sim = two_body_sim();
    sim.set_paused(true);

    let err = sim.delete_selected().unwrap_err();
    assert!(matches!(err, SimError::NoSelection));
}

#[test]
fn test_invalid_mass_is_rejected() {
    let mut sim = paused_with_selection(EntityId::regular(0));

    for bad in [0.0, -3.0, f32::NAN, f32::INFINITY] {
        let err = sim.edit(Edit::Mass(bad)).unwrap_err();
        assert!(matches!(err, SimError::InvalidMass(_)));
    }
    let err = sim.edit(Edit::Radius(0.0)).unwrap_err();
    assert!(matches!(err, SimError::InvalidRadius(_)));

    sim.apply_pending();
    let body = sim.selected_body().unwrap();
    assert_eq!(body.mass, 5.0);
    assert_eq!(body.radius, 0.05);
}

#[test]
fn test_edits_land_between_frames() {
    let mut sim = paused_with_selection(EntityId::regular(0));

    sim.edit(Edit::Mass(3.0)).unwrap();
    sim.edit(Edit::Position(Vec2::new(0.1, 0.2))).unwrap();
    sim.edit(Edit::Fixed(true)).unwrap();
    assert_eq!(sim.selected_body().unwrap().mass, 5.0);

    assert_eq!(sim.apply_pending(), 3);
    let body = sim.selected_body().unwrap();
    assert_eq!(body.mass, 3.0);
    assert_eq!(body.pos, Vec2::new(0.1, 0.2));
    assert!(body.fixed);
}

#[test]
fn test_heavy_mass_edits_are_in_solar_masses() {
    let mut sim = paused_with_selection(EntityId::heavy(0));

    sim.edit(Edit::Mass(20.0)).unwrap();
    sim.apply_pending();

    let hole = sim.selected_body().unwrap();
    assert_eq!(hole.mass, 20.0);
    assert!(rel_eq_f64(hole.mass_kg(), 4e31, 1e-12));
}

#[test]
fn test_delete_clears_selection() {
    let mut sim = paused_with_selection(EntityId::regular(0));

    sim.delete_selected().unwrap();
    sim.apply_pending();

    assert_eq!(sim.store().regular().len(), 0);
    assert_eq!(sim.selection(), None);
    assert_eq!(sim.snapshot().selection, None);
}

#[test]
fn test_stale_selection_reads_as_none() {
    let mut sim = two_body_sim();
    sim.select(Some(EntityId::regular(7)));
    assert_eq!(sim.selection(), None);
    assert!(sim.selected_body().is_none());

    sim.set_paused(true);
    let err = sim.edit(Edit::Radius(0.1)).unwrap_err();
    assert!(matches!(err, SimError::NoSelection));
}

#[test]
fn test_invalid_spawn_is_rejected() {
    let mut sim = two_body_sim();
    let bad = Body::regular(Vec2::ZERO, Vec2::ZERO, -1.0, 0.02);

    assert!(sim.submit(Mutation::Spawn(bad)).is_err());
    assert_eq!(sim.pending(), 0);
}

#[test]
fn test_toggle_pause_is_one_flip_per_event() {
    let mut sim = two_body_sim();

    sim.handle_input([InputEvent::TogglePause]);
    assert!(sim.is_paused());

    sim.handle_input([InputEvent::TogglePause, InputEvent::TogglePause]);
    assert!(sim.is_paused());

    sim.handle_input([InputEvent::TogglePause]);
    assert!(!sim.is_paused());
}

#[test]
fn test_secondary_click_selects() {
    let mut sim = two_body_sim();

    sim.handle_input([InputEvent::Pointer {
        button: PointerButton::Secondary,
        pos: Vec2::new(0.31, 0.29),
        ctrl: false,
    }]);
    assert_eq!(sim.selection(), Some(EntityId::heavy(0)));

    sim.handle_input([InputEvent::Pointer {
        button: PointerButton::Secondary,
        pos: Vec2::new(-0.9, -0.9),
        ctrl: false,
    }]);
    assert_eq!(sim.selection(), None);
}

#[test]
fn test_spawn_on_top_of_existing_body() {
    let mut sim = two_body_sim();

    sim.handle_input([InputEvent::Pointer {
        button: PointerButton::Middle,
        pos: Vec2::new(-0.3, 0.0),
        ctrl: false,
    }]);
    // Queued, not yet in the store
    assert_eq!(sim.store().regular().len(), 1);

    sim.apply_pending();
    let regular = sim.store().regular();
    assert_eq!(regular.len(), 2);
    assert_eq!(regular[1].pos, Vec2::new(-0.3, 0.0));
    assert_eq!(regular[1].mass, 1.0);
    assert_eq!(regular[1].radius, 0.02);
}

#[test]
fn test_ctrl_middle_click_spawns_only_heavy() {
    let mut sim = two_body_sim();

    sim.handle_input([InputEvent::Pointer {
        button: PointerButton::Middle,
        pos: Vec2::new(-0.5, 0.5),
        ctrl: true,
    }]);
    sim.apply_pending();

    assert_eq!(sim.store().regular().len(), 1);
    assert_eq!(sim.store().heavy().len(), 2);
    let hole = &sim.store().heavy()[1];
    assert_eq!(hole.kind, EntityKind::Heavy);
    assert_eq!(hole.mass, 10.0);
    assert!(hole.fixed);
}

#[test]
fn test_spawning_works_while_paused() {
    let mut sim = two_body_sim();
    sim.set_paused(true);

    sim.handle_input([InputEvent::SpawnBody {
        pos: Vec2::new(0.0, -0.5),
    }]);
    sim.frame(Instant::now());

    assert_eq!(sim.store().regular().len(), 2);
}

#[test]
fn test_snapshot_order_and_flags() {
    let mut sim = two_body_sim();
    sim.set_paused(true);
    sim.select(Some(EntityId::regular(0)));

    let snap = sim.snapshot();
    assert!(snap.paused);
    assert_eq!(snap.selection, Some(EntityId::regular(0)));
    assert_eq!(snap.items.len(), 2);
    assert_eq!(snap.items[0].id, EntityId::regular(0));
    assert_eq!(snap.items[1].id, EntityId::heavy(0));
    assert_eq!(snap.items[1].radius, 0.07);
    assert!(snap.items[1].fixed);
}

#[test]
fn test_runs_are_deterministic() {
    let scene = SceneConfig::from_json(
        r#"{
            "bodies": [
                { "pos": [-0.3, 0.0], "vel": [0.0, 0.4], "mass": 5.0, "radius": 0.05 },
                { "pos": [0.2, -0.4], "vel": [0.1, 0.0], "mass": 2e6, "radius": 0.03 }
            ],
            "heavy": [
                { "pos": [0.0, 0.0], "mass": 1e-20, "radius": 0.07, "fixed": true }
            ]
        }"#,
    )
    .unwrap();

    let mut first = scene.build().unwrap();
    let mut second = scene.build().unwrap();
    first.run(500, 0.01);
    second.run(500, 0.01);

    assert_eq!(kinematics(first.store()), kinematics(second.store()));
    for (pos, vel) in kinematics(first.store()) {
        assert!(pos.is_finite() && vel.is_finite());
    }
}

#[test]
fn test_oversized_heavy_mass_is_rejected() {
    let mut sim = paused_with_selection(EntityId::heavy(0));

    let err = sim.edit(Edit::Mass(1e13)).unwrap_err();
    assert!(matches!(err, SimError::MassTooLarge { .. }));

    sim.apply_pending();
    assert_eq!(sim.selected_body().unwrap().mass, 5.0);
}

#[test]
fn test_heaviest_accepted_mass_keeps_state_finite() {
    let heaviest_solar = (gravsim_core::MAX_MASS_KG / gravsim_core::SOLAR_MASS_KG) as f32 * 0.99;
    let store = store_with(&[
        Body::regular(Vec2::ZERO, Vec2::ZERO, 1.0, 0.02),
        Body::heavy(Vec2::new(0.0005, 0.0), Vec2::ZERO, heaviest_solar, 0.07),
    ]);
    let mut sim = Simulation::new(store, BoundaryPolicy::default());

    sim.run(3, 0.016);

    for (pos, vel) in kinematics(sim.store()) {
        assert!(pos.is_finite() && vel.is_finite(), "{:?} {:?}", pos, vel);
    }
}
