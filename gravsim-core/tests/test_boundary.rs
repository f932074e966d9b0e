//! Wall reflection with restitution

use glam::Vec2;
use gravsim_core::boundary::reflect;
use gravsim_core::tests::test_helpers::{approx_eq_f32, store_with, vec_approx_eq};
use gravsim_core::{Body, BoundaryPolicy, EntityId, RESTITUTION};

fn ball(pos: Vec2, vel: Vec2, radius: f32) -> Body {
    Body::regular(pos, vel, 1.0, radius)
}

#[test]
fn test_floor_bounce() {
    let mut store = store_with(&[ball(Vec2::new(0.0, -0.95), Vec2::new(0.0, -1.0), 0.1)]);

    let bounced = BoundaryPolicy::default().resolve(&mut store);

    let b = store.get(EntityId::regular(0)).unwrap();
    assert_eq!(bounced, 1);
    assert!(approx_eq_f32(b.pos.y, -0.9, 1e-6));
    assert!(approx_eq_f32(b.vel.y, 0.8, 1e-6));
    assert_eq!(b.pos.x, 0.0);
}

#[test]
fn test_ceiling_and_side_walls() {
    let mut top = ball(Vec2::new(0.0, 0.99), Vec2::new(0.0, 2.0), 0.05);
    assert!(reflect(&mut top, RESTITUTION));
    assert!(approx_eq_f32(top.pos.y, 0.95, 1e-6));
    assert!(approx_eq_f32(top.vel.y, -1.6, 1e-6));

    let mut left = ball(Vec2::new(-1.2, 0.0), Vec2::new(-0.5, 0.1), 0.1);
    assert!(reflect(&mut left, RESTITUTION));
    assert!(approx_eq_f32(left.pos.x, -0.9, 1e-6));
    assert!(approx_eq_f32(left.vel.x, 0.4, 1e-6));
    assert_eq!(left.vel.y, 0.1);

    let mut right = ball(Vec2::new(0.98, 0.0), Vec2::new(1.0, 0.0), 0.05);
    assert!(reflect(&mut right, 0.5));
    assert!(approx_eq_f32(right.pos.x, 0.95, 1e-6));
    assert!(approx_eq_f32(right.vel.x, -0.5, 1e-6));
}

#[test]
fn test_corner_bounces_on_both_axes() {
    let mut b = ball(Vec2::new(0.97, 0.97), Vec2::new(1.0, 1.0), 0.05);

    assert!(reflect(&mut b, RESTITUTION));

    assert!(vec_approx_eq(b.pos, Vec2::new(0.95, 0.95), 1e-6));
    assert!(vec_approx_eq(b.vel, Vec2::new(-0.8, -0.8), 1e-6));
}

#[test]
fn test_inside_body_untouched() {
    let original = ball(Vec2::new(0.5, -0.5), Vec2::new(3.0, -3.0), 0.1);
    let mut b = original.clone();

    assert!(!reflect(&mut b, RESTITUTION));
    assert_eq!(b, original);
}

#[test]
fn test_open_policy_lets_bodies_escape() {
    let escaping = ball(Vec2::new(1.5, -2.0), Vec2::new(1.0, -1.0), 0.1);
    let mut store = store_with(&[escaping.clone()]);

    assert_eq!(BoundaryPolicy::Open.resolve(&mut store), 0);
    assert_eq!(store.get(EntityId::regular(0)).unwrap(), &escaping);
    assert!(!BoundaryPolicy::Open.is_enabled());
}

#[test]
fn test_fixed_bodies_are_not_reflected() {
    let pinned = ball(Vec2::new(0.0, -1.0), Vec2::new(0.0, -1.0), 0.1).with_fixed(true);
    let hole = Body::heavy(Vec2::new(1.0, 1.0), Vec2::ZERO, 10.0, 0.07);
    let mut store = store_with(&[pinned.clone(), hole.clone()]);

    assert_eq!(BoundaryPolicy::default().resolve(&mut store), 0);
    assert_eq!(store.get(EntityId::regular(0)).unwrap(), &pinned);
    assert_eq!(store.get(EntityId::heavy(0)).unwrap(), &hole);
}
