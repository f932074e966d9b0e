//! Softened Newtonian gravity over the whole entity store
//!
//! Brute-force pairwise summation: O(n² + n·m) per frame for n regular and
//! m heavy bodies. Summation order follows store order.

use crate::body::{Body, EntityKind, G, SOFTENING};
use crate::store::{EntityId, EntityStore};
use glam::Vec2;

/// Per-entity accelerations, indexed like the store's two lists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accelerations {
    pub regular: Vec<Vec2>,
    pub heavy: Vec<Vec2>,
}

impl Accelerations {
    pub fn get(&self, id: EntityId) -> Option<Vec2> {
        match id.kind {
            EntityKind::Regular => self.regular.get(id.index).copied(),
            EntityKind::Heavy => self.heavy.get(id.index).copied(),
        }
    }
}

/// Acceleration induced on `target` by `source`
///
/// `SOFTENING` is added to the squared distance, so coincident bodies give a
/// finite result (zero, since the direction vector vanishes). Intermediates
/// are `f64`: the force between two heavy bodies overflows `f32`.
pub fn pairwise_acceleration(target: &Body, source: &Body) -> Vec2 {
    let dx = (source.pos.x - target.pos.x) as f64;
    let dy = (source.pos.y - target.pos.y) as f64;
    let dist2 = dx * dx + dy * dy + SOFTENING;
    let dist = dist2.sqrt();

    let target_kg = target.mass_kg();
    let force = G * target_kg * source.mass_kg() / dist2;
    let ax = force * dx / dist / target_kg;
    let ay = force * dy / dist / target_kg;
    Vec2::new(ax as f32, ay as f32)
}

/// Net acceleration on the entity `target_id` from every other entity
pub fn acceleration_on(store: &EntityStore, target_id: EntityId) -> Vec2 {
    let Some(target) = store.get(target_id) else {
        return Vec2::ZERO;
    };

    let mut accel = Vec2::ZERO;
    for (source_id, source) in store.iter() {
        if source_id == target_id {
            continue;
        }
        accel += pairwise_acceleration(target, source);
    }
    accel
}

/// Compute accelerations for every entity in the store
///
/// Fixed entities get `Vec2::ZERO` but still act as sources for the rest.
pub fn compute_accelerations(store: &EntityStore) -> Accelerations {
    let solve = |(id, body): (EntityId, &Body)| {
        if body.fixed {
            Vec2::ZERO
        } else {
            acceleration_on(store, id)
        }
    };

    let regular = store
        .regular()
        .iter()
        .enumerate()
        .map(|(i, b)| solve((EntityId::regular(i), b)))
        .collect();
    let heavy = store
        .heavy()
        .iter()
        .enumerate()
        .map(|(i, b)| solve((EntityId::heavy(i), b)))
        .collect();

    Accelerations { regular, heavy }
}
