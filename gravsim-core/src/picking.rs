use crate::store::{EntityId, EntityStore};
use glam::Vec2;

/// First entity whose disk contains `point`, regular bodies before heavy
/// bodies, in store order
pub fn pick(store: &EntityStore, point: Vec2) -> Option<EntityId> {
    store
        .iter()
        .find(|(_, body)| body.contains(point))
        .map(|(id, _)| id)
}

/// First entity whose disk overlaps a disk of `radius` centred on `point`
pub fn overlapping(store: &EntityStore, point: Vec2, radius: f32) -> Option<EntityId> {
    store
        .iter()
        .find(|(_, body)| {
            let reach = body.radius + radius;
            body.pos.distance_squared(point) <= reach * reach
        })
        .map(|(id, _)| id)
}
