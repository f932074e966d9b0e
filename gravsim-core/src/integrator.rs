use crate::forces::{compute_accelerations, Accelerations};
use crate::store::EntityStore;

/// Velocity pass: `v += a * dt` for every non-fixed entity
///
/// Accelerations must have been computed from the positions the store holds
/// right now, before `advance_positions` runs.
pub fn apply_velocities(store: &mut EntityStore, accelerations: &Accelerations, dt: f32) {
    let accels = accelerations
        .regular
        .iter()
        .chain(accelerations.heavy.iter());
    for (body, accel) in store.iter_mut().zip(accels) {
        if body.fixed {
            continue;
        }
        body.vel += *accel * dt;
    }
}

/// Position pass: `x += v * dt` using the velocity from `apply_velocities`
pub fn advance_positions(store: &mut EntityStore, dt: f32) {
    for body in store.iter_mut() {
        if body.fixed {
            continue;
        }
        body.pos += body.vel * dt;
    }
}

/// Step the store forward by dt using semi-implicit Euler integration
pub fn step(store: &mut EntityStore, dt: f32) {
    if dt == 0.0 {
        return;
    }

    // Forces are read at the pre-update positions
    let accelerations = compute_accelerations(store);
    apply_velocities(store, &accelerations, dt);
    advance_positions(store, dt);
}
