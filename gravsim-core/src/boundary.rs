use crate::body::{Body, RESTITUTION};
use crate::store::EntityStore;
use serde::{Deserialize, Serialize};

/// Half extent of the square simulation domain `[-1, 1] × [-1, 1]`
pub const DOMAIN_HALF_EXTENT: f32 = 1.0;

/// What happens when a body's disk crosses the domain walls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Bodies may leave the visible domain for good
    Open,
    /// Bodies bounce off the walls, keeping `restitution` of the normal speed
    Reflect { restitution: f32 },
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        BoundaryPolicy::Reflect {
            restitution: RESTITUTION,
        }
    }
}

impl BoundaryPolicy {
    pub fn is_enabled(&self) -> bool {
        matches!(self, BoundaryPolicy::Reflect { .. })
    }

    /// Apply the policy to every non-fixed entity; returns how many bounced
    pub fn resolve(&self, store: &mut EntityStore) -> usize {
        let BoundaryPolicy::Reflect { restitution } = *self else {
            return 0;
        };

        store
            .iter_mut()
            .filter(|b| !b.fixed)
            .map(|b| reflect(b, restitution))
            .filter(|&bounced| bounced)
            .count()
    }
}

/// Reflect one body off the walls. Both axes are checked independently, so a
/// corner hit bounces on x and y in the same call.
pub fn reflect(body: &mut Body, restitution: f32) -> bool {
    let r = body.radius;
    let lo = -DOMAIN_HALF_EXTENT;
    let hi = DOMAIN_HALF_EXTENT;
    let mut bounced = false;

    if body.pos.y - r < lo {
        body.pos.y = lo + r;
        body.vel.y = -body.vel.y * restitution;
        bounced = true;
    } else if body.pos.y + r > hi {
        body.pos.y = hi - r;
        body.vel.y = -body.vel.y * restitution;
        bounced = true;
    }

    if body.pos.x - r < lo {
        body.pos.x = lo + r;
        body.vel.x = -body.vel.x * restitution;
        bounced = true;
    } else if body.pos.x + r > hi {
        body.pos.x = hi - r;
        body.vel.x = -body.vel.x * restitution;
        bounced = true;
    }

    bounced
}
