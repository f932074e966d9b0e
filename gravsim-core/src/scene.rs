//! Scene configuration: the initial bodies and the knobs of a run.
//!
//! Loaded from JSON; every field has a default, so `{}` is a valid scene
//! describing the stock start state.

use crate::body::{Body, EntityKind, RESTITUTION};
use crate::boundary::BoundaryPolicy;
use crate::error::SimError;
use crate::simulation::Simulation;
use crate::store::EntityStore;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One body as written in a scene file
///
/// `mass` is in kilograms for regular bodies and in solar masses for heavy
/// bodies, depending on which list the entry sits in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub pos: Vec2,
    #[serde(default)]
    pub vel: Vec2,
    pub mass: f32,
    pub radius: f32,
    #[serde(default)]
    pub fixed: bool,
    #[serde(default = "default_color")]
    pub color: [f32; 3],
}

impl BodyConfig {
    pub fn to_body(&self, kind: EntityKind) -> Body {
        Body {
            kind,
            pos: self.pos,
            vel: self.vel,
            mass: self.mass,
            radius: self.radius,
            fixed: self.fixed,
            color: self.color,
        }
    }
}

/// Properties given to bodies spawned from a click
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTemplate {
    #[serde(default)]
    pub vel: Vec2,
    pub mass: f32,
    pub radius: f32,
    #[serde(default)]
    pub fixed: bool,
    #[serde(default = "default_color")]
    pub color: [f32; 3],
}

impl SpawnTemplate {
    pub fn at(&self, kind: EntityKind, pos: Vec2) -> Body {
        Body {
            kind,
            pos,
            vel: self.vel,
            mass: self.mass,
            radius: self.radius,
            fixed: self.fixed,
            color: self.color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTemplates {
    #[serde(default = "default_regular_template")]
    pub regular: SpawnTemplate,
    #[serde(default = "default_heavy_template")]
    pub heavy: SpawnTemplate,
}

impl Default for SpawnTemplates {
    fn default() -> Self {
        Self {
            regular: default_regular_template(),
            heavy: default_heavy_template(),
        }
    }
}

impl SpawnTemplates {
    pub fn body_at(&self, kind: EntityKind, pos: Vec2) -> Body {
        match kind {
            EntityKind::Regular => self.regular.at(kind, pos),
            EntityKind::Heavy => self.heavy.at(kind, pos),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_bodies")]
    pub bodies: Vec<BodyConfig>,
    #[serde(default = "default_heavy")]
    pub heavy: Vec<BodyConfig>,
    /// Reflect bodies off the domain walls
    #[serde(default = "default_boundary")]
    pub boundary: bool,
    #[serde(default = "default_restitution")]
    pub restitution: f32,
    #[serde(default)]
    pub spawn: SpawnTemplates,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            bodies: default_bodies(),
            heavy: default_heavy(),
            boundary: default_boundary(),
            restitution: default_restitution(),
            spawn: SpawnTemplates::default(),
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The reflecting policy this scene uses whenever walls are on
    pub fn wall_policy(&self) -> BoundaryPolicy {
        BoundaryPolicy::Reflect {
            restitution: self.restitution,
        }
    }

    pub fn boundary_policy(&self) -> BoundaryPolicy {
        if self.boundary {
            self.wall_policy()
        } else {
            BoundaryPolicy::Open
        }
    }

    /// Populate a store from the scene, rejecting the first invalid body
    pub fn build_store(&self) -> Result<EntityStore, SimError> {
        let mut store = EntityStore::new();
        for cfg in &self.bodies {
            store.insert(cfg.to_body(EntityKind::Regular))?;
        }
        for cfg in &self.heavy {
            store.insert(cfg.to_body(EntityKind::Heavy))?;
        }
        Ok(store)
    }

    pub fn build(&self) -> Result<Simulation, SimError> {
        check_restitution(self.restitution)?;
        let store = self.build_store()?;
        self.spawn
            .regular
            .at(EntityKind::Regular, Vec2::ZERO)
            .validate()?;
        self.spawn.heavy.at(EntityKind::Heavy, Vec2::ZERO).validate()?;

        log::info!(
            "scene loaded: {} regular, {} heavy, boundary {}",
            store.regular().len(),
            store.heavy().len(),
            if self.boundary { "on" } else { "off" }
        );
        Ok(Simulation::new(store, self.boundary_policy()).with_spawn_templates(self.spawn.clone()))
    }
}

fn check_restitution(restitution: f32) -> Result<(), SimError> {
    if (0.0..=1.0).contains(&restitution) {
        Ok(())
    } else {
        Err(SimError::InvalidRestitution(restitution))
    }
}

fn default_color() -> [f32; 3] {
    [0.8, 0.8, 0.8]
}

fn default_boundary() -> bool {
    true
}

fn default_restitution() -> f32 {
    RESTITUTION
}

fn default_bodies() -> Vec<BodyConfig> {
    vec![BodyConfig {
        pos: Vec2::new(-0.3, 0.0),
        vel: Vec2::ZERO,
        mass: 5.0,
        radius: 0.05,
        fixed: false,
        color: [0.0, 0.7, 1.0],
    }]
}

fn default_heavy() -> Vec<BodyConfig> {
    vec![BodyConfig {
        pos: Vec2::new(0.3, 0.3),
        vel: Vec2::ZERO,
        mass: 5.0,
        radius: 0.07,
        fixed: true,
        color: [0.2, 0.0, 0.0],
    }]
}

fn default_regular_template() -> SpawnTemplate {
    SpawnTemplate {
        vel: Vec2::ZERO,
        mass: 1.0,
        radius: 0.02,
        fixed: false,
        color: [0.8, 0.8, 0.8],
    }
}

fn default_heavy_template() -> SpawnTemplate {
    SpawnTemplate {
        vel: Vec2::ZERO,
        mass: 10.0,
        radius: 0.07,
        fixed: true,
        color: [0.3, 0.0, 0.0],
    }
}
