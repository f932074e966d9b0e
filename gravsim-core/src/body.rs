use crate::error::SimError;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gravitational constant (m³ kg⁻¹ s⁻²)
pub const G: f64 = 6.67430e-11;

/// Additive term inside the squared distance of the force law
pub const SOFTENING: f64 = 1e-6;

/// Kilograms per solar mass, applied to heavy bodies at the force boundary
pub const SOLAR_MASS_KG: f64 = 2e30;

/// Fraction of the normal velocity kept after a wall bounce
pub const RESTITUTION: f32 = 0.8;

/// Largest acceleration a single source may induce at zero separation
///
/// At distance zero the softened law gives `G * m / SOFTENING`. Masses are
/// capped so this stays far inside `f32` range even summed over many sources.
pub const MAX_PEAK_ACCELERATION: f64 = 1e30;

/// Heaviest mass accepted by the store, in kilograms
pub const MAX_MASS_KG: f64 = MAX_PEAK_ACCELERATION * SOFTENING / G;

/// Unit in which a body's `mass` field is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassUnit {
    Kilograms,
    SolarMasses,
}

impl MassUnit {
    /// Convert a mass expressed in this unit to kilograms
    pub fn to_kg(self, mass: f32) -> f64 {
        match self {
            MassUnit::Kilograms => mass as f64,
            MassUnit::SolarMasses => mass as f64 * SOLAR_MASS_KG,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MassUnit::Kilograms => "kg",
            MassUnit::SolarMasses => "solar masses",
        }
    }
}

/// Category of an entity; decides which list of the store it lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Regular,
    Heavy,
}

impl EntityKind {
    pub fn mass_unit(self) -> MassUnit {
        match self {
            EntityKind::Regular => MassUnit::Kilograms,
            EntityKind::Heavy => MassUnit::SolarMasses,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Regular => write!(f, "regular"),
            EntityKind::Heavy => write!(f, "heavy"),
        }
    }
}

/// A point mass in the simulation
///
/// Regular bodies and heavy bodies share this representation; `kind` tags
/// which unit `mass` is stored in.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Mass in the unit given by `kind.mass_unit()`
    pub mass: f32,
    pub radius: f32,
    pub fixed: bool,
    pub color: [f32; 3],
}

impl Body {
    /// A regular body with its mass given in kilograms
    pub fn regular(pos: Vec2, vel: Vec2, mass_kg: f32, radius: f32) -> Self {
        Self {
            kind: EntityKind::Regular,
            pos,
            vel,
            mass: mass_kg,
            radius,
            fixed: false,
            color: [0.8, 0.8, 0.8],
        }
    }

    /// A heavy body with its mass given in solar masses
    pub fn heavy(pos: Vec2, vel: Vec2, mass_solar: f32, radius: f32) -> Self {
        Self {
            kind: EntityKind::Heavy,
            pos,
            vel,
            mass: mass_solar,
            radius,
            fixed: true,
            color: [0.3, 0.0, 0.0],
        }
    }

    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn mass_unit(&self) -> MassUnit {
        self.kind.mass_unit()
    }

    /// Mass in kilograms, the only form the force law ever sees
    pub fn mass_kg(&self) -> f64 {
        self.mass_unit().to_kg(self.mass)
    }

    /// Closed-disk containment test
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance_squared(point) <= self.radius * self.radius
    }

    pub fn validate(&self) -> Result<(), SimError> {
        check_mass(self.mass_unit(), self.mass)?;
        check_radius(self.radius)?;
        check_finite("position", self.pos)?;
        check_finite("velocity", self.vel)?;
        Ok(())
    }
}

pub(crate) fn check_mass(unit: MassUnit, mass: f32) -> Result<(), SimError> {
    if !(mass.is_finite() && mass > 0.0) {
        return Err(SimError::InvalidMass(mass));
    }
    if unit.to_kg(mass) > MAX_MASS_KG {
        return Err(SimError::MassTooLarge {
            mass,
            unit: unit.label(),
        });
    }
    Ok(())
}

pub(crate) fn check_radius(radius: f32) -> Result<(), SimError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidRadius(radius))
    }
}

pub(crate) fn check_finite(field: &'static str, v: Vec2) -> Result<(), SimError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(SimError::NonFinite { field })
    }
}
