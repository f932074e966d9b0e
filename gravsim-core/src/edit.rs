use crate::body::{check_finite, check_mass, check_radius, Body, MassUnit};
use crate::error::SimError;
use glam::Vec2;

/// A single field write from the property editor
///
/// `Mass` is in the selected entity's own unit: kilograms for regular
/// bodies, solar masses for heavy bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edit {
    Position(Vec2),
    Velocity(Vec2),
    Mass(f32),
    Radius(f32),
    Fixed(bool),
    Color([f32; 3]),
}

impl Edit {
    /// Reject values that would break the store's invariants
    ///
    /// `unit` is the mass unit of the entity the edit targets.
    pub fn validate(&self, unit: MassUnit) -> Result<(), SimError> {
        match *self {
            Edit::Position(p) => check_finite("position", p),
            Edit::Velocity(v) => check_finite("velocity", v),
            Edit::Mass(m) => check_mass(unit, m),
            Edit::Radius(r) => check_radius(r),
            Edit::Fixed(_) => Ok(()),
            Edit::Color(c) => {
                if c.iter().all(|x| x.is_finite()) {
                    Ok(())
                } else {
                    Err(SimError::NonFinite { field: "color" })
                }
            }
        }
    }

    /// Write the field; leaves the body untouched on an invalid value
    pub fn apply(&self, body: &mut Body) -> Result<(), SimError> {
        self.validate(body.mass_unit())?;
        match *self {
            Edit::Position(p) => body.pos = p,
            Edit::Velocity(v) => body.vel = v,
            Edit::Mass(m) => body.mass = m,
            Edit::Radius(r) => body.radius = r,
            Edit::Fixed(f) => body.fixed = f,
            Edit::Color(c) => body.color = c.map(|x| x.clamp(0.0, 1.0)),
        }
        Ok(())
    }
}
