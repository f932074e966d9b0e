pub mod body;
pub mod boundary;
pub mod clock;
pub mod edit;
pub mod error;
pub mod forces;
pub mod input;
pub mod integrator;
pub mod picking;
pub mod scene;
pub mod simulation;
pub mod store;

pub use body::{
    Body, EntityKind, MassUnit, G, MAX_MASS_KG, MAX_PEAK_ACCELERATION, RESTITUTION, SOFTENING,
    SOLAR_MASS_KG,
};
pub use boundary::BoundaryPolicy;
pub use clock::{PressLatch, SimulationClock};
pub use edit::Edit;
pub use error::SimError;
pub use forces::{compute_accelerations, pairwise_acceleration, Accelerations};
pub use input::{InputEvent, InputQueue, Mutation, PointerButton};
pub use picking::pick;
pub use scene::SceneConfig;
pub use simulation::{RenderItem, RenderSnapshot, Simulation};
pub use store::{EntityId, EntityStore};
