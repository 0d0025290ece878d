//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (player first, then enemies by index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod scene;
pub mod sdf;
pub mod state;
pub mod tick;

pub use collision::{Contact, Hit, resolve_collision};
pub use scene::build_field;
pub use sdf::{BodyId, Field, Sample, SdfNode, Tag, field_normal, project_to_surface};
pub use state::{Body, SimEvent, SimState, Umbra};
pub use tick::{TickInput, tick};
