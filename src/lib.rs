//! Umbra - a shadow platformer on a signed-distance-field scene
//!
//! Core modules:
//! - `sim`: Deterministic simulation (SDF scene, collisions, step driver)
//! - `level`: Level geometry data (pure data, JSON loadable)
//!
//! The scene is rebuilt from declarative primitives every simulation step and
//! evaluated as a single combined distance function. Bodies are pushed out of
//! penetrating geometry along the field gradient, and the field reports *what*
//! was touched (wall, goal, enemy, player) via a tag carried alongside the
//! distance value.

pub mod level;
pub mod sim;

pub use level::{Level, WallShape, builtin_levels};
pub use sim::{Body, Contact, Field, SimEvent, SimState, Tag, TickInput};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Player collider radius (scene units)
    pub const PLAYER_RADIUS: f32 = 2.0;
    /// Horizontal acceleration from input (units/s²)
    pub const PLAYER_ACCELERATION: f32 = 240.0;
    /// Downward gravity (units/s²)
    pub const GRAVITY: f32 = 120.0;
    /// Per-tick velocity drag exponent (velocity *= dt^DECAY)
    pub const DECAY: f32 = 0.001;
    /// Extra drag exponent applied while touching a surface
    pub const FRICTION: f32 = 0.004;
    /// Bounce fraction kept by the player on contact
    pub const PLAYER_RESTITUTION: f32 = 0.3;

    /// Shadow region radius
    pub const UMBRA_RADIUS: f32 = 10.0;
    /// Maximum speed at which the shadow tracks the cursor (units/s)
    pub const UMBRA_SPEED: f32 = 180.0;

    /// Enemy collider radius
    pub const ENEMY_RADIUS: f32 = 2.0;
    /// Enemy seek acceleration toward the player (units/s²)
    pub const ENEMY_ACCELERATION: f32 = 180.0;

    /// Goal marker half extents (a 4x4 box)
    pub const GOAL_HALF_EXTENT: f32 = 2.0;

    /// Coordinate magnitude beyond which bodies are reset
    pub const KILL_BOUND: f32 = 100.0;

    /// Afterimage trail length (presentation data only)
    pub const TRAIL_LENGTH: usize = 50;
    /// Trail follow exponent (lerp factor = dt^FOLLOW per tick)
    pub const TRAIL_FOLLOW: f32 = 0.2;

    /// SDF convergence epsilon, also the finite-difference step
    pub const SDF_EPSILON: f32 = 0.01;
    /// Surface projection iteration cap
    pub const PROJECT_MAX_STEPS: u32 = 40;
    /// Damping on each projection step, prevents overshoot near corners
    pub const PROJECT_DAMPING: f32 = 0.9;
    /// Iteration after which a worsening step triggers a jitter
    pub const PROJECT_STALL_STEPS: u32 = 10;
    /// Jitter half-range per axis when projection oscillates
    pub const PROJECT_JITTER: f32 = 0.05;
}
