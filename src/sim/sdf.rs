//! Signed-distance-field scene representation
//!
//! The scene is a tree of primitives (circles, boxes, body colliders) and
//! combinators (union, inversion, tagging) evaluated as one distance function.
//! A query returns the signed distance to the nearest surface, that surface's
//! velocity, and a tag classifying it. The tree is rebuilt from live state
//! every simulation step, so a query always sees a consistent snapshot.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{
    PROJECT_DAMPING, PROJECT_JITTER, PROJECT_MAX_STEPS, PROJECT_STALL_STEPS, SDF_EPSILON,
};

/// Stable identity of a dynamic body, used only for self-exclusion in queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Classification of the nearest surface at a query point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tag {
    /// No classification (untagged body collider)
    #[default]
    None,
    /// Static level geometry
    Wall,
    /// The level's goal marker
    Goal,
    /// The player's collider
    Player,
    /// An enemy collider, by enemy index
    Enemy(u32),
}

/// Result of sampling the field at a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Signed distance to the nearest surface (negative = inside)
    pub distance: f32,
    /// Linear velocity of that surface
    pub velocity: Vec2,
    /// Classification of that surface. For an inverted sample this is the
    /// tag the operand carried before inversion.
    pub tag: Tag,
    /// Set while the sample travels out of an `Invert` node; consumed by the
    /// enclosing `Union` and never reported from a resolved contact.
    pub inverted: bool,
}

/// A node of the scene tree
///
/// Plain data, evaluated by a recursive walk. A composed scene can be
/// inspected, logged, or serialized like any other value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SdfNode {
    /// Solid circle
    Circle {
        center: Vec2,
        velocity: Vec2,
        radius: f32,
    },
    /// Solid box, optionally rotated about its center
    Rect {
        center: Vec2,
        velocity: Vec2,
        half_extents: Vec2,
        rotation: f32,
    },
    /// A dynamic body's collider; excluded from that body's own queries
    Body {
        id: BodyId,
        center: Vec2,
        velocity: Vec2,
        radius: f32,
    },
    /// Nearest-wins union of the operands
    Union(Vec<SdfNode>),
    /// Region inversion: inside becomes outside
    Invert(Box<SdfNode>),
    /// Overrides the classification of the operand
    Tagged(Box<SdfNode>, Tag),
}

impl SdfNode {
    pub fn circle(center: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self::Circle {
            center,
            velocity,
            radius,
        }
    }

    pub fn rect(center: Vec2, velocity: Vec2, half_extents: Vec2, rotation: f32) -> Self {
        Self::Rect {
            center,
            velocity,
            half_extents,
            rotation,
        }
    }

    pub fn body(id: BodyId, center: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self::Body {
            id,
            center,
            velocity,
            radius,
        }
    }

    /// Nearest-wins union. Panics on an empty operand list: an empty scene is
    /// an assembly bug and must not masquerade as infinite empty space.
    pub fn union(operands: Vec<SdfNode>) -> Self {
        assert!(!operands.is_empty(), "union requires at least one operand");
        Self::Union(operands)
    }

    pub fn invert(self) -> Self {
        Self::Invert(Box::new(self))
    }

    pub fn tagged(self, tag: Tag) -> Self {
        Self::Tagged(Box::new(self), tag)
    }

    fn eval(&self, p: Vec2, exclude: Option<BodyId>) -> Sample {
        match self {
            SdfNode::Circle {
                center,
                velocity,
                radius,
            } => Sample {
                distance: (p - *center).length() - radius,
                velocity: *velocity,
                tag: Tag::Wall,
                inverted: false,
            },
            SdfNode::Rect {
                center,
                velocity,
                half_extents,
                rotation,
            } => Sample {
                distance: sd_rect(p - *center, *half_extents, *rotation),
                velocity: *velocity,
                tag: Tag::Wall,
                inverted: false,
            },
            SdfNode::Body {
                id,
                center,
                velocity,
                radius,
            } => {
                let distance = if exclude == Some(*id) {
                    f32::INFINITY
                } else {
                    (p - *center).length() - radius
                };
                Sample {
                    distance,
                    velocity: *velocity,
                    tag: Tag::None,
                    inverted: false,
                }
            }
            SdfNode::Union(operands) => {
                let mut nearest: Option<Sample> = None;
                for operand in operands {
                    let sample = operand.eval(p, exclude);
                    if sample.inverted {
                        // An inverted region never becomes the nearest surface
                        // itself. Standing deeper inside it than the nearest
                        // geometry reclassifies that geometry without changing
                        // penetration depth.
                        if let Some(best) = nearest.as_mut() {
                            if sample.distance > best.distance {
                                best.tag = sample.tag;
                            }
                        }
                    } else if nearest.is_none_or(|best| sample.distance < best.distance) {
                        nearest = Some(sample);
                    }
                }
                nearest.expect("union evaluated with only inverted operands")
            }
            SdfNode::Invert(operand) => {
                let sample = operand.eval(p, exclude);
                Sample {
                    distance: -sample.distance,
                    inverted: true,
                    ..sample
                }
            }
            SdfNode::Tagged(operand, tag) => {
                let mut sample = operand.eval(p, exclude);
                if !sample.inverted {
                    sample.tag = *tag;
                }
                sample
            }
        }
    }
}

/// Exact signed distance to a box centered at the origin, rotated by
/// `rotation` radians. Offset is query point minus box center.
fn sd_rect(offset: Vec2, half_extents: Vec2, rotation: f32) -> f32 {
    let local = if rotation != 0.0 {
        Vec2::from_angle(-rotation).rotate(offset)
    } else {
        offset
    };
    let q = local.abs() - half_extents;
    if q.x.max(q.y) > 0.0 {
        q.max(Vec2::ZERO).length()
    } else {
        q.x.max(q.y)
    }
}

/// A composed, queryable distance field for one simulation step
///
/// Closes over a snapshot of positions and velocities at construction time;
/// queries within a step always agree with each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    root: SdfNode,
}

impl Field {
    pub fn new(root: SdfNode) -> Self {
        Self { root }
    }

    /// Sample the field at `p`. A body passes its own id as `exclude` so its
    /// collider drops out of the scene for this query.
    pub fn sample(&self, p: Vec2, exclude: Option<BodyId>) -> Sample {
        self.root.eval(p, exclude)
    }
}

/// Estimated field gradient (unit surface normal) via central differences
///
/// Returns zero when the differences vanish (e.g. at a symmetric interior
/// point) rather than propagating NaN.
pub fn field_normal(field: &Field, p: Vec2, exclude: Option<BodyId>) -> Vec2 {
    let e = SDF_EPSILON;
    let dx = field.sample(p + Vec2::new(e, 0.0), exclude).distance
        - field.sample(p - Vec2::new(e, 0.0), exclude).distance;
    let dy = field.sample(p + Vec2::new(0.0, e), exclude).distance
        - field.sample(p - Vec2::new(0.0, e), exclude).distance;
    Vec2::new(dx, dy).normalize_or_zero()
}

/// Walk from `start` to the nearest point on the field's zero level set
///
/// Damped iterative descent: the distance field is not Lipschitz-exact near
/// corners and inversions, so each step moves `-distance * normal * 0.9` and
/// the loop is capped at 40 iterations. If a step makes the distance worse
/// after the first ten iterations, the point is jittered slightly to escape
/// oscillation. Always returns the best point seen; convergence failure is
/// not an error.
pub fn project_to_surface(
    field: &Field,
    start: Vec2,
    exclude: Option<BodyId>,
    rng: &mut Pcg32,
) -> Vec2 {
    let mut p = start;
    let mut d = field.sample(p, exclude).distance;
    let mut best = p;
    let mut best_d = d.abs();

    for i in 0..PROJECT_MAX_STEPS {
        if d.abs() <= SDF_EPSILON {
            return p;
        }
        let normal = field_normal(field, p, exclude);
        p -= d * normal * PROJECT_DAMPING;
        let mut next_d = field.sample(p, exclude).distance;
        if next_d.abs() > d.abs() && i > PROJECT_STALL_STEPS {
            p.x += rng.random_range(-PROJECT_JITTER..=PROJECT_JITTER);
            p.y += rng.random_range(-PROJECT_JITTER..=PROJECT_JITTER);
            next_d = field.sample(p, exclude).distance;
        }
        d = next_d;
        if d.abs() < best_d {
            best = p;
            best_d = d.abs();
        }
    }

    best
}
