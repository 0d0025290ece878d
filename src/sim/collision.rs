//! Collision resolution against the composed field
//!
//! One body per call: query the field with the body's own collider excluded,
//! project to the nearest surface point, then push the body out along the
//! contact normal and reflect its velocity relative to the surface's own
//! motion.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::sdf::{Field, Tag, field_normal, project_to_surface};
use super::state::Body;

/// What a body touched, reported to the step driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Classification of the touched surface (never an inversion sentinel)
    pub tag: Tag,
    /// Velocity of the touched surface at the contact point
    pub velocity: Vec2,
}

/// Result of a collision query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// The body with penetration and velocity resolved (unchanged on a miss)
    pub body: Body,
    /// `None` when no penetration occurred
    pub hit: Option<Hit>,
}

impl Contact {
    fn miss(body: Body) -> Self {
        Self { body, hit: None }
    }
}

/// Resolve one step of penetration for `body`
///
/// `restitution` is the bounce fraction: 0 absorbs all velocity along the
/// normal, 0.3 keeps a modest bounce. The body's own collider is excluded
/// from every field query, so a body never collides with itself.
pub fn resolve_collision(
    field: &Field,
    body: &Body,
    restitution: f32,
    rng: &mut Pcg32,
) -> Contact {
    let exclude = Some(body.id);
    let distance = field.sample(body.pos, exclude).distance;
    if distance >= body.radius {
        return Contact::miss(*body);
    }

    let contact_point = project_to_surface(field, body.pos, exclude, rng);
    let offset = body.pos - contact_point;
    let contact_distance = offset.length();

    let normal = if contact_distance == 0.0 {
        // Degenerate contact: the projection never left the body's position.
        // The gradient normal is outward-facing by construction.
        field_normal(field, body.pos, exclude)
    } else if distance < 0.0 {
        // Body center is inside the geometry, so the contact point sits
        // behind it; flip to keep the normal facing out of the surface.
        -offset / contact_distance
    } else {
        offset / contact_distance
    };

    let penetration = body.radius - contact_distance;
    if penetration <= 0.0 {
        // Projection found no point closer than the allowed radius.
        return Contact::miss(*body);
    }

    let surface = field.sample(contact_point, exclude);
    let dot = (body.vel - surface.velocity).dot(normal);

    let resolved = Body {
        pos: body.pos + (1.0 + restitution) * normal * penetration,
        vel: body.vel - (1.0 + restitution) * dot * normal,
        ..*body
    };

    Contact {
        body: resolved,
        hit: Some(Hit {
            tag: surface.tag,
            velocity: surface.velocity,
        }),
    }
}
