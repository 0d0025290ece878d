//! Per-step scene assembly
//!
//! Builds the frame's distance field from declarative parts: static level
//! walls, the goal marker, the inverted shadow region, and a collider per
//! live body. Construction is cheap and happens every tick, so a field never
//! closes over stale geometry.

use glam::Vec2;

use super::sdf::{Field, SdfNode, Tag};
use super::state::{Body, Umbra};
use crate::consts::{GOAL_HALF_EXTENT, UMBRA_RADIUS};
use crate::level::{Level, WallShape};

/// Compose the field for one simulation step.
///
/// Operand order is fixed (walls, goal, shadow, enemies, player): the union
/// distance is order-independent, but on an exact tie the first operand's
/// tag wins, and the shadow's tag override applies to whatever minimum
/// precedes it.
pub fn build_field(level: &Level, player: &Body, enemies: &[Body], umbra: &Umbra) -> Field {
    let mut operands = Vec::with_capacity(3 + enemies.len() + 1);

    if !level.walls.is_empty() {
        let walls = level
            .walls
            .iter()
            .map(|shape| match *shape {
                WallShape::Circle { center, radius } => {
                    SdfNode::circle(center, Vec2::ZERO, radius)
                }
                WallShape::Rect {
                    center,
                    half_extents,
                    rotation,
                } => SdfNode::rect(center, Vec2::ZERO, half_extents, rotation),
            })
            .collect();
        operands.push(SdfNode::union(walls));
    }

    operands.push(
        SdfNode::rect(
            level.goal,
            Vec2::ZERO,
            Vec2::splat(GOAL_HALF_EXTENT),
            0.0,
        )
        .tagged(Tag::Goal),
    );

    operands.push(SdfNode::circle(umbra.pos, umbra.vel, UMBRA_RADIUS).invert());

    for (i, enemy) in enemies.iter().enumerate() {
        operands.push(
            SdfNode::body(enemy.id, enemy.pos, enemy.vel, enemy.radius)
                .tagged(Tag::Enemy(i as u32)),
        );
    }

    operands.push(
        SdfNode::body(player.id, player.pos, player.vel, player.radius).tagged(Tag::Player),
    );

    Field::new(SdfNode::union(operands))
}
