//! Level geometry data
//!
//! Pure data consumed by the scene builder: an ordered list of wall
//! primitives, a start point, a goal position, enemy spawn points, and
//! free-form label texts for presentation. Levels carry no behavior.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One static wall primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum WallShape {
    Circle {
        center: Vec2,
        radius: f32,
    },
    Rect {
        center: Vec2,
        half_extents: Vec2,
        #[serde(default)]
        rotation: f32,
    },
}

/// A floating label shown inside the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelText {
    pub pos: Vec2,
    pub text: String,
}

/// One level: geometry plus spawn/goal markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub walls: Vec<WallShape>,
    /// Player spawn point
    pub start: Vec2,
    /// Center of the goal box
    pub goal: Vec2,
    /// Enemy spawn points
    #[serde(default)]
    pub enemies: Vec<Vec2>,
    /// Presentation-only labels
    #[serde(default)]
    pub texts: Vec<LevelText>,
}

/// Parse a level set from JSON.
pub fn load_levels(json: &str) -> serde_json::Result<Vec<Level>> {
    serde_json::from_str(json)
}

fn rect(x: f32, y: f32, hx: f32, hy: f32) -> WallShape {
    WallShape::Rect {
        center: Vec2::new(x, y),
        half_extents: Vec2::new(hx, hy),
        rotation: 0.0,
    }
}

fn circle(x: f32, y: f32, radius: f32) -> WallShape {
    WallShape::Circle {
        center: Vec2::new(x, y),
        radius,
    }
}

fn text(x: f32, y: f32, s: &str) -> LevelText {
    LevelText {
        pos: Vec2::new(x, y),
        text: s.to_owned(),
    }
}

/// The built-in campaign
pub fn builtin_levels() -> Vec<Level> {
    vec![
        Level {
            walls: vec![rect(0.0, 4.0, 40.0, 2.0), circle(10.0, 4.0, 4.0)],
            start: Vec2::new(0.0, 0.0),
            goal: Vec2::new(35.0, 0.0),
            enemies: vec![Vec2::new(0.0, 25.0)],
            texts: vec![
                text(0.0, -10.0, "Hello stranger!"),
                text(
                    0.0,
                    -5.0,
                    "Get to the green square to continue (A/D/Left/Right)",
                ),
            ],
        },
        Level {
            walls: vec![rect(0.0, 0.0, 18.0, 2.0), rect(0.0, 10.0, 18.0, 2.0)],
            start: Vec2::new(0.0, -10.0),
            goal: Vec2::new(0.0, 5.0),
            enemies: Vec::new(),
            texts: vec![text(0.0, -10.0, "Use your mouse to create shadows")],
        },
        Level {
            walls: vec![
                rect(-20.0, 10.0, 18.0, 2.0),
                rect(20.0, 2.0, 18.0, 2.0),
                rect(42.0, -2.0, 2.0, 2.0),
            ],
            start: Vec2::new(-20.0, 0.0),
            goal: Vec2::new(42.0, -6.0),
            enemies: Vec::new(),
            texts: vec![text(0.0, -10.0, "Try making a ramp to jump")],
        },
        Level {
            walls: vec![rect(0.0, 27.0, 40.0, 25.0)],
            start: Vec2::new(0.0, 0.0),
            goal: Vec2::new(35.0, -25.0),
            enemies: Vec::new(),
            texts: vec![
                text(25.0, -5.0, "Try making a shadow here"),
                text(25.0, 0.0, "V"),
            ],
        },
        Level {
            walls: vec![rect(0.0, 25.0, 28.0, 3.0), rect(25.0, 0.0, 3.0, 28.0)],
            start: Vec2::new(0.0, 17.0),
            goal: Vec2::new(35.0, 0.0),
            enemies: Vec::new(),
            texts: vec![text(0.0, 0.0, "Elevator!")],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_are_sane() {
        let levels = builtin_levels();
        assert_eq!(levels.len(), 5);
        for level in &levels {
            assert!(!level.walls.is_empty());
            assert_ne!(level.start, level.goal);
        }
    }

    #[test]
    fn test_levels_round_trip_through_json() {
        let levels = builtin_levels();
        let json = serde_json::to_string(&levels).unwrap();
        let parsed = load_levels(&json).unwrap();
        assert_eq!(parsed, levels);
    }

    #[test]
    fn test_rotation_defaults_to_zero() {
        let json = r#"[{
            "walls": [
                {"shape": "rect", "center": [0.0, 4.0], "half_extents": [40.0, 2.0]},
                {"shape": "circle", "center": [10.0, 4.0], "radius": 4.0}
            ],
            "start": [0.0, 0.0],
            "goal": [35.0, 0.0]
        }]"#;
        let levels = load_levels(json).unwrap();
        assert_eq!(levels[0].walls[0], rect(0.0, 4.0, 40.0, 2.0));
        assert!(levels[0].enemies.is_empty());
    }
}
