//! Simulation state and entity types
//!
//! The core holds no state between collision calls; everything that persists
//! across ticks lives here, owned by the step driver.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::sdf::BodyId;
use crate::consts::*;
use crate::level::Level;

/// A dynamic circular body (the player or one enemy)
///
/// Passed by value through collision resolution: the resolver returns a
/// corrected copy and never mutates shared state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Stable for the body's lifetime; used only for SDF self-exclusion
    pub id: BodyId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn new(id: BodyId, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }
}

/// The cursor-tracked shadow region
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Umbra {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Events reported by a tick, for the caller to present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// The player touched the goal; the sim has advanced to `next_level`
    LevelCompleted { next_level: usize },
    /// The player touched an enemy and was reset to the level start
    PlayerCaught { enemy: u32 },
    /// The player left the play bounds and was reset
    PlayerFell,
    /// An enemy left the play bounds and respawned at its spawn point
    EnemyRespawned { enemy: u32 },
}

/// Complete simulation state for a run
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed, for reproducibility
    pub seed: u64,
    /// Deterministic RNG (projection jitter); seeded from `seed`
    pub rng: Pcg32,
    /// Index into the level set
    pub level_index: usize,
    /// Seconds spent in the current level
    pub level_time: f32,
    pub player: Body,
    /// One body per enemy spawn, same order as the level data
    pub enemies: Vec<Body>,
    pub umbra: Umbra,
    /// Afterimage chain trailing the player (presentation data only)
    pub trail: Vec<Vec2>,
    levels: Vec<Level>,
    next_id: u32,
}

impl SimState {
    /// Create a run over `levels`, starting at the first level.
    /// Panics if `levels` is empty.
    pub fn new(levels: Vec<Level>, seed: u64) -> Self {
        assert!(!levels.is_empty(), "a run needs at least one level");
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level_index: 0,
            level_time: 0.0,
            player: Body::new(BodyId(0), Vec2::ZERO, PLAYER_RADIUS),
            enemies: Vec::new(),
            umbra: Umbra::default(),
            trail: Vec::new(),
            levels,
            next_id: 0,
        };
        state.enter_level(0);
        state
    }

    fn next_body_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The current level's data
    pub fn level(&self) -> &Level {
        &self.levels[self.level_index]
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Load a level: player at the start point, enemies at their spawns,
    /// trail collapsed onto the player.
    pub fn enter_level(&mut self, index: usize) {
        self.level_index = index;
        self.level_time = 0.0;
        let level = &self.levels[index];
        let start = level.start;
        let spawns = level.enemies.clone();

        let player_id = self.next_body_id();
        self.player = Body::new(player_id, start, PLAYER_RADIUS);
        self.enemies = spawns
            .into_iter()
            .map(|spawn| {
                let id = self.next_body_id();
                Body::new(id, spawn, ENEMY_RADIUS)
            })
            .collect();
        self.trail = vec![start; TRAIL_LENGTH];
        log::info!(
            "entering level {index} ({} walls, {} enemies)",
            self.level().walls.len(),
            self.enemies.len()
        );
    }

    /// Advance past the current level, wrapping after the last one.
    pub fn advance_level(&mut self) -> usize {
        let next = (self.level_index + 1) % self.levels.len();
        self.enter_level(next);
        next
    }

    /// Put the player back at the level start with no velocity.
    pub fn reset_player(&mut self) {
        self.player.pos = self.level().start;
        self.player.vel = Vec2::ZERO;
    }

    /// Put enemy `index` back at its spawn point with no velocity.
    pub fn reset_enemy(&mut self, index: usize) {
        let spawn = self.level().enemies[index];
        let enemy = &mut self.enemies[index];
        enemy.pos = spawn;
        enemy.vel = Vec2::ZERO;
    }
}
