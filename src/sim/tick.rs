//! Fixed timestep simulation tick
//!
//! Advances the simulation deterministically: integrate kinematics, build one
//! field from the integrated snapshot, resolve every body's contact against
//! that snapshot, then apply the results and the tag reactions. No body ever
//! observes another's mid-resolution position within a step.

use glam::Vec2;

use super::collision::{Contact, resolve_collision};
use super::scene::build_field;
use super::sdf::Tag;
use super::state::{SimEvent, SimState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Cursor position in scene units; the shadow chases it
    pub cursor: Vec2,
}

impl TickInput {
    fn steer(&self) -> f32 {
        (self.right as i32 - self.left as i32) as f32
    }
}

/// Advance the simulation by one fixed timestep of `dt` seconds.
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) -> Vec<SimEvent> {
    let mut events = Vec::new();
    state.level_time += dt;
    let drag = dt.powf(DECAY);

    // Integrate the player
    state.player.pos += state.player.vel * dt;
    state.player.vel.x += PLAYER_ACCELERATION * dt * input.steer();
    state.player.vel.y += GRAVITY * dt;
    state.player.vel *= drag;

    // The shadow chases the cursor, speed-capped
    state.umbra.pos += state.umbra.vel * dt;
    state.umbra.vel = ((input.cursor - state.umbra.pos) / dt).clamp_length_max(UMBRA_SPEED);

    // Integrate enemies
    for enemy in &mut state.enemies {
        enemy.pos += enemy.vel * dt;
    }

    // One field for the whole step, closed over the integrated snapshot
    let field = build_field(
        state.level(),
        &state.player,
        &state.enemies,
        &state.umbra,
    );

    let player_contact = resolve_collision(&field, &state.player, PLAYER_RESTITUTION, &mut state.rng);
    let enemy_contacts: Vec<Contact> = state
        .enemies
        .iter()
        .map(|enemy| resolve_collision(&field, enemy, 0.0, &mut state.rng))
        .collect();

    // Apply the player's contact and react to what was touched
    state.player = player_contact.body;
    if let Some(hit) = player_contact.hit {
        state.player.vel *= dt.powf(FRICTION);
        match hit.tag {
            Tag::Goal => {
                let next_level = state.advance_level();
                events.push(SimEvent::LevelCompleted { next_level });
                return events;
            }
            Tag::Enemy(enemy) => {
                log::debug!("player caught by enemy {enemy}");
                state.reset_player();
                events.push(SimEvent::PlayerCaught { enemy });
            }
            _ => {}
        }
    }
    if state.player.pos.y.abs() > KILL_BOUND {
        log::debug!("player fell out of bounds at {}", state.player.pos);
        state.reset_player();
        events.push(SimEvent::PlayerFell);
    }

    // Apply enemy contacts, then steer each toward the player
    for (i, contact) in enemy_contacts.into_iter().enumerate() {
        state.enemies[i] = contact.body;
        let enemy = &mut state.enemies[i];
        let seek = (state.player.pos - enemy.pos).normalize_or_zero();
        enemy.vel += seek * ENEMY_ACCELERATION * dt;
        if enemy.pos.x.abs() > KILL_BOUND || enemy.pos.y.abs() > KILL_BOUND {
            state.reset_enemy(i);
            events.push(SimEvent::EnemyRespawned { enemy: i as u32 });
        }
    }

    // Afterimage chain: each point eases toward its predecessor, the head
    // toward the player, sequentially within the same pass.
    let follow = dt.powf(TRAIL_FOLLOW);
    let mut lead = state.player.pos;
    for point in &mut state.trail {
        *point += (lead - *point) * follow;
        lead = *point;
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{Level, WallShape, builtin_levels};

    fn flat_level() -> Level {
        Level {
            walls: vec![WallShape::Rect {
                center: Vec2::new(0.0, 4.0),
                half_extents: Vec2::new(40.0, 2.0),
                rotation: 0.0,
            }],
            start: Vec2::new(0.0, 0.0),
            goal: Vec2::new(35.0, 0.0),
            enemies: Vec::new(),
            texts: Vec::new(),
        }
    }

    fn run_ticks(state: &mut SimState, input: &TickInput, n: usize) -> Vec<SimEvent> {
        let mut events = Vec::new();
        for _ in 0..n {
            events.extend(tick(state, input, SIM_DT));
        }
        events
    }

    #[test]
    fn test_gravity_pulls_player_down() {
        let mut state = SimState::new(vec![flat_level()], 3);
        let input = TickInput {
            cursor: Vec2::new(0.0, -50.0),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.player.vel.y > 0.0);
    }

    #[test]
    fn test_player_comes_to_rest_on_floor() {
        let mut state = SimState::new(vec![flat_level()], 3);
        let input = TickInput {
            cursor: Vec2::new(0.0, -50.0),
            ..Default::default()
        };
        run_ticks(&mut state, &input, 600);
        // Floor top face is y = 2; a radius-2 body rests with center near 0
        assert!(state.player.pos.y < 2.0);
        assert!(state.player.pos.y > -2.0);
        assert!(state.player.vel.length() < 10.0);
        assert!(state.player.pos.x.abs() < 1.0);
    }

    #[test]
    fn test_walking_right_reaches_goal() {
        let mut state = SimState::new(vec![flat_level()], 3);
        let input = TickInput {
            right: true,
            cursor: Vec2::new(0.0, -50.0),
            ..Default::default()
        };
        let events = run_ticks(&mut state, &input, 1800);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, SimEvent::LevelCompleted { .. })),
            "player walking right for 30s should touch the goal, events: {events:?}"
        );
    }

    #[test]
    fn test_enemy_seeks_player() {
        let mut level = flat_level();
        level.enemies.push(Vec2::new(30.0, -20.0));
        let mut state = SimState::new(vec![level], 3);
        let input = TickInput {
            cursor: Vec2::new(0.0, -50.0),
            ..Default::default()
        };
        let before = (state.enemies[0].pos - state.player.pos).length();
        run_ticks(&mut state, &input, 120);
        let after = (state.enemies[0].pos - state.player.pos).length();
        assert!(after < before);
    }

    #[test]
    fn test_fall_out_of_bounds_resets_player() {
        let mut level = flat_level();
        // No floor: the player free-falls
        level.walls.clear();
        let mut state = SimState::new(vec![level], 3);
        let input = TickInput {
            cursor: Vec2::new(0.0, -50.0),
            ..Default::default()
        };
        for _ in 0..600 {
            if tick(&mut state, &input, SIM_DT).contains(&SimEvent::PlayerFell) {
                assert_eq!(state.player.pos, state.level().start);
                assert_eq!(state.player.vel, Vec2::ZERO);
                return;
            }
        }
        panic!("free-falling player never left the play bounds");
    }

    #[test]
    fn test_same_seed_same_run() {
        let input = TickInput {
            right: true,
            cursor: Vec2::new(10.0, -30.0),
            ..Default::default()
        };
        let mut a = SimState::new(builtin_levels(), 42);
        let mut b = SimState::new(builtin_levels(), 42);
        for _ in 0..600 {
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }
        assert_eq!(a.player, b.player);
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.level_index, b.level_index);
    }

    #[test]
    fn test_trail_follows_player() {
        let mut state = SimState::new(vec![flat_level()], 3);
        let input = TickInput {
            right: true,
            cursor: Vec2::new(0.0, -50.0),
            ..Default::default()
        };
        run_ticks(&mut state, &input, 300);
        // Head hugs the player, tail lags behind
        let head_gap = (state.trail[0] - state.player.pos).length();
        let tail_gap = (state.trail[TRAIL_LENGTH - 1] - state.player.pos).length();
        assert!(head_gap <= tail_gap + 1e-3);
    }
}
