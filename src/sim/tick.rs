//! Fixed timestep simulation tick
//!
//! One call advances a session by one step. Phase order matters:
//! intent, integration, collisions, scrolling, cleanup, end check, spawning.

use super::collision::{collect_powerups, mob_contact, resolve_landing};
use super::physics::{self, Steer};
use super::scroll::{scroll_fall, scroll_up};
use super::spawn::{maybe_spawn_cloud, maybe_spawn_mob, replenish_platforms};
use super::state::{GameEvent, GameOverCause, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held movement direction
    pub steer: Steer,
    /// Jump key went down
    pub jump: bool,
    /// Jump key came up
    pub jump_cut: bool,
}

/// Rules that vary per session without changing the physics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Touching a mob ends the session
    pub lethal_mobs: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self { lethal_mobs: true }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, rules: &Rules) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    // Player intent
    if input.jump && physics::jump(&mut state.player, &state.platforms) {
        state.events.push(GameEvent::Jumped);
    }
    if input.jump_cut {
        physics::jump_cut(&mut state.player);
    }

    // Integration
    physics::integrate(&mut state.player, input.steer);
    for mob in state.mobs.iter_mut() {
        mob.update();
        if mob.off_screen() {
            mob.dead = true;
        }
    }

    // Collisions
    if let Some(platform_id) = resolve_landing(&mut state.player, &state.platforms) {
        state.events.push(GameEvent::Landed { platform_id });
    }
    for kind in collect_powerups(&mut state.player, &mut state.powerups) {
        state.events.push(GameEvent::PowerUpCollected { kind });
    }
    if rules.lethal_mobs && mob_contact(&state.player, &state.mobs) {
        state.end(GameOverCause::Mob);
    }

    // Scrolling
    if scroll_up(state).is_some() {
        maybe_spawn_cloud(state);
    }
    scroll_fall(state);
    state.compact();

    if state.platforms.is_empty() {
        state.end(GameOverCause::NoPlatforms);
    }

    // Spawning
    replenish_platforms(state);
    maybe_spawn_mob(state);
}
