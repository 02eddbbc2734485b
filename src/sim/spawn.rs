//! Procedural spawning of platforms, power-ups, mobs and clouds
//!
//! All randomness comes from the session RNG, so spawns replay exactly for a
//! given seed.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::geometry::Rect;
use super::state::{
    CLOUD_SIZE, Cloud, GameEvent, GameState, MOB_SIZE, Mob, POWERUP_HOVER, POWERUP_SIZE,
    PlatformKind, PowerUpKind,
};
use crate::consts::*;

/// Range of the random width reserved at the right edge when placing platforms
const PLATFORM_MARGIN: std::ops::Range<u32> = 60..100;
/// Horizontal distance from the screen edge at which mobs appear
const MOB_ENTRY_OFFSET: f32 = 100.0;
/// Mob horizontal speed range (per step)
const MOB_SPEED: std::ops::Range<u32> = 1..4;
/// Mob bobbing acceleration
const MOB_BOB: f32 = 0.5;
/// Height band above the viewport where new clouds are placed
const CLOUD_SPAWN_BAND: std::ops::Range<i32> = -500..-50;

/// Top up the platform set until it holds `MIN_PLATFORMS`
///
/// New platforms appear at the top edge. Returns how many were created.
pub fn replenish_platforms(state: &mut GameState) -> usize {
    let mut created = 0;
    while state.platforms.iter().filter(|p| !p.dead).count() < MIN_PLATFORMS {
        spawn_platform(state);
        created += 1;
    }
    created
}

fn spawn_platform(state: &mut GameState) -> u32 {
    let margin = state.rng.random_range(PLATFORM_MARGIN);
    let span = (WIDTH as u32).saturating_sub(margin).max(1);
    let x = state.rng.random_range(0..span) as f32;
    let kind = PlatformKind::random(&mut state.rng);
    let size = kind.size();
    let rect = Rect::new(x, 0.0, size.x, size.y);
    let id = state.add_platform(kind, rect);

    if state.rng.random_range(0..100) < POW_SPAWN_PCT {
        let kind = *PowerUpKind::ALL
            .choose(&mut state.rng)
            .unwrap_or(&PowerUpKind::Boost);
        let anchor = Vec2::new(rect.center_x(), rect.top() - POWERUP_HOVER);
        state.add_powerup(kind, Rect::from_midbottom(anchor, POWERUP_SIZE));
    }

    id
}

/// Spawn a mob once `MOB_FREQ_MS` of session time has passed since the last one
pub fn maybe_spawn_mob(state: &mut GameState) -> Option<u32> {
    let now = state.clock_ms();
    if now - state.last_mob_ms < MOB_FREQ_MS as f64 {
        return None;
    }
    state.last_mob_ms = now;

    let from_left = state.rng.random_bool(0.5);
    let speed = state.rng.random_range(MOB_SPEED) as f32;
    let (center_x, vx) = if from_left {
        (-MOB_ENTRY_OFFSET, speed)
    } else {
        (WIDTH + MOB_ENTRY_OFFSET, -speed)
    };
    let y = state.rng.random_range(0..(HEIGHT / 2.0) as u32) as f32;

    let id = state.next_entity_id();
    state.mobs.push(Mob {
        id,
        rect: Rect::new(center_x - MOB_SIZE.x / 2.0, y, MOB_SIZE.x, MOB_SIZE.y),
        vel: Vec2::new(vx, 0.0),
        bob: MOB_BOB,
        dead: false,
    });
    state.events.push(GameEvent::MobSpawned { mob_id: id });
    log::debug!("mob {} spawned at y={} moving {}", id, y, vx);
    Some(id)
}

/// Roll for a new cloud above the viewport; only called while scrolling
pub fn maybe_spawn_cloud(state: &mut GameState) -> bool {
    if state.rng.random_range(0..100) >= CLOUD_SPAWN_PCT {
        return false;
    }
    let y = state.rng.random_range(CLOUD_SPAWN_BAND) as f32;
    let cloud = random_cloud(state, y);
    state.clouds.push(cloud);
    true
}

/// Scatter the starting clouds over the visible sky
pub fn seed_clouds(state: &mut GameState) {
    for _ in 0..INITIAL_CLOUDS {
        // Same band as scrolling spawns, shifted into view
        let y = state.rng.random_range(CLOUD_SPAWN_BAND) as f32 + 500.0;
        let cloud = random_cloud(state, y);
        state.clouds.push(cloud);
    }
}

fn random_cloud(state: &mut GameState, y: f32) -> Cloud {
    let scale = state.rng.random_range(50..101) as f32 / 100.0;
    let size = CLOUD_SIZE * scale;
    let x = state.rng.random_range(0..(WIDTH - size.x) as u32) as f32;
    Cloud {
        rect: Rect::new(x, y, size.x, size.y),
        dead: false,
    }
}
