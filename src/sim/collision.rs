//! Collision detection and response
//!
//! Landing is a "snap to surface" rule rather than penetration resolution:
//! the falling player is placed on the first surface it reaches. Platforms
//! stacked closer than the hit-box height can be skipped over.

use super::geometry::Rect;
use super::state::{Mob, Platform, Player, PowerUp, PowerUpKind};
use crate::consts::*;

/// Pick the overlapping platform whose bottom edge is smallest
///
/// Ties go to the lowest entity ID so the choice never depends on storage order.
pub fn landing_candidate<'a>(hitbox: &Rect, platforms: &'a [Platform]) -> Option<&'a Platform> {
    platforms
        .iter()
        .filter(|p| !p.dead && p.rect.intersects(hitbox))
        .min_by(|a, b| {
            a.rect
                .bottom()
                .total_cmp(&b.rect.bottom())
                .then(a.id.cmp(&b.id))
        })
}

/// Land the player on a platform if it is falling onto one
///
/// Returns the ID of the platform landed on.
pub fn resolve_landing(player: &mut Player, platforms: &[Platform]) -> Option<u32> {
    if player.vel.y <= 0.0 {
        return None;
    }

    let target = landing_candidate(&player.hitbox(), platforms)?;
    if player.pos.y >= target.rect.center_y() {
        // Feet already past the middle: treat as passing through
        return None;
    }

    // Feet rest one unit into the surface so the contact persists next step
    player.pos.y = target.rect.top() + 1.0;
    player.vel.y = 0.0;
    player.jumping = false;
    player.acc.y = WORLD_ACC;
    Some(target.id)
}

/// Collect every power-up touching the player, applying its effect
///
/// Collected power-ups are marked dead; their kinds are returned in order.
pub fn collect_powerups(player: &mut Player, powerups: &mut [PowerUp]) -> Vec<PowerUpKind> {
    let body = player.rect();
    let mut collected = Vec::new();

    for pow in powerups.iter_mut().filter(|p| !p.dead) {
        if !pow.rect.intersects(&body) {
            continue;
        }
        pow.dead = true;

        let effect = pow.kind.effect();
        player.vel.y = effect.launch_vy;
        if effect.clears_jumping {
            player.jumping = false;
        }
        collected.push(pow.kind);
    }

    collected
}

/// True if any live mob touches the player's hit-box
pub fn mob_contact(player: &Player, mobs: &[Mob]) -> bool {
    let hitbox = player.hitbox();
    mobs.iter().any(|m| !m.dead && m.rect.intersects(&hitbox))
}
