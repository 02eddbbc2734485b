//! Player integrator
//!
//! Semi-implicit Euler with per-step constants: velocity first, then position.

use super::geometry::Rect;
use super::state::{Platform, Player};
use crate::consts::*;

/// Horizontal intent for a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Steer {
    #[default]
    None,
    Left,
    Right,
}

impl Steer {
    /// Build from held keys; opposing keys cancel out
    pub fn from_keys(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Steer::Left,
            (false, true) => Steer::Right,
            _ => Steer::None,
        }
    }

    fn accel(self) -> f32 {
        match self {
            Steer::None => 0.0,
            Steer::Left => -PLAYER_ACC,
            Steer::Right => PLAYER_ACC,
        }
    }
}

/// Advance the player by one step
pub fn integrate(player: &mut Player, steer: Steer) {
    player.acc.x = steer.accel() + player.vel.x * PLAYER_FRICTION;

    player.vel += player.acc;
    if player.vel.x.abs() < PLAYER_REST_SPEED {
        player.vel.x = 0.0;
    }
    player.pos += player.vel;

    // Wrap around the side edges
    let half = PLAYER_WIDTH / 2.0;
    if player.pos.x > WIDTH + half {
        player.pos.x = -half;
    } else if player.pos.x < -half {
        player.pos.x = WIDTH + half;
    }
}

/// True when the player's feet are on (or just above) a live platform
pub fn is_standing(player: &Player, platforms: &[Platform]) -> bool {
    let probe: Rect = player.hitbox().offset(0.0, 2.0);
    platforms
        .iter()
        .any(|p| !p.dead && p.rect.intersects(&probe))
}

/// Apply the jump impulse if the player is grounded and not already jumping
///
/// Returns whether the jump happened.
pub fn jump(player: &mut Player, platforms: &[Platform]) -> bool {
    if player.jumping || !is_standing(player, platforms) {
        return false;
    }
    player.jumping = true;
    player.vel.y = -PLAYER_JUMP;
    true
}

/// Shorten an in-progress jump when the jump key is released early
pub fn jump_cut(player: &mut Player) {
    if player.jumping && player.vel.y < -JUMP_CUT_SPEED {
        player.vel.y = -JUMP_CUT_SPEED;
    }
}
