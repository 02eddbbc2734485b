//! Camera scrolling
//!
//! The camera never moves; instead the world is shifted under the player.
//! Climbing past the threshold pushes everything down (and off the bottom),
//! falling off the bottom pulls everything up (and off the top).

use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Shift the world down while the player is above the scroll line
///
/// Returns the scroll amount, or `None` when the player is below the line.
/// Each platform pushed off the bottom is worth `PLATFORM_REWARD`.
pub fn scroll_up(state: &mut GameState) -> Option<f32> {
    if state.player.rect().top() > SCROLL_THRESHOLD {
        return None;
    }

    let delta = state.player.vel.y.abs().max(MIN_SCROLL);
    state.player.pos.y += delta;

    for platform in state.platforms.iter_mut().filter(|p| !p.dead) {
        platform.rect.y += delta;
        if platform.rect.top() >= HEIGHT {
            platform.dead = true;
            state.score += PLATFORM_REWARD;
            state.events.push(GameEvent::PlatformCleared {
                platform_id: platform.id,
            });
        }
    }
    for mob in state.mobs.iter_mut().filter(|m| !m.dead) {
        mob.rect.y += delta;
        mob.dead = mob.rect.top() >= HEIGHT;
    }
    for pow in state.powerups.iter_mut().filter(|p| !p.dead) {
        pow.rect.y += delta;
        pow.dead = pow.rect.top() >= HEIGHT;
    }
    // Parallax: clouds drift at half speed
    for cloud in state.clouds.iter_mut().filter(|c| !c.dead) {
        cloud.rect.y += delta / 2.0;
        cloud.dead = cloud.rect.top() >= HEIGHT;
    }

    Some(delta)
}

/// Pull the world up while the player has dropped below the viewport
///
/// Entities pushed fully above the top edge are destroyed. The player is not
/// moved, so this keeps going until the platforms run out.
pub fn scroll_fall(state: &mut GameState) -> Option<f32> {
    if state.player.rect().bottom() <= HEIGHT {
        return None;
    }

    let delta = state.player.vel.y.max(MIN_FALL_SCROLL);

    for platform in state.platforms.iter_mut().filter(|p| !p.dead) {
        platform.rect.y -= delta;
        platform.dead = platform.rect.bottom() < 0.0;
    }
    for mob in state.mobs.iter_mut().filter(|m| !m.dead) {
        mob.rect.y -= delta;
        mob.dead = mob.rect.bottom() < 0.0;
    }
    for pow in state.powerups.iter_mut().filter(|p| !p.dead) {
        pow.rect.y -= delta;
        pow.dead = pow.rect.bottom() < 0.0;
    }
    for cloud in state.clouds.iter_mut().filter(|c| !c.dead) {
        cloud.rect.y -= delta;
        cloud.dead = cloud.rect.bottom() < 0.0;
    }

    Some(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;
    use crate::sim::state::{Cloud, PlatformKind, PowerUpKind};

    #[test]
    fn test_no_scroll_below_threshold() {
        let mut state = GameState::empty(1);
        state.player.pos.y = 400.0;
        state.add_platform(PlatformKind::Small, Rect::new(0.0, 100.0, 60.0, 12.0));

        assert_eq!(scroll_up(&mut state), None);
        assert_eq!(state.platforms[0].rect.y, 100.0);
    }

    #[test]
    fn test_scroll_uses_player_speed() {
        let mut state = GameState::empty(1);
        // Top edge exactly on the line
        state.player.pos.y = SCROLL_THRESHOLD + PLAYER_HEIGHT;
        state.player.vel.y = -8.0;
        state.add_platform(PlatformKind::Small, Rect::new(0.0, 100.0, 60.0, 12.0));
        state.clouds.push(Cloud {
            rect: Rect::new(0.0, 50.0, 60.0, 30.0),
            dead: false,
        });

        assert_eq!(scroll_up(&mut state), Some(8.0));
        assert_eq!(state.platforms[0].rect.y, 108.0);
        assert_eq!(state.clouds[0].rect.y, 54.0);
        assert_eq!(state.player.pos.y, SCROLL_THRESHOLD + PLAYER_HEIGHT + 8.0);
    }

    #[test]
    fn test_slow_player_scrolls_minimum() {
        let mut state = GameState::empty(1);
        state.player.pos.y = SCROLL_THRESHOLD;
        state.player.vel.y = 0.5;
        assert_eq!(scroll_up(&mut state), Some(MIN_SCROLL));
    }

    #[test]
    fn test_platform_scrolled_off_bottom_scores() {
        let mut state = GameState::empty(1);
        state.player.pos.y = SCROLL_THRESHOLD;
        state.player.vel.y = -10.0;
        let gone = state.add_platform(PlatformKind::Large, Rect::new(0.0, HEIGHT - 5.0, 100.0, 14.0));
        state.add_platform(PlatformKind::Large, Rect::new(0.0, 200.0, 100.0, 14.0));

        scroll_up(&mut state);
        assert_eq!(state.score, PLATFORM_REWARD);
        assert!(state.platforms[0].dead);
        assert!(!state.platforms[1].dead);
        assert!(state.events.contains(&GameEvent::PlatformCleared { platform_id: gone }));

        state.compact();
        assert_eq!(state.platforms.len(), 1);
    }

    #[test]
    fn test_fall_scroll_pulls_world_up() {
        let mut state = GameState::empty(1);
        state.player.pos.y = HEIGHT + 1.0;
        state.player.vel.y = 4.0;
        state.add_platform(PlatformKind::Small, Rect::new(0.0, -5.0, 60.0, 12.0));
        state.add_platform(PlatformKind::Small, Rect::new(0.0, 300.0, 60.0, 12.0));

        assert_eq!(scroll_fall(&mut state), Some(MIN_FALL_SCROLL));
        assert!(state.platforms[0].dead);
        assert_eq!(state.platforms[1].rect.y, 290.0);
        // No score for falling
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_fast_fall_scrolls_by_speed() {
        let mut state = GameState::empty(1);
        state.player.pos.y = HEIGHT + 1.0;
        state.player.vel.y = 25.0;
        state.add_platform(PlatformKind::Small, Rect::new(0.0, 300.0, 60.0, 12.0));
        assert_eq!(scroll_fall(&mut state), Some(25.0));
        assert_eq!(state.platforms[0].rect.y, 275.0);
    }

    fn add_mob(state: &mut GameState, y: f32) -> u32 {
        let id = state.next_entity_id();
        state.mobs.push(crate::sim::state::Mob {
            id,
            rect: Rect::new(100.0, y, 30.0, 30.0),
            vel: glam::Vec2::new(1.0, 0.0),
            bob: 0.0,
            dead: false,
        });
        id
    }

    #[test]
    fn test_climb_removes_mobs_and_powerups_below() {
        let mut state = GameState::empty(1);
        state.player.pos.y = SCROLL_THRESHOLD;
        state.player.vel.y = -10.0;
        add_mob(&mut state, HEIGHT - 5.0);
        add_mob(&mut state, 100.0);
        state.add_powerup(PowerUpKind::Boost, Rect::new(50.0, HEIGHT - 8.0, 20.0, 20.0));
        state.add_powerup(PowerUpKind::Boost, Rect::new(50.0, 100.0, 20.0, 20.0));

        scroll_up(&mut state);
        assert!(state.mobs[0].dead);
        assert!(!state.mobs[1].dead);
        assert!(state.powerups[0].dead);
        assert!(!state.powerups[1].dead);
        // Only platforms are worth points
        assert_eq!(state.score, 0);

        state.compact();
        assert_eq!(state.mobs.len(), 1);
        assert_eq!(state.powerups.len(), 1);
    }

    #[test]
    fn test_fall_removes_everything_above() {
        let mut state = GameState::empty(1);
        state.player.pos.y = HEIGHT + 1.0;
        state.player.vel.y = 4.0;
        add_mob(&mut state, -25.0);
        add_mob(&mut state, 200.0);
        state.add_powerup(PowerUpKind::Boost, Rect::new(50.0, -15.0, 20.0, 20.0));
        state.add_powerup(PowerUpKind::Boost, Rect::new(50.0, 200.0, 20.0, 20.0));
        state.clouds.push(Cloud {
            rect: Rect::new(0.0, -25.0, 60.0, 30.0),
            dead: false,
        });
        state.clouds.push(Cloud {
            rect: Rect::new(0.0, 200.0, 60.0, 30.0),
            dead: false,
        });

        assert_eq!(scroll_fall(&mut state), Some(MIN_FALL_SCROLL));
        state.compact();
        assert_eq!(state.mobs.len(), 1);
        assert_eq!(state.mobs[0].rect.y, 190.0);
        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.clouds.len(), 1);
        assert_eq!(state.clouds[0].rect.y, 190.0);
    }
}
