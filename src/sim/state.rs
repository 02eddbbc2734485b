//! Game state and core simulation types
//!
//! Everything a session owns lives here. Entities sit in plain vectors and are
//! removed in two passes: phases mark them `dead`, then `compact` drops them
//! once the step is over, so no phase ever mutates a set it is scanning.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created but not yet started
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended
    GameOver,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Every platform scrolled away
    NoPlatforms,
    /// The player touched a mob
    Mob,
}

/// Gameplay events produced during a step, drained by the loop controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Landed { platform_id: u32 },
    PowerUpCollected { kind: PowerUpKind },
    PlatformCleared { platform_id: u32 },
    MobSpawned { mob_id: u32 },
    GameOver { cause: GameOverCause },
}

/// The player character
///
/// `pos` is the mid-bottom point of the sprite (the feet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub jumping: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START.0, PLAYER_START.1),
            vel: Vec2::ZERO,
            acc: Vec2::new(0.0, WORLD_ACC),
            jumping: false,
        }
    }
}

impl Player {
    /// Full sprite rectangle, always derived from `pos`
    pub fn rect(&self) -> Rect {
        Rect::from_midbottom(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    /// Narrower rectangle at the feet used against platforms and mobs
    pub fn hitbox(&self) -> Rect {
        Rect::from_midbottom(self.pos, Vec2::new(HITBOX_WIDTH, HITBOX_HEIGHT))
    }
}

/// Platform variants, chosen at random for spawned platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Small,
    Large,
}

impl PlatformKind {
    /// Size of a spawned platform of this kind
    ///
    /// Half of each height exceeds the fastest fall step, so a falling player
    /// always has its first overlapping step above the center line.
    pub fn size(self) -> Vec2 {
        match self {
            PlatformKind::Small => Vec2::new(60.0, 47.0),
            PlatformKind::Large => Vec2::new(100.0, 50.0),
        }
    }

    /// Pick one of the two kinds uniformly
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.random_bool(0.5) {
            PlatformKind::Small
        } else {
            PlatformKind::Large
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub kind: PlatformKind,
    pub rect: Rect,
    #[serde(skip)]
    pub dead: bool,
}

/// A hovering enemy drifting across the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mob {
    pub id: u32,
    pub rect: Rect,
    pub vel: Vec2,
    /// Per-step change of `vel.y`; flips sign to make the mob bob
    pub bob: f32,
    #[serde(skip)]
    pub dead: bool,
}

/// Mob sprite size
pub const MOB_SIZE: Vec2 = Vec2::new(30.0, 30.0);
/// Vertical bobbing speed limit
pub const MOB_BOB_LIMIT: f32 = 3.0;

impl Mob {
    /// Advance one step: drift sideways and bob up and down
    pub fn update(&mut self) {
        self.rect.x += self.vel.x;
        self.vel.y += self.bob;
        if self.vel.y > MOB_BOB_LIMIT || self.vel.y < -MOB_BOB_LIMIT {
            self.bob = -self.bob;
        }
        self.rect.y += self.vel.y;
    }

    /// True once the mob has fully left the screen horizontally
    pub fn off_screen(&self) -> bool {
        (self.vel.x > 0.0 && self.rect.left() > WIDTH)
            || (self.vel.x < 0.0 && self.rect.right() < 0.0)
    }
}

/// Decorative background cloud
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub rect: Rect,
    #[serde(skip)]
    pub dead: bool,
}

/// Base cloud size before scaling
pub const CLOUD_SIZE: Vec2 = Vec2::new(60.0, 30.0);

/// Power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Boost,
}

/// What a power-up does to the player when collected
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpEffect {
    /// New vertical velocity (negative is up)
    pub launch_vy: f32,
    /// Whether the jump guard is released so the player can jump again
    pub clears_jumping: bool,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 1] = [PowerUpKind::Boost];

    pub fn effect(self) -> PowerUpEffect {
        match self {
            PowerUpKind::Boost => PowerUpEffect {
                launch_vy: -BOOST_POWER,
                clears_jumping: true,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub rect: Rect,
    #[serde(skip)]
    pub dead: bool,
}

/// Power-up sprite size
pub const POWERUP_SIZE: Vec2 = Vec2::new(20.0, 20.0);
/// Gap between a power-up and the platform it sits on
pub const POWERUP_HOVER: f32 = 5.0;

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Score, only ever increases
    pub score: u64,
    /// Simulation step counter
    pub time_ticks: u64,
    /// Session clock value of the last mob spawn
    pub last_mob_ms: f64,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub mobs: Vec<Mob>,
    pub clouds: Vec<Cloud>,
    pub powerups: Vec<PowerUp>,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new session with the starting layout
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            score: 0,
            time_ticks: 0,
            last_mob_ms: 0.0,
            player: Player::default(),
            platforms: Vec::new(),
            mobs: Vec::new(),
            clouds: Vec::new(),
            powerups: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        // Starting layout keeps its positions and widths but is at least as
        // thick as a spawned platform
        let min_h = PlatformKind::Large.size().y;
        for &(x, y, w, h) in PLATFORM_LIST.iter() {
            state.add_platform(PlatformKind::Large, Rect::new(x, y, w, h.max(min_h)));
        }
        super::spawn::seed_clouds(&mut state);

        state
    }

    /// Empty world, for scenarios that place every entity by hand
    pub fn empty(seed: u64) -> Self {
        let mut state = Self::new(seed);
        state.platforms.clear();
        state.clouds.clear();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_platform(&mut self, kind: PlatformKind, rect: Rect) -> u32 {
        let id = self.next_entity_id();
        self.platforms.push(Platform {
            id,
            kind,
            rect,
            dead: false,
        });
        id
    }

    pub fn add_powerup(&mut self, kind: PowerUpKind, rect: Rect) -> u32 {
        let id = self.next_entity_id();
        self.powerups.push(PowerUp {
            id,
            kind,
            rect,
            dead: false,
        });
        id
    }

    /// Begin play
    pub fn start(&mut self) {
        if self.phase == GamePhase::NotStarted {
            self.phase = GamePhase::Playing;
        }
    }

    /// Session clock in milliseconds, derived from the step count
    pub fn clock_ms(&self) -> f64 {
        self.time_ticks as f64 * MS_PER_STEP
    }

    /// End the session (only the first cause is reported)
    pub fn end(&mut self, cause: GameOverCause) {
        if self.phase != GamePhase::GameOver {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { cause });
        }
    }

    /// Drop every entity marked dead during the step
    pub fn compact(&mut self) {
        self.platforms.retain(|p| !p.dead);
        self.mobs.retain(|m| !m.dead);
        self.clouds.retain(|c| !c.dead);
        self.powerups.retain(|p| !p.dead);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.platforms.len(), PLATFORM_LIST.len());
        assert_eq!(state.clouds.len(), INITIAL_CLOUDS);
        assert_eq!(state.score, 0);
        assert!(state.platforms.iter().all(|p| p.kind == PlatformKind::Large));
        // Ground spans the whole viewport
        assert_eq!(state.platforms[0].rect.w, WIDTH);
        assert_eq!(state.platforms[0].rect.top(), HEIGHT - 40.0);
        for p in &state.platforms {
            assert!(p.rect.h >= PlatformKind::Large.size().y);
        }
    }

    #[test]
    fn test_mob_leaves_past_opposite_edge() {
        let mut rightward = Mob {
            id: 1,
            rect: Rect::new(WIDTH - 1.0, 100.0, MOB_SIZE.x, MOB_SIZE.y),
            vel: Vec2::new(2.0, 0.0),
            bob: 0.0,
            dead: false,
        };
        assert!(!rightward.off_screen());
        rightward.update();
        assert!(rightward.off_screen());

        // Entering from the right edge is not leaving
        let mut leftward = Mob {
            id: 2,
            rect: Rect::new(WIDTH + 70.0, 100.0, MOB_SIZE.x, MOB_SIZE.y),
            vel: Vec2::new(-3.0, 0.0),
            bob: 0.0,
            dead: false,
        };
        assert!(!leftward.off_screen());
        leftward.rect.x = -MOB_SIZE.x + 1.0;
        assert!(!leftward.off_screen());
        leftward.update();
        assert!(leftward.off_screen());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut state = GameState::new(7);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
        assert!(state.platforms.iter().all(|p| p.id != a && p.id != b));
    }

    #[test]
    fn test_boost_effect_table() {
        let effect = PowerUpKind::Boost.effect();
        assert_eq!(effect.launch_vy, -BOOST_POWER);
        assert!(effect.clears_jumping);
    }

    #[test]
    fn test_end_reports_first_cause_only() {
        let mut state = GameState::new(1);
        state.start();
        state.end(GameOverCause::Mob);
        state.end(GameOverCause::NoPlatforms);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver {
                cause: GameOverCause::Mob
            }]
        );
    }

    #[test]
    fn test_compact_removes_marked_entities() {
        let mut state = GameState::new(3);
        state.platforms[1].dead = true;
        state.clouds[0].dead = true;
        state.compact();
        assert_eq!(state.platforms.len(), PLATFORM_LIST.len() - 1);
        assert_eq!(state.clouds.len(), INITIAL_CLOUDS - 1);
    }

    #[test]
    fn test_mob_bobs_within_limit() {
        let mut mob = Mob {
            id: 1,
            rect: Rect::new(0.0, 100.0, MOB_SIZE.x, MOB_SIZE.y),
            vel: Vec2::new(2.0, 0.0),
            bob: 0.5,
            dead: false,
        };
        for _ in 0..100 {
            mob.update();
            assert!(mob.vel.y.abs() <= MOB_BOB_LIMIT + mob.bob.abs());
        }
        assert_eq!(mob.rect.x, 200.0);
    }
}
