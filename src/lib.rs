//! Sky Hop - a vertical platform-jumper for the terminal
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, scrolling, spawning)
//! - `game`: Frame loop controller (screens, sessions, highscore bookkeeping)
//! - `renderer`: Drawing collaborator (terminal implementation)
//! - `platform`: Input event queue and frame clock
//! - `audio`: Fire-and-forget sound effects

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
///
/// Velocities and accelerations are expressed per simulation step, so they are
/// only meaningful together with `FPS`.
pub mod consts {
    /// Viewport dimensions in world units
    pub const WIDTH: f32 = 360.0;
    pub const HEIGHT: f32 = 480.0;

    /// Simulation steps per second (and target frame rate)
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / FPS as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Session clock advance per simulation step
    pub const MS_PER_STEP: f64 = 1000.0 / FPS as f64;

    /// Player horizontal acceleration while a direction is held
    pub const PLAYER_ACC: f32 = 0.5;
    /// Constant downward world acceleration
    pub const WORLD_ACC: f32 = 0.5;
    /// Horizontal friction, applied proportionally to velocity
    pub const PLAYER_FRICTION: f32 = -0.12;
    /// Horizontal speeds below this snap to zero
    pub const PLAYER_REST_SPEED: f32 = 0.1;
    /// Jump impulse magnitude (applied upward)
    pub const PLAYER_JUMP: f32 = 20.0;
    /// Upward speed left after a jump-cut
    pub const JUMP_CUT_SPEED: f32 = 3.0;
    /// Player sprite size
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Platform hit-box size (anchored at the player's feet)
    pub const HITBOX_WIDTH: f32 = 20.0;
    pub const HITBOX_HEIGHT: f32 = 30.0;
    /// Player spawn point (mid-bottom)
    pub const PLAYER_START: (f32, f32) = (40.0, HEIGHT - 100.0);

    /// Upward speed granted by a boost power-up
    pub const BOOST_POWER: f32 = 60.0;
    /// Chance (percent) that a freshly spawned platform carries a power-up
    pub const POW_SPAWN_PCT: u32 = 7;

    /// Mob spawn interval in session milliseconds
    pub const MOB_FREQ_MS: u64 = 6000;

    /// Chance (percent) per scrolling step to spawn a cloud
    pub const CLOUD_SPAWN_PCT: u32 = 10;
    /// Clouds scattered over the sky at session start
    pub const INITIAL_CLOUDS: usize = 8;

    /// Minimum number of platforms kept alive after each step
    pub const MIN_PLATFORMS: usize = 4;
    /// The world scrolls once the player's top edge reaches this line
    pub const SCROLL_THRESHOLD: f32 = HEIGHT / 4.0;
    /// Minimum scroll per step while climbing
    pub const MIN_SCROLL: f32 = 2.0;
    /// Minimum scroll per step while falling off the bottom
    pub const MIN_FALL_SCROLL: f32 = 10.0;
    /// Score awarded for every platform scrolled off the bottom
    pub const PLATFORM_REWARD: u64 = 10;

    /// Starting platforms as (x, y, width, height)
    pub const PLATFORM_LIST: [(f32, f32, f32, f32); 4] = [
        (0.0, HEIGHT - 40.0, WIDTH, 40.0),
        (WIDTH / 2.0, 300.0, 30.0, 10.0),
        (WIDTH / 3.0, 240.0, 40.0, 20.0),
        (WIDTH / 4.0, 200.0, 50.0, 20.0),
    ];
}
