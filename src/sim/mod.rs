//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order, ties broken by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod physics;
pub mod scroll;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{collect_powerups, landing_candidate, mob_contact, resolve_landing};
pub use geometry::Rect;
pub use physics::{Steer, integrate, jump, jump_cut};
pub use scroll::{scroll_fall, scroll_up};
pub use spawn::{maybe_spawn_cloud, maybe_spawn_mob, replenish_platforms};
pub use state::{
    Cloud, GameEvent, GameOverCause, GamePhase, GameState, Mob, Platform, PlatformKind, Player,
    PowerUp, PowerUpEffect, PowerUpKind,
};
pub use tick::{Rules, TickInput, tick};
