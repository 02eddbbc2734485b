//! Sound effects
//!
//! Playback is fire-and-forget: the game never waits on or checks a sound.
//! The terminal build "plays" effects on the bell.

use std::io::Write;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Boost power-up collected
    Boost,
    /// Run ended
    GameOver,
    /// New high score
    HighScore,
}

impl SoundEffect {
    /// Effect triggered by a gameplay event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::PowerUpCollected { .. } => Some(SoundEffect::Boost),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }

    /// Number of bell strokes used to tell effects apart
    fn bells(self) -> usize {
        match self {
            SoundEffect::Jump => 1,
            SoundEffect::Boost => 2,
            SoundEffect::GameOver => 1,
            SoundEffect::HighScore => 3,
        }
    }
}

/// Anything that can play a sound effect
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Audio manager ringing the terminal bell
pub struct AudioManager<W: Write> {
    out: W,
    muted: bool,
}

impl<W: Write> AudioManager<W> {
    pub fn new(out: W, muted: bool) -> Self {
        Self { out, muted }
    }
}

impl<W: Write> AudioSink for AudioManager<W> {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let bells = "\x07".repeat(effect.bells());
        // A failed bell is not worth interrupting the game for
        if let Err(e) = self
            .out
            .write_all(bells.as_bytes())
            .and_then(|_| self.out.flush())
        {
            log::debug!("bell failed for {:?}: {}", effect, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameOverCause, PowerUpKind};

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Jumped),
            Some(SoundEffect::Jump)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PowerUpCollected {
                kind: PowerUpKind::Boost
            }),
            Some(SoundEffect::Boost)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver {
                cause: GameOverCause::Mob
            }),
            Some(SoundEffect::GameOver)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Landed { platform_id: 1 }),
            None
        );
    }

    #[test]
    fn test_bell_output() {
        let mut audio = AudioManager::new(Vec::new(), false);
        audio.play(SoundEffect::Boost);
        assert_eq!(audio.out, b"\x07\x07");
    }

    #[test]
    fn test_muted_manager_stays_quiet() {
        let mut audio = AudioManager::new(Vec::new(), true);
        audio.play(SoundEffect::HighScore);
        audio.play(SoundEffect::Jump);
        assert!(audio.out.is_empty());
    }
}
