//! Input event queue
//!
//! The game only cares about quitting, the jump key and the two movement keys.
//! Terminals that cannot report key releases get synthetic `KeyUp` events once
//! a key stops repeating.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};

/// Keys the game distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Left,
    Right,
    Other,
}

/// Input events consumed by the loop controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// A pollable, non-blocking event queue
pub trait EventSource {
    /// Return every event that arrived since the last poll
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>>;
}

/// Map a terminal key code to a game key
pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Char(' ') | KeyCode::Up => Key::Space,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
        _ => Key::Other,
    }
}

/// True for the keys that close the game
pub fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Hold time assumed after the first press, covering the terminal's repeat delay
const FIRST_HOLD: Duration = Duration::from_millis(550);
/// Hold time extended by each auto-repeat
const REPEAT_HOLD: Duration = Duration::from_millis(120);

/// Turns press/repeat streams into down/up pairs for terminals without release events
#[derive(Debug, Default)]
pub struct HoldTracker {
    held: Vec<(Key, Instant)>,
}

impl HoldTracker {
    /// Register a press or repeat; returns `KeyDown` only for the first one
    pub fn press(&mut self, key: Key, now: Instant) -> Option<InputEvent> {
        if let Some(entry) = self.held.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = entry.1.max(now + REPEAT_HOLD);
            return None;
        }
        self.held.push((key, now + FIRST_HOLD));
        Some(InputEvent::KeyDown(key))
    }

    /// Release every key whose hold window has run out
    pub fn expire(&mut self, now: Instant) -> Vec<InputEvent> {
        let mut released = Vec::new();
        self.held.retain(|&(key, deadline)| {
            if deadline <= now {
                released.push(InputEvent::KeyUp(key));
                false
            } else {
                true
            }
        });
        released
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.iter().any(|(k, _)| *k == key)
    }
}

/// Event source reading the terminal through crossterm
pub struct TerminalEvents {
    /// Terminal reports real key releases
    enhanced: bool,
    holds: HoldTracker,
}

impl TerminalEvents {
    /// Set up key reporting; raw mode must already be enabled
    pub fn new() -> io::Result<Self> {
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::info!(
            "Key release reporting: {}",
            if enhanced { "native" } else { "synthesized" }
        );
        Ok(Self {
            enhanced,
            holds: HoldTracker::default(),
        })
    }

    /// Undo the keyboard mode changes made by `new`
    pub fn restore(&mut self) -> io::Result<()> {
        if self.enhanced {
            execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
            self.enhanced = false;
        }
        Ok(())
    }

    fn translate(&mut self, key: KeyEvent, now: Instant) -> Option<InputEvent> {
        if is_quit(&key) {
            return (key.kind != KeyEventKind::Release).then_some(InputEvent::Quit);
        }
        let mapped = map_key(key.code);
        match (self.enhanced, key.kind) {
            (true, KeyEventKind::Press) => Some(InputEvent::KeyDown(mapped)),
            (true, KeyEventKind::Release) => Some(InputEvent::KeyUp(mapped)),
            (true, KeyEventKind::Repeat) => None,
            (false, KeyEventKind::Release) => None,
            (false, _) => self.holds.press(mapped, now),
        }
    }
}

impl EventSource for TerminalEvents {
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(ev) = self.translate(key, Instant::now()) {
                    events.push(ev);
                }
            }
        }
        if !self.enhanced {
            events.extend(self.holds.expire(Instant::now()));
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(KeyCode::Char(' ')), Key::Space);
        assert_eq!(map_key(KeyCode::Left), Key::Left);
        assert_eq!(map_key(KeyCode::Char('d')), Key::Right);
        assert_eq!(map_key(KeyCode::Enter), Key::Other);
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_hold_tracker_synthesizes_release() {
        let mut holds = HoldTracker::default();
        let t0 = Instant::now();

        assert_eq!(holds.press(Key::Space, t0), Some(InputEvent::KeyDown(Key::Space)));
        // Auto-repeat does not produce another KeyDown
        assert_eq!(holds.press(Key::Space, t0 + Duration::from_millis(500)), None);
        assert!(holds.expire(t0 + Duration::from_millis(560)).is_empty());
        assert!(holds.is_held(Key::Space));

        // Repeats stop: released after the repeat window
        let released = holds.expire(t0 + Duration::from_millis(700));
        assert_eq!(released, vec![InputEvent::KeyUp(Key::Space)]);
        assert!(!holds.is_held(Key::Space));
    }

    #[test]
    fn test_native_release_passthrough() {
        let mut source = TerminalEvents {
            enhanced: true,
            holds: HoldTracker::default(),
        };
        let now = Instant::now();
        let mut release = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(
            source.translate(release, now),
            Some(InputEvent::KeyUp(Key::Space))
        );

        let mut repeat = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        repeat.kind = KeyEventKind::Repeat;
        assert_eq!(source.translate(repeat, now), None);
    }
}
