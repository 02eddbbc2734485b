//! Frame loop controller
//!
//! Drives the start screen, play sessions and the game-over screen. Each frame
//! runs events, then fixed simulation steps, then drawing. The `running` flag
//! is checked at the top of every loop, so quitting takes effect within a frame.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;

use crate::audio::{AudioSink, SoundEffect};
use crate::consts::{FPS, MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScore;
use crate::platform::{EventSource, FrameClock, InputEvent, Key};
use crate::renderer::{Hud, Renderer, Screen};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Steer, TickInput, tick};

/// Longest frame time fed to the simulation, so a stall cannot fast-forward a run
const MAX_FRAME_DT: f32 = 0.1;

/// Movement keys currently held down
#[derive(Debug, Clone, Copy, Default)]
struct HeldKeys {
    left: bool,
    right: bool,
}

impl HeldKeys {
    fn steer(&self) -> Steer {
        Steer::from_keys(self.left, self.right)
    }
}

/// The game loop and its collaborators
pub struct Game<R, E, A, C> {
    renderer: R,
    events: E,
    audio: A,
    clock: C,
    settings: Settings,
    highscore: HighScore,
    running: bool,
    sessions: u64,
    held: HeldKeys,
}

impl<R, E, A, C> Game<R, E, A, C>
where
    R: Renderer,
    E: EventSource,
    A: AudioSink,
    C: FrameClock,
{
    pub fn new(
        renderer: R,
        events: E,
        audio: A,
        clock: C,
        settings: Settings,
        highscore: HighScore,
    ) -> Self {
        Self {
            renderer,
            events,
            audio,
            clock,
            settings,
            highscore,
            running: true,
            sessions: 0,
            held: HeldKeys::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn highscore(&self) -> &HighScore {
        &self.highscore
    }

    /// Hand back the collaborators (for terminal teardown)
    pub fn into_parts(self) -> (R, E) {
        (self.renderer, self.events)
    }

    pub fn sessions(&self) -> u64 {
        self.sessions
    }

    /// Run until the player quits
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.run_with(GameState::new)
    }

    /// Run with sessions built by `layout` from each session's seed
    pub fn run_with<F>(&mut self, mut layout: F) -> anyhow::Result<()>
    where
        F: FnMut(u64) -> GameState,
    {
        self.show_start_screen()?;
        while self.running {
            let state = self.new_session_with(&mut layout);
            let state = self.play(state)?;
            self.show_game_over_screen(&state)?;
        }
        log::info!("Shutting down");
        Ok(())
    }

    /// Fresh session with the starting layout, already playing
    pub fn new_session(&mut self) -> GameState {
        self.new_session_with(GameState::new)
    }

    fn new_session_with<F>(&mut self, layout: F) -> GameState
    where
        F: FnOnce(u64) -> GameState,
    {
        let seed = match self.settings.seed {
            Some(seed) => seed.wrapping_add(self.sessions),
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(self.sessions),
        };
        self.sessions += 1;
        log::info!("Starting session {} with seed {}", self.sessions, seed);

        let mut state = layout(seed);
        state.start();
        self.held = HeldKeys::default();
        state
    }

    /// Play a session until it ends or the player quits; returns the final state
    pub fn play(&mut self, mut state: GameState) -> anyhow::Result<GameState> {
        let rules = self.settings.rules();
        let mut accumulator = 0.0_f32;
        let mut pending = TickInput::default();

        while self.running && state.phase == GamePhase::Playing {
            let dt = self.clock.tick(FPS).as_secs_f32().min(MAX_FRAME_DT);

            self.handle_play_events(&mut pending)?;
            if !self.running {
                break;
            }

            accumulator += dt;
            let mut substeps = 0;
            while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = TickInput {
                    steer: self.held.steer(),
                    ..pending
                };
                tick(&mut state, &input, &rules);
                accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                pending.jump = false;
                pending.jump_cut = false;
            }
            if substeps == MAX_SUBSTEPS {
                accumulator = accumulator.min(SIM_DT);
            }

            for event in state.drain_events() {
                self.on_game_event(&event);
            }

            let hud = Hud {
                fps: self.settings.show_fps.then(|| self.clock.fps()),
            };
            self.renderer
                .draw_frame(&state, &hud)
                .context("drawing frame")?;
        }

        Ok(state)
    }

    fn handle_play_events(&mut self, pending: &mut TickInput) -> anyhow::Result<()> {
        for event in self.events.poll_events().context("reading input")? {
            match event {
                InputEvent::Quit => self.running = false,
                InputEvent::KeyDown(Key::Space) => pending.jump = true,
                InputEvent::KeyUp(Key::Space) => pending.jump_cut = true,
                InputEvent::KeyDown(Key::Left) => self.held.left = true,
                InputEvent::KeyUp(Key::Left) => self.held.left = false,
                InputEvent::KeyDown(Key::Right) => self.held.right = true,
                InputEvent::KeyUp(Key::Right) => self.held.right = false,
                InputEvent::KeyDown(Key::Other) | InputEvent::KeyUp(Key::Other) => {}
            }
        }
        Ok(())
    }

    fn on_game_event(&mut self, event: &GameEvent) {
        if let GameEvent::GameOver { cause } = event {
            log::info!("Game over ({:?})", cause);
        }
        if let Some(effect) = SoundEffect::for_event(event) {
            self.audio.play(effect);
        }
    }

    pub fn show_start_screen(&mut self) -> anyhow::Result<()> {
        let screen = Screen::Start {
            highscore: self.highscore.best(),
        };
        self.renderer
            .draw_screen(&screen)
            .context("drawing start screen")?;
        self.wait_for_key()
    }

    /// Save the score if it is a record, show the summary and wait for a key
    pub fn show_game_over_screen(&mut self, state: &GameState) -> anyhow::Result<()> {
        if !self.running {
            return Ok(());
        }

        let previous = self.highscore.best();
        let new_record = match self.highscore.record(state.score) {
            Ok(written) => written,
            Err(e) => {
                log::error!(
                    "Could not save highscore to {}: {}",
                    self.highscore.path().display(),
                    e
                );
                false
            }
        };
        log::info!("Final score {} (best {})", state.score, self.highscore.best());
        if new_record {
            self.audio.play(SoundEffect::HighScore);
        }

        let screen = Screen::GameOver {
            score: state.score,
            highscore: previous.max(self.highscore.best()),
            new_record,
        };
        self.renderer
            .draw_screen(&screen)
            .context("drawing game over screen")?;
        self.wait_for_key()
    }

    /// Block until a key is pressed and released, or quit is requested
    ///
    /// Only releases of keys pressed while waiting count, so a key still held
    /// from play does not skip the screen.
    fn wait_for_key(&mut self) -> anyhow::Result<()> {
        let mut pressed: Vec<Key> = Vec::new();
        while self.running {
            self.clock.tick(FPS / 2);
            for event in self.events.poll_events().context("reading input")? {
                match event {
                    InputEvent::Quit => {
                        self.running = false;
                        return Ok(());
                    }
                    InputEvent::KeyDown(key) => pressed.push(key),
                    InputEvent::KeyUp(key) if pressed.contains(&key) => return Ok(()),
                    InputEvent::KeyUp(_) => {}
                }
            }
        }
        Ok(())
    }
}
