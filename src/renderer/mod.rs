//! Rendering module
//!
//! The game loop hands finished state to a `Renderer`; it never reads back.
//! Screen layouts are described in world coordinates so any backend can
//! place them. The terminal backend rasterizes onto a character canvas.

pub mod canvas;
pub mod terminal;

use std::io;

use crate::consts::{HEIGHT, WIDTH};
use crate::sim::GameState;

pub use canvas::Canvas;
pub use terminal::TerminalRenderer;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Named colors
pub mod palette {
    use super::Rgb;

    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const LIGHT_BLUE: Rgb = Rgb(0, 155, 155);
    pub const LIGHT_PURPLE: Rgb = Rgb(122, 66, 221);
    pub const DUSK: Rgb = Rgb(40, 90, 150);
    pub const NIGHT: Rgb = Rgb(20, 30, 80);
    pub const SPACE: Rgb = Rgb(5, 5, 20);

    pub const CLOUD: Rgb = Rgb(220, 230, 240);
    pub const GRASS: Rgb = Rgb(90, 200, 70);
    pub const STONE: Rgb = Rgb(180, 150, 110);
    pub const POWERUP: Rgb = Rgb(255, 220, 0);
    pub const MOB: Rgb = Rgb(230, 60, 60);
    pub const PLAYER: Rgb = Rgb(255, 170, 60);
}

/// Score thresholds where the sky darkens, highest first
const BACKGROUND_TIERS: [(u64, Rgb); 4] = [
    (3000, palette::SPACE),
    (1500, palette::NIGHT),
    (500, palette::DUSK),
    (0, palette::LIGHT_BLUE),
];

/// Sky color for the current score
pub fn background_for_score(score: u64) -> Rgb {
    BACKGROUND_TIERS
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, color)| *color)
        .unwrap_or(palette::LIGHT_BLUE)
}

/// A line of text anchored at its mid-top point, in world coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub size: u16,
    pub color: Rgb,
    pub x: f32,
    pub y: f32,
}

impl TextLine {
    pub fn new(text: impl Into<String>, size: u16, color: Rgb, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            size,
            color,
            x,
            y,
        }
    }
}

/// Full-screen menus shown outside of play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start {
        highscore: u64,
    },
    GameOver {
        score: u64,
        highscore: u64,
        new_record: bool,
    },
}

impl Screen {
    pub fn background(&self) -> Rgb {
        match self {
            Screen::Start { .. } => palette::LIGHT_PURPLE,
            Screen::GameOver { .. } => palette::BLUE,
        }
    }

    /// Text layout for this screen
    pub fn lines(&self) -> Vec<TextLine> {
        let cx = WIDTH / 2.0;
        match *self {
            Screen::Start { highscore } => vec![
                TextLine::new("SKY HOP", 48, palette::WHITE, cx, HEIGHT / 4.0),
                TextLine::new(
                    format!("High score: {}", highscore),
                    22,
                    palette::GREEN,
                    cx,
                    HEIGHT / 2.0,
                ),
                TextLine::new(
                    "Arrows to move, space to jump",
                    22,
                    palette::WHITE,
                    cx,
                    HEIGHT * 3.0 / 4.0,
                ),
                TextLine::new("Press a key to play", 22, palette::WHITE, cx, HEIGHT * 3.0 / 4.0 + 40.0),
            ],
            Screen::GameOver {
                score,
                highscore,
                new_record,
            } => {
                let mut lines = vec![
                    TextLine::new("GAME OVER", 48, palette::RED, cx, HEIGHT / 4.0),
                    TextLine::new(format!("Score: {}", score), 22, palette::WHITE, cx, HEIGHT / 2.0),
                ];
                if new_record {
                    lines.push(TextLine::new(
                        "NEW HIGH SCORE!",
                        22,
                        palette::GREEN,
                        cx,
                        HEIGHT / 2.0 + 40.0,
                    ));
                } else {
                    lines.push(TextLine::new(
                        format!("High score: {}", highscore),
                        22,
                        palette::GREEN,
                        cx,
                        HEIGHT / 2.0 + 40.0,
                    ));
                }
                lines.push(TextLine::new(
                    "Press a key to play again",
                    22,
                    palette::WHITE,
                    cx,
                    HEIGHT * 3.0 / 4.0,
                ));
                lines
            }
        }
    }
}

/// Heads-up display options for a frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Hud {
    /// Measured FPS, if it should be shown
    pub fps: Option<f32>,
}

impl Hud {
    /// Score in the top-right corner, FPS in the top-left
    pub fn lines(&self, score: u64) -> Vec<TextLine> {
        let mut lines = vec![TextLine::new(
            score.to_string(),
            22,
            palette::WHITE,
            WIDTH - 25.0,
            15.0,
        )];
        if let Some(fps) = self.fps {
            lines.push(TextLine::new(format!("{:.2}", fps), 22, palette::WHITE, 35.0, 15.0));
        }
        lines
    }
}

/// Drawing collaborator used by the game loop
pub trait Renderer {
    /// Draw one frame of play
    fn draw_frame(&mut self, state: &GameState, hud: &Hud) -> io::Result<()>;
    /// Draw a full-screen menu
    fn draw_screen(&mut self, screen: &Screen) -> io::Result<()>;
}
