//! Terminal backend built on crossterm

use std::io::{self, Stdout, Write};

use crossterm::style::{
    Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
    EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};

use super::{Canvas, Hud, Renderer, Rgb, Screen, background_for_score, palette};
use crate::sim::{GameState, PlatformKind};

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

/// Renders into the alternate screen of the controlling terminal
pub struct TerminalRenderer {
    out: Stdout,
    canvas: Canvas,
    color: bool,
}

impl TerminalRenderer {
    /// Switch the terminal into game mode
    pub fn begin(color: bool) -> io::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        let (cols, rows) = terminal::size()?;
        log::info!("Terminal is {}x{}", cols, rows);
        Ok(Self {
            out,
            canvas: Canvas::new(cols, rows),
            color,
        })
    }

    /// Restore the terminal to its normal state
    pub fn end(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()
    }

    fn resize_if_needed(&mut self) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        if cols != self.canvas.cols() || rows != self.canvas.rows() {
            log::debug!("Terminal resized to {}x{}", cols, rows);
            self.canvas = Canvas::new(cols, rows);
            queue!(self.out, Clear(ClearType::All))?;
        }
        Ok(())
    }

    /// Push the canvas to the terminal, batching runs of equal color
    fn present(&mut self) -> io::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;
        if self.color {
            let bg = to_color(self.canvas.background());
            queue!(self.out, SetBackgroundColor(bg))?;
        }

        for row in 0..self.canvas.rows() {
            queue!(self.out, cursor::MoveTo(0, row))?;
            let cells = self.canvas.row(row);
            let mut start = 0;
            while start < cells.len() {
                let fg = cells[start].fg;
                let end = cells[start..]
                    .iter()
                    .position(|c| c.fg != fg)
                    .map(|n| start + n)
                    .unwrap_or(cells.len());
                let run: String = cells[start..end].iter().map(|c| c.ch).collect();
                if self.color {
                    queue!(self.out, SetForegroundColor(to_color(fg)))?;
                }
                queue!(self.out, Print(run))?;
                start = end;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()
    }
}

impl Renderer for TerminalRenderer {
    fn draw_frame(&mut self, state: &GameState, hud: &Hud) -> io::Result<()> {
        self.resize_if_needed()?;
        let canvas = &mut self.canvas;
        canvas.clear(background_for_score(state.score));

        // Back to front: clouds, platforms, power-ups, mobs, player, HUD
        for cloud in &state.clouds {
            canvas.fill_rect(&cloud.rect, '~', palette::CLOUD);
        }
        for platform in &state.platforms {
            let (ch, fg) = match platform.kind {
                PlatformKind::Small => ('=', palette::GRASS),
                PlatformKind::Large => ('#', palette::STONE),
            };
            canvas.fill_rect(&platform.rect, ch, fg);
        }
        for pow in &state.powerups {
            canvas.fill_rect(&pow.rect, '^', palette::POWERUP);
        }
        for mob in &state.mobs {
            canvas.fill_rect(&mob.rect, 'M', palette::MOB);
        }
        canvas.fill_rect(&state.player.rect(), '@', palette::PLAYER);
        for line in hud.lines(state.score) {
            canvas.text(&line);
        }

        self.present()
    }

    fn draw_screen(&mut self, screen: &Screen) -> io::Result<()> {
        self.resize_if_needed()?;
        self.canvas.clear(screen.background());
        for line in screen.lines() {
            self.canvas.text(&line);
        }
        self.present()
    }
}
