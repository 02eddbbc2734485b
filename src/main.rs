//! Sky Hop entry point
//!
//! Sets up the terminal, wires the collaborators into the game loop and always
//! restores the terminal on the way out.

use std::io;

use anyhow::Context;

use sky_hop::audio::AudioManager;
use sky_hop::platform::{SystemClock, TerminalEvents};
use sky_hop::renderer::TerminalRenderer;
use sky_hop::{Game, HighScore, Settings};

fn main() -> anyhow::Result<()> {
    // Silent unless RUST_LOG asks for output; stderr shares the game's terminal
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Off)
        .parse_default_env()
        .init();
    log::info!("Sky Hop starting...");

    let settings = Settings::load(&Settings::path());
    let highscore = HighScore::load(settings.highscore_path.clone());

    let renderer = TerminalRenderer::begin(settings.color).context("setting up terminal")?;
    let events = match TerminalEvents::new() {
        Ok(events) => events,
        Err(e) => {
            let mut renderer = renderer;
            let _ = renderer.end();
            return Err(e).context("setting up keyboard input");
        }
    };
    let audio = AudioManager::new(io::stdout(), !settings.sound);

    let mut game = Game::new(renderer, events, audio, SystemClock::new(), settings, highscore);
    let result = game.run();

    let (mut renderer, mut events) = game.into_parts();
    if let Err(e) = events.restore() {
        log::warn!("Could not restore keyboard mode: {}", e);
    }
    renderer.end().context("restoring terminal")?;

    result
}
