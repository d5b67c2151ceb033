use anyhow::Result;
use clap::Parser;

use tui_2048::config::Config;
use tui_2048::game::Game;
use tui_2048::logging;
use tui_2048::renderer::TuiRenderer;

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(config.log_file.as_deref());

    let renderer = TuiRenderer::new()?;
    let mut game = Game::new(&config, renderer);
    let result = game.run();

    // Dropping the game drops the renderer, which restores the terminal
    // before any error is printed.
    drop(game);
    result
}
