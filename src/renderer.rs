use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::board::Snapshot;
use crate::widgets::{BoardWidget, render_game_over_overlay};

/// Trait that abstracts the rendering layer.
///
/// The game loop only ever hands over a [`Snapshot`], never the live board.
pub trait Renderer {
    /// Draw one frame of an ongoing game.
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()>;
    /// Draw the board with the end-of-game screen on top.
    fn game_over(&mut self, snapshot: &Snapshot) -> io::Result<()>;
}

// ---------------------------------------------------------------------------
// TUI Renderer
// ---------------------------------------------------------------------------

/// Full-screen ratatui renderer.
///
/// Construction puts the terminal in raw mode on the alternate screen; the
/// previous terminal state is restored when the renderer is dropped.
pub struct TuiRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TuiRenderer {
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e).context("failed to enter the alternate screen");
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(TuiRenderer { terminal }),
            Err(e) => {
                restore_terminal();
                Err(e).context("failed to create the terminal backend")
            }
        }
    }
}

impl Drop for TuiRenderer {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

impl Renderer for TuiRenderer {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.terminal.draw(|frame| {
            frame.render_widget(BoardWidget::new(snapshot), frame.area());
        })?;
        Ok(())
    }

    fn game_over(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(BoardWidget::new(snapshot), area);
            render_game_over_overlay(snapshot.score, area, frame.buffer_mut());
        })?;
        Ok(())
    }
}
