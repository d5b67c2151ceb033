use std::io;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use log::{debug, info, trace, warn};

use crate::board::{Board, Direction};
use crate::command::{self, Command};
use crate::config::Config;
use crate::renderer::Renderer;

/// Whether the current session still accepts moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// No move changes the board; the end screen is showing.
    Over,
}

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The main game loop.  `renderer` is injected so the engine stays
/// renderer-agnostic.
pub struct Game<R: Renderer> {
    board: Board,
    renderer: R,
    phase: Phase,
    seed: Option<u64>,
    session: u64,
    moves: u32,
    tick: Duration,
}

impl<R: Renderer> Game<R> {
    pub fn new(config: &Config, renderer: R) -> Self {
        let board = fresh_board(config.seed, 0);
        info!("session 0 started (seed: {:?})", config.seed);
        Game {
            board,
            renderer,
            phase: Phase::Playing,
            seed: config.seed,
            session: 0,
            moves: 0,
            tick: config.tick(),
        }
    }

    /// Resume from an existing board (replays, tests).
    pub fn with_board(board: Board, renderer: R) -> Self {
        let phase = if board.is_terminal() {
            Phase::Over
        } else {
            Phase::Playing
        };
        Game {
            board,
            renderer,
            phase,
            seed: None,
            session: 0,
            moves: 0,
            tick: Config::default().tick(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run until the player quits.  Each tick drains every pending terminal
    /// event in order, draws one frame, then sleeps out the rest of the tick.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let frame_start = Instant::now();

            while event::poll(Duration::ZERO).context("failed to poll terminal events")? {
                let ev = event::read().context("failed to read terminal event")?;
                if let Some(cmd) = command::from_event(&ev) {
                    if self.handle(cmd) == Flow::Quit {
                        return Ok(());
                    }
                }
            }

            self.draw().context("failed to draw frame")?;

            if let Some(rest) = self.tick.checked_sub(frame_start.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    /// Dispatch a command.
    pub fn handle(&mut self, cmd: Command) -> Flow {
        match cmd {
            Command::Quit => {
                info!(
                    "quit in session {} with score {} after {} moves",
                    self.session,
                    self.board.score(),
                    self.moves
                );
                return Flow::Quit;
            }
            Command::Restart => match self.phase {
                Phase::Over => self.restart(),
                Phase::Playing => trace!("restart ignored while playing"),
            },
            Command::Move(direction) => match self.phase {
                Phase::Playing => self.apply_move(direction),
                Phase::Over => trace!("{:?} ignored on the end screen", direction),
            },
        }
        Flow::Continue
    }

    /// Hand the renderer a snapshot of the current board.
    pub fn draw(&mut self) -> io::Result<()> {
        let snapshot = self.board.snapshot();
        match self.phase {
            Phase::Playing => self.renderer.render(&snapshot),
            Phase::Over => self.renderer.game_over(&snapshot),
        }
    }

    fn apply_move(&mut self, direction: Direction) {
        let outcome = self.board.apply_move(direction);
        if !outcome.changed {
            trace!("{:?} had no effect", direction);
            return;
        }

        self.moves += 1;
        debug!(
            "{:?}: +{} (score {}), spawned {:?}",
            direction,
            outcome.gained,
            self.board.score(),
            outcome.spawned.map(|s| (s.row, s.col, s.tile.value()))
        );

        if self.board.is_terminal() {
            self.phase = Phase::Over;
            info!(
                "game over in session {}: score {}, max tile {}, {} moves",
                self.session,
                self.board.score(),
                self.board.max_tile(),
                self.moves
            );
            match serde_json::to_string(&self.board.snapshot()) {
                Ok(json) => info!("final board: {}", json),
                Err(e) => warn!("could not serialize final board: {}", e),
            }
        }
    }

    fn restart(&mut self) {
        self.session += 1;
        self.board = fresh_board(self.seed, self.session);
        self.phase = Phase::Playing;
        self.moves = 0;
        info!("session {} started", self.session);
    }
}

fn fresh_board(seed: Option<u64>, session: u64) -> Board {
    match seed {
        Some(seed) => Board::new_seeded(seed.wrapping_add(session)),
        None => Board::new_random(),
    }
}
