//! 2048 for the terminal.
//!
//! The engine lives in [`board`] and [`tile`]; everything else is the shell
//! around it: [`command`] turns key presses into moves, [`game`] runs the
//! fixed-tick loop and [`renderer`] / [`widgets`] draw snapshots with ratatui.

pub mod board;
pub mod command;
pub mod config;
pub mod game;
pub mod logging;
pub mod renderer;
pub mod tile;
pub mod widgets;
