//! Fixed-tick grid snake for the terminal.
//!
//! The simulation lives in [`engine::GridSnakeEngine`], a pure state
//! machine with no I/O and no clock of its own. Everything else here is
//! the terminal driver around it: input mapping, ratatui rendering, and
//! high-score persistence.

pub mod config;
pub mod engine;
pub mod food;
pub mod input;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
