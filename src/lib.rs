//! Classic grid Snake.
//!
//! [`engine::GameEngine`] holds the whole game. It paints through the
//! [`view::Renderer`] and [`view::ScoreDisplay`] traits and hands deferred
//! moves to a [`clock::Clock`], so any front end can drive it. The terminal
//! front end in this crate uses ratatui and crossterm.

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
pub mod view;
