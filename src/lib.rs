//! Classic grid Snake: a schedule-agnostic simulation core plus a terminal
//! front end.

pub mod app;
pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod snake;
pub mod speed;
pub mod terminal_runtime;
pub mod ui;
