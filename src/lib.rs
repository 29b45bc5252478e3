//! Swipe Snake - a Snake game gated behind a swipe tutorial
//!
//! This library provides:
//! - Core board rules, tick speed and the tick timer (game module)
//! - The swipe tutorial (tutorial module)
//! - One visit to the game screen, tutorial then board (session module)
//! - High-score persistence (store module)
//! - Terminal input, rendering and the interactive app (input, render, modes)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
pub mod store;
pub mod tutorial;
