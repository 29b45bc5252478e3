//! Terminal input translated into game input
//!
//! Keys map to navigation and synthetic swipes; a left-button press and
//! release pair becomes a swipe scaled from cells to pixels.

pub mod handler;

pub use handler::{InputAction, InputHandler};
