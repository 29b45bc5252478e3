//! High-score persistence
//!
//! Provides:
//! - A string-keyed key-value store trait with file and in-memory backends
//! - Reading the recorded high score, treating bad data as no record
//! - A background writer so record writes never block the game loop

pub mod high_score;
pub mod kv;
pub mod writer;

pub use high_score::{HIGH_SCORE_KEY, load_high_score};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use writer::HighScoreWriter;
