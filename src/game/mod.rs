//! Core game logic module for Snake
//!
//! This module contains the board rules without any terminal I/O or
//! rendering dependencies: movement, collisions, food, scoring, the tick
//! speed curve, the high-score notice and the tick timer that drives it all.

pub mod config;
pub mod direction;
pub mod engine;
pub mod notice;
pub mod schedule;
pub mod state;
pub mod swipe;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use notice::{HighScoreNotice, NoticePhase, NOTICE_DURATION};
pub use schedule::{ScheduleKey, TickSchedule};
pub use state::{CollisionType, GameState, Position, Snake};
pub use swipe::SwipeVector;
