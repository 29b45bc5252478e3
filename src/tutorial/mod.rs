//! Swipe tutorial shown before the first game of a session
//!
//! Provides:
//! - The fixed step sequence and the matcher that walks it
//! - The repeating motion cue drawn for the current step

pub mod cue;
pub mod matcher;

pub use cue::{CueFrame, cue_frame};
pub use matcher::{GestureTutorial, TUTORIAL_STEPS, TutorialEvent};
