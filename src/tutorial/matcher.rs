use crate::game::{Direction, SwipeVector};

/// The swipes the player has to perform, in order
pub const TUTORIAL_STEPS: [Direction; 4] = [
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::Up,
];

/// What a swipe did to the tutorial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialEvent {
    /// Too short, wrong direction, or the tutorial is already done
    Ignored,
    /// Moved on to the step with this index
    Advanced(usize),
    /// The last step was matched; emitted exactly once
    Completed,
}

/// Walks the player through [`TUTORIAL_STEPS`]
#[derive(Debug, Clone, PartialEq)]
pub struct GestureTutorial {
    step: usize,
    completed: bool,
    threshold: f32,
}

impl GestureTutorial {
    /// `threshold` is the minimum swipe length in pixels
    pub fn new(threshold: f32) -> Self {
        Self {
            step: 0,
            completed: false,
            threshold,
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Direction the player should swipe next, or `None` once complete
    pub fn expected(&self) -> Option<Direction> {
        if self.completed {
            None
        } else {
            Some(TUTORIAL_STEPS[self.step])
        }
    }

    /// Match a finished swipe against the current step.
    /// Wrong swipes carry no penalty and never move the tutorial back.
    pub fn match_swipe(&mut self, swipe: SwipeVector) -> TutorialEvent {
        let Some(expected) = self.expected() else {
            return TutorialEvent::Ignored;
        };
        if swipe.classify(self.threshold) != Some(expected) {
            return TutorialEvent::Ignored;
        }

        if self.step == TUTORIAL_STEPS.len() - 1 {
            self.completed = true;
            log::info!("tutorial complete");
            TutorialEvent::Completed
        } else {
            self.step += 1;
            log::debug!("tutorial advanced to step {}", self.step + 1);
            TutorialEvent::Advanced(self.step)
        }
    }
}
