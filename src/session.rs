//! One visit to the game screen
//!
//! A [`GameSession`] puts the swipe tutorial in front of the board: swipes go
//! to the tutorial until it completes, and only then does the board tick and
//! steer. Leaving the screen drops the session; coming back starts a new one
//! with the tutorial re-armed.

use std::time::Duration;

use crate::game::{
    CollisionType, Direction, GameEngine, GameState, HighScoreNotice, NoticePhase, Position,
    ScheduleKey, StepResult, SwipeVector,
};
use crate::tutorial::{GestureTutorial, TutorialEvent};

/// What a swipe did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// The tutorial was still running and consumed the swipe
    Tutorial(TutorialEvent),
    /// The board took the swipe; `None` if it was rejected
    Steered(Option<Direction>),
}

/// What a tick did
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub step: StepResult,
    /// The "new high score" notice just went up
    pub notice_fired: bool,
}

/// Everything a frame needs to draw the game screen
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<'a> {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Head first
    pub snake: &'a [Position],
    pub food: Position,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub tick_interval: Duration,
    pub game_over: bool,
    pub tutorial_step: usize,
    pub tutorial_expected: Option<Direction>,
    pub tutorial_done: bool,
    pub notice: NoticePhase,
}

pub struct GameSession {
    engine: GameEngine,
    state: GameState,
    tutorial: GestureTutorial,
    notice: HighScoreNotice,
}

impl GameSession {
    /// Mount the game screen with the high score currently on record
    pub fn new(mut engine: GameEngine, high_score: u32) -> Self {
        let state = engine.new_game(high_score);
        let tutorial = GestureTutorial::new(engine.config().tutorial_threshold_px);

        Self {
            engine,
            state,
            tutorial,
            notice: HighScoreNotice::new(high_score),
        }
    }

    /// Skip the tutorial, e.g. for a player who has already seen it
    pub fn without_tutorial(engine: GameEngine, high_score: u32) -> Self {
        let mut session = Self::new(engine, high_score);
        for direction in crate::tutorial::TUTORIAL_STEPS {
            let swipe = SwipeVector::toward(direction, session.engine.config().key_swipe_px);
            session.tutorial.match_swipe(swipe);
        }
        debug_assert!(session.tutorial.is_complete());
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access to the board, for setting up scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tutorial(&self) -> &GestureTutorial {
        &self.tutorial
    }

    pub fn notice(&self) -> &HighScoreNotice {
        &self.notice
    }

    pub fn tutorial_done(&self) -> bool {
        self.tutorial.is_complete()
    }

    /// True while the board should be ticking
    pub fn is_running(&self) -> bool {
        self.tutorial_done() && !self.state.game_over
    }

    /// Route a finished swipe to the tutorial or the board
    pub fn swipe(&mut self, swipe: SwipeVector) -> SwipeOutcome {
        if !self.tutorial.is_complete() {
            return SwipeOutcome::Tutorial(self.tutorial.match_swipe(swipe));
        }
        SwipeOutcome::Steered(self.engine.steer(&mut self.state, swipe))
    }

    /// Advance the board one cell. Does nothing before the tutorial is done
    /// or after the game is over.
    pub fn tick(&mut self) -> Option<TickReport> {
        if !self.is_running() {
            return None;
        }

        let step = self.engine.step(&mut self.state);

        if let Some(cause) = step.info.collision_type {
            let cause = match cause {
                CollisionType::Wall => "wall",
                CollisionType::SelfCollision => "own body",
            };
            log::info!(
                "game over: hit {} with score {} after {} steps",
                cause,
                self.state.score,
                self.state.steps
            );
        }

        let notice_fired = self.notice.observe(
            self.state.score,
            self.state.game_over,
            self.tutorial.is_complete(),
        );
        if notice_fired {
            log::info!("new high score {} this session", self.state.score);
        }

        Some(TickReport { step, notice_fired })
    }

    /// Start a new game on the same screen. The tutorial stays done.
    pub fn restart(&mut self) {
        self.engine.restart(&mut self.state);
        self.notice.rearm(self.state.high_score);
        log::info!("restarted, high score {}", self.state.high_score);
    }

    /// The notice has been shown long enough
    pub fn dismiss_notice(&mut self) {
        self.notice.dismiss();
    }

    pub fn tick_interval(&self) -> Duration {
        self.engine.tick_interval(&self.state)
    }

    /// Inputs of the tick timer; see [`crate::game::TickSchedule::sync`]
    pub fn schedule_key(&self) -> ScheduleKey {
        ScheduleKey {
            period: self.is_running().then(|| self.tick_interval()),
            direction: self.state.next_direction(),
            food: self.state.food,
            game_over: self.state.game_over,
            tutorial_done: self.tutorial.is_complete(),
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid_width: self.state.grid_width,
            grid_height: self.state.grid_height,
            snake: &self.state.snake.body,
            food: self.state.food,
            direction: self.state.snake.direction,
            score: self.state.score,
            high_score: self.state.high_score,
            tick_interval: self.tick_interval(),
            game_over: self.state.game_over,
            tutorial_step: self.tutorial.step(),
            tutorial_expected: self.tutorial.expected(),
            tutorial_done: self.tutorial.is_complete(),
            notice: self.notice.phase(),
        }
    }
}
