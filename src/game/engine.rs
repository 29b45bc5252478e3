use super::{
    config::GameConfig,
    direction::Direction,
    state::{CollisionType, GameState, Position, Snake},
    swipe::SwipeVector,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Set when this step raised the high score
    pub new_high_score: Option<u32>,
}

/// Result of a game tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game is over after this step
    pub terminated: bool,
    pub info: StepInfo,
}

impl StepResult {
    fn idle(terminated: bool) -> Self {
        Self {
            terminated,
            info: StepInfo {
                ate_food: false,
                collision_type: None,
                new_high_score: None,
            },
        }
    }
}

/// The game engine that handles all board rules
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// State for the first game after the board is mounted.
    /// Food starts at the configured cell unless the snake covers it.
    pub fn new_game(&mut self, high_score: u32) -> GameState {
        let snake = self.config.initial_snake();
        let food = if snake.occupies(self.config.initial_food) {
            self.spawn_food_avoid_snake(&snake)
        } else {
            self.config.initial_food
        };

        let mut state = GameState::new(
            snake,
            food,
            self.config.grid_width,
            self.config.grid_height,
        );
        state.high_score = high_score;
        state
    }

    /// Put the board back to its starting layout with fresh random food.
    /// The high score survives.
    pub fn restart(&mut self, state: &mut GameState) {
        let snake = self.config.initial_snake();
        state.food = self.spawn_food_avoid_snake(&snake);
        state.snake = snake;
        state.pending_direction = None;
        state.score = 0;
        state.steps = 0;
        state.game_over = false;
    }

    /// Tick period for the current score
    pub fn tick_interval(&self, state: &GameState) -> Duration {
        self.config.tick_interval(state.score)
    }

    /// Steer the snake with a finished swipe.
    ///
    /// Returns the direction that will be applied on the next tick, or `None`
    /// if the swipe was too short, reversed the current heading, or arrived
    /// after the game ended.
    pub fn steer(&self, state: &mut GameState, swipe: SwipeVector) -> Option<Direction> {
        if state.game_over {
            return None;
        }

        let direction = swipe.classify(self.config.steer_threshold_px)?;
        if state.snake.direction.is_opposite(direction) {
            return None;
        }

        state.pending_direction = Some(direction);
        Some(direction)
    }

    /// Advance the snake by one cell
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if state.game_over {
            return StepResult::idle(true);
        }

        if let Some(direction) = state.pending_direction.take() {
            state.snake.direction = direction;
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.game_over = true;
            state.steps += 1;

            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                    new_high_score: None,
                },
            };
        }

        let ate_food = new_head == state.food;
        state.snake.move_snake(ate_food);
        state.steps += 1;

        let mut new_high_score = None;
        if ate_food {
            state.score += 1;
            if state.score > state.high_score {
                state.high_score = state.score;
                new_high_score = Some(state.score);
            }
            state.food = self.spawn_food_avoid_snake(&state.snake);
        }

        debug_assert!(state.snake.is_self_disjoint(), "snake overlaps itself");
        debug_assert!(!state.snake.occupies(state.food), "food spawned on the snake");

        StepResult {
            terminated: false,
            info: StepInfo {
                ate_food,
                collision_type: None,
                new_high_score,
            },
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.collides_with_body(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn food at a uniformly random cell the snake does not cover
    fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Position {
        debug_assert!(
            snake.len() < self.config.grid_width * self.config.grid_height,
            "no free cell left for food"
        );
        loop {
            let x = self.rng.gen_range(0..self.config.grid_width) as i32;
            let y = self.rng.gen_range(0..self.config.grid_height) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return pos;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::default(), 7)
    }

    #[test]
    fn test_new_game() {
        let mut engine = engine();
        let state = engine.new_game(12);

        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 12);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Position::new(5, 5));
        assert_eq!(state.food, Position::new(10, 10));
    }

    #[test]
    fn test_new_game_moves_food_off_snake() {
        let config = GameConfig {
            initial_food: Position::new(4, 5),
            ..Default::default()
        };
        let mut engine = GameEngine::with_seed(config, 1);
        let state = engine.new_game(0);
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        let mut state = engine.new_game(0);

        let result = engine.step(&mut state);

        assert!(!result.terminated);
        assert!(!result.info.ate_food);
        assert_eq!(state.steps, 1);
        assert_eq!(state.snake.head(), Position::new(6, 5));
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        let mut state = engine.new_game(0);
        state.food = Position::new(6, 5);

        let result = engine.step(&mut state);

        assert!(result.info.ate_food);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 4);
        assert!(!state.snake.occupies(state.food));
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_high_score_ratchet() {
        let mut engine = engine();
        let mut state = engine.new_game(1);

        state.food = Position::new(6, 5);
        let first = engine.step(&mut state);
        assert_eq!(state.score, 1);
        assert_eq!(first.info.new_high_score, None);
        assert_eq!(state.high_score, 1);

        state.food = Position::new(7, 5);
        let second = engine.step(&mut state);
        assert_eq!(second.info.new_high_score, Some(2));
        assert_eq!(state.high_score, 2);

        engine.restart(&mut state);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 2);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine();
        let mut state = GameState::new(
            Snake::new(Position::new(0, 5), Direction::Left, 3),
            Position::new(5, 5),
            10,
            10,
        );
        let before = state.snake.clone();

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert!(state.game_over);
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.snake, before);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 3);

        // Body: (5,5), (4,5), (3,5), (2,5), (1,5)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        let mut state = GameState::new(snake, Position::new(8, 8), 10, 10);

        engine.step(&mut state);
        engine.steer(&mut state, SwipeVector::new(0.0, 40.0));
        engine.step(&mut state);
        engine.steer(&mut state, SwipeVector::new(-40.0, 0.0));
        engine.step(&mut state);
        engine.steer(&mut state, SwipeVector::new(0.0, -40.0));
        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_reverse_swipe_is_rejected() {
        let engine = engine();
        let mut state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(10, 10),
            20,
            20,
        );

        assert_eq!(engine.steer(&mut state, SwipeVector::new(-25.0, 0.0)), None);
        assert_eq!(state.pending_direction, None);
        assert_eq!(state.snake.direction, Direction::Right);
    }

    #[test]
    fn test_reversal_checked_against_current_heading() {
        let mut engine = engine();
        let mut state = engine.new_game(0);

        assert_eq!(
            engine.steer(&mut state, SwipeVector::new(0.0, -25.0)),
            Some(Direction::Up)
        );
        // Still heading right until the tick, so left is a reversal.
        assert_eq!(engine.steer(&mut state, SwipeVector::new(-25.0, 0.0)), None);
        assert_eq!(state.pending_direction, Some(Direction::Up));

        engine.step(&mut state);
        assert_eq!(state.snake.direction, Direction::Up);
        assert_eq!(state.snake.head(), Position::new(5, 4));
    }

    #[test]
    fn test_short_swipe_is_ignored() {
        let mut engine = engine();
        let mut state = engine.new_game(0);

        assert_eq!(engine.steer(&mut state, SwipeVector::new(0.0, 20.0)), None);
        assert_eq!(state.pending_direction, None);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine();
        let mut state = engine.new_game(0);
        state.game_over = true;
        let steps_before = state.steps;

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(state.steps, steps_before);
        assert_eq!(engine.steer(&mut state, SwipeVector::new(0.0, 40.0)), None);
    }

    #[test]
    fn test_restart() {
        let mut engine = engine();
        let mut state = engine.new_game(0);
        state.score = 9;
        state.game_over = true;
        state.pending_direction = Some(Direction::Down);
        state.snake = Snake::new(Position::new(19, 5), Direction::Up, 6);

        engine.restart(&mut state);

        assert_eq!(state.snake, GameConfig::default().initial_snake());
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert_eq!(state.pending_direction, None);
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn test_speed_follows_score() {
        let mut engine = engine();
        let mut state = engine.new_game(0);
        assert_eq!(engine.tick_interval(&state), Duration::from_millis(200));
        state.score = 14;
        assert_eq!(engine.tick_interval(&state), Duration::from_millis(60));
    }
}
