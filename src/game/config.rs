use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::direction::Direction;
use super::state::{Position, Snake};

/// Largest grid side accepted, so the board always fits a terminal buffer
pub const MAX_GRID_SIDE: usize = 1024;

/// Configuration for the game
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
///
/// # Example
///
/// ```rust
/// use swipe_snake::game::GameConfig;
///
/// let config = GameConfig {
///     min_tick_ms: 80,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Head of the snake at the start of every game; the body trails to the left
    pub initial_head: Position,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Food position for the first game after mounting; restarts spawn randomly
    pub initial_food: Position,

    /// Tick period at score 0
    pub base_tick_ms: u64,
    /// How much faster each point makes the tick
    pub tick_step_ms: u64,
    /// Fastest tick period
    pub min_tick_ms: u64,

    /// Minimum swipe length (px) that steers the snake
    pub steer_threshold_px: f32,
    /// Minimum swipe length (px) that the tutorial accepts
    pub tutorial_threshold_px: f32,

    /// Horizontal pixels per terminal cell when converting drags
    pub cell_width_px: f32,
    /// Vertical pixels per terminal cell when converting drags
    pub cell_height_px: f32,
    /// Length of the synthetic swipe produced by a direction key
    pub key_swipe_px: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_head: Position::new(5, 5),
            initial_snake_length: 3,
            initial_food: Position::new(10, 10),
            base_tick_ms: 200,
            tick_step_ms: 10,
            min_tick_ms: 60,
            steer_threshold_px: 20.0,
            tutorial_threshold_px: 30.0,
            cell_width_px: 8.0,
            cell_height_px: 16.0,
            key_swipe_px: 48.0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self {
            initial_food: Position::new(7, 7),
            ..Self::new(10, 10)
        }
    }

    /// Load a configuration from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to parse game config")?;
        config
            .validate()
            .map_err(|e| anyhow!("Invalid game config in {:?}: {}", path, e))?;
        Ok(config)
    }

    /// Tick period for a given score: `max(base - score * step, min)`
    pub fn tick_interval(&self, score: u32) -> Duration {
        let speedup = self.tick_step_ms.saturating_mul(u64::from(score));
        let ms = self.base_tick_ms.saturating_sub(speedup).max(self.min_tick_ms);
        Duration::from_millis(ms)
    }

    /// The snake every game starts with
    pub fn initial_snake(&self) -> Snake {
        Snake::new(self.initial_head, Direction::Right, self.initial_snake_length)
    }

    fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.grid_width
            && (pos.y as usize) < self.grid_height
    }

    /// Validate the configuration
    ///
    /// Returns an error message naming the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err("grid dimensions must be positive".to_string());
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(format!("grid dimensions must not exceed {}", MAX_GRID_SIDE));
        }
        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }
        if self.initial_snake_length >= self.grid_width * self.grid_height {
            return Err("initial snake leaves no room for food".to_string());
        }
        let snake = self.initial_snake();
        if let Some(cell) = snake.body.iter().find(|p| !self.contains(**p)) {
            return Err(format!("initial snake cell {:?} is outside the grid", cell));
        }
        if !self.contains(self.initial_food) {
            return Err(format!(
                "initial food {:?} is outside the grid",
                self.initial_food
            ));
        }
        if self.min_tick_ms == 0 {
            return Err("min_tick_ms must be positive".to_string());
        }
        if self.min_tick_ms > self.base_tick_ms {
            return Err(format!(
                "min_tick_ms ({}) exceeds base_tick_ms ({})",
                self.min_tick_ms, self.base_tick_ms
            ));
        }
        for (name, value) in [
            ("steer_threshold_px", self.steer_threshold_px),
            ("tutorial_threshold_px", self.tutorial_threshold_px),
            ("cell_width_px", self.cell_width_px),
            ("cell_height_px", self.cell_height_px),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("{} must be a non-negative number", name));
            }
        }
        if self.key_swipe_px <= self.steer_threshold_px.max(self.tutorial_threshold_px) {
            return Err("key_swipe_px must exceed both swipe thresholds".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.initial_food, Position::new(10, 10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 15);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 15);
        assert!(GameConfig::small().validate().is_ok());
    }

    #[test]
    fn test_tick_interval_curve() {
        let config = GameConfig::default();
        assert_eq!(config.tick_interval(0), Duration::from_millis(200));
        assert_eq!(config.tick_interval(1), Duration::from_millis(190));
        assert_eq!(config.tick_interval(14), Duration::from_millis(60));
        assert_eq!(config.tick_interval(20), Duration::from_millis(60));
        assert_eq!(config.tick_interval(u32::MAX), Duration::from_millis(60));
    }

    #[test]
    fn test_tick_interval_is_non_increasing() {
        let config = GameConfig::default();
        let periods: Vec<_> = (0..40).map(|s| config.tick_interval(s)).collect();
        assert!(periods.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_initial_snake() {
        let snake = GameConfig::default().initial_snake();
        assert_eq!(
            snake.body,
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)]
        );
        assert_eq!(snake.direction, Direction::Right);
    }

    #[test]
    fn test_validation_snake_outside_grid() {
        let config = GameConfig {
            initial_head: Position::new(1, 5),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_food_outside_grid() {
        let narrow = GameConfig {
            grid_width: 8,
            ..Default::default()
        };
        assert!(narrow.validate().is_err());

        let moved = GameConfig {
            initial_food: Position::new(6, 2),
            ..narrow
        };
        assert!(moved.validate().is_ok());
    }

    #[test]
    fn test_validation_grid_too_large() {
        let config = GameConfig {
            grid_width: MAX_GRID_SIDE + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(GameConfig::new(MAX_GRID_SIDE, MAX_GRID_SIDE).validate().is_ok());
    }

    #[test]
    fn test_validation_tick_floor_above_base() {
        let config = GameConfig {
            min_tick_ms: 300,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_key_swipe_too_short() {
        let config = GameConfig {
            key_swipe_px: 25.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "grid_width": 30, "min_tick_ms": 80 }"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.tick_interval(100), Duration::from_millis(80));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "grid_width": 0 }"#).unwrap();

        assert!(GameConfig::load(&path).is_err());
    }
}
