use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Validate;

use super::geometry::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnakeSkin {
    Solid,
    Rainbow,
}

/// Everything a running game can be configured with. All fields are
/// live-mutable through `Game::update_settings`; the text boxes are opaque
/// template strings the core carries for the view and never interprets.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub arena_width: u32,
    pub arena_height: u32,
    pub max_food_count: usize,
    pub init_food_on_init: bool,
    pub wall_warp: bool,
    pub tick_interval_ms: u64,
    pub death_pause_ms: u64,
    pub initial_snake_size: u32,
    pub player_controlled: bool,
    pub snake_skin: SnakeSkin,
    pub text_box_top_left: String,
    pub text_box_top_right: String,
    pub text_box_bottom_left: String,
    pub text_box_bottom_right: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            arena_width: 16,
            arena_height: 16,
            max_food_count: 8,
            init_food_on_init: false,
            wall_warp: true,
            tick_interval_ms: 150,
            death_pause_ms: 5000,
            initial_snake_size: 3,
            player_controlled: false,
            snake_skin: SnakeSkin::Solid,
            text_box_top_left: "Score: {score}".to_string(),
            text_box_top_right: "Best Score: {bestScore}".to_string(),
            text_box_bottom_left: "Snake Length: {snakeLength}".to_string(),
            text_box_bottom_right: "Deaths: {deathCount}".to_string(),
        }
    }
}

impl GameSettings {
    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.arena_width as i32, self.arena_height as i32)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn death_pause(&self) -> Duration {
        Duration::from_millis(self.death_pause_ms)
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if self.arena_width < 4 || self.arena_width > 128 {
            return Err("Arena width must be between 4 and 128".to_string());
        }
        if self.arena_height < 4 || self.arena_height > 128 {
            return Err("Arena height must be between 4 and 128".to_string());
        }
        if self.tick_interval_ms < 10 || self.tick_interval_ms > 5000 {
            return Err("Tick interval must be between 10ms and 5000ms".to_string());
        }
        if self.death_pause_ms > 60_000 {
            return Err("Death pause must be at most 60 seconds".to_string());
        }
        if self.max_food_count < 1 || self.max_food_count > 64 {
            return Err("Max food count must be between 1 and 64".to_string());
        }
        if self.initial_snake_size < 1 || self.initial_snake_size > 64 {
            return Err("Initial snake size must be between 1 and 64".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(GameSettings::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_tiny_arena() {
        let settings = GameSettings {
            arena_width: 2,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_food() {
        let settings = GameSettings {
            max_food_count: 0,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let settings = GameSettings {
            wall_warp: false,
            snake_skin: SnakeSkin::Rainbow,
            ..GameSettings::default()
        };
        let yaml = serde_yaml_ng::to_string(&settings).unwrap();
        let parsed: GameSettings = serde_yaml_ng::from_str(&yaml).unwrap();
        assert!(!parsed.wall_warp);
        assert_eq!(parsed.snake_skin, SnakeSkin::Rainbow);
        assert_eq!(parsed.tick_interval_ms, 150);
    }
}
