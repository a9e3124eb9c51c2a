use super::food::Food;
use super::geometry::Vec2;
use super::settings::SnakeSkin;
use super::types::{Direction, EffectKind, GamePhase};

/// Read-only view of one tick's state, handed to collaborators (views,
/// recorders) after every `advance_tick`. Nothing in here feeds back into
/// the state machine.
#[derive(Clone, Debug)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub tick_count: u64,
    pub score: u32,
    pub best_score: u32,
    pub largest_snake_size: usize,
    pub death_count: u32,
    pub current_direction: Direction,
    pub last_input_direction: Direction,
    pub using_input: bool,
    pub snake_body: Vec<Vec2>,
    pub foods: Vec<Food>,
    pub effects: [(EffectKind, i32); EffectKind::COUNT],
    pub arena_size: Vec2,
    pub snake_skin: SnakeSkin,
    pub text_box_top_left: String,
    pub text_box_top_right: String,
    pub text_box_bottom_left: String,
    pub text_box_bottom_right: String,
}

impl GameSnapshot {
    pub fn snake_head(&self) -> Vec2 {
        self.snake_body[0]
    }

    pub fn effect_duration(&self, kind: EffectKind) -> i32 {
        self.effects[kind.index()].1
    }
}
