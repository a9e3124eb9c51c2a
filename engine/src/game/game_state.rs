use std::time::{Duration, Instant};

use crate::{log, warn};

use super::effects::EffectsRegistry;
use super::food::{Food, FoodSpawner};
use super::geometry::{Vec2, in_bounds};
use super::input::{DirectionContext, InputController};
use super::session_rng::SessionRng;
use super::settings::GameSettings;
use super::snake::Snake;
use super::snapshot::GameSnapshot;
use super::types::{Direction, EffectKind, FoodKind, GamePhase};

const RAINBOW_INVINCIBILITY_TICKS: i32 = 100;
const UMAMI_NOT_GROWING_TICKS: i32 = 300;
const REJUVENATION_TICKS: i32 = 150;

const INIT_FOOD_MAX_FAILURES: u32 = 30;

/// How soon the driver should call `advance_tick` again. The core never
/// schedules itself; whoever owns the loop sleeps this out and calls again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickSchedule {
    Immediate,
    After(Duration),
}

/// The tick-driven state machine. One `advance_tick` call runs exactly one
/// phase handler and bumps the tick counter; everything else is read-only
/// snapshot access or buffered input that the next tick consumes.
pub struct Game {
    settings: GameSettings,
    phase: GamePhase,
    snake: Snake,
    foods: Vec<Food>,
    effects: EffectsRegistry,
    input: InputController,
    current_direction: Direction,
    score: u32,
    best_score: u32,
    largest_snake_size: usize,
    death_count: u32,
    tick_count: u64,
    rng: SessionRng,
}

impl Game {
    pub fn new(settings: GameSettings, rng: SessionRng) -> Self {
        let arena = settings.arena_size();
        let mut game = Self {
            phase: GamePhase::Initializing,
            snake: Snake::new(arena.div_floor(Vec2::new(2, 2))),
            foods: Vec::new(),
            effects: EffectsRegistry::new(),
            input: InputController::new(settings.player_controlled),
            current_direction: Direction::Up,
            score: 0,
            best_score: 0,
            largest_snake_size: 0,
            death_count: 0,
            tick_count: 0,
            rng,
            settings,
        };
        game.current_direction = game.spawn_direction();
        game
    }

    pub fn advance_tick(&mut self) -> TickSchedule {
        let schedule = match self.phase {
            GamePhase::Initializing => self.tick_initializing(),
            GamePhase::Playing => self.tick_playing(),
            GamePhase::Dying => self.tick_dying(),
            GamePhase::Dead => self.tick_dead(),
            GamePhase::PostDead => self.tick_post_dead(),
        };
        self.tick_count += 1;
        schedule
    }

    pub fn submit_input(&mut self, direction: Direction, timestamp: Instant) {
        self.input
            .submit(direction, timestamp, self.settings.tick_interval());
    }

    pub fn set_using_input(&mut self, enabled: bool) {
        self.input.set_using_input(enabled, self.current_direction);
        self.settings.player_controlled = enabled;
    }

    /// Live settings update. A changed arena restarts the game from the
    /// Initializing phase; a changed control mode resets the input buffer.
    pub fn update_settings(&mut self, settings: GameSettings) {
        let arena_changed = settings.arena_width != self.settings.arena_width
            || settings.arena_height != self.settings.arena_height;
        let control_changed = settings.player_controlled != self.input.using_input();

        self.settings = settings;

        if control_changed {
            self.input
                .set_using_input(self.settings.player_controlled, self.current_direction);
        }
        if arena_changed {
            self.phase = GamePhase::Initializing;
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn largest_snake_size(&self) -> usize {
        self.largest_snake_size
    }

    pub fn death_count(&self) -> u32 {
        self.death_count
    }

    pub fn current_direction(&self) -> Direction {
        self.current_direction
    }

    pub fn last_input_direction(&self) -> Direction {
        self.input.last_user_input()
    }

    pub fn using_input(&self) -> bool {
        self.input.using_input()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn effect_duration(&self, kind: EffectKind) -> i32 {
        self.effects.duration(kind)
    }

    pub fn arena_size(&self) -> Vec2 {
        self.settings.arena_size()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            tick_count: self.tick_count,
            score: self.score,
            best_score: self.best_score,
            largest_snake_size: self.largest_snake_size,
            death_count: self.death_count,
            current_direction: self.current_direction,
            last_input_direction: self.input.last_user_input(),
            using_input: self.input.using_input(),
            snake_body: self.snake.entire_body().collect(),
            foods: self.foods.clone(),
            effects: EffectKind::ALL.map(|kind| (kind, self.effects.duration(kind))),
            arena_size: self.settings.arena_size(),
            snake_skin: self.settings.snake_skin,
            text_box_top_left: self.settings.text_box_top_left.clone(),
            text_box_top_right: self.settings.text_box_top_right.clone(),
            text_box_bottom_left: self.settings.text_box_bottom_left.clone(),
            text_box_bottom_right: self.settings.text_box_bottom_right.clone(),
        }
    }

    fn spawn_direction(&self) -> Direction {
        if self.settings.arena_width > self.settings.arena_height {
            Direction::Left
        } else {
            Direction::Up
        }
    }

    fn tick_initializing(&mut self) -> TickSchedule {
        self.current_direction = self.spawn_direction();

        let arena = self.settings.arena_size();
        self.snake = Snake::new(arena.div_floor(Vec2::new(2, 2)));
        self.snake
            .increase_body(self.settings.initial_snake_size as i32 - 1);

        self.score = 0;
        self.foods.clear();
        self.phase = GamePhase::Playing;
        self.input.reset_commit();

        if self.settings.init_food_on_init {
            self.populate_initial_food();
        }

        self.effects.clear();
        self.input.clear_buffer();

        TickSchedule::Immediate
    }

    fn populate_initial_food(&mut self) {
        let mut failures = 0;
        while self.foods.len() < self.settings.max_food_count && failures < INIT_FOOD_MAX_FAILURES {
            match FoodSpawner::try_spawn(
                self.settings.arena_size(),
                &self.snake,
                &self.foods,
                &mut self.rng,
            ) {
                Some(food) => {
                    self.foods.push(food);
                    failures = 0;
                }
                None => failures += 1,
            }
        }
        if failures >= INIT_FOOD_MAX_FAILURES {
            warn!(
                "gave up pre-populating food with {} of {} placed",
                self.foods.len(),
                self.settings.max_food_count
            );
        }
    }

    fn tick_playing(&mut self) -> TickSchedule {
        self.current_direction = self.decide_direction();
        self.move_snake();
        self.maybe_spawn_food();

        if self.check_is_dead() {
            self.phase = GamePhase::Dying;
            return TickSchedule::Immediate;
        }

        self.process_food_collision();
        self.tick_effects();
        TickSchedule::After(self.settings.tick_interval())
    }

    fn decide_direction(&mut self) -> Direction {
        let ctx = DirectionContext {
            current_direction: self.current_direction,
            head: self.snake.head(),
            arena: self.settings.arena_size(),
            wall_warp: self.settings.wall_warp,
        };
        self.input.resolve(ctx, &mut self.rng)
    }

    fn move_snake(&mut self) {
        self.snake.move_head(self.current_direction.offset());

        // An invincible player-controlled snake may fly off-grid unwrapped.
        let suppress_warp =
            self.effects.has(EffectKind::Invincibility) && self.input.using_input();
        if self.settings.wall_warp && !suppress_warp {
            self.snake.warp_head(self.settings.arena_size());
        }
    }

    fn maybe_spawn_food(&mut self) {
        let arena = self.settings.arena_size();
        let cells = (arena.x as usize) * (arena.y as usize);
        let free_cells = cells.saturating_sub(self.foods.len() + self.snake.len());
        let food_limit = self.settings.max_food_count.min(free_cells);
        if food_limit > self.foods.len()
            && let Some(food) =
                FoodSpawner::try_spawn(arena, &self.snake, &self.foods, &mut self.rng)
        {
            self.foods.push(food);
        }
    }

    /// Lethal cells are the interior body, the tail (checked separately so a
    /// length-2 snake still dies on its own tail) and danger food; leaving a
    /// bounded arena is equally lethal. Invincibility overrides everything.
    fn check_is_dead(&self) -> bool {
        if self.effects.has(EffectKind::Invincibility) {
            return false;
        }

        let head = self.snake.head();
        let hits_body = self.snake.body_only().any(|segment| segment == head);
        let hits_tail = self.snake.tail().is_some_and(|tail| tail == head);
        let hits_danger = self
            .foods
            .iter()
            .any(|food| food.kind == FoodKind::Danger && food.position == head);
        let out_of_arena = !in_bounds(head, self.settings.arena_size());

        hits_body || hits_tail || hits_danger || out_of_arena
    }

    fn process_food_collision(&mut self) {
        let head = self.snake.head();
        let mut index = 0;
        while index < self.foods.len() {
            if self.foods[index].position == head {
                let food = self.foods.swap_remove(index);
                self.eat_food(food);
            } else {
                index += 1;
            }
        }
    }

    fn eat_food(&mut self, food: Food) {
        match food.kind {
            FoodKind::Rainbow => self
                .effects
                .apply(EffectKind::Invincibility, RAINBOW_INVINCIBILITY_TICKS),
            FoodKind::Umami => self
                .effects
                .apply(EffectKind::NotGrowing, UMAMI_NOT_GROWING_TICKS),
            FoodKind::Rejuvenation => self
                .effects
                .apply(EffectKind::Rejuvenation, REJUVENATION_TICKS),
            _ => {}
        }

        self.score += food.score;

        let mut growth = food.growth;
        if self.effects.has(EffectKind::Rejuvenation) {
            // Eating while rejuvenated feeds a compounding shrink.
            self.effects
                .apply(EffectKind::Shrinking, growth.abs() * 2);
        }
        if self.effects.has(EffectKind::NotGrowing) {
            growth = 0;
        }
        self.snake.increase_body(growth);

        log!(
            "ate {:?} food at ({}, {}), score {}",
            food.kind,
            food.position.x,
            food.position.y,
            self.score
        );
    }

    fn tick_effects(&mut self) {
        if self.effects.has(EffectKind::Shrinking) {
            self.snake.decrease_body(1);
        }
        if (self.effects.has(EffectKind::Shrinking) || self.effects.has(EffectKind::Rejuvenation))
            && self.snake.len() <= 1
        {
            // Stop the shrink spiral before the snake vanishes.
            self.effects.set_duration(EffectKind::Rejuvenation, 0);
            self.effects.set_duration(EffectKind::Shrinking, 0);
        }
        self.effects.count_down();
    }

    fn tick_dying(&mut self) -> TickSchedule {
        self.phase = GamePhase::Dead;
        TickSchedule::Immediate
    }

    fn tick_dead(&mut self) -> TickSchedule {
        self.phase = GamePhase::PostDead;
        TickSchedule::After(self.settings.death_pause())
    }

    fn tick_post_dead(&mut self) -> TickSchedule {
        self.best_score = self.best_score.max(self.score);
        self.largest_snake_size = self.largest_snake_size.max(self.snake.len());
        self.death_count += 1;
        self.phase = GamePhase::Initializing;
        TickSchedule::Immediate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_game(settings: GameSettings) -> Game {
        let mut game = Game::new(settings, SessionRng::new(1));
        assert_eq!(game.advance_tick(), TickSchedule::Immediate);
        assert_eq!(game.phase(), GamePhase::Playing);
        game
    }

    fn player_settings() -> GameSettings {
        GameSettings {
            player_controlled: true,
            ..GameSettings::default()
        }
    }

    #[test]
    fn test_init_centers_snake_and_starts_playing() {
        let game = playing_game(GameSettings::default());
        let body: Vec<Vec2> = game.snake().entire_body().collect();
        assert_eq!(body, vec![Vec2::new(8, 8); 3]);
        assert_eq!(game.current_direction(), Direction::Up);
        assert_eq!(game.tick_count(), 1);
    }

    #[test]
    fn test_wide_arena_starts_heading_left() {
        let settings = GameSettings {
            arena_width: 32,
            ..GameSettings::default()
        };
        let game = playing_game(settings);
        assert_eq!(game.current_direction(), Direction::Left);
    }

    #[test]
    fn test_init_prepopulates_food_up_to_max() {
        let settings = GameSettings {
            init_food_on_init: true,
            ..GameSettings::default()
        };
        let game = playing_game(settings);
        assert_eq!(game.foods().len(), 8);
    }

    #[test]
    fn test_tick_count_increments_once_per_advance() {
        let mut game = Game::new(GameSettings::default(), SessionRng::new(5));
        for expected in 1..=10 {
            game.advance_tick();
            assert_eq!(game.tick_count(), expected);
        }
    }

    #[test]
    fn test_playing_tick_moves_head_and_shifts_body() {
        let mut game = playing_game(player_settings());
        game.advance_tick();
        let body: Vec<Vec2> = game.snake().entire_body().collect();
        // Head went Up from center; the rest stacked behind it.
        assert_eq!(body[0], Vec2::new(8, 7));
        assert_eq!(body[1], Vec2::new(8, 8));
        assert_eq!(body[2], Vec2::new(8, 8));
    }

    #[test]
    fn test_spawns_food_below_the_cap() {
        let mut game = playing_game(GameSettings::default());
        assert!(game.foods().is_empty());
        game.maybe_spawn_food();
        assert_eq!(game.foods().len(), 1);
    }

    #[test]
    fn test_never_spawns_beyond_free_cells() {
        let settings = GameSettings {
            arena_width: 4,
            arena_height: 4,
            initial_snake_size: 1,
            ..GameSettings::default()
        };
        let mut game = playing_game(settings);
        for x in 0..4 {
            for y in 0..3 {
                game.foods.push(Food::new(Vec2::new(x, y), FoodKind::Common));
            }
        }
        // 16 cells, 12 foods, snake of 1: the count already exceeds both
        // the cap and the free-cell bound, so nothing more may spawn.
        let before = game.foods.len();
        game.maybe_spawn_food();
        assert_eq!(game.foods.len(), before);
    }

    /// One far-away food with `max_food_count: 1` keeps the opportunistic
    /// spawner quiet for the whole test.
    fn plug_spawner(game: &mut Game, position: Vec2) {
        game.settings.max_food_count = 1;
        game.foods.push(Food::new(position, FoodKind::Common));
    }

    #[test]
    fn test_leaving_bounded_arena_dies() {
        let settings = GameSettings {
            arena_width: 4,
            arena_height: 4,
            wall_warp: false,
            initial_snake_size: 1,
            player_controlled: true,
            ..GameSettings::default()
        };
        let mut game = playing_game(settings);
        plug_spawner(&mut game, Vec2::new(3, 3));
        game.submit_input(Direction::Left, Instant::now());

        // Head starts at (2, 2); three steps Left put it at x = -1.
        game.advance_tick();
        game.advance_tick();
        assert_eq!(game.phase(), GamePhase::Playing);
        let schedule = game.advance_tick();
        assert_eq!(game.phase(), GamePhase::Dying);
        assert_eq!(schedule, TickSchedule::Immediate);
    }

    #[test]
    fn test_wall_warp_wraps_instead_of_dying() {
        let settings = GameSettings {
            arena_width: 4,
            arena_height: 4,
            wall_warp: true,
            initial_snake_size: 1,
            player_controlled: true,
            ..GameSettings::default()
        };
        let mut game = playing_game(settings);
        plug_spawner(&mut game, Vec2::new(3, 3));
        game.submit_input(Direction::Left, Instant::now());
        for _ in 0..3 {
            game.advance_tick();
        }
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.snake().head(), Vec2::new(3, 2));
    }

    #[test]
    fn test_invincible_player_skips_wall_warp() {
        let settings = GameSettings {
            arena_width: 4,
            arena_height: 4,
            wall_warp: true,
            initial_snake_size: 1,
            player_controlled: true,
            ..GameSettings::default()
        };
        let mut game = playing_game(settings);
        game.effects.apply(EffectKind::Invincibility, 100);
        game.submit_input(Direction::Left, Instant::now());
        for _ in 0..3 {
            game.advance_tick();
        }
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.snake().head(), Vec2::new(-1, 2));
    }

    #[test]
    fn test_danger_food_kills_on_contact() {
        let mut game = playing_game(player_settings());
        game.foods.push(Food::new(Vec2::new(8, 7), FoodKind::Danger));
        game.advance_tick();
        assert_eq!(game.phase(), GamePhase::Dying);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_invincibility_overrides_death() {
        let mut game = playing_game(player_settings());
        game.foods.push(Food::new(Vec2::new(8, 7), FoodKind::Danger));
        game.effects.apply(EffectKind::Invincibility, 50);
        game.advance_tick();
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_tail_collision_kills() {
        let mut game = playing_game(player_settings());
        // Straight column (5,5),(5,6),(5,7) heading Down; one step lands the
        // head on the cell the tail shifts into.
        game.snake = Snake::new(Vec2::new(5, 7));
        game.snake.increase_body(2);
        game.snake.move_head(Vec2::new(0, -1));
        game.snake.move_head(Vec2::new(0, -1));
        game.current_direction = Direction::Down;
        game.advance_tick();
        assert_eq!(game.phase(), GamePhase::Dying);
    }

    #[test]
    fn test_eating_common_food_grows_and_scores() {
        let mut game = playing_game(player_settings());
        game.foods.push(Food::new(Vec2::new(8, 7), FoodKind::Common));
        game.advance_tick();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.score(), 1);
        assert_eq!(game.snake().len(), 4);
        assert!(game.foods().iter().all(|f| f.position != Vec2::new(8, 7)));
    }

    #[test]
    fn test_not_growing_blocks_growth_but_not_score() {
        let mut game = playing_game(player_settings());
        game.effects.apply(EffectKind::NotGrowing, 300);
        game.foods.push(Food::new(Vec2::new(8, 7), FoodKind::Golden));
        game.advance_tick();
        assert_eq!(game.score(), 10);
        assert_eq!(game.snake().len(), 3);
    }

    #[test]
    fn test_eating_while_rejuvenated_compounds_shrinking() {
        let mut game = playing_game(player_settings());
        game.effects.apply(EffectKind::Rejuvenation, 150);
        game.foods.push(Food::new(Vec2::new(8, 7), FoodKind::Common));
        game.advance_tick();
        // Growth 1 applied, then the shrink from the fresh Shrinking effect.
        assert_eq!(game.snake().len(), 3);
        assert_eq!(game.effect_duration(EffectKind::Shrinking), 1);
    }

    #[test]
    fn test_shrink_spiral_stops_at_length_one() {
        let settings = GameSettings {
            initial_snake_size: 1,
            player_controlled: true,
            ..GameSettings::default()
        };
        let mut game = playing_game(settings);
        game.effects.apply(EffectKind::Shrinking, 40);
        game.effects.apply(EffectKind::Rejuvenation, 40);
        game.advance_tick();
        assert_eq!(game.snake().len(), 1);
        assert!(!game.effects.has(EffectKind::Shrinking));
        assert!(!game.effects.has(EffectKind::Rejuvenation));
        assert_eq!(game.effect_duration(EffectKind::Shrinking), -1);
    }

    #[test]
    fn test_death_tick_skips_effect_countdown() {
        let mut game = playing_game(player_settings());
        game.effects.apply(EffectKind::NotGrowing, 10);
        game.foods.push(Food::new(Vec2::new(8, 7), FoodKind::Danger));
        game.advance_tick();
        assert_eq!(game.phase(), GamePhase::Dying);
        assert_eq!(game.effect_duration(EffectKind::NotGrowing), 10);
    }

    #[test]
    fn test_death_cycle_bookkeeping() {
        let mut game = playing_game(player_settings());
        game.score = 7;
        game.phase = GamePhase::Dying;

        assert_eq!(game.advance_tick(), TickSchedule::Immediate);
        assert_eq!(game.phase(), GamePhase::Dead);

        assert_eq!(
            game.advance_tick(),
            TickSchedule::After(Duration::from_millis(5000))
        );
        assert_eq!(game.phase(), GamePhase::PostDead);

        assert_eq!(game.advance_tick(), TickSchedule::Immediate);
        assert_eq!(game.phase(), GamePhase::Initializing);
        assert_eq!(game.best_score(), 7);
        assert_eq!(game.death_count(), 1);
        assert_eq!(game.largest_snake_size(), 3);

        // The next round starts fresh.
        game.advance_tick();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_update_settings_arena_change_restarts() {
        let mut game = playing_game(GameSettings::default());
        let mut settings = game.settings().clone();
        settings.arena_width = 24;
        game.update_settings(settings);
        assert_eq!(game.phase(), GamePhase::Initializing);
    }

    #[test]
    fn test_update_settings_keeps_phase_otherwise() {
        let mut game = playing_game(GameSettings::default());
        let mut settings = game.settings().clone();
        settings.max_food_count = 2;
        game.update_settings(settings);
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = playing_game(GameSettings::default());
        game.advance_tick();
        let snapshot = game.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert_eq!(snapshot.tick_count, 2);
        assert_eq!(snapshot.snake_body.len(), 3);
        assert_eq!(snapshot.arena_size, Vec2::new(16, 16));
        assert_eq!(snapshot.effects.len(), EffectKind::COUNT);
    }
}
