use crate::warn;

use super::geometry::Vec2;
use super::session_rng::RngSource;
use super::snake::Snake;
use super::types::FoodKind;

#[derive(Clone, Debug)]
pub struct Food {
    pub position: Vec2,
    pub kind: FoodKind,
    pub score: u32,
    pub growth: i32,
}

impl Food {
    pub fn new(position: Vec2, kind: FoodKind) -> Self {
        let (score, growth) = match kind {
            FoodKind::Common => (1, 1),
            FoodKind::Golden => (10, 10),
            FoodKind::Rainbow => (1, 1),
            FoodKind::Umami => (3, 3),
            FoodKind::Rejuvenation => (5, 0),
            FoodKind::Danger => (0, 0),
        };
        Self {
            position,
            kind,
            score,
            growth,
        }
    }
}

const DANGER_CHANCE: f64 = 1.0 / 10_000.0;
const RAINBOW_CHANCE: f64 = 1.0 / 3_000.0;
const UMAMI_CHANCE: f64 = 1.0 / 1_000.0;
const REJUVENATION_CHANCE: f64 = 1.0 / 500.0;
const GOLDEN_CHANCE: f64 = 1.0 / 200.0;

const SPAWN_ATTEMPTS: u32 = 100;

pub struct FoodSpawner;

impl FoodSpawner {
    /// Each tier rolls against its own fixed chance, in order; the first
    /// success wins and remaining tiers are never rolled. The draws are
    /// independent, so reordering the checks would change the effective
    /// rate of every tier.
    pub fn pick_kind(rng: &mut dyn RngSource) -> FoodKind {
        if rng.next_f64() < DANGER_CHANCE {
            return FoodKind::Danger;
        }
        if rng.next_f64() < RAINBOW_CHANCE {
            return FoodKind::Rainbow;
        }
        if rng.next_f64() < UMAMI_CHANCE {
            return FoodKind::Umami;
        }
        if rng.next_f64() < REJUVENATION_CHANCE {
            return FoodKind::Rejuvenation;
        }
        if rng.next_f64() < GOLDEN_CHANCE {
            return FoodKind::Golden;
        }
        FoodKind::Common
    }

    /// Rejection-sample a free cell: up to 100 uniform draws, rejecting any
    /// cell occupied by a snake segment or existing food. Exhaustion is
    /// non-fatal; the caller just gets no food this attempt.
    pub fn try_spawn(
        arena: Vec2,
        snake: &Snake,
        foods: &[Food],
        rng: &mut dyn RngSource,
    ) -> Option<Food> {
        for _ in 0..SPAWN_ATTEMPTS {
            let candidate = Vec2::new(
                rng.next_index(arena.x as usize) as i32,
                rng.next_index(arena.y as usize) as i32,
            );

            let occupied = snake.entire_body().any(|segment| segment == candidate)
                || foods.iter().any(|food| food.position == candidate);
            if !occupied {
                return Some(Food::new(candidate, Self::pick_kind(rng)));
            }
        }

        warn!(
            "failed to spawn food: no free cell in {} attempts",
            SPAWN_ATTEMPTS
        );
        None
    }
}
