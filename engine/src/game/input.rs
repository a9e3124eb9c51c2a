use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::warn;

use super::geometry::{Vec2, in_bounds};
use super::session_rng::RngSource;
use super::types::Direction;

#[derive(Clone, Copy, Debug)]
pub struct InputEvent {
    pub direction: Direction,
    pub timestamp: Instant,
}

/// What the per-tick direction decision needs to know about the rest of the
/// game.
#[derive(Clone, Copy, Debug)]
pub struct DirectionContext {
    pub current_direction: Direction,
    pub head: Vec2,
    pub arena: Vec2,
    pub wall_warp: bool,
}

/// Buffers player intents and, when the player is not in control, runs the
/// random-walk policy that keeps the snake wandering on its own.
pub struct InputController {
    buffer: VecDeque<InputEvent>,
    using_input: bool,
    last_resolved: Direction,
    commit_ticks: i32,
}

impl InputController {
    pub fn new(using_input: bool) -> Self {
        Self {
            buffer: VecDeque::new(),
            using_input,
            last_resolved: Direction::Up,
            commit_ticks: 0,
        }
    }

    pub fn using_input(&self) -> bool {
        self.using_input
    }

    /// Turning player control on drops any stale intents and re-seeds the
    /// last resolved direction from wherever the snake is currently heading.
    pub fn set_using_input(&mut self, enabled: bool, current_direction: Direction) {
        if !self.using_input && enabled {
            self.buffer.clear();
            self.last_resolved = current_direction;
        }
        self.using_input = enabled;
    }

    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    pub fn reset_commit(&mut self) {
        self.commit_ticks = 0;
    }

    /// Newest buffered intent, falling back to the last resolved direction.
    pub fn last_user_input(&self) -> Direction {
        self.buffer
            .back()
            .map(|event| event.direction)
            .unwrap_or(self.last_resolved)
    }

    /// Append an intent. Adjacent duplicates are dropped, and a buffer whose
    /// newest entry has sat unconsumed for a full tick interval is cleared
    /// first so stale intents never replay.
    pub fn submit(&mut self, direction: Direction, now: Instant, stale_after: Duration) {
        if let Some(last) = self.buffer.back().copied() {
            if last.direction == direction {
                return;
            }
            if now.duration_since(last.timestamp) >= stale_after {
                self.buffer.clear();
            }
        }
        self.buffer.push_back(InputEvent {
            direction,
            timestamp: now,
        });
    }

    /// The direction to use this tick.
    pub fn resolve(&mut self, ctx: DirectionContext, rng: &mut dyn RngSource) -> Direction {
        if self.using_input {
            self.resolve_player(ctx.current_direction)
        } else {
            self.resolve_autonomous(ctx, rng)
        }
    }

    fn resolve_player(&mut self, current: Direction) -> Direction {
        if let Some(event) = self.buffer.pop_front() {
            self.last_resolved = event.direction;
        }
        if self.last_resolved.is_opposite(&current) {
            current
        } else {
            self.last_resolved
        }
    }

    fn resolve_autonomous(&mut self, ctx: DirectionContext, rng: &mut dyn RngSource) -> Direction {
        if self.commit_ticks > 0 {
            self.commit_ticks -= 1;
            return ctx.current_direction;
        }

        let legal = legal_turns(ctx);
        if legal.is_empty() {
            warn!("random walk has nowhere to go, keeping current direction");
            return ctx.current_direction;
        }

        let direction = legal[rng.next_index(legal.len())];
        self.commit_ticks = if ctx.wall_warp {
            let extent = match direction {
                Direction::Up | Direction::Down => ctx.arena.y,
                Direction::Left | Direction::Right => ctx.arena.x,
            };
            (rng.next_f64() * extent as f64).floor() as i32
        } else {
            let max_safe = match direction {
                Direction::Up => ctx.head.y - 1,
                Direction::Down => ctx.arena.y - ctx.head.y - 2,
                Direction::Left => ctx.head.x - 1,
                Direction::Right => ctx.arena.x - ctx.head.x - 2,
            };
            (rng.next_f64() * max_safe as f64 * 1.25).min(max_safe as f64).floor() as i32
        };

        direction
    }
}

/// Directions the random walk may take: never a reversal, and never a step
/// straight off the arena when wall warping is off.
fn legal_turns(ctx: DirectionContext) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|direction| {
            if direction.is_opposite(&ctx.current_direction) {
                return false;
            }
            if !ctx.wall_warp && !in_bounds(ctx.head + direction.offset(), ctx.arena) {
                return false;
            }
            true
        })
        .collect()
}
