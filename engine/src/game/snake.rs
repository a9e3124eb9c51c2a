use std::collections::VecDeque;

use super::geometry::Vec2;

/// Ordered body of grid positions. The front of the queue is the head, the
/// back is the tail; a snake never has fewer than one segment.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Vec2>,
}

impl Snake {
    pub fn new(initial_position: Vec2) -> Self {
        Self {
            body: VecDeque::from([initial_position]),
        }
    }

    pub fn head(&self) -> Vec2 {
        *self.body.front().expect("snake body is never empty")
    }

    /// The last segment, or `None` when the snake is a single segment and
    /// head and tail are the same cell.
    pub fn tail(&self) -> Option<Vec2> {
        if self.body.len() > 1 {
            self.body.back().copied()
        } else {
            None
        }
    }

    /// Segments strictly between head and tail.
    pub fn body_only(&self) -> impl Iterator<Item = Vec2> + '_ {
        let interior = self.body.len().saturating_sub(2);
        self.body.iter().skip(1).take(interior).copied()
    }

    pub fn entire_body(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Shift every segment to its predecessor's cell, then place the head
    /// one `offset` further. A queue rotation, not a full recompute.
    pub fn move_head(&mut self, offset: Vec2) {
        let new_head = self.head() + offset;
        self.body.push_front(new_head);
        self.body.pop_back();
    }

    /// Wrap the head back into `[0, bounds)` on both axes.
    pub fn warp_head(&mut self, bounds: Vec2) {
        let head = self.head();
        self.body[0] = Vec2::new(wrap_coord(head.x, bounds.x), wrap_coord(head.y, bounds.y));
    }

    /// Append `count` segments stacked on the current tail cell (head cell
    /// for a length-1 snake), one at a time.
    pub fn increase_body(&mut self, count: i32) {
        if count < 0 {
            self.decrease_body(-count);
            return;
        }
        for _ in 0..count {
            let spawn = self.tail().unwrap_or_else(|| self.head());
            self.body.push_back(spawn);
        }
    }

    /// Drop up to `count` segments from the tail end, never going below a
    /// single segment.
    pub fn decrease_body(&mut self, count: i32) {
        if count < 0 {
            self.increase_body(-count);
            return;
        }
        for _ in 0..count {
            if self.body.len() <= 1 {
                break;
            }
            self.body.pop_back();
        }
    }
}

fn wrap_coord(coord: i32, bound: i32) -> i32 {
    if coord >= 0 {
        coord % bound
    } else {
        bound - (coord % -bound).abs()
    }
}
