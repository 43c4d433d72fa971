use std::collections::VecDeque;

use crate::Coords;
use Direction::*;
use MoveResult::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfHit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Coords, old_tail: Option<Coords> },
    Crashed(Collision)
}

/// The player's snake. `body[0]` is the head.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Coords>,
    direction: Direction,
    queued: Direction,
    score: u32,
    pending_growth: u32,
    bounds: (i32, i32),
}

impl Snake {
    /// Lays `size` segments out behind `head`, all facing `direction`.
    pub fn new(head: Coords, size: usize, direction: Direction, bounds: (i32, i32)) -> Self {
        let (dx, dy) = direction.delta();

        let body = (0..size as i32)
            .map(|i| (head.0 - dx * i, head.1 - dy * i))
            .collect();
        Snake { body, direction, queued: direction, score: 0, pending_growth: 0, bounds }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn queued_direction(&self) -> Direction {
        self.queued
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    /// One movement tick. On a crash the body is left untouched.
    pub fn advance(&mut self) -> MoveResult {
        self.direction = self.queued;

        let (dx, dy) = self.direction.delta();
        let old_head = self.head();
        let new_head = (old_head.0 + dx, old_head.1 + dy);

        let (w, h) = self.bounds;
        if new_head.0 < 0 || new_head.1 < 0 || new_head.0 >= w || new_head.1 >= h {
            return Crashed(Collision::Wall);
        }

        // The tail still counts: it has not moved out of the way yet
        if self.body.contains(&new_head) {
            return Crashed(Collision::SelfHit);
        }

        self.body.push_front(new_head);

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
            Moved { new_head, old_tail: None }
        } else {
            Moved { new_head, old_tail: self.body.pop_back() }
        }
    }

    /// Queues a turn for the next tick. Reversing onto the active direction
    /// is refused; returns whether the request was taken.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }

        self.queued = new_direction;
        true
    }

    pub fn eat(&mut self, reward: u32) {
        self.score += reward;
        self.pending_growth += 1;
    }
}
