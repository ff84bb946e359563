use std::collections::VecDeque;

use crate::motion::Position;

pub const TRAIL_LEN: usize = 150;

const OLDEST_ALPHA: f64 = 0.3;

/// The most recent positions of the marker, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<Position>,
}

impl Trail {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(TRAIL_LEN + 1),
        }
    }

    pub fn push(&mut self, p: Position) {
        self.points.push_back(p);
        while self.points.len() > TRAIL_LEN {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.points.iter()
    }

    /// Points paired with their opacity, fading from 0.3 for the oldest
    /// toward 1.0 for the newest.
    pub fn faded(&self) -> impl Iterator<Item = (Position, f64)> + '_ {
        let len = self.points.len() as f64;
        self.points
            .iter()
            .enumerate()
            .map(move |(i, p)| (*p, OLDEST_ALPHA + (i as f64 / len) * (1.0 - OLDEST_ALPHA)))
    }
}
