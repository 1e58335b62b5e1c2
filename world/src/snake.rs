//! Segmented body steered across the board.

use std::collections::{HashSet, VecDeque};

use danger_noodle_core::{DeathCause, Direction, GridPosition, GridSize, SnakeSnapshot};
use glam::IVec2;

#[derive(Clone, Debug)]
pub(crate) struct Snake {
    body: VecDeque<GridPosition>,
    heading: Direction,
    unwrapped_head: IVec2,
    direction_locked: bool,
    last_tail: Option<GridPosition>,
    death: Option<DeathCause>,
}

impl Snake {
    /// Lays the snake out from the board centre, trailing away from its heading.
    pub(crate) fn spawn(grid: GridSize, length: u32, heading: Direction) -> Self {
        let head = grid.center().to_ivec2();
        let delta = heading.delta();
        let body = (0..length.max(1))
            .map(|index| {
                let offset = i32::try_from(index).unwrap_or(i32::MAX);
                grid.wrap(head - delta * offset)
            })
            .collect();

        Self {
            body,
            heading,
            unwrapped_head: head,
            direction_locked: false,
            last_tail: None,
            death: None,
        }
    }

    pub(crate) fn head(&self) -> GridPosition {
        // The body always holds at least one segment.
        self.body[0]
    }

    pub(crate) fn unwrapped_head(&self) -> IVec2 {
        self.unwrapped_head
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.death.is_none()
    }

    pub(crate) fn occupied(&self) -> HashSet<GridPosition> {
        self.body.iter().copied().collect()
    }

    /// Moves the head one cell along the heading and drops the tail.
    ///
    /// The dropped tail is retained until the next move so [`Snake::eat`] can
    /// restore it.
    pub(crate) fn advance(&mut self, grid: GridSize) {
        let next = self.head().to_ivec2() + self.heading.delta();
        self.last_tail = self.body.pop_back();
        self.unwrapped_head = next;
        self.body.push_front(grid.wrap(next));
    }

    pub(crate) fn eat(&mut self) {
        if let Some(tail) = self.last_tail.take() {
            self.body.push_back(tail);
        }
    }

    /// Applies a heading change unless one was already accepted this tick.
    ///
    /// Returns `true` when the heading changed. Reversals and repeats of the
    /// current heading are ignored.
    pub(crate) fn steer(&mut self, direction: Direction) -> bool {
        if self.direction_locked {
            return false;
        }

        if direction == self.heading || direction == self.heading.opposite() {
            return false;
        }

        self.heading = direction;
        self.direction_locked = true;
        true
    }

    pub(crate) fn release_lock(&mut self) {
        self.direction_locked = false;
    }

    pub(crate) fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    pub(crate) fn die(&mut self, cause: DeathCause) {
        self.death = Some(cause);
    }

    pub(crate) fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            body: self.body.iter().copied().collect(),
            heading: self.heading,
            unwrapped_head: self.unwrapped_head,
            direction_locked: self.direction_locked,
            death: self.death,
        }
    }
}
