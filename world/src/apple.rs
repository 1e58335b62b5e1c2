//! Food placement.

use std::collections::HashSet;

use danger_noodle_core::{GridPosition, GridSize};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Apple {
    position: GridPosition,
}

impl Apple {
    pub(crate) const fn at(position: GridPosition) -> Self {
        Self { position }
    }

    /// Draws uniformly random cells until one lies outside `occupied`.
    ///
    /// Never returns when `occupied` covers the whole grid; callers keep at
    /// least one cell free.
    pub(crate) fn spawn<R>(rng: &mut R, occupied: &HashSet<GridPosition>, grid: GridSize) -> Self
    where
        R: Rng + ?Sized,
    {
        loop {
            let candidate = GridPosition::new(
                rng.gen_range(0..grid.width()),
                rng.gen_range(0..grid.height()),
            );
            if !occupied.contains(&candidate) {
                return Self::at(candidate);
            }
        }
    }

    pub(crate) const fn position(&self) -> GridPosition {
        self.position
    }
}
