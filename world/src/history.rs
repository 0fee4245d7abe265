//! Undo history made of whole-state snapshots.

use wormhole_snake_core::{FoodSnapshot, SnakeSnapshot};

/// Copy of everything a move can change, captured before the move runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Snake segments, heading, and remembered tail.
    pub snake: SnakeSnapshot,
    /// Every food item present at capture time.
    pub food: Vec<FoodSnapshot>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct History {
    snapshots: Vec<GameSnapshot>,
}

impl History {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, snapshot: GameSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Drops the most recent snapshot after a move turned out to change nothing.
    pub(crate) fn discard_latest(&mut self) {
        let _ = self.snapshots.pop();
    }

    pub(crate) fn pop(&mut self) -> Option<GameSnapshot> {
        self.snapshots.pop()
    }

    pub(crate) fn latest(&self) -> Option<&GameSnapshot> {
        self.snapshots.last()
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub(crate) fn clear(&mut self) {
        self.snapshots.clear();
    }
}
