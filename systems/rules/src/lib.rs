#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure win and loss predicates evaluated after every committed change.

use wormhole_snake_core::{Cell, LevelStatus};

/// Exit of the level together with its activation flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Wormhole {
    cell: Cell,
    active: bool,
}

impl Wormhole {
    /// Creates a closed wormhole at the provided cell.
    #[must_use]
    pub const fn closed(cell: Cell) -> Self {
        Self {
            cell,
            active: false,
        }
    }

    /// Cell hosting the wormhole.
    #[must_use]
    pub const fn cell(&self) -> Cell {
        self.cell
    }

    /// Reports whether the wormhole accepts the snake.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Opens the wormhole once no food remains. Returns `true` when this call
    /// opened it.
    pub fn refresh(&mut self, remaining_food: usize) -> bool {
        if self.active || remaining_food > 0 {
            return false;
        }
        self.active = true;
        true
    }

    /// Recomputes the flag from scratch, closing the wormhole if food came back.
    pub fn reset(&mut self, remaining_food: usize) {
        self.active = remaining_food == 0;
    }
}

/// Reports whether every segment sits on a pit. A snake without segments is
/// never considered fallen.
#[must_use]
pub fn all_segments_on_pit<F>(segments: &[Cell], is_pit: F) -> bool
where
    F: Fn(Cell) -> bool,
{
    !segments.is_empty() && segments.iter().all(|segment| is_pit(*segment))
}

/// Reports whether the head rests on the wormhole while it is open.
#[must_use]
pub fn head_at_active_wormhole(segments: &[Cell], wormhole: &Wormhole) -> bool {
    wormhole.is_active() && segments.first() == Some(&wormhole.cell())
}

/// Derives the status that follows a committed change.
///
/// Terminal statuses never change here. Reaching the open wormhole wins even
/// when the wormhole itself sits above a pit.
#[must_use]
pub fn evaluate<F>(current: LevelStatus, segments: &[Cell], wormhole: &Wormhole, is_pit: F) -> LevelStatus
where
    F: Fn(Cell) -> bool,
{
    if current.is_terminal() {
        return current;
    }
    if head_at_active_wormhole(segments, wormhole) {
        LevelStatus::Won
    } else if all_segments_on_pit(segments, is_pit) {
        LevelStatus::Lost
    } else {
        LevelStatus::Playing
    }
}
