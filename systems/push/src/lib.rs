#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure push resolution for Wormhole Snake.
//!
//! The planners in this crate never mutate anything. They inspect a
//! [`PushField`] describing the committed board state and return the complete
//! set of displacements a push would cause, or the obstacle that blocks it.
//! The world commits a returned plan atomically, so a blocked push leaves no
//! partial movement behind.

use std::collections::BTreeSet;

use wormhole_snake_core::{Cell, Direction, FoodId};

/// Read-only view of the state a push is resolved against.
pub trait PushField {
    /// Reports whether the cell holds a wall.
    fn is_wall(&self, cell: Cell) -> bool;

    /// Reports whether the cell swallows food pushed into it.
    fn is_pit(&self, cell: Cell) -> bool;

    /// Returns the food item occupying the cell, if any.
    fn food_at(&self, cell: Cell) -> Option<FoodId>;

    /// Reports whether a snake segment occupies the cell.
    fn is_snake(&self, cell: Cell) -> bool;
}

/// Single food movement produced by a plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Displacement {
    /// The item slides onto solid floor.
    Slide {
        /// Item being moved.
        food: FoodId,
        /// Cell the item leaves.
        from: Cell,
        /// Cell the item enters.
        to: Cell,
    },
    /// The item slides into a pit and is destroyed.
    Drop {
        /// Item being destroyed.
        food: FoodId,
        /// Cell the item leaves.
        from: Cell,
        /// Pit cell that swallows the item.
        pit: Cell,
    },
}

impl Displacement {
    /// Item affected by the displacement.
    #[must_use]
    pub const fn food(&self) -> FoodId {
        match self {
            Self::Slide { food, .. } | Self::Drop { food, .. } => *food,
        }
    }

    /// Cell the item leaves.
    #[must_use]
    pub const fn from(&self) -> Cell {
        match self {
            Self::Slide { from, .. } | Self::Drop { from, .. } => *from,
        }
    }
}

/// Cell that stopped a push.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blocked {
    /// Wall or snake cell that could not be entered.
    pub obstacle: Cell,
}

/// Plans the chained push started when the snake head walks into `front`.
///
/// Every item lined up behind `front` in `direction` moves one cell. The chain
/// fails as a whole if the cell after the last item is a wall or part of the
/// snake. Items entering a pit are dropped. Displacements are ordered from the
/// far end of the chain back toward the head so they can be committed one by
/// one without two items sharing a cell.
pub fn plan_chain<F>(field: &F, front: Cell, direction: Direction) -> Result<Vec<Displacement>, Blocked>
where
    F: PushField + ?Sized,
{
    let mut links: Vec<(FoodId, Cell)> = Vec::new();
    let mut cursor = front;

    while let Some(food) = field.food_at(cursor) {
        links.push((food, cursor));
        let next = cursor.step(direction);
        if field.is_wall(next) || field.is_snake(next) {
            return Err(Blocked { obstacle: next });
        }
        cursor = next;
    }

    Ok(links
        .into_iter()
        .rev()
        .map(|(food, from)| displacement(field, food, from, direction))
        .collect())
}

/// Outcome of planning one rainbow step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RainbowStep {
    /// The snake and the food in its way can shift together.
    Shift(RainbowShift),
    /// Something in the moving set would enter a wall; nothing moves.
    Blocked(Blocked),
}

/// Complete effect of one committed rainbow step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RainbowShift {
    /// Direction every moving cell travels.
    pub direction: Direction,
    /// Snake segments after the shift, head first.
    pub segments: Vec<Cell>,
    /// Food movements caused by the shift, ordered by identifier.
    pub displacements: Vec<Displacement>,
}

/// Plans one atomic rainbow step for the snake occupying `segments`.
///
/// The moving set is every snake segment plus every item lined up in front of
/// any segment along `direction`. If any member of that set would enter a wall
/// the step is blocked. An empty snake is reported as blocked at the origin so
/// the cascade settles immediately.
#[must_use]
pub fn plan_rainbow_step<F>(field: &F, segments: &[Cell], direction: Direction) -> RainbowStep
where
    F: PushField + ?Sized,
{
    if segments.is_empty() {
        return RainbowStep::Blocked(Blocked {
            obstacle: Cell::new(0, 0),
        });
    }

    let mut carried: BTreeSet<(FoodId, Cell)> = BTreeSet::new();
    for segment in segments {
        let destination = segment.step(direction);
        if field.is_wall(destination) {
            return RainbowStep::Blocked(Blocked {
                obstacle: destination,
            });
        }

        let mut cursor = destination;
        while let Some(food) = field.food_at(cursor) {
            if !carried.insert((food, cursor)) {
                break;
            }
            let next = cursor.step(direction);
            if field.is_wall(next) {
                return RainbowStep::Blocked(Blocked { obstacle: next });
            }
            cursor = next;
        }
    }

    RainbowStep::Shift(RainbowShift {
        direction,
        segments: segments.iter().map(|cell| cell.step(direction)).collect(),
        displacements: carried
            .into_iter()
            .map(|(food, from)| displacement(field, food, from, direction))
            .collect(),
    })
}

fn displacement<F>(field: &F, food: FoodId, from: Cell, direction: Direction) -> Displacement
where
    F: PushField + ?Sized,
{
    let to = from.step(direction);
    if field.is_pit(to) {
        Displacement::Drop { food, from, pit: to }
    } else {
        Displacement::Slide { food, from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl PushField for Empty {
        fn is_wall(&self, _cell: Cell) -> bool {
            false
        }

        fn is_pit(&self, _cell: Cell) -> bool {
            false
        }

        fn food_at(&self, _cell: Cell) -> Option<FoodId> {
            None
        }

        fn is_snake(&self, _cell: Cell) -> bool {
            false
        }
    }

    #[test]
    fn chain_without_food_is_trivially_clear() {
        let plan = plan_chain(&Empty, Cell::new(1, 1), Direction::Up);
        assert_eq!(plan, Ok(Vec::new()));
    }

    #[test]
    fn empty_snake_settles_rainbow_immediately() {
        let step = plan_rainbow_step(&Empty, &[], Direction::Left);
        assert!(matches!(step, RainbowStep::Blocked(_)));
    }

    #[test]
    fn displacement_accessors_cover_both_variants() {
        let slide = Displacement::Slide {
            food: FoodId::new(1),
            from: Cell::new(0, 0),
            to: Cell::new(0, 1),
        };
        let drop = Displacement::Drop {
            food: FoodId::new(2),
            from: Cell::new(3, 3),
            pit: Cell::new(3, 4),
        };
        assert_eq!(slide.food(), FoodId::new(1));
        assert_eq!(drop.from(), Cell::new(3, 3));
    }
}
