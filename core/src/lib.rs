#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wormhole Snake engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the pure push and rules systems. Callers submit
//! [`Command`] values describing desired actions, the world executes them via
//! its `apply` entry point, and then reports every state change as an
//! [`Event`]. The session folds those events into [`MoveOutcome`] values so
//! presentation layers never need to poll for what happened.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Level data format revision understood by the engine.
pub const LEVEL_FORMAT_VERSION: u32 = 1;

/// Smallest snake a level may start with.
pub const MIN_SNAKE_LENGTH: u32 = 2;

/// Largest snake a level may start with.
pub const MAX_SNAKE_LENGTH: u32 = 10;

/// Location of a single grid cell. The origin sits in the bottom-left corner
/// and `y` grows upward.
///
/// Coordinates are signed because the snake and pushed food may leave the
/// recorded board, which the floor layer treats as a bottomless pit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row of the cell, counted upward from the bottom edge.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the neighbouring cell one step in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal headings available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Movement toward increasing `y`.
    Up,
    /// Movement toward decreasing `y`.
    Down,
    /// Movement toward decreasing `x`.
    Left,
    /// Movement toward increasing `x`.
    Right,
}

impl Direction {
    /// Every direction in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector associated with the direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Unique identifier assigned to a food item when a level is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FoodId(u32);

impl FoodId {
    /// Creates a new food identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Kinds of food that can be pushed around the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodKind {
    /// Grows the snake by one segment when eaten.
    Banana,
    /// Starts a rainbow push when eaten.
    RainbowPotion,
}

/// Progress of the active level. Once `Won` or `Lost` the status only
/// changes through undo, restart, or loading another level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelStatus {
    /// The level accepts directional input.
    #[default]
    Playing,
    /// The snake entered the open wormhole.
    Won,
    /// Every snake segment rests above a pit.
    Lost,
}

impl LevelStatus {
    /// Reports whether the status ends the level.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// What happens when the snake pushes a food chain that is blocked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockedPushRule {
    /// The head eats the front item of the blocked chain and moves into its cell.
    #[default]
    Eat,
    /// The move is refused and nothing changes.
    Refuse,
}

/// How the rainbow push cascade is driven after a potion is eaten.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RainbowMode {
    /// The session resolves every step before the move returns.
    #[default]
    Immediate,
    /// The cascade stays pending until the caller pulls each step.
    Stepped,
}

/// Gameplay switches attached to a level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Resolution applied when a pushed chain cannot move.
    pub blocked_push: BlockedPushRule,
    /// Whether rainbow steps resolve eagerly or on demand.
    pub rainbow: RainbowMode,
    /// Allows undo to leave the `Won` status. When set, the step into the
    /// wormhole is recorded so a single undo reverts only that step.
    pub undo_after_win: bool,
}

/// Initial placement of the snake inside a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeStart {
    /// Cell occupied by the head.
    pub head: Cell,
    /// Number of segments, including the head.
    pub length: u32,
    /// Heading at the start of the level. The body trails behind it.
    pub heading: Direction,
}

/// Placement of a single food item inside a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodPlacement {
    /// Type of the placed item.
    pub kind: FoodKind,
    /// Cell holding the item.
    pub cell: Cell,
}

/// Read-only description of a level as produced by an external loader.
///
/// Each layer is a list of row strings; row `0` is the bottom row. The floor
/// layer uses `F` for floor and anything else for a pit. The wall layer uses
/// `W` for a wall and anything else for open space. Rows may differ in length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
    /// Format revision of the level description.
    #[serde(default = "default_level_version")]
    pub version: u32,
    /// Human readable level name.
    #[serde(default)]
    pub name: String,
    /// Declared number of columns.
    pub width: u32,
    /// Declared number of rows.
    pub height: u32,
    /// Floor and pit rows.
    pub floor: Vec<String>,
    /// Wall rows.
    #[serde(default)]
    pub walls: Vec<String>,
    /// Initial snake placement.
    pub snake: SnakeStart,
    /// Food placements in load order.
    #[serde(default)]
    pub food: Vec<FoodPlacement>,
    /// Cell hosting the level exit.
    pub wormhole: Cell,
    /// Gameplay switches for the level.
    #[serde(default)]
    pub rules: Rules,
}

fn default_level_version() -> u32 {
    LEVEL_FORMAT_VERSION
}

/// Commands that express every permissible world action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the snake attempt a single step in the direction.
    Move {
        /// Heading requested by the player.
        direction: Direction,
    },
    /// Commits the next atomic step of a pending rainbow push.
    AdvanceRainbow,
    /// Restores the state captured before the most recent recorded move.
    Undo,
    /// Re-seeds the current level from its description.
    Restart,
}

/// Reasons a directional move may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    /// No level has been loaded.
    NoLevel,
    /// The level already ended in a win or a loss.
    LevelOver,
    /// A rainbow push is still resolving.
    Animating,
    /// The requested heading reverses the current one.
    Reversal,
    /// The head would enter a cell occupied by the body.
    SelfCollision,
    /// The head would enter a wall.
    Wall,
    /// The food ahead cannot be pushed and the rules refuse to eat it.
    Blocked,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A level was loaded or restarted and is ready for input.
    LevelLoaded {
        /// Name of the level.
        name: String,
        /// Number of food items placed after skipping overlaps.
        food_count: usize,
    },
    /// A directional move was refused without changing state.
    MoveRejected {
        /// Heading that was requested.
        direction: Direction,
        /// Why the request was refused.
        reason: RejectionReason,
    },
    /// The snake head moved one cell and the body followed.
    SnakeAdvanced {
        /// Heading of the move.
        direction: Direction,
        /// Cell the head occupied before the move.
        from: Cell,
        /// Cell the head occupies after the move.
        to: Cell,
    },
    /// A food item slid one cell.
    FoodPushed {
        /// Identifier of the pushed item.
        food: FoodId,
        /// Cell the item left.
        from: Cell,
        /// Cell the item now occupies.
        to: Cell,
    },
    /// A pushed food item fell into a pit and was destroyed.
    FoodDroppedInPit {
        /// Identifier of the destroyed item.
        food: FoodId,
        /// Pit cell that swallowed the item.
        pit: Cell,
    },
    /// The head could not push the chain in front of it.
    PushBlocked {
        /// Item directly in front of the head.
        food: FoodId,
        /// Cell that stopped the chain.
        obstacle: Cell,
    },
    /// The snake ate a food item.
    FoodEaten {
        /// Identifier of the eaten item.
        food: FoodId,
        /// Type of the eaten item.
        kind: FoodKind,
        /// Cell the item occupied.
        cell: Cell,
    },
    /// The snake gained a tail segment.
    SnakeGrew {
        /// Cell of the new tail segment.
        tail: Cell,
        /// Segment count after growing.
        length: usize,
    },
    /// A rainbow push began after the snake ate a potion.
    RainbowStarted {
        /// Direction the whole snake will be pushed.
        direction: Direction,
    },
    /// One atomic rainbow step moved the snake and the food in its way.
    RainbowStepApplied {
        /// One-based index of the step within the cascade.
        step: u32,
        /// Direction of the shift.
        direction: Direction,
    },
    /// The rainbow push reached a steady state.
    RainbowSettled {
        /// Number of steps that were committed.
        steps: u32,
    },
    /// Every food item is gone and the wormhole accepts the snake.
    WormholeOpened {
        /// Location of the wormhole.
        cell: Cell,
    },
    /// The head entered the open wormhole.
    LevelWon {
        /// Location of the wormhole.
        cell: Cell,
    },
    /// Every snake segment ended above a pit.
    LevelLost,
    /// The most recent recorded move was reverted.
    UndoApplied {
        /// Snapshots left in the history after reverting.
        remaining: usize,
    },
    /// Undo was requested with nothing to revert.
    UndoRejected,
}

/// Summary of one move attempt, built from the events it produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The snake head changed cell.
    pub moved: bool,
    /// Type of the food eaten during the move, if any.
    pub ate: Option<FoodKind>,
    /// The snake gained a segment.
    pub grew: bool,
    /// Items that slid at least once, in push order without duplicates.
    pub pushed_food_ids: Vec<FoodId>,
    /// Items removed from the board, whether eaten or dropped.
    pub destroyed_food_ids: Vec<FoodId>,
    /// At least one item fell into a pit.
    pub dropped_in_pit: bool,
    /// The head ran into a chain that could not move.
    pub push_blocked: bool,
    /// Rainbow steps committed while the move resolved.
    pub rainbow_steps: u32,
    /// A rainbow push still waits for its next step.
    pub rainbow_pending: bool,
    /// The wormhole opened during the move.
    pub wormhole_opened: bool,
    /// The level was lost.
    pub died: bool,
    /// The level was won.
    pub won: bool,
    /// Why the move was refused, if it was.
    pub rejection: Option<RejectionReason>,
}

/// Immutable copy of a food item used for queries and undo snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoodSnapshot {
    /// Identifier of the item.
    pub id: FoodId,
    /// Type of the item.
    pub kind: FoodKind,
    /// Cell the item occupies.
    pub cell: Cell,
}

/// Immutable copy of the snake used for queries and undo snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnakeSnapshot {
    /// Segment cells, head first.
    pub segments: Vec<Cell>,
    /// Current heading.
    pub heading: Direction,
    /// Tail cell remembered before the most recent shift.
    pub last_tail: Cell,
}

impl SnakeSnapshot {
    /// Cell occupied by the head, if the snake has any segment.
    #[must_use]
    pub fn head(&self) -> Option<Cell> {
        self.segments.first().copied()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Reports whether the snake has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
