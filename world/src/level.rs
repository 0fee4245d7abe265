//! Validation of level descriptions into playable state.

use log::warn;
use thiserror::Error;
use wormhole_snake_core::{
    Cell, FoodId, LevelData, LEVEL_FORMAT_VERSION, MAX_SNAKE_LENGTH, MIN_SNAKE_LENGTH,
};
use wormhole_snake_system_rules::Wormhole;

use crate::{board::Board, food::FoodIndex, snake::Snake};

/// Reasons a level description is rejected at load time.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LevelError {
    /// The level uses a format revision this engine does not read.
    #[error("level format version {found} is not supported; expected {}", LEVEL_FORMAT_VERSION)]
    UnsupportedVersion {
        /// Revision declared by the level.
        found: u32,
    },
    /// Width or height is zero.
    #[error("level dimensions {width}x{height} must both be positive")]
    InvalidDimensions {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },
    /// The floor layer has no rows.
    #[error("level floor layout is empty")]
    EmptyFloorLayout,
    /// A layer has more rows or columns than the declared dimensions.
    #[error("{layer} layer row {row} exceeds the declared {width}x{height} grid")]
    LayerExceedsDimensions {
        /// Name of the offending layer.
        layer: &'static str,
        /// Zero-based row index, counted from the bottom.
        row: usize,
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },
    /// The initial snake is too short or too long.
    #[error(
        "snake length {length} must lie between {} and {}",
        MIN_SNAKE_LENGTH,
        MAX_SNAKE_LENGTH
    )]
    InvalidSnakeLength {
        /// Declared length.
        length: u32,
    },
    /// A snake segment starts outside the floor layer.
    #[error("snake segment at {cell} lies outside the grid")]
    SnakeOutOfBounds {
        /// Offending segment.
        cell: Cell,
    },
    /// A snake segment starts inside a wall.
    #[error("snake segment at {cell} starts inside a wall")]
    SnakeOnWall {
        /// Offending segment.
        cell: Cell,
    },
    /// Every snake segment starts above a pit.
    #[error("every snake segment starts above a pit")]
    SnakeStartsOverPits,
    /// A food placement lies outside the floor layer.
    #[error("food at {cell} lies outside the grid")]
    FoodOutOfBounds {
        /// Offending placement.
        cell: Cell,
    },
    /// A food placement rests on a pit cell.
    #[error("food at {cell} rests on a pit")]
    FoodOverPit {
        /// Offending placement.
        cell: Cell,
    },
    /// A food placement sits inside a wall.
    #[error("food at {cell} sits inside a wall")]
    FoodOnWall {
        /// Offending placement.
        cell: Cell,
    },
    /// A food placement overlaps the initial snake.
    #[error("food at {cell} overlaps the snake")]
    FoodOnSnake {
        /// Offending placement.
        cell: Cell,
    },
    /// The wormhole lies outside the floor layer.
    #[error("wormhole at {cell} lies outside the grid")]
    WormholeOutOfBounds {
        /// Declared wormhole cell.
        cell: Cell,
    },
    /// The wormhole sits inside a wall.
    #[error("wormhole at {cell} sits inside a wall")]
    WormholeOnWall {
        /// Declared wormhole cell.
        cell: Cell,
    },
}

/// Freshly seeded state for a validated level.
#[derive(Debug)]
pub(crate) struct Seed {
    pub(crate) board: Board,
    pub(crate) snake: Snake,
    pub(crate) food: FoodIndex,
    pub(crate) wormhole: Wormhole,
}

pub(crate) fn seed(level: &LevelData) -> Result<Seed, LevelError> {
    if level.version != LEVEL_FORMAT_VERSION {
        return Err(LevelError::UnsupportedVersion {
            found: level.version,
        });
    }
    let (width, height) = (level.width, level.height);
    if width == 0 || height == 0 {
        return Err(LevelError::InvalidDimensions { width, height });
    }
    if level.floor.is_empty() {
        return Err(LevelError::EmptyFloorLayout);
    }
    check_layer("floor", &level.floor, width, height)?;
    check_layer("wall", &level.walls, width, height)?;

    let board = Board::from_layers(width, height, &level.floor, &level.walls);

    let start = level.snake;
    if !(MIN_SNAKE_LENGTH..=MAX_SNAKE_LENGTH).contains(&start.length) {
        return Err(LevelError::InvalidSnakeLength {
            length: start.length,
        });
    }
    let snake = Snake::from_start(start.head, start.length, start.heading);
    for &cell in snake.segments() {
        if !board.is_in_bounds(cell) {
            return Err(LevelError::SnakeOutOfBounds { cell });
        }
        if board.is_wall(cell) {
            return Err(LevelError::SnakeOnWall { cell });
        }
    }
    if snake.segments().iter().all(|cell| board.is_pit(*cell)) {
        return Err(LevelError::SnakeStartsOverPits);
    }

    let cell = level.wormhole;
    if !board.is_in_bounds(cell) {
        return Err(LevelError::WormholeOutOfBounds { cell });
    }
    if board.is_wall(cell) {
        return Err(LevelError::WormholeOnWall { cell });
    }

    let mut food = FoodIndex::new();
    for (index, placement) in level.food.iter().enumerate() {
        let cell = placement.cell;
        if !board.is_in_bounds(cell) {
            return Err(LevelError::FoodOutOfBounds { cell });
        }
        if board.is_wall(cell) {
            return Err(LevelError::FoodOnWall { cell });
        }
        if board.is_pit(cell) {
            return Err(LevelError::FoodOverPit { cell });
        }
        if snake.occupies(cell) {
            return Err(LevelError::FoodOnSnake { cell });
        }
        let id = FoodId::new(u32::try_from(index).unwrap_or(u32::MAX));
        if !food.insert(id, placement.kind, cell) {
            warn!("skipping {:?} at {cell}: cell already holds food", placement.kind);
        }
    }

    let mut wormhole = Wormhole::closed(level.wormhole);
    wormhole.reset(food.len());

    Ok(Seed {
        board,
        snake,
        food,
        wormhole,
    })
}

fn check_layer(
    layer: &'static str,
    rows: &[String],
    width: u32,
    height: u32,
) -> Result<(), LevelError> {
    let too_tall = rows.len() > height as usize;
    let wide_row = rows
        .iter()
        .position(|row| row.chars().count() > width as usize);
    let offending = match (too_tall, wide_row) {
        (_, Some(row)) => Some(row),
        (true, None) => Some(height as usize),
        (false, None) => None,
    };
    match offending {
        Some(row) => Err(LevelError::LayerExceedsDimensions {
            layer,
            row,
            width,
            height,
        }),
        None => Ok(()),
    }
}
