//! Static level topology: floor, pit, and wall layers.

use wormhole_snake_core::Cell;

const FLOOR_GLYPH: char = 'F';
const WALL_GLYPH: char = 'W';

/// Immutable floor and wall layers of a level.
///
/// Rows are indexed by `y`, with row `0` at the bottom. Rows may have
/// different lengths. Reads outside the recorded floor layer report a pit;
/// reads outside the recorded wall layer report open space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: u32,
    height: u32,
    floor: Vec<Vec<bool>>,
    walls: Vec<Vec<bool>>,
}

impl Board {
    /// Builds a board from the floor and wall row strings of a level.
    #[must_use]
    pub fn from_layers<S: AsRef<str>>(width: u32, height: u32, floor: &[S], walls: &[S]) -> Self {
        Self {
            width,
            height,
            floor: parse_layer(floor, FLOOR_GLYPH),
            walls: parse_layer(walls, WALL_GLYPH),
        }
    }

    /// Declared number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Declared number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the cell holds a wall.
    #[must_use]
    pub fn is_wall(&self, cell: Cell) -> bool {
        lookup(&self.walls, cell).unwrap_or(false)
    }

    /// Reports whether the cell is a pit. Cells outside the floor layer are pits.
    #[must_use]
    pub fn is_pit(&self, cell: Cell) -> bool {
        lookup(&self.floor, cell).map_or(true, |floor| !floor)
    }

    /// Reports whether the floor layer records the cell.
    #[must_use]
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        lookup(&self.floor, cell).is_some()
    }
}

fn parse_layer<S: AsRef<str>>(rows: &[S], solid: char) -> Vec<Vec<bool>> {
    rows.iter()
        .map(|row| row.as_ref().chars().map(|glyph| glyph == solid).collect())
        .collect()
}

fn lookup(layer: &[Vec<bool>], cell: Cell) -> Option<bool> {
    let row = usize::try_from(cell.y()).ok()?;
    let column = usize::try_from(cell.x()).ok()?;
    layer.get(row)?.get(column).copied()
}
