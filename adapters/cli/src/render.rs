//! Plain-text board drawing.

use wormhole_snake_core::{Cell, Direction, FoodKind, LevelStatus, MoveOutcome};
use wormhole_snake_system_session::Session;

const FLOOR: char = '.';
const PIT: char = ' ';
const WALL: char = '#';
const BODY: char = 's';
const BANANA: char = 'b';
const POTION: char = 'r';
const WORMHOLE_CLOSED: char = 'o';
const WORMHOLE_OPEN: char = 'O';

/// Draws the board top row first, followed by a status line.
///
/// Snake segments that left the declared grid are not drawn.
pub(crate) fn render(session: &Session) -> String {
    let board = session.board();
    let snake = session.snake();
    let food = session.food();
    let wormhole = session.wormhole();
    let width = i32::try_from(board.width()).unwrap_or(i32::MAX);
    let height = i32::try_from(board.height()).unwrap_or(i32::MAX);

    let mut text = String::new();
    for y in (0..height).rev() {
        for x in 0..width {
            let cell = Cell::new(x, y);
            let glyph = if snake.head() == Some(cell) {
                head_glyph(snake.heading)
            } else if snake.segments.contains(&cell) {
                BODY
            } else if let Some(item) = food.iter().find(|item| item.cell == cell) {
                match item.kind {
                    FoodKind::Banana => BANANA,
                    FoodKind::RainbowPotion => POTION,
                }
            } else if board.is_wall(cell) {
                WALL
            } else if cell == wormhole {
                if session.wormhole_active() {
                    WORMHOLE_OPEN
                } else {
                    WORMHOLE_CLOSED
                }
            } else if board.is_pit(cell) {
                PIT
            } else {
                FLOOR
            };
            text.push(glyph);
        }
        text.push('\n');
    }

    text.push_str(&format!(
        "{} | length {} | food left {} | undo {}\n",
        status_label(session.status()),
        snake.len(),
        food.len(),
        session.history_len(),
    ));
    text
}

/// One-line summary of a move for the transcript.
pub(crate) fn describe(outcome: &MoveOutcome) -> String {
    if let Some(reason) = outcome.rejection {
        return format!("ignored: {reason:?}");
    }

    let mut notes = Vec::new();
    if outcome.push_blocked {
        notes.push("push blocked".to_owned());
    }
    if !outcome.pushed_food_ids.is_empty() {
        notes.push(format!("pushed {}", outcome.pushed_food_ids.len()));
    }
    if outcome.dropped_in_pit {
        notes.push("food fell into a pit".to_owned());
    }
    if let Some(kind) = outcome.ate {
        notes.push(format!("ate {kind:?}"));
    }
    if outcome.rainbow_steps > 0 {
        notes.push(format!("rainbow x{}", outcome.rainbow_steps));
    }
    if outcome.rainbow_pending {
        notes.push("rainbow pending".to_owned());
    }
    if outcome.wormhole_opened {
        notes.push("wormhole opened".to_owned());
    }
    if outcome.died {
        notes.push("fell".to_owned());
    }
    if outcome.won {
        notes.push("escaped".to_owned());
    }

    if notes.is_empty() {
        "moved".to_owned()
    } else {
        notes.join(", ")
    }
}

fn head_glyph(heading: Direction) -> char {
    match heading {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

fn status_label(status: LevelStatus) -> &'static str {
    match status {
        LevelStatus::Playing => "playing",
        LevelStatus::Won => "won",
        LevelStatus::Lost => "lost",
    }
}
