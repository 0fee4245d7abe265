use log::warn;
use wormhole_snake_core::Direction;

/// Player intent decoded from a single input character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    /// Step the snake in the direction.
    Move(Direction),
    /// Revert the most recent move.
    Undo,
    /// Re-seed the current level.
    Restart,
}

/// Decodes a script such as `"UURZ X"`. Whitespace is skipped; unknown
/// characters are logged and skipped.
pub(crate) fn parse_inputs(script: &str) -> Vec<Input> {
    script
        .chars()
        .filter(|glyph| !glyph.is_whitespace())
        .filter_map(|glyph| {
            let input = decode(glyph);
            if input.is_none() {
                warn!("ignoring unknown input '{glyph}'");
            }
            input
        })
        .collect()
}

fn decode(glyph: char) -> Option<Input> {
    match glyph.to_ascii_uppercase() {
        'U' => Some(Input::Move(Direction::Up)),
        'D' => Some(Input::Move(Direction::Down)),
        'L' => Some(Input::Move(Direction::Left)),
        'R' => Some(Input::Move(Direction::Right)),
        'Z' => Some(Input::Undo),
        'X' => Some(Input::Restart),
        _ => None,
    }
}
