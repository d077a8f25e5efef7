//! Keyboard bindings.
//!
//! Eight keys drive the player. Key presses and auto-repeats move, releases are
//! ignored.

use log::debug;

use crate::game::state::GameState;
use crate::game::systems::MoveOutcome;
use crate::game::types::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Repeat,
    Release,
}

/// W/S/A/D move along the screen axes, Q/C/E/Z along the grid axes.
pub fn direction_for_key(key: char) -> Option<Direction> {
    match key.to_ascii_lowercase() {
        'w' => Some(Direction::Up),
        's' => Some(Direction::Down),
        'a' => Some(Direction::Left),
        'd' => Some(Direction::Right),
        'q' => Some(Direction::North),
        'c' => Some(Direction::South),
        'e' => Some(Direction::East),
        'z' => Some(Direction::West),
        _ => None,
    }
}

/// Feed one key event to the game. `None` when the event does not move anything.
pub fn handle_key(game_state: &mut GameState, key: char, action: KeyAction) -> Option<MoveOutcome> {
    if action == KeyAction::Release {
        return None;
    }
    let Some(direction) = direction_for_key(key) else {
        debug!("Unbound key {:?}", key);
        return None;
    };
    Some(game_state.apply_direction(direction))
}
