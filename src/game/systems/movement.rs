//! Player movement system.
//!
//! Resolves one directional input against the grid: bounds check, tile
//! legality, then the tile rules (hazard, coin, goal, trail).

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::game::state::GameState;
use crate::game::systems::rules::apply_tile_rules;
use crate::game::types::{Direction, GameStatus, Position, TileKind};

/// Something that happened while resolving one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MoveEvent {
    /// The session is over; the input was dropped.
    Ignored { status: GameStatus },
    /// Target outside the grid, 0-based and possibly negative.
    OutOfBounds { row: isize, col: isize },
    /// Target tile refuses the player.
    Blocked { target: Position, kind: TileKind },
    Moved { from: Position, to: Position },
    Died { at: Position },
    CoinCollected { at: Position },
    /// Goal reached before every coin was collected.
    NeedCoin { at: Position },
    Won { at: Position },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub direction: Direction,
    pub events: Vec<MoveEvent>,
}

impl MoveOutcome {
    fn new(direction: Direction) -> Self {
        Self {
            direction,
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, event: MoveEvent) {
        self.events.push(event);
    }

    pub fn moved(&self) -> bool {
        self.events.iter().any(|e| matches!(e, MoveEvent::Moved { .. }))
    }

    pub fn contains(&self, predicate: impl Fn(&MoveEvent) -> bool) -> bool {
        self.events.iter().any(predicate)
    }
}

/// Move the player in the given direction and apply the tile rules.
///
/// Total over every direction and position: refusals are reported as events,
/// never as errors, and leave the state untouched.
pub fn move_player(game_state: &mut GameState, direction: Direction) -> MoveOutcome {
    let mut outcome = MoveOutcome::new(direction);

    if game_state.status.is_terminal() {
        outcome.push(MoveEvent::Ignored { status: game_state.status });
        return outcome;
    }

    game_state.player.facing = direction.facing();
    let from = game_state.player.pos;

    let target = match from.offset(direction).filter(|p| game_state.grid.contains(*p)) {
        Some(target) => target,
        None => {
            let (d_row, d_col) = direction.delta();
            let row = from.row as isize + d_row;
            let col = from.col as isize + d_col;
            info!("Move out of the map: ({}, {})", row + 1, col + 1);
            outcome.push(MoveEvent::OutOfBounds { row, col });
            return outcome;
        }
    };

    let kind = game_state.tile_kind(target).unwrap_or(TileKind::Unknown);
    if kind.blocks_movement() {
        debug!("Move {:?} to {} blocked by {:?}", direction, target, kind);
        outcome.push(MoveEvent::Blocked { target, kind });
        return outcome;
    }

    game_state.player.pos = target;
    debug!("Player moved {:?} from {} to {}", direction, from, target);
    outcome.push(MoveEvent::Moved { from, to: target });

    apply_tile_rules(game_state, &mut outcome);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::{ClassificationTable, Grid};
    use crate::game::types::TileId;

    fn open_field(width: usize, height: usize, spawn: Position) -> GameState {
        let grid = Grid::filled(width, height, TileId::FLOOR);
        GameState::from_parts(grid, ClassificationTable::compiled_default(), spawn, vec![])
    }

    #[test]
    fn test_every_direction_from_every_cell_is_total() {
        for row in 0..3 {
            for col in 0..3 {
                for dir in Direction::ALL {
                    let mut state = open_field(3, 3, Position::new(row, col));
                    let outcome = move_player(&mut state, dir);
                    assert!(!outcome.events.is_empty());
                    assert!(state.grid.contains(state.player.pos));
                }
            }
        }
    }

    #[test]
    fn test_out_of_bounds_leaves_state() {
        let mut state = open_field(2, 2, Position::new(0, 0));
        let before = state.grid.clone();
        let outcome = move_player(&mut state, Direction::Down);

        assert_eq!(outcome.events, vec![MoveEvent::OutOfBounds { row: -1, col: -1 }]);
        assert_eq!(state.player.pos, Position::new(0, 0));
        assert_eq!(state.grid, before);
    }

    #[test]
    fn test_far_edge_out_of_bounds() {
        let mut state = open_field(2, 2, Position::new(1, 1));
        let outcome = move_player(&mut state, Direction::Up);
        assert_eq!(outcome.events, vec![MoveEvent::OutOfBounds { row: 2, col: 2 }]);
    }

    #[test]
    fn test_blocked_move_is_idempotent() {
        let mut state = open_field(3, 1, Position::new(0, 0));
        state.grid.set(Position::new(0, 1), TileId(b'3'));

        let first = move_player(&mut state, Direction::East);
        let pos_after_one = state.player.pos;
        let grid_after_one = state.grid.clone();
        for _ in 0..5 {
            let again = move_player(&mut state, Direction::East);
            assert_eq!(again, first);
        }

        assert_eq!(
            first.events,
            vec![MoveEvent::Blocked { target: Position::new(0, 1), kind: TileKind::NonWalkable }]
        );
        assert_eq!(state.player.pos, pos_after_one);
        assert_eq!(state.grid, grid_after_one);
    }

    #[test]
    fn test_accepted_move_leaves_trail() {
        let mut state = open_field(3, 1, Position::new(0, 0));
        let outcome = move_player(&mut state, Direction::East);

        assert!(outcome.moved());
        assert_eq!(state.player.pos, Position::new(0, 1));
        assert_eq!(state.tile_kind(Position::new(0, 1)), Some(TileKind::Walked));

        // The trail cannot be re-entered.
        move_player(&mut state, Direction::East);
        let back = move_player(&mut state, Direction::West);
        assert!(back.contains(|e| matches!(e, MoveEvent::Blocked { kind: TileKind::Walked, .. })));
    }

    #[test]
    fn test_unknown_tiles_are_walkable() {
        let mut state = open_field(2, 1, Position::new(0, 0));
        state.grid.set(Position::new(0, 1), TileId(b'?'));
        let outcome = move_player(&mut state, Direction::East);
        assert!(outcome.moved());
        assert!(state.is_alive());
        assert_eq!(state.tile_kind(Position::new(0, 1)), Some(TileKind::Walked));
    }

    #[test]
    fn test_facing_follows_input() {
        let mut state = open_field(2, 2, Position::new(0, 0));
        move_player(&mut state, Direction::Up);
        assert_eq!(state.player.facing, Direction::Up.facing());
    }
}
