use log::debug;

use crate::game::grid::{ClassificationTable, Grid};
use crate::game::map::LoadedMap;
use crate::game::systems::{move_player, MoveOutcome};
use crate::game::types::{Coin, Direction, GameStatus, Player, Position, TileKind};

/// The whole session state. Owned by the game loop and handed to the movement
/// resolver and the renderer by reference.
#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: Grid,
    pub table: ClassificationTable,
    pub player: Player,
    pub coins: Vec<Coin>,
    pub status: GameStatus,
    pub moves: u32,
}

impl GameState {
    /// Start a session from a loaded map. The spawn cell becomes part of the
    /// walked trail right away, so the player can never step back onto it.
    pub fn new(map: LoadedMap) -> Self {
        let mut state = Self::from_parts(map.grid, map.table, map.player_spawn, map.coins);
        let trail = state.table.walked_id();
        state.grid.set(state.player.pos, trail);
        debug!("Spawn {} marked as trail", state.player.pos);
        state
    }

    /// Session without the spawn trail mark.
    pub fn from_parts(
        grid: Grid,
        table: ClassificationTable,
        spawn: Position,
        coins: Vec<Position>,
    ) -> Self {
        GameState {
            grid,
            table,
            player: Player::new(spawn),
            coins: coins.into_iter().map(Coin::new).collect(),
            status: GameStatus::Playing,
            moves: 0,
        }
    }

    pub fn apply_direction(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = move_player(self, direction);
        if outcome.moved() {
            self.moves += 1;
        }
        outcome
    }

    pub fn is_alive(&self) -> bool {
        self.status != GameStatus::Dead
    }

    pub fn has_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    /// True once every coin is collected (vacuously true without coins).
    pub fn coin_collected(&self) -> bool {
        self.coins.iter().all(|c| c.collected)
    }

    /// Kind of the tile at `pos`; `None` outside the grid.
    pub fn tile_kind(&self, pos: Position) -> Option<TileKind> {
        self.grid.get(pos).map(|id| self.table.classify(id))
    }

    pub fn uncollected_coins(&self) -> impl Iterator<Item = &Coin> {
        self.coins.iter().filter(|c| !c.collected)
    }
}
