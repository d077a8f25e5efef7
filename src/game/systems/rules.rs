use log::{debug, info};

use crate::game::state::GameState;
use crate::game::systems::movement::{MoveEvent, MoveOutcome};
use crate::game::types::{GameStatus, TileKind};

/// Rules applied at the player's position after an accepted move, in order:
/// hazard, coin, goal, trail. Later rules still run after a death.
pub fn apply_tile_rules(game_state: &mut GameState, outcome: &mut MoveOutcome) {
    let pos = game_state.player.pos;
    let kind = game_state.tile_kind(pos).unwrap_or(TileKind::Unknown);

    if kind.is_dangerous() {
        info!("Player stepped on a dangerous tile at {}", pos);
        game_state.status = GameStatus::Dead;
        outcome.push(MoveEvent::Died { at: pos });
    }

    if let Some(coin) = game_state.coins.iter_mut().find(|c| c.pos == pos && !c.collected) {
        coin.collected = true;
        info!("Coin collected at {}", pos);
        outcome.push(MoveEvent::CoinCollected { at: pos });
    }

    if kind == TileKind::Goal {
        if game_state.coin_collected() {
            if game_state.status == GameStatus::Playing {
                game_state.status = GameStatus::Won;
            }
            outcome.push(MoveEvent::Won { at: pos });
        } else {
            info!("Goal reached at {} without the coin", pos);
            outcome.push(MoveEvent::NeedCoin { at: pos });
        }
    } else {
        let trail = game_state.table.walked_id();
        game_state.grid.set(pos, trail);
        debug!("Tile {} marked as walked", pos);
    }
}
