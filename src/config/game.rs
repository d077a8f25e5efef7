/// Game configuration constants.
///
/// This module defines the map location, the compiled-in tile classification
/// used by digit maps without classification lines, and the screen layout
/// parameters handed to the isometric projection.
pub const MAP_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/maps/map.txt");

/// Digit cells in this range keep their id; any other non-marker character
/// in a digit map becomes the floor id `0`.
pub const MIN_PLAIN_TILE_ID: u8 = 1;
pub const MAX_PLAIN_TILE_ID: u8 = 5;

/// Compiled-in classification for digit maps.
pub const DEFAULT_NON_WALKABLE_IDS: &[u8] = &[3];
pub const DEFAULT_DANGEROUS_IDS: &[u8] = &[4];
pub const DEFAULT_GOAL_ID: u8 = 5;
pub const DEFAULT_WALKED_ID: u8 = 6;

/// Map markers.
pub const PLAYER_MARKER: u8 = b'@';
pub const COIN_MARKER: u8 = b'C';

/// Screen origin of tile (0, 0).
pub const TILE_ORIGIN: (f32, f32) = (575.0, 100.0);

/// Screen origin used for the player sprite.
pub const PLAYER_ORIGIN: (f32, f32) = (615.0, 100.0);

/// Screen origin used for coin sprites.
pub const COIN_ORIGIN: (f32, f32) = (615.0, 80.0);

/// Diamond size when the map carries no tileset metadata.
pub const FALLBACK_TILE_WIDTH: f32 = 75.0;
pub const FALLBACK_TILE_HEIGHT: f32 = 45.0;

/// Sprite sizes in pixels (width, height).
pub const PLAYER_SPRITE_SIZE: (f32, f32) = (75.0, 75.0);
pub const FALLBACK_COIN_SPRITE_SIZE: (f32, f32) = (35.0, 35.0);
