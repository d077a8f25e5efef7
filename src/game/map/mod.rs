//! Map file loading.

pub mod error;
pub mod loader;

pub use error::MapFormatError;
pub use loader::{load, parse, AssetMetadata, Dialect, LoadedMap, SpriteAsset, TilesetInfo};
