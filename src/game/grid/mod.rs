//! Tile grid and tile classification.

pub mod grid;
pub mod classification;

pub use grid::*;
pub use classification::*;
