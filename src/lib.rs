//! Isometric coin-grid game.
//!
//! Map loading, tile classification, the movement state machine and the
//! isometric projection. Drawing is left to a [`game::systems::FrameRenderer`].

pub mod config;
pub mod game;
