/// Main configuration module.
///
/// Re-exports submodules for game and rendering configuration.
pub mod game;
pub mod render;
