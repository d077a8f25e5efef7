pub mod types;
pub mod grid;
pub mod map;
pub mod state;
pub mod systems;
pub mod input;
pub mod demo;
