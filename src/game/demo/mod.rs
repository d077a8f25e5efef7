// Demo module for the game. Provides the interactive terminal game loop.
pub mod game_loop;
