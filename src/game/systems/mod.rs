pub mod movement;
pub mod rules;
pub mod projection;
pub mod render;

pub use movement::*;
pub use rules::*;
pub use projection::*;
pub use render::*;
