pub mod clock;
pub mod config;
pub mod constants;
pub mod grid;
pub mod physics;
pub mod pointer;
pub mod render;
pub mod state;
pub mod wave_noise;

pub use clock::*;
pub use config::*;
pub use grid::*;
pub use pointer::*;
pub use render::{draw, drawn_position, LineSurface, RecordedLine, RecordingSurface};
pub use state::*;
pub use wave_noise::*;
