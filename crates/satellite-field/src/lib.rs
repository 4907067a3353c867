//! # Satellite Field
//!
//! Field-influence image of the satellite scene: every pixel is shaded from
//! the black hole and satellite positions, independently of every other pixel.

pub mod painter;
pub mod pixel;
pub mod shader;

pub use painter::*;
pub use pixel::*;
pub use shader::*;
