//! # Satellite Physics
//!
//! Body storage and the gravity integrator for satellites orbiting a single
//! movable black hole.

pub mod body;
pub mod constants;
pub mod integrator;

pub use body::*;
pub use constants::*;
pub use integrator::*;
