//! # Satellite Simulation
//!
//! Frame orchestration for the satellite scene: scenario setup, the
//! integrate-then-paint frame loop, and cross-validation of both stages
//! against sequential oracles during the first frames of a run.

pub mod params;
pub mod scenario;
pub mod simulation;
pub mod verify;

pub use params::*;
pub use scenario::*;
pub use simulation::*;
pub use verify::*;
