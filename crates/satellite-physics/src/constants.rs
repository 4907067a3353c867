//! Reference constants for the satellite scene
//!
//! Units are pixels for distances and "milliseconds" for time. The values are
//! the ones every verification run is defined against; benchmarks must use
//! them unchanged.

/// Number of satellites in the reference scenario
pub const BODY_COUNT: usize = 64;

/// Default image width in pixels
pub const WINDOW_WIDTH: u32 = 1920;

/// Default image height in pixels
pub const WINDOW_HEIGHT: u32 = 1024;

/// Radius inside which a pixel is painted white as part of a satellite
pub const BODY_RADIUS: f32 = 3.16;

/// Radius inside which a pixel is painted black as part of the black hole
pub const ATTRACTOR_RADIUS: f32 = 4.5;

/// Gravitational strength of the black hole
pub const GRAVITY: f64 = 1.0;

/// Simulated time per frame
pub const DELTA_TIME: f64 = 32.0;

/// Euler sub-steps per frame
///
/// A single Euler step per frame is far too coarse, so every frame is split
/// into this many small steps.
pub const SUBSTEPS: u32 = 100_000;

/// Weight of the inverse-distance blend relative to the nearest body's color
pub const BLEND_SCALE: f32 = 3.0;
