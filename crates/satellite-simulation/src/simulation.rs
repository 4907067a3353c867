//! Frame-stepped satellite simulation
//!
//! Each frame runs the integrator over all bodies, then paints the field from
//! the updated bodies. The two regions never overlap: each rayon loop joins
//! before the next one starts.
//!
//! The first `validation_frames` frames are the warm-up correctness window.
//! During them the black hole is pinned to the image center, a copy of the
//! bodies is advanced by the sequential integrator and must match bit for
//! bit, and the frame is repainted by the sqrt-based oracle shader and
//! compared under the pixel tolerance. Later frames are trusted.

use crate::params::{ConfigError, SimulationParams};
use crate::scenario::{scenario_rng, spawn_bodies};
use crate::verify::{verify, BodyReport, GridReport, VerifyError};
use glam::Vec2;
use satellite_field::{paint, paint_sequential, FieldMode, FieldShader, PixelGrid};
use satellite_physics::{advance, advance_sequential, Body};
use std::time::{Duration, Instant};

/// What happened during one [`Simulation::step`]
#[derive(Clone, Debug)]
pub struct FrameReport {
    /// Zero-based index of the frame
    pub frame: u64,
    pub attractor: Vec2,
    pub physics_time: Duration,
    pub paint_time: Duration,
    /// Present on validation frames only
    pub bodies: Option<BodyReport>,
    /// Present on validation frames only
    pub pixels: Option<GridReport>,
}

impl FrameReport {
    pub fn validated(&self) -> bool {
        self.bodies.is_some() || self.pixels.is_some()
    }

    /// False when a validation check exceeded its budget
    pub fn passed(&self) -> bool {
        self.bodies.as_ref().map_or(true, BodyReport::passed)
            && self.pixels.as_ref().map_or(true, GridReport::passed)
    }
}

/// Owns the body store and both pixel grids for the whole run
pub struct Simulation {
    params: SimulationParams,

    bodies: Vec<Body>,
    oracle_bodies: Vec<Body>,

    pixels: PixelGrid,
    oracle_pixels: PixelGrid,

    /// Shader selected by `paint_mode`
    shader: Box<dyn FieldShader>,
    oracle_shader: Box<dyn FieldShader>,

    frame: u64,
}

impl Simulation {
    /// Build a run with a freshly spawned scenario
    pub fn new(params: SimulationParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let mut rng = scenario_rng(params.seed);
        let bodies = spawn_bodies(params.body_count, params.width, params.height, &mut rng);
        log::info!(
            "Spawned {} satellites (seed {})",
            bodies.len(),
            params.seed
        );
        Self::from_bodies(params, bodies)
    }

    /// Build a run from an explicit starting state
    pub fn from_bodies(params: SimulationParams, bodies: Vec<Body>) -> Result<Self, ConfigError> {
        params.validate()?;
        if bodies.len() != params.body_count {
            return Err(ConfigError::BodyCountMismatch {
                expected: params.body_count,
                actual: bodies.len(),
            });
        }

        log::debug!(
            "Allocating {}x{} pixel grids ({} bytes each)",
            params.width,
            params.height,
            params.pixel_count() * std::mem::size_of::<satellite_field::Pixel>()
        );

        Ok(Self {
            oracle_bodies: bodies.clone(),
            bodies,
            pixels: PixelGrid::new(params.width, params.height),
            oracle_pixels: PixelGrid::new(params.width, params.height),
            shader: params.paint_mode.shader(params.field),
            oracle_shader: FieldMode::Reference.shader(params.field),
            params,
            frame: 0,
        })
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// The most recently painted frame
    pub fn pixels(&self) -> &PixelGrid {
        &self.pixels
    }

    /// The oracle's copy of the last validation frame
    pub fn oracle_pixels(&self) -> &PixelGrid {
        &self.oracle_pixels
    }

    /// Number of completed frames
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn in_validation_window(&self) -> bool {
        self.frame < self.params.validation_frames
    }

    /// Black hole position for a pointer reading
    ///
    /// No reading, or a reading at exactly the origin, means the center.
    pub fn resolve_attractor(&self, pointer: Option<Vec2>) -> Vec2 {
        match pointer {
            Some(p) if p != Vec2::ZERO => p,
            _ => self.params.center(),
        }
    }

    /// Run one frame
    ///
    /// `pointer` is ignored inside the validation window. Errors only when the
    /// oracle grid cannot be compared with the produced one.
    pub fn step(&mut self, pointer: Option<Vec2>) -> Result<FrameReport, VerifyError> {
        let validating = self.in_validation_window();
        let attractor = if validating {
            self.params.center()
        } else {
            self.resolve_attractor(pointer)
        };

        if validating {
            self.oracle_bodies.copy_from_slice(&self.bodies);
            advance_sequential(&mut self.oracle_bodies, attractor, &self.params.integrator);
        }

        let start = Instant::now();
        advance(&mut self.bodies, attractor, &self.params.integrator);
        let physics_time = start.elapsed();

        let bodies = validating.then(|| self.check_bodies());

        let start = Instant::now();
        paint(self.shader.as_ref(), &self.bodies, attractor, &mut self.pixels);
        let paint_time = start.elapsed();

        let pixels = if validating {
            Some(self.check_pixels(attractor)?)
        } else {
            None
        };

        let report = FrameReport {
            frame: self.frame,
            attractor,
            physics_time,
            paint_time,
            bodies,
            pixels,
        };
        self.frame += 1;
        Ok(report)
    }

    fn check_bodies(&self) -> BodyReport {
        let report = BodyReport::compare(&self.bodies, &self.oracle_bodies);
        for &index in &report.mismatched {
            log::error!("Incorrect satellite data of satellite: {}", index);
        }
        report
    }

    fn check_pixels(&mut self, attractor: Vec2) -> Result<GridReport, VerifyError> {
        paint_sequential(
            self.oracle_shader.as_ref(),
            &self.oracle_bodies,
            attractor,
            &mut self.oracle_pixels,
        );
        let report = verify(&self.pixels, &self.oracle_pixels, &self.params.verify)?;

        for m in &report.diagnostics {
            let message = format!(
                "Pixel x={} y={} value: {:?}. Should have been: {:?}",
                m.x,
                m.y,
                m.produced.channels(),
                m.expected.channels()
            );
            if report.passed() {
                log::debug!("{}", message);
            } else {
                log::warn!("{}", message);
            }
        }

        if report.passed() {
            log::info!(
                "Error check passed with acceptable number of wrong pixels: {}",
                report.wrong_pixels
            );
        } else {
            log::error!(
                "Too many errors ({}) in frame {}",
                report.wrong_pixels,
                self.frame
            );
        }
        Ok(report)
    }
}
