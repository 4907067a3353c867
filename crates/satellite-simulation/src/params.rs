//! Run configuration

use crate::verify::VerifyParams;
use glam::Vec2;
use satellite_field::{FieldMode, FieldParams};
use satellite_physics::{IntegratorParams, BODY_COUNT, WINDOW_HEIGHT, WINDOW_WIDTH};
use thiserror::Error;

/// Everything fixed at process start
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    pub width: u32,
    pub height: u32,
    pub body_count: usize,
    /// Scenario seed, 0 for a nondeterministic one
    pub seed: u64,
    /// Frames at the start of the run checked against the oracle
    pub validation_frames: u64,
    pub integrator: IntegratorParams,
    pub field: FieldParams,
    /// Shader behind the produced frames; the oracle always runs `Reference`
    pub paint_mode: FieldMode,
    pub verify: VerifyParams,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            body_count: BODY_COUNT,
            seed: 0,
            validation_frames: 2,
            integrator: IntegratorParams::default(),
            field: FieldParams::default(),
            paint_mode: FieldMode::Fast,
            verify: VerifyParams::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("image size {width}x{height} must be non-zero")]
    EmptyImage { width: u32, height: u32 },
    #[error("body count must be non-zero")]
    NoBodies,
    #[error("expected {expected} bodies, got {actual}")]
    BodyCountMismatch { expected: usize, actual: usize },
    #[error("sub-step count must be non-zero")]
    NoSubsteps,
    #[error("delta time {0} must be positive and finite")]
    InvalidDeltaTime(f64),
    #[error("{name} radius {value} must be positive and finite")]
    InvalidRadius { name: &'static str, value: f32 },
}

impl SimulationParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        if self.body_count == 0 {
            return Err(ConfigError::NoBodies);
        }
        if self.integrator.substeps == 0 {
            return Err(ConfigError::NoSubsteps);
        }
        let dt = self.integrator.delta_time;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(ConfigError::InvalidDeltaTime(dt));
        }
        for (name, value) in [
            ("attractor", self.field.attractor_radius),
            ("body", self.field.body_radius),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidRadius { name, value });
            }
        }
        Ok(())
    }

    /// Image center, rounded down to whole pixels
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.width / 2) as f32, (self.height / 2) as f32)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = SimulationParams::default();
        assert_eq!(params.validate(), Ok(()));
        assert_eq!(params.body_count, 64);
        assert_eq!(params.integrator.substeps, 100_000);
        assert_eq!(params.center(), Vec2::new(960.0, 512.0));
    }

    #[test]
    fn test_center_rounds_down() {
        let params = SimulationParams {
            width: 101,
            height: 51,
            ..Default::default()
        };
        assert_eq!(params.center(), Vec2::new(50.0, 25.0));
    }

    #[test]
    fn test_rejects_empty_image() {
        let params = SimulationParams {
            height: 0,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::EmptyImage {
                width: 1920,
                height: 0
            })
        );
    }

    #[test]
    fn test_rejects_zero_bodies_and_substeps() {
        let mut params = SimulationParams {
            body_count: 0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ConfigError::NoBodies));

        params.body_count = 4;
        params.integrator.substeps = 0;
        assert_eq!(params.validate(), Err(ConfigError::NoSubsteps));
    }

    #[test]
    fn test_rejects_bad_radius() {
        let mut params = SimulationParams::default();
        params.field.body_radius = f32::NAN;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidRadius { name: "body", .. })
        ));
    }
}
