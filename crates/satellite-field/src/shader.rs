//! Per-pixel field color
//!
//! A pixel inside the black hole is black, a pixel inside a satellite is
//! white, and every other pixel takes the nearest satellite's color plus an
//! inverse-fourth-power weighted blend of all satellites' colors.
//!
//! Two formulations exist. [`FastField`] compares squared distances and
//! hoists the normalization out of the blend loop; [`ReferenceField`] is the
//! literal sqrt-based version kept as the oracle. Right at a radius boundary
//! the two can classify a pixel differently, which the verifier's tolerance
//! absorbs.

use crate::pixel::Pixel;
use glam::{Vec2, Vec3};
use satellite_physics::{Body, ATTRACTOR_RADIUS, BLEND_SCALE, BODY_RADIUS};

/// Shading constants
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    pub attractor_radius: f32,
    pub body_radius: f32,
    /// Multiplier on the normalized weighted color
    pub blend_scale: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            attractor_radius: ATTRACTOR_RADIUS,
            body_radius: BODY_RADIUS,
            blend_scale: BLEND_SCALE,
        }
    }
}

/// Computes one pixel's color from the frozen body state
///
/// Implementations must not keep per-pixel state: any pixel can be shaded in
/// any order, on any thread.
pub trait FieldShader: Sync {
    fn shade(&self, bodies: &[Body], attractor: Vec2, pixel: Vec2) -> Pixel;
}

/// Which shading formulation to run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldMode {
    /// Squared-distance production path
    #[default]
    Fast,
    /// Sqrt-based oracle
    Reference,
}

impl FieldMode {
    pub fn shader(self, params: FieldParams) -> Box<dyn FieldShader> {
        match self {
            FieldMode::Fast => Box::new(FastField::new(params)),
            FieldMode::Reference => Box::new(ReferenceField::new(params)),
        }
    }
}

/// Production shader: no square roots, one division per pixel
#[derive(Clone, Copy, Debug)]
pub struct FastField {
    blend_scale: f32,
    attractor_radius_squared: f32,
    body_radius_squared: f32,
}

impl FastField {
    pub fn new(params: FieldParams) -> Self {
        Self {
            blend_scale: params.blend_scale,
            attractor_radius_squared: params.attractor_radius * params.attractor_radius,
            body_radius_squared: params.body_radius * params.body_radius,
        }
    }
}

impl Default for FastField {
    fn default() -> Self {
        Self::new(FieldParams::default())
    }
}

impl FieldShader for FastField {
    fn shade(&self, bodies: &[Body], attractor: Vec2, pixel: Vec2) -> Pixel {
        if (pixel - attractor).length_squared() < self.attractor_radius_squared {
            return Pixel::BLACK;
        }

        let mut render_color = Vec3::ZERO;
        let mut shortest_squared = f32::INFINITY;
        let mut weights = 0.0f32;

        // First hit wins, so index order matters here
        for body in bodies {
            let dist_squared = (pixel - body.position()).length_squared();
            if dist_squared < self.body_radius_squared {
                return Pixel::WHITE;
            }

            weights += 1.0 / (dist_squared * dist_squared);
            if dist_squared < shortest_squared {
                shortest_squared = dist_squared;
                render_color = body.color();
            }
        }

        let mut weighted = Vec3::ZERO;
        for body in bodies {
            let dist_squared = (pixel - body.position()).length_squared();
            let weight = 1.0 / (dist_squared * dist_squared);
            weighted += body.color() * weight;
        }
        render_color += weighted * self.blend_scale / weights;

        Pixel::from_color(render_color)
    }
}

/// Oracle shader: literal distances, normalization inside the blend loop
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceField {
    params: FieldParams,
}

impl ReferenceField {
    pub fn new(params: FieldParams) -> Self {
        Self { params }
    }
}

impl FieldShader for ReferenceField {
    fn shade(&self, bodies: &[Body], attractor: Vec2, pixel: Vec2) -> Pixel {
        if (pixel - attractor).length() < self.params.attractor_radius {
            return Pixel::BLACK;
        }

        let mut render_color = Vec3::ZERO;
        let mut shortest = f32::INFINITY;
        let mut weights = 0.0f32;

        for body in bodies {
            let distance = (pixel - body.position()).length();
            if distance < self.params.body_radius {
                return Pixel::WHITE;
            }

            weights += 1.0 / (distance * distance * distance * distance);
            if distance < shortest {
                shortest = distance;
                render_color = body.color();
            }
        }

        for body in bodies {
            let dist_squared = (pixel - body.position()).length_squared();
            let weight = 1.0 / (dist_squared * dist_squared);
            render_color += body.color() * weight / weights * self.params.blend_scale;
        }

        Pixel::from_color(render_color)
    }
}
