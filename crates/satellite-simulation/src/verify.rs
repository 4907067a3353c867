//! Cross-checks against the sequential oracle
//!
//! Pixels are compared with a per-channel tolerance and a budget of wrong
//! pixels per frame. Bodies are compared bit for bit, since both integrators
//! run the same arithmetic per body.

use satellite_field::{Pixel, PixelGrid};
use satellite_physics::{compare_bodies, Body};
use thiserror::Error;

/// Acceptance rule for a produced frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifyParams {
    /// Largest accepted difference per 8-bit channel
    pub channel_tolerance: u8,
    /// Largest accepted number of wrong pixels per frame
    pub max_wrong_pixels: usize,
    /// Wrong pixels kept in the report with coordinates and colors
    pub max_diagnostics: usize,
}

impl Default for VerifyParams {
    fn default() -> Self {
        Self {
            channel_tolerance: 10,
            max_wrong_pixels: 10,
            max_diagnostics: 11,
        }
    }
}

/// One pixel outside tolerance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelMismatch {
    pub x: u32,
    pub y: u32,
    pub produced: Pixel,
    pub expected: Pixel,
}

/// Outcome of comparing a produced grid with the oracle grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridReport {
    pub wrong_pixels: usize,
    pub max_wrong_pixels: usize,
    /// First wrong pixels in row-major order
    pub diagnostics: Vec<PixelMismatch>,
}

impl GridReport {
    pub fn passed(&self) -> bool {
        self.wrong_pixels <= self.max_wrong_pixels
    }
}

/// Outcome of comparing integrated bodies with the oracle bodies
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BodyReport {
    pub mismatched: Vec<usize>,
}

impl BodyReport {
    pub fn compare(produced: &[Body], expected: &[Body]) -> Self {
        Self {
            mismatched: compare_bodies(produced, expected),
        }
    }

    pub fn passed(&self) -> bool {
        self.mismatched.is_empty()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("grid shapes differ: produced {produced:?}, expected {expected:?}")]
    ShapeMismatch {
        produced: (u32, u32),
        expected: (u32, u32),
    },
}

/// True when any channel differs by more than `tolerance`
pub fn is_wrong(produced: Pixel, expected: Pixel, tolerance: u8) -> bool {
    produced
        .channels()
        .iter()
        .zip(expected.channels())
        .any(|(a, b)| a.abs_diff(b) > tolerance)
}

/// Compare `produced` against `expected`; neither grid is modified
pub fn verify(
    produced: &PixelGrid,
    expected: &PixelGrid,
    params: &VerifyParams,
) -> Result<GridReport, VerifyError> {
    if !produced.same_shape(expected) {
        return Err(VerifyError::ShapeMismatch {
            produced: (produced.width(), produced.height()),
            expected: (expected.width(), expected.height()),
        });
    }
    Ok(compare_grids(produced, expected, params))
}

/// [`verify`] for grids already known to share a shape
fn compare_grids(
    produced: &PixelGrid,
    expected: &PixelGrid,
    params: &VerifyParams,
) -> GridReport {
    let mut report = GridReport {
        wrong_pixels: 0,
        max_wrong_pixels: params.max_wrong_pixels,
        diagnostics: Vec::new(),
    };

    for (index, (&p, &e)) in produced.pixels().iter().zip(expected.pixels()).enumerate() {
        if !is_wrong(p, e, params.channel_tolerance) {
            continue;
        }
        report.wrong_pixels += 1;
        if report.diagnostics.len() < params.max_diagnostics {
            let (x, y) = produced.coords(index);
            report.diagnostics.push(PixelMismatch {
                x,
                y,
                produced: p,
                expected: e,
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    fn grid_with(width: u32, height: u32, pixel: Pixel) -> PixelGrid {
        let mut grid = PixelGrid::new(width, height);
        grid.pixels_mut().fill(pixel);
        grid
    }

    #[test]
    fn test_identical_grids_pass() {
        let a = grid_with(8, 4, Pixel::rgb(10, 20, 30));
        let report = verify(&a, &a.clone(), &VerifyParams::default()).unwrap();
        assert_eq!(report.wrong_pixels, 0);
        assert!(report.passed());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        assert!(!is_wrong(Pixel::rgb(100, 0, 0), Pixel::rgb(110, 0, 0), 10));
        assert!(is_wrong(Pixel::rgb(100, 0, 0), Pixel::rgb(111, 0, 0), 10));
        assert!(is_wrong(Pixel::rgb(0, 0, 255), Pixel::rgb(0, 0, 0), 10));
    }

    #[test]
    fn test_reserved_byte_is_ignored() {
        let mut a = Pixel::rgb(1, 2, 3);
        a.reserved = 200;
        assert!(!is_wrong(a, Pixel::rgb(1, 2, 3), 0));
    }

    #[test]
    fn test_budget_boundary() {
        let expected = grid_with(16, 1, Pixel::BLACK);
        let mut produced = expected.clone();
        for pixel in produced.pixels_mut().iter_mut().take(10) {
            *pixel = Pixel::WHITE;
        }
        let report = verify(&produced, &expected, &VerifyParams::default()).unwrap();
        assert_eq!(report.wrong_pixels, 10);
        assert!(report.passed());

        produced.pixels_mut()[10] = Pixel::WHITE;
        let report = verify(&produced, &expected, &VerifyParams::default()).unwrap();
        assert_eq!(report.wrong_pixels, 11);
        assert!(!report.passed());
    }

    #[test]
    fn test_counts_past_diagnostic_limit() {
        let expected = grid_with(10, 10, Pixel::BLACK);
        let produced = grid_with(10, 10, Pixel::WHITE);
        let report = verify(&produced, &expected, &VerifyParams::default()).unwrap();
        assert_eq!(report.wrong_pixels, 100);
        assert_eq!(report.diagnostics.len(), 11);
        assert_eq!(
            report.diagnostics[10],
            PixelMismatch {
                x: 0,
                y: 1,
                produced: Pixel::WHITE,
                expected: Pixel::BLACK
            }
        );
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        let a = PixelGrid::new(4, 4);
        let b = PixelGrid::new(4, 5);
        assert_eq!(
            verify(&a, &b, &VerifyParams::default()),
            Err(VerifyError::ShapeMismatch {
                produced: (4, 4),
                expected: (4, 5)
            })
        );
    }

    #[test]
    fn test_body_report() {
        let bodies = vec![Body::at_rest(Vec3::ONE, Vec2::new(1.0, 2.0)); 3];
        let mut other = bodies.clone();
        assert!(BodyReport::compare(&bodies, &other).passed());

        other[2].velocity[0] = 1.0e-3;
        let report = BodyReport::compare(&bodies, &other);
        assert!(!report.passed());
        assert_eq!(report.mismatched, vec![2]);
    }
}
