//! Satellite state stored between frames

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// A satellite orbiting the black hole
///
/// Stored at single precision; the integrator widens position and velocity
/// to `f64` while sub-stepping and narrows them back once per frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Body {
    /// Identifier color, each channel in [0, 1]
    pub color: [f32; 3],
    /// Position in pixels, origin top-left
    pub position: [f32; 2],
    /// Velocity in pixels per time unit
    pub velocity: [f32; 2],
}

impl Body {
    /// Creates a body from `glam` vectors
    pub fn new(color: Vec3, position: Vec2, velocity: Vec2) -> Self {
        Self {
            color: color.to_array(),
            position: position.to_array(),
            velocity: velocity.to_array(),
        }
    }

    /// A body at rest
    pub fn at_rest(color: Vec3, position: Vec2) -> Self {
        Self::new(color, position, Vec2::ZERO)
    }

    /// Color as a `Vec3`
    pub fn color(&self) -> Vec3 {
        Vec3::from_array(self.color)
    }

    /// Position as a `Vec2`
    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    /// Velocity as a `Vec2`
    pub fn velocity(&self) -> Vec2 {
        Vec2::from_array(self.velocity)
    }
}

/// Indices of bodies whose stored bytes differ between `a` and `b`
///
/// This is a bit-level comparison: `-0.0` and `0.0` differ, and two NaNs with
/// the same payload are equal. Bodies past the shorter slice count as
/// mismatched.
pub fn compare_bodies(a: &[Body], b: &[Body]) -> Vec<usize> {
    let common = a.len().min(b.len());
    let mut mismatched: Vec<usize> = a
        .iter()
        .zip(b)
        .enumerate()
        .filter(|(_, (x, y))| bytemuck::bytes_of(*x) != bytemuck::bytes_of(*y))
        .map(|(i, _)| i)
        .collect();
    mismatched.extend(common..a.len().max(b.len()));
    mismatched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Body {
        Body::new(
            Vec3::new(0.2, 0.1, 0.05),
            Vec2::new(10.0, 20.0),
            Vec2::new(0.01, -0.02),
        )
    }

    #[test]
    fn test_body_layout_is_packed() {
        assert_eq!(std::mem::size_of::<Body>(), 28);
    }

    #[test]
    fn test_accessors_round_trip_arrays() {
        let body = sample();
        assert_eq!(body.position(), Vec2::new(10.0, 20.0));
        assert_eq!(body.velocity(), Vec2::new(0.01, -0.02));
        assert_eq!(body.color(), Vec3::new(0.2, 0.1, 0.05));
    }

    #[test]
    fn test_compare_identical_bodies() {
        let bodies = vec![sample(); 4];
        assert!(compare_bodies(&bodies, &bodies.clone()).is_empty());
    }

    #[test]
    fn test_compare_detects_single_bit() {
        let a = vec![sample(); 3];
        let mut b = a.clone();
        b[1].position[0] = f32::from_bits(b[1].position[0].to_bits() ^ 1);
        assert_eq!(compare_bodies(&a, &b), vec![1]);
    }

    #[test]
    fn test_compare_signed_zero_differs() {
        let a = vec![Body::at_rest(Vec3::ZERO, Vec2::ZERO)];
        let mut b = a.clone();
        b[0].velocity[1] = -0.0;
        assert_eq!(compare_bodies(&a, &b), vec![0]);
    }

    #[test]
    fn test_compare_length_mismatch() {
        let a = vec![sample(); 2];
        let b = vec![sample(); 4];
        assert_eq!(compare_bodies(&a, &b), vec![2, 3]);
    }
}
