//! Whole-frame painting
//!
//! [`paint`] splits the grid into rows and shades them on the rayon pool;
//! [`paint_sequential`] walks every pixel in index order on the calling
//! thread and is what the oracle uses.

use crate::pixel::PixelGrid;
use crate::shader::FieldShader;
use glam::Vec2;
use rayon::prelude::*;
use satellite_physics::Body;

/// Shade every pixel of `grid`, in parallel over rows
///
/// Returns once every row is written.
pub fn paint<S>(shader: &S, bodies: &[Body], attractor: Vec2, grid: &mut PixelGrid)
where
    S: FieldShader + ?Sized,
{
    let width = grid.width() as usize;
    if width == 0 {
        return;
    }

    grid.pixels_mut()
        .par_chunks_exact_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as f32;
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = shader.shade(bodies, attractor, Vec2::new(x as f32, y));
            }
        });
}

/// Shade every pixel of `grid` on the calling thread
pub fn paint_sequential<S>(shader: &S, bodies: &[Body], attractor: Vec2, grid: &mut PixelGrid)
where
    S: FieldShader + ?Sized,
{
    let width = grid.width().max(1) as usize;
    for (i, pixel) in grid.pixels_mut().iter_mut().enumerate() {
        let position = Vec2::new((i % width) as f32, (i / width) as f32);
        *pixel = shader.shade(bodies, attractor, position);
    }
}

/// Allocate a grid and [`paint`] it
pub fn render<S>(shader: &S, bodies: &[Body], attractor: Vec2, width: u32, height: u32) -> PixelGrid
where
    S: FieldShader + ?Sized,
{
    let mut grid = PixelGrid::new(width, height);
    paint(shader, bodies, attractor, &mut grid);
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;
    use crate::shader::{FastField, FieldMode, FieldParams};
    use glam::Vec3;

    const WIDTH: u32 = 96;
    const HEIGHT: u32 = 64;

    fn scene() -> (Vec<Body>, Vec2) {
        let bodies = vec![
            Body::at_rest(Vec3::new(0.21, 0.05, 0.11), Vec2::new(20.0, 15.0)),
            Body::at_rest(Vec3::new(0.13, 0.12, 0.02), Vec2::new(70.0, 22.0)),
            Body::at_rest(Vec3::new(0.18, 0.01, 0.15), Vec2::new(40.0, 50.0)),
            Body::at_rest(Vec3::new(0.24, 0.09, 0.06), Vec2::new(88.0, 60.0)),
        ];
        (bodies, Vec2::new(48.0, 32.0))
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (bodies, attractor) = scene();
        let shader = FastField::default();

        let parallel = render(&shader, &bodies, attractor, WIDTH, HEIGHT);
        let mut sequential = PixelGrid::new(WIDTH, HEIGHT);
        paint_sequential(&shader, &bodies, attractor, &mut sequential);

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_pixel_order_does_not_matter() {
        let (bodies, attractor) = scene();
        let shader = FastField::default();
        let expected = render(&shader, &bodies, attractor, WIDTH, HEIGHT);

        let mut reversed = PixelGrid::new(WIDTH, HEIGHT);
        for index in (0..reversed.len()).rev() {
            let (x, y) = reversed.coords(index);
            reversed.pixels_mut()[index] =
                shader.shade(&bodies, attractor, Vec2::new(x as f32, y as f32));
        }

        assert_eq!(expected, reversed);
    }

    #[test]
    fn test_features_land_at_their_coordinates() {
        let (bodies, attractor) = scene();
        let grid = render(&FastField::default(), &bodies, attractor, WIDTH, HEIGHT);

        assert_eq!(grid.get(48, 32), Some(Pixel::BLACK));
        assert_eq!(grid.get(20, 15), Some(Pixel::WHITE));
        assert_eq!(grid.get(88, 60), Some(Pixel::WHITE));
        assert_ne!(grid.get(0, 63), Some(Pixel::WHITE));
    }

    #[test]
    fn test_boxed_shader_paints() {
        let (bodies, attractor) = scene();
        let shader = FieldMode::Reference.shader(FieldParams::default());
        let mut grid = PixelGrid::new(WIDTH, HEIGHT);
        paint(shader.as_ref(), &bodies, attractor, &mut grid);
        assert_eq!(grid.get(48, 32), Some(Pixel::BLACK));
    }

    #[test]
    fn test_repaint_overwrites_previous_frame() {
        let (mut bodies, attractor) = scene();
        let shader = FastField::default();
        let mut grid = render(&shader, &bodies, attractor, WIDTH, HEIGHT);
        assert_eq!(grid.get(20, 15), Some(Pixel::WHITE));

        bodies[0].position = [5.0, 5.0];
        paint(&shader, &bodies, attractor, &mut grid);
        assert_eq!(grid.get(5, 5), Some(Pixel::WHITE));
        assert_ne!(grid.get(20, 15), Some(Pixel::WHITE));
    }
}
