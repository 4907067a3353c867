//! Randomized starting scene
//!
//! Satellites start in the four quadrants around the image center, on roughly
//! circular orbits, with every other one orbiting the opposite way.

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use satellite_physics::Body;

/// Generator for a scenario seed; 0 draws a fresh OS seed
pub fn scenario_rng(seed: u64) -> StdRng {
    if seed == 0 {
        StdRng::from_os_rng()
    } else {
        StdRng::seed_from_u64(seed)
    }
}

fn uniform<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.random::<f32>() * (max - min) + min
}

/// Spawn `count` satellites around the center of a `width` × `height` image
pub fn spawn_bodies<R: Rng>(count: usize, width: u32, height: u32, rng: &mut R) -> Vec<Body> {
    let center = Vec2::new((width / 2) as f32, (height / 2) as f32);

    (0..count)
        .map(|i| {
            // Reddish
            let red = uniform(rng, 0.0, 0.15) + 0.1;
            let green = uniform(rng, 0.0, 0.14);
            let blue = uniform(rng, 0.0, 0.16);
            let color = Vec3::new(red, green, blue);

            let mut position = Vec2::new(
                center.x - uniform(rng, 50.0, 320.0),
                center.y - uniform(rng, 50.0, 320.0),
            );
            if (i / 2) % 2 != 0 {
                position.x = width as f32 - position.x;
            }
            if i >= count / 2 {
                position.y = height as f32 - position.y;
            }

            let to_center = position - center;
            let scale = (0.06 + uniform(rng, -0.01, 0.01)) / to_center.length();
            let mut velocity = Vec2::new(-to_center.y, to_center.x) * scale;
            if i % 2 == 0 {
                velocity = -velocity;
            }

            Body::new(color, position, velocity)
        })
        .collect()
}
