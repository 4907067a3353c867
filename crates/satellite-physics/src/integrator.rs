//! Gravity integrator
//!
//! Every body is pulled toward a single attractor with `G / d²` and advanced
//! by many explicit Euler sub-steps per frame. Bodies never read each other,
//! so the per-body work is split across threads while each body's sub-step
//! chain stays sequential.
//!
//! NOTE: a body sitting exactly on the attractor divides by zero. The NaN/Inf
//! is carried into the body like any other value; nothing here guards it.

use crate::body::Body;
use crate::constants::{DELTA_TIME, GRAVITY, SUBSTEPS};
use glam::{DVec2, Vec2};
use rayon::prelude::*;

/// Integration settings shared by every body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegratorParams {
    pub gravity: f64,
    /// Simulated time per frame
    pub delta_time: f64,
    /// Euler sub-steps per frame
    pub substeps: u32,
}

impl Default for IntegratorParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            delta_time: DELTA_TIME,
            substeps: SUBSTEPS,
        }
    }
}

/// Advance every body by one frame, in parallel over bodies
///
/// The join at the end of the parallel loop is the barrier the renderer
/// relies on: when this returns, every body holds its final state.
pub fn advance(bodies: &mut [Body], attractor: Vec2, params: &IntegratorParams) {
    let attractor = attractor.as_dvec2();
    bodies
        .par_iter_mut()
        .for_each(|body| advance_body(body, attractor, params));
}

/// Sequential reference integrator
///
/// Walks sub-steps in the outer loop and bodies in the inner loop. Because
/// the per-body arithmetic is shared with [`advance`], the two produce the
/// same bits.
pub fn advance_sequential(bodies: &mut [Body], attractor: Vec2, params: &IntegratorParams) {
    let attractor = attractor.as_dvec2();
    let mut state: Vec<(DVec2, DVec2)> = bodies
        .iter()
        .map(|body| (body.position().as_dvec2(), body.velocity().as_dvec2()))
        .collect();

    for _ in 0..params.substeps {
        for (position, velocity) in state.iter_mut() {
            substep(position, velocity, attractor, params);
        }
    }

    for (body, (position, velocity)) in bodies.iter_mut().zip(state) {
        store(body, position, velocity);
    }
}

fn advance_body(body: &mut Body, attractor: DVec2, params: &IntegratorParams) {
    // f64 accumulators: 100k tiny increments vanish at f32
    let mut position = body.position().as_dvec2();
    let mut velocity = body.velocity().as_dvec2();

    for _ in 0..params.substeps {
        substep(&mut position, &mut velocity, attractor, params);
    }

    store(body, position, velocity);
}

#[inline(always)]
fn substep(position: &mut DVec2, velocity: &mut DVec2, attractor: DVec2, params: &IntegratorParams) {
    let to_body = *position - attractor;
    let dist_squared = to_body.length_squared();
    let dist = dist_squared.sqrt();

    let direction = to_body / dist;
    let accumulation = params.gravity / dist_squared;
    let steps = params.substeps as f64;

    *velocity -= direction * accumulation * params.delta_time / steps;
    *position += *velocity * params.delta_time / steps;
}

fn store(body: &mut Body, position: DVec2, velocity: DVec2) {
    body.position = position.as_vec2().to_array();
    body.velocity = velocity.as_vec2().to_array();
}
