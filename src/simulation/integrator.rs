//! Per-tick integration for the experiment simulation
//!
//! Advances every particle from its accumulated acceleration and then
//! enforces the two run-wide invariants:
//! - velocity magnitude stays within `params.max_speed`
//! - position stays inside the arena, walls reflecting the offending
//!   velocity component scaled by the restitution coefficient
//!
//! Wall resolution is positional correction, not a soft force, and runs
//! after the force/contact effects so a particle can never end a tick
//! violating both a pairwise constraint and a wall constraint.

use crate::simulation::params::Parameters;
use crate::simulation::states::{PVec2, Particle, World};

/// Advance the world by one tick given per-particle accelerations.
///
/// Per particle, in order: velocity update (`v += a`, the mass division is
/// already folded into `a`), position update (`x += v`, one tick is the
/// time unit), speed clamp, wall resolution.
pub fn integrate_step(world: &mut World, accels: &[PVec2], params: &Parameters) {
    for (p, a) in world.particles.iter_mut().zip(accels.iter()) {
        // Kick: v_n+1 = v_n + a_n
        p.v += *a;

        // Drift: x_n+1 = x_n + v_n+1
        p.x += p.v;

        clamp_speed(p, params.max_speed);
        resolve_walls(p, params);
    }
}

/// Rescale the velocity to `max_speed` preserving direction when the
/// magnitude exceeds it.
fn clamp_speed(p: &mut Particle, max_speed: f64) {
    let speed = p.v.norm();
    if speed > max_speed {
        p.v *= max_speed / speed;
    }
}

/// Reflect and clamp against the arena bounds.
///
/// Containment accounts for the display radius: the particle center is
/// kept within `[r, bound - r]` per axis. The offending velocity component
/// is reversed and scaled by the restitution coefficient.
fn resolve_walls(p: &mut Particle, params: &Parameters) {
    let r = p.radius;

    if p.x.x < r {
        p.x.x = r;
        p.v.x = -p.v.x * params.restitution;
    } else if p.x.x > params.width - r {
        p.x.x = params.width - r;
        p.v.x = -p.v.x * params.restitution;
    }

    if p.x.y < r {
        p.x.y = r;
        p.v.y = -p.v.y * params.restitution;
    } else if p.x.y > params.height - r {
        p.x.y = params.height - r;
        p.v.y = -p.v.y * params.restitution;
    }
}
