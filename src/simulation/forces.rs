//! Force models for the experiment simulation
//!
//! Defines the `ForceModel` trait plus the three variant implementations,
//! one per experiment:
//! - `NewtonianGravity` — pairwise attraction with a minimum-distance floor
//! - `ElasticCollisions` — ballistic motion with pairwise elastic contacts
//! - `AttractRepel` — softened attraction plus short-range repulsion
//!
//! Exactly one model is active per run, selected when the experiment is
//! built. Models add per-particle accelerations into a caller-zeroed
//! buffer; the mass division is folded in here, so the integrator applies
//! the buffer directly as a velocity delta.

use crate::simulation::states::{PVec2, World};

/// Strategy interface for one experiment's force computation.
///
/// `accumulate_accels` adds each body's acceleration for this tick into
/// `out[i]`. `resolve_contacts` applies pairwise velocity constraints
/// (elastic collisions); the default is no contacts.
pub trait ForceModel {
    fn accumulate_accels(&self, world: &World, out: &mut [PVec2]);

    fn resolve_contacts(&self, _world: &mut World) {}
}

/// Pairwise Newtonian attraction, `F = G·m1·m2 / d^2`, along the line
/// connecting each pair.
///
/// Pairs closer than `min_dist` are skipped entirely for the tick: a
/// transient degenerate state that resolves once velocities diverge the
/// bodies again. This floor is the model's only guard against division
/// blow-up; there is no bounding force.
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub min_dist: f64, // pairwise floor, pairs below it contribute nothing
}

impl ForceModel for NewtonianGravity {
    fn accumulate_accels(&self, world: &World, out: &mut [PVec2]) {
        let n = world.particles.len();
        if n == 0 {
            return;
        }

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let pi = &world.particles[i];
            let xi = pi.x; // position of body i
            let mi = pi.m; // mass of body i

            for j in (i + 1)..n {
                let pj = &world.particles[j];

                // r is the displacement vector from i to j.
                // i feels a pull along +r, j feels a pull along -r.
                let r = pj.x - xi;
                let d2 = r.norm_squared();

                // Minimum-distance floor: skip the pair this tick.
                // Also covers the coincident case d = 0.
                if d2 < self.min_dist * self.min_dist {
                    continue;
                }

                // Acceleration magnitude on i is G·mj / d^2; with the
                // unnormalized r the distance factor becomes 1 / d^3:
                //   a = G·m · r / d^3
                let d = d2.sqrt();
                let coef = self.G / (d2 * d);

                // Equal and opposite, scaled by the other body's mass
                out[i] += coef * pj.m * r;
                out[j] -= coef * mi * r;
            }
        }
    }
}

/// Ballistic motion with pairwise elastic collisions.
///
/// No inter-particle force: accelerations stay zero. Contacts are resolved
/// by projecting both velocities onto the collision normal and applying the
/// 1-D elastic-collision formula there, which conserves momentum along that
/// axis exactly. Tangential components are untouched.
pub struct ElasticCollisions;

impl ForceModel for ElasticCollisions {
    fn accumulate_accels(&self, _world: &World, _out: &mut [PVec2]) {
        // Ballistic: no inter-particle attraction.
    }

    fn resolve_contacts(&self, world: &mut World) {
        let n = world.particles.len();

        for i in 0..n {
            for j in (i + 1)..n {
                // Split the slice so both bodies can be borrowed mutably
                let (head, tail) = world.particles.split_at_mut(j);
                let a = &mut head[i];
                let b = &mut tail[0];

                let r = b.x - a.x;
                let d2 = r.norm_squared();

                // Coincident pair: skip for this tick
                if d2 <= f64::EPSILON {
                    continue;
                }

                // Contact when separation < sum of effective radii (sqrt(m))
                let d = d2.sqrt();
                if d >= a.contact_radius() + b.contact_radius() {
                    continue;
                }

                // Collision normal, from a toward b
                let normal = r / d;

                // Velocity components along the normal
                let va = a.v.dot(&normal);
                let vb = b.v.dot(&normal);

                // Only resolve closing pairs; separating bodies that still
                // overlap must not be re-collided every tick
                if va - vb <= 0.0 {
                    continue;
                }

                // 1-D elastic collision along the normal:
                //   va' = ((ma - mb)·va + 2·mb·vb) / (ma + mb)
                //   vb' = ((mb - ma)·vb + 2·ma·va) / (ma + mb)
                let msum = a.m + b.m;
                let va_new = ((a.m - b.m) * va + 2.0 * b.m * vb) / msum;
                let vb_new = ((b.m - a.m) * vb + 2.0 * a.m * va) / msum;

                // Replace the normal component, keep the tangential one
                a.v += (va_new - va) * normal;
                b.v += (vb_new - vb) * normal;
            }
        }
    }
}

/// Damped attraction combined with short-range repulsion.
///
/// Attraction uses an additive softening term in the denominator,
/// `G·m1·m2 / (d^2 + soften)`, so the magnitude stays bounded at contact.
/// Below `repulse_dist` a repulsive term with the same shape pushes the
/// pair apart, preventing total collapse.
#[allow(non_snake_case)]
pub struct AttractRepel {
    pub G: f64, // gravitational constant (smaller than plain gravity)
    pub soften: f64, // additive softening in the denominator
    pub repulse_dist: f64, // separation below which repulsion activates
    pub repulse_k: f64, // repulsion strength
}

impl ForceModel for AttractRepel {
    fn accumulate_accels(&self, world: &World, out: &mut [PVec2]) {
        let n = world.particles.len();
        if n == 0 {
            return;
        }

        for i in 0..n {
            let pi = &world.particles[i];
            let xi = pi.x;
            let mi = pi.m;

            for j in (i + 1)..n {
                let pj = &world.particles[j];

                let r = pj.x - xi;
                let d2 = r.norm_squared();

                // Coincident pair: direction is undefined, skip this tick
                if d2 <= f64::EPSILON {
                    continue;
                }

                let d = d2.sqrt();
                let normal = r / d;

                // Softened attraction: G·m / (d^2 + soften)
                let denom = d2 + self.soften;
                let attract = self.G / denom;

                out[i] += attract * pj.m * normal;
                out[j] -= attract * mi * normal;

                // Short-range repulsion below the activation distance,
                // same softened shape, opposite direction
                if d < self.repulse_dist {
                    let repulse = self.repulse_k / denom;
                    out[i] -= repulse * pj.m * normal;
                    out[j] += repulse * mi * normal;
                }
            }
        }
    }
}
