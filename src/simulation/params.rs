//! Numerical and physical parameters for one experiment run
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant and softening knobs (`G`, `min_dist`, `soften`),
//! - short-range repulsion threshold and strength,
//! - wall restitution and the per-tick speed clamp,
//! - arena bounds, trail capacity, and the optional RNG seed
//!
//! Each experiment variant has a defaults constructor; custom values come
//! from the YAML configuration layer.

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub min_dist: f64, // pairwise force floor, below it a pair is skipped
    pub soften: f64, // additive softening term in the force denominator
    pub repulse_dist: f64, // separation below which repulsion activates
    pub repulse_k: f64, // repulsion strength
    pub restitution: f64, // velocity fraction kept on a wall bounce
    pub max_speed: f64, // per-tick velocity magnitude clamp
    pub width: f64, // arena width
    pub height: f64, // arena height
    pub trail_cap: usize, // positions kept per particle trail
    pub seed: Option<u64>, // RNG seed for randomized initialization
}

impl Parameters {
    /// Defaults for the gravity/orbits experiment. Walls reflect without
    /// loss; the force model itself applies no bounding force. The arena
    /// is wider than the other experiments so the template orbit has room
    /// to drift without wall contact.
    pub fn gravity() -> Self {
        Self {
            G: 13.5,
            min_dist: 5.0,
            soften: 0.0,
            repulse_dist: 0.0,
            repulse_k: 0.0,
            restitution: 1.0,
            max_speed: 8.0,
            width: 600.0,
            height: 600.0,
            trail_cap: 20,
            seed: None,
        }
    }

    /// Defaults for the ballistic motion/collision experiment.
    pub fn motion() -> Self {
        Self {
            G: 0.0,
            min_dist: 0.0,
            soften: 0.0,
            repulse_dist: 0.0,
            repulse_k: 0.0,
            restitution: 0.9,
            max_speed: 8.0,
            width: 400.0,
            height: 400.0,
            trail_cap: 20,
            seed: None,
        }
    }

    /// Defaults for the multi-force experiment: damped attraction plus
    /// short-range repulsion below 40 units of separation.
    pub fn multi_force() -> Self {
        Self {
            G: 2.0,
            min_dist: 0.0,
            soften: 150.0,
            repulse_dist: 40.0,
            repulse_k: 8.0,
            restitution: 0.8,
            max_speed: 8.0,
            width: 400.0,
            height: 400.0,
            trail_cap: 20,
            seed: None,
        }
    }
}
