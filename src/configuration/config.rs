//! Configuration types for loading experiments from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of an
//! experiment. An experiment consists of:
//!
//! - [`ForceModelConfig`] – which force model variant drives the run
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`ParticleConfig`]   – initial state for each particle
//! - [`ExperimentConfig`] – top-level wrapper used to load from YAML
//!
//! # YAML format
//! An example experiment YAML matching these types:
//!
//! ```yaml
//! experiment: gravity       # or "motion", "multiforce"
//!
//! parameters:
//!   G: 13.5                 # gravitational constant
//!   min_dist: 5.0           # pairwise force floor
//!   soften: 0.0             # additive softening (multiforce)
//!   repulse_dist: 0.0       # repulsion activation distance (multiforce)
//!   repulse_k: 0.0          # repulsion strength (multiforce)
//!   restitution: 1.0        # wall bounce velocity retention
//!   max_speed: 8.0          # per-tick speed clamp
//!   width: 400.0            # arena width
//!   height: 400.0           # arena height
//!   trail_cap: 20           # trail window size
//!   seed: 42                # optional, multiforce initialization
//!
//! particles:
//!   - x: [200.0, 200.0]
//!     v: [0.0, 0.0]
//!     m: 80.0
//!   - x: [320.0, 200.0]
//!     v: [0.0, 3.0]
//!     m: 12.0
//! ```
//!
//! A `multiforce` experiment may omit `particles` entirely, in which case
//! initialization draws a randomized set (seeded when `seed` is present).
//!
//! Malformed configuration is rejected up front by [`ExperimentConfig::validate`]
//! with a [`ConfigError`] describing the problem; nothing is discovered
//! mid-simulation.

use serde::Deserialize;
use thiserror::Error;

/// Which force model variant drives the experiment
/// `experiment: "gravity"`, `"motion"` or `"multiforce"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceModelConfig {
    #[serde(rename = "gravity")] // Pairwise Newtonian attraction, orbits
    Gravity,

    #[serde(rename = "motion")] // Ballistic motion with elastic collisions
    Motion,

    #[serde(rename = "multiforce")] // Damped attraction + short-range repulsion
    MultiForce,
}

/// Global numerical and physical parameters for an experiment
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub G: f64,            // gravitational constant
    pub min_dist: f64,     // pairwise force floor
    pub soften: f64,       // additive softening in the force denominator
    pub repulse_dist: f64, // repulsion activation distance
    pub repulse_k: f64,    // repulsion strength
    pub restitution: f64,  // wall bounce velocity retention
    pub max_speed: f64,    // per-tick speed clamp
    pub width: f64,        // arena width
    pub height: f64,       // arena height
    pub trail_cap: usize,  // trail window size
    #[serde(default)]
    pub seed: Option<u64>, // seed for randomized initialization
}

/// Configuration for a single particle's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct ParticleConfig {
    pub x: [f64; 2], // initial position in arena units
    pub v: [f64; 2], // initial velocity in arena units per tick
    pub m: f64,      // mass, must be positive
}

/// Top-level experiment configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ExperimentConfig {
    pub experiment: ForceModelConfig, // force model variant for the run
    pub parameters: ParametersConfig, // numerical and physical parameters
    #[serde(default)]
    pub particles: Vec<ParticleConfig>, // scripted initial particle set
}

/// Rejection reasons for a malformed experiment configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("arena bounds must be positive, got {width}x{height}")]
    NonPositiveArena { width: f64, height: f64 },

    #[error("restitution must be within [0, 1], got {0}")]
    RestitutionOutOfRange(f64),

    #[error("max_speed must be positive, got {0}")]
    NonPositiveMaxSpeed(f64),

    #[error("trail_cap must be at least 1")]
    ZeroTrailCap,

    #[error("particle {index} has non-positive mass {m}")]
    NonPositiveMass { index: usize, m: f64 },

    #[error("particle {index} starts outside the arena at ({x}, {y})")]
    OutOfArena { index: usize, x: f64, y: f64 },
}

impl ExperimentConfig {
    /// Check every initialization-time invariant. Called by the scenario
    /// builder before any runtime state is constructed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.parameters;

        if p.width <= 0.0 || p.height <= 0.0 {
            return Err(ConfigError::NonPositiveArena {
                width: p.width,
                height: p.height,
            });
        }
        if !(0.0..=1.0).contains(&p.restitution) {
            return Err(ConfigError::RestitutionOutOfRange(p.restitution));
        }
        if p.max_speed <= 0.0 {
            return Err(ConfigError::NonPositiveMaxSpeed(p.max_speed));
        }
        if p.trail_cap == 0 {
            return Err(ConfigError::ZeroTrailCap);
        }

        for (index, pc) in self.particles.iter().enumerate() {
            if pc.m <= 0.0 {
                return Err(ConfigError::NonPositiveMass { index, m: pc.m });
            }
            let [x, y] = pc.x;
            if x < 0.0 || x > p.width || y < 0.0 || y > p.height {
                return Err(ConfigError::OutOfArena { index, x, y });
            }
        }

        Ok(())
    }
}
