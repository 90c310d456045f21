//! Core state types for the experiment simulation.
//!
//! Defines the particle/world structs shared by every experiment:
//! - `Particle` using `PVec2` (2d position/velocity, mass, display radius)
//! - `World` holding the authoritative particle list for the current run
//!
//! Particles are created once per experiment initialization; within a run
//! only position and velocity mutate.

use nalgebra::Vector2;
pub type PVec2 = Vector2<f64>;

/// Display radius derived from mass. Computed once at initialization,
/// never recomputed afterwards.
pub fn radius_for_mass(m: f64) -> f64 {
    m.sqrt() + 4.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u32, // stable identity, assigned at initialization
    pub x: PVec2, // position
    pub v: PVec2, // velocity
    pub m: f64, // mass, > 0 for the particle's lifetime
    pub radius: f64, // display radius, radius_for_mass(m)
}

impl Particle {
    /// Build a particle from an initial state tuple. The display radius is
    /// derived from the mass here and nowhere else.
    pub fn new(id: u32, x: PVec2, v: PVec2, m: f64) -> Self {
        Self {
            id,
            x,
            v,
            m,
            radius: radius_for_mass(m),
        }
    }

    /// Effective collision radius (`sqrt(m)`), distinct from the display
    /// radius used for rendering and wall containment.
    pub fn contact_radius(&self) -> f64 {
        self.m.sqrt()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub particles: Vec<Particle>, // authoritative particle list
}

impl World {
    pub fn new(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn empty() -> Self {
        Self {
            particles: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
