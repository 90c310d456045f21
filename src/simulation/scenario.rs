//! Build fully-initialized experiments from templates or configuration
//!
//! Takes an [`ExperimentKind`] (built-in template) or an
//! [`ExperimentConfig`] (YAML-facing, validated) and produces the runtime
//! bundle ([`Experiment`]) containing:
//! - numerical parameters (`Parameters`)
//! - world state (`World` with particles at tick 0)
//! - the active force model (one `ForceModel` variant, selected here once)
//! - a fresh trail recorder
//!
//! Gravity and Motion templates are literal fixed particle sets and
//! reproduce bit-identically across calls. The MultiForce template draws
//! positions, velocities and masses from documented ranges; without an
//! explicit seed it uses OS entropy and is not reproducible across calls.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::configuration::config::{ConfigError, ExperimentConfig, ForceModelConfig};
use crate::simulation::forces::{AttractRepel, ElasticCollisions, ForceModel, NewtonianGravity};
use crate::simulation::integrator::integrate_step;
use crate::simulation::params::Parameters;
use crate::simulation::states::{radius_for_mass, PVec2, Particle, World};
use crate::simulation::trails::TrailRecorder;

/// Number of particles drawn for the randomized MultiForce template.
const MULTI_FORCE_COUNT: usize = 12;

/// The three experiment variants offered by the lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentKind {
    Gravity,
    Motion,
    MultiForce,
}

impl ExperimentKind {
    /// Parse an experiment name as used by the embedding application.
    /// Unrecognized names yield `None`; the clock maps that to an empty
    /// particle set plus a warning, never a failure.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "gravity" => Some(Self::Gravity),
            "motion" => Some(Self::Motion),
            "multiforce" => Some(Self::MultiForce),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Gravity => "gravity",
            Self::Motion => "motion",
            Self::MultiForce => "multiforce",
        }
    }

    /// Default parameter set for this variant.
    pub fn default_parameters(&self) -> Parameters {
        match self {
            Self::Gravity => Parameters::gravity(),
            Self::Motion => Parameters::motion(),
            Self::MultiForce => Parameters::multi_force(),
        }
    }
}

/// Runtime bundle for one experiment run.
///
/// Owns the particle store, the selected force model and the trail
/// recorder; the clock drives it one tick at a time. Rebuilt wholesale on
/// reset or experiment switch, never migrated.
pub struct Experiment {
    pub kind: ExperimentKind,
    pub parameters: Parameters,
    pub world: World,
    pub forces: Box<dyn ForceModel>,
    pub trails: TrailRecorder,
}

impl Experiment {
    /// Build the built-in template for `kind`. The seed only affects the
    /// randomized MultiForce initialization; fixed templates ignore it.
    pub fn from_kind(kind: ExperimentKind, seed: Option<u64>) -> Self {
        let mut parameters = kind.default_parameters();
        parameters.seed = seed;

        let particles = match kind {
            ExperimentKind::Gravity => gravity_template(),
            ExperimentKind::Motion => motion_template(),
            ExperimentKind::MultiForce => multi_force_template(&parameters),
        };

        Self::assemble(kind, parameters, particles)
    }

    /// Build an experiment from a validated YAML configuration.
    ///
    /// A `multiforce` config with no scripted particles falls back to the
    /// randomized template (honoring the configured seed); the fixed
    /// variants use the scripted set as-is.
    pub fn build(cfg: ExperimentConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        let kind = match cfg.experiment {
            ForceModelConfig::Gravity => ExperimentKind::Gravity,
            ForceModelConfig::Motion => ExperimentKind::Motion,
            ForceModelConfig::MultiForce => ExperimentKind::MultiForce,
        };

        let p = &cfg.parameters;
        let parameters = Parameters {
            G: p.G,
            min_dist: p.min_dist,
            soften: p.soften,
            repulse_dist: p.repulse_dist,
            repulse_k: p.repulse_k,
            restitution: p.restitution,
            max_speed: p.max_speed,
            width: p.width,
            height: p.height,
            trail_cap: p.trail_cap,
            seed: p.seed,
        };

        let particles = if cfg.particles.is_empty() && kind == ExperimentKind::MultiForce {
            multi_force_template(&parameters)
        } else {
            cfg.particles
                .iter()
                .enumerate()
                .map(|(i, pc)| {
                    Particle::new(
                        i as u32,
                        PVec2::new(pc.x[0], pc.x[1]),
                        PVec2::new(pc.v[0], pc.v[1]),
                        pc.m,
                    )
                })
                .collect()
        };

        Ok(Self::assemble(kind, parameters, particles))
    }

    fn assemble(kind: ExperimentKind, parameters: Parameters, particles: Vec<Particle>) -> Self {
        let forces: Box<dyn ForceModel> = match kind {
            ExperimentKind::Gravity => Box::new(NewtonianGravity {
                G: parameters.G,
                min_dist: parameters.min_dist,
            }),
            ExperimentKind::Motion => Box::new(ElasticCollisions),
            ExperimentKind::MultiForce => Box::new(AttractRepel {
                G: parameters.G,
                soften: parameters.soften,
                repulse_dist: parameters.repulse_dist,
                repulse_k: parameters.repulse_k,
            }),
        };

        let trails = TrailRecorder::new(particles.len(), parameters.trail_cap);
        log::info!(
            "built {} experiment with {} particles",
            kind.name(),
            particles.len()
        );

        Self {
            kind,
            parameters,
            world: World::new(particles),
            forces,
            trails,
        }
    }

    /// Advance the run by exactly one tick: force accumulation over the
    /// current snapshot, contact resolution, integration, then trail
    /// recording (when capture is enabled).
    pub fn step(&mut self, record_trails: bool) {
        let n = self.world.len();

        let mut accels = vec![PVec2::zeros(); n];
        self.forces.accumulate_accels(&self.world, &mut accels);
        self.forces.resolve_contacts(&mut self.world);

        integrate_step(&mut self.world, &accels, &self.parameters);

        if record_trails {
            self.trails.record_all(&self.world);
        }
    }
}

/// Fixed two-body template for the gravity experiment: a heavy central
/// body and a light orbiter.
fn gravity_template() -> Vec<Particle> {
    vec![
        Particle::new(0, PVec2::new(200.0, 200.0), PVec2::new(0.0, 0.0), 80.0),
        Particle::new(1, PVec2::new(320.0, 200.0), PVec2::new(0.0, 3.0), 12.0),
    ]
}

/// Fixed five-body template for the motion/collision experiment.
fn motion_template() -> Vec<Particle> {
    vec![
        Particle::new(0, PVec2::new(80.0, 120.0), PVec2::new(3.0, 1.0), 15.0),
        Particle::new(1, PVec2::new(300.0, 100.0), PVec2::new(-2.0, 2.0), 20.0),
        Particle::new(2, PVec2::new(200.0, 300.0), PVec2::new(1.0, -3.0), 12.0),
        Particle::new(3, PVec2::new(120.0, 260.0), PVec2::new(2.0, 2.0), 18.0),
        Particle::new(4, PVec2::new(330.0, 320.0), PVec2::new(-3.0, -1.0), 10.0),
    ]
}

/// Randomized template for the multi-force experiment.
///
/// Position is uniform over the arena (inset by the display radius),
/// velocity components are uniform in [-2, 2], mass is uniform in [8, 23].
/// With `parameters.seed` set the draw is reproducible; otherwise it comes
/// from OS entropy.
fn multi_force_template(parameters: &Parameters) -> Vec<Particle> {
    let mut rng = match parameters.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    };

    (0..MULTI_FORCE_COUNT)
        .map(|i| {
            let m = rng.random_range(8.0..23.0);
            let r = radius_for_mass(m);
            let x = PVec2::new(
                rng.random_range(r..parameters.width - r),
                rng.random_range(r..parameters.height - r),
            );
            let v = PVec2::new(rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0));
            Particle::new(i as u32, x, v, m)
        })
        .collect()
}
