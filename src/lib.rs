pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{radius_for_mass, PVec2, Particle, World};
pub use simulation::params::Parameters;
pub use simulation::forces::{AttractRepel, ElasticCollisions, ForceModel, NewtonianGravity};
pub use simulation::integrator::integrate_step;
pub use simulation::trails::TrailRecorder;
pub use simulation::scenario::{Experiment, ExperimentKind};
pub use simulation::clock::{ClockState, FrameToken, ParticleView, SimulationClock};

pub use configuration::config::{
    ConfigError, ExperimentConfig, ForceModelConfig, ParametersConfig, ParticleConfig,
};

pub use benchmark::benchmark::{bench_forces, bench_ticks};
