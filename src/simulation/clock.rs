//! Cooperative tick driver for the experiment simulation
//!
//! The clock owns no scheduling of its own: the embedding application arms
//! a frame token, and hands it back on its next frame signal. One token
//! buys at most one tick. Reset and experiment switches bump an epoch
//! counter, so a token armed before the switch can never tick the freshly
//! initialized particle store.
//!
//! States: `Idle -> Running <-> Paused -> Idle` (via reset). All
//! transitions are caller-driven; the clock never self-transitions except
//! Running -> Running on successive ticks.

use crate::simulation::scenario::{Experiment, ExperimentKind};
use crate::simulation::states::PVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Idle,    // no particles, or a freshly initialized unstepped set
    Running, // each frame signal triggers exactly one tick
    Paused,  // frame signals are ignored, state held as last computed
}

/// Permission to run one tick, valid until the next reset.
///
/// The embedding application arms one of these per frame-signal request
/// and passes it back when the signal fires. A token from before a reset
/// carries a stale epoch and is silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken {
    epoch: u64,
}

/// Read-only per-particle snapshot row handed to the rendering layer.
#[derive(Debug, Clone)]
pub struct ParticleView {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub trail: Vec<PVec2>, // oldest first
}

pub struct SimulationClock {
    experiment: Option<Experiment>,
    state: ClockState,
    ticks: u64, // cumulative ticks for the current run
    epoch: u64, // bumped on every reset/switch, invalidates armed tokens
    trails_enabled: bool,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self {
            experiment: None,
            state: ClockState::Idle,
            ticks: 0,
            epoch: 0,
            trails_enabled: true,
        }
    }

    /// Switch to a built-in experiment: cancel pending frames, rebuild the
    /// store and trails wholesale, enter `Idle` with a zeroed tick count.
    pub fn select_experiment(&mut self, kind: ExperimentKind, seed: Option<u64>) {
        self.install(Experiment::from_kind(kind, seed));
    }

    /// Switch by experiment name. An unrecognized name yields an empty
    /// particle set and a warning; the clock stays in `Idle`.
    pub fn select_experiment_named(&mut self, name: &str) {
        match ExperimentKind::from_name(name) {
            Some(kind) => self.select_experiment(kind, None),
            None => {
                log::warn!("unknown experiment type {name:?}; clearing particle store");
                self.clear();
            }
        }
    }

    /// Install an already-built experiment (e.g. from a YAML config).
    /// Same atomicity as `select_experiment`: cancel, replace, then allow
    /// ticking to resume.
    pub fn install(&mut self, experiment: Experiment) {
        self.epoch += 1;
        self.ticks = 0;
        self.state = ClockState::Idle;
        self.experiment = Some(experiment);
    }

    /// Re-initialize the current experiment from its template and return
    /// to `Idle`. No-op without an experiment.
    pub fn reset(&mut self) {
        if let Some(exp) = &self.experiment {
            let kind = exp.kind;
            let seed = exp.parameters.seed;
            self.select_experiment(kind, seed);
        }
    }

    fn clear(&mut self) {
        self.epoch += 1;
        self.ticks = 0;
        self.state = ClockState::Idle;
        self.experiment = None;
    }

    /// Toggle Running/Paused. Starting requires an installed experiment;
    /// without one the clock stays `Idle`.
    pub fn set_running(&mut self, run: bool) {
        if run {
            if self.experiment.is_some() {
                self.state = ClockState::Running;
            }
        } else if self.state == ClockState::Running {
            self.state = ClockState::Paused;
        }
    }

    /// Toggle trail capture. Turning capture off stops growth immediately
    /// but keeps the recorded history; history clears only on reset.
    pub fn set_trails_enabled(&mut self, on: bool) {
        self.trails_enabled = on;
    }

    pub fn trails_enabled(&self) -> bool {
        self.trails_enabled
    }

    /// Arm one frame signal. The token is valid until the next reset.
    pub fn arm_frame(&self) -> FrameToken {
        FrameToken { epoch: self.epoch }
    }

    /// Handle a frame signal: run exactly one tick if the token is current
    /// and the clock is running. Returns whether a tick ran. Stale tokens
    /// (armed before a reset) and signals outside `Running` are dropped.
    pub fn frame(&mut self, token: FrameToken) -> bool {
        if token.epoch != self.epoch || self.state != ClockState::Running {
            return false;
        }

        let Some(exp) = self.experiment.as_mut() else {
            return false;
        };

        exp.step(self.trails_enabled);
        self.ticks += 1;
        true
    }

    /// Arm-and-fire convenience for embeddings that drive the clock from a
    /// plain loop rather than a scheduled callback.
    pub fn tick(&mut self) -> bool {
        let token = self.arm_frame();
        self.frame(token)
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Cumulative tick count for the current run.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn experiment(&self) -> Option<&Experiment> {
        self.experiment.as_ref()
    }

    /// Ordered read-only snapshot for the rendering layer.
    pub fn snapshot(&self) -> Vec<ParticleView> {
        let Some(exp) = &self.experiment else {
            return Vec::new();
        };

        exp.world
            .particles
            .iter()
            .enumerate()
            .map(|(i, p)| ParticleView {
                id: p.id,
                x: p.x.x,
                y: p.x.y,
                radius: p.radius,
                trail: exp.trails.history(i).iter().copied().collect(),
            })
            .collect()
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}
