use physlab::simulation::clock::{ClockState, SimulationClock};
use physlab::simulation::forces::{AttractRepel, ElasticCollisions, ForceModel, NewtonianGravity};
use physlab::simulation::integrator::integrate_step;
use physlab::simulation::params::Parameters;
use physlab::simulation::scenario::{Experiment, ExperimentKind};
use physlab::simulation::states::{PVec2, Particle, World};
use physlab::configuration::config::{
    ConfigError, ExperimentConfig, ForceModelConfig, ParametersConfig, ParticleConfig,
};

/// Build a two-particle world separated along the x-axis
fn two_body_world(x1: f64, x2: f64, m1: f64, m2: f64) -> World {
    let p1 = Particle::new(0, PVec2::new(x1, 200.0), PVec2::zeros(), m1);
    let p2 = Particle::new(1, PVec2::new(x2, 200.0), PVec2::zeros(), m2);
    World::new(vec![p1, p2])
}

/// Total momentum of a world
fn momentum(world: &World) -> PVec2 {
    world
        .particles
        .iter()
        .fold(PVec2::zeros(), |acc, p| acc + p.m * p.v)
}

/// Advance a world one tick under the given model and parameters
fn step_world(world: &mut World, model: &dyn ForceModel, params: &Parameters) {
    let mut accels = vec![PVec2::zeros(); world.len()];
    model.accumulate_accels(world, &mut accels);
    model.resolve_contacts(world);
    integrate_step(world, &accels, params);
}

/// Assert the per-tick invariants: speeds clamped, positions in the arena,
/// everything finite
fn assert_invariants(world: &World, params: &Parameters) {
    for p in &world.particles {
        assert!(
            p.x.x.is_finite() && p.x.y.is_finite() && p.v.x.is_finite() && p.v.y.is_finite(),
            "non-finite state for particle {}",
            p.id
        );
        assert!(
            p.v.norm() <= params.max_speed + 1e-9,
            "speed {} exceeds clamp for particle {}",
            p.v.norm(),
            p.id
        );
        assert!(
            p.x.x >= 0.0 && p.x.x <= params.width && p.x.y >= 0.0 && p.x.y <= params.height,
            "particle {} escaped the arena at ({}, {})",
            p.id,
            p.x.x,
            p.x.y
        );
    }
}

/// A valid gravity configuration to mutate in validation tests
fn base_config() -> ExperimentConfig {
    ExperimentConfig {
        experiment: ForceModelConfig::Gravity,
        parameters: ParametersConfig {
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
        },
        particles: vec![ParticleConfig {
            x: [200.0, 200.0],
            v: [0.0, 0.0],
            m: 80.0,
        }],
    }
}

// ==================================================================================
// Force model tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let world = two_body_world(150.0, 250.0, 2.0, 3.0);
    let model = NewtonianGravity {
        G: 13.5,
        min_dist: 5.0,
    };

    let mut acc = vec![PVec2::zeros(); 2];
    model.accumulate_accels(&world, &mut acc);

    let net = acc[0] * world.particles[0].m + acc[1] * world.particles[1].m;

    assert!(net.norm() < 1e-12, "Net momentum change not zero: {net:?}");
}

#[test]
fn gravity_inverse_square_law() {
    let near = two_body_world(100.0, 200.0, 1.0, 1.0);
    let far = two_body_world(100.0, 300.0, 1.0, 1.0);
    let model = NewtonianGravity {
        G: 13.5,
        min_dist: 5.0,
    };

    let mut acc_near = vec![PVec2::zeros(); 2];
    let mut acc_far = vec![PVec2::zeros(); 2];
    model.accumulate_accels(&near, &mut acc_near);
    model.accumulate_accels(&far, &mut acc_far);

    let ratio = acc_near[0].norm() / acc_far[0].norm();

    assert!((ratio - 4.0).abs() < 1e-9, "Expected ~4x, got {ratio}");
}

#[test]
fn gravity_floor_skips_close_pairs() {
    // Separation below min_dist: the pair contributes nothing this tick
    let world = two_body_world(200.0, 203.0, 10.0, 10.0);
    let model = NewtonianGravity {
        G: 13.5,
        min_dist: 5.0,
    };

    let mut acc = vec![PVec2::zeros(); 2];
    model.accumulate_accels(&world, &mut acc);

    assert_eq!(acc[0], PVec2::zeros());
    assert_eq!(acc[1], PVec2::zeros());
}

#[test]
fn head_on_collision_conserves_momentum() {
    let mut world = World::new(vec![
        Particle::new(0, PVec2::new(150.0, 200.0), PVec2::new(2.0, 0.0), 15.0),
        Particle::new(1, PVec2::new(250.0, 200.0), PVec2::new(-2.0, 0.0), 20.0),
    ]);
    let params = Parameters::motion();
    let model = ElasticCollisions;

    let before = momentum(&world);

    // Enough ticks for the pair to meet, collide and separate, well short
    // of any wall contact
    for _ in 0..40 {
        step_world(&mut world, &model, &params);
    }

    let after = momentum(&world);

    assert!(
        (after - before).norm() < 1e-6,
        "Momentum drifted: {before:?} -> {after:?}"
    );
    // The collision actually happened: the lighter body rebounded
    assert!(world.particles[0].v.x < 0.0);
    assert!(world.particles[1].v.x > 0.0);
}

#[test]
fn separating_overlapped_pair_is_not_recollided() {
    // Overlapping but already separating: velocities must be untouched,
    // otherwise an overlapped pair would rattle forever
    let mut world = World::new(vec![
        Particle::new(0, PVec2::new(200.0, 200.0), PVec2::new(-1.0, 0.0), 15.0),
        Particle::new(1, PVec2::new(205.0, 200.0), PVec2::new(1.0, 0.0), 20.0),
    ]);
    let model = ElasticCollisions;

    model.resolve_contacts(&mut world);

    assert_eq!(world.particles[0].v, PVec2::new(-1.0, 0.0));
    assert_eq!(world.particles[1].v, PVec2::new(1.0, 0.0));
}

#[test]
fn attract_repel_switches_sign_at_short_range() {
    let model = AttractRepel {
        G: 2.0,
        soften: 150.0,
        repulse_dist: 40.0,
        repulse_k: 8.0,
    };

    // Inside the repulsion range: net push away from the neighbor
    let close = two_body_world(200.0, 220.0, 10.0, 10.0);
    let mut acc = vec![PVec2::zeros(); 2];
    model.accumulate_accels(&close, &mut acc);
    assert!(acc[0].x < 0.0, "expected repulsion, got {:?}", acc[0]);
    assert!(acc[1].x > 0.0);

    // Outside it: plain softened attraction
    let apart = two_body_world(200.0, 280.0, 10.0, 10.0);
    let mut acc = vec![PVec2::zeros(); 2];
    model.accumulate_accels(&apart, &mut acc);
    assert!(acc[0].x > 0.0, "expected attraction, got {:?}", acc[0]);
    assert!(acc[1].x < 0.0);
}

#[test]
fn coincident_pair_is_skipped() {
    // Same point: no direction exists, the pair is skipped for the tick
    let mut world = World::new(vec![
        Particle::new(0, PVec2::new(200.0, 200.0), PVec2::new(1.0, 0.0), 10.0),
        Particle::new(1, PVec2::new(200.0, 200.0), PVec2::new(-1.0, 0.0), 10.0),
    ]);

    let multi = AttractRepel {
        G: 2.0,
        soften: 150.0,
        repulse_dist: 40.0,
        repulse_k: 8.0,
    };
    let mut acc = vec![PVec2::zeros(); 2];
    multi.accumulate_accels(&world, &mut acc);
    assert_eq!(acc[0], PVec2::zeros());

    let contacts = ElasticCollisions;
    contacts.resolve_contacts(&mut world);
    assert_eq!(world.particles[0].v, PVec2::new(1.0, 0.0));
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn speed_is_clamped_after_integration() {
    let mut world = World::new(vec![Particle::new(
        0,
        PVec2::new(200.0, 200.0),
        PVec2::new(50.0, 0.0),
        25.0,
    )]);
    let params = Parameters::motion();

    integrate_step(&mut world, &[PVec2::zeros()], &params);

    let speed = world.particles[0].v.norm();
    assert!(
        (speed - params.max_speed).abs() < 1e-9,
        "expected clamp to {}, got {speed}",
        params.max_speed
    );
}

#[test]
fn wall_bounce_reflects_with_restitution() {
    // m = 25 gives a display radius of 9, so the right wall sits at 391
    let mut world = World::new(vec![Particle::new(
        0,
        PVec2::new(396.0, 200.0),
        PVec2::new(5.0, 0.0),
        25.0,
    )]);
    let params = Parameters::motion();

    integrate_step(&mut world, &[PVec2::zeros()], &params);

    let p = &world.particles[0];
    assert!(
        (p.v.x + 4.5).abs() < 1e-9,
        "expected vx ~ -4.5, got {}",
        p.v.x
    );
    assert!(
        (p.x.x - (params.width - p.radius)).abs() < 1e-9,
        "expected clamp to {}, got {}",
        params.width - p.radius,
        p.x.x
    );
}

// ==================================================================================
// Long-run property tests
// ==================================================================================

#[test]
fn gravity_template_runs_10000_ticks_without_singularities() {
    let mut exp = Experiment::from_kind(ExperimentKind::Gravity, None);

    for _ in 0..10_000 {
        exp.step(false);
        assert_invariants(&exp.world, &exp.parameters);
    }
}

#[test]
fn multi_force_template_runs_10000_ticks_without_singularities() {
    let mut exp = Experiment::from_kind(ExperimentKind::MultiForce, Some(42));

    for _ in 0..10_000 {
        exp.step(false);
        assert_invariants(&exp.world, &exp.parameters);
    }
}

#[test]
fn motion_template_holds_invariants() {
    let mut exp = Experiment::from_kind(ExperimentKind::Motion, None);

    for _ in 0..10_000 {
        exp.step(false);
        assert_invariants(&exp.world, &exp.parameters);
    }
}

#[test]
fn two_body_orbit_stays_bounded() {
    let mut exp = Experiment::from_kind(ExperimentKind::Gravity, None);

    for tick in 0..500 {
        exp.step(false);
        let d = (exp.world.particles[1].x - exp.world.particles[0].x).norm();
        assert!(
            (40.0..=160.0).contains(&d),
            "orbit left [40, 160] at tick {tick}: distance {d}"
        );
    }
}

// ==================================================================================
// Initialization tests
// ==================================================================================

#[test]
fn fixed_templates_reproduce_bit_identically() {
    let a = Experiment::from_kind(ExperimentKind::Gravity, None);
    let b = Experiment::from_kind(ExperimentKind::Gravity, None);
    assert_eq!(a.world, b.world);

    let a = Experiment::from_kind(ExperimentKind::Motion, None);
    let b = Experiment::from_kind(ExperimentKind::Motion, None);
    assert_eq!(a.world, b.world);
}

#[test]
fn seeded_multi_force_reproduces() {
    let a = Experiment::from_kind(ExperimentKind::MultiForce, Some(123));
    let b = Experiment::from_kind(ExperimentKind::MultiForce, Some(123));
    assert_eq!(a.world, b.world);
}

#[test]
fn multi_force_template_respects_initialization_ranges() {
    let exp = Experiment::from_kind(ExperimentKind::MultiForce, Some(9));
    let params = &exp.parameters;

    assert_eq!(exp.world.len(), 12);
    for p in &exp.world.particles {
        assert!(p.m >= 8.0 && p.m < 23.0);
        assert!(p.v.x >= -2.0 && p.v.x < 2.0);
        assert!(p.v.y >= -2.0 && p.v.y < 2.0);
        assert!(p.x.x >= p.radius && p.x.x <= params.width - p.radius);
        assert!(p.x.y >= p.radius && p.x.y <= params.height - p.radius);
    }
}

#[test]
fn builds_experiment_from_yaml() {
    let yaml = r#"
experiment: motion
parameters:
  G: 0.0
  min_dist: 0.0
  soften: 0.0
  repulse_dist: 0.0
  repulse_k: 0.0
  restitution: 0.9
  max_speed: 8.0
  width: 400.0
  height: 400.0
  trail_cap: 20
particles:
  - x: [80.0, 120.0]
    v: [3.0, 1.0]
    m: 15.0
  - x: [300.0, 100.0]
    v: [-2.0, 2.0]
    m: 20.0
"#;
    let cfg: ExperimentConfig = serde_yaml::from_str(yaml).expect("yaml should parse");
    let exp = Experiment::build(cfg).expect("config should validate");

    assert_eq!(exp.kind, ExperimentKind::Motion);
    assert_eq!(exp.world.len(), 2);
    assert_eq!(exp.world.particles[0].m, 15.0);
}

#[test]
fn config_validation_rejects_bad_input() {
    let mut cfg = base_config();
    cfg.particles[0].m = -1.0;
    assert!(matches!(
        Experiment::build(cfg),
        Err(ConfigError::NonPositiveMass { index: 0, .. })
    ));

    let mut cfg = base_config();
    cfg.parameters.restitution = 1.5;
    assert!(matches!(
        Experiment::build(cfg),
        Err(ConfigError::RestitutionOutOfRange(_))
    ));

    let mut cfg = base_config();
    cfg.parameters.width = 0.0;
    assert!(matches!(
        Experiment::build(cfg),
        Err(ConfigError::NonPositiveArena { .. })
    ));

    let mut cfg = base_config();
    cfg.parameters.trail_cap = 0;
    assert!(matches!(
        Experiment::build(cfg),
        Err(ConfigError::ZeroTrailCap)
    ));

    let mut cfg = base_config();
    cfg.particles[0].x = [700.0, 200.0];
    assert!(matches!(
        Experiment::build(cfg),
        Err(ConfigError::OutOfArena { index: 0, .. })
    ));
}

// ==================================================================================
// Clock tests
// ==================================================================================

#[test]
fn clock_runs_pauses_and_counts_ticks() {
    let mut clock = SimulationClock::new();
    clock.select_experiment(ExperimentKind::Gravity, None);
    assert_eq!(clock.state(), ClockState::Idle);

    clock.set_running(true);
    for _ in 0..3 {
        let token = clock.arm_frame();
        assert!(clock.frame(token));
    }
    assert_eq!(clock.ticks(), 3);

    // Paused: frame signals are ignored, state held as last computed
    clock.set_running(false);
    assert_eq!(clock.state(), ClockState::Paused);
    let held = clock.snapshot();
    let token = clock.arm_frame();
    assert!(!clock.frame(token));
    assert_eq!(clock.ticks(), 3);

    let after = clock.snapshot();
    assert_eq!(held.len(), after.len());
    for (a, b) in held.iter().zip(after.iter()) {
        assert_eq!((a.x, a.y), (b.x, b.y));
    }
}

#[test]
fn reset_drops_stale_frame_token() {
    let mut clock = SimulationClock::new();
    clock.select_experiment(ExperimentKind::Gravity, None);
    clock.set_running(true);

    // Armed against the old store...
    let stale = clock.arm_frame();

    // ...then the experiment is switched before the signal fires
    clock.select_experiment(ExperimentKind::Motion, None);
    clock.set_running(true);

    let initial = Experiment::from_kind(ExperimentKind::Motion, None);
    assert!(!clock.frame(stale), "stale token must not tick");
    assert_eq!(clock.ticks(), 0);
    assert_eq!(clock.experiment().unwrap().world, initial.world);

    // A token armed after the switch ticks normally
    let fresh = clock.arm_frame();
    assert!(clock.frame(fresh));
    assert_eq!(clock.ticks(), 1);
}

#[test]
fn unknown_experiment_yields_empty_store() {
    let mut clock = SimulationClock::new();
    clock.select_experiment_named("warp-drive");

    assert_eq!(clock.state(), ClockState::Idle);
    assert!(clock.snapshot().is_empty());

    // Cannot start an empty run
    clock.set_running(true);
    assert_eq!(clock.state(), ClockState::Idle);
}

// ==================================================================================
// Trail tests
// ==================================================================================

#[test]
fn trail_length_never_exceeds_cap() {
    let mut clock = SimulationClock::new();
    clock.select_experiment(ExperimentKind::Gravity, None);
    clock.set_running(true);

    for _ in 0..500 {
        clock.tick();
    }

    for view in clock.snapshot() {
        assert_eq!(view.trail.len(), 20);
    }
}

#[test]
fn disabling_trails_freezes_history() {
    let mut clock = SimulationClock::new();
    clock.select_experiment(ExperimentKind::Gravity, None);
    clock.set_running(true);

    for _ in 0..5 {
        clock.tick();
    }
    let before: Vec<_> = clock.snapshot().into_iter().map(|v| v.trail).collect();
    assert_eq!(before[0].len(), 5);

    // Capture off: growth stops immediately, history is kept
    clock.set_trails_enabled(false);
    for _ in 0..5 {
        clock.tick();
    }
    assert_eq!(clock.ticks(), 10);

    let after: Vec<_> = clock.snapshot().into_iter().map(|v| v.trail).collect();
    assert_eq!(before, after);

    // Reset clears history
    clock.reset();
    assert!(clock.snapshot().iter().all(|v| v.trail.is_empty()));
}
