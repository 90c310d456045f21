//! Hand-rolled timing benchmarks for the force models and the full tick.
//!
//! Deterministic particle placement (no RNG) so successive runs are
//! comparable. Output is plain `println!` lines, one per system size.

use std::time::Instant;

use crate::simulation::forces::{AttractRepel, ForceModel, NewtonianGravity};
use crate::simulation::integrator::integrate_step;
use crate::simulation::params::Parameters;
use crate::simulation::states::{PVec2, Particle, World};

/// Build a deterministic world of size `n` spread over the arena.
fn make_world(n: usize, params: &Parameters) -> World {
    let mut particles = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        let x = PVec2::new(
            params.width * 0.5 + (i_f * 0.37).sin() * params.width * 0.4,
            params.height * 0.5 + (i_f * 0.13).cos() * params.height * 0.4,
        );
        let v = PVec2::new((i_f * 0.07).sin(), (i_f * 0.11).cos());

        particles.push(Particle::new(i as u32, x, v, 12.0));
    }

    World::new(particles)
}

/// Time one acceleration pass of each pairwise model across system sizes.
pub fn bench_forces() {
    let ns = [64, 128, 256, 512, 1024, 2048];

    let g_params = Parameters::gravity();
    let m_params = Parameters::multi_force();

    let gravity = NewtonianGravity {
        G: g_params.G,
        min_dist: g_params.min_dist,
    };
    let multi = AttractRepel {
        G: m_params.G,
        soften: m_params.soften,
        repulse_dist: m_params.repulse_dist,
        repulse_k: m_params.repulse_k,
    };

    for n in ns {
        let world = make_world(n, &g_params);
        let mut out = vec![PVec2::zeros(); n];

        // Warm up
        gravity.accumulate_accels(&world, &mut out);
        multi.accumulate_accels(&world, &mut out);

        let t0 = Instant::now();
        gravity.accumulate_accels(&world, &mut out);
        let dt_gravity = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        multi.accumulate_accels(&world, &mut out);
        let dt_multi = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, gravity = {dt_gravity:8.6} s, attract-repel = {dt_multi:8.6} s");
    }
}

/// Time full ticks (accumulate + integrate) across system sizes.
/// Paste output directly into a spreadsheet to graph.
pub fn bench_ticks() {
    println!("N,tick_ms");

    let params = Parameters::gravity();
    let gravity = NewtonianGravity {
        G: params.G,
        min_dist: params.min_dist,
    };

    for n in (64..=2048).step_by(64) {
        // Small n: average a few ticks to smooth noise
        let steps = if n <= 512 { 10 } else { 3 };

        let mut world = make_world(n, &params);
        let mut out = vec![PVec2::zeros(); n];

        let t0 = Instant::now();
        for _ in 0..steps {
            for a in out.iter_mut() {
                *a = PVec2::zeros();
            }
            gravity.accumulate_accels(&world, &mut out);
            integrate_step(&mut world, &out, &params);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{n},{ms:.6}");
    }
}
