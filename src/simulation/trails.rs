//! Bounded position history per particle, for visualization only
//!
//! One sliding window per particle, insertion order = time order, oldest
//! entry silently evicted once the window is full. Trails never feed back
//! into force or integration computations.

use std::collections::VecDeque;

use crate::simulation::states::{PVec2, World};

#[derive(Debug, Clone)]
pub struct TrailRecorder {
    histories: Vec<VecDeque<PVec2>>, // one window per particle, store order
    cap: usize, // maximum entries per window
}

impl TrailRecorder {
    /// Create a recorder with an empty window per particle.
    pub fn new(particle_count: usize, cap: usize) -> Self {
        Self {
            histories: vec![VecDeque::with_capacity(cap); particle_count],
            cap,
        }
    }

    /// Append every particle's current position, evicting the oldest entry
    /// of any window that exceeds the cap.
    pub fn record_all(&mut self, world: &World) {
        for (history, p) in self.histories.iter_mut().zip(world.particles.iter()) {
            history.push_back(p.x);
            if history.len() > self.cap {
                history.pop_front();
            }
        }
    }

    /// The recorded window for the particle at `index` (store order).
    pub fn history(&self, index: usize) -> &VecDeque<PVec2> {
        &self.histories[index]
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::{PVec2, Particle, World};

    fn one_particle_world(x: f64, y: f64) -> World {
        World::new(vec![Particle::new(
            0,
            PVec2::new(x, y),
            PVec2::zeros(),
            10.0,
        )])
    }

    #[test]
    fn records_in_time_order() {
        let mut rec = TrailRecorder::new(1, 20);

        rec.record_all(&one_particle_world(1.0, 0.0));
        rec.record_all(&one_particle_world(2.0, 0.0));

        let h = rec.history(0);
        assert_eq!(h.len(), 2);
        assert_eq!(h[0].x, 1.0); // oldest first
        assert_eq!(h[1].x, 2.0);
    }

    #[test]
    fn evicts_oldest_beyond_cap() {
        let mut rec = TrailRecorder::new(1, 3);

        for i in 0..10 {
            rec.record_all(&one_particle_world(i as f64, 0.0));
        }

        let h = rec.history(0);
        assert_eq!(h.len(), 3);
        // Last three positions survive, oldest first
        assert_eq!(h[0].x, 7.0);
        assert_eq!(h[2].x, 9.0);
    }
}
