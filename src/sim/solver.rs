//! Pairwise gravity and force-driven heat
//!
//! Every ordered pair (i, j) is evaluated, so the force on j from i is computed
//! in j's own row rather than mirrored from i's. Rows only read the particle
//! snapshot and write their own slot, which lets the pass run on rayon for
//! larger populations. Heat is applied afterwards, once every row is done.

use glam::DVec2;
use rayon::prelude::*;

use super::particle::Particle;
use crate::consts::PASSIVE_HEAT_RETENTION;
use crate::min_image;
use crate::settings::SimConfig;

/// Gravity constants and field geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceParams {
    pub gravity: f64,
    pub softening: f64,
    pub width: f64,
    pub height: f64,
}

/// Heat gain/cooling rule applied once per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatModel {
    /// Threshold on the heat effect, and the gain multiplier above it
    pub gain_rate: f64,
    /// Multiplier applied when the threshold is not exceeded
    pub cooling_factor: f64,
}

impl HeatModel {
    /// Next heat value for a particle that experienced `effect` this tick
    ///
    /// The gain branch loses a flat 1% while the cooling branch uses
    /// `cooling_factor`; the two are deliberately different.
    #[inline]
    pub fn next_heat(&self, heat: f64, effect: f64) -> f64 {
        if effect > self.gain_rate {
            (heat + effect * self.gain_rate) * PASSIVE_HEAT_RETENTION
        } else {
            heat * self.cooling_factor
        }
    }
}

/// Force exerted on one particle by another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairForce {
    /// Softened inverse-square magnitude `G * mi * mj / r²`
    pub magnitude: f64,
    /// Contribution added to the particle's net force
    pub vector: DVec2,
}

/// Per-tick output of the force pass, in store order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSample {
    pub forces: Vec<DVec2>,
    /// Sum of |contribution| / own mass over all partners
    pub heat_effect: Vec<f64>,
}

impl FieldSample {
    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ForceFieldSolver {
    pub params: ForceParams,
    pub heat: HeatModel,
    /// Populations at or above this size use the rayon pool
    pub parallel_threshold: usize,
}

impl ForceFieldSolver {
    pub fn new(params: ForceParams, heat: HeatModel) -> Self {
        Self {
            params,
            heat,
            parallel_threshold: crate::consts::PARALLEL_THRESHOLD,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            params: ForceParams {
                gravity: config.gravity,
                softening: config.softening,
                width: config.width,
                height: config.height,
            },
            heat: HeatModel {
                gain_rate: config.heat_gain_rate,
                cooling_factor: config.cooling_factor,
            },
            parallel_threshold: config.parallel_threshold,
        }
    }

    /// Shortest displacement from `from` to `to` on the torus
    #[inline]
    pub fn min_image_delta(&self, from: DVec2, to: DVec2) -> DVec2 {
        let d = to - from;
        DVec2::new(
            min_image(d.x, self.params.width),
            min_image(d.y, self.params.height),
        )
    }

    /// Force on `target` from `source`
    #[inline]
    pub fn pair_force(&self, target: &Particle, source: &Particle) -> PairForce {
        let ForceParams {
            gravity, softening, ..
        } = self.params;
        let d = self.min_image_delta(target.pos, source.pos);
        let r = (d.length_squared() + softening * softening).sqrt();
        let magnitude = gravity * target.mass() * source.mass() / (r * r);
        PairForce {
            magnitude,
            vector: d * (magnitude / r),
        }
    }

    /// Net force and heat effect for row `i`
    fn row(&self, i: usize, particles: &[Particle]) -> (DVec2, f64) {
        let target = &particles[i];
        let mut force = DVec2::ZERO;
        let mut effect = 0.0;
        for (j, source) in particles.iter().enumerate() {
            if i == j {
                continue;
            }
            let pair = self.pair_force(target, source);
            force += pair.vector;
            effect += pair.vector.length() / target.mass();
        }
        (force, effect)
    }

    /// Force pass over an immutable snapshot
    pub fn compute(&self, particles: &[Particle]) -> FieldSample {
        let n = particles.len();
        let parallel = n >= self.parallel_threshold.max(2);
        let (forces, heat_effect): (Vec<DVec2>, Vec<f64>) = if parallel {
            (0..n)
                .into_par_iter()
                .map(|i| self.row(i, particles))
                .unzip()
        } else {
            (0..n).map(|i| self.row(i, particles)).unzip()
        };
        FieldSample {
            forces,
            heat_effect,
        }
    }

    /// Apply the heat rule using a completed force pass
    pub fn apply_heat(&self, particles: &mut [Particle], heat_effect: &[f64]) {
        debug_assert_eq!(particles.len(), heat_effect.len());
        for (p, &effect) in particles.iter_mut().zip(heat_effect) {
            p.heat = self.heat.next_heat(p.heat, effect);
        }
    }

    /// Compute forces, then update heat in place
    pub fn solve(&self, particles: &mut [Particle]) -> FieldSample {
        let sample = self.compute(particles);
        self.apply_heat(particles, &sample.heat_effect);
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: f64 = 6.674e-5;
    const S: f64 = 35.0;

    fn solver() -> ForceFieldSolver {
        ForceFieldSolver::new(
            ForceParams {
                gravity: G,
                softening: S,
                width: 1024.0,
                height: 768.0,
            },
            HeatModel {
                gain_rate: 0.05,
                cooling_factor: 0.8,
            },
        )
    }

    fn particle(x: f64, y: f64, mass: f64) -> Particle {
        Particle::new(DVec2::new(x, y), DVec2::ZERO, mass).unwrap()
    }

    #[test]
    fn test_coincident_particles_softened() {
        let s = solver();
        let a = particle(200.0, 300.0, 4e3);
        let b = particle(200.0, 300.0, 9e4);
        let pair = s.pair_force(&a, &b);
        assert_eq!(pair.magnitude, G * 4e3 * 9e4 / (S * S));
        assert_eq!(pair.vector, DVec2::ZERO);
        assert!(pair.magnitude.is_finite());
    }

    #[test]
    fn test_minimum_image_across_edge() {
        let s = solver();
        let d = s.min_image_delta(DVec2::new(0.0, 10.0), DVec2::new(1023.0, 10.0));
        assert_eq!(d, DVec2::new(-1.0, 0.0));
        let d = s.min_image_delta(DVec2::new(5.0, 767.0), DVec2::new(5.0, 0.0));
        assert_eq!(d, DVec2::new(0.0, 1.0));
    }

    #[test]
    fn test_force_through_boundary_is_short_range() {
        let s = solver();
        let a = particle(0.0, 100.0, 1e4);
        let b = particle(1023.0, 100.0, 1e4);
        let pair = s.pair_force(&a, &b);
        let r2 = 1.0 + S * S;
        assert!((pair.magnitude - G * 1e8 / r2).abs() < 1e-12);
        // Pulled toward -x, across the seam
        assert!(pair.vector.x < 0.0);
        assert_eq!(pair.vector.y, 0.0);
    }

    #[test]
    fn test_pair_forces_are_opposite() {
        let s = solver();
        let a = particle(100.0, 200.0, 3e4);
        let b = particle(160.0, 120.0, 7e4);
        let ab = s.pair_force(&a, &b).vector;
        let ba = s.pair_force(&b, &a).vector;
        assert!((ab + ba).length() < 1e-12);
        assert!(ab.length() > 0.0);
    }

    #[test]
    fn test_compute_runs_full_double_loop() {
        let s = solver();
        let particles = vec![
            particle(10.0, 10.0, 1e4),
            particle(60.0, 40.0, 2e4),
            particle(900.0, 700.0, 5e4),
        ];
        let sample = s.compute(&particles);
        assert_eq!(sample.len(), 3);
        let net: DVec2 = sample.forces.iter().copied().sum();
        assert!(net.length() < 1e-12, "net force should cancel: {net:?}");
        for i in 0..3 {
            let expected: DVec2 = (0..3)
                .filter(|&j| j != i)
                .map(|j| s.pair_force(&particles[i], &particles[j]).vector)
                .sum();
            assert!((sample.forces[i] - expected).length() < 1e-15);
            assert!(sample.heat_effect[i] > 0.0);
        }
    }

    #[test]
    fn test_single_particle_feels_nothing() {
        let s = solver();
        let sample = s.compute(&[particle(1.0, 1.0, 1e4)]);
        assert_eq!(sample.forces, vec![DVec2::ZERO]);
        assert_eq!(sample.heat_effect, vec![0.0]);
        assert!(s.compute(&[]).is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut s = solver();
        let particles: Vec<Particle> = (0..40)
            .map(|i| {
                let t = i as f64;
                particle((t * 37.0) % 1024.0, (t * 53.0) % 768.0, 4e3 + t * 1000.0)
            })
            .collect();
        s.parallel_threshold = usize::MAX;
        let sequential = s.compute(&particles);
        s.parallel_threshold = 2;
        let parallel = s.compute(&particles);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_heat_model_branches() {
        let model = HeatModel {
            gain_rate: 0.05,
            cooling_factor: 0.8,
        };
        // Gain: (1 + 0.1 * 0.05) * 0.99
        assert!((model.next_heat(1.0, 0.1) - 1.005 * 0.99).abs() < 1e-12);
        // At the threshold: cooling
        assert_eq!(model.next_heat(1.0, 0.05), 0.8);
        assert_eq!(model.next_heat(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_solve_applies_heat_after_pass() {
        let mut s = solver();
        s.heat.gain_rate = 1e-6;
        let mut particles = vec![particle(100.0, 100.0, 1e4), particle(150.0, 100.0, 1e4)];
        let sample = s.solve(&mut particles);
        for (p, effect) in particles.iter().zip(&sample.heat_effect) {
            assert!((p.heat - effect * 1e-6 * 0.99).abs() < 1e-18);
        }
        // Symmetric setup heats both equally
        assert_eq!(particles[0].heat, particles[1].heat);
    }
}
