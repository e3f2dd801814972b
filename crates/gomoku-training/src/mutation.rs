//! Mutation operators producing a child agent from a parent.
//!
//! Every perturbation is drawn uniformly from `[-0.05, 0.05]` and multiplied by a
//! per-kind scale: biases (`ar`, `a[c]`) use one scale, weights (`wr[c]` and the
//! receptive fields) another.
//!
//! - [`GatedMutation`] perturbs each parameter independently with a given
//!   probability and copies it unchanged otherwise. Training uses this.
//! - [`MutationPolicy::Jitter`] perturbs every parameter by a tiny fixed amount.

use gomoku_evaluator::agent::{Agent, ParamKind};
use rand::Rng;

/// Half-width of the unscaled perturbation range.
pub const PERTURBATION_HALF_WIDTH: f32 = 0.05;

const JITTER_BIAS_SCALE: f32 = 0.01;
const JITTER_WEIGHT_SCALE: f32 = 0.005;

/// Probability-gated additive mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GatedMutation {
    /// Scale applied to bias perturbations.
    pub bias_scale: f32,
    /// Scale applied to weight perturbations.
    pub weight_scale: f32,
    /// Chance that any single parameter is perturbed, in `[0, 1]`.
    pub probability: f64,
}

impl GatedMutation {
    /// The configuration used for training: scale 10 for everything, 2% per parameter.
    pub const TRAINING: Self = Self {
        bias_scale: 10.0,
        weight_scale: 10.0,
        probability: 0.02,
    };

    /// Largest absolute change a single parameter of `kind` can receive.
    #[must_use]
    pub fn max_delta(&self, kind: ParamKind) -> f32 {
        PERTURBATION_HALF_WIDTH * self.scale(kind)
    }

    fn scale(&self, kind: ParamKind) -> f32 {
        match kind {
            ParamKind::Bias => self.bias_scale,
            ParamKind::Weight => self.weight_scale,
        }
    }

    /// Returns a mutated copy of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `probability` is outside `[0, 1]`.
    pub fn mutate<R>(&self, parent: &Agent, rng: &mut R) -> Agent
    where
        R: Rng + ?Sized,
    {
        parent.map_params(|kind, value| {
            if rng.random_bool(self.probability) {
                perturb(value, self.scale(kind), rng)
            } else {
                value
            }
        })
    }
}

impl Default for GatedMutation {
    fn default() -> Self {
        Self::TRAINING
    }
}

/// Selects how the bottom half of the population is regenerated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MutationPolicy {
    Gated(GatedMutation),
    /// Perturbs every parameter: ±0.0005 for biases, ±0.00025 for weights.
    Jitter,
}

impl Default for MutationPolicy {
    fn default() -> Self {
        Self::Gated(GatedMutation::TRAINING)
    }
}

impl MutationPolicy {
    pub fn mutate<R>(&self, parent: &Agent, rng: &mut R) -> Agent
    where
        R: Rng + ?Sized,
    {
        match self {
            MutationPolicy::Gated(gated) => gated.mutate(parent, rng),
            MutationPolicy::Jitter => parent.map_params(|kind, value| {
                let scale = match kind {
                    ParamKind::Bias => JITTER_BIAS_SCALE,
                    ParamKind::Weight => JITTER_WEIGHT_SCALE,
                };
                perturb(value, scale, rng)
            }),
        }
    }
}

fn perturb<R>(value: f32, scale: f32, rng: &mut R) -> f32
where
    R: Rng + ?Sized,
{
    let delta =
        rng.random_range(-PERTURBATION_HALF_WIDTH..=PERTURBATION_HALF_WIDTH) * scale;
    // adding a signed zero could flip the sign of a zero parameter
    if delta == 0.0 { value } else { value + delta }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn bits(agent: &Agent) -> Vec<u32> {
        agent.values().iter().map(|v| v.to_bits()).collect()
    }

    fn deltas(parent: &Agent, child: &Agent) -> Vec<(ParamKind, f32)> {
        let mut child_values = child.values().into_iter();
        let mut out = vec![];
        let _ = parent.map_params(|kind, value| {
            out.push((kind, child_values.next().unwrap() - value));
            value
        });
        out
    }

    #[test]
    fn test_zero_probability_copies_parent_exactly() {
        let mut rng = Pcg64Mcg::seed_from_u64(11);
        let mut parent = Agent::random(&mut rng);
        parent.channels[1].weights[2][2] = -0.0;
        let mutation = GatedMutation {
            probability: 0.0,
            ..GatedMutation::TRAINING
        };
        for _ in 0..10 {
            assert_eq!(bits(&mutation.mutate(&parent, &mut rng)), bits(&parent));
        }
    }

    #[test]
    fn test_zero_scale_copies_parent_exactly() {
        let mut rng = Pcg64Mcg::seed_from_u64(12);
        let mut parent = Agent::random(&mut rng);
        parent.bias = -0.0;
        let mutation = GatedMutation {
            bias_scale: 0.0,
            weight_scale: 0.0,
            probability: 1.0,
        };
        assert_eq!(bits(&mutation.mutate(&parent, &mut rng)), bits(&parent));
    }

    #[test]
    fn test_full_probability_changes_every_parameter_within_bounds() {
        let mut rng = Pcg64Mcg::seed_from_u64(13);
        let parent = Agent::random(&mut rng);
        let mutation = GatedMutation {
            bias_scale: 10.0,
            weight_scale: 2.0,
            probability: 1.0,
        };
        let child = mutation.mutate(&parent, &mut rng);
        for (kind, delta) in deltas(&parent, &child) {
            assert!(delta != 0.0);
            assert!(
                delta.abs() <= mutation.max_delta(kind) + 1e-5,
                "{kind:?} moved by {delta}"
            );
        }
    }

    #[test]
    fn test_training_mutation_touches_few_parameters() {
        let mut rng = Pcg64Mcg::seed_from_u64(14);
        let parent = Agent::random(&mut rng);
        let changed: usize = (0..100)
            .map(|_| {
                let child = GatedMutation::TRAINING.mutate(&parent, &mut rng);
                deltas(&parent, &child)
                    .iter()
                    .filter(|(_, d)| *d != 0.0)
                    .count()
            })
            .sum();
        // 8200 draws at 2%: expect about 164
        assert!((80..300).contains(&changed), "changed {changed}");
    }

    #[test]
    fn test_jitter_moves_everything_slightly() {
        let mut rng = Pcg64Mcg::seed_from_u64(15);
        let parent = Agent::random(&mut rng);
        let child = MutationPolicy::Jitter.mutate(&parent, &mut rng);
        for (kind, delta) in deltas(&parent, &child) {
            let bound = if kind.is_bias() { 0.0005 } else { 0.00025 };
            assert!(delta.abs() <= bound + 1e-6, "{kind:?} moved by {delta}");
        }
        assert_ne!(child, parent);
    }
}
