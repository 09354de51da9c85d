use std::ops::Range;

use candle_core::{ Device, Result, Var };
use candle_nn::optim::{ Optimizer, SGD };
use log::debug;
use rand::{ Rng, SeedableRng, rngs::StdRng };
use serde::Serialize;

use crate::objective::ScalarObjective;

/// Plain gradient descent over a single scalar parameter.
///
/// Every iteration rebuilds the loss graph from the parameter's current
/// value, backpropagates through it and lets the engine's SGD rule apply
/// `x ← x − learning_rate · ∇x`. No momentum, no accumulators.

#[derive(Debug, Clone, Copy)]
pub struct Descent {
  pub steps: usize,
  pub learning_rate: f64,
}

/// Record of one descent run: where it started, the loss after each
/// forward pass and where the parameter ended up.

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
  pub start: f64,
  pub losses: Vec<f64>,
  pub end: f64,
}

impl Descent {
  /// Minimize `objective` starting from a fixed parameter value.
  ///
  /// Divergence is not caught; a learning rate too large for the
  /// objective will show up as growing or NaN losses in the trace.
  pub fn minimize<O: ScalarObjective>(&self, objective: &O, start: f64) -> Result<Trace> {
    let x = Var::new(start, &Device::Cpu)?;
    let mut trainer = SGD::new(vec![x.clone()], self.learning_rate)?;
    let mut losses = Vec::with_capacity(self.steps);

    for step in 0..self.steps {
      // Forward pass over a freshly traced graph
      let loss = objective.loss(x.as_tensor())?;
      losses.push(loss.to_scalar::<f64>()?);

      // Backward pass and parameter update
      trainer.backward_step(&loss)?;

      debug!(
        "step {}: loss {:.6e}, x {:.8}",
        step,
        losses[step],
        x.as_tensor().to_scalar::<f64>()?
      );
    }

    let end = x.as_tensor().to_scalar::<f64>()?;
    Ok(Trace { start, losses, end })
  }

  /// Minimize from a random start drawn uniformly from `domain`.
  /// The same seed reproduces the same start and therefore, with this
  /// deterministic update rule, the exact same trace.
  pub fn minimize_random<O: ScalarObjective>(
    &self,
    objective: &O,
    domain: Range<f64>,
    seed: u64,
  ) -> Result<Trace> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = rng.gen_range(domain);
    self.minimize(objective, start)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::objective::RootLoss;

  #[test]
  fn converges_to_sqrt_two() -> Result<()> {
    let descent = Descent { steps: 60, learning_rate: 0.1 };
    let trace = descent.minimize(&RootLoss { target: 2.0 }, 1.0)?;
    assert!((trace.end - 2.0f64.sqrt()).abs() < 1e-6);
    assert_eq!(trace.losses.len(), 60);
    Ok(())
  }

  #[test]
  fn records_start_and_first_loss() -> Result<()> {
    let descent = Descent { steps: 1, learning_rate: 0.1 };
    let trace = descent.minimize(&RootLoss { target: 2.0 }, 3.0)?;
    assert_eq!(trace.start, 3.0);
    // (3^2 - 2)^2 before any update
    assert_eq!(trace.losses[0], 49.0);
    Ok(())
  }

  #[test]
  fn seeded_start_is_reproducible() -> Result<()> {
    let descent = Descent { steps: 5, learning_rate: 0.1 };
    let a = descent.minimize_random(&RootLoss { target: 2.0 }, 0.0..2.0, 42)?;
    let b = descent.minimize_random(&RootLoss { target: 2.0 }, 0.0..2.0, 42)?;
    assert_eq!(a, b);
    assert!(a.start > 0.0 && a.start < 2.0);
    Ok(())
  }
}
