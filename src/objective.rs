use candle_core::{ Result, Tensor };

/// Loss over a single scalar parameter, rebuilt from the parameter's
/// current tensor on every call so each iteration traces a fresh graph.

pub trait ScalarObjective {
  fn loss(&self, x: &Tensor) -> Result<Tensor>;
}

/// Loss over a point in the plane, for the basin experiments.

pub trait PlanarObjective {
  fn loss(&self, x: &Tensor, y: &Tensor) -> Result<Tensor>;
}

/// `(x² − target)²`. Minimizing this drives `x` towards `√target`,
/// which makes plain gradient descent a square root finder.

#[derive(Debug, Clone, Copy)]
pub struct RootLoss {
  pub target: f64,
}

impl ScalarObjective for RootLoss {
  fn loss(&self, x: &Tensor) -> Result<Tensor> {
    (x.sqr()? - self.target)?.sqr()
  }
}

/// Himmelblau's function, `(x² + y − 11)² + (x + y² − 7)²`.
/// Four local minima of equal depth, so the basin boundaries between
/// them make a decent picture.

#[derive(Debug, Clone, Copy, Default)]
pub struct Himmelblau;

impl PlanarObjective for Himmelblau {
  fn loss(&self, x: &Tensor, y: &Tensor) -> Result<Tensor> {
    let a = ((x.sqr()? + y)? - 11.0)?;
    let b = ((y.sqr()? + x)? - 7.0)?;
    a.sqr()? + b.sqr()?
  }
}
