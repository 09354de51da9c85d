use anyhow::Result;
use gradlab::{ Descent, RootLoss };

// Approximate sqrt(2) by minimizing (x^2 - 2)^2 with plain gradient
// descent, starting from a random point in (0, 2).
fn main() -> Result<()> {
  env_logger::init();

  let descent = Descent { steps: 60, learning_rate: 0.1 };
  let trace = descent.minimize_random(&RootLoss { target: 2.0 }, 0.0..2.0, 1)?;

  println!("start: x = {:.8}", trace.start);
  for (step, loss) in trace.losses.iter().enumerate() {
    println!("step {:>2}: loss = {:.6e}", step, loss);
  }
  println!("end:   x = {:.8} (sqrt(2) = {:.8})", trace.end, 2.0f64.sqrt());

  // Full trajectory, for diffing runs against each other
  println!("{}", serde_json::to_string_pretty(&trace)?);
  Ok(())
}
