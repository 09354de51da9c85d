use anyhow::{ Context, Result };
use candle_core::{ Device, Var };

// The sqrt(2) loop written directly against the engine, with no wrapper:
// declare a parameter, trace the loss graph, backpropagate, apply the
// update by hand. This is everything the rest of the crate automates.
fn main() -> Result<()> {
  let learning_rate = 0.1;
  let x = Var::new(1.0f64, &Device::Cpu)?;

  for step in 0..60 {
    // Trace a fresh graph from the parameter's current value
    let loss = (x.sqr()? - 2.0)?.sqr()?;

    // Reverse-mode gradient of the loss with respect to x
    let grads = loss.backward()?;
    let grad = grads.get(&x).context("no grad for x")?;

    // x <- x - learning_rate * grad
    x.set(&(x.as_tensor() - (grad * learning_rate)?)?)?;

    println!(
      "step {:>2}: loss = {:.6e}, x = {:.8}",
      step,
      loss.to_scalar::<f64>()?,
      x.as_tensor().to_scalar::<f64>()?
    );
  }

  println!("sqrt(2) = {:.8}", 2.0f64.sqrt());
  Ok(())
}
