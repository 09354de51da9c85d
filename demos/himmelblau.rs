use std::fs::File;
use std::io::BufWriter;

use anyhow::Result;
use gradlab::{ Descent, Himmelblau };
use gradlab::fractal::{ self, Window };

// Color every point of [-5, 5]^2 by which of Himmelblau's four minima
// gradient descent falls into when started there, and write the result
// as himmelblau.ppm. Run with RUST_LOG=info to see the minima as they
// are discovered.
fn main() -> Result<()> {
  env_logger::init();

  let window = Window { x: -5.0..5.0, y: -5.0..5.0 };
  let descent = Descent { steps: 100, learning_rate: 0.01 };
  let map = fractal::render(&Himmelblau, &window, 256, 256, descent)?;

  for (i, (x, y)) in map.attractors.iter().enumerate() {
    println!("attractor #{}: ({:.6}, {:.6})", i, x, y);
  }
  let lost = map.cells.iter().filter(|c| c.attractor.is_none()).count();
  println!("{} of {} starts diverged", lost, map.cells.len());

  let mut out = BufWriter::new(File::create("himmelblau.ppm")?);
  map.write_ppm(&mut out)?;
  println!("wrote himmelblau.ppm ({}x{})", map.width, map.height);
  Ok(())
}
