//! Basin-of-attraction pictures for planar objectives.
//!
//! Gradient descent is run from every pixel of a grid over a window of the
//! plane. Each start is colored by the local minimum its trajectory falls
//! into and shaded by how many steps it took to settle there. The minima are
//! not hardcoded; the first trajectory to reach a new fixed point registers
//! it as an attractor and later trajectories classify against that list.

use std::io::{ self, Write };
use std::ops::Range;

use candle_core::{ Device, Result, Var };
use candle_nn::optim::{ Optimizer, SGD };
use itertools::iproduct;
use log::info;

use crate::descent::Descent;
use crate::objective::PlanarObjective;

/// Two trajectory endpoints closer than this land in the same basin.
/// Coarse on purpose: endpoints scatter around their minimum by roughly
/// the settle tolerance, while distinct minima sit far apart.
const CLASSIFY_TOL: f64 = 1e-2;

/// A trajectory counts as settled once one update moves it less than this.
const SETTLE_TOL: f64 = 1e-7;

const PALETTE: [[u8; 3]; 6] = [
  [230, 90, 70],
  [80, 160, 230],
  [120, 200, 110],
  [240, 200, 80],
  [180, 110, 220],
  [90, 210, 200],
];

/// Rectangular window of the plane to scan.

#[derive(Debug, Clone)]
pub struct Window {
  pub x: Range<f64>,
  pub y: Range<f64>,
}

/// One pixel's outcome: the index of the attractor reached (`None` if the
/// trajectory blew up) and the number of steps until it settled.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
  pub attractor: Option<usize>,
  pub steps: usize,
}

/// Raster of descent outcomes, row major, top row first.

#[derive(Debug, Clone)]
pub struct BasinMap {
  pub width: usize,
  pub height: usize,
  pub steps_limit: usize,
  pub attractors: Vec<(f64, f64)>,
  pub cells: Vec<Cell>,
}

/// Run `descent` from the center of every pixel and classify the endpoints.

pub fn render<O: PlanarObjective>(
  objective: &O,
  window: &Window,
  width: usize,
  height: usize,
  descent: Descent,
) -> Result<BasinMap> {
  let mut attractors: Vec<(f64, f64)> = Vec::new();
  let mut cells = Vec::with_capacity(width * height);

  for (row, col) in iproduct!(0..height, 0..width) {
    let x0 = window.x.start
      + (window.x.end - window.x.start) * (col as f64 + 0.5) / width as f64;
    let y0 = window.y.end
      - (window.y.end - window.y.start) * (row as f64 + 0.5) / height as f64;

    let cell = match descend(objective, x0, y0, descent)? {
      Some((end, steps)) => Cell {
        attractor: Some(classify(&mut attractors, end)),
        steps,
      },
      None => Cell { attractor: None, steps: descent.steps },
    };
    cells.push(cell);
  }

  Ok(BasinMap {
    width,
    height,
    steps_limit: descent.steps,
    attractors,
    cells,
  })
}

/// Descend from `(x0, y0)`. Returns the endpoint and the step count at
/// which the trajectory settled, or `None` if it left the finite range.
fn descend<O: PlanarObjective>(
  objective: &O,
  x0: f64,
  y0: f64,
  config: Descent,
) -> Result<Option<((f64, f64), usize)>> {
  let x = Var::new(x0, &Device::Cpu)?;
  let y = Var::new(y0, &Device::Cpu)?;
  let mut trainer = SGD::new(vec![x.clone(), y.clone()], config.learning_rate)?;

  let mut cur = (x0, y0);
  let mut taken = config.steps;

  for step in 0..config.steps {
    let loss = objective.loss(x.as_tensor(), y.as_tensor())?;
    trainer.backward_step(&loss)?;

    let next = (
      x.as_tensor().to_scalar::<f64>()?,
      y.as_tensor().to_scalar::<f64>()?,
    );
    if !next.0.is_finite() || !next.1.is_finite() {
      return Ok(None);
    }
    let moved = (next.0 - cur.0).hypot(next.1 - cur.1);
    cur = next;
    if moved < SETTLE_TOL {
      taken = step + 1;
      break;
    }
  }

  Ok(Some((cur, taken)))
}

fn classify(attractors: &mut Vec<(f64, f64)>, point: (f64, f64)) -> usize {
  for (i, a) in attractors.iter().enumerate() {
    if (a.0 - point.0).hypot(a.1 - point.1) < CLASSIFY_TOL {
      return i;
    }
  }
  attractors.push(point);
  info!(
    "attractor #{} at ({:.6}, {:.6})",
    attractors.len() - 1,
    point.0,
    point.1
  );
  attractors.len() - 1
}

impl BasinMap {
  /// Write the map as a binary PPM (P6) image. Basin index picks the hue,
  /// settle speed the brightness; lost trajectories come out black.
  pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
    write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
    for cell in &self.cells {
      let rgb = match cell.attractor {
        Some(i) => shade(PALETTE[i % PALETTE.len()], cell.steps, self.steps_limit),
        None => [0, 0, 0],
      };
      out.write_all(&rgb)?;
    }
    Ok(())
  }
}

fn shade(base: [u8; 3], steps: usize, limit: usize) -> [u8; 3] {
  // Fast basins render bright, slow ones dark
  let t = 1.0 - 0.7 * steps.min(limit) as f64 / limit.max(1) as f64;
  base.map(|c| (c as f64 * t) as u8)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn classify_merges_nearby_endpoints() {
    let mut attractors = Vec::new();
    assert_eq!(classify(&mut attractors, (3.0, 2.0)), 0);
    assert_eq!(classify(&mut attractors, (3.0005, 1.9995)), 0);
    assert_eq!(classify(&mut attractors, (-2.8, 3.1)), 1);
    assert_eq!(attractors.len(), 2);
  }

  #[test]
  fn shade_darkens_with_step_count() {
    let fast = shade([200, 100, 50], 0, 100);
    let slow = shade([200, 100, 50], 100, 100);
    assert_eq!(fast, [200, 100, 50]);
    assert!(slow[0] < fast[0] && slow[1] < fast[1] && slow[2] < fast[2]);
  }

  #[test]
  fn ppm_header_and_size() {
    let map = BasinMap {
      width: 2,
      height: 2,
      steps_limit: 10,
      attractors: vec![(0.0, 0.0)],
      cells: vec![
        Cell { attractor: Some(0), steps: 1 },
        Cell { attractor: Some(0), steps: 10 },
        Cell { attractor: None, steps: 10 },
        Cell { attractor: Some(0), steps: 5 },
      ],
    };
    let mut buf = Vec::new();
    map.write_ppm(&mut buf).unwrap();
    assert!(buf.starts_with(b"P6\n2 2\n255\n"));
    assert_eq!(buf.len(), b"P6\n2 2\n255\n".len() + 4 * 3);
    // lost trajectory renders black
    assert_eq!(&buf[buf.len() - 6..buf.len() - 3], &[0, 0, 0]);
  }
}
