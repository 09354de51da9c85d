//! Educational gradient descent demos on top of [candle](https://github.com/huggingface/candle).
//! Tiny. No original numerics. CPU only.
//!
//! The autodiff engine is not implemented here. Parameters are `candle_core::Var`s,
//! loss graphs are traced eagerly, gradients come from `backward()` and updates
//! from `candle_nn`'s SGD rule. This crate only wires those pieces into small,
//! inspectable experiments:
//!
//! - **Scalar descent** — minimize `(x² − target)²` to approximate square roots,
//! recording the full loss trajectory.
//!
//! - **Basin fractals** — run the same descent from every pixel of a planar grid
//! and color each start by the minimum it falls into.
//!
//! # Example
//!
//! Approximating `√2` by gradient descent:
//! ```no_run
//! use gradlab::{ Descent, RootLoss };
//!
//! fn main() -> candle_core::Result<()> {
//!   let descent = Descent { steps: 60, learning_rate: 0.1 };
//!   let trace = descent.minimize(&RootLoss { target: 2.0 }, 1.0)?;
//!
//!   println!("x = {} after {} steps", trace.end, trace.losses.len());
//!   Ok(())
//! }
//! ```
//!
//! ## More examples
//! Check the `/demos` folder for runnable example code.

mod descent;
mod objective;

pub mod fractal;

pub use descent::{ Descent, Trace };
pub use objective::{ ScalarObjective, PlanarObjective, RootLoss, Himmelblau };
