//! The `ndarray-minimax` crate provides first-order algorithms for smooth
//! saddle-point (min-max) problems over `ndarray` variables,
//! ```math
//! \min_x \max_y f(x, y)
//! ```
//!
//! It includes the two classic simultaneous-gradient methods:
//! - Gradient Descent-Ascent (GDA)
//! - Optimistic Gradient Descent-Ascent (OGDA)
//!
//! together with the canonical bilinear test game $`f(x, y) = x^\top A y`$,
//! trajectory recording, and SVG plotting of the recorded iterates. The
//! bilinear game is the textbook example separating the two methods: GDA
//! spirals away from the saddle point while OGDA converges to it, and the
//! [`plot`] module exists to make that picture.
//!
//! The provided methods have been tested against exact hand-computed
//! iterates, but have not been tuned for maximum performance or minimum
//! memory usage.

#![cfg_attr(all(rustc_nightly, test), feature(test))]
#[cfg(all(rustc_nightly, test))]
extern crate test;

pub mod bilinear;
pub mod plot;
pub mod saddle;
pub mod trace;
