//! Trajectory Recording
//!
//! The solvers in [`crate::saddle`] report progress only through their
//! iteration callback. [`Trajectory`] is the matching collector: push the
//! iterates (and the objective value) from inside the callback, then read
//! the recorded path back out for plotting or dumping.
//!
//! ```
//! use ndarray::array;
//! use ndarray_minimax::bilinear::BilinearGame;
//! use ndarray_minimax::saddle::gda;
//! use ndarray_minimax::trace::Trajectory;
//!
//! let game = BilinearGame::<f64>::scalar();
//! let mut trace = Trajectory::new();
//! let mut x0 = array![1.0];
//! let mut y0 = array![1.0];
//! gda(
//!     |x, y| game.grad_x(x, y),
//!     |x, y| game.grad_y(x, y),
//!     game.lipschitz(),
//!     0.1,
//!     x0.view_mut(),
//!     y0.view_mut(),
//!     10,
//!     |x, y, iter| {
//!         trace.push(iter, x, y, game.value(x, y));
//!         false
//!     },
//! );
//! assert_eq!(trace.len(), 11);
//! ```

use ndarray::prelude::*;
use ndarray::NdFloat;
use std::fmt::Write;

/// A single recorded iterate of a saddle-point run.
#[derive(Clone, Debug)]
pub struct TraceRecord<S> {
    pub iter: usize,
    pub x: Array1<S>,
    pub y: Array1<S>,
    pub value: S,
}

/// The recorded iterate sequence of a saddle-point run.
#[derive(Clone, Debug)]
pub struct Trajectory<S> {
    records: Vec<TraceRecord<S>>,
}

impl<S: NdFloat> Trajectory<S> {
    pub fn new() -> Trajectory<S> {
        Trajectory {
            records: Vec::new(),
        }
    }

    /// Record one iterate. Takes owned snapshots of the views, since the
    /// solver keeps mutating the underlying storage.
    pub fn push(&mut self, iter: usize, x: ArrayView1<S>, y: ArrayView1<S>, value: S) {
        self.records.push(TraceRecord {
            iter,
            x: x.to_owned(),
            y: y.to_owned(),
            value,
        });
    }

    pub fn records(&self) -> &[TraceRecord<S>] {
        &self.records
    }

    pub fn last(&self) -> Option<&TraceRecord<S>> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Phase-plane path `(x[0], y[0])`, the picture to draw for scalar games.
    /// Records with a zero-length iterate are skipped.
    pub fn path(&self) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .filter_map(|r| match (r.x.first(), r.y.first()) {
                (Some(&x), Some(&y)) => Some((to_f64(x), to_f64(y))),
                _ => None,
            })
            .collect()
    }

    /// Objective value against iteration number.
    pub fn values(&self) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .map(|r| (r.iter as f64, to_f64(r.value)))
            .collect()
    }

    /// Plain-text dump: one `iter,x...,y...,f` line per record.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        if let Some(first) = self.records.first() {
            out.push_str("iter");
            for i in 0..first.x.len() {
                let _ = write!(out, ",x{}", i);
            }
            for i in 0..first.y.len() {
                let _ = write!(out, ",y{}", i);
            }
            out.push_str(",f\n");
        }
        for r in &self.records {
            let _ = write!(out, "{}", r.iter);
            for v in r.x.iter().chain(r.y.iter()) {
                let _ = write!(out, ",{:e}", v);
            }
            let _ = writeln!(out, ",{:e}", r.value);
        }
        out
    }
}

impl<S: NdFloat> Default for Trajectory<S> {
    fn default() -> Trajectory<S> {
        Trajectory::new()
    }
}

// NdFloat implies NumCast, and every NdFloat type fits in an f64
fn to_f64<S: NdFloat>(v: S) -> f64 {
    num_traits::cast(v).unwrap_or(f64::NAN)
}
