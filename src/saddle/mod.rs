//! First Order Methods for Smooth Saddle-Point Problems
//!
//! For solving min-max problems
//! ```math
//! \min_x \max_y f(x, y)
//! ```
//! where $`f`$ is "smooth", i.e. has an $`L`$-Lipschitz continuous gradient
//! ```math
//! \| \nabla f(x, y) - \nabla f(z, w) \|_2 \leq L \| (x, y) - (z, w) \|_2
//! ```
//! A point $`(x_*, y_*)`$ is a saddle point when it minimizes
//! $`f(\cdot, y_*)`$ over $`x`$ and maximizes $`f(x_*, \cdot)`$ over $`y`$
//! simultaneously.
//!
//! The solvers here access $`f`$ only through its two partial gradients,
//! supplied as closures $`\nabla_x f(x, y)`$ and $`\nabla_y f(x, y)`$.
//! For the bilinear game $`f(x, y) = x^\top A y`$ those are $`A y`$ and
//! $`A^\top x`$, and $`L`$ is the spectral norm of $`A`$; see
//! [`crate::bilinear`].

mod gda;
pub use gda::*;
mod ogda;
pub use ogda::*;

use ndarray::ArrayView;

/// Do nothing function for optional user callback (returns false)
#[allow(clippy::needless_pass_by_value)]
pub fn nop<T, D>(_x: ArrayView<T, D>, _y: ArrayView<T, D>, _itr: usize) -> bool {
    false
}
