//! Bilinear Zero-Sum Games
//!
//! The canonical test problem for saddle-point methods,
//! ```math
//! \min_x \max_y \; f(x, y) = x^\top A y
//! ```
//! with coupling matrix $`A`$. The origin is a saddle point (the unique one
//! when $`A`$ has full rank), the partial gradients are linear, and the
//! objective gradient is Lipschitz with constant $`\sigma_1(A)`$, the
//! largest singular value of $`A`$.
//!
//! The scalar instance $`f(x, y) = x y`$ is the textbook example on which
//! plain GDA diverges while OGDA converges.

use ndarray::prelude::*;
use ndarray::NdFloat;

/// Two-player zero-sum game with payoff $`f(x, y) = x^\top A y`$.
#[derive(Clone, Debug)]
pub struct BilinearGame<S> {
    coupling: Array2<S>,
}

impl<S: NdFloat> BilinearGame<S> {
    pub fn new(coupling: Array2<S>) -> BilinearGame<S> {
        BilinearGame { coupling }
    }

    /// The canonical scalar game $`f(x, y) = x y`$.
    pub fn scalar() -> BilinearGame<S> {
        BilinearGame::new(Array2::eye(1))
    }

    pub fn coupling(&self) -> ArrayView2<S> {
        self.coupling.view()
    }

    /// Payoff $`x^\top A y`$, paid by the min player to the max player.
    pub fn value(&self, x: ArrayView1<S>, y: ArrayView1<S>) -> S {
        x.dot(&self.coupling.dot(&y))
    }

    /// Partial gradient in x, $`\nabla_x f(x, y) = A y`$.
    pub fn grad_x(&self, _x: ArrayView1<S>, y: ArrayView1<S>) -> Array1<S> {
        self.coupling.dot(&y)
    }

    /// Partial gradient in y, $`\nabla_y f(x, y) = A^\top x`$.
    pub fn grad_y(&self, x: ArrayView1<S>, _y: ArrayView1<S>) -> Array1<S> {
        self.coupling.t().dot(&x)
    }

    /// Frobenius-norm bound on $`\sigma_1(A)`$, a valid Lipschitz constant
    /// for the step-size rule of the solvers in [`crate::saddle`].
    pub fn lipschitz(&self) -> S {
        self.coupling
            .iter()
            .fold(S::zero(), |acc, &a| acc + a * a)
            .sqrt()
    }

    /// Joint gradient norm $`\|(\nabla_x f, \nabla_y f)\|_2`$,
    /// zero exactly at a saddle point.
    pub fn residual(&self, x: ArrayView1<S>, y: ArrayView1<S>) -> S {
        let gx = self.grad_x(x, y);
        let gy = self.grad_y(x, y);
        (gx.dot(&gx) + gy.dot(&gy)).sqrt()
    }
}
