#![allow(non_snake_case)]

use ndarray::prelude::*;
use ndarray::NdFloat; // includes LinalgScalar and ScalarOperand

/// Optimistic Gradient Descent-Ascent for L-Lipschitz Smooth Min-Max Problems
///
/// A negative-momentum correction of [`gda`](super::gda): each player steps
/// along an extrapolated gradient built from the current and the previous
/// iteration's gradient. The stale term anticipates the other player's move,
/// which is what stabilizes the rotation that defeats plain GDA.
/// See [\[DISZ18\]](#references).
///
/// Algorithm
/// ---------
/// ```math
/// \begin{aligned}
/// g^x_i &= \nabla_x f(x_i, y_i), \qquad g^y_i = \nabla_y f(x_i, y_i) \\
/// x_{i+1} &= x_i - \frac{h}{L} \left( (\alpha + \beta)\, g^x_i - \beta\, g^x_{i-1} \right) \\
/// y_{i+1} &= y_i + \frac{h}{L} \left( (\alpha + \beta)\, g^y_i - \beta\, g^y_{i-1} \right)
/// \end{aligned}
/// ```
/// with $`g^x_{-1} = g^y_{-1} = 0`$, so the first step is a plain gradient
/// step scaled by $`\alpha + \beta`$. The canonical rule is
/// $`\alpha = \beta = 1`$, i.e. step along $`2 g_i - g_{i-1}`$.
///
/// Convergence
/// -----------
/// On bilinear games $`f(x, y) = x^\top A y`$, where GDA diverges for every
/// step size, OGDA converges linearly to the saddle point for
/// $`h/L`$ small enough (e.g. contraction factor
/// $`\approx 1 - \tfrac12 (h/L)^2`$ per iteration on $`f(x, y) = x y`$).
///
/// Parameters
/// ----------
/// - __grad_x:__    function that computes the partial gradient of f in x
/// - __grad_y:__    function that computes the partial gradient of f in y
/// - __L:__         Lipschitz constant of the objective gradient
/// - __h:__         normalized step size
/// - __alpha:__     weight of the current gradient
/// - __beta:__      weight of the optimistic correction
/// - __x0:__        initial min-player iterate, updated in place
/// - __y0:__        initial max-player iterate, updated in place
/// - __maxiter:__   number of iterations
/// - __callback:__  user-defined function to be evaluated with three arguments (x,y,iter).
///                   It is evaluated at (x0,y0,0) and then after each iteration.
///                   If it returns True, the function terminates early.
///
/// References
/// ----------
/// \[DISZ18\]: [ Daskalakis C, Ilyas A, Syrgkanis V, Zeng H,
///             "Training GANs with Optimism",
///             ICLR 2018, arXiv 1711.00141 ](https://arxiv.org/abs/1711.00141)
pub fn ogda<'a, 'b, T: NdFloat>(
    grad_x: impl (Fn(ArrayView1<T>, ArrayView1<T>) -> Array1<T>),
    grad_y: impl (Fn(ArrayView1<T>, ArrayView1<T>) -> Array1<T>),
    L: T,
    h: T,
    alpha: T,
    beta: T,
    x0: ArrayViewMut1<'a, T>,
    y0: ArrayViewMut1<'b, T>,
    maxiter: usize,
    mut callback: impl FnMut(ArrayView1<T>, ArrayView1<T>, usize) -> bool,
) -> (ArrayViewMut1<'a, T>, ArrayViewMut1<'b, T>) {
    let step = h / L;
    let mut x = x0;
    let mut y = y0;

    // stale gradients, zero before the first step
    let mut gx_old = Array1::<T>::zeros(x.raw_dim());
    let mut gy_old = Array1::<T>::zeros(y.raw_dim());

    if callback(x.view(), y.view(), 0) {
        return (x, y);
    };
    for iter in 1..=maxiter {
        let gx = grad_x(x.view(), y.view());
        let gy = grad_y(x.view(), y.view());

        let dx = &gx * (alpha + beta) - &gx_old * beta;
        let dy = &gy * (alpha + beta) - &gy_old * beta;
        x.scaled_add(-step, &dx);
        y.scaled_add(step, &dy);

        gx_old = gx;
        gy_old = gy;
        if callback(x.view(), y.view(), iter) {
            break;
        };
    }
    (x, y)
}

#[cfg(all(rustc_nightly, test))]
mod benches {
    use super::*;
    use crate::saddle::nop;
    use test::Bencher;

    #[bench]
    fn ogda_bilinear_1k(b: &mut Bencher) {
        b.iter(|| {
            let mut x0 = array![1.0f64];
            let mut y0 = array![1.0f64];
            ogda(
                |_x, y| y.to_owned(),
                |x, _y| x.to_owned(),
                1.0,
                0.001,
                1.0,
                1.0,
                x0.view_mut(),
                y0.view_mut(),
                1000,
                nop,
            );
            x0[0]
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saddle::nop;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ogda_bilinear_regression() {
        const NITER: usize = 5;
        let mut x0 = array![1.0f64];
        let mut y0 = array![1.0f64];
        // Exact iterates of the alpha = beta = 1 rule on f(x,y) = xy with
        // step 0.1, computed by hand in decimal arithmetic. The first step
        // doubles the plain gradient because the stale gradient is zero.
        let zk_ref: [[f64; 2]; NITER + 1] = [
            [1.0, 1.0],         // 0
            [0.8, 1.2],         // 1
            [0.66, 1.26],       // 2
            [0.528, 1.312],     // 3
            [0.3916, 1.3516],   // 4
            [0.25248, 1.37712], // 5
        ];
        let mut finished = false;
        ogda(
            |_x, y| y.to_owned(),
            |x, _y| x.to_owned(),
            1.0,
            0.1,
            1.0,
            1.0,
            x0.view_mut(),
            y0.view_mut(),
            NITER,
            |x, y, iter| {
                assert!(iter <= NITER);
                let zk_star = zk_ref[iter];
                assert_abs_diff_eq!(x[0], zk_star[0], epsilon = 1e-12);
                assert_abs_diff_eq!(y[0], zk_star[1], epsilon = 1e-12);
                if iter == NITER {
                    finished = true;
                }
                false
            },
        );
        assert!(finished);
        assert_abs_diff_eq!(x0, array![0.25248], epsilon = 1e-12);
        assert_abs_diff_eq!(y0, array![1.37712], epsilon = 1e-12);
    }

    #[test]
    fn ogda_bilinear_converges() {
        // the bilinear game where GDA diverges for every step size
        let mut x0 = array![1.0f64];
        let mut y0 = array![1.0f64];
        let mut norm2_mid = f64::NAN;
        ogda(
            |_x, y| y.to_owned(),
            |x, _y| x.to_owned(),
            1.0,
            0.1,
            1.0,
            1.0,
            x0.view_mut(),
            y0.view_mut(),
            2000,
            |x, y, iter| {
                if iter == 1000 {
                    norm2_mid = x[0] * x[0] + y[0] * y[0];
                }
                false
            },
        );
        let norm2_end = x0[0] * x0[0] + y0[0] * y0[0];
        assert!(norm2_mid < 2.0e-2);
        assert!(norm2_end < norm2_mid);
        assert!(x0[0].abs() < 1e-3);
        assert!(y0[0].abs() < 1e-3);
    }

    #[test]
    fn ogda_beta_zero_is_gda() {
        // with no optimistic correction the rule degenerates to plain GDA
        let mut x_o = array![1.0f64];
        let mut y_o = array![1.0f64];
        ogda(
            |_x, y| y.to_owned(),
            |x, _y| x.to_owned(),
            1.0,
            0.1,
            1.0,
            0.0,
            x_o.view_mut(),
            y_o.view_mut(),
            25,
            nop,
        );
        let mut x_g = array![1.0f64];
        let mut y_g = array![1.0f64];
        crate::saddle::gda(
            |_x, y| y.to_owned(),
            |x, _y| x.to_owned(),
            1.0,
            0.1,
            x_g.view_mut(),
            y_g.view_mut(),
            25,
            nop,
        );
        assert_abs_diff_eq!(x_o, x_g, epsilon = 1e-14);
        assert_abs_diff_eq!(y_o, y_g, epsilon = 1e-14);
    }

    #[test]
    fn ogda_zero_iterations() {
        let mut x0 = array![0.5f64];
        let mut y0 = array![1.5f64];
        let mut calls = 0;
        ogda(
            |_x, y| y.to_owned(),
            |x, _y| x.to_owned(),
            1.0,
            0.1,
            1.0,
            1.0,
            x0.view_mut(),
            y0.view_mut(),
            0,
            |x, y, iter| {
                calls += 1;
                assert_eq!(iter, 0);
                assert_abs_diff_eq!(x[0], 0.5);
                assert_abs_diff_eq!(y[0], 1.5);
                false
            },
        );
        // only the initial callback fires and the iterates are untouched
        assert_eq!(calls, 1);
        assert_abs_diff_eq!(x0, array![0.5]);
        assert_abs_diff_eq!(y0, array![1.5]);
    }

    #[test]
    fn ogda_strongly_convex_concave() {
        let mut x0 = array![2.0f64];
        let mut y0 = array![-1.5f64];
        ogda(
            |x, y| &x + &y,
            |x, y| &x - &y,
            1.0,
            0.1,
            1.0,
            1.0,
            x0.view_mut(),
            y0.view_mut(),
            400,
            nop,
        );
        assert_abs_diff_eq!(x0, array![0.0], epsilon = 1e-8);
        assert_abs_diff_eq!(y0, array![0.0], epsilon = 1e-8);
    }
}
