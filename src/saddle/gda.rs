#![allow(non_snake_case)]

use ndarray::prelude::*;
use ndarray::NdFloat; // includes LinalgScalar and ScalarOperand

/// Gradient Descent-Ascent for L-Lipschitz Smooth Min-Max Problems
///
/// The naive simultaneous-gradient method: both partial gradients are
/// evaluated at the current iterate, then the min player takes a descent
/// step and the max player an ascent step.
///
/// Algorithm
/// ---------
/// ```math
/// \begin{aligned}
/// x_{i+1} &= x_i - \frac{h}{L} \nabla_x f(x_i, y_i) \\
/// y_{i+1} &= y_i + \frac{h}{L} \nabla_y f(x_i, y_i)
/// \end{aligned}
/// ```
///
/// Convergence
/// -----------
/// GDA converges on strongly convex-concave objectives, but not in general.
/// On the bilinear game $`f(x, y) = x y`$ the iterate norm satisfies
/// ```math
/// \|z_{i+1}\|_2^2 = \left(1 + \tfrac{h^2}{L^2}\right) \|z_i\|_2^2,
/// \qquad z_i = (x_i, y_i)
/// ```
/// exactly, so the iterates spiral outward for every step size. Use
/// [`ogda`](super::ogda) for bilinear problems.
///
/// Parameters
/// ----------
/// - __grad_x:__    function that computes the partial gradient of f in x
/// - __grad_y:__    function that computes the partial gradient of f in y
/// - __L:__         Lipschitz constant of the objective gradient
/// - __h:__         normalized step size
/// - __x0:__        initial min-player iterate, updated in place
/// - __y0:__        initial max-player iterate, updated in place
/// - __maxiter:__   number of iterations
/// - __callback:__  user-defined function to be evaluated with three arguments (x,y,iter).
///                   It is evaluated at (x0,y0,0) and then after each iteration.
///                   If it returns True, the function terminates early.
pub fn gda<'a, 'b, T: NdFloat>(
    grad_x: impl (Fn(ArrayView1<T>, ArrayView1<T>) -> Array1<T>),
    grad_y: impl (Fn(ArrayView1<T>, ArrayView1<T>) -> Array1<T>),
    L: T,
    h: T,
    x0: ArrayViewMut1<'a, T>,
    y0: ArrayViewMut1<'b, T>,
    maxiter: usize,
    mut callback: impl FnMut(ArrayView1<T>, ArrayView1<T>, usize) -> bool,
) -> (ArrayViewMut1<'a, T>, ArrayViewMut1<'b, T>) {
    let step = h / L;
    let mut x = x0;
    let mut y = y0;

    if callback(x.view(), y.view(), 0) {
        return (x, y);
    };
    for iter in 1..=maxiter {
        // both gradients at the old iterate, then step simultaneously
        let gx = grad_x(x.view(), y.view());
        let gy = grad_y(x.view(), y.view());
        x.scaled_add(-step, &gx);
        y.scaled_add(step, &gy);
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
    fn gda_bilinear_1k(b: &mut Bencher) {
        b.iter(|| {
            let mut x0 = array![1.0f64];
            let mut y0 = array![1.0f64];
            gda(
                |_x, y| y.to_owned(),
                |x, _y| x.to_owned(),
                1.0,
                0.001,
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
    fn gda_bilinear_regression() {
        const NITER: usize = 5;
        let mut x0 = array![1.0f64];
        let mut y0 = array![1.0f64];
        // Exact iterates of x -= 0.1*y; y += 0.1*x (simultaneous),
        // computed by hand in decimal arithmetic.
        let zk_ref: [[f64; 2]; NITER + 1] = [
            [1.0, 1.0],         // 0
            [0.9, 1.1],         // 1
            [0.79, 1.19],       // 2
            [0.671, 1.269],     // 3
            [0.5441, 1.3361],   // 4
            [0.41049, 1.39051], // 5
        ];
        let mut finished = false;
        gda(
            |_x, y| y.to_owned(),
            |x, _y| x.to_owned(),
            1.0,
            0.1,
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
        assert_abs_diff_eq!(x0, array![0.41049], epsilon = 1e-12);
        assert_abs_diff_eq!(y0, array![1.39051], epsilon = 1e-12);
    }

    #[test]
    fn gda_bilinear_diverges_at_exact_rate() {
        const NITER: usize = 50;
        let step = 0.1f64;
        let mut x0 = array![1.0f64];
        let mut y0 = array![1.0f64];
        let mut norm2_prev = 2.0;
        gda(
            |_x, y| y.to_owned(),
            |x, _y| x.to_owned(),
            1.0,
            step,
            x0.view_mut(),
            y0.view_mut(),
            NITER,
            |x, y, iter| {
                let norm2 = x[0] * x[0] + y[0] * y[0];
                if iter > 0 {
                    // squared norm grows by exactly 1 + step^2 per iteration
                    assert_abs_diff_eq!(
                        norm2,
                        (1.0 + step * step) * norm2_prev,
                        epsilon = 1e-9 * norm2
                    );
                }
                norm2_prev = norm2;
                false
            },
        );
        // after 50 iterations the iterates have left the unit ball for good
        assert!(norm2_prev > 2.0 * (1.0 + step * step).powi(NITER as i32 - 1));
    }

    #[test]
    fn gda_strongly_convex_concave() {
        // f(x, y) = x^2/2 - y^2/2 + x y has its saddle at the origin and
        // the GDA map is a contraction for small steps.
        let mut x0 = array![1.0f64];
        let mut y0 = array![1.0f64];
        gda(
            |x, y| &x + &y,
            |x, y| &x - &y,
            1.0,
            0.1,
            x0.view_mut(),
            y0.view_mut(),
            300,
            nop,
        );
        assert_abs_diff_eq!(x0, array![0.0], epsilon = 1e-8);
        assert_abs_diff_eq!(y0, array![0.0], epsilon = 1e-8);
    }

    #[test]
    fn gda_zero_iterations() {
        let mut x0 = array![1.0f64];
        let mut y0 = array![-2.0f64];
        let mut calls = 0;
        gda(
            |_x, y| y.to_owned(),
            |x, _y| x.to_owned(),
            1.0,
            0.1,
            x0.view_mut(),
            y0.view_mut(),
            0,
            |x, y, iter| {
                calls += 1;
                assert_eq!(iter, 0);
                assert_abs_diff_eq!(x[0], 1.0);
                assert_abs_diff_eq!(y[0], -2.0);
                false
            },
        );
        // only the initial callback fires and the iterates are untouched
        assert_eq!(calls, 1);
        assert_abs_diff_eq!(x0, array![1.0]);
        assert_abs_diff_eq!(y0, array![-2.0]);
    }

    #[test]
    fn gda_callback_terminates_early() {
        let mut x0 = array![1.0f64];
        let mut y0 = array![1.0f64];
        let mut last_seen = 0;
        gda(
            |_x, y| y.to_owned(),
            |x, _y| x.to_owned(),
            1.0,
            0.1,
            x0.view_mut(),
            y0.view_mut(),
            100,
            |_x, _y, iter| {
                last_seen = iter;
                iter == 2
            },
        );
        assert_eq!(last_seen, 2);
        // iterate 2 of the regression table above
        assert_abs_diff_eq!(x0, array![0.79], epsilon = 1e-12);
        assert_abs_diff_eq!(y0, array![1.19], epsilon = 1e-12);
    }
}
