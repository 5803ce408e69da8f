//! GDA vs OGDA on the bilinear game f(x, y) = x y.
//!
//! Runs both methods from (1, 1) with the same step size, prints periodic
//! iterate lines, and writes the phase-plane and objective-value plots plus
//! CSV dumps of both trajectories. Watch GDA spiral outward while OGDA
//! closes in on the saddle point at the origin.

use ndarray::array;
use ndarray_minimax::bilinear::BilinearGame;
use ndarray_minimax::plot::{LinePlot, PlotResult};
use ndarray_minimax::saddle::{gda, ogda};
use ndarray_minimax::trace::Trajectory;

const NITER: usize = 200;
const STEP: f64 = 0.1;

fn main() -> PlotResult<()> {
    let game = BilinearGame::<f64>::scalar();
    let lipschitz = game.lipschitz();

    let mut gda_trace = Trajectory::new();
    let mut x = array![1.0];
    let mut y = array![1.0];
    gda(
        |x, y| game.grad_x(x, y),
        |x, y| game.grad_y(x, y),
        lipschitz,
        STEP,
        x.view_mut(),
        y.view_mut(),
        NITER,
        |x, y, iter| {
            if iter % 20 == 0 {
                println!(
                    "[gda]  iter {:>4} | x {:>9.5} | y {:>9.5} | f {:>9.5} | grad {:>9.3e}",
                    iter,
                    x[0],
                    y[0],
                    game.value(x, y),
                    game.residual(x, y)
                );
            }
            gda_trace.push(iter, x, y, game.value(x, y));
            false
        },
    );

    let mut ogda_trace = Trajectory::new();
    let mut x = array![1.0];
    let mut y = array![1.0];
    ogda(
        |x, y| game.grad_x(x, y),
        |x, y| game.grad_y(x, y),
        lipschitz,
        STEP,
        1.0,
        1.0,
        x.view_mut(),
        y.view_mut(),
        NITER,
        |x, y, iter| {
            if iter % 20 == 0 {
                println!(
                    "[ogda] iter {:>4} | x {:>9.5} | y {:>9.5} | f {:>9.5} | grad {:>9.3e}",
                    iter,
                    x[0],
                    y[0],
                    game.value(x, y),
                    game.residual(x, y)
                );
            }
            ogda_trace.push(iter, x, y, game.value(x, y));
            false
        },
    );

    let gda_final = gda_trace.last().unwrap();
    let ogda_final = ogda_trace.last().unwrap();
    println!(
        "after {} iterations: gda grad norm = {:.3}, ogda grad norm = {:.3e}",
        NITER,
        game.residual(gda_final.x.view(), gda_final.y.view()),
        game.residual(ogda_final.x.view(), ogda_final.y.view())
    );

    LinePlot::new("GDA vs OGDA on f(x, y) = xy")
        .labels("x", "y")
        .series("gda", gda_trace.path())
        .series("ogda", ogda_trace.path())
        .save("gda_vs_ogda_phase.svg")?;

    LinePlot::new("objective along the iterates")
        .labels("iteration", "f(x, y)")
        .series("gda", gda_trace.values())
        .series("ogda", ogda_trace.values())
        .save("gda_vs_ogda_value.svg")?;

    std::fs::write("gda_trace.csv", gda_trace.to_csv())?;
    std::fs::write("ogda_trace.csv", ogda_trace.to_csv())?;

    println!("wrote gda_vs_ogda_phase.svg, gda_vs_ogda_value.svg and the two trace CSVs");
    Ok(())
}
