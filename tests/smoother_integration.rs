//! smoothSolver behaviour through the public API.

use std::sync::Arc;

use approx::assert_abs_diff_eq;
use ldusolve::parallel::SerialComm;
use ldusolve::{LduAddressing, LduMatrix, LduSolverContext, SolverControls};

fn poisson_1d(n: usize) -> LduMatrix<f64> {
    let addr = Arc::new(
        LduAddressing::new(n, (0..n - 1).collect(), (1..n).collect()).unwrap(),
    );
    LduMatrix::symmetric(addr, vec![2.0; n], vec![-1.0; n - 1]).unwrap()
}

fn context<'a>(
    matrix: &'a LduMatrix<f64>,
    controls: SolverControls<f64>,
) -> LduSolverContext<'a, f64, SerialComm> {
    LduSolverContext {
        field_name: "p".to_owned(),
        matrix,
        bou_coeffs: &[],
        int_coeffs: &[],
        interfaces: &[],
        controls,
        comm: &SerialComm,
    }
}

fn smooth_controls(smoother: &str) -> SolverControls<f64> {
    SolverControls::default()
        .with_solver("smoothSolver")
        .with_smoother(smoother)
        .with_tolerance(1.0e-9)
        .with_max_iter(20000)
}

#[test]
fn gauss_seidel_solves_poisson() {
    let m = poisson_1d(8);
    for sm in ["GaussSeidel", "symGaussSeidel"] {
        let ctx = context(&m, smooth_controls(sm));
        let mut psi = vec![0.0; 8];
        let perf = ctx.solve(&mut psi, &vec![1.0; 8], 0).unwrap();
        assert!(perf.converged, "{sm}: {perf}");
        // x_i = (i+1)(n-i)/2
        for (i, x) in psi.iter().enumerate() {
            let e = ((i + 1) * (8 - i)) as f64 / 2.0;
            assert_abs_diff_eq!(x, &e, epsilon = 1.0e-6);
        }
    }
}

#[test]
fn dic_smoothers_converge_faster_than_gauss_seidel() {
    let m = poisson_1d(32);
    let b = vec![1.0; 32];
    let mut iters = std::collections::HashMap::new();
    for sm in ["GaussSeidel", "DIC", "DICGaussSeidel"] {
        let ctx = context(&m, smooth_controls(sm));
        let mut psi = vec![0.0; 32];
        let perf = ctx.solve(&mut psi, &b, 0).unwrap();
        assert!(perf.converged, "{sm}: {perf}");
        iters.insert(sm, perf.n_iterations);
    }
    // DIC is exact for a tridiagonal matrix, so one sweep suffices
    assert!(iters["DIC"] < iters["GaussSeidel"], "{iters:?}");
}

#[test]
fn negative_sweep_count_runs_exactly_that_many_sweeps() {
    let m = poisson_1d(8);
    let ctx = context(
        &m,
        smooth_controls("symGaussSeidel").with_n_sweeps(-5),
    );
    let mut psi = vec![0.0; 8];
    let perf = ctx.solve(&mut psi, &vec![1.0; 8], 0).unwrap();
    assert_eq!(perf.n_iterations, 5);
    assert!(!perf.converged);
    assert_eq!(perf.initial_residual, 0.0);
    assert_eq!(perf.final_residual, 0.0);
}

#[test]
fn sweep_blocks_show_up_in_iteration_count() {
    let m = poisson_1d(8);
    let ctx = context(&m, smooth_controls("symGaussSeidel").with_n_sweeps(3));
    let mut psi = vec![0.0; 8];
    let perf = ctx.solve(&mut psi, &vec![1.0; 8], 0).unwrap();
    assert!(perf.converged, "{perf}");
    assert_eq!(perf.n_iterations % 3, 0, "{perf}");
}
