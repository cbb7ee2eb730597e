//! Iterative solver drivers sharing one convergence-loop shape.

use num_traits::Float;

use crate::error::LduError;
use crate::field::{g_average, g_sum};
use crate::interface::LduInterface;
use crate::matrix::LduMatrix;
use crate::parallel::Reduce;
use crate::utils::convergence::{SolverPerformance, small};

/// Solve A·psi = source for one component, returning the performance record.
pub trait LduSolver<T> {
    fn solve(
        &mut self,
        psi: &mut [T],
        source: &[T],
        cmpt: usize,
    ) -> Result<SolverPerformance<T>, LduError>;
}

/// Registered solver type names.
pub const SOLVER_NAMES: &[&str] = &["PCG", "PBiCG", "smoothSolver"];

/// Iteration count past which PBiCG treats the run as pathological.
pub const DEFAULT_MAX_ITER: usize = 1000;

/// Scale-invariant reference magnitude for residual normalization.
///
/// With `x̄` the global mean of psi and `s` the row sums of A,
/// `normFactor = Σ(|A·psi − s·x̄| + |b − s·x̄|) + SMALL`, reduced over all
/// partitions. The shape matters (comparable relative residuals, never
/// zero); the exact coefficients are not load-bearing.
pub(crate) fn norm_factor<T, C>(
    matrix: &LduMatrix<T>,
    psi: &[T],
    source: &[T],
    a_psi: &[T],
    bou_coeffs: &[Vec<T>],
    interfaces: &[Box<dyn LduInterface<T>>],
    comm: &C,
) -> T
where
    T: Float + From<f64> + Send + Sync,
    C: Reduce<T>,
{
    let x_ref = g_average(psi, comm);
    let mut tmp = vec![T::zero(); matrix.n_cells()];
    matrix.sum_a(&mut tmp, bou_coeffs, interfaces);
    for c in 0..matrix.n_cells() {
        let t = tmp[c] * x_ref;
        tmp[c] = (a_psi[c] - t).abs() + (source[c] - t).abs();
    }
    g_sum(&tmp, comm) + small()
}

/// Shared loop condition: keep iterating while the budget allows and
/// convergence has not been reached, or the minimum count is unmet.
pub(crate) fn keep_iterating<T: Float + From<f64>>(
    perf: &mut SolverPerformance<T>,
    tolerance: T,
    rel_tol: T,
    min_iter: usize,
    max_iter: usize,
) -> bool {
    let converged = perf.check_convergence(tolerance, rel_tol);
    (perf.n_iterations < max_iter && !converged) || perf.n_iterations < min_iter
}

pub mod pcg;
pub use pcg::PcgSolver;
pub mod pbicg;
pub use pbicg::PbicgSolver;
pub mod smooth;
pub use smooth::SmoothSolver;
