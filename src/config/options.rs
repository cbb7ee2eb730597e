//! Solver control parameters.
//!
//! The numeric controls of one linear solve, produced by the caller's
//! configuration layer and consumed here already parsed. Type names are
//! resolved against the registered solver/preconditioner/smoother tables at
//! construction time.

use num_traits::Float;

use crate::solver::DEFAULT_MAX_ITER;

/// Controls for one `solve()` call.
#[derive(Clone, Debug)]
pub struct SolverControls<T> {
    /// Solver type name (PCG, PBiCG, smoothSolver)
    pub solver: String,

    /// Preconditioner type name, for the Krylov solvers
    pub preconditioner: String,

    /// Smoother type name, for smoothSolver
    pub smoother: String,

    /// Absolute convergence tolerance on the normalized residual
    pub tolerance: T,

    /// Relative tolerance against the initial residual (0 disables)
    pub rel_tol: T,

    /// Iterations performed even after convergence
    pub min_iter: usize,

    /// Iteration budget
    pub max_iter: usize,

    /// Smoothing sweeps per iteration; negative means exactly |n_sweeps|
    /// sweeps with no convergence testing
    pub n_sweeps: i32,
}

impl<T: Float + From<f64>> Default for SolverControls<T> {
    fn default() -> Self {
        Self {
            solver: "PCG".to_owned(),
            preconditioner: "diagonal".to_owned(),
            smoother: "symGaussSeidel".to_owned(),
            tolerance: <T as From<f64>>::from(1.0e-6),
            rel_tol: T::zero(),
            min_iter: 0,
            max_iter: DEFAULT_MAX_ITER,
            n_sweeps: 1,
        }
    }
}

impl<T: Float + From<f64>> SolverControls<T> {
    pub fn with_solver(mut self, name: &str) -> Self {
        self.solver = name.to_owned();
        self
    }
    pub fn with_preconditioner(mut self, name: &str) -> Self {
        self.preconditioner = name.to_owned();
        self
    }
    pub fn with_smoother(mut self, name: &str) -> Self {
        self.smoother = name.to_owned();
        self
    }
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }
    pub fn with_rel_tol(mut self, rel_tol: T) -> Self {
        self.rel_tol = rel_tol;
        self
    }
    pub fn with_min_iter(mut self, min_iter: usize) -> Self {
        self.min_iter = min_iter;
        self
    }
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
    pub fn with_n_sweeps(mut self, n_sweeps: i32) -> Self {
        self.n_sweeps = n_sweeps;
        self
    }
}
