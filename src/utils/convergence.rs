//! Residual bookkeeping shared by all solvers.

use std::fmt;

use num_traits::Float;

/// Guards the normalization factor against a zero reference magnitude.
pub(crate) fn small<T: Float + From<f64>>() -> T {
    <T as From<f64>>::from(1.0e-20)
}

/// Breakdown threshold for the normalized pivot quantities.
pub(crate) fn vsmall<T: Float + From<f64>>() -> T {
    <T as From<f64>>::from(f64::MIN_POSITIVE)
}

/// Per-solve performance record returned to the caller.
///
/// Residuals are dimensionless (normalized); numerical-quality outcomes
/// (singular, non-converged) travel in these fields, never as errors.
#[derive(Clone, Debug)]
pub struct SolverPerformance<T> {
    pub solver_name: &'static str,
    pub field_name: String,
    pub initial_residual: T,
    pub final_residual: T,
    pub n_iterations: usize,
    pub converged: bool,
    pub singular: bool,
}

impl<T: Float + From<f64>> SolverPerformance<T> {
    pub fn new(solver_name: &'static str, field_name: impl Into<String>) -> Self {
        Self {
            solver_name,
            field_name: field_name.into(),
            initial_residual: T::zero(),
            final_residual: T::zero(),
            n_iterations: 0,
            converged: false,
            singular: false,
        }
    }

    /// Absolute-or-relative test: converged once
    /// `final_residual <= max(tolerance, rel_tol * initial_residual)`.
    /// Updates and returns the converged flag.
    pub fn check_convergence(&mut self, tolerance: T, rel_tol: T) -> bool {
        let relative = rel_tol * self.initial_residual;
        let criterion = if relative > tolerance { relative } else { tolerance };
        self.converged = self.final_residual <= criterion;
        self.converged
    }

    /// Breakdown guard: a normalized pivot below the tiny threshold marks
    /// the solve singular (sticky). Returns the singular flag.
    pub fn check_singularity(&mut self, pivot: T) -> bool {
        if pivot < vsmall() {
            self.singular = true;
        }
        self.singular
    }
}

impl<T: fmt::Display> fmt::Display for SolverPerformance<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: solving for {}, initial residual = {}, final residual = {}, iterations = {}",
            self.solver_name,
            self.field_name,
            self.initial_residual,
            self.final_residual,
            self.n_iterations
        )
    }
}
