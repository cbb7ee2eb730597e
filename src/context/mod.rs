//! One-stop entry point binding a matrix, its coupling data, and controls.

use num_traits::Float;

use crate::config::SolverControls;
use crate::error::LduError;
use crate::interface::LduInterface;
use crate::matrix::LduMatrix;
use crate::parallel::Reduce;
use crate::solver::{
    LduSolver, PbicgSolver, PcgSolver, SOLVER_NAMES, SmoothSolver,
};
use crate::utils::convergence::SolverPerformance;

/// Everything one linear solve needs, minus the unknowns and the source.
///
/// The caller assembles the matrix and the interface coupling once per
/// field and then calls [`solve`](Self::solve) per component, selecting
/// the solver by the name in `controls`.
pub struct LduSolverContext<'a, T, C> {
    pub field_name: String,
    pub matrix: &'a LduMatrix<T>,
    pub bou_coeffs: &'a [Vec<T>],
    pub int_coeffs: &'a [Vec<T>],
    pub interfaces: &'a [Box<dyn LduInterface<T>>],
    pub controls: SolverControls<T>,
    pub comm: &'a C,
}

impl<'a, T, C> LduSolverContext<'a, T, C>
where
    T: Float + From<f64> + Send + Sync,
    C: Reduce<T>,
{
    pub fn solve(
        &self,
        psi: &mut [T],
        source: &[T],
        cmpt: usize,
    ) -> Result<SolverPerformance<T>, LduError> {
        match self.controls.solver.as_str() {
            "PCG" => PcgSolver::new(
                self.field_name.clone(),
                self.matrix,
                self.bou_coeffs,
                self.interfaces,
                self.controls.clone(),
                self.comm,
            )?
            .solve(psi, source, cmpt),
            "PBiCG" => PbicgSolver::new(
                self.field_name.clone(),
                self.matrix,
                self.bou_coeffs,
                self.int_coeffs,
                self.interfaces,
                self.controls.clone(),
                self.comm,
            )?
            .solve(psi, source, cmpt),
            "smoothSolver" => SmoothSolver::new(
                self.field_name.clone(),
                self.matrix,
                self.bou_coeffs,
                self.int_coeffs,
                self.interfaces,
                self.controls.clone(),
                self.comm,
            )
            .solve(psi, source, cmpt),
            other => Err(LduError::UnknownType {
                kind: "solver",
                name: other.to_owned(),
                valid: SOLVER_NAMES,
            }),
        }
    }
}
