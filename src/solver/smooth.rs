//! Solver driver that iterates a smoother to convergence.

use num_traits::Float;

use crate::config::SolverControls;
use crate::error::LduError;
use crate::field::g_sum_mag;
use crate::interface::LduInterface;
use crate::matrix::LduMatrix;
use crate::parallel::Reduce;
use crate::smoother::smoother_from_name;
use crate::solver::{LduSolver, keep_iterating, norm_factor};
use crate::utils::convergence::SolverPerformance;

pub struct SmoothSolver<'a, T, C> {
    field_name: String,
    matrix: &'a LduMatrix<T>,
    bou_coeffs: &'a [Vec<T>],
    int_coeffs: &'a [Vec<T>],
    interfaces: &'a [Box<dyn LduInterface<T>>],
    controls: SolverControls<T>,
    comm: &'a C,
}

impl<'a, T: Float, C> SmoothSolver<'a, T, C> {
    pub fn new(
        field_name: impl Into<String>,
        matrix: &'a LduMatrix<T>,
        bou_coeffs: &'a [Vec<T>],
        int_coeffs: &'a [Vec<T>],
        interfaces: &'a [Box<dyn LduInterface<T>>],
        controls: SolverControls<T>,
        comm: &'a C,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            matrix,
            bou_coeffs,
            int_coeffs,
            interfaces,
            controls,
            comm,
        }
    }
}

impl<'a, T, C> LduSolver<T> for SmoothSolver<'a, T, C>
where
    T: Float + From<f64> + Send + Sync,
    C: Reduce<T>,
{
    fn solve(
        &mut self,
        psi: &mut [T],
        source: &[T],
        cmpt: usize,
    ) -> Result<SolverPerformance<T>, LduError> {
        let n = self.matrix.n_cells();
        assert_eq!(psi.len(), n);
        assert_eq!(source.len(), n);
        let mut perf = SolverPerformance::new("smoothSolver", self.field_name.clone());

        let smoother = smoother_from_name(
            &self.controls.smoother,
            self.matrix,
            self.bou_coeffs,
            self.int_coeffs,
            self.interfaces,
        )?;

        // Negative sweep count: relax a fixed number of times with no
        // residual bookkeeping at all.
        if self.controls.n_sweeps < 0 {
            let sweeps = self.controls.n_sweeps.unsigned_abs() as usize;
            smoother.smooth(psi, source, cmpt, sweeps)?;
            perf.n_iterations = sweeps;
            return Ok(perf);
        }
        let sweeps = (self.controls.n_sweeps.max(1)) as usize;

        let mut r = vec![T::zero(); n];
        self.matrix
            .residual(&mut r, psi, source, self.bou_coeffs, self.interfaces, cmpt)?;
        // A·psi recovered from the residual; saves a second matrix pass
        let a_psi: Vec<T> = source.iter().zip(&r).map(|(&b, &rc)| b - rc).collect();

        let norm = norm_factor(
            self.matrix,
            psi,
            source,
            &a_psi,
            self.bou_coeffs,
            self.interfaces,
            self.comm,
        );
        perf.initial_residual = g_sum_mag(&r, self.comm) / norm;
        perf.final_residual = perf.initial_residual;

        let tolerance = self.controls.tolerance;
        let rel_tol = self.controls.rel_tol;
        if self.controls.min_iter > 0 || !perf.check_convergence(tolerance, rel_tol) {
            loop {
                smoother.smooth(psi, source, cmpt, sweeps)?;
                perf.n_iterations += sweeps;

                self.matrix.residual(
                    &mut r,
                    psi,
                    source,
                    self.bou_coeffs,
                    self.interfaces,
                    cmpt,
                )?;
                perf.final_residual = g_sum_mag(&r, self.comm) / norm;
                if !keep_iterating(
                    &mut perf,
                    tolerance,
                    rel_tol,
                    self.controls.min_iter,
                    self.controls.max_iter,
                ) {
                    break;
                }
            }
        }
        Ok(perf)
    }
}
