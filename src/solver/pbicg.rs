//! Preconditioned bi-conjugate gradient for asymmetric matrices.

use num_traits::Float;

use crate::config::SolverControls;
use crate::error::LduError;
use crate::field::{g_sum_mag, g_sum_prod};
use crate::interface::LduInterface;
use crate::matrix::LduMatrix;
use crate::parallel::Reduce;
use crate::preconditioner::preconditioner_from_name;
use crate::solver::{DEFAULT_MAX_ITER, LduSolver, keep_iterating, norm_factor};
use crate::utils::convergence::SolverPerformance;

pub struct PbicgSolver<'a, T, C> {
    field_name: String,
    matrix: &'a LduMatrix<T>,
    bou_coeffs: &'a [Vec<T>],
    int_coeffs: &'a [Vec<T>],
    interfaces: &'a [Box<dyn LduInterface<T>>],
    controls: SolverControls<T>,
    comm: &'a C,
}

impl<T, C> core::fmt::Debug for PbicgSolver<'_, T, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PbicgSolver").finish_non_exhaustive()
    }
}

impl<'a, T: Float, C> PbicgSolver<'a, T, C> {
    pub fn new(
        field_name: impl Into<String>,
        matrix: &'a LduMatrix<T>,
        bou_coeffs: &'a [Vec<T>],
        int_coeffs: &'a [Vec<T>],
        interfaces: &'a [Box<dyn LduInterface<T>>],
        controls: SolverControls<T>,
        comm: &'a C,
    ) -> Result<Self, LduError> {
        if matrix.is_symmetric() {
            return Err(LduError::MatrixShape {
                method: "PBiCG",
                requirement: "an asymmetric",
            });
        }
        Ok(Self {
            field_name: field_name.into(),
            matrix,
            bou_coeffs,
            int_coeffs,
            interfaces,
            controls,
            comm,
        })
    }
}

impl<'a, T, C> LduSolver<T> for PbicgSolver<'a, T, C>
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
        let mut perf = SolverPerformance::new("PBiCG", self.field_name.clone());

        let mut w = vec![T::zero(); n];
        self.matrix
            .amul(&mut w, psi, self.bou_coeffs, self.interfaces, cmpt)?;
        let mut r: Vec<T> = source.iter().zip(&w).map(|(&b, &ax)| b - ax).collect();
        // Shadow residual of the dual (transposed) system
        let mut r_t = r.clone();

        let norm = norm_factor(
            self.matrix,
            psi,
            source,
            &w,
            self.bou_coeffs,
            self.interfaces,
            self.comm,
        );
        perf.initial_residual = g_sum_mag(&r, self.comm) / norm;
        perf.final_residual = perf.initial_residual;

        let tolerance = self.controls.tolerance;
        let rel_tol = self.controls.rel_tol;
        if self.controls.min_iter > 0 || !perf.check_convergence(tolerance, rel_tol) {
            let pc = preconditioner_from_name(&self.controls.preconditioner, self.matrix)?;
            let mut w_t = vec![T::zero(); n];
            let mut p = vec![T::zero(); n];
            let mut p_t = vec![T::zero(); n];
            let mut w_r_t = T::zero();
            let limit = DEFAULT_MAX_ITER.max(self.controls.max_iter);
            loop {
                let w_r_t_old = w_r_t;
                pc.precondition(&mut w, &r, cmpt);
                pc.precondition_t(&mut w_t, &r_t, cmpt);
                w_r_t = g_sum_prod(&w, &r_t, self.comm);

                if perf.n_iterations == 0 {
                    p.copy_from_slice(&w);
                    p_t.copy_from_slice(&w_t);
                } else {
                    let beta = w_r_t / w_r_t_old;
                    for (pj, &wj) in p.iter_mut().zip(&w) {
                        *pj = wj + beta * *pj;
                    }
                    for (pj, &wj) in p_t.iter_mut().zip(&w_t) {
                        *pj = wj + beta * *pj;
                    }
                }

                self.matrix
                    .amul(&mut w, &p, self.bou_coeffs, self.interfaces, cmpt)?;
                self.matrix
                    .tmul(&mut w_t, &p_t, self.int_coeffs, self.interfaces, cmpt)?;
                let w_a_p_t = g_sum_prod(&w, &p_t, self.comm);
                if perf.check_singularity(w_a_p_t.abs() / norm) {
                    break;
                }

                let alpha = w_r_t / w_a_p_t;
                for (xj, &pj) in psi.iter_mut().zip(&p) {
                    *xj = *xj + alpha * pj;
                }
                for (rj, &wj) in r.iter_mut().zip(&w) {
                    *rj = *rj - alpha * wj;
                }
                for (rj, &wj) in r_t.iter_mut().zip(&w_t) {
                    *rj = *rj - alpha * wj;
                }

                perf.n_iterations += 1;
                perf.final_residual = g_sum_mag(&r, self.comm) / norm;

                // Pathological divergence is unsafe to continue from
                if perf.n_iterations > limit {
                    return Err(LduError::Diverged {
                        solver: "PBiCG",
                        field: self.field_name.clone(),
                        iterations: perf.n_iterations,
                        limit,
                    });
                }
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
