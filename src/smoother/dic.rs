//! DIC-based smoothers: correction from the incomplete factorization,
//! optionally composed with Gauss-Seidel sweeps.

use num_traits::Float;

use crate::error::LduError;
use crate::interface::LduInterface;
use crate::matrix::LduMatrix;
use crate::preconditioner::dic::{dic_sweep, reciprocal_dic_diag};
use crate::smoother::{GaussSeidelSmoother, LduSmoother, Sweep};

/// Per sweep: residual, DIC forward/backward substitution, correct psi.
pub struct DicSmoother<'a, T> {
    matrix: &'a LduMatrix<T>,
    bou_coeffs: &'a [Vec<T>],
    interfaces: &'a [Box<dyn LduInterface<T>>],
    r_d: Vec<T>,
}

impl<'a, T: Float> DicSmoother<'a, T> {
    pub fn new(
        matrix: &'a LduMatrix<T>,
        bou_coeffs: &'a [Vec<T>],
        interfaces: &'a [Box<dyn LduInterface<T>>],
    ) -> Result<Self, LduError> {
        if !matrix.is_symmetric() {
            return Err(LduError::MatrixShape {
                method: "DIC smoother",
                requirement: "a symmetric",
            });
        }
        Ok(Self {
            matrix,
            bou_coeffs,
            interfaces,
            r_d: reciprocal_dic_diag(matrix),
        })
    }
}

impl<'a, T: Float> LduSmoother<T> for DicSmoother<'a, T> {
    fn smooth(
        &self,
        psi: &mut [T],
        source: &[T],
        cmpt: usize,
        n_sweeps: usize,
    ) -> Result<(), LduError> {
        let n = self.matrix.n_cells();
        let mut r = vec![T::zero(); n];
        let mut w = vec![T::zero(); n];
        for _ in 0..n_sweeps {
            self.matrix
                .residual(&mut r, psi, source, self.bou_coeffs, self.interfaces, cmpt)?;
            dic_sweep(self.matrix, &self.r_d, &mut w, &r);
            for (pi, &wi) in psi.iter_mut().zip(&w) {
                *pi = *pi + wi;
            }
        }
        Ok(())
    }
}

/// DIC sweeps followed by Gauss-Seidel sweeps, as in the composed smoother
/// of the original solver family.
pub struct DicGaussSeidelSmoother<'a, T> {
    dic: DicSmoother<'a, T>,
    gs: GaussSeidelSmoother<'a, T>,
}

impl<'a, T: Float> DicGaussSeidelSmoother<'a, T> {
    pub fn new(
        matrix: &'a LduMatrix<T>,
        bou_coeffs: &'a [Vec<T>],
        interfaces: &'a [Box<dyn LduInterface<T>>],
    ) -> Result<Self, LduError> {
        Ok(Self {
            dic: DicSmoother::new(matrix, bou_coeffs, interfaces)?,
            gs: GaussSeidelSmoother::new(matrix, bou_coeffs, interfaces, Sweep::FORWARD),
        })
    }
}

impl<'a, T: Float> LduSmoother<T> for DicGaussSeidelSmoother<'a, T> {
    fn smooth(
        &self,
        psi: &mut [T],
        source: &[T],
        cmpt: usize,
        n_sweeps: usize,
    ) -> Result<(), LduError> {
        self.dic.smooth(psi, source, cmpt, n_sweeps)?;
        self.gs.smooth(psi, source, cmpt, n_sweeps)
    }
}
