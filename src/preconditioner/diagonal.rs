// Diagonal (Jacobi) preconditioner

use num_traits::Float;

use crate::matrix::LduMatrix;
use crate::preconditioner::LduPreconditioner;

/// Reciprocal-diagonal scaling: w = D⁻¹ r.
pub struct DiagonalPreconditioner<T> {
    inv_diag: Vec<T>,
}

impl<T: Float> DiagonalPreconditioner<T> {
    pub fn new(matrix: &LduMatrix<T>) -> Self {
        Self {
            inv_diag: matrix.diag().iter().map(|&d| T::one() / d).collect(),
        }
    }
}

impl<T: Float> LduPreconditioner<T> for DiagonalPreconditioner<T> {
    fn precondition(&self, w: &mut [T], r: &[T], _cmpt: usize) {
        for (wi, (&ri, &rd)) in w.iter_mut().zip(r.iter().zip(&self.inv_diag)) {
            *wi = ri * rd;
        }
    }
}
