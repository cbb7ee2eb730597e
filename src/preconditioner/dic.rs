//! Simplified diagonal-based incomplete Cholesky preconditioner.
//!
//! The modified reciprocal diagonal is computed once at construction; each
//! application is one forward and one backward substitution sweep over the
//! faces, relying on the upper-triangular face ordering of the addressing.

use num_traits::Float;

use crate::error::LduError;
use crate::matrix::LduMatrix;
use crate::preconditioner::LduPreconditioner;

pub struct DicPreconditioner<'a, T> {
    matrix: &'a LduMatrix<T>,
    r_d: Vec<T>,
}

impl<'a, T: Float> DicPreconditioner<'a, T> {
    pub fn new(matrix: &'a LduMatrix<T>) -> Result<Self, LduError> {
        if !matrix.is_symmetric() {
            return Err(LduError::MatrixShape {
                method: "DIC preconditioner",
                requirement: "a symmetric",
            });
        }
        Ok(Self {
            matrix,
            r_d: reciprocal_dic_diag(matrix),
        })
    }
}

/// Modified diagonal of the incomplete LDLᵀ factorization, inverted.
pub(crate) fn reciprocal_dic_diag<T: Float>(matrix: &LduMatrix<T>) -> Vec<T> {
    let addr = matrix.addressing();
    let upper = matrix.upper();
    let mut r_d = matrix.diag().to_vec();
    for f in 0..addr.n_faces() {
        let o = addr.owner()[f];
        let n = addr.neighbour()[f];
        r_d[n] = r_d[n] - upper[f] * upper[f] / r_d[o];
    }
    for rd in r_d.iter_mut() {
        *rd = T::one() / *rd;
    }
    r_d
}

/// Forward then backward substitution with the shared off-diagonal array.
pub(crate) fn dic_sweep<T: Float>(matrix: &LduMatrix<T>, r_d: &[T], w: &mut [T], r: &[T]) {
    let addr = matrix.addressing();
    let upper = matrix.upper();
    let owner = addr.owner();
    let neighbour = addr.neighbour();
    for (wi, (&ri, &rd)) in w.iter_mut().zip(r.iter().zip(r_d)) {
        *wi = ri * rd;
    }
    for f in 0..addr.n_faces() {
        let (o, n) = (owner[f], neighbour[f]);
        w[n] = w[n] - r_d[n] * upper[f] * w[o];
    }
    for f in (0..addr.n_faces()).rev() {
        let (o, n) = (owner[f], neighbour[f]);
        w[o] = w[o] - r_d[o] * upper[f] * w[n];
    }
}

impl<'a, T: Float> LduPreconditioner<T> for DicPreconditioner<'a, T> {
    fn precondition(&self, w: &mut [T], r: &[T], _cmpt: usize) {
        dic_sweep(self.matrix, &self.r_d, w, r);
    }
}
