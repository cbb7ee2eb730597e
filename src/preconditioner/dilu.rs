//! Diagonal-based incomplete LU preconditioner for asymmetric matrices.

use num_traits::Float;

use crate::error::LduError;
use crate::matrix::LduMatrix;
use crate::preconditioner::LduPreconditioner;

pub struct DiluPreconditioner<'a, T> {
    matrix: &'a LduMatrix<T>,
    r_d: Vec<T>,
}

impl<'a, T: Float> DiluPreconditioner<'a, T> {
    pub fn new(matrix: &'a LduMatrix<T>) -> Result<Self, LduError> {
        if matrix.is_symmetric() {
            return Err(LduError::MatrixShape {
                method: "DILU preconditioner",
                requirement: "an asymmetric",
            });
        }
        let addr = matrix.addressing();
        let (lower, upper) = (matrix.lower(), matrix.upper());
        let mut r_d = matrix.diag().to_vec();
        for f in 0..addr.n_faces() {
            let o = addr.owner()[f];
            let n = addr.neighbour()[f];
            r_d[n] = r_d[n] - upper[f] * lower[f] / r_d[o];
        }
        for rd in r_d.iter_mut() {
            *rd = T::one() / *rd;
        }
        Ok(Self { matrix, r_d })
    }
}

impl<'a, T: Float> LduPreconditioner<T> for DiluPreconditioner<'a, T> {
    fn precondition(&self, w: &mut [T], r: &[T], _cmpt: usize) {
        let addr = self.matrix.addressing();
        let (lower, upper) = (self.matrix.lower(), self.matrix.upper());
        let owner = addr.owner();
        let neighbour = addr.neighbour();
        for (wi, (&ri, &rd)) in w.iter_mut().zip(r.iter().zip(&self.r_d)) {
            *wi = ri * rd;
        }
        for f in 0..addr.n_faces() {
            let (o, n) = (owner[f], neighbour[f]);
            w[n] = w[n] - self.r_d[n] * lower[f] * w[o];
        }
        for f in (0..addr.n_faces()).rev() {
            let (o, n) = (owner[f], neighbour[f]);
            w[o] = w[o] - self.r_d[o] * upper[f] * w[n];
        }
    }

    // Transpose application swaps the roles of the two triangles
    fn precondition_t(&self, w: &mut [T], r: &[T], _cmpt: usize) {
        let addr = self.matrix.addressing();
        let (lower, upper) = (self.matrix.lower(), self.matrix.upper());
        let owner = addr.owner();
        let neighbour = addr.neighbour();
        for (wi, (&ri, &rd)) in w.iter_mut().zip(r.iter().zip(&self.r_d)) {
            *wi = ri * rd;
        }
        for f in 0..addr.n_faces() {
            let (o, n) = (owner[f], neighbour[f]);
            w[n] = w[n] - self.r_d[n] * upper[f] * w[o];
        }
        for f in (0..addr.n_faces()).rev() {
            let (o, n) = (owner[f], neighbour[f]);
            w[o] = w[o] - self.r_d[o] * lower[f] * w[n];
        }
    }
}
