//! Gauss-Seidel relaxation over the LDU addressing.

use num_traits::Float;

use crate::error::LduError;
use crate::interface::LduInterface;
use crate::matrix::LduMatrix;
use crate::matrix::ldu::{init_interfaces, update_interfaces};
use crate::smoother::{LduSmoother, Sweep};

/// Forward, backward, or symmetric Gauss-Seidel sweeps.
///
/// Each sweep folds the interface contribution into a copy of the source
/// (using a negated copy of the boundary coefficients held by the
/// smoother), then relaxes the cells in address order reading the freshest
/// available neighbour values.
pub struct GaussSeidelSmoother<'a, T> {
    matrix: &'a LduMatrix<T>,
    interfaces: &'a [Box<dyn LduInterface<T>>],
    m_bou_coeffs: Vec<Vec<T>>,
    sweep: Sweep,
}

impl<'a, T: Float> GaussSeidelSmoother<'a, T> {
    pub fn new(
        matrix: &'a LduMatrix<T>,
        bou_coeffs: &[Vec<T>],
        interfaces: &'a [Box<dyn LduInterface<T>>],
        sweep: Sweep,
    ) -> Self {
        let m_bou_coeffs = bou_coeffs
            .iter()
            .map(|cs| cs.iter().map(|&v| -v).collect())
            .collect();
        Self {
            matrix,
            interfaces,
            m_bou_coeffs,
            sweep,
        }
    }

    fn relax(&self, psi: &mut [T], b_prime: &[T], reverse: bool) {
        let addr = self.matrix.addressing();
        let diag = self.matrix.diag();
        let upper = self.matrix.upper();
        let lower = self.matrix.lower();
        let owner = addr.owner();
        let neighbour = addr.neighbour();
        let n = addr.n_cells();
        for i in 0..n {
            let c = if reverse { n - 1 - i } else { i };
            let mut cur = b_prime[c];
            for f in addr.owner_faces(c) {
                cur = cur - upper[f] * psi[neighbour[f]];
            }
            for &f in addr.neighbour_faces(c) {
                cur = cur - lower[f] * psi[owner[f]];
            }
            psi[c] = cur / diag[c];
        }
    }
}

impl<'a, T: Float> LduSmoother<T> for GaussSeidelSmoother<'a, T> {
    fn smooth(
        &self,
        psi: &mut [T],
        source: &[T],
        cmpt: usize,
        n_sweeps: usize,
    ) -> Result<(), LduError> {
        let mut b_prime = vec![T::zero(); source.len()];
        for _ in 0..n_sweeps {
            b_prime.copy_from_slice(source);
            init_interfaces(self.interfaces, psi, cmpt)?;
            update_interfaces(self.interfaces, &mut b_prime, &self.m_bou_coeffs, psi, cmpt)?;
            if self.sweep.contains(Sweep::FORWARD) {
                self.relax(psi, &b_prime, false);
            }
            if self.sweep.contains(Sweep::BACKWARD) {
                self.relax(psi, &b_prime, true);
            }
        }
        Ok(())
    }
}
