//! Sparse matrix over LDU addressing, with interface-coupled products.

use std::sync::Arc;

use num_traits::Float;

use crate::error::LduError;
use crate::interface::LduInterface;
use crate::matrix::LduAddressing;

/// One sparse linear operator over the cells of a mesh partition.
///
/// Coefficients are face-addressed: `upper[f]` multiplies the neighbour's
/// value in the owner row, `lower[f]` the owner's value in the neighbour
/// row. A symmetric matrix shares one array for both. Diagonal coefficients
/// are assumed nonzero by the factorizing preconditioners; this is a caller
/// contract, not enforced here.
pub struct LduMatrix<T> {
    addr: Arc<LduAddressing>,
    diag: Vec<T>,
    upper: Vec<T>,
    lower: Option<Vec<T>>,
}

impl<T: Float> LduMatrix<T> {
    /// Symmetric matrix: one off-diagonal array shared by both triangles.
    pub fn symmetric(
        addr: Arc<LduAddressing>,
        diag: Vec<T>,
        upper: Vec<T>,
    ) -> Result<Self, LduError> {
        Self::build(addr, diag, upper, None)
    }

    /// Asymmetric matrix with distinct lower and upper coefficient arrays.
    pub fn asymmetric(
        addr: Arc<LduAddressing>,
        diag: Vec<T>,
        lower: Vec<T>,
        upper: Vec<T>,
    ) -> Result<Self, LduError> {
        Self::build(addr, diag, upper, Some(lower))
    }

    fn build(
        addr: Arc<LduAddressing>,
        diag: Vec<T>,
        upper: Vec<T>,
        lower: Option<Vec<T>>,
    ) -> Result<Self, LduError> {
        if diag.len() != addr.n_cells() {
            return Err(LduError::Addressing(format!(
                "diagonal length {} does not match {} cells",
                diag.len(),
                addr.n_cells()
            )));
        }
        if upper.len() != addr.n_faces()
            || lower.as_ref().is_some_and(|l| l.len() != addr.n_faces())
        {
            return Err(LduError::Addressing(format!(
                "off-diagonal length does not match {} faces",
                addr.n_faces()
            )));
        }
        Ok(Self {
            addr,
            diag,
            upper,
            lower,
        })
    }

    pub fn addressing(&self) -> &LduAddressing {
        &self.addr
    }

    pub fn n_cells(&self) -> usize {
        self.addr.n_cells()
    }

    pub fn is_symmetric(&self) -> bool {
        self.lower.is_none()
    }

    pub fn diag(&self) -> &[T] {
        &self.diag
    }

    pub fn upper(&self) -> &[T] {
        &self.upper
    }

    pub fn lower(&self) -> &[T] {
        self.lower.as_deref().unwrap_or(&self.upper)
    }

    /// result = A·psi, including interface contributions.
    ///
    /// The diagonal term is written first, interface exchanges are posted,
    /// internal-face contributions accumulate while the exchange is in
    /// flight, and the interface updates are consumed last. `psi` and
    /// `result` may not alias (both are exclusive/shared borrows anyway).
    pub fn amul(
        &self,
        result: &mut [T],
        psi: &[T],
        bou_coeffs: &[Vec<T>],
        interfaces: &[Box<dyn LduInterface<T>>],
        cmpt: usize,
    ) -> Result<(), LduError> {
        assert_eq!(result.len(), self.n_cells());
        assert_eq!(psi.len(), self.n_cells());
        for (ri, (&d, &x)) in result.iter_mut().zip(self.diag.iter().zip(psi)) {
            *ri = d * x;
        }

        init_interfaces(interfaces, psi, cmpt)?;

        let owner = self.addr.owner();
        let neighbour = self.addr.neighbour();
        let lower = self.lower();
        for f in 0..self.addr.n_faces() {
            result[neighbour[f]] = result[neighbour[f]] + lower[f] * psi[owner[f]];
            result[owner[f]] = result[owner[f]] + self.upper[f] * psi[neighbour[f]];
        }

        update_interfaces(interfaces, result, bou_coeffs, psi, cmpt)
    }

    /// result = Aᵀ·psi; for a symmetric matrix this is `amul`.
    pub fn tmul(
        &self,
        result: &mut [T],
        psi: &[T],
        int_coeffs: &[Vec<T>],
        interfaces: &[Box<dyn LduInterface<T>>],
        cmpt: usize,
    ) -> Result<(), LduError> {
        assert_eq!(result.len(), self.n_cells());
        assert_eq!(psi.len(), self.n_cells());
        for (ri, (&d, &x)) in result.iter_mut().zip(self.diag.iter().zip(psi)) {
            *ri = d * x;
        }

        init_interfaces(interfaces, psi, cmpt)?;

        let owner = self.addr.owner();
        let neighbour = self.addr.neighbour();
        let lower = self.lower();
        for f in 0..self.addr.n_faces() {
            result[neighbour[f]] = result[neighbour[f]] + self.upper[f] * psi[owner[f]];
            result[owner[f]] = result[owner[f]] + lower[f] * psi[neighbour[f]];
        }

        update_interfaces(interfaces, result, int_coeffs, psi, cmpt)
    }

    /// result = b − A·psi.
    pub fn residual(
        &self,
        result: &mut [T],
        psi: &[T],
        b: &[T],
        bou_coeffs: &[Vec<T>],
        interfaces: &[Box<dyn LduInterface<T>>],
        cmpt: usize,
    ) -> Result<(), LduError> {
        assert_eq!(result.len(), self.n_cells());
        assert_eq!(psi.len(), self.n_cells());
        assert_eq!(b.len(), self.n_cells());
        for c in 0..self.n_cells() {
            result[c] = b[c] - self.diag[c] * psi[c];
        }

        // Negated coefficients flip the interface update into an addition
        let m_bou_coeffs: Vec<Vec<T>> = bou_coeffs
            .iter()
            .map(|cs| cs.iter().map(|&v| -v).collect())
            .collect();

        init_interfaces(interfaces, psi, cmpt)?;

        let owner = self.addr.owner();
        let neighbour = self.addr.neighbour();
        let lower = self.lower();
        for f in 0..self.addr.n_faces() {
            result[neighbour[f]] = result[neighbour[f]] - lower[f] * psi[owner[f]];
            result[owner[f]] = result[owner[f]] - self.upper[f] * psi[neighbour[f]];
        }

        update_interfaces(interfaces, result, &m_bou_coeffs, psi, cmpt)
    }

    /// Row sums of A including the interface boundary coefficients.
    ///
    /// Purely local (no exchange); used by the residual normalization.
    pub fn sum_a(
        &self,
        result: &mut [T],
        bou_coeffs: &[Vec<T>],
        interfaces: &[Box<dyn LduInterface<T>>],
    ) {
        assert_eq!(result.len(), self.n_cells());
        result.copy_from_slice(&self.diag);
        let owner = self.addr.owner();
        let neighbour = self.addr.neighbour();
        let lower = self.lower();
        for f in 0..self.addr.n_faces() {
            result[owner[f]] = result[owner[f]] + self.upper[f];
            result[neighbour[f]] = result[neighbour[f]] + lower[f];
        }
        for (iface, coeffs) in interfaces.iter().zip(bou_coeffs) {
            for (k, &cell) in iface.face_cells().iter().enumerate() {
                result[cell] = result[cell] - coeffs[k];
            }
        }
    }
}

pub(crate) fn init_interfaces<T>(
    interfaces: &[Box<dyn LduInterface<T>>],
    psi: &[T],
    cmpt: usize,
) -> Result<(), LduError> {
    for iface in interfaces {
        iface.init_matrix_update(psi, cmpt)?;
    }
    Ok(())
}

pub(crate) fn update_interfaces<T>(
    interfaces: &[Box<dyn LduInterface<T>>],
    result: &mut [T],
    coeffs: &[Vec<T>],
    psi: &[T],
    cmpt: usize,
) -> Result<(), LduError> {
    assert_eq!(interfaces.len(), coeffs.len());
    for (iface, cs) in interfaces.iter().zip(coeffs) {
        iface.update_matrix(result, cs, psi, cmpt)?;
    }
    Ok(())
}
