//! Boundary couplings contributing to matrix-vector products.
//!
//! Each interface follows a two-phase protocol per multiply: every
//! `init_matrix_update` posts its non-blocking exchange before any
//! `update_matrix` consumes one, so communication across several interfaces
//! of the same matrix overlaps. The matrix operations enforce that ordering.

use crate::error::LduError;

/// One inter-partition or periodic boundary coupling.
pub trait LduInterface<T>: Send {
    /// Post the non-blocking send of boundary-local values for this multiply.
    fn init_matrix_update(&self, psi: &[T], cmpt: usize) -> Result<(), LduError>;

    /// Consume the previously posted exchange, accumulating
    /// `result[face_cells[k]] -= coeffs[k] * remote[k]`.
    ///
    /// Must be called exactly once per `init_matrix_update`, after all
    /// interfaces of the multiply have been initialized.
    fn update_matrix(
        &self,
        result: &mut [T],
        coeffs: &[T],
        psi: &[T],
        cmpt: usize,
    ) -> Result<(), LduError>;

    /// Local cell adjacent to each boundary face of this interface.
    fn face_cells(&self) -> &[usize];

    fn n_faces(&self) -> usize {
        self.face_cells().len()
    }
}

pub mod cyclic;
pub use cyclic::CyclicInterface;
pub mod processor;
pub use processor::ProcessorInterface;
