//! Cyclic (periodic) boundary with both halves on this partition.

use num_traits::Float;

use crate::error::LduError;
use crate::interface::LduInterface;

/// Untransformed periodic coupling: face `k` of this half reads the value
/// of `coupled_cells[k]` directly from the local field, so the init phase
/// has nothing to post.
pub struct CyclicInterface {
    face_cells: Vec<usize>,
    coupled_cells: Vec<usize>,
}

impl CyclicInterface {
    /// The two halves of a cyclic pair are built separately, each naming
    /// its own adjacent cells and the cells of the half it couples to.
    pub fn new(face_cells: Vec<usize>, coupled_cells: Vec<usize>) -> Self {
        assert_eq!(face_cells.len(), coupled_cells.len());
        Self {
            face_cells,
            coupled_cells,
        }
    }
}

impl<T: Float + Send> LduInterface<T> for CyclicInterface {
    fn init_matrix_update(&self, _psi: &[T], _cmpt: usize) -> Result<(), LduError> {
        Ok(())
    }

    fn update_matrix(
        &self,
        result: &mut [T],
        coeffs: &[T],
        psi: &[T],
        _cmpt: usize,
    ) -> Result<(), LduError> {
        assert_eq!(coeffs.len(), self.face_cells.len());
        for (k, &cell) in self.face_cells.iter().enumerate() {
            result[cell] = result[cell] - coeffs[k] * psi[self.coupled_cells[k]];
        }
        Ok(())
    }

    fn face_cells(&self) -> &[usize] {
        &self.face_cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn couples_local_halves() {
        // 4-cell periodic ring closed by a cyclic pair between cells 3 and 0
        let half_a = CyclicInterface::new(vec![3], vec![0]);
        let half_b = CyclicInterface::new(vec![0], vec![3]);
        let psi = vec![1.0, 2.0, 3.0, 4.0];
        let mut result = vec![0.0; 4];
        LduInterface::update_matrix(&half_a, &mut result, &[-1.0], &psi, 0).unwrap();
        LduInterface::update_matrix(&half_b, &mut result, &[-1.0], &psi, 0).unwrap();
        assert_eq!(result, vec![4.0, 0.0, 0.0, 1.0]);
    }
}
