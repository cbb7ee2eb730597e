//! Processor boundary between two mesh partitions.

use std::sync::mpsc::{Receiver, Sender, channel};

use num_traits::Float;

use crate::error::LduError;
use crate::interface::LduInterface;

/// Coupling to the paired patch on a neighbouring partition.
///
/// `init_matrix_update` gathers the boundary-local values and sends them to
/// the paired side; `update_matrix` blocks on the matching receive. The
/// channel pair stands in for the original's non-blocking point-to-point
/// transport; pairs are produced cross-wired by [`ProcessorInterface::connect`].
pub struct ProcessorInterface<T> {
    face_cells: Vec<usize>,
    tx: Sender<Vec<T>>,
    rx: Receiver<Vec<T>>,
}

impl<T: Float + Send> ProcessorInterface<T> {
    /// Build the two halves of one processor boundary.
    ///
    /// Face `k` of the first half couples to face `k` of the second; the
    /// caller is responsible for consistent face ordering on both sides.
    pub fn connect(
        face_cells_a: Vec<usize>,
        face_cells_b: Vec<usize>,
    ) -> (Self, Self) {
        assert_eq!(face_cells_a.len(), face_cells_b.len());
        let (tx_ab, rx_ab) = channel();
        let (tx_ba, rx_ba) = channel();
        (
            Self {
                face_cells: face_cells_a,
                tx: tx_ab,
                rx: rx_ba,
            },
            Self {
                face_cells: face_cells_b,
                tx: tx_ba,
                rx: rx_ab,
            },
        )
    }
}

impl<T: Float + Send> LduInterface<T> for ProcessorInterface<T> {
    fn init_matrix_update(&self, psi: &[T], _cmpt: usize) -> Result<(), LduError> {
        let boundary: Vec<T> = self.face_cells.iter().map(|&c| psi[c]).collect();
        self.tx
            .send(boundary)
            .map_err(|_| LduError::InterfaceExchange("processor neighbour hung up on send"))
    }

    fn update_matrix(
        &self,
        result: &mut [T],
        coeffs: &[T],
        _psi: &[T],
        _cmpt: usize,
    ) -> Result<(), LduError> {
        let remote = self
            .rx
            .recv()
            .map_err(|_| LduError::InterfaceExchange("processor neighbour hung up on receive"))?;
        assert_eq!(remote.len(), self.face_cells.len());
        assert_eq!(coeffs.len(), self.face_cells.len());
        for (k, &cell) in self.face_cells.iter().enumerate() {
            result[cell] = result[cell] - coeffs[k] * remote[k];
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
    fn exchange_applies_remote_values() {
        let (a, b) = ProcessorInterface::connect(vec![1], vec![0]);
        // Partition A holds cells {0,1}, partition B holds cells {2,3}
        // mapped locally to {0,1}; coupling 1 <-> 2 with coefficient -1.
        let psi_a = vec![10.0, 20.0];
        let psi_b = vec![30.0, 40.0];
        a.init_matrix_update(&psi_a, 0).unwrap();
        b.init_matrix_update(&psi_b, 0).unwrap();

        let mut res_a = vec![0.0; 2];
        let mut res_b = vec![0.0; 2];
        a.update_matrix(&mut res_a, &[-1.0], &psi_a, 0).unwrap();
        b.update_matrix(&mut res_b, &[-1.0], &psi_b, 0).unwrap();
        assert_eq!(res_a, vec![0.0, 30.0]);
        assert_eq!(res_b, vec![20.0, 0.0]);
    }

    #[test]
    fn dropped_neighbour_is_an_error() {
        let (a, b) = ProcessorInterface::<f64>::connect(vec![0], vec![0]);
        drop(b);
        let err = a.init_matrix_update(&[1.0], 0).unwrap_err();
        assert!(matches!(err, LduError::InterfaceExchange(_)));
    }
}
