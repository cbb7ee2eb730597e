//! MPI-backed collective reductions.
//!
//! Wraps the world communicator behind the `Reduce` trait so distributed
//! runs reuse the same solver core as serial ones. Only available with the
//! `mpi` feature; reductions are provided for `f64` (the MPI `Equivalence`
//! bound rules out a fully generic impl).

use mpi::environment::Universe;
use mpi::topology::SimpleCommunicator;
use mpi::traits::*;

use super::Reduce;

/// MPI communicator wrapper for distributed partitions.
///
/// Holds the `Universe` so the MPI environment stays initialized for as
/// long as the communicator is in use; dropping the last `MpiComm` runs
/// `MPI_Finalize`.
pub struct MpiComm {
    _universe: Universe,
    pub world: SimpleCommunicator,
    pub rank: usize,
    pub size: usize,
}

impl MpiComm {
    /// Initializes MPI and wraps the world communicator.
    ///
    /// # Panics
    /// Panics if MPI initialization fails.
    pub fn new() -> Self {
        let universe = mpi::initialize().unwrap();
        let world = universe.world();
        let rank = world.rank() as usize;
        let size = world.size() as usize;
        MpiComm {
            _universe: universe,
            world,
            rank,
            size,
        }
    }
}

impl Reduce<f64> for MpiComm {
    fn rank(&self) -> usize {
        self.rank
    }
    fn size(&self) -> usize {
        self.size
    }
    fn sum(&self, x: f64) -> f64 {
        use mpi::collective::SystemOperation;
        let mut y = x;
        self.world.all_reduce_into(&x, &mut y, &SystemOperation::sum());
        y
    }
    fn max(&self, x: f64) -> f64 {
        use mpi::collective::SystemOperation;
        let mut y = x;
        self.world.all_reduce_into(&x, &mut y, &SystemOperation::max());
        y
    }
}
