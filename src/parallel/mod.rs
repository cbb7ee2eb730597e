//! Collective reductions across mesh partitions.
//!
//! Every residual norm and inner product in the solver core crosses the
//! partition boundary through a single `Reduce` call, so convergence
//! decisions are identical on all ranks for a given problem.

use std::sync::{Arc, Condvar, Mutex};

/// Collective scalar reductions over all partitions of one solve.
pub trait Reduce<T> {
    fn rank(&self) -> usize;
    fn size(&self) -> usize;
    /// Collective sum: every rank contributes `x`, every rank gets the total.
    fn sum(&self, x: T) -> T;
    /// Collective max.
    fn max(&self, x: T) -> T;
}

/// Identity reduction for a single-partition run.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialComm;

impl<T> Reduce<T> for SerialComm {
    fn rank(&self) -> usize {
        0
    }
    fn size(&self) -> usize {
        1
    }
    fn sum(&self, x: T) -> T {
        x
    }
    fn max(&self, x: T) -> T {
        x
    }
}

struct ReduceState<T> {
    generation: u64,
    count: usize,
    acc: Option<T>,
    result: Option<T>,
}

struct ThreadShared<T> {
    state: Mutex<ReduceState<T>>,
    arrived: Condvar,
    size: usize,
}

/// Shared-memory all-reduce over `size` in-process ranks, one per thread.
///
/// Each call is a synchronization barrier: all ranks must reach the same
/// reduction before any proceeds. Accumulation follows arrival order, so
/// results are reproducible only up to floating-point reassociation.
pub struct ThreadComm<T> {
    shared: Arc<ThreadShared<T>>,
    rank: usize,
}

impl<T: Copy + PartialOrd> ThreadComm<T> {
    /// Create one connected `ThreadComm` per rank.
    pub fn split(size: usize) -> Vec<Self> {
        let shared = Arc::new(ThreadShared {
            state: Mutex::new(ReduceState {
                generation: 0,
                count: 0,
                acc: None,
                result: None,
            }),
            arrived: Condvar::new(),
            size,
        });
        (0..size)
            .map(|rank| Self {
                shared: Arc::clone(&shared),
                rank,
            })
            .collect()
    }

    fn all_reduce(&self, x: T, op: impl Fn(T, T) -> T) -> T {
        let mut state = self.shared.state.lock().unwrap();
        let generation = state.generation;
        state.acc = Some(match state.acc {
            None => x,
            Some(acc) => op(acc, x),
        });
        state.count += 1;
        if state.count == self.shared.size {
            state.result = state.acc.take();
            state.count = 0;
            state.generation += 1;
            self.shared.arrived.notify_all();
        } else {
            while state.generation == generation {
                state = self.shared.arrived.wait(state).unwrap();
            }
        }
        state.result.expect("reduction result missing")
    }
}

impl<T: Copy + PartialOrd + num_traits::Float> Reduce<T> for ThreadComm<T> {
    fn rank(&self) -> usize {
        self.rank
    }
    fn size(&self) -> usize {
        self.shared.size
    }
    fn sum(&self, x: T) -> T {
        self.all_reduce(x, |a, b| a + b)
    }
    fn max(&self, x: T) -> T {
        self.all_reduce(x, |a, b| if b > a { b } else { a })
    }
}

#[cfg(feature = "mpi")]
pub mod mpi_comm;
#[cfg(feature = "mpi")]
pub use mpi_comm::MpiComm;

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn serial_reductions_are_identity() {
        let comm = SerialComm;
        assert_eq!(Reduce::<f64>::sum(&comm, 3.5), 3.5);
        assert_eq!(Reduce::<f64>::max(&comm, -1.0), -1.0);
    }

    #[test]
    fn thread_comm_sums_across_ranks() {
        let comms = ThreadComm::<f64>::split(4);
        let handles: Vec<_> = comms
            .into_iter()
            .map(|comm| {
                thread::spawn(move || {
                    let s = comm.sum((comm.rank() + 1) as f64);
                    let m = comm.max(comm.rank() as f64);
                    (s, m)
                })
            })
            .collect();
        for handle in handles {
            let (s, m) = handle.join().unwrap();
            assert_eq!(s, 10.0);
            assert_eq!(m, 3.0);
        }
    }

    #[test]
    fn thread_comm_back_to_back_rounds() {
        let comms = ThreadComm::<f64>::split(2);
        let handles: Vec<_> = comms
            .into_iter()
            .map(|comm| {
                thread::spawn(move || (0..100).map(|i| comm.sum(i as f64)).sum::<f64>())
            })
            .collect();
        let expected: f64 = (0..100).map(|i| 2.0 * i as f64).sum();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
