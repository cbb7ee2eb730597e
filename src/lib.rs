//! ldusolve: iterative solvers for LDU-addressed sparse matrices
//!
//! This crate provides the linear-solver core of a finite-volume toolkit:
//! Krylov solvers (PCG, PBiCG) and relaxation solvers over sparse matrices
//! addressed by mesh face connectivity, with pluggable preconditioners,
//! smoothers, inter-partition boundary coupling, and collective reductions
//! for distributed residual norms.

pub mod parallel;

pub mod config;
pub mod context;
pub mod error;
pub mod field;
pub mod interface;
pub mod matrix;
pub mod preconditioner;
pub mod smoother;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use config::SolverControls;
pub use context::LduSolverContext;
pub use error::LduError;
pub use interface::{CyclicInterface, LduInterface, ProcessorInterface};
pub use matrix::{LduAddressing, LduMatrix};
pub use preconditioner::{LduPreconditioner, PRECONDITIONER_NAMES, preconditioner_from_name};
pub use smoother::{LduSmoother, SMOOTHER_NAMES, Sweep, smoother_from_name};
pub use solver::{LduSolver, PbicgSolver, PcgSolver, SOLVER_NAMES, SmoothSolver};
pub use utils::convergence::SolverPerformance;
