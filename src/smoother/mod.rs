//! Relaxation smoothers, standalone or inside `smoothSolver`.
//!
//! A smoother is constructed once per solve and reused across sweeps; it
//! never measures a residual itself, the caller decides convergence.

use bitflags::bitflags;
use num_traits::Float;

use crate::error::LduError;
use crate::interface::LduInterface;
use crate::matrix::LduMatrix;

bitflags! {
    /// Sweep directions of one relaxation pass.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Sweep: u8 {
        const FORWARD  = 0b01;
        const BACKWARD = 0b10;
        const SYMMETRIC = Self::FORWARD.bits() | Self::BACKWARD.bits();
    }
}

/// In-place relaxation toward the solution of A·psi = source.
pub trait LduSmoother<T> {
    fn smooth(
        &self,
        psi: &mut [T],
        source: &[T],
        cmpt: usize,
        n_sweeps: usize,
    ) -> Result<(), LduError>;
}

impl<T> core::fmt::Debug for dyn LduSmoother<T> + '_ {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("dyn LduSmoother")
    }
}

pub mod gauss_seidel;
pub use gauss_seidel::GaussSeidelSmoother;
pub mod dic;
pub use dic::{DicGaussSeidelSmoother, DicSmoother};

/// Registered smoother type names.
pub const SMOOTHER_NAMES: &[&str] =
    &["GaussSeidel", "symGaussSeidel", "DIC", "DICGaussSeidel"];

/// Select a smoother by registered name.
pub fn smoother_from_name<'a, T: Float>(
    name: &str,
    matrix: &'a LduMatrix<T>,
    bou_coeffs: &'a [Vec<T>],
    _int_coeffs: &'a [Vec<T>],
    interfaces: &'a [Box<dyn LduInterface<T>>],
) -> Result<Box<dyn LduSmoother<T> + 'a>, LduError> {
    match name {
        "GaussSeidel" => Ok(Box::new(GaussSeidelSmoother::new(
            matrix,
            bou_coeffs,
            interfaces,
            Sweep::FORWARD,
        ))),
        "symGaussSeidel" => Ok(Box::new(GaussSeidelSmoother::new(
            matrix,
            bou_coeffs,
            interfaces,
            Sweep::SYMMETRIC,
        ))),
        "DIC" => Ok(Box::new(DicSmoother::new(matrix, bou_coeffs, interfaces)?)),
        "DICGaussSeidel" => Ok(Box::new(DicGaussSeidelSmoother::new(
            matrix,
            bou_coeffs,
            interfaces,
        )?)),
        _ => Err(LduError::UnknownType {
            kind: "smoother",
            name: name.to_owned(),
            valid: SMOOTHER_NAMES,
        }),
    }
}
