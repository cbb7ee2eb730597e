//! Preconditioners for the Krylov solvers.
//!
//! Constructed fresh per solve from the matrix coefficients, selected by
//! registered type name; an unknown name is a configuration error carrying
//! the valid alternatives.

use num_traits::Float;

use crate::error::LduError;
use crate::matrix::LduMatrix;

/// An approximation M⁻¹ ≈ A⁻¹ applied to a residual.
pub trait LduPreconditioner<T> {
    /// w = M⁻¹ r.
    fn precondition(&self, w: &mut [T], r: &[T], cmpt: usize);

    /// w = M⁻ᵀ r, for the dual recurrence of asymmetric solvers.
    /// Symmetric preconditioners inherit the default.
    fn precondition_t(&self, w: &mut [T], r: &[T], cmpt: usize) {
        self.precondition(w, r, cmpt);
    }
}

impl<T> core::fmt::Debug for dyn LduPreconditioner<T> + '_ {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("dyn LduPreconditioner")
    }
}

pub mod diagonal;
pub use diagonal::DiagonalPreconditioner;
pub mod dic;
pub use dic::DicPreconditioner;
pub mod dilu;
pub use dilu::DiluPreconditioner;
pub mod none;
pub use none::NoPreconditioner;

/// Registered preconditioner type names.
pub const PRECONDITIONER_NAMES: &[&str] = &["none", "diagonal", "DIC", "DILU"];

/// Select a preconditioner by registered name.
pub fn preconditioner_from_name<'a, T: Float>(
    name: &str,
    matrix: &'a LduMatrix<T>,
) -> Result<Box<dyn LduPreconditioner<T> + 'a>, LduError> {
    match name {
        "none" => Ok(Box::new(NoPreconditioner)),
        "diagonal" => Ok(Box::new(DiagonalPreconditioner::new(matrix))),
        "DIC" => Ok(Box::new(DicPreconditioner::new(matrix)?)),
        "DILU" => Ok(Box::new(DiluPreconditioner::new(matrix)?)),
        _ => Err(LduError::UnknownType {
            kind: "preconditioner",
            name: name.to_owned(),
            valid: PRECONDITIONER_NAMES,
        }),
    }
}
