use thiserror::Error;

// Unified error type for ldusolve

#[derive(Error, Debug)]
pub enum LduError {
    #[error("unknown {kind} type '{name}', valid {kind} types: {valid:?}")]
    UnknownType {
        kind: &'static str,
        name: String,
        valid: &'static [&'static str],
    },
    #[error("{method} requires {requirement} matrix")]
    MatrixShape {
        method: &'static str,
        requirement: &'static str,
    },
    #[error("invalid ldu addressing: {0}")]
    Addressing(String),
    #[error("interface exchange failed: {0}")]
    InterfaceExchange(&'static str),
    #[error(
        "{solver} solving for {field}: {iterations} iterations exceed the \
         recommended maximum of {limit}; try a more robust solver"
    )]
    Diverged {
        solver: &'static str,
        field: String,
        iterations: usize,
        limit: usize,
    },
}
