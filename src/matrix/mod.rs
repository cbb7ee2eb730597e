//! LDU-addressed sparse matrix: mesh connectivity and coefficient arrays.

pub mod addressing;
pub use addressing::LduAddressing;
pub mod ldu;
pub use ldu::LduMatrix;
