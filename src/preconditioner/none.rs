// Identity preconditioner

use num_traits::Float;

use crate::preconditioner::LduPreconditioner;

pub struct NoPreconditioner;

impl<T: Float> LduPreconditioner<T> for NoPreconditioner {
    fn precondition(&self, w: &mut [T], r: &[T], _cmpt: usize) {
        w.copy_from_slice(r);
    }
}
