//! Global field reductions.
//!
//! Local kernels (parallelized with Rayon when the feature is enabled)
//! followed by exactly one collective sum, so each norm or inner product
//! costs one synchronization per call.

use crate::parallel::Reduce;
use num_traits::Float;

/// Global sum of a field over all partitions.
pub fn g_sum<T, C>(f: &[T], comm: &C) -> T
where
    T: Float + Send + Sync,
    C: Reduce<T>,
{
    comm.sum(local_sum(f))
}

/// Global sum of component magnitudes, Σ|fᵢ|.
pub fn g_sum_mag<T, C>(f: &[T], comm: &C) -> T
where
    T: Float + Send + Sync,
    C: Reduce<T>,
{
    #[cfg(feature = "rayon")]
    let local = {
        use rayon::prelude::*;
        f.par_iter()
            .map(|fi| fi.abs())
            .reduce(|| T::zero(), |acc, v| acc + v)
    };
    #[cfg(not(feature = "rayon"))]
    let local = f.iter().fold(T::zero(), |acc, fi| acc + fi.abs());
    comm.sum(local)
}

/// Global inner product Σ aᵢ·bᵢ.
pub fn g_sum_prod<T, C>(a: &[T], b: &[T], comm: &C) -> T
where
    T: Float + Send + Sync,
    C: Reduce<T>,
{
    assert_eq!(a.len(), b.len(), "fields must have the same length");
    #[cfg(feature = "rayon")]
    let local = {
        use rayon::prelude::*;
        a.par_iter()
            .zip(b.par_iter())
            .map(|(ai, bi)| *ai * *bi)
            .reduce(|| T::zero(), |acc, v| acc + v)
    };
    #[cfg(not(feature = "rayon"))]
    let local = a
        .iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (ai, bi)| acc + *ai * *bi);
    comm.sum(local)
}

/// Global arithmetic mean of a field over all partitions.
pub fn g_average<T, C>(f: &[T], comm: &C) -> T
where
    T: Float + From<f64> + Send + Sync,
    C: Reduce<T>,
{
    let total = comm.sum(local_sum(f));
    let count = comm.sum((f.len() as f64).into());
    if count > T::zero() { total / count } else { T::zero() }
}

fn local_sum<T: Float + Send + Sync>(f: &[T]) -> T {
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        f.par_iter().copied().reduce(|| T::zero(), |acc, v| acc + v)
    }
    #[cfg(not(feature = "rayon"))]
    {
        f.iter().fold(T::zero(), |acc, v| acc + *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::SerialComm;
    use approx::assert_abs_diff_eq;

    #[test]
    fn serial_reductions() {
        let comm = SerialComm;
        let f = vec![1.0, -2.0, 3.0];
        assert_abs_diff_eq!(g_sum(&f, &comm), 2.0);
        assert_abs_diff_eq!(g_sum_mag(&f, &comm), 6.0);
        assert_abs_diff_eq!(g_sum_prod(&f, &f, &comm), 14.0);
        assert_abs_diff_eq!(g_average(&f, &comm), 2.0 / 3.0);
    }

    #[test]
    fn average_of_empty_field_is_zero() {
        let comm = SerialComm;
        let f: Vec<f64> = Vec::new();
        assert_eq!(g_average(&f, &comm), 0.0);
    }
}
