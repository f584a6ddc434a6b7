use num_traits::{Float, FromPrimitive};

/// Returns `n` parametric offsets centered in `n` equal sub-intervals
/// of `[0, 1]`, i.e. `(i + 0.5) / n`.
///
/// Unlike `linspace`, neither endpoint is ever produced.
pub fn midspace<T>(n: usize) -> impl Iterator<Item = T>
where
    T: Float + FromPrimitive,
{
    let half = T::from_f64(0.5).unwrap();
    let n_inv = T::one() / T::from_usize(n.max(1)).unwrap();
    (0..n).map(move |i| (T::from_usize(i).unwrap() + half) * n_inv)
}
