use num_traits::Float;

/// Returns the median of `values`, averaging the two middle values
/// for even-length input. `None` for empty input or if any value is
/// NaN.
pub fn median<T: Float>(values: &[T]) -> Option<T> {
    if values.is_empty() || values.iter().any(|v| v.is_nan()) {
        return None;
    }
    let mut sorted = values.to_vec();
    // Unwrap is fine as NaNs were rejected above.
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        let two = T::one() + T::one();
        Some((sorted[mid - 1] + sorted[mid]) / two)
    } else {
        Some(sorted[mid])
    }
}
