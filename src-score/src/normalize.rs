use ndarray::Array1;

/// Map `value` from `[min, max]` onto `[0, 1]`.
///
/// A collapsed range (`max == min`) maps every value to 0.5. Values outside
/// the range are not clipped.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.5;
    }
    (value - min) / (max - min)
}

/// Normalize each component against its own `(min, max)` range
pub fn normalize_all(values: &Array1<f64>, ranges: &[(f64, f64)]) -> Array1<f64> {
    Array1::from_iter(
        values
            .iter()
            .zip(ranges.iter())
            .map(|(&v, &(lo, hi))| normalize(v, lo, hi)),
    )
}
