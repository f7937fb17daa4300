use ndarray::Array2;

/// Row-major capture matrix, `rows x cols`.
pub type Matrix = Array2<f64>;

/// Minimum and maximum of the finite-or-infinite values, skipping NaN.
/// An empty (or all-NaN) matrix reports `(0.0, 0.0)`.
pub fn min_max(matrix: &Matrix) -> (f64, f64) {
    let (min, max) = matrix
        .iter()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if min > max {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}
