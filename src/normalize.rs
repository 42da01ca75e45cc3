//! Column-stochastic normalisation of a placement matrix.
//!
//! `normalize_columns_inplace` — for every destination column `j`:
//!   s = Σ_i m[i, j]
//!   m[:, j] /= s     if s ≠ 0, else the column is left all-zero
//!
//! A column fed by k rows therefore carries 1/k in each of them.  The
//! result is a fixed structural transform, not a trainable parameter.
use ndarray::{Array1, Array2, Axis};

/// Normalise columns in place.  Returns the column sums used.
pub fn normalize_columns_inplace(map: &mut Array2<f32>) -> Array1<f32> {
    let sums = map.sum_axis(Axis(0));
    for (mut col, &s) in map.columns_mut().into_iter().zip(sums.iter()) {
        if s != 0.0 {
            col.mapv_inplace(|v| v / s);
        }
    }
    sums
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn shared_column_is_split() {
        let mut m = array![[1.0_f32, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]];
        let sums = normalize_columns_inplace(&mut m);
        assert_eq!(sums.to_vec(), vec![3.0, 1.0, 0.0]);
        for i in 0..3 {
            approx::assert_abs_diff_eq!(m[[i, 0]], 1.0 / 3.0, epsilon = 1e-7_f32);
        }
        approx::assert_abs_diff_eq!(m[[1, 1]], 1.0, epsilon = 1e-7_f32);
    }

    #[test]
    fn empty_column_stays_zero() {
        let mut m = Array2::<f32>::zeros((4, 6));
        m[[2, 3]] = 1.0;
        normalize_columns_inplace(&mut m);
        for (j, col) in m.columns().into_iter().enumerate() {
            let s: f32 = col.sum();
            if j == 3 {
                approx::assert_abs_diff_eq!(s, 1.0, epsilon = 1e-7_f32);
            } else {
                assert_eq!(s, 0.0);
            }
            assert!(col.iter().all(|v| v.is_finite()));
        }
    }
}
