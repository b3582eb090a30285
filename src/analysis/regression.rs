//! Ordinary least-squares line fitting
//!
//! Fits `y = slope * x + intercept` with the two-pass centered formulas,
//! which stay accurate for large offsets such as Fahrenheit values.

/// Result of fitting a line to a set of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Change in y per unit x
    pub slope: f64,
    /// y at x = 0
    pub intercept: f64,
    /// Pearson correlation coefficient (0.0 when either variance is zero)
    pub r_value: f64,
    /// Number of points fitted
    pub n: usize,
}

impl LinearFit {
    /// Fit values against their index `0..n`
    ///
    /// Returns `None` for fewer than two values or any non-finite value.
    pub fn fit(values: &[f64]) -> Option<LinearFit> {
        let points: Vec<(f64, f64)> = values
            .iter()
            .enumerate()
            .map(|(i, &y)| (i as f64, y))
            .collect();
        Self::fit_points(&points)
    }

    /// Fit arbitrary `(x, y)` points
    ///
    /// Returns `None` for fewer than two points, any non-finite coordinate,
    /// or when every x is the same.
    pub fn fit_points(points: &[(f64, f64)]) -> Option<LinearFit> {
        let n = points.len();
        if n < 2 {
            return None;
        }
        if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return None;
        }

        let n_f = n as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n_f;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n_f;

        let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
        for (x, y) in points {
            let dx = x - mean_x;
            let dy = y - mean_y;
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }

        if sxx == 0.0 {
            return None;
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        let r_value = if syy == 0.0 {
            0.0
        } else {
            (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
        };

        Some(LinearFit {
            slope,
            intercept,
            r_value,
            n,
        })
    }

    /// Evaluate the fitted line at `x`
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Line evaluated at each index `0..n`, ready for plotting
    pub fn line_points(&self, n: usize) -> Vec<[f64; 2]> {
        (0..n)
            .map(|i| {
                let x = i as f64;
                [x, self.predict(x)]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_line() {
        let fit = LinearFit::fit(&[1.0, 3.0, 5.0, 7.0]).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.r_value - 1.0).abs() < 1e-12);
        assert_eq!(fit.n, 4);
        assert!((fit.predict(10.0) - 21.0).abs() < 1e-12);
    }

    #[test]
    fn test_too_few_points() {
        assert!(LinearFit::fit(&[]).is_none());
        assert!(LinearFit::fit(&[21.4]).is_none());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(LinearFit::fit(&[1.0, f64::NAN, 3.0]).is_none());
        assert!(LinearFit::fit(&[1.0, f64::INFINITY]).is_none());
    }

    #[test]
    fn test_flat_series_has_zero_r() {
        let fit = LinearFit::fit(&[20.0, 20.0, 20.0]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 20.0);
        assert_eq!(fit.r_value, 0.0);
    }

    #[test]
    fn test_vertical_points_rejected() {
        assert!(LinearFit::fit_points(&[(1.0, 2.0), (1.0, 5.0)]).is_none());
    }

    #[test]
    fn test_line_points() {
        let fit = LinearFit::fit(&[10.0, 12.0]).unwrap();
        assert_eq!(fit.line_points(3), vec![[0.0, 10.0], [1.0, 12.0], [2.0, 14.0]]);
    }

    use proptest::prelude::*;

    /// Textbook normal-equation OLS, computed independently
    fn naive_ols(values: &[f64]) -> (f64, f64) {
        let n = values.len() as f64;
        let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
        let sum_y: f64 = values.iter().sum();
        let sum_xy: f64 = values.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
        let sum_xx: f64 = (0..values.len()).map(|i| (i * i) as f64).sum();
        let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);
        let intercept = (sum_y - slope * sum_x) / n;
        (slope, intercept)
    }

    proptest! {
        #[test]
        fn test_matches_naive_ols(values in prop::collection::vec(-20.0f64..120.0, 2..30)) {
            let fit = LinearFit::fit(&values).unwrap();
            let (slope, intercept) = naive_ols(&values);
            prop_assert!((fit.slope - slope).abs() < 1e-6);
            prop_assert!((fit.intercept - intercept).abs() < 1e-6);
            prop_assert!(fit.r_value >= -1.0 && fit.r_value <= 1.0);
        }

        #[test]
        fn test_unit_conversion_scales_slope(values in prop::collection::vec(10.0f64..30.0, 2..10)) {
            // Fahrenheit is affine in Celsius, so the slope scales by 1.8
            let fahrenheit: Vec<f64> = values.iter().map(|c| c * 1.8 + 32.0).collect();
            let c_fit = LinearFit::fit(&values).unwrap();
            let f_fit = LinearFit::fit(&fahrenheit).unwrap();
            prop_assert!((f_fit.slope - c_fit.slope * 1.8).abs() < 1e-6);
        }
    }
}
