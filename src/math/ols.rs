//! Least squares and correlation.
//!
//! Correlation views overlay an ordinary least squares line on a scatter of
//! two indicators and report the coefficient of determination:
//!
//! ```text
//! minimize Σ (y_i - (a + b x_i))^2          R² = corr(x, y)^2
//! ```
//!
//! Implementation choices:
//! - The line is solved through the generic SVD least squares solver so the
//!   same path handles any design matrix width.
//! - R² is the squared Pearson correlation, which equals the OLS R² for a
//!   single regressor with intercept.

use nalgebra::{DMatrix, DVector};

/// Minimum number of points before a regression line is reported.
pub const MIN_FIT_POINTS: usize = 3;

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// A fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub intercept: f64,
    pub slope: f64,
    pub r_squared: f64,
    pub n: usize,
}

impl LineFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fit an OLS line through `(x, y)` points.
///
/// `None` when there are fewer than `MIN_FIT_POINTS` points or either axis has
/// zero variance (the correlation is undefined).
pub fn fit_line(points: &[(f64, f64)]) -> Option<LineFit> {
    let n = points.len();
    if n < MIN_FIT_POINTS {
        return None;
    }
    let r = pearson(points)?;

    let mut design = Vec::with_capacity(n * 2);
    for &(x, _) in points {
        design.push(1.0);
        design.push(x);
    }
    let x = DMatrix::from_row_slice(n, 2, &design);
    let y = DVector::from_iterator(n, points.iter().map(|&(_, y)| y));
    let beta = solve_least_squares(&x, &y)?;

    Some(LineFit {
        intercept: beta[0],
        slope: beta[1],
        r_squared: r * r,
        n,
    })
}

/// Pearson correlation coefficient.
pub fn pearson(points: &[(f64, f64)]) -> Option<f64> {
    let n = points.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / nf;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / nf;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(x, y) in points {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    if r.is_finite() { Some(r.clamp(-1.0, 1.0)) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn perfect_line_has_unit_r_squared() {
        let pts = [(1.0, 5.0), (2.0, 3.0), (4.0, -1.0), (5.0, -3.0)];
        let fit = fit_line(&pts).unwrap();
        assert!((fit.intercept - 7.0).abs() < 1e-9);
        assert!((fit.slope + 2.0).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
        assert!((fit.predict(3.0) - 1.0).abs() < 1e-9);
        assert_eq!(fit.n, 4);
    }

    #[test]
    fn r_squared_is_squared_pearson() {
        let pts = [(1.0, 2.0), (2.0, 1.0), (3.0, 4.0), (4.0, 3.0), (5.0, 6.0)];
        // sxy = 10, sxx = 10, syy = 14.8
        let r = pearson(&pts).unwrap();
        assert!((r - 10.0 / 148.0_f64.sqrt()).abs() < 1e-12);
        let fit = fit_line(&pts).unwrap();
        assert!((fit.r_squared - 100.0 / 148.0).abs() < 1e-12);
        assert!((fit.slope - 1.0).abs() < 1e-9);
        assert!((fit.intercept - 0.2).abs() < 1e-9);
    }

    #[test]
    fn degenerate_inputs_have_no_fit() {
        assert!(fit_line(&[(1.0, 1.0), (2.0, 2.0)]).is_none());
        assert!(fit_line(&[(1.0, 1.0), (1.0, 2.0), (1.0, 3.0)]).is_none());
        assert!(fit_line(&[(1.0, 2.0), (2.0, 2.0), (3.0, 2.0)]).is_none());
        assert!(pearson(&[(1.0, 1.0)]).is_none());
    }
}
