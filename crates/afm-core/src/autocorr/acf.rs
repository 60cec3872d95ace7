use num_complex::Complex;
use rustfft::FftPlanner;

/// Sample autocorrelation of `series` for lags `0..=min(nlags, len - 1)`.
///
/// Demeaned, biased autocovariance normalised by its lag-0 value, computed
/// through a zero-padded FFT so the circular wrap never reaches a valid lag.
/// Returns `None` for an empty series or one whose variance is zero or not
/// finite.
pub fn acf(series: &[f64], nlags: usize) -> Option<Vec<f64>> {
    let n = series.len();
    if n == 0 {
        return None;
    }

    let mean = series.iter().sum::<f64>() / n as f64;
    let energy: f64 = series.iter().map(|v| (v - mean) * (v - mean)).sum();
    if !energy.is_finite() || energy <= 0.0 {
        return None;
    }

    let fft_len = (2 * n).next_power_of_two();
    let mut buf: Vec<Complex<f64>> = Vec::with_capacity(fft_len);
    buf.extend(series.iter().map(|&v| Complex::new(v - mean, 0.0)));
    buf.resize(fft_len, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(fft_len).process(&mut buf);
    for c in buf.iter_mut() {
        *c = Complex::new(c.norm_sqr(), 0.0);
    }
    planner.plan_fft_inverse(fft_len).process(&mut buf);

    // Inverse transform is unnormalised; the common factor cancels below.
    let lag0 = buf[0].re;
    let last = nlags.min(n - 1);
    Some(buf[..=last].iter().map(|c| c.re / lag0).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn direct_acf(series: &[f64]) -> Vec<f64> {
        let n = series.len();
        let mean = series.iter().sum::<f64>() / n as f64;
        let c0: f64 = series.iter().map(|v| (v - mean).powi(2)).sum();
        (0..n)
            .map(|k| {
                (0..n - k)
                    .map(|t| (series[t] - mean) * (series[t + k] - mean))
                    .sum::<f64>()
                    / c0
            })
            .collect()
    }

    #[test]
    fn test_matches_direct_sum() {
        let series = [1.0, 3.0, 2.0, 5.0, 4.0, 4.5, 0.5];
        let fast = acf(&series, series.len()).unwrap();
        let slow = direct_acf(&series);
        assert_eq!(fast.len(), series.len());
        for (a, b) in fast.iter().zip(slow.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_lag_zero_is_one() {
        let result = acf(&[2.0, -1.0, 4.0], 1).unwrap();
        assert_eq!(result.len(), 2);
        assert_abs_diff_eq!(result[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_series_is_degenerate() {
        assert!(acf(&[3.0; 8], 4).is_none());
        assert!(acf(&[], 4).is_none());
    }
}
