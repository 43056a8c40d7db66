//! Trailing window sums over dense daily series.

use crate::MathError;

/// Trailing window of fixed width over a dense, evenly spaced series.
///
/// Position `i` of the output covers inputs `i + 1 - width ..= i`, clipped at
/// the start of the series, so the first element's window is the element
/// itself. Sums are maintained incrementally: each step adds the entering
/// value and subtracts the leaving one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidingWindow {
    width: usize,
}

impl SlidingWindow {
    /// Create a window.
    ///
    /// # Errors
    /// Returns `MathError::InvalidWindow` if `width` is zero.
    pub const fn new(width: usize) -> Result<Self, MathError> {
        if width == 0 {
            return Err(MathError::InvalidWindow(width));
        }
        Ok(Self { width })
    }

    /// Window width.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Trailing sums of integer counts.
    #[must_use]
    pub fn sums(&self, values: &[u32]) -> Vec<u32> {
        let mut out = Vec::with_capacity(values.len());
        let mut running: u32 = 0;

        for (i, &value) in values.iter().enumerate() {
            running += value;
            if i >= self.width {
                running -= values[i - self.width];
            }
            out.push(running);
        }

        out
    }

    /// Trailing means of real values over the days actually inside the series.
    ///
    /// Early positions average over `i + 1` values instead of `width`. A window
    /// whose values are all zero yields exactly `0.0`.
    #[must_use]
    pub fn means(&self, values: &[f64]) -> Vec<f64> {
        let mut out = Vec::with_capacity(values.len());
        let mut running = CompensatedSum::default();
        let mut nonzero = 0usize;

        for (i, &value) in values.iter().enumerate() {
            running.add(value);
            if value != 0.0 {
                nonzero += 1;
            }
            if i >= self.width {
                let leaving = values[i - self.width];
                running.add(-leaving);
                if leaving != 0.0 {
                    nonzero -= 1;
                }
            }

            if nonzero == 0 {
                running = CompensatedSum::default();
                out.push(0.0);
            } else {
                let len = (i + 1).min(self.width);
                out.push(running.total() / len as f64);
            }
        }

        out
    }
}

/// Neumaier summation, so a long add-then-subtract sequence does not drift.
#[derive(Debug, Clone, Copy, Default)]
struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    fn add(&mut self, value: f64) {
        let next = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - next) + value;
        } else {
            self.compensation += (value - next) + self.sum;
        }
        self.sum = next;
    }

    fn total(self) -> f64 {
        self.sum + self.compensation
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    /// Quadratic reference used to check the running-sum implementation.
    fn naive_sums(values: &[u32], width: usize) -> Vec<u32> {
        (0..values.len())
            .map(|i| {
                let start = (i + 1).saturating_sub(width);
                values[start..=i].iter().sum()
            })
            .collect()
    }

    #[test]
    fn zero_width_rejected() {
        assert!(SlidingWindow::new(0).is_err());
        assert_eq!(SlidingWindow::new(7).unwrap().width(), 7);
    }

    #[test]
    fn first_day_window_is_the_day_itself() {
        let window = SlidingWindow::new(7).unwrap();
        assert_eq!(window.sums(&[3]), vec![3]);
        assert_relative_eq!(window.means(&[91.5])[0], 91.5, epsilon = 1e-12);
    }

    #[test]
    fn empty_series() {
        let window = SlidingWindow::new(3).unwrap();
        assert!(window.sums(&[]).is_empty());
        assert!(window.means(&[]).is_empty());
    }

    #[test]
    fn window_drops_leaving_day() {
        let window = SlidingWindow::new(3).unwrap();
        assert_eq!(window.sums(&[1, 2, 3, 4, 5]), vec![1, 3, 6, 9, 12]);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(7)]
    #[case(30)]
    fn sums_match_naive(#[case] width: usize) {
        let values: Vec<u32> = (0..45u32).map(|i| (i * 7 + 3) % 5).collect();
        let window = SlidingWindow::new(width).unwrap();
        assert_eq!(window.sums(&values), naive_sums(&values, width));
    }

    #[test]
    fn means_include_zero_days() {
        let window = SlidingWindow::new(2).unwrap();
        let means = window.means(&[90.0, 0.0, 94.0]);
        assert_relative_eq!(means[0], 90.0, epsilon = 1e-12);
        assert_relative_eq!(means[1], 45.0, epsilon = 1e-12);
        assert_relative_eq!(means[2], 47.0, epsilon = 1e-12);
    }

    #[rstest]
    #[case(7, 20)]
    #[case(30, 40)]
    fn means_return_to_exact_zero(#[case] width: usize, #[case] trailing_zeros: usize) {
        let mut values = vec![96.3, 91.7, 88.1, 93.9, 97.2];
        values.extend(std::iter::repeat_n(0.0, trailing_zeros));

        let means = SlidingWindow::new(width).unwrap().means(&values);
        let quiet_from = values.len() - trailing_zeros + width - 1;
        for (i, &mean) in means.iter().enumerate().skip(quiet_from) {
            assert_eq!(mean, 0.0, "position {i}");
        }
        assert!(means[..quiet_from].iter().all(|&m| m > 0.0));
    }

    #[test]
    fn means_stay_accurate_over_long_series() {
        let values: Vec<f64> = (0..5_000)
            .map(|i| if i % 3 == 0 { 0.0 } else { 85.0 + f64::from(i % 17) * 0.7 })
            .collect();
        let window = SlidingWindow::new(30).unwrap();
        let means = window.means(&values);
        for i in [29, 1_000, 4_999] {
            let naive: f64 = values[i + 1 - 30..=i].iter().sum::<f64>() / 30.0;
            assert_relative_eq!(means[i], naive, epsilon = 1e-9);
        }
    }
}
