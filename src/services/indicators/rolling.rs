//! Fixed-window accumulators shared by the indicators.
//!
//! Each push is O(1) amortized, so a full pass over a series is O(n)
//! regardless of the window length.

use std::collections::VecDeque;

/// Ring buffer keeping a running sum and sum of squares.
///
/// Sums are taken relative to the first value ever pushed, which keeps the
/// variance well conditioned when prices are large relative to their spread.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    buf: VecDeque<f64>,
    capacity: usize,
    shift: Option<f64>,
    sum: f64,
    sum_sq: f64,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
            shift: None,
            sum: 0.0,
            sum_sq: 0.0,
        }
    }

    /// Append a value, evicting the oldest once the window is full.
    pub fn push(&mut self, value: f64) {
        let shift = *self.shift.get_or_insert(value);
        if self.buf.len() == self.capacity {
            if let Some(old) = self.buf.pop_front() {
                let d = old - shift;
                self.sum -= d;
                self.sum_sq -= d * d;
            }
        }
        let d = value - shift;
        self.sum += d;
        self.sum_sq += d * d;
        self.buf.push_back(value);
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.shift = None;
        self.sum = 0.0;
        self.sum_sq = 0.0;
    }

    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn mean(&self) -> f64 {
        match self.shift {
            Some(shift) if !self.buf.is_empty() => shift + self.sum / self.buf.len() as f64,
            _ => f64::NAN,
        }
    }

    /// Population variance (divides by the window length).
    pub fn variance(&self) -> f64 {
        if self.buf.is_empty() {
            return f64::NAN;
        }
        let n = self.buf.len() as f64;
        ((self.sum_sq - self.sum * self.sum / n) / n).max(0.0)
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// Which end of the window a [`MonotonicWindow`] tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Max,
    Min,
}

/// Sliding-window maximum or minimum over a monotonic deque of indices.
#[derive(Debug, Clone)]
pub struct MonotonicWindow {
    period: usize,
    kind: Extremum,
    deque: VecDeque<(usize, f64)>,
    next_index: usize,
}

impl MonotonicWindow {
    pub fn new(period: usize, kind: Extremum) -> Self {
        Self {
            period,
            kind,
            deque: VecDeque::with_capacity(period),
            next_index: 0,
        }
    }

    /// Push the next value and return the extremum of the last `period`
    /// values pushed (fewer while the window fills).
    pub fn push(&mut self, value: f64) -> f64 {
        let index = self.next_index;
        self.next_index += 1;

        while let Some(&(_, back)) = self.deque.back() {
            let dominated = match self.kind {
                Extremum::Max => back <= value,
                Extremum::Min => back >= value,
            };
            if !dominated {
                break;
            }
            self.deque.pop_back();
        }
        self.deque.push_back((index, value));

        while let Some(&(front, _)) = self.deque.front() {
            if front + self.period > index {
                break;
            }
            self.deque.pop_front();
        }

        self.deque.front().map(|&(_, v)| v).unwrap_or(value)
    }

    pub fn is_full(&self) -> bool {
        self.next_index >= self.period
    }
}

/// Rolling extremum over `values`; `NaN` until a full window exists.
pub fn rolling_extremum(values: &[f64], period: usize, kind: Extremum) -> Vec<f64> {
    let mut window = MonotonicWindow::new(period, kind);
    values
        .iter()
        .map(|&v| {
            let extreme = window.push(v);
            if window.is_full() {
                extreme
            } else {
                f64::NAN
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_window_mean_and_eviction() {
        let mut w = RollingWindow::new(3);
        w.push(1.0);
        w.push(2.0);
        assert!(!w.is_full());
        w.push(3.0);
        assert!(w.is_full());
        assert!((w.mean() - 2.0).abs() < 1e-12);
        w.push(10.0);
        assert_eq!(w.len(), 3);
        assert!((w.mean() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_rolling_window_population_variance() {
        let mut w = RollingWindow::new(4);
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            w.push(v);
        }
        // Last four: 5, 5, 7, 9 -> mean 6.5, population variance 2.75
        assert!((w.mean() - 6.5).abs() < 1e-12);
        assert!((w.variance() - 2.75).abs() < 1e-9);
    }

    #[test]
    fn test_rolling_window_constant_has_zero_variance() {
        let mut w = RollingWindow::new(20);
        for _ in 0..50 {
            w.push(100.0);
        }
        assert_eq!(w.variance(), 0.0);
        assert_eq!(w.mean(), 100.0);
    }

    #[test]
    fn test_rolling_window_large_offset_is_stable() {
        let mut w = RollingWindow::new(3);
        for v in [1e9 + 1.0, 1e9 + 2.0, 1e9 + 3.0] {
            w.push(v);
        }
        assert!((w.variance() - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_rolling_window_clear() {
        let mut w = RollingWindow::new(2);
        w.push(5.0);
        w.clear();
        assert!(w.is_empty());
        assert!(w.mean().is_nan());
    }

    #[test]
    fn test_rolling_max_matches_naive() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0, 5.0, 3.0];
        let max = rolling_extremum(&values, 3, Extremum::Max);
        let min = rolling_extremum(&values, 3, Extremum::Min);
        for i in 0..values.len() {
            if i < 2 {
                assert!(max[i].is_nan());
                assert!(min[i].is_nan());
                continue;
            }
            let window = &values[i - 2..=i];
            let naive_max = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let naive_min = window.iter().cloned().fold(f64::INFINITY, f64::min);
            assert_eq!(max[i], naive_max, "max at {}", i);
            assert_eq!(min[i], naive_min, "min at {}", i);
        }
    }
}
