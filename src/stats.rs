use std::fmt;

// ---------------------------------------------------------------------------
// Descriptive statistics over the sample set
// ---------------------------------------------------------------------------

/// Fixed summary of a sample set, computed once per run.
///
/// The standard deviation is the population form (divisor N, not N-1) and
/// the quartiles use linear interpolation between the two closest ranks,
/// the usual textbook percentile definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub std_dev: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
}

impl Summary {
    /// Compute the summary, or `None` for an empty sample set.
    ///
    /// Input order never matters; the values are sorted internally for the
    /// rank-based measures.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);

        Some(Summary {
            mean,
            std_dev: variance.sqrt(),
            q1,
            median,
            q3,
            iqr: q3 - q1,
        })
    }
}

impl fmt::Display for Summary {
    /// The two-line report printed on stdout, three decimals throughout.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "mean: {:.3} std: {:.3}", self.mean, self.std_dev)?;
        write!(
            f,
            "median: {:.3} 1st quartile: {:.3} 3rd quartile: {:.3} iqr: {:.3}",
            self.median, self.q1, self.q3, self.iqr
        )
    }
}

/// The p-th percentile of an ascending, non-empty slice, interpolating
/// linearly between the two closest ranks.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * (p / 100.0);
    let base = pos.floor() as usize;
    let rest = pos - base as f64;
    match sorted.get(base + 1) {
        Some(&next) => sorted[base] + rest * (next - sorted[base]),
        None => sorted[base],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_sample_set_has_no_summary() {
        assert_eq!(Summary::from_samples(&[]), None);
    }

    #[test]
    fn mean_and_population_std() {
        // Textbook Welford example: mean 5, population variance 4.
        let s = Summary::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!(close(s.mean, 5.0));
        assert!(close(s.std_dev, 2.0));
    }

    #[test]
    fn quartiles_interpolate_between_ranks() {
        let s = Summary::from_samples(&[1.0, 2.0, 3.0]).unwrap();
        assert!(close(s.q1, 1.5));
        assert!(close(s.median, 2.0));
        assert!(close(s.q3, 2.5));
        assert!(close(s.iqr, 1.0));
        assert!(close(s.std_dev, (2.0f64 / 3.0).sqrt()));
    }

    #[test]
    fn input_order_is_irrelevant() {
        let a = Summary::from_samples(&[9.0, 1.0, 5.0, 3.0, 7.0]).unwrap();
        let b = Summary::from_samples(&[1.0, 3.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn iqr_is_q3_minus_q1_and_nonnegative() {
        let s = Summary::from_samples(&[4.0, 8.0, 15.0, 16.0, 23.0, 42.0]).unwrap();
        assert!(close(s.iqr, s.q3 - s.q1));
        assert!(s.iqr >= 0.0);
    }

    #[test]
    fn single_value_collapses_everything() {
        let s = Summary::from_samples(&[7.5]).unwrap();
        assert!(close(s.mean, 7.5));
        assert!(close(s.std_dev, 0.0));
        assert!(close(s.q1, 7.5));
        assert!(close(s.median, 7.5));
        assert!(close(s.q3, 7.5));
        assert!(close(s.iqr, 0.0));
    }

    #[test]
    fn display_rounds_to_three_decimals() {
        let s = Summary::from_samples(&[1.0, 2.0, 3.0]).unwrap();
        let text = s.to_string();
        assert!(text.starts_with("mean: 2.000 std: 0.816"));
        assert!(text.ends_with("median: 2.000 1st quartile: 1.500 3rd quartile: 2.500 iqr: 1.000"));
    }
}
