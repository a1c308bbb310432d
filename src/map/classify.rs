//! Value classification for choropleth fills.

/// Class bin edges treated as inclusive upper bounds.
///
/// User-defined breaks carry an open overflow class above the last edge;
/// quantile breaks end at the observed maximum and stay closed.
#[derive(Debug, Clone)]
pub struct Classification {
    edges: Vec<f64>,
    open_ended: bool,
}

impl Classification {
    /// User-defined breaks. Edges must be sorted ascending.
    pub fn user_defined(edges: Vec<f64>) -> Self {
        debug_assert!(edges.windows(2).all(|w| w[0] <= w[1]));
        Self {
            edges,
            open_ended: true,
        }
    }

    /// Quantile breaks over observed values: `k` classes with (near) equal
    /// membership, linear interpolation between order statistics. Duplicate
    /// breaks from tied values are collapsed.
    pub fn quantiles(values: &[f64], k: usize) -> Self {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));
        if sorted.is_empty() || k == 0 {
            return Self {
                edges: Vec::new(),
                open_ended: false,
            };
        }

        let mut edges = Vec::with_capacity(k);
        for i in 1..=k {
            edges.push(quantile(&sorted, i as f64 / k as f64));
        }
        edges.dedup();

        Self {
            edges,
            open_ended: false,
        }
    }

    /// Class index for a value, in `0..class_count()`.
    pub fn classify(&self, value: f64) -> usize {
        self.edges
            .iter()
            .position(|edge| value <= *edge)
            .unwrap_or_else(|| self.class_count() - 1)
    }

    pub fn class_count(&self) -> usize {
        (self.edges.len() + usize::from(self.open_ended)).max(1)
    }

    /// Legend labels, one per class.
    pub fn labels(&self) -> Vec<String> {
        if self.edges.is_empty() {
            return vec!["all values".to_string()];
        }
        let mut labels = Vec::with_capacity(self.class_count());
        labels.push(format!("<= {}", format_edge(self.edges[0])));
        for pair in self.edges.windows(2) {
            labels.push(format!("{} - {}", format_edge(pair[0]), format_edge(pair[1])));
        }
        if self.open_ended {
            labels.push(format!("> {}", format_edge(self.edges[self.edges.len() - 1])));
        }
        labels
    }
}

fn quantile(sorted: &[f64], p: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

fn format_edge(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1.0e9 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_defined_breaks_are_inclusive_upper_bounds() {
        let classes = Classification::user_defined(vec![1.0, 5.0, 10.0, 20.0, 40.0, 60.0]);

        assert_eq!(classes.class_count(), 7);
        assert_eq!(classes.classify(0.0), 0);
        assert_eq!(classes.classify(1.0), 0);
        assert_eq!(classes.classify(1.5), 1);
        assert_eq!(classes.classify(5.0), 1);
        assert_eq!(classes.classify(60.0), 5);
        assert_eq!(classes.classify(61.0), 6);
    }

    #[test]
    fn test_user_defined_labels() {
        let classes = Classification::user_defined(vec![1.0, 5.0, 10.0]);
        assert_eq!(classes.labels(), vec!["<= 1", "1 - 5", "5 - 10", "> 10"]);
    }

    #[test]
    fn test_quantiles_balance_membership() {
        let values: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        let classes = Classification::quantiles(&values, 5);

        assert_eq!(classes.class_count(), 5);
        let mut membership = vec![0usize; classes.class_count()];
        for value in &values {
            membership[classes.classify(*value)] += 1;
        }
        assert_eq!(membership, vec![2, 2, 2, 2, 2]);
        // The maximum closes the last class; nothing overflows.
        assert_eq!(classes.classify(10.0), 4);
    }

    #[test]
    fn test_quantile_edges_interpolate_linearly() {
        let values: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        let classes = Classification::quantiles(&values, 5);
        assert_eq!(classes.labels()[0], "<= 2.8");
    }

    #[test]
    fn test_empty_values_degrade_to_single_class() {
        let classes = Classification::quantiles(&[], 5);
        assert_eq!(classes.class_count(), 1);
        assert_eq!(classes.classify(42.0), 0);
    }

    #[test]
    fn test_tied_values_collapse_duplicate_edges() {
        let classes = Classification::quantiles(&[3.0, 3.0, 3.0, 3.0], 4);
        assert_eq!(classes.class_count(), 1);
        assert_eq!(classes.classify(3.0), 0);
    }
}
