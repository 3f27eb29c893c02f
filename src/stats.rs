use std::fmt;

use serde::Serialize;

use crate::{settings::Settings, weights::WeightMap};

/// Summary shown next to a generated cloud.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Terms recognized before any filtering.
    pub recognized: usize,
    /// Terms left after threshold and cap.
    pub retained: usize,
    /// Threshold and scale the retained terms went through.
    pub min_frequency: f64,
    pub scale: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub top: Vec<(String, f64)>,
}

impl Statistics {
    pub const TOP_WORDS: usize = 20;

    /// Returns `None` when `weights` is empty.
    pub fn collect(
        recognized: usize,
        weights: &WeightMap,
        settings: &Settings,
        top_n: usize,
    ) -> Option<Self> {
        let min = weights.min_weight()?;
        let max = weights.max_weight()?;
        let mean = weights.iter().map(|(_, weight)| weight).sum::<f64>() / weights.len() as f64;

        let top = weights
            .ranked()
            .into_iter()
            .take(top_n)
            .map(|(term, weight)| (term.to_string(), weight))
            .collect();

        Some(Statistics {
            recognized,
            retained: weights.len(),
            min_frequency: settings.min_frequency,
            scale: settings.scale,
            min,
            max,
            mean,
            top,
        })
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total words: {}", self.recognized)?;
        writeln!(f, "After filters: {}", self.retained)?;
        writeln!(f, "Min. frequency: {}", self.min_frequency)?;
        writeln!(f, "Scale: \u{d7}{}", self.scale)?;
        writeln!(
            f,
            "Minimum: {:.4}  Maximum: {:.4}  Average: {:.4}",
            self.min, self.max, self.mean
        )?;
        writeln!(f, "Top {} words by frequency:", self.top.len())?;
        for (rank, (term, weight)) in self.top.iter().enumerate() {
            writeln!(f, "{:>3}. {term}  {weight:.4}", rank + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Statistics;
    use crate::{settings::Settings, weights::WeightMap};

    #[test]
    fn summary() {
        let weights: WeightMap = [("a", 1.0), ("b", 0.5), ("c", 0.0625), ("d", 0.4375)]
            .into_iter()
            .collect();
        let settings = Settings {
            min_frequency: 0.05,
            scale: 1.5,
            ..Settings::default()
        };
        let stats = Statistics::collect(9, &weights, &settings, 2).unwrap();

        assert_eq!(stats.recognized, 9);
        assert_eq!(stats.retained, 4);
        assert_eq!(stats.min_frequency, 0.05);
        assert_eq!(stats.scale, 1.5);
        assert_eq!(stats.min, 0.0625);
        assert_eq!(stats.max, 1.0);
        assert_eq!(stats.mean, 0.5);
        assert_eq!(
            stats.top,
            vec![("a".to_string(), 1.0), ("b".to_string(), 0.5)]
        );

        let text = stats.to_string();
        assert!(text.contains("Total words: 9"));
        assert!(text.contains("Min. frequency: 0.05"));
        assert!(text.contains("Scale: \u{d7}1.5"));
        assert!(text.contains("  1. a  1.0000"));
    }

    #[test]
    fn empty_map_has_no_statistics() {
        assert!(Statistics::collect(3, &WeightMap::new(), &Settings::default(), 20).is_none());
    }
}
