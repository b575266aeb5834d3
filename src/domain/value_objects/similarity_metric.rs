use serde::{Deserialize, Serialize};

/// Distance metric for ranked vector queries.
///
/// The IVFFlat index is declared with cosine operator classes, so cosine
/// queries are index-accelerated and L2 queries fall back to a scan. Both
/// stay queryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMetric {
    Cosine,
    L2,
}

impl SimilarityMetric {
    /// pgvector operator emitted into the ranked statement.
    pub fn operator(&self) -> &'static str {
        match self {
            SimilarityMetric::Cosine => "<=>",
            SimilarityMetric::L2 => "<->",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMetric::Cosine => "cosine",
            SimilarityMetric::L2 => "l2",
        }
    }

    /// Maps an operator distance onto the score consumers rank by.
    ///
    /// Cosine keeps the inherited `1 - distance` form: it is raw cosine
    /// distance flipped, not a normalized similarity, and goes negative
    /// once distance exceeds 1.0. L2 uses `1 / (1 + distance)`, strictly
    /// decreasing and always in (0, 1].
    pub fn similarity(&self, distance: f64) -> f64 {
        match self {
            SimilarityMetric::Cosine => 1.0 - distance,
            SimilarityMetric::L2 => 1.0 / (1.0 + distance),
        }
    }

    /// Inverts a minimum-similarity threshold into the largest distance
    /// that still satisfies it, for use in the WHERE clause of the ranked
    /// statement. An L2 threshold at or below zero admits every row, since
    /// every L2 similarity is positive.
    pub fn distance_bound(&self, threshold: f64) -> Option<f64> {
        match self {
            SimilarityMetric::Cosine => Some(1.0 - threshold),
            SimilarityMetric::L2 => {
                if threshold > 0.0 {
                    Some((1.0 - threshold) / threshold)
                } else {
                    None
                }
            }
        }
    }
}

impl std::fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operators() {
        assert_eq!(SimilarityMetric::Cosine.operator(), "<=>");
        assert_eq!(SimilarityMetric::L2.operator(), "<->");
    }

    #[test]
    fn test_cosine_similarity_transform() {
        assert_eq!(SimilarityMetric::Cosine.similarity(0.0), 1.0);
        assert_eq!(SimilarityMetric::Cosine.similarity(1.0), 0.0);
    }

    #[test]
    fn test_cosine_similarity_is_unclamped() {
        // Cosine distance ranges up to 2.0, so the inherited transform can
        // report negative scores. Consumers depend on the exact formula.
        assert_eq!(SimilarityMetric::Cosine.similarity(1.5), -0.5);
        assert_eq!(SimilarityMetric::Cosine.similarity(2.0), -1.0);
    }

    #[test]
    fn test_l2_similarity_transform() {
        assert_eq!(SimilarityMetric::L2.similarity(0.0), 1.0);
        assert_eq!(SimilarityMetric::L2.similarity(1.0), 0.5);

        let far = SimilarityMetric::L2.similarity(1e9);
        assert!(far > 0.0 && far < 1e-8);
    }

    #[test]
    fn test_smaller_distance_always_scores_higher() {
        for metric in [SimilarityMetric::Cosine, SimilarityMetric::L2] {
            let mut previous = metric.similarity(0.0);
            for step in 1..20 {
                let current = metric.similarity(step as f64 * 0.1);
                assert!(
                    current < previous,
                    "{} transform must be strictly decreasing",
                    metric
                );
                previous = current;
            }
        }
    }

    #[test]
    fn test_cosine_distance_bound() {
        let bound = SimilarityMetric::Cosine.distance_bound(0.9).unwrap();
        assert!((bound - 0.1).abs() < 1e-12);

        // A distance exactly at the bound maps back to the threshold.
        assert!((SimilarityMetric::Cosine.similarity(bound) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_l2_distance_bound() {
        let bound = SimilarityMetric::L2.distance_bound(0.5).unwrap();
        assert!((bound - 1.0).abs() < 1e-12);
        assert!((SimilarityMetric::L2.similarity(bound) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_l2_bound_absent_for_non_positive_threshold() {
        assert_eq!(SimilarityMetric::L2.distance_bound(0.0), None);
        assert_eq!(SimilarityMetric::L2.distance_bound(-1.0), None);
    }

    #[test]
    fn test_bound_above_best_similarity_excludes_everything() {
        // Best row sits at distance 0.3 (cosine similarity 0.7). A 0.99
        // threshold bounds distance at 0.01, which excludes it.
        let bound = SimilarityMetric::Cosine.distance_bound(0.99).unwrap();
        assert!(0.3 > bound);
    }
}
