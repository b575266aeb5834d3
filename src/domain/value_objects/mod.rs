pub mod content_hash;
pub mod search_filters;
pub mod similarity_metric;

pub use content_hash::ContentHash;
pub use search_filters::SearchFilters;
pub use similarity_metric::SimilarityMetric;
