pub mod comparison;
pub mod matcher;
pub mod normalizer;
pub mod similarity;
pub mod stats;

pub use comparison::{compare, validate_threshold, MatchSet};
pub use matcher::Matcher;
pub use normalizer::normalize;
pub use similarity::{score, JaccardScorer, SimilarityScorer};
pub use stats::aggregate;
