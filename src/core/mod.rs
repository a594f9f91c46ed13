// Core algorithm exports
pub mod ranker;
pub mod similarity;

pub use ranker::{RankError, RankOutcome, Ranker};
pub use similarity::{jaccard_similarity, normalize_tags};
