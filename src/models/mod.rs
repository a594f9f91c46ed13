// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{CandidateRecord, PassThrough, RankWeights, Recommendation};
pub use requests::RecommendRequest;
pub use responses::{ErrorResponse, HealthResponse, RecommendResponse};
