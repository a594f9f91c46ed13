use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request for ranked recommendations against one roster profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[serde(default, alias = "input_client", alias = "input_clients")]
    pub clients: Vec<String>,
    #[serde(default, alias = "input_skills")]
    pub skills: Vec<String>,
    #[serde(default = "default_top_n")]
    #[validate(range(min = 0))]
    pub top_n: i64,
}

fn default_top_n() -> i64 {
    5
}

impl RecommendRequest {
    /// Split comma-joined skill entries into individual tags.
    ///
    /// Callers may send `["go,rust", "python"]`. Flattening is an adapter
    /// concern; the ranking core only ever sees individual tags.
    pub fn flattened_skills(&self) -> Vec<String> {
        self.skills
            .iter()
            .flat_map(|entry| entry.split(','))
            .map(|skill| skill.trim().to_string())
            .filter(|skill| !skill.is_empty())
            .collect()
    }
}
