use serde::{Deserialize, Serialize};

/// One person eligible for recommendation, as materialized by the data
/// pipeline into the roster JSON files.
///
/// The pipeline joins personnel records with project history out-of-band;
/// this service only reads the result. Fields the join could not fill are
/// tolerated rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(default)]
    pub engineer_id: String,
    #[serde(default)]
    pub engineer_name: String,
    #[serde(default)]
    pub engineer_email: Option<String>,
    #[serde(default)]
    pub engineer_contact: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub clients: Vec<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Option<i64>,
}

/// Deserialize a tag list, silently dropping null and non-string entries.
/// A missing or non-array value becomes an empty list.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let entries = match value {
        serde_json::Value::Array(entries) => entries,
        _ => return Ok(Vec::new()),
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            serde_json::Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

/// Scored recommendation result for one candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub engineer_id: String,
    pub engineer_name: String,
    pub score: f64,
    pub matched_clients: Vec<String>,
    pub matched_skills: Vec<String>,
    pub skill_match_percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Weight pair for the two overlap dimensions of the ranking formula
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RankWeights {
    pub client: f64,
    pub skill: f64,
}

/// Which optional candidate fields a profile echoes into its results
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough {
    pub experience: bool,
    pub email: bool,
}
