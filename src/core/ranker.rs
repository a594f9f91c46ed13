use std::collections::HashSet;

use thiserror::Error;

use crate::core::similarity::{jaccard_similarity, normalize_tags};
use crate::models::{CandidateRecord, PassThrough, RankWeights, Recommendation};

/// Errors for contractually invalid ranking parameters.
///
/// Malformed candidate data never raises; it is tolerated during
/// normalization and deserialization instead.
#[derive(Debug, Error)]
pub enum RankError {
    #[error("top_n must be non-negative, got {0}")]
    InvalidLimit(i64),
}

/// Result of ranking one request against a roster
#[derive(Debug)]
pub struct RankOutcome {
    pub recommendations: Vec<Recommendation>,
    pub total_candidates: usize,
}

/// Ranking engine for one recommendation profile.
///
/// A profile is a weight pair plus the set of optional candidate fields it
/// echoes into results. Both built-in profiles share this engine; only the
/// configuration differs.
///
/// Scoring formula per candidate:
/// ```text
/// score = round2(w_client * jaccard(req_clients, cand_clients)
///              + w_skill  * jaccard(req_skills,  cand_skills))
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    weights: RankWeights,
    fields: PassThrough,
}

impl Ranker {
    pub fn new(weights: RankWeights, fields: PassThrough) -> Self {
        Self { weights, fields }
    }

    /// Developer recommendations: client history weighs heavier, and the
    /// developer roster carries experience and email to echo through.
    pub fn developers() -> Self {
        Self::new(
            RankWeights {
                client: 0.6,
                skill: 0.4,
            },
            PassThrough {
                experience: true,
                email: true,
            },
        )
    }

    /// Engineer recommendations: skill overlap weighs heavier, no extra
    /// pass-through fields.
    pub fn engineers() -> Self {
        Self::new(
            RankWeights {
                client: 0.4,
                skill: 0.6,
            },
            PassThrough::default(),
        )
    }

    pub fn weights(&self) -> RankWeights {
        self.weights
    }

    /// Rank a roster against the requested client and skill sets and return
    /// the top `top_n` candidates by descending score.
    ///
    /// Requested tags are normalized once; each candidate's tags are
    /// normalized per candidate. Ties keep roster order (the sort is
    /// stable), `top_n = 0` yields an empty result, and a `top_n` beyond
    /// the roster size returns the whole roster ranked. Negative `top_n`
    /// is a caller error.
    pub fn recommend(
        &self,
        requested_clients: &[String],
        requested_skills: &[String],
        candidates: &[CandidateRecord],
        top_n: i64,
    ) -> Result<RankOutcome, RankError> {
        if top_n < 0 {
            return Err(RankError::InvalidLimit(top_n));
        }

        let requested_clients = normalize_tags(requested_clients);
        let requested_skills = normalize_tags(requested_skills);
        let total_candidates = candidates.len();

        let mut recommendations: Vec<Recommendation> = candidates
            .iter()
            .map(|candidate| self.score_candidate(&requested_clients, &requested_skills, candidate))
            .collect();

        // Descending by score; equal scores keep roster order
        recommendations.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        recommendations.truncate(top_n as usize);

        Ok(RankOutcome {
            recommendations,
            total_candidates,
        })
    }

    fn score_candidate(
        &self,
        requested_clients: &HashSet<String>,
        requested_skills: &HashSet<String>,
        candidate: &CandidateRecord,
    ) -> Recommendation {
        let candidate_clients = normalize_tags(&candidate.clients);
        let candidate_skills = normalize_tags(&candidate.skills);

        let client_sim = jaccard_similarity(requested_clients, &candidate_clients);
        let skill_sim = jaccard_similarity(requested_skills, &candidate_skills);

        let mut matched_clients: Vec<String> = requested_clients
            .intersection(&candidate_clients)
            .cloned()
            .collect();
        let mut matched_skills: Vec<String> = requested_skills
            .intersection(&candidate_skills)
            .cloned()
            .collect();

        // Intersection order carries no meaning; sorted output keeps
        // serialized responses reproducible across runs
        matched_clients.sort();
        matched_skills.sort();

        let skill_match_percentage = if requested_skills.is_empty() {
            0.0
        } else {
            round2(matched_skills.len() as f64 / requested_skills.len() as f64 * 100.0)
        };

        let score = round2(self.weights.client * client_sim + self.weights.skill * skill_sim);

        Recommendation {
            engineer_id: candidate.engineer_id.clone(),
            engineer_name: candidate.engineer_name.clone(),
            score,
            matched_clients,
            matched_skills,
            skill_match_percentage,
            experience: self
                .fields
                .experience
                .then(|| candidate.experience.unwrap_or(0)),
            email: self
                .fields
                .email
                .then(|| candidate.engineer_email.clone().unwrap_or_default()),
        }
    }
}

/// Round to two decimal places, the precision of serialized scores
#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn create_candidate(id: &str, clients: &[&str], skills: &[&str]) -> CandidateRecord {
        CandidateRecord {
            engineer_id: id.to_string(),
            engineer_name: format!("Engineer {}", id),
            engineer_email: Some(format!("{}@example.com", id)),
            engineer_contact: None,
            clients: strings(clients),
            skills: strings(skills),
            experience: Some(4),
        }
    }

    #[test]
    fn test_recommend_scores_and_matches() {
        let ranker = Ranker::developers();
        let candidates = vec![create_candidate("1", &["acme"], &["go"])];

        let outcome = ranker
            .recommend(
                &strings(&["Acme"]),
                &strings(&["Go", "Rust"]),
                &candidates,
                5,
            )
            .unwrap();

        assert_eq!(outcome.total_candidates, 1);
        let rec = &outcome.recommendations[0];
        // client_sim = 1.0, skill_sim = 0.5 -> 0.6 + 0.2
        assert_eq!(rec.score, 0.8);
        assert_eq!(rec.matched_clients, vec!["acme"]);
        assert_eq!(rec.matched_skills, vec!["go"]);
        assert_eq!(rec.skill_match_percentage, 50.0);
    }

    #[test]
    fn test_recommend_empty_requested_skills() {
        let ranker = Ranker::engineers();
        let candidates = vec![create_candidate("1", &["acme"], &["go", "rust"])];

        let outcome = ranker
            .recommend(&strings(&["acme"]), &[], &candidates, 5)
            .unwrap();

        let rec = &outcome.recommendations[0];
        assert_eq!(rec.skill_match_percentage, 0.0);
        // Only the client dimension contributes
        assert_eq!(rec.score, 0.4);
        assert!(rec.matched_skills.is_empty());
    }

    #[test]
    fn test_recommend_stable_order_on_ties() {
        let ranker = Ranker::engineers();
        let candidates = vec![
            create_candidate("first", &["acme"], &["go"]),
            create_candidate("second", &["acme"], &["go"]),
        ];

        let outcome = ranker
            .recommend(&strings(&["acme"]), &strings(&["go"]), &candidates, 10)
            .unwrap();

        assert_eq!(outcome.recommendations[0].engineer_id, "first");
        assert_eq!(outcome.recommendations[1].engineer_id, "second");
    }

    #[test]
    fn test_recommend_truncates_to_top_n() {
        let ranker = Ranker::developers();
        let candidates: Vec<CandidateRecord> = (0..20)
            .map(|i| create_candidate(&i.to_string(), &["acme"], &["go"]))
            .collect();

        let outcome = ranker
            .recommend(&strings(&["acme"]), &strings(&["go"]), &candidates, 5)
            .unwrap();

        assert_eq!(outcome.recommendations.len(), 5);
        assert_eq!(outcome.total_candidates, 20);
    }

    #[test]
    fn test_recommend_top_n_zero() {
        let ranker = Ranker::developers();
        let candidates = vec![create_candidate("1", &["acme"], &["go"])];

        let outcome = ranker
            .recommend(&strings(&["acme"]), &strings(&["go"]), &candidates, 0)
            .unwrap();

        assert!(outcome.recommendations.is_empty());
        assert_eq!(outcome.total_candidates, 1);
    }

    #[test]
    fn test_recommend_negative_top_n_is_error() {
        let ranker = Ranker::developers();

        let result = ranker.recommend(&[], &[], &[], -1);

        assert!(matches!(result, Err(RankError::InvalidLimit(-1))));
    }

    #[test]
    fn test_recommend_empty_roster() {
        let ranker = Ranker::engineers();

        let outcome = ranker
            .recommend(&strings(&["acme"]), &strings(&["go"]), &[], 5)
            .unwrap();

        assert!(outcome.recommendations.is_empty());
        assert_eq!(outcome.total_candidates, 0);
    }

    #[test]
    fn test_duplicate_requested_skills_collapse() {
        let ranker = Ranker::developers();
        let candidates = vec![create_candidate("1", &[], &["go"])];

        let outcome = ranker
            .recommend(
                &[],
                &strings(&["Go", "go", "GO"]),
                &candidates,
                5,
            )
            .unwrap();

        let rec = &outcome.recommendations[0];
        // The request collapses to a single skill, fully matched
        assert_eq!(rec.skill_match_percentage, 100.0);
        assert_eq!(rec.matched_skills, vec!["go"]);
    }

    #[test]
    fn test_pass_through_defaults() {
        let ranker = Ranker::developers();
        let candidate = CandidateRecord {
            engineer_id: "1".to_string(),
            engineer_name: "No Metadata".to_string(),
            engineer_email: None,
            engineer_contact: None,
            clients: vec![],
            skills: vec![],
            experience: None,
        };

        let outcome = ranker.recommend(&[], &[], &[candidate], 5).unwrap();

        let rec = &outcome.recommendations[0];
        assert_eq!(rec.experience, Some(0));
        assert_eq!(rec.email, Some(String::new()));
    }

    #[test]
    fn test_engineer_profile_has_no_pass_through() {
        let ranker = Ranker::engineers();
        let candidates = vec![create_candidate("1", &["acme"], &["go"])];

        let outcome = ranker
            .recommend(&strings(&["acme"]), &strings(&["go"]), &candidates, 5)
            .unwrap();

        let rec = &outcome.recommendations[0];
        assert_eq!(rec.experience, None);
        assert_eq!(rec.email, None);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.666666), 0.67);
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(1.0), 1.0);
    }
}
