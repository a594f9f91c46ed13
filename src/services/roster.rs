use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::RosterSettings;
use crate::models::CandidateRecord;

/// Errors that can occur when loading a candidate roster
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Failed to read roster file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse roster file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which materialized roster a request ranks against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterProfile {
    Developers,
    Engineers,
}

impl RosterProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            RosterProfile::Developers => "developers",
            RosterProfile::Engineers => "engineers",
        }
    }
}

/// Read-through store for the materialized candidate rosters.
///
/// The data aggregation pipeline joins personnel records with project and
/// client history and writes the result to JSON files out-of-band. This
/// store only reads those files, keeping the parsed roster in memory until
/// the TTL expires; the next request after expiry picks up a refreshed
/// file.
pub struct RosterStore {
    developers_path: PathBuf,
    engineers_path: PathBuf,
    cache: moka::future::Cache<String, Arc<Vec<CandidateRecord>>>,
}

impl RosterStore {
    /// Create a new roster store
    pub fn new<P: Into<PathBuf>>(
        developers_path: P,
        engineers_path: P,
        cache_capacity: u64,
        ttl_secs: u64,
    ) -> Self {
        let cache = moka::future::CacheBuilder::new(cache_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            developers_path: developers_path.into(),
            engineers_path: engineers_path.into(),
            cache,
        }
    }

    /// Create a new roster store from settings
    pub fn from_settings(settings: &RosterSettings) -> Self {
        Self::new(
            settings.developers_path.clone(),
            settings.engineers_path.clone(),
            settings.cache_capacity.unwrap_or(4),
            settings.ttl_secs.unwrap_or(300),
        )
    }

    fn path_for(&self, profile: RosterProfile) -> &Path {
        match profile {
            RosterProfile::Developers => &self.developers_path,
            RosterProfile::Engineers => &self.engineers_path,
        }
    }

    /// Load the roster for a profile, from cache when fresh
    pub async fn load(
        &self,
        profile: RosterProfile,
    ) -> Result<Arc<Vec<CandidateRecord>>, RosterError> {
        let key = self.path_for(profile).to_string_lossy().into_owned();

        if let Some(roster) = self.cache.get(&key).await {
            tracing::trace!("Roster cache hit: {}", key);
            return Ok(roster);
        }

        let roster = Arc::new(self.read_roster(self.path_for(profile)).await?);
        self.cache.insert(key, roster.clone()).await;

        Ok(roster)
    }

    async fn read_roster(&self, path: &Path) -> Result<Vec<CandidateRecord>, RosterError> {
        let bytes = tokio::fs::read(path).await?;
        let roster: Vec<CandidateRecord> = serde_json::from_slice(&bytes)?;

        tracing::debug!("Loaded {} candidates from {}", roster.len(), path.display());

        Ok(roster)
    }

    /// Drop any cached rosters so the next load re-reads the files
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }

    /// Health check: both roster files are present and readable
    pub async fn health_check(&self) -> bool {
        for path in [&self.developers_path, &self.engineers_path] {
            if tokio::fs::metadata(path).await.is_err() {
                tracing::warn!("Roster file not readable: {}", path.display());
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_roster(name: &str, contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(name);
        std::fs::write(&path, contents).expect("Failed to write roster fixture");
        path
    }

    #[tokio::test]
    async fn test_load_parses_roster_file() {
        let path = write_roster(
            "talent_algo_roster_devs.json",
            r#"[{"engineer_id": "1", "engineer_name": "A", "clients": ["Acme"], "skills": ["Go"]}]"#,
        );
        let store = RosterStore::new(path.clone(), path, 4, 60);

        let roster = store.load(RosterProfile::Developers).await.unwrap();

        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].engineer_id, "1");
    }

    #[tokio::test]
    async fn test_load_serves_from_cache() {
        let path = write_roster(
            "talent_algo_roster_cached.json",
            r#"[{"engineer_id": "1", "engineer_name": "A"}]"#,
        );
        let store = RosterStore::new(path.clone(), path.clone(), 4, 60);

        let first = store.load(RosterProfile::Developers).await.unwrap();

        // Replace the file; within the TTL the cached parse is still served
        std::fs::write(&path, "[]").unwrap();
        let second = store.load(RosterProfile::Developers).await.unwrap();

        assert_eq!(first.len(), second.len());

        store.invalidate();
        store.cache.run_pending_tasks().await;
        let third = store.load(RosterProfile::Developers).await.unwrap();
        assert!(third.is_empty());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let store = RosterStore::new("/nonexistent/devs.json", "/nonexistent/engs.json", 4, 60);

        let result = store.load(RosterProfile::Engineers).await;

        assert!(matches!(result, Err(RosterError::Io(_))));
    }

    #[tokio::test]
    async fn test_load_malformed_json_is_parse_error() {
        let path = write_roster("talent_algo_roster_bad.json", "{not json");
        let store = RosterStore::new(path.clone(), path, 4, 60);

        let result = store.load(RosterProfile::Developers).await;

        assert!(matches!(result, Err(RosterError::Json(_))));
    }

    #[tokio::test]
    async fn test_health_check_requires_both_files() {
        let path = write_roster("talent_algo_roster_health.json", "[]");
        let healthy = RosterStore::new(path.clone(), path.clone(), 4, 60);
        let degraded = RosterStore::new(path, PathBuf::from("/nonexistent/engs.json"), 4, 60);

        assert!(healthy.health_check().await);
        assert!(!degraded.health_check().await);
    }
}
