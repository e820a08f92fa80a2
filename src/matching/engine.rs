// src/matching/engine.rs
//! Ranks other candidates against the requester's own profile

use crate::core::profile_store::ProfileStore;
use crate::error::{AppError, AppResult};
use crate::matching::filter::CandidateFilter;
use crate::matching::score::match_score;
use crate::types::{MatchResult, Profile};
use tracing::{debug, info};
use uuid::Uuid;

pub const MAX_MATCHES: usize = 10;

pub struct MatchEngine<'a> {
    store: &'a dyn ProfileStore,
    limit: usize,
}

impl<'a> MatchEngine<'a> {
    pub fn new(store: &'a dyn ProfileStore) -> Self {
        Self {
            store,
            limit: MAX_MATCHES,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Top matches for `owner`, best first. Fails with `NotFound` when the
    /// requester has not created a profile yet.
    pub async fn matches_for(&self, owner: Uuid) -> AppResult<Vec<MatchResult>> {
        let requester = self
            .store
            .get(owner)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found. Create your profile first."))?;

        let filter = CandidateFilter::for_requester(&requester);
        let candidates = self.store.find_candidates(&filter).await?;
        let pool_size = candidates.len();

        let results = rank(&requester, &filter, candidates, self.limit);

        info!(
            "Matched {} of {} candidate(s) for {}",
            results.len(),
            pool_size,
            owner
        );
        Ok(results)
    }
}

/// Score every admitted candidate, then sort and truncate. Ties keep retrieval order.
pub fn rank(
    requester: &Profile,
    filter: &CandidateFilter,
    candidates: Vec<Profile>,
    limit: usize,
) -> Vec<MatchResult> {
    let mut scored: Vec<(u32, Profile)> = candidates
        .into_iter()
        .filter(|candidate| filter.admits(candidate))
        .map(|candidate| (match_score(requester, &candidate), candidate))
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    if let Some((best, _)) = scored.first() {
        debug!("Best score for {}: {}", requester.owner, best);
    }

    scored
        .into_iter()
        .take(limit)
        .map(|(score, profile)| MatchResult::from_profile(profile, score))
        .collect()
}
