// src/matching/filter.rs
//! Coarse candidate selection shared by the engine and the profile store

use crate::types::{JobType, Profile};
use uuid::Uuid;

/// Candidates must sit within this many years of the requester's experience.
pub const EXPERIENCE_WINDOW: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFilter {
    pub exclude_owner: Uuid,
    pub skills: Vec<String>,
    pub job_type: Option<JobType>,
    /// Inclusive bounds, present only when the requester's experience is known.
    pub experience_range: Option<(f64, f64)>,
}

impl CandidateFilter {
    pub fn for_requester(requester: &Profile) -> Self {
        Self {
            exclude_owner: requester.owner,
            skills: requester.skills.clone(),
            job_type: requester.job_type(),
            experience_range: requester
                .experience
                .map(|e| (e - EXPERIENCE_WINDOW, e + EXPERIENCE_WINDOW)),
        }
    }

    /// A candidate qualifies when it is someone else, shares a skill or the
    /// (defined) job type, and falls inside the experience window if one is set.
    pub fn admits(&self, candidate: &Profile) -> bool {
        if candidate.owner == self.exclude_owner {
            return false;
        }

        let shares_skill = candidate.skills.iter().any(|s| self.skills.contains(s));
        let same_type = self.job_type.is_some() && self.job_type == candidate.job_type();
        if !shares_skill && !same_type {
            return false;
        }

        match (self.experience_range, candidate.experience) {
            (None, _) => true,
            (Some((low, high)), Some(e)) => e >= low && e <= high,
            (Some(_), None) => false,
        }
    }
}
