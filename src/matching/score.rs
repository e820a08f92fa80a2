// src/matching/score.rs
//! Overlap scoring between two profiles

use crate::types::Profile;

pub const SKILL_POINTS: u32 = 10;
pub const JOB_TYPE_POINTS: u32 = 20;
/// Experience gap (in years) at which the experience term drops to zero.
pub const EXPERIENCE_HORIZON: f64 = 5.0;
pub const EXPERIENCE_POINTS_PER_YEAR: f64 = 5.0;

/// Per-criterion contributions to a match score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub skills: u32,
    pub job_type: u32,
    pub experience: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.skills + self.job_type + self.experience
    }
}

pub fn score_breakdown(requester: &Profile, candidate: &Profile) -> ScoreBreakdown {
    let requester_skills = requester.skill_set();
    let shared = candidate
        .skill_set()
        .intersection(&requester_skills)
        .count() as u32;

    let job_type = match (requester.job_type(), candidate.job_type()) {
        (Some(a), Some(b)) if a == b => JOB_TYPE_POINTS,
        _ => 0,
    };

    ScoreBreakdown {
        skills: shared * SKILL_POINTS,
        job_type,
        experience: experience_points(requester.experience, candidate.experience),
    }
}

pub fn match_score(requester: &Profile, candidate: &Profile) -> u32 {
    score_breakdown(requester, candidate).total()
}

/// `max(0, 5 - |gap|) * 5`, rounded for fractional years. Zero unless both are known.
pub fn experience_points(requester: Option<f64>, candidate: Option<f64>) -> u32 {
    match (requester, candidate) {
        (Some(a), Some(b)) => {
            let gap = (a - b).abs();
            let points = (EXPERIENCE_HORIZON - gap).max(0.0) * EXPERIENCE_POINTS_PER_YEAR;
            points.round() as u32
        }
        _ => 0,
    }
}
