// src/matching/mod.rs
//! Candidate matching: coarse selection, overlap scoring and ranking

pub mod engine;
pub mod filter;
pub mod score;

pub use engine::{rank, MatchEngine, MAX_MATCHES};
pub use filter::CandidateFilter;
pub use score::{match_score, score_breakdown, ScoreBreakdown};
