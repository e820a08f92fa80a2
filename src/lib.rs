//! Candidate profile service: accounts, profile editing and candidate matching

pub mod auth;
pub mod core;
pub mod error;
pub mod matching;
pub mod profiles;
pub mod types;
pub mod web;

pub use error::{AppError, AppResult};
pub use web::{build_rocket, start_web_server};
