// src/profiles/mod.rs
//! Profile editing: submission validation and persistence

pub mod service;
pub mod submission;

pub use service::{ProfileService, SavedProfile};
pub use submission::{
    check_certificate_count, AttachmentPatch, JobPreferencesSubmission, Patch, ProfileSubmission,
    ValidatedProfile, MAX_CERTIFICATES,
};
