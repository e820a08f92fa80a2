// src/profiles/service.rs
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::core::ProfileStore;
use crate::error::{AppError, AppResult};
use crate::profiles::submission::ValidatedProfile;
use crate::types::Profile;

pub struct SavedProfile {
    pub profile: Profile,
    pub created: bool,
}

pub struct ProfileService<'a> {
    store: &'a dyn ProfileStore,
}

impl<'a> ProfileService<'a> {
    pub fn new(store: &'a dyn ProfileStore) -> Self {
        Self { store }
    }

    pub async fn get(&self, owner: Uuid) -> AppResult<Profile> {
        self.store
            .get(owner)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))
    }

    /// Create or replace the owner's profile, carrying omitted attachments over.
    pub async fn save(&self, owner: Uuid, validated: ValidatedProfile) -> AppResult<SavedProfile> {
        let prior = self.store.get(owner).await?;
        let created = prior.is_none();

        let profile = validated.into_profile(owner, prior.as_ref(), Utc::now());
        let profile = self.store.upsert(&profile).await?;

        info!(
            "{} profile for {}",
            if created { "Created" } else { "Updated" },
            owner
        );
        Ok(SavedProfile { profile, created })
    }
}
