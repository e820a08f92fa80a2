// src/core/profile_store.rs
//! Durable profile records, one per owner

use anyhow::Context;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::error::AppResult;
use crate::matching::CandidateFilter;
use crate::types::Profile;

#[rocket::async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, owner: Uuid) -> AppResult<Option<Profile>>;

    /// Profiles passing `filter`, oldest first. Implementations may return a
    /// superset; the match engine re-applies the filter exactly.
    async fn find_candidates(&self, filter: &CandidateFilter) -> AppResult<Vec<Profile>>;

    /// Insert or replace the record keyed by `profile.owner`.
    async fn upsert(&self, profile: &Profile) -> AppResult<Profile>;
}

pub struct SqliteProfileStore {
    pool: SqlitePool,
}

impl SqliteProfileStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn decode(document: &str) -> AppResult<Profile> {
        let profile = serde_json::from_str(document).context("Corrupt profile document")?;
        Ok(profile)
    }
}

#[rocket::async_trait]
impl ProfileStore for SqliteProfileStore {
    async fn get(&self, owner: Uuid) -> AppResult<Option<Profile>> {
        let document: Option<String> =
            sqlx::query_scalar("SELECT document FROM profiles WHERE owner_id = ?")
                .bind(owner)
                .fetch_optional(&self.pool)
                .await?;

        document.as_deref().map(Self::decode).transpose()
    }

    async fn find_candidates(&self, filter: &CandidateFilter) -> AppResult<Vec<Profile>> {
        let skills = serde_json::to_string(&filter.skills).context("Failed to encode skills")?;
        let job_type = filter.job_type.map(|t| t.as_str());
        let (low, high) = match filter.experience_range {
            Some((low, high)) => (Some(low), Some(high)),
            None => (None, None),
        };

        let documents: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT p.document
            FROM profiles p
            WHERE p.owner_id <> ?1
              AND (
                EXISTS (
                    SELECT 1
                    FROM json_each(p.skills) AS candidate
                    JOIN json_each(?2) AS wanted ON candidate.value = wanted.value
                )
                OR (?3 IS NOT NULL AND p.job_type = ?3)
              )
              AND (?4 IS NULL OR (p.experience IS NOT NULL AND p.experience BETWEEN ?4 AND ?5))
            ORDER BY p.id ASC
            "#,
        )
        .bind(filter.exclude_owner)
        .bind(skills)
        .bind(job_type)
        .bind(low)
        .bind(high)
        .fetch_all(&self.pool)
        .await?;

        documents.iter().map(|d| Self::decode(d)).collect()
    }

    async fn upsert(&self, profile: &Profile) -> AppResult<Profile> {
        let skills = serde_json::to_string(&profile.skills).context("Failed to encode skills")?;
        let document = serde_json::to_string(profile).context("Failed to encode profile")?;

        let stored: String = sqlx::query_scalar(
            r#"
            INSERT INTO profiles (owner_id, skills, job_type, experience, document, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(owner_id) DO UPDATE SET
                skills = excluded.skills,
                job_type = excluded.job_type,
                experience = excluded.experience,
                document = excluded.document,
                updated_at = excluded.updated_at
            RETURNING document
            "#,
        )
        .bind(profile.owner)
        .bind(skills)
        .bind(profile.job_type().map(|t| t.as_str()))
        .bind(profile.experience)
        .bind(document)
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await?;

        info!("Stored profile for {}", profile.owner);
        Self::decode(&stored)
    }
}
