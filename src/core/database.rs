// src/core/database.rs
//! Database connection management, migrations and user accounts

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

use crate::core::FsOps;
use crate::error::{AppError, AppResult};

// ===== Core Database Connection Management =====

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create new database connection with automatic setup
    pub async fn new(database_path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = database_path.parent() {
            FsOps::ensure_dir_exists(parent).await?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path.display());
        let pool = SqlitePool::connect(&database_url).await.with_context(|| {
            format!("Failed to connect to database: {}", database_path.display())
        })?;

        info!(
            "Database connection established: {}",
            database_path.display()
        );

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get pool reference for custom operations
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations
    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BLOB PRIMARY KEY,
                full_name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE COLLATE NOCASE,
                password_hash TEXT NOT NULL,
                phone_number TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create users table")?;

        // Match-relevant fields are projected out of the document so the
        // candidate query can filter on them.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id BLOB NOT NULL UNIQUE,
                skills TEXT NOT NULL DEFAULT '[]',
                job_type TEXT,
                experience REAL,
                document TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create profiles table")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_profiles_job_type ON profiles(job_type);")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_profiles_experience ON profiles(experience);")
            .execute(&self.pool)
            .await?;

        info!("Database migrations completed");
        Ok(())
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database health check failed")?;
        Ok(())
    }
}

// ===== User Models =====

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewUser<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub phone_number: Option<&'a str>,
}

// ===== User Repository =====

pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, password_hash, phone_number, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email.trim())
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Register a new account. Fails with `Conflict` when the email is taken.
    pub async fn create(&self, new_user: NewUser<'_>) -> AppResult<User> {
        let user = User {
            id: Uuid::new_v4(),
            full_name: new_user.full_name.trim().to_string(),
            email: new_user.email.trim().to_string(),
            password_hash: new_user.password_hash.to_string(),
            phone_number: new_user
                .phone_number
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            created_at: Utc::now(),
        };

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, full_name, email, password_hash, phone_number, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id)
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone_number)
        .bind(user.created_at)
        .execute(self.pool)
        .await;

        match result {
            Ok(_) => {
                info!("Created user {} ({})", user.id, user.email);
                Ok(user)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::Conflict("User already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user<'a>(email: &'a str) -> NewUser<'a> {
        NewUser {
            full_name: "Ada Lovelace",
            email,
            password_hash: "hash",
            phone_number: Some("  "),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(&dir.path().join("nested").join("users.db"))
            .await
            .unwrap();
        db.health_check().await.unwrap();

        let repo = UserRepository::new(db.pool());
        let created = repo.create(new_user("ada@example.com")).await.unwrap();
        assert_eq!(created.phone_number, None);

        let found = repo.find_by_email("ADA@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.full_name, "Ada Lovelace");

        assert!(repo.find_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(&dir.path().join("users.db")).await.unwrap();
        let repo = UserRepository::new(db.pool());

        repo.create(new_user("ada@example.com")).await.unwrap();
        let err = repo.create(new_user("Ada@Example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
