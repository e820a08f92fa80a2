// src/web/handlers/auth_handlers.rs
use anyhow::Context;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, warn};

use crate::auth::{hash_password, verify_password, AuthConfig};
use crate::core::database::{NewUser, UserRepository};
use crate::core::Database;
use crate::error::AppError;
use crate::web::types::{ApiResult, DataResponse, LoginRequest, SignupRequest, TokenData};

pub async fn signup_handler(
    request: Json<SignupRequest>,
    db: &State<Database>,
    auth_config: &State<AuthConfig>,
) -> ApiResult<(Status, Json<DataResponse<TokenData>>)> {
    let request = request.into_inner();
    let full_name = request.full_name.trim();
    let email = request.email.trim();

    if full_name.is_empty() || email.is_empty() || request.password.is_empty() {
        return Err(AppError::validation("Full name, email, and password are required").into());
    }

    let password = request.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("Password hashing task failed")
        .and_then(|hashed| hashed)
        .map_err(AppError::from)?;

    let phone_number = request
        .phone_number
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let user = UserRepository::new(db.pool())
        .create(NewUser {
            full_name,
            email,
            password_hash: &password_hash,
            phone_number,
        })
        .await?;

    let token = auth_config.issue_token(user.id).map_err(AppError::from)?;
    info!("Registered user {} ({})", user.id, user.email);

    Ok((
        Status::Created,
        Json(DataResponse::success(
            "User registered successfully".to_string(),
            TokenData { token },
        )),
    ))
}

pub async fn login_handler(
    request: Json<LoginRequest>,
    db: &State<Database>,
    auth_config: &State<AuthConfig>,
) -> ApiResult<Json<DataResponse<TokenData>>> {
    let request = request.into_inner();
    let email = request.email.trim();

    if email.is_empty() || request.password.is_empty() {
        return Err(AppError::validation("Email and password are required").into());
    }

    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let user = match UserRepository::new(db.pool()).find_by_email(email).await? {
        Some(user) => user,
        None => {
            warn!("Login attempt for unknown email");
            return Err(invalid().into());
        }
    };

    let password = request.password;
    let stored_hash = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .context("Password verification task failed")
        .map_err(AppError::from)?;

    if !verified {
        warn!("Rejected login for user {}", user.id);
        return Err(invalid().into());
    }

    let token = auth_config.issue_token(user.id).map_err(AppError::from)?;
    info!("User {} logged in", user.id);

    Ok(Json(DataResponse::success(
        "Login successful".to_string(),
        TokenData { token },
    )))
}
