// src/web/handlers/system_handlers.rs
use rocket::serde::json::Json;
use rocket::State;
use tracing::{debug, error};

use crate::auth::OptionalAuth;
use crate::core::Database;
use crate::error::AppError;
use crate::web::types::{ApiResult, TextResponse};

pub async fn health_handler(auth: OptionalAuth, db: &State<Database>) -> ApiResult<Json<TextResponse>> {
    if let Some(user) = auth.user {
        debug!("Health check from user {}", user.user_id);
    }

    if let Err(e) = db.health_check().await {
        error!("Health check failed: {}", e);
        return Err(AppError::Internal(e).into());
    }

    Ok(Json(TextResponse::success("OK".to_string())))
}
