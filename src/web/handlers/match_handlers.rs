// src/web/handlers/match_handlers.rs
use rocket::serde::json::Json;
use rocket::State;

use crate::auth::AuthenticatedUser;
use crate::core::SqliteProfileStore;
use crate::matching::MatchEngine;
use crate::types::MatchResult;
use crate::web::types::{ApiResult, DataResponse};

pub async fn get_matches_handler(
    auth: AuthenticatedUser,
    store: &State<SqliteProfileStore>,
) -> ApiResult<Json<DataResponse<Vec<MatchResult>>>> {
    let matches = MatchEngine::new(store.inner())
        .matches_for(auth.user_id)
        .await?;

    let message = format!("Found {} matching candidates", matches.len());
    Ok(Json(DataResponse::success(message, matches)))
}
