// src/web/mod.rs
//! HTTP surface: routes under `/api`, uploaded files under `/uploads`

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::fs::FileServer;
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, put, routes, Build, Request, Response, Rocket, State};
use tracing::info;

use crate::auth::{AuthConfig, AuthError, AuthenticatedUser, OptionalAuth};
use crate::core::fs_ops::UPLOADS_ROUTE;
use crate::core::{ConfigManager, Database, FileStore, SqliteProfileStore};
use crate::profiles::MAX_CERTIFICATES;
use crate::types::{MatchResult, Profile};

pub struct Cors {
    allowed_origin: String,
}

impl Cors {
    pub fn new(allowed_origin: impl Into<String>) -> Self {
        Self {
            allowed_origin: allowed_origin.into(),
        }
    }
}

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new(
            "Access-Control-Allow-Origin",
            self.allowed_origin.clone(),
        ));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, PUT, OPTIONS",
        ));
        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            "Authorization, Content-Type",
        ));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

// Auth

#[post("/auth/signup", data = "<request>")]
pub async fn signup(
    request: Json<SignupRequest>,
    db: &State<Database>,
    auth_config: &State<AuthConfig>,
) -> ApiResult<(Status, Json<DataResponse<TokenData>>)> {
    handlers::signup_handler(request, db, auth_config).await
}

#[post("/auth/login", data = "<request>")]
pub async fn login(
    request: Json<LoginRequest>,
    db: &State<Database>,
    auth_config: &State<AuthConfig>,
) -> ApiResult<Json<DataResponse<TokenData>>> {
    handlers::login_handler(request, db, auth_config).await
}

// Candidate profile

#[get("/candidate/profile")]
pub async fn get_profile(
    auth: AuthenticatedUser,
    store: &State<SqliteProfileStore>,
) -> ApiResult<Json<DataResponse<Profile>>> {
    handlers::get_profile_handler(auth, store).await
}

#[post("/candidate/profile", data = "<form>")]
pub async fn create_profile(
    form: Form<ProfileForm<'_>>,
    auth: AuthenticatedUser,
    store: &State<SqliteProfileStore>,
    files: &State<FileStore>,
) -> ApiResult<(Status, Json<DataResponse<Profile>>)> {
    handlers::save_profile_handler(form, auth, store, files).await
}

#[put("/candidate/profile", data = "<form>")]
pub async fn update_profile(
    form: Form<ProfileForm<'_>>,
    auth: AuthenticatedUser,
    store: &State<SqliteProfileStore>,
    files: &State<FileStore>,
) -> ApiResult<(Status, Json<DataResponse<Profile>>)> {
    handlers::save_profile_handler(form, auth, store, files).await
}

#[get("/candidate/matches")]
pub async fn get_matches(
    auth: AuthenticatedUser,
    store: &State<SqliteProfileStore>,
) -> ApiResult<Json<DataResponse<Vec<MatchResult>>>> {
    handlers::get_matches_handler(auth, store).await
}

// System

#[get("/health")]
pub async fn health(auth: OptionalAuth, db: &State<Database>) -> ApiResult<Json<TextResponse>> {
    handlers::health_handler(auth, db).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers

fn error_body(error: &str, code: &str, suggestions: &[&str]) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        error.to_string(),
        code.to_string(),
        suggestions.iter().map(|s| s.to_string()).collect(),
    ))
}

#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    error_body(
        "Invalid request format",
        "BAD_REQUEST",
        &[
            "Check your request format",
            "Verify all required fields are present",
        ],
    )
}

#[rocket::catch(401)]
pub fn unauthorized(req: &Request<'_>) -> Json<StandardErrorResponse> {
    let message = AuthError::recorded(req)
        .map(|e| e.message())
        .unwrap_or(AuthError::MissingToken.message());

    error_body(
        message,
        "UNAUTHORIZED",
        &["Send a valid token in the Authorization header"],
    )
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    error_body("Resource not found", "NOT_FOUND", &["Check the request path"])
}

#[rocket::catch(413)]
pub fn payload_too_large() -> Json<StandardErrorResponse> {
    error_body(
        "Upload is too large",
        "PAYLOAD_TOO_LARGE",
        &["Upload smaller files"],
    )
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    error_body(
        "Request body could not be processed",
        "UNPROCESSABLE_ENTITY",
        &["Check field names and value types"],
    )
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    error_body(
        "Internal server error",
        "INTERNAL_ERROR",
        &[
            "Try again in a few moments",
            "Contact support if the problem persists",
        ],
    )
}

/// Assemble the application: storage, managed state, routes and catchers.
pub async fn build_rocket(config: &ConfigManager) -> Result<Rocket<Build>> {
    let env = &config.environment;
    config.ensure_directories().await?;

    let database = Database::new(&env.database_path).await?;
    let store = SqliteProfileStore::new(database.pool().clone());
    let files = FileStore::new(env.uploads_path.clone());
    let auth_config = AuthConfig::new(&config.auth.jwt_secret, config.auth.token_ttl_minutes);

    let file_limit = env.max_upload_mib.mebibytes();
    let form_limit = (env.max_upload_mib * (MAX_CERTIFICATES as u64 + 2)).mebibytes();
    let limits = Limits::default()
        .limit("file", file_limit)
        .limit("data-form", form_limit);

    let figment = rocket::Config::figment()
        .merge(("port", config.port))
        .merge(("limits", limits));

    info!("Database: {}", env.database_path.display());
    info!("Uploads: {}", env.uploads_path.display());

    Ok(rocket::custom(figment)
        .attach(Cors::new(env.cors_origin.clone()))
        .manage(database)
        .manage(store)
        .manage(auth_config)
        .register(
            "/",
            catchers![
                bad_request,
                unauthorized,
                not_found,
                payload_too_large,
                unprocessable,
                internal_error
            ],
        )
        .mount(
            "/api",
            routes![
                signup,
                login,
                get_profile,
                create_profile,
                update_profile,
                get_matches,
                health,
                options,
            ],
        )
        .mount(UPLOADS_ROUTE, FileServer::from(files.uploads_dir()))
        .manage(files))
}

pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    info!("Starting candidate profiles API on port {}", config.port);

    let _rocket = build_rocket(&config).await?.launch().await?;

    Ok(())
}
