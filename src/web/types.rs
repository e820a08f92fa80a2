// src/web/types.rs
use rocket::form::FromForm;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::Request;
use tracing::error;

use crate::error::AppError;
use crate::profiles::{JobPreferencesSubmission, ProfileSubmission};

// ===== Requests =====

#[derive(Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(FromForm)]
pub struct JobPreferencesForm {
    pub title: Option<String>,
    #[field(name = "type")]
    pub job_type: Option<String>,
    pub salary: Option<String>,
    pub currency: Option<String>,
    pub location: Option<String>,
}

/// Multipart profile submission. Nested structures arrive as JSON text,
/// job preferences as `jobPreferences[field]`.
#[derive(FromForm)]
pub struct ProfileForm<'f> {
    #[field(name = "fullName")]
    pub full_name: Option<String>,
    pub email: Option<String>,
    #[field(name = "phoneNumber")]
    pub phone_number: Option<String>,
    pub dob: Option<String>,
    pub nationality: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    #[field(name = "jobTitle")]
    pub job_title: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
    pub linkedin: Option<String>,
    pub education: Option<String>,
    #[field(name = "workHistory")]
    pub work_history: Option<String>,
    #[field(name = "jobPreferences")]
    pub job_preferences: JobPreferencesForm,
    /// Every `resume` part. Clients may send the current path as a text part
    /// next to the file, so the upload is picked out by the handler.
    pub resume: Vec<TempFile<'f>>,
    #[field(name = "removeResume")]
    pub remove_resume: Option<bool>,
    pub certificates: Vec<TempFile<'f>>,
    #[field(name = "certificateNames")]
    pub certificate_names: Vec<String>,
}

impl ProfileForm<'_> {
    /// Text part of the form. File references are filled in once uploads are stored.
    pub fn to_submission(&self) -> ProfileSubmission {
        let prefs = &self.job_preferences;
        ProfileSubmission {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            dob: self.dob.clone(),
            nationality: self.nationality.clone(),
            gender: self.gender.clone(),
            address: self.address.clone(),
            job_title: self.job_title.clone(),
            experience: self.experience.clone(),
            skills: self.skills.clone(),
            linkedin: self.linkedin.clone(),
            education: self.education.clone(),
            work_history: self.work_history.clone(),
            job_preferences: JobPreferencesSubmission {
                title: prefs.title.clone(),
                job_type: prefs.job_type.clone(),
                salary: prefs.salary.clone(),
                currency: prefs.currency.clone(),
                location: prefs.location.clone(),
            },
            resume_upload: None,
            remove_resume: self.remove_resume.unwrap_or(false),
            certificate_uploads: Vec::new(),
            certificate_names: self.certificate_names.clone(),
        }
    }
}

/// A part only counts as an upload when the client sent an actual file.
pub fn is_upload(file: &TempFile<'_>) -> bool {
    file.raw_name().is_some() && file.len() > 0
}

// ===== Responses =====

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TokenData {
    pub token: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Error,
}

impl TextResponse {
    pub fn success(message: String) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
        }
    }
}

/// `AppError` rendered as the standard error body with a matching status.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        ApiError(error)
    }
}

impl ApiError {
    fn suggestions(&self) -> Vec<String> {
        let hints: &[&str] = match &self.0 {
            AppError::Unauthorized(_) => &["Log in again to obtain a fresh token"],
            AppError::NotFound(_) => &["Create your profile first"],
            AppError::Validation(_) => &["Check the submitted fields and try again"],
            AppError::Conflict(_) => &["Log in with the existing account instead"],
            AppError::Storage(_) | AppError::Internal(_) => &[
                "Try again in a few moments",
                "Contact support if the problem persists",
            ],
        };
        hints.iter().map(|h| h.to_string()).collect()
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        if self.0.is_server_error() {
            error!("{} {} failed: {:?}", req.method(), req.uri(), self.0);
        }

        let status: Status = self.0.status();
        let body = StandardErrorResponse::new(
            self.0.public_message(),
            self.0.error_code().to_string(),
            self.suggestions(),
        );
        (status, Json(body)).respond_to(req)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
