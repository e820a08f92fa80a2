// src/web/handlers/profile_handlers.rs
use anyhow::Context;
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::core::fs_ops::StoredFile;
use crate::core::{FileStore, SqliteProfileStore};
use crate::error::{AppError, AppResult};
use crate::profiles::{check_certificate_count, ProfileService, ProfileSubmission, SavedProfile};
use crate::types::Profile;
use crate::web::types::{is_upload, ApiResult, DataResponse, ProfileForm};

pub async fn get_profile_handler(
    auth: AuthenticatedUser,
    store: &State<SqliteProfileStore>,
) -> ApiResult<Json<DataResponse<Profile>>> {
    let profile = ProfileService::new(store.inner()).get(auth.user_id).await?;

    Ok(Json(DataResponse::success(
        "Profile retrieved".to_string(),
        profile,
    )))
}

/// Create or update the caller's profile from a multipart submission.
/// Responds 201 when the profile did not exist before, 200 otherwise.
pub async fn save_profile_handler(
    form: Form<ProfileForm<'_>>,
    auth: AuthenticatedUser,
    store: &State<SqliteProfileStore>,
    files: &State<FileStore>,
) -> ApiResult<(Status, Json<DataResponse<Profile>>)> {
    let mut form = form.into_inner();
    let submission = form.to_submission();

    // Reject bad input before any upload reaches the disk.
    check_certificate_count(form.certificates.iter().filter(|f| is_upload(f)).count())?;
    submission.clone().validate()?;

    let mut stored = Vec::new();
    let saved = match store_and_save(
        &mut form,
        submission,
        auth.user_id,
        store.inner(),
        files.inner(),
        &mut stored,
    )
    .await
    {
        Ok(saved) => saved,
        Err(e) => {
            files.discard(&stored).await;
            return Err(e.into());
        }
    };

    let (status, message) = if saved.created {
        (Status::Created, "Profile created")
    } else {
        (Status::Ok, "Profile updated")
    };

    Ok((
        status,
        Json(DataResponse::success(message.to_string(), saved.profile)),
    ))
}

/// Write the uploads, then persist the profile. Every file written is pushed
/// onto `stored` so the caller can remove them if anything fails.
async fn store_and_save(
    form: &mut ProfileForm<'_>,
    mut submission: ProfileSubmission,
    owner: Uuid,
    store: &SqliteProfileStore,
    files: &FileStore,
    stored: &mut Vec<StoredFile>,
) -> AppResult<SavedProfile> {
    if let Some(resume) = form.resume.iter_mut().find(|f| is_upload(f)) {
        let file = store_upload(files, resume).await?;
        submission.resume_upload = Some(file.reference.clone());
        stored.push(file);
    }

    // `certificateNames[i]` refers to the i-th certificate part as sent,
    // blank parts included.
    let mut names = Vec::new();
    for (index, certificate) in form.certificates.iter_mut().enumerate() {
        if !is_upload(certificate) {
            continue;
        }
        let file = store_upload(files, certificate).await?;
        submission.certificate_uploads.push(file.reference.clone());
        names.push(form.certificate_names.get(index).cloned().unwrap_or_default());
        stored.push(file);
    }
    submission.certificate_names = names;

    let validated = submission.validate()?;
    ProfileService::new(store).save(owner, validated).await
}

/// Copy an uploaded part into the upload store.
async fn store_upload(files: &FileStore, file: &mut TempFile<'_>) -> AppResult<StoredFile> {
    let original_name = file
        .raw_name()
        .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str().to_string());
    let extension = file
        .content_type()
        .and_then(|ct| ct.extension())
        .map(|ext| ext.as_str().to_string());

    let slot = files.reserve(original_name.as_deref(), extension.as_deref());
    file.move_copy_to(&slot.path)
        .await
        .with_context(|| format!("Failed to store upload at {}", slot.path.display()))
        .map_err(AppError::from)?;

    info!("Stored upload {} ({} bytes)", slot.reference, file.len());
    Ok(slot)
}
