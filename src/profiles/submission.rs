// src/profiles/submission.rs
//! Turns a raw profile submission into a well-formed profile

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::types::{
    normalize_skills, Address, Certificate, Education, Gender, JobPreferences, JobType, Profile,
    WorkEntry,
};

/// Upper bound on certificate files accepted in one submission.
pub const MAX_CERTIFICATES: usize = 10;

/// Change to a field that must survive an update when the client leaves it out.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    #[default]
    Omitted,
    Cleared,
    Provided(T),
}

impl<T> Patch<T> {
    pub fn apply(self, prior: Option<T>) -> Option<T> {
        match self {
            Patch::Omitted => prior,
            Patch::Cleared => None,
            Patch::Provided(value) => Some(value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachmentPatch {
    pub resume: Patch<String>,
    pub certificates: Patch<Vec<Certificate>>,
}

#[derive(Debug, Clone, Default)]
pub struct JobPreferencesSubmission {
    pub title: Option<String>,
    pub job_type: Option<String>,
    pub salary: Option<String>,
    pub currency: Option<String>,
    pub location: Option<String>,
}

/// Raw fields as they arrive from the edit form. Nested structures are JSON text.
#[derive(Debug, Clone, Default)]
pub struct ProfileSubmission {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub dob: Option<String>,
    pub nationality: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub job_title: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
    pub linkedin: Option<String>,
    pub education: Option<String>,
    pub work_history: Option<String>,
    pub job_preferences: JobPreferencesSubmission,
    /// File reference of a freshly uploaded resume.
    pub resume_upload: Option<String>,
    pub remove_resume: bool,
    /// File references of freshly uploaded certificates, in upload order.
    pub certificate_uploads: Vec<String>,
    pub certificate_names: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EducationSubmission {
    degree: String,
    institution: String,
    year: Option<serde_json::Value>,
    certificates: Option<Vec<Certificate>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProfile {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub dob: Option<NaiveDate>,
    pub nationality: String,
    pub gender: Option<Gender>,
    pub address: Address,
    pub job_title: String,
    pub experience: Option<f64>,
    pub skills: Vec<String>,
    pub linkedin: String,
    pub degree: String,
    pub institution: String,
    pub graduation_year: Option<i32>,
    pub work_history: Vec<WorkEntry>,
    pub job_preferences: JobPreferences,
    pub attachments: AttachmentPatch,
}

impl ProfileSubmission {
    pub fn validate(self) -> AppResult<ValidatedProfile> {
        let full_name = required(self.full_name, "Full Name is required")?;
        let email = required(self.email, "Email is required")?;
        let job_title = required(self.job_title, "Job Title is required")?;

        check_certificate_count(self.certificate_uploads.len())?;

        let job_type = match non_blank(self.job_preferences.job_type) {
            Some(raw) => Some(raw.parse::<JobType>().map_err(AppError::Validation)?),
            None => None,
        };

        let gender = match non_blank(self.gender) {
            Some(raw) => Some(raw.parse::<Gender>().map_err(AppError::Validation)?),
            None => None,
        };

        let address: Address = parse_json(self.address, "address")?.unwrap_or_default();
        let skills: Vec<String> = parse_json(self.skills, "skills")?.unwrap_or_default();
        let work_history: Vec<WorkEntry> =
            parse_json(self.work_history, "workHistory")?.unwrap_or_default();
        let education: EducationSubmission =
            parse_json(self.education, "education")?.unwrap_or_default();

        let certificates = if !self.certificate_uploads.is_empty() {
            Patch::Provided(name_certificates(
                self.certificate_uploads,
                &self.certificate_names,
            ))
        } else {
            match education.certificates {
                Some(list) if list.is_empty() => Patch::Cleared,
                Some(list) => Patch::Provided(list),
                None => Patch::Omitted,
            }
        };

        let resume = match non_blank(self.resume_upload) {
            Some(reference) => Patch::Provided(reference),
            None if self.remove_resume => Patch::Cleared,
            None => Patch::Omitted,
        };

        let job_preferences = JobPreferences {
            title: text(self.job_preferences.title),
            job_type,
            salary: coerce_non_negative(self.job_preferences.salary.as_deref()),
            currency: non_blank(self.job_preferences.currency)
                .unwrap_or_else(|| JobPreferences::default().currency),
            location: text(self.job_preferences.location),
        };

        Ok(ValidatedProfile {
            full_name,
            email,
            phone_number: text(self.phone_number),
            dob: self.dob.as_deref().and_then(parse_date),
            nationality: text(self.nationality),
            gender,
            address,
            job_title,
            experience: coerce_non_negative(self.experience.as_deref()),
            skills: normalize_skills(skills),
            linkedin: text(self.linkedin),
            degree: education.degree.trim().to_string(),
            institution: education.institution.trim().to_string(),
            graduation_year: education.year.as_ref().and_then(coerce_year),
            work_history,
            job_preferences,
            attachments: AttachmentPatch {
                resume,
                certificates,
            },
        })
    }
}

pub fn check_certificate_count(count: usize) -> AppResult<()> {
    if count > MAX_CERTIFICATES {
        return Err(AppError::validation(format!(
            "At most {} certificates can be uploaded",
            MAX_CERTIFICATES
        )));
    }
    Ok(())
}

impl ValidatedProfile {
    /// Build the full document for `owner`. Every field is replaced except the
    /// attachments, which are patched on top of `prior`.
    pub fn into_profile(self, owner: Uuid, prior: Option<&Profile>, now: DateTime<Utc>) -> Profile {
        let prior_resume = prior.and_then(|p| p.resume.clone());
        let prior_certificates = prior.map(|p| p.education.certificates.clone());

        Profile {
            owner,
            full_name: self.full_name,
            email: self.email,
            phone_number: self.phone_number,
            dob: self.dob,
            nationality: self.nationality,
            gender: self.gender,
            address: self.address,
            job_title: self.job_title,
            experience: self.experience,
            skills: self.skills,
            resume: self.attachments.resume.apply(prior_resume),
            linkedin: self.linkedin,
            education: Education {
                degree: self.degree,
                institution: self.institution,
                year: self.graduation_year,
                certificates: self
                    .attachments
                    .certificates
                    .apply(prior_certificates)
                    .unwrap_or_default(),
            },
            work_history: self.work_history,
            job_preferences: self.job_preferences,
            updated_at: now,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn text(value: Option<String>) -> String {
    non_blank(value).unwrap_or_default()
}

fn required(value: Option<String>, message: &str) -> AppResult<String> {
    non_blank(value).ok_or_else(|| AppError::validation(message))
}

fn parse_json<T: DeserializeOwned>(raw: Option<String>, field: &str) -> AppResult<Option<T>> {
    match non_blank(raw) {
        // A literal `null` means "not provided".
        Some(json) => serde_json::from_str::<Option<T>>(&json)
            .map_err(|e| AppError::Validation(format!("Invalid {} value: {}", field, e))),
        None => Ok(None),
    }
}

/// Numeric form fields degrade to "absent" instead of failing the submission.
pub fn coerce_non_negative(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| n.is_finite() && *n >= 0.0)
}

fn coerce_year(value: &serde_json::Value) -> Option<i32> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if number.is_finite() && number.fract() == 0.0 && number.abs() <= i32::MAX as f64 {
        Some(number as i32)
    } else {
        None
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp. Anything else is "unset".
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
}

fn name_certificates(files: Vec<String>, names: &[String]) -> Vec<Certificate> {
    files
        .into_iter()
        .enumerate()
        .map(|(index, file)| Certificate {
            name: names
                .get(index)
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Certificate {}", index + 1)),
            file,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ProfileSubmission {
        ProfileSubmission {
            full_name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            job_title: Some("Engineer".to_string()),
            ..Default::default()
        }
    }

    fn certificate(name: &str, file: &str) -> Certificate {
        Certificate {
            name: name.to_string(),
            file: file.to_string(),
        }
    }

    #[test]
    fn test_required_fields() {
        for (field, message) in [
            ("fullName", "Full Name is required"),
            ("email", "Email is required"),
            ("jobTitle", "Job Title is required"),
        ] {
            let mut s = submission();
            match field {
                "fullName" => s.full_name = Some("   ".to_string()),
                "email" => s.email = None,
                _ => s.job_title = Some(String::new()),
            }
            match s.validate() {
                Err(AppError::Validation(msg)) => assert_eq!(msg, message),
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_job_type_must_be_known() {
        let mut s = submission();
        s.job_preferences.job_type = Some("Freelance".to_string());
        assert!(matches!(s.validate(), Err(AppError::Validation(_))));

        let mut s = submission();
        s.job_preferences.job_type = Some("".to_string());
        let v = s.validate().unwrap();
        assert_eq!(v.job_preferences.job_type, None);

        let mut s = submission();
        s.job_preferences.job_type = Some("On-site".to_string());
        let v = s.validate().unwrap();
        assert_eq!(v.job_preferences.job_type, Some(JobType::OnSite));
    }

    #[test]
    fn test_gender_must_be_known_when_present() {
        let mut s = submission();
        s.gender = Some("Robot".to_string());
        assert!(matches!(s.validate(), Err(AppError::Validation(_))));

        let mut s = submission();
        s.gender = Some("Female".to_string());
        assert_eq!(s.validate().unwrap().gender, Some(Gender::Female));
    }

    #[test]
    fn test_numeric_fields_are_coerced() {
        let mut s = submission();
        s.experience = Some(" 4.5 ".to_string());
        s.job_preferences.salary = Some("abc".to_string());
        s.education = Some(r#"{"degree":"BSc","year":"2019"}"#.to_string());
        let v = s.validate().unwrap();

        assert_eq!(v.experience, Some(4.5));
        assert_eq!(v.job_preferences.salary, None);
        assert_eq!(v.graduation_year, Some(2019));
        assert_eq!(v.degree, "BSc");
        assert_eq!(v.job_preferences.currency, "USD");
    }

    #[test]
    fn test_unusable_experience_is_absent() {
        for raw in ["", "ten", "-3", "NaN", "inf"] {
            assert_eq!(coerce_non_negative(Some(raw)), None, "{}", raw);
        }
        assert_eq!(coerce_non_negative(Some("0")), Some(0.0));
    }

    #[test]
    fn test_dob_parsing() {
        assert_eq!(parse_date("1990-05-17"), NaiveDate::from_ymd_opt(1990, 5, 17));
        assert_eq!(
            parse_date("1990-05-17T00:00:00.000Z"),
            NaiveDate::from_ymd_opt(1990, 5, 17)
        );
        assert_eq!(parse_date("1990-13-40"), None);
        assert_eq!(parse_date("yesterday"), None);

        let mut s = submission();
        s.dob = Some("not a date".to_string());
        assert_eq!(s.validate().unwrap().dob, None);
    }

    #[test]
    fn test_nested_json_fields() {
        let mut s = submission();
        s.address = Some(r#"{"city":"London"}"#.to_string());
        s.skills = Some(r#"["Go"," SQL","Go",""]"#.to_string());
        s.work_history =
            Some(r#"[{"company":"Acme","jobTitle":"Dev","duration":"2y"}]"#.to_string());
        let v = s.validate().unwrap();

        assert_eq!(v.address.city, "London");
        assert_eq!(v.address.country, "");
        assert_eq!(v.skills, vec!["Go", "SQL"]);
        assert_eq!(v.work_history.len(), 1);
        assert_eq!(v.work_history[0].job_title, "Dev");
        assert_eq!(v.work_history[0].achievements, "");
    }

    #[test]
    fn test_null_json_fields_fall_back_to_defaults() {
        let mut s = submission();
        s.address = Some("null".to_string());
        s.skills = Some(" null ".to_string());
        let v = s.validate().unwrap();

        assert_eq!(v.address, Address::default());
        assert!(v.skills.is_empty());
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let mut s = submission();
        s.skills = Some("Go, SQL".to_string());
        match s.validate() {
            Err(AppError::Validation(msg)) => assert!(msg.starts_with("Invalid skills value")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_uploaded_certificates_get_names() {
        let mut s = submission();
        s.certificate_uploads = vec!["/uploads/a.pdf".to_string(), "/uploads/b.pdf".to_string()];
        s.certificate_names = vec!["AWS".to_string()];
        s.education =
            Some(r#"{"certificates":[{"name":"Old","file":"/uploads/old.pdf"}]}"#.to_string());
        let v = s.validate().unwrap();

        assert_eq!(
            v.attachments.certificates,
            Patch::Provided(vec![
                certificate("AWS", "/uploads/a.pdf"),
                certificate("Certificate 2", "/uploads/b.pdf"),
            ])
        );
    }

    #[test]
    fn test_certificate_count_is_capped() {
        let mut s = submission();
        s.certificate_uploads = (0..=MAX_CERTIFICATES)
            .map(|i| format!("/uploads/{}.pdf", i))
            .collect();
        assert!(matches!(s.validate(), Err(AppError::Validation(_))));
        assert!(check_certificate_count(MAX_CERTIFICATES).is_ok());
    }

    #[test]
    fn test_attachment_patch_states() {
        let v = submission().validate().unwrap();
        assert_eq!(v.attachments, AttachmentPatch::default());

        let mut s = submission();
        s.education = Some(r#"{"certificates":[]}"#.to_string());
        s.remove_resume = true;
        let v = s.validate().unwrap();
        assert_eq!(v.attachments.certificates, Patch::Cleared);
        assert_eq!(v.attachments.resume, Patch::Cleared);

        let mut s = submission();
        s.resume_upload = Some("/uploads/cv.pdf".to_string());
        s.remove_resume = true;
        let v = s.validate().unwrap();
        assert_eq!(v.attachments.resume, Patch::Provided("/uploads/cv.pdf".to_string()));
    }

    #[test]
    fn test_update_preserves_omitted_attachments() {
        let mut first = submission();
        first.resume_upload = Some("/uploads/cv.pdf".to_string());
        first.certificate_uploads = vec!["/uploads/aws.pdf".to_string()];
        first.certificate_names = vec!["AWS".to_string()];
        let owner = Uuid::new_v4();
        let created = first.validate().unwrap().into_profile(owner, None, Utc::now());

        let mut edit = submission();
        edit.job_title = Some("Staff Engineer".to_string());
        let updated = edit
            .validate()
            .unwrap()
            .into_profile(owner, Some(&created), Utc::now());

        assert_eq!(updated.job_title, "Staff Engineer");
        assert_eq!(updated.resume.as_deref(), Some("/uploads/cv.pdf"));
        assert_eq!(
            updated.education.certificates,
            vec![certificate("AWS", "/uploads/aws.pdf")]
        );
    }

    #[test]
    fn test_update_replaces_non_attachment_fields() {
        let mut first = submission();
        first.skills = Some(r#"["Go"]"#.to_string());
        first.experience = Some("3".to_string());
        let owner = Uuid::new_v4();
        let created = first.validate().unwrap().into_profile(owner, None, Utc::now());

        let updated = submission()
            .validate()
            .unwrap()
            .into_profile(owner, Some(&created), Utc::now());

        assert!(updated.skills.is_empty());
        assert_eq!(updated.experience, None);
    }

    #[test]
    fn test_update_can_clear_attachments() {
        let mut first = submission();
        first.resume_upload = Some("/uploads/cv.pdf".to_string());
        first.certificate_uploads = vec!["/uploads/aws.pdf".to_string()];
        let owner = Uuid::new_v4();
        let created = first.validate().unwrap().into_profile(owner, None, Utc::now());

        let mut edit = submission();
        edit.remove_resume = true;
        edit.education = Some(r#"{"degree":"MSc","certificates":[]}"#.to_string());
        let updated = edit
            .validate()
            .unwrap()
            .into_profile(owner, Some(&created), Utc::now());

        assert_eq!(updated.resume, None);
        assert!(updated.education.certificates.is_empty());
        assert_eq!(updated.education.degree, "MSc");
    }
}
