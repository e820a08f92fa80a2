// src/types/profile.rs
//! Candidate profile document and the match view derived from it

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ===== Enumerations =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "On-site")]
    OnSite,
    Remote,
    Hybrid,
}

impl JobType {
    pub const ALL: [JobType; 3] = [JobType::OnSite, JobType::Remote, JobType::Hybrid];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::OnSite => "On-site",
            JobType::Remote => "Remote",
            JobType::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid jobPreferences.type value: {}. Must be one of On-site, Remote, Hybrid",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            _ => Err(format!(
                "Invalid gender value: {}. Must be one of Male, Female, Other",
                s
            )),
        }
    }
}

// ===== Nested structures =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certificate {
    pub name: String,
    pub file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    pub institution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub certificates: Vec<Certificate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkEntry {
    pub company: String,
    pub job_title: String,
    pub duration: String,
    pub achievements: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobPreferences {
    pub title: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    pub currency: String,
    pub location: String,
}

impl Default for JobPreferences {
    fn default() -> Self {
        Self {
            title: String::new(),
            job_type: None,
            salary: None,
            currency: "USD".to_string(),
            location: String::new(),
        }
    }
}

// ===== Profile =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub owner: Uuid,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub nationality: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub job_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<f64>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub education: Education,
    #[serde(default)]
    pub work_history: Vec<WorkEntry>,
    #[serde(default)]
    pub job_preferences: JobPreferences,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn job_type(&self) -> Option<JobType> {
        self.job_preferences.job_type
    }

    pub fn skill_set(&self) -> HashSet<&str> {
        self.skills.iter().map(String::as_str).collect()
    }
}

/// Trim skills, drop blanks and duplicates. First occurrence wins the position.
pub fn normalize_skills<I, S>(skills: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    skills
        .into_iter()
        .filter_map(|s| {
            let trimmed = s.as_ref().trim();
            if trimmed.is_empty() || !seen.insert(trimmed.to_string()) {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

// ===== Match view =====

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicEducation {
    pub degree: String,
    pub institution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub certificates: Vec<String>,
}

/// What another candidate gets to see of a profile, plus its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub owner: Uuid,
    pub full_name: String,
    pub job_title: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<f64>,
    pub job_preferences: JobPreferences,
    pub address: Address,
    pub linkedin: String,
    pub work_history: Vec<WorkEntry>,
    pub education: PublicEducation,
    pub match_score: u32,
}

impl MatchResult {
    pub fn from_profile(profile: Profile, match_score: u32) -> Self {
        let education = PublicEducation {
            degree: profile.education.degree,
            institution: profile.education.institution,
            year: profile.education.year,
            certificates: profile
                .education
                .certificates
                .into_iter()
                .map(|c| c.name)
                .collect(),
        };

        Self {
            owner: profile.owner,
            full_name: profile.full_name,
            job_title: profile.job_title,
            skills: profile.skills,
            experience: profile.experience,
            job_preferences: profile.job_preferences,
            address: profile.address,
            linkedin: profile.linkedin,
            work_history: profile.work_history,
            education,
            match_score,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn profile(skills: &[&str], job_type: Option<JobType>, experience: Option<f64>) -> Profile {
        Profile {
            owner: Uuid::new_v4(),
            full_name: "Test Candidate".to_string(),
            email: "candidate@example.com".to_string(),
            phone_number: String::new(),
            dob: None,
            nationality: String::new(),
            gender: None,
            address: Address::default(),
            job_title: "Engineer".to_string(),
            experience,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            resume: None,
            linkedin: String::new(),
            education: Education::default(),
            work_history: Vec::new(),
            job_preferences: JobPreferences {
                job_type,
                ..Default::default()
            },
            updated_at: Utc::now(),
        }
    }
}
