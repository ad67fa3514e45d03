use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Account state of a registered user
///
/// Stored and serialized as the numeric codes used by clients:
/// `2` admin, `1` verified, `0` blocked, `-1` unverified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum UserStatus {
    Admin,
    Verified,
    Blocked,
    Unverified,
}

impl From<UserStatus> for i16 {
    fn from(value: UserStatus) -> Self {
        match value {
            UserStatus::Admin => 2,
            UserStatus::Verified => 1,
            UserStatus::Blocked => 0,
            UserStatus::Unverified => -1,
        }
    }
}

impl TryFrom<i16> for UserStatus {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(UserStatus::Admin),
            1 => Ok(UserStatus::Verified),
            0 => Ok(UserStatus::Blocked),
            -1 => Ok(UserStatus::Unverified),
            other => Err(format!("unknown user status {}", other)),
        }
    }
}

/// Lifecycle of an invitation or an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum ReviewStatus {
    Accepted,
    Pending,
    Rejected,
}

impl From<ReviewStatus> for i16 {
    fn from(value: ReviewStatus) -> Self {
        match value {
            ReviewStatus::Accepted => 1,
            ReviewStatus::Pending => 0,
            ReviewStatus::Rejected => -1,
        }
    }
}

impl TryFrom<i16> for ReviewStatus {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ReviewStatus::Accepted),
            0 => Ok(ReviewStatus::Pending),
            -1 => Ok(ReviewStatus::Rejected),
            other => Err(format!("unknown review status {}", other)),
        }
    }
}

/// Registered account (recruiter or freelancer)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub otp: Option<String>,
    pub user_status: UserStatus,
    pub is_recruiter: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Job posting owned by a recruiter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub job_id: i64,
    pub company_name: String,
    pub job_title: String,
    pub job_type: String,
    pub job_mode: String,
    pub job_scope: String,
    pub job_salary: String,
    pub salary_type: String,
    pub job_experience: String,
    pub job_description: String,
    #[serde(default)]
    pub job_skills: Vec<String>,
    pub date_posted: DateTime<Utc>,
    pub posted_by: Uuid,
}

impl Job {
    /// Free text the recommendation engine analyses for this job
    pub fn ranking_text(&self) -> String {
        format!("{} {}", self.job_description, self.job_title)
    }
}

/// Short listing of a job for the recruiter's dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: Uuid,
    pub job_id: i64,
    pub job_title: String,
    pub company_name: String,
    pub date_posted: DateTime<Utc>,
}

/// Freelancer profile as seen by recruiters
///
/// Any field the store returns beyond the identity and bio/skills fields
/// is kept in `extra` and written back unchanged on serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub user_skills: Vec<String>,
    #[serde(default)]
    pub user_bio: String,
    #[serde(default)]
    pub user_about: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Free text the recommendation engine analyses for this profile
    pub fn ranking_text(&self) -> String {
        format!("{} {}", self.user_bio, self.user_about)
    }
}

/// Profile returned by the recommendation engine, with its similarity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub profile: Profile,
    pub score: f64,
}

/// Invitation sent by a recruiter to a freelancer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: Uuid,
    pub invitee: Uuid,
    pub inviter: Uuid,
    pub invitee_username: String,
    pub inviter_username: String,
    pub invitee_email: String,
    pub company_name: String,
    pub job_title: String,
    pub job_type: String,
    pub job_mode: String,
    pub job_scope: String,
    pub job_salary: String,
    pub salary_type: String,
    pub job_description: String,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}

/// Freelancer application to one of a recruiter's jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applied_by: Uuid,
    pub recruiter_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub status: ReviewStatus,
    pub applied_at: DateTime<Utc>,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
}
