use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

const PASSWORD_SPECIALS: &str = "@#$%^&+=";

pub const JOB_TYPES: &[&str] = &["Full Time", "Part Time", "Performance based FTE"];
pub const JOB_EXPERIENCE: &[&str] = &[
    "Fresher (0-2 years)",
    "Intermediate (2-5 years)",
    "Expert (5+ years)",
];
pub const JOB_MODES: &[&str] = &["Work from Office", "Work from Home", "Hybrid"];
pub const JOB_SCOPES: &[&str] = &["Small", "Medium", "Large"];
pub const SALARY_TYPES: &[&str] = &["Hourly rate (/hr)", "Fixed price"];

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// At least one lowercase, uppercase, digit and special character, nothing else
pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c));
    let lower = value.chars().any(|c| c.is_ascii_lowercase());
    let upper = value.chars().any(|c| c.is_ascii_uppercase());
    let digit = value.chars().any(|c| c.is_ascii_digit());
    let special = value.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if allowed && lower && upper && digit && special {
        Ok(())
    } else {
        Err(invalid(
            "password",
            "Password must contain at least one lowercase and one uppercase alphabet, one number and one special character (@#$%^&+=)",
        ))
    }
}

pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(invalid(
            "username",
            "Username should contain only alphanumeric characters and underscores, starting with an alphabet or an underscore",
        ))
    }
}

fn alphanumeric_spaces(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
}

pub fn validate_company_name(value: &str) -> Result<(), ValidationError> {
    if alphanumeric_spaces(value) {
        Ok(())
    } else {
        Err(invalid(
            "company_name",
            "Company name should contain only alphanumerics and spaces",
        ))
    }
}

pub fn validate_job_title(value: &str) -> Result<(), ValidationError> {
    if alphanumeric_spaces(value) {
        Ok(())
    } else {
        Err(invalid(
            "job_title",
            "Job role should contain only alphanumerics and spaces",
        ))
    }
}

/// Digits with an optional decimal part
pub fn validate_salary(value: &str) -> Result<(), ValidationError> {
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    let valid = match value.split_once('.') {
        Some((whole, fraction)) => digits(whole) && digits(fraction),
        None => digits(value),
    };

    if valid {
        Ok(())
    } else {
        Err(invalid(
            "salary",
            "Salary should contain only numbers or decimals",
        ))
    }
}

fn one_of(value: &str, allowed: &[&str], code: &'static str) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(invalid(code, "Value is not one of the allowed options"))
    }
}

pub fn validate_job_type(value: &str) -> Result<(), ValidationError> {
    one_of(value, JOB_TYPES, "job_type")
}

pub fn validate_job_experience(value: &str) -> Result<(), ValidationError> {
    one_of(value, JOB_EXPERIENCE, "job_experience")
}

pub fn validate_job_mode(value: &str) -> Result<(), ValidationError> {
    one_of(value, JOB_MODES, "job_mode")
}

pub fn validate_job_scope(value: &str) -> Result<(), ValidationError> {
    one_of(value, JOB_SCOPES, "job_scope")
}

pub fn validate_salary_type(value: &str) -> Result<(), ValidationError> {
    one_of(value, SALARY_TYPES, "salary_type")
}

pub fn validate_person_name(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace()) {
        Ok(())
    } else {
        Err(invalid("name", "Name should contain only alphabets"))
    }
}

/// Alphanumerics and spaces with at least one letter
pub fn validate_profile_company(value: &str) -> Result<(), ValidationError> {
    if alphanumeric_spaces(value) && value.chars().any(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(invalid(
            "company_name",
            "Company name should contain only alphanumerics and spaces with at least one alphabet",
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 30), custom(function = "validate_password"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 30), custom(function = "validate_username"))]
    pub username: String,
    #[validate(length(min = 6, max = 30), custom(function = "validate_password"))]
    pub password: String,
    #[validate(length(min = 6, max = 30), custom(function = "validate_password"))]
    pub confirm_password: String,
    #[serde(default)]
    pub is_recruiter: bool,
}

/// One-time password taken from a verification or reset link
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OtpRequest {
    #[validate(length(min = 20, max = 50))]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyJwtRequest {
    pub jwt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 30), custom(function = "validate_password"))]
    pub password: String,
    pub confirm_password: String,
    #[validate(length(min = 20, max = 50))]
    pub otp: String,
}

/// New job posting
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    #[validate(length(min = 1), custom(function = "validate_company_name"))]
    pub company_name: String,
    #[validate(length(min = 1), custom(function = "validate_job_title"))]
    pub job_title: String,
    #[validate(custom(function = "validate_job_type"))]
    pub job_type: String,
    #[validate(custom(function = "validate_job_mode"))]
    pub job_mode: String,
    #[validate(custom(function = "validate_job_scope"))]
    pub job_scope: String,
    #[validate(custom(function = "validate_salary"))]
    pub job_salary: String,
    #[validate(custom(function = "validate_salary_type"))]
    pub salary_type: String,
    #[validate(custom(function = "validate_job_experience"))]
    pub job_experience: String,
    #[validate(length(min = 1, max = 1000))]
    pub job_description: String,
    #[serde(default)]
    pub job_skills: Vec<String>,
}

/// Job details attached to an invitation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvitationDetails {
    pub invitee_username: String,
    #[validate(email)]
    pub invitee_email: String,
    #[validate(length(min = 1), custom(function = "validate_company_name"))]
    pub company_name: String,
    #[validate(length(min = 1), custom(function = "validate_job_title"))]
    pub job_title: String,
    #[validate(custom(function = "validate_job_type"))]
    pub job_type: String,
    #[validate(custom(function = "validate_job_mode"))]
    pub job_mode: String,
    #[validate(custom(function = "validate_job_scope"))]
    pub job_scope: String,
    #[validate(custom(function = "validate_salary"))]
    pub job_salary: String,
    #[validate(custom(function = "validate_salary_type"))]
    pub salary_type: String,
    #[validate(length(min = 1, max = 1000))]
    pub job_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteRequest {
    pub invitee_id: Uuid,
    pub invitation: InvitationDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatDestination {
    pub invitee_email: String,
    pub invitee_username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatInviteRequest {
    pub dest: ChatDestination,
}

/// Editable recruiter profile fields; empty values count as absent
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[validate(length(min = 2, max = 30), custom(function = "validate_person_name"))]
    pub first_name: Option<String>,
    #[validate(length(min = 2, max = 30), custom(function = "validate_person_name"))]
    pub last_name: Option<String>,
    #[validate(length(min = 2, max = 30), custom(function = "validate_profile_company"))]
    pub company_name: Option<String>,
}

impl ProfileUpdate {
    /// Drop empty names before validation
    pub fn normalized(self) -> Self {
        let keep = |value: Option<String>| value.filter(|v| !v.is_empty());
        Self {
            first_name: keep(self.first_name),
            last_name: keep(self.last_name),
            company_name: keep(self.company_name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub profile: ProfileUpdate,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeEmailData {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEmailRequest {
    pub data: ChangeEmailData,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangeProfilePasswordData {
    pub current_password: String,
    #[validate(length(min = 6, max = 20), custom(function = "validate_password"))]
    pub new_password: String,
    pub confirm_new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeProfilePasswordRequest {
    pub data: ChangeProfilePasswordData,
}
