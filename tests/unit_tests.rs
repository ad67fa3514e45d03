// Unit tests for Career Crafter

use career_crafter::core::{
    extract_tags, jaccard_similarity, tagger::is_stopword, RuleTagger, TagSet,
};
use career_crafter::models::requests::{validate_password, validate_salary, JobRequest};
use career_crafter::services::{random_string, PasswordHasher, TokenService};
use validator::Validate;

fn set(tags: &[&str]) -> TagSet {
    tags.iter().copied().collect()
}

#[test]
fn test_jaccard_symmetric() {
    let pairs = [
        (set(&["rust", "sql"]), set(&["sql"])),
        (set(&["a", "b", "c"]), set(&["c", "d"])),
        (set(&[]), set(&["x"])),
    ];

    for (a, b) in &pairs {
        assert_eq!(jaccard_similarity(a, b), jaccard_similarity(b, a));
    }
}

#[test]
fn test_jaccard_bounds() {
    let a = set(&["rust", "tokio", "sqlx"]);
    let b = set(&["rust", "actix"]);
    let score = jaccard_similarity(&a, &b);

    assert!(score > 0.0 && score < 100.0);
    assert_eq!(score, 25.0);
    assert_eq!(jaccard_similarity(&a, &a), 100.0);
    assert_eq!(jaccard_similarity(&a, &set(&["go"])), 0.0);
    assert_eq!(jaccard_similarity(&TagSet::new(), &TagSet::new()), 0.0);
}

#[test]
fn test_tag_set_is_case_sensitive() {
    let tags = set(&["Rust", "rust"]);
    assert_eq!(tags.len(), 2);
}

#[test]
fn test_extract_tags_lowercases_text_but_not_skills() {
    let tagger = RuleTagger::default();
    let tags = extract_tags(&tagger, "Rust Engineer", &["PostgreSQL".to_string()]).unwrap();

    assert!(tags.contains("rust"));
    assert!(tags.contains("engineer"));
    assert!(tags.contains("PostgreSQL"));
    assert!(!tags.contains("Rust"));
    assert!(!tags.contains("postgresql"));
}

#[test]
fn test_extract_tags_drops_stopwords() {
    let tagger = RuleTagger::default();
    let tags = extract_tags(&tagger, "The team and the product", &[]).unwrap();

    assert!(tags.iter().all(|t| !is_stopword(t)));
    assert!(!tags.contains("the"));
    assert!(!tags.contains("and"));
}

#[test]
fn test_extract_tags_empty_inputs() {
    let tags = extract_tags(&RuleTagger::default(), "", &[]).unwrap();
    assert!(tags.is_empty());

    let tags = extract_tags(&RuleTagger::default(), "   ", &["Go".to_string()]).unwrap();
    assert_eq!(tags, set(&["Go"]));
}

#[test]
fn test_extract_tags_tolerates_messy_text() {
    let tags = extract_tags(&RuleTagger::default(), "Frontend developer\u{1b}[0m\u{7}", &[]).unwrap();
    assert!(tags.contains("developer"));
    assert!(tags.iter().all(|t| !t.chars().any(char::is_control)));

    let tags = extract_tags(&RuleTagger::new(10), "far too long for the limit", &[]).unwrap();
    assert!(!tags.contains("limit"));
}

#[test]
fn test_password_roundtrip() {
    let hasher = PasswordHasher::new(4).unwrap();
    let hashed = hasher.hash("Password@123").unwrap();

    assert!(hasher.verify("Password@123", &hashed).unwrap());
    assert!(!hasher.verify("password@123", &hashed).unwrap());
}

#[test]
fn test_otp_alphabet() {
    let otp = random_string(20);
    assert_eq!(otp.len(), 20);
    assert!(otp.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(otp, random_string(20));
}

#[test]
fn test_token_with_other_secret_rejected() {
    let issuer = TokenService::new("first", 60);
    let claims = career_crafter::services::Claims {
        id: uuid::Uuid::new_v4(),
        email: "rec@example.com".to_string(),
        username: "recruiter_1".to_string(),
        user_status: 1,
        is_recruiter: true,
        login_time: String::new(),
        exp: (chrono::Utc::now().timestamp() + 60) as u64,
    };

    let token = issuer.encode(&claims).unwrap();
    assert_eq!(issuer.verify(&token).unwrap(), claims);
    assert!(TokenService::new("second", 60).verify(&token).is_err());
}

#[test]
fn test_validation_rules() {
    assert!(validate_password("Aa1@aa").is_ok());
    assert!(validate_password("Aa1aaa").is_err());
    assert!(validate_salary("15.75").is_ok());
    assert!(validate_salary("fifteen").is_err());
}

#[test]
fn test_job_description_limit() {
    let job = JobRequest {
        company_name: "Acme".to_string(),
        job_title: "Engineer".to_string(),
        job_type: "Part Time".to_string(),
        job_mode: "Work from Home".to_string(),
        job_scope: "Large".to_string(),
        job_salary: "40".to_string(),
        salary_type: "Hourly rate (/hr)".to_string(),
        job_experience: "Fresher (0-2 years)".to_string(),
        job_description: "x".repeat(1001),
        job_skills: vec![],
    };

    let errors = job.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("job_description"));
}
