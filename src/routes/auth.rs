use crate::error::{
    ApiError, EMAIL_NOT_VERIFIED, EMAIL_TAKEN, INVALID_CREDENTIALS, INVALID_OTP,
    PASSWORDS_DO_NOT_MATCH, UNAUTHORIZED_ACCESS, USERNAME_TAKEN,
};
use crate::models::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse, OtpRequest,
    RegisterRequest, ResetPasswordRequest, User, UserStatus, VerifyJwtRequest,
};
use crate::routes::AppState;
use crate::services::{random_string, NewUser};
use actix_web::{web, HttpResponse};
use validator::Validate;

/// Length of the random part of one-time passwords
pub const OTP_LEN: usize = 20;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/register", web::post().to(register))
        .route("/verify/{otp}", web::get().to(verify))
        .route("/verifyjwt", web::post().to(verify_jwt))
        .route("/resetpassword", web::post().to(reset_password))
        .route("/changepassword", web::post().to(change_password));
}

/// Unverified and blocked accounts cannot log in or reset their password
fn ensure_active(user: &User) -> Result<(), ApiError> {
    match user.user_status {
        UserStatus::Unverified => Err(ApiError::bad_request(EMAIL_NOT_VERIFIED)),
        UserStatus::Blocked => Err(ApiError::bad_request(UNAUTHORIZED_ACCESS)),
        UserStatus::Verified | UserStatus::Admin => Ok(()),
    }
}

/// POST /auth/login
async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let user = state
        .postgres
        .find_user_by_email(&req.email)
        .await?
        .ok_or_else(|| ApiError::bad_request(INVALID_CREDENTIALS))?;

    ensure_active(&user)?;
    if !user.is_recruiter {
        return Err(ApiError::bad_request(UNAUTHORIZED_ACCESS));
    }

    if !state.verify_password(&req.password, &user.password).await? {
        return Err(ApiError::bad_request(INVALID_CREDENTIALS));
    }

    let token = state.tokens.issue(&user)?;
    tracing::info!("User {} logged in", user.username);

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        message: "Login Successful".to_string(),
    }))
}

/// POST /auth/register
async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    if req.password != req.confirm_password {
        return Err(ApiError::bad_request(PASSWORDS_DO_NOT_MATCH));
    }

    if state.postgres.find_user_by_username(&req.username).await?.is_some() {
        return Err(ApiError::bad_request(USERNAME_TAKEN));
    }
    if state.postgres.find_user_by_email(&req.email).await?.is_some() {
        return Err(ApiError::bad_request(EMAIL_TAKEN));
    }

    let password_hash = state.hash_password(&req.password).await?;
    let otp = format!("{}{}", random_string(OTP_LEN), req.username);

    state
        .mailer
        .send_verification(&otp, &req.username, &req.email, "Thanks for registering.")
        .await?;

    state
        .postgres
        .create_user(&NewUser {
            username: &req.username,
            email: &req.email,
            password_hash: &password_hash,
            otp: &otp,
            is_recruiter: req.is_recruiter,
        })
        .await?;

    tracing::info!("Registered user {}", req.username);

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Registration Successful and email sent successfully to {}",
        req.email
    ))))
}

/// GET /auth/verify/{otp}
async fn verify(
    state: web::Data<AppState>,
    otp: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let req = OtpRequest {
        otp: otp.into_inner(),
    };
    req.validate()?;

    let user = state
        .postgres
        .find_user_by_otp(&req.otp)
        .await?
        .ok_or_else(|| ApiError::bad_request(INVALID_OTP))?;

    state.postgres.mark_verified(user.id).await?;
    tracing::info!("Verified email of {}", user.username);

    Ok(HttpResponse::Ok().json(MessageResponse::new("Email Verified Successfully")))
}

/// POST /auth/verifyjwt
async fn verify_jwt(
    state: web::Data<AppState>,
    req: web::Json<VerifyJwtRequest>,
) -> Result<HttpResponse, ApiError> {
    let token = req
        .jwt
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("Token not found"))?;

    let claims = state
        .tokens
        .verify(token)
        .map_err(|_| ApiError::bad_request("Invalid Token"))?;

    match claims.status() {
        Some(UserStatus::Blocked) => Err(ApiError::bad_request(UNAUTHORIZED_ACCESS)),
        Some(UserStatus::Unverified) => Err(ApiError::bad_request(EMAIL_NOT_VERIFIED)),
        // Other statuses, known or not, are handed back with the claims
        _ => Ok(HttpResponse::Ok().json(claims)),
    }
}

/// POST /auth/resetpassword
async fn reset_password(
    state: web::Data<AppState>,
    req: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let email = req
        .email
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("Email not found"))?;

    let user = state
        .postgres
        .find_user_by_email(email)
        .await?
        .ok_or_else(|| ApiError::bad_request("User not found"))?;
    ensure_active(&user)?;

    let otp = random_string(OTP_LEN);
    state
        .mailer
        .send_reset(&otp, &user.username, email, "You have requested to reset your password.")
        .await?;
    state.postgres.set_otp(user.id, Some(&otp)).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Email to reset password sent successfully to {}",
        email
    ))))
}

/// POST /auth/changepassword
async fn change_password(
    state: web::Data<AppState>,
    req: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    if req.password != req.confirm_password {
        return Err(ApiError::bad_request(PASSWORDS_DO_NOT_MATCH));
    }
    req.validate()?;

    let user = state
        .postgres
        .find_user_by_email(&req.email)
        .await?
        .ok_or_else(|| ApiError::bad_request("User not found"))?;
    ensure_active(&user)?;

    if user.otp.as_deref() != Some(req.otp.as_str()) {
        return Err(ApiError::bad_request(INVALID_OTP));
    }

    let password_hash = state.hash_password(&req.password).await?;
    state.postgres.reset_password(user.id, &password_hash).await?;
    tracing::info!("Password reset for {}", user.username);

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password Changed Successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user(status: UserStatus) -> User {
        User {
            id: Uuid::new_v4(),
            username: "recruiter_1".to_string(),
            email: "rec@example.com".to_string(),
            password: String::new(),
            otp: None,
            user_status: status,
            is_recruiter: true,
            first_name: None,
            last_name: None,
            company_name: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_ensure_active() {
        assert!(ensure_active(&user(UserStatus::Verified)).is_ok());
        assert!(ensure_active(&user(UserStatus::Admin)).is_ok());
        assert!(matches!(
            ensure_active(&user(UserStatus::Unverified)),
            Err(ApiError::BadRequest(msg)) if msg == EMAIL_NOT_VERIFIED
        ));
        assert!(matches!(
            ensure_active(&user(UserStatus::Blocked)),
            Err(ApiError::BadRequest(msg)) if msg == UNAUTHORIZED_ACCESS
        ));
    }
}
