use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{
    ChangeEmailRequest, ChangeProfilePasswordRequest, MessageResponse, ProfileResponse,
    UpdateProfileRequest, User,
};
use crate::routes::auth::OTP_LEN;
use crate::routes::AppState;
use crate::services::random_string;
use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/getProfile", web::get().to(get_profile))
        .route("/updateProfile", web::post().to(update_profile))
        .route("/changeEmail", web::post().to(change_email))
        .route("/changePassword", web::post().to(change_password));
}

async fn current_user(state: &AppState, id: Uuid) -> Result<User, ApiError> {
    state
        .postgres
        .find_user_by_id(id)
        .await?
        .ok_or_else(|| ApiError::bad_request("User Not Found"))
}

/// GET /profile/getProfile
async fn get_profile(user: AuthUser, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let account = current_user(&state, user.claims().id).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(account)))
}

/// POST /profile/updateProfile
async fn update_profile(
    user: AuthUser,
    state: web::Data<AppState>,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    let profile = req.into_inner().profile.normalized();
    profile.validate()?;

    if !state.postgres.update_profile(user.claims().id, &profile).await? {
        return Err(ApiError::NotFound("User Not Found".to_string()));
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("Profile Updated Successfully")))
}

/// POST /profile/changeEmail
///
/// The account goes back to unverified until the new address is confirmed.
async fn change_email(
    user: AuthUser,
    state: web::Data<AppState>,
    req: web::Json<ChangeEmailRequest>,
) -> Result<HttpResponse, ApiError> {
    let data = &req.data;
    data.validate()?;
    let claims = user.claims();

    if let Some(existing) = state.postgres.find_user_by_email(&data.email).await? {
        if existing.id == claims.id {
            return Err(ApiError::bad_request("Email is same as previous one"));
        }
        return Err(ApiError::bad_request("User with this email exists"));
    }

    let account = current_user(&state, claims.id).await?;
    if !state.verify_password(&data.password, &account.password).await? {
        return Err(ApiError::bad_request("Invalid Password"));
    }

    let otp = format!("{}{}", random_string(OTP_LEN), claims.username);
    state.postgres.change_email(account.id, &data.email, &otp).await?;

    state
        .mailer
        .send_verification(
            &otp,
            &claims.username,
            &data.email,
            "Your email has been updated successfully.",
        )
        .await?;

    tracing::info!("{} changed their email", claims.username);
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Email updated successfully and verification email sent",
    )))
}

/// POST /profile/changePassword
async fn change_password(
    user: AuthUser,
    state: web::Data<AppState>,
    req: web::Json<ChangeProfilePasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let data = &req.data;
    if data.new_password != data.confirm_new_password {
        return Err(ApiError::bad_request("New passwords do not match"));
    }
    data.validate()?;

    let account = current_user(&state, user.claims().id).await?;
    if !state.verify_password(&data.current_password, &account.password).await? {
        return Err(ApiError::bad_request("Invalid current password"));
    }
    if data.current_password == data.new_password {
        return Err(ApiError::bad_request("New Password is same as old password"));
    }

    let password_hash = state.hash_password(&data.new_password).await?;
    state.postgres.update_password(account.id, &password_hash).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password Changed Successfully")))
}
