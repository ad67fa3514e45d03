use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{ChatInviteRequest, InviteRequest, MessageResponse};
use crate::routes::AppState;
use crate::services::random_string;
use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

/// Length of generated chat room ids
pub const ROOM_ID_LEN: usize = 10;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/getFreelancers", web::get().to(get_freelancers))
        .route("/invite", web::post().to(invite))
        .route("/getInvitations", web::get().to(get_invitations))
        .route("/deleteInvitation/{id}", web::delete().to(delete_invitation))
        .route("/inviteToChat", web::post().to(invite_to_chat))
        .route("/getApplications", web::get().to(get_applications));
}

/// GET /hire/getFreelancers
async fn get_freelancers(_user: AuthUser, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let profiles = state.postgres.list_profiles().await?;
    Ok(HttpResponse::Ok().json(profiles))
}

/// POST /hire/invite
///
/// Stores the invitation, then mails the freelancer.
async fn invite(
    user: AuthUser,
    state: web::Data<AppState>,
    req: web::Json<InviteRequest>,
) -> Result<HttpResponse, ApiError> {
    let InviteRequest {
        invitee_id,
        invitation,
    } = req.into_inner();
    invitation.validate()?;

    let claims = user.claims();
    state
        .postgres
        .create_invitation(&invitation, invitee_id, claims.id, &claims.username)
        .await?;

    state
        .mailer
        .send_invitation(
            &invitation.invitee_email,
            &invitation.invitee_username,
            &claims.username,
            &invitation.job_title,
        )
        .await?;

    tracing::info!("{} invited {} for {}", claims.username, invitation.invitee_username, invitation.job_title);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Invitation sent successfully")))
}

/// GET /hire/getInvitations
async fn get_invitations(user: AuthUser, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let invitations = state.postgres.invitations_by_inviter(user.claims().id).await?;
    Ok(HttpResponse::Ok().json(invitations))
}

/// DELETE /hire/deleteInvitation/{id}
async fn delete_invitation(
    user: AuthUser,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    if !state.postgres.delete_invitation(*id, user.claims().id).await? {
        return Err(ApiError::NotFound("Invitation Not Found".to_string()));
    }
    Ok(HttpResponse::Ok().json(MessageResponse::new("Invitation Deleted Successfully")))
}

/// POST /hire/inviteToChat
///
/// Both the invitee and the caller get a link to the same new room.
async fn invite_to_chat(
    user: AuthUser,
    state: web::Data<AppState>,
    req: web::Json<ChatInviteRequest>,
) -> Result<HttpResponse, ApiError> {
    let claims = user.claims();
    let dest = &req.dest;
    let room_id = random_string(ROOM_ID_LEN);

    state
        .mailer
        .send_chat_invite(
            &room_id,
            &dest.invitee_username,
            &dest.invitee_email,
            &format!("{} has invited you to a chat.", claims.username),
        )
        .await?;

    state
        .mailer
        .send_chat_invite(
            &room_id,
            &claims.username,
            &claims.email,
            &format!("You have invited {} to a chat.", dest.invitee_username),
        )
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Chat Invite Sent Successfully")))
}

/// GET /hire/getApplications
async fn get_applications(user: AuthUser, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let applications = state
        .postgres
        .applications_for_recruiter(user.claims().id)
        .await?;
    Ok(HttpResponse::Ok().json(applications))
}
