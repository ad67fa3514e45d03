// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Application, Invitation, Job, JobSummary, Profile, ReviewStatus, ScoredCandidate, User, UserStatus};
pub use requests::{
    ChangeEmailRequest, ChangePasswordRequest, ChangeProfilePasswordRequest, ChatInviteRequest,
    InviteRequest, JobRequest, LoginRequest, OtpRequest, ProfileUpdate, RegisterRequest,
    ResetPasswordRequest, UpdateProfileRequest, VerifyJwtRequest,
};
pub use responses::{ErrorResponse, HealthResponse, LoginResponse, MessageResponse, ProfileResponse};
