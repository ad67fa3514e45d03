use crate::config::{MailSettings, ServerSettings};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the mail relay
#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Mail relay returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,
}

#[derive(Debug, Serialize)]
struct OutgoingMail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: String,
}

/// HTTP mail relay client
///
/// Sends the transactional mails of the service:
/// - account verification after registration or an email change
/// - password reset links
/// - job invitations
/// - chat invitations
#[derive(Debug, Clone)]
pub struct MailClient {
    endpoint: String,
    api_key: String,
    from: String,
    frontend_url: String,
    public_url: String,
    client: Client,
}

impl MailClient {
    pub fn new(mail: &MailSettings, server: &ServerSettings) -> Result<Self, MailError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(mail.timeout_secs))
            .build()?;

        Ok(Self {
            endpoint: mail.endpoint.clone(),
            api_key: mail.api_key.clone(),
            from: mail.from.clone(),
            frontend_url: server.frontend_url.trim_end_matches('/').to_string(),
            public_url: server.public_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Mail a link to `/auth/verify/{otp}`
    pub async fn send_verification(
        &self,
        otp: &str,
        username: &str,
        to: &str,
        message: &str,
    ) -> Result<(), MailError> {
        let link = format!("{}/auth/verify/{}", self.public_url, otp);
        let html = format!(
            "Dear {},<br><br>{}<br><br>Please click <a href=\"{}\">here</a> to verify your email address.",
            username, message, link
        );

        self.send(to, "Welcome to Career Crafter", html).await
    }

    /// Mail a link to the client's password reset page
    pub async fn send_reset(
        &self,
        otp: &str,
        username: &str,
        to: &str,
        message: &str,
    ) -> Result<(), MailError> {
        let link = format!("{}/resetPassword/{}", self.frontend_url, otp);
        let html = format!(
            "Dear {},<br><br>{}<br><br>Please click <a href=\"{}\">here</a> to reset your password.",
            username, message, link
        );

        self.send(to, "Request to reset password", html).await
    }

    pub async fn send_invitation(
        &self,
        to: &str,
        invitee_username: &str,
        inviter_username: &str,
        job_title: &str,
    ) -> Result<(), MailError> {
        let html = format!(
            "Dear {},<br><br>You have been invited by {} to join for the job of {}.<br><br>All the best for your application.",
            invitee_username, inviter_username, job_title
        );

        self.send(to, "Invitation to join", html).await
    }

    /// Mail a link to chat room `room_id`; the link key encodes `username/room_id`
    pub async fn send_chat_invite(
        &self,
        room_id: &str,
        username: &str,
        to: &str,
        message: &str,
    ) -> Result<(), MailError> {
        let link = format!("{}/chat/{}", self.frontend_url, chat_key(username, room_id));
        let html = format!(
            "Dear {},<br><br>{}<br><br>Please click <a href=\"{}\">here</a> to join the chat.",
            username, message, link
        );

        self.send(to, "Invite for chat", html).await
    }

    async fn send(&self, to: &str, subject: &str, html: String) -> Result<(), MailError> {
        let mail = OutgoingMail {
            from: &self.from,
            to,
            subject,
            html,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&mail)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(MailError::Unauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Mail relay rejected '{}' to {}: {} - {}", subject, to, status, body);
            return Err(MailError::ApiError(format!("Failed to send mail: {}", status)));
        }

        tracing::debug!("Sent '{}' to {}", subject, to);
        Ok(())
    }
}

/// URL-safe chat link key for `username/room_id`
pub fn chat_key(username: &str, room_id: &str) -> String {
    urlencoding::encode(&format!("{}/{}", username, room_id)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client(endpoint: String) -> MailClient {
        let mail = MailSettings {
            endpoint,
            api_key: "test_key".to_string(),
            from: "noreply@careercrafter.test".to_string(),
            timeout_secs: 5,
        };
        let server = ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
            frontend_url: "http://localhost:3000/".to_string(),
            public_url: "http://localhost:8080".to_string(),
        };
        MailClient::new(&mail, &server).unwrap()
    }

    #[test]
    fn test_chat_key() {
        assert_eq!(chat_key("jane_doe", "AbC123xyZ0"), "jane_doe%2FAbC123xyZ0");
    }

    #[tokio::test]
    async fn test_send_verification() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/send")
            .match_header("authorization", "Bearer test_key")
            .match_body(Matcher::PartialJson(json!({
                "from": "noreply@careercrafter.test",
                "to": "jane@example.com",
                "subject": "Welcome to Career Crafter",
            })))
            .match_body(Matcher::Regex(
                "http://localhost:8080/auth/verify/OTP123".to_string(),
            ))
            .with_status(200)
            .create_async()
            .await;

        let mailer = client(format!("{}/send", server.url()));
        tokio_test::assert_ok!(
            mailer
                .send_verification("OTP123", "jane_doe", "jane@example.com", "Welcome")
                .await
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_reset_link_uses_frontend() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/send")
            .match_body(Matcher::Regex(
                "http://localhost:3000/resetPassword/OTP456".to_string(),
            ))
            .with_status(202)
            .create_async()
            .await;

        let mailer = client(format!("{}/send", server.url()));
        tokio_test::assert_ok!(
            mailer
                .send_reset("OTP456", "jane_doe", "jane@example.com", "Reset")
                .await
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_relay_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/send")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let mailer = client(format!("{}/send", server.url()));
        let result = mailer
            .send_invitation("a@b.c", "invitee", "inviter", "Rust Engineer")
            .await;
        assert!(matches!(result, Err(MailError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/send")
            .with_status(401)
            .create_async()
            .await;

        let mailer = client(format!("{}/send", server.url()));
        let result = mailer.send_chat_invite("room", "user", "a@b.c", "hi").await;
        assert!(matches!(result, Err(MailError::Unauthorized)));
    }
}
