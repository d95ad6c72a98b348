//! Authentication Service
//!
//! Login, registration, password management and logout. Every operation
//! validates its input locally first; a request is only sent once all fields
//! pass.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::navigation::Route;
use crate::resources::ResourceId;
use crate::session::{Session, SessionToken};
use crate::validation::{
    check_confirmation, check_email, check_name, check_password, check_phone, ValidationErrors,
};

/// Registration form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// The signed-in administrator
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id", default)]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: SessionToken,
}

#[derive(Serialize)]
struct ResetPasswordRequest<'a> {
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// `{"message": ...}` acknowledgement
#[derive(Debug, Default, Deserialize)]
struct Acknowledgement {
    #[serde(default)]
    message: Option<String>,
}

impl Acknowledgement {
    fn text(self, fallback: &str) -> String {
        self.message.unwrap_or_else(|| fallback.to_string())
    }
}

/// Auth operations against the REST API
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn session(&self) -> &Session {
        self.client.session()
    }

    /// Exchange credentials for a session token, then open the dashboard
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<SessionToken> {
        let email = email.trim();
        let password = password.trim();

        let mut errors = ValidationErrors::new();
        check_email(&mut errors, email);
        check_password(&mut errors, "password", password);
        errors.into_result()?;

        let response: LoginResponse = self
            .client
            .post_json("/auth/login", &LoginRequest { email, password })
            .await?;

        if response.token.as_str().is_empty() {
            return Err(ApiError::Status {
                status: 200,
                message: "Login response carried no token".to_string(),
            });
        }

        self.session().sign_in(response.token.clone())?;
        Ok(response.token)
    }

    /// Create an account, then go to the login page
    pub async fn register(&self, registration: &Registration) -> ApiResult<String> {
        let registration = Registration {
            name: registration.name.trim().to_string(),
            email: registration.email.trim().to_string(),
            phone: registration.phone.trim().to_string(),
            password: registration.password.clone(),
        };

        let mut errors = ValidationErrors::new();
        check_name(&mut errors, &registration.name);
        check_email(&mut errors, &registration.email);
        check_phone(&mut errors, &registration.phone);
        check_password(&mut errors, "password", &registration.password);
        errors.into_result()?;

        let ack: Acknowledgement = self
            .client
            .post_json("/auth/register", &registration)
            .await?;
        tracing::info!("Registered {}", registration.email);

        self.session().navigator().navigate(Route::Login);
        Ok(ack.text("Registration successful"))
    }

    /// Set a new password using an emailed reset token
    pub async fn reset_password(
        &self,
        token: &str,
        password: &str,
        confirmation: &str,
    ) -> ApiResult<String> {
        let mut errors = ValidationErrors::new();
        if token.trim().is_empty() {
            errors.add("token", "Reset link is missing its token");
        }
        check_password(&mut errors, "password", password);
        check_confirmation(&mut errors, "confirmPassword", password, confirmation);
        errors.into_result()?;

        let path = format!("/auth/reset-password/{}", urlencoding::encode(token.trim()));
        let ack: Acknowledgement = self
            .client
            .post_json(&path, &ResetPasswordRequest { password })
            .await?;

        self.session().navigator().navigate(Route::Login);
        Ok(ack.text("Password reset successful"))
    }

    /// Fetch the signed-in user's profile
    pub async fn profile(&self) -> ApiResult<Profile> {
        self.client.get("/profile").await
    }

    /// Change the password of the signed-in user
    pub async fn change_password(
        &self,
        current: &str,
        new: &str,
        confirmation: &str,
    ) -> ApiResult<String> {
        let mut errors = ValidationErrors::new();
        if current.is_empty() {
            errors.add("currentPassword", "Current password is required");
        }
        check_password(&mut errors, "newPassword", new);
        check_confirmation(&mut errors, "confirmPassword", new, confirmation);
        errors.into_result()?;

        let ack: Acknowledgement = self
            .client
            .put_json(
                "/change-password",
                &ChangePasswordRequest {
                    current_password: current,
                    new_password: new,
                },
            )
            .await?;
        Ok(ack.text("Password changed"))
    }

    /// Forget the token and return to the login page. No request is sent.
    pub fn logout(&self) -> ApiResult<()> {
        self.session().sign_out()?;
        Ok(())
    }
}
