// Account endpoints
//
// Signup, login, logout, profile and theme. Login and signup do NOT store
// the returned token on the client; the caller decides when to call
// `set_auth_token`, which keeps credential state changes explicit.

use secrecy::SecretString;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    AuthResponse, LoginRequest, SignupRequest, ThemeRequest, ThemeResponse, UpdateUserRequest,
    UserResponse,
};

impl ApiClient {
    /// `POST users/signup`
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthResponse, Error> {
        debug!(email, "registering account");
        self.post(
            "users/signup",
            &SignupRequest {
                name,
                email,
                password,
            },
        )
        .await
    }

    /// `POST users/login`
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<AuthResponse, Error> {
        debug!(email, "logging in");
        self.post("users/login", &LoginRequest { email, password })
            .await
    }

    /// `POST users/logout`
    ///
    /// The server's response body is ignored; any 2xx is success.
    pub async fn logout(&self) -> Result<(), Error> {
        let _: serde_json::Value = self.post_empty("users/logout").await?;
        Ok(())
    }

    /// `GET users/current`
    pub async fn current_user(&self) -> Result<UserResponse, Error> {
        self.get("users/current").await
    }

    /// `PATCH user/theme`
    pub async fn update_theme(&self, theme: &str) -> Result<ThemeResponse, Error> {
        self.patch("user/theme", &ThemeRequest { theme }).await
    }

    /// `PATCH users/update`
    pub async fn update_user(&self, name: &str) -> Result<UserResponse, Error> {
        self.patch("users/update", &UpdateUserRequest { name }).await
    }
}
