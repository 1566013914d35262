//! Session gate and auth-token bookkeeping.
//!
//! The stored access token is the only session signal: there is no local
//! expiry tracking. Guarded actions (basket, search) check [`Session::is_active`]
//! before doing anything else. [`Session::validate`] asks the backend whether
//! the stored token is still accepted and signs out when it is not.

use serde::Deserialize;
use serde_json::json;

use crate::config;
use crate::error::{LostFoundError, Result};
use crate::models::User;
use crate::storage::KeyValueStore;
use crate::transport::{HttpReply, Transport};

const FILL_ALL_FIELDS: &str = "Please fill in all fields.";

/// True for a token that can be sent as a bearer credential.
///
/// Empty strings and the literals `"null"` / `"undefined"` (left behind by
/// careless writers of the same storage) do not count.
pub fn is_usable_token(token: &str) -> bool {
    !token.is_empty() && token != "null" && token != "undefined"
}

/// Login response body. The backend has shipped several field names for the
/// same token over time, so each alias is accepted.
#[derive(Debug, Default, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    success: bool,
    access_token: Option<String>,
    token: Option<String>,
    jwt: Option<String>,
    refresh_token: Option<String>,
    #[serde(rename = "refreshToken")]
    refresh_token_camel: Option<String>,
    refresh: Option<String>,
    message: Option<String>,
    user: Option<User>,
}

impl LoginResponse {
    fn access(&self) -> Option<&str> {
        [&self.access_token, &self.token, &self.jwt]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|t| !t.is_empty())
    }

    fn refresh(&self) -> Option<&str> {
        [&self.refresh_token, &self.refresh_token_camel, &self.refresh]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|t| !t.is_empty())
    }
}

/// Bare `{success, message}` acknowledgement.
#[derive(Debug, Default, Deserialize)]
struct Ack {
    #[serde(default)]
    success: bool,
    message: Option<String>,
}

/// Body of the current-user endpoint.
#[derive(Debug, Deserialize)]
struct CurrentUser {
    #[serde(default)]
    success: bool,
    user: Option<User>,
}

/// Fields of the sign-up form. All are required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Session interface borrowing the client's storage and transport.
pub struct Session<'a> {
    storage: &'a dyn KeyValueStore,
    transport: &'a dyn Transport,
}

impl<'a> Session<'a> {
    pub fn new(storage: &'a dyn KeyValueStore, transport: &'a dyn Transport) -> Self {
        Self { storage, transport }
    }

    /// The stored access token, if it is usable.
    ///
    /// Storage read failures are treated as "no token".
    pub fn token(&self) -> Option<String> {
        match self.storage.get(config::ACCESS_TOKEN_KEY) {
            Ok(Some(token)) if is_usable_token(&token) => Some(token),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read access token");
                None
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.token().is_some()
    }

    /// Run `on_fail` and return `false` when no session is active.
    ///
    /// Callers must not proceed with the guarded action on `false`.
    pub fn require_session<F: FnOnce()>(&self, on_fail: F) -> bool {
        if self.is_active() {
            true
        } else {
            on_fail();
            false
        }
    }

    /// Like [`require_session`](Self::require_session) but yields the token,
    /// or [`LostFoundError::LoginRequired`].
    pub fn require_token(&self) -> Result<String> {
        self.token().ok_or(LostFoundError::LoginRequired)
    }

    /// Persist tokens obtained out of band.
    pub fn store_tokens(&self, access: &str, refresh: Option<&str>) -> Result<()> {
        self.storage.set(config::ACCESS_TOKEN_KEY, access)?;
        if let Some(refresh) = refresh {
            self.storage.set(config::REFRESH_TOKEN_KEY, refresh)?;
        }
        Ok(())
    }

    /// Authenticate against the backend and store the returned tokens.
    ///
    /// The identifier is sent both as `identifier` and `email` so either
    /// backend variant accepts it. Yields the account when the backend
    /// includes it in the response.
    pub fn login(&self, identifier: &str, password: &str) -> Result<Option<User>> {
        let identifier = identifier.trim();
        let password = password.trim();
        if identifier.is_empty() || password.is_empty() {
            return Err(LostFoundError::Validation(FILL_ALL_FIELDS.to_string()));
        }

        let body = json!({
            "identifier": identifier,
            "email": identifier,
            "password": password,
        });
        self.submit_login(&body)
    }

    /// Create an account, then sign in with the new credentials.
    ///
    /// Returns `Ok(true)` when the follow-up sign-in stored a session and
    /// `Ok(false)` when the account exists but the user has to log in by
    /// hand.
    pub fn register(&self, form: &RegistrationForm) -> Result<bool> {
        let name = form.name.trim();
        let phone = form.phone.trim();
        let email = form.email.trim();
        let password = form.password.trim();
        let confirm = form.password_confirm.trim();

        if [name, phone, email, password, confirm]
            .iter()
            .any(|f| f.is_empty())
        {
            return Err(LostFoundError::Validation(FILL_ALL_FIELDS.to_string()));
        }
        if password != confirm {
            return Err(LostFoundError::Validation(
                "Passwords do not match.".to_string(),
            ));
        }

        let body = json!({
            "name": name,
            "phone": phone,
            "email": email,
            "password": password,
            "password_confirm": confirm,
        });
        let reply = self.transport.post_json(config::REGISTER_PATH, None, &body)?;
        let data: Ack = reply.json().unwrap_or_default();
        if !data.success {
            return Err(LostFoundError::Auth(
                data.message
                    .unwrap_or_else(|| "Registration failed.".to_string()),
            ));
        }
        tracing::info!("account registered");

        let credentials = json!({ "email": email, "password": password });
        match self.submit_login(&credentials) {
            Ok(_) => Ok(self.is_active()),
            Err(e) => {
                tracing::warn!(error = %e, "sign-in after registration failed");
                Ok(false)
            }
        }
    }

    fn submit_login(&self, body: &serde_json::Value) -> Result<Option<User>> {
        let reply = self.transport.post_json(config::LOGIN_PATH, None, body)?;
        let data: LoginResponse = reply.json().unwrap_or_default();

        if !data.success {
            return Err(LostFoundError::Auth(
                data.message.unwrap_or_else(|| "Login failed".to_string()),
            ));
        }

        match data.access() {
            Some(access) => self.store_tokens(access, data.refresh())?,
            None => tracing::warn!("login succeeded without an access token"),
        }
        tracing::info!("logged in");
        Ok(data.user)
    }

    /// `GET` a path with the stored bearer token.
    ///
    /// A 401 while a refresh token is stored ends the session, since the
    /// backend offers no refresh exchange. The reply is returned either way.
    pub fn get_authorized(&self, path: &str) -> Result<HttpReply> {
        let token = self.token();
        let reply = self.transport.get_json(path, token.as_deref())?;

        if reply.status == 401 && self.has_refresh_token() {
            tracing::info!(%path, "access token rejected, signing out");
            self.logout()?;
        }
        Ok(reply)
    }

    /// Check the stored token against the current-user endpoint.
    ///
    /// Without a token nothing is sent and `Ok(None)` is returned. A
    /// rejected token, an unexpected body or a transport failure signs the
    /// user out and also yields `Ok(None)`.
    pub fn validate(&self) -> Result<Option<User>> {
        if !self.is_active() {
            return Ok(None);
        }

        let outcome = self.get_authorized(config::CURRENT_USER_PATH).and_then(|reply| {
            if !reply.is_success() {
                return Err(LostFoundError::Auth(format!(
                    "session rejected with status {}",
                    reply.status
                )));
            }
            reply.json::<CurrentUser>()
        });

        match outcome {
            Ok(CurrentUser {
                success: true,
                user: Some(user),
            }) => Ok(Some(user)),
            Ok(_) => {
                tracing::warn!("current-user response without an account");
                self.logout()?;
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "session invalid or expired");
                self.logout()?;
                Ok(None)
            }
        }
    }

    fn has_refresh_token(&self) -> bool {
        matches!(
            self.storage.get(config::REFRESH_TOKEN_KEY),
            Ok(Some(ref t)) if is_usable_token(t)
        )
    }

    /// Notify the backend and drop both tokens.
    ///
    /// The server call is best effort: local tokens are cleared even when it
    /// fails.
    pub fn logout(&self) -> Result<()> {
        if let Some(token) = self.token() {
            match self
                .transport
                .post_json(config::LOGOUT_PATH, Some(&token), &json!({}))
            {
                Ok(reply) if !reply.is_success() => {
                    tracing::warn!(status = reply.status, "logout call rejected")
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "logout call failed"),
            }
        }

        self.storage.remove(config::ACCESS_TOKEN_KEY)?;
        self.storage.remove(config::REFRESH_TOKEN_KEY)?;
        tracing::info!("logged out");
        Ok(())
    }
}
