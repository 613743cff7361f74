//! Sign-in, registration and account settings.

use reqwest::Method;
use tracing::{info, instrument, warn};
use validator::Validate;

use cloudbox_core::config::api::ApiConfig;
use cloudbox_core::error::{AppError, ErrorKind};
use cloudbox_core::result::AppResult;
use cloudbox_entity::user::{
    Credentials, LoginResponse, PasswordChange, ProfileUpdate, Registration, UserProfile,
};

use super::ApiClient;
use crate::session::Session;

fn validation_error(err: validator::ValidationErrors) -> AppError {
    let message = err
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("Invalid {field}"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ");
    AppError::with_source(ErrorKind::Validation, message, err)
}

/// Obtains and checks bearer tokens. Produces the [`Session`] handed to
/// [`crate::HttpFacade`].
#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    /// Build an anonymous client against `config.base_url`.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        Ok(Self {
            api: ApiClient::new(config, &config.base_url, None)?,
        })
    }

    /// Exchange credentials for a session.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> AppResult<Session> {
        credentials.validate().map_err(validation_error)?;

        let url = self.api.url("auth/login", &[])?;
        let response: LoginResponse = self
            .api
            .send(self.api.request(Method::POST, url).json(credentials))
            .await?;

        if response.access_token.is_empty() {
            return Err(AppError::authentication("Server returned an empty token"));
        }
        info!("Signed in");
        Ok(Session::authenticated(
            self.api.base_url(),
            response.access_token,
        ))
    }

    /// Create an account. Does not sign in.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> AppResult<UserProfile> {
        registration.validate().map_err(validation_error)?;

        let url = self.api.url("auth/register", &[])?;
        self.api
            .send(self.api.request(Method::POST, url).json(registration))
            .await
    }

    /// Tell the server the token is being discarded. Tokens are stateless on
    /// the backend, so a failure here is logged and ignored.
    #[instrument(skip(self, session))]
    pub async fn logout(&self, session: &Session) {
        if !session.is_authenticated() {
            return;
        }
        let api = self.api.with_token(session.token.clone());
        let result = match api.url("auth/logout", &[]) {
            Ok(url) => api.send_unit(api.request(Method::POST, url)).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            warn!(error = %e, "Logout request failed");
        }
    }

    fn signed_in(&self, session: &Session) -> AppResult<ApiClient> {
        if !session.is_authenticated() {
            return Err(AppError::authentication("Not signed in"));
        }
        Ok(self.api.with_token(session.token.clone()))
    }

    /// The account behind `session`.
    #[instrument(skip(self, session))]
    pub async fn profile(&self, session: &Session) -> AppResult<UserProfile> {
        let api = self.signed_in(session)?;
        let url = api.url("users/me", &[])?;
        api.send(api.request(Method::GET, url)).await
    }

    /// Change the display name.
    #[instrument(skip(self, session))]
    pub async fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> AppResult<UserProfile> {
        update.validate().map_err(validation_error)?;
        let api = self.signed_in(session)?;
        let url = api.url("users/me", &[])?;
        let profile = api.send(api.request(Method::PUT, url).json(update)).await?;
        info!("Profile updated");
        Ok(profile)
    }

    /// Replace the password. The server checks `current_password`.
    #[instrument(skip(self, session, change))]
    pub async fn change_password(
        &self,
        session: &Session,
        change: &PasswordChange,
    ) -> AppResult<()> {
        change.validate().map_err(validation_error)?;
        let api = self.signed_in(session)?;
        let url = api.url("users/me/password", &[])?;
        api.send_unit(api.request(Method::PUT, url).json(change)).await?;
        info!("Password changed");
        Ok(())
    }

    /// Whether `session` still holds a token the server accepts.
    pub async fn validate_token(&self, session: &Session) -> AppResult<bool> {
        match self.profile(session).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind == ErrorKind::Authentication => Ok(false),
            Err(e) => Err(e),
        }
    }
}
