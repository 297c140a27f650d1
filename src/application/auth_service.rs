use crate::domain::notice::{LOGIN_FAILURE, LOGIN_INCOMPLETE};
use crate::domain::repository::{AuthApi, SessionStore};
use crate::domain::route::Route;
use crate::domain::session::{Credentials, Session};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace, warn};

/// Login form state.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Idle,
    Submitting,
    Authenticated(Session),
    Failed(String),
}

impl AuthState {
    /// `Idle`/`Failed` move to `Submitting`, clearing any prior error. Any
    /// other state is handed back unchanged as the error value.
    pub fn begin_submit(self) -> Result<AuthState, AuthState> {
        match self {
            AuthState::Idle | AuthState::Failed(_) => Ok(AuthState::Submitting),
            other => Err(other),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AuthState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub state: AuthState,
    pub navigate_to: Option<Route>,
}

pub struct AuthService<A: AuthApi, S: SessionStore> {
    api: Arc<A>,
    sessions: Arc<S>,
}

impl<A: AuthApi, S: SessionStore> AuthService<A, S> {
    pub fn new(api: Arc<A>, sessions: Arc<S>) -> Self {
        Self { api, sessions }
    }

    #[instrument(skip(self, state, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, state: AuthState, credentials: Credentials) -> AuthOutcome {
        trace!("Starting login");

        let submitting = match state.begin_submit() {
            Ok(submitting) => submitting,
            Err(unchanged) => {
                warn!(state = ?unchanged, "Login submitted from a state that does not accept it");
                return AuthOutcome {
                    state: unchanged,
                    navigate_to: None,
                };
            }
        };
        debug!(state = ?submitting, "Login submitted");

        if !credentials.is_complete() {
            warn!("Login attempted with missing username or password");
            return AuthOutcome {
                state: AuthState::Failed(LOGIN_INCOMPLETE.to_string()),
                navigate_to: None,
            };
        }

        match self.authenticate(&credentials).await {
            Ok(session) => {
                info!(user = %session.display_name(), "Login successful");
                AuthOutcome {
                    state: AuthState::Authenticated(session),
                    navigate_to: Some(Route::Catalog),
                }
            }
            Err(e) => {
                // The cause stays in the log; the user only sees the generic message.
                error!(error = %e, "Login failed");
                AuthOutcome {
                    state: AuthState::Failed(LOGIN_FAILURE.to_string()),
                    navigate_to: None,
                }
            }
        }
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        let token = self.api.login(credentials).await?;
        let profile = self.api.fetch_profile(&token).await?;
        let session = Session::new(profile, token);
        self.sessions.save(&session).await?;
        Ok(session)
    }

    pub async fn current_session(&self) -> Result<Option<Session>> {
        self.sessions.load().await
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<AuthOutcome> {
        self.sessions.clear().await?;
        info!("Logged out");
        Ok(AuthOutcome {
            state: AuthState::Idle,
            navigate_to: Some(Route::Login),
        })
    }
}
