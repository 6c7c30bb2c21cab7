//! crates/chalkboard_core/src/stores/session.rs
//!
//! The session store: the authenticated teacher, the bearer token, and the
//! lifecycle of the register / login / profile-fetch / course-create /
//! logout operations.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::domain::{Credentials, NewCourse, RegisterProfile, Teacher};
use crate::ports::{ApiGateway, PortError, TokenStore};
use crate::stores::lifecycle::{OperationError, RequestLifecycle};

//=========================================================================================
// Session State
//=========================================================================================

/// The session store's snapshot, read by the view layer.
///
/// `token` mirrors durable storage after every successful login and logout.
/// `success` is set only by register/login (and cleared by logout); the
/// other operations leave it alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub teacher: Option<Teacher>,
    pub token: Option<String>,
    pub lifecycle: RequestLifecycle,
    pub success: bool,
}

//=========================================================================================
// Session Store
//=========================================================================================

/// Owns the [`SessionState`] and applies settlements to it.
///
/// Failures never propagate to the caller; every outcome is observable on
/// the state snapshot. A settlement arriving after the store's cancellation
/// token fired is discarded wholesale.
pub struct SessionStore {
    gateway: Arc<dyn ApiGateway>,
    tokens: Arc<dyn TokenStore>,
    cancellation: CancellationToken,
    state: SessionState,
}

impl SessionStore {
    /// Creates the store, seeding the token from durable storage.
    pub fn new(gateway: Arc<dyn ApiGateway>, tokens: Arc<dyn TokenStore>) -> Self {
        let token = tokens.load();
        Self {
            gateway,
            tokens,
            cancellation: CancellationToken::new(),
            state: SessionState {
                token,
                ..SessionState::default()
            },
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The route guard: a teacher record is present.
    pub fn is_authenticated(&self) -> bool {
        self.state.teacher.is_some()
    }

    /// A handle that discards this store's in-flight settlement when fired.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Replaces a fired cancellation token so new operations can run.
    pub fn reset_cancellation(&mut self) {
        self.cancellation = CancellationToken::new();
    }

    /// Submits the full registration payload. On success the store adopts
    /// the returned teacher and token; the token is not persisted (only
    /// login and logout touch durable storage).
    pub async fn register(&mut self, profile: &RegisterProfile) {
        self.state.lifecycle.begin();
        self.state.success = false;

        let settled = self.gateway.register(profile).await;
        if self.cancellation.is_cancelled() {
            self.state.lifecycle.reset();
            return;
        }

        match settled {
            Ok(session) => {
                self.state.teacher = Some(session.teacher);
                self.state.token = Some(session.token);
                self.state.success = true;
                self.state.lifecycle.finish();
            }
            Err(error) => {
                self.state.success = false;
                self.state
                    .lifecycle
                    .fail(OperationError::from_port(&error, "Registration failed"));
            }
        }
    }

    /// Submits email + password. On success the store adopts the returned
    /// teacher and token and persists the token to durable storage.
    pub async fn login(&mut self, credentials: &Credentials) {
        self.state.lifecycle.begin();
        self.state.success = false;

        let settled = self.gateway.login(credentials).await;
        if self.cancellation.is_cancelled() {
            self.state.lifecycle.reset();
            return;
        }

        match settled {
            Ok(session) => {
                self.tokens.save(&session.token);
                self.state.teacher = Some(session.teacher);
                self.state.token = Some(session.token);
                self.state.success = true;
                self.state.lifecycle.finish();
            }
            Err(error) => {
                self.state.success = false;
                self.state
                    .lifecycle
                    .fail(OperationError::from_port(&error, "Login failed"));
            }
        }
    }

    /// Replaces the whole teacher record (including nested playlists).
    /// Fails locally, without a network call, when no token is held.
    pub async fn get_profile(&mut self) {
        self.state.lifecycle.begin();

        let Some(token) = self.state.token.clone() else {
            self.state.lifecycle.fail(OperationError::from_port(
                &PortError::Unauthorized,
                "Failed to fetch profile",
            ));
            return;
        };

        let settled = self.gateway.fetch_profile(&token).await;
        if self.cancellation.is_cancelled() {
            self.state.lifecycle.reset();
            return;
        }

        match settled {
            Ok(teacher) => {
                self.state.teacher = Some(teacher);
                self.state.lifecycle.finish();
            }
            Err(error) => {
                self.state
                    .lifecycle
                    .fail(OperationError::from_port(&error, "Failed to fetch profile"));
            }
        }
    }

    /// Submits the multipart course form. Success resolves the lifecycle
    /// and nothing else: no teacher or playlist collection is touched, so
    /// callers needing the new course must refetch. With no token held the
    /// call proceeds unauthenticated and the server decides rejection.
    pub async fn create_course(&mut self, course: NewCourse) {
        self.state.lifecycle.begin();

        let settled = self
            .gateway
            .create_course(self.state.token.clone(), course)
            .await;
        if self.cancellation.is_cancelled() {
            self.state.lifecycle.reset();
            return;
        }

        match settled {
            Ok(()) => self.state.lifecycle.finish(),
            Err(error) => {
                self.state
                    .lifecycle
                    .fail(OperationError::from_port(&error, "Course creation failed"));
            }
        }
    }

    /// Unconditionally clears the teacher, the token, durable storage, and
    /// the success flag. Cannot fail.
    pub fn logout(&mut self) {
        self.tokens.clear();
        self.state.teacher = None;
        self.state.token = None;
        self.state.success = false;
    }
}

//=========================================================================================
// Tests
//=========================================================================================
