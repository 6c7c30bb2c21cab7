//! crates/chalkboard_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! stores to be independent of the concrete HTTP client and token storage.

use async_trait::async_trait;

use crate::domain::{
    Credentials, NewCourse, NewVideo, Playlist, RegisterProfile, Teacher, TeacherSession, Video,
    VideoUpdate,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
///
/// Every failure surfaces as one of three shapes: the server rejected the
/// call (with a `message` field when the error body carried one), the call
/// never produced a usable response, or a protected call ran with no token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("{}", .message.as_deref().unwrap_or("request rejected"))]
    Rejected { message: Option<String> },
    #[error("network error: {0}")]
    Network(String),
    #[error("Unauthorized")]
    Unauthorized,
}

impl PortError {
    /// The server-provided message when there is one, otherwise the
    /// caller's operation-specific fallback.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            PortError::Rejected {
                message: Some(message),
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The REST gateway the stores dispatch through. One method per endpoint;
/// the concrete adapter owns paths, envelopes, and auth headers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiGateway: Send + Sync {
    // --- Teacher Endpoints ---
    async fn register(&self, profile: &RegisterProfile) -> PortResult<TeacherSession>;

    async fn login(&self, credentials: &Credentials) -> PortResult<TeacherSession>;

    async fn fetch_profile(&self, token: &str) -> PortResult<Teacher>;

    /// Submits the course form. With `token` absent the call proceeds
    /// unauthenticated and the server decides rejection.
    async fn create_course(&self, token: Option<String>, course: NewCourse) -> PortResult<()>;

    // --- Playlist Endpoints ---
    async fn fetch_all_playlists(&self) -> PortResult<Vec<Playlist>>;

    async fn fetch_playlist(&self, playlist_id: &str) -> PortResult<Playlist>;

    async fn fetch_teacher_playlists(&self, teacher_id: &str) -> PortResult<Vec<Playlist>>;

    async fn delete_playlist(&self, playlist_id: &str) -> PortResult<()>;

    // --- Video Endpoints ---
    async fn add_video(&self, playlist_id: &str, video: NewVideo) -> PortResult<Video>;

    async fn update_video(&self, video_id: &str, update: &VideoUpdate) -> PortResult<Video>;

    async fn delete_video(&self, video_id: &str) -> PortResult<()>;
}

/// Durable client-side storage for the auth token: a single-slot register
/// with last-write-wins semantics, read once at store construction.
///
/// Implementations must not fail the caller (logout cannot fail); storage
/// errors are swallowed and logged at the adapter edge.
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    /// The token persisted by the last `save`, if any.
    fn load(&self) -> Option<String>;

    fn save(&self, token: &str);

    fn clear(&self);
}
