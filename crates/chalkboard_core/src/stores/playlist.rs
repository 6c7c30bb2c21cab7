//! crates/chalkboard_core/src/stores/playlist.rs
//!
//! The playlist store: the global list, the single "current" playlist, the
//! teacher-scoped list, and one shared request lifecycle.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::domain::Playlist;
use crate::ports::ApiGateway;
use crate::stores::lifecycle::{OperationError, RequestLifecycle};

//=========================================================================================
// Playlist State
//=========================================================================================

/// Three independent collections holding the same logical entities. A fetch
/// replaces its own collection wholesale and leaves the other two alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistState {
    pub all: Vec<Playlist>,
    pub current: Option<Playlist>,
    pub by_teacher: Vec<Playlist>,
    pub lifecycle: RequestLifecycle,
}

//=========================================================================================
// Playlist Store
//=========================================================================================

pub struct PlaylistStore {
    gateway: Arc<dyn ApiGateway>,
    cancellation: CancellationToken,
    state: PlaylistState,
}

impl PlaylistStore {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self {
            gateway,
            cancellation: CancellationToken::new(),
            state: PlaylistState::default(),
        }
    }

    pub fn state(&self) -> &PlaylistState {
        &self.state
    }

    /// A handle that discards this store's in-flight settlement when fired.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Replaces a fired cancellation token so new operations can run.
    pub fn reset_cancellation(&mut self) {
        self.cancellation = CancellationToken::new();
    }

    /// Replaces `all` wholesale on success.
    pub async fn fetch_all(&mut self) {
        self.state.lifecycle.begin();

        let settled = self.gateway.fetch_all_playlists().await;
        if self.cancellation.is_cancelled() {
            self.state.lifecycle.reset();
            return;
        }

        match settled {
            Ok(playlists) => {
                self.state.all = playlists;
                self.state.lifecycle.finish();
            }
            Err(error) => self.state.lifecycle.fail(OperationError::from_port(
                &error,
                "Failed to fetch playlists",
            )),
        }
    }

    /// Replaces `current` wholesale on success; `all` and `by_teacher` are
    /// not touched.
    pub async fn fetch_by_id(&mut self, playlist_id: &str) {
        self.state.lifecycle.begin();

        let settled = self.gateway.fetch_playlist(playlist_id).await;
        if self.cancellation.is_cancelled() {
            self.state.lifecycle.reset();
            return;
        }

        match settled {
            Ok(playlist) => {
                self.state.current = Some(playlist);
                self.state.lifecycle.finish();
            }
            Err(error) => self
                .state
                .lifecycle
                .fail(OperationError::from_port(&error, "Failed to fetch playlist")),
        }
    }

    /// Replaces `by_teacher` wholesale on success.
    pub async fn fetch_by_teacher(&mut self, teacher_id: &str) {
        self.state.lifecycle.begin();

        let settled = self.gateway.fetch_teacher_playlists(teacher_id).await;
        if self.cancellation.is_cancelled() {
            self.state.lifecycle.reset();
            return;
        }

        match settled {
            Ok(playlists) => {
                self.state.by_teacher = playlists;
                self.state.lifecycle.finish();
            }
            Err(error) => self.state.lifecycle.fail(OperationError::from_port(
                &error,
                "Failed to fetch teacher playlists",
            )),
        }
    }

    /// On success removes the entity from both `all` and `by_teacher`.
    /// `current` is not touched, even when it holds the deleted id; a
    /// stale reference may remain until the next fetch.
    pub async fn delete(&mut self, playlist_id: &str) {
        self.state.lifecycle.begin();

        let settled = self.gateway.delete_playlist(playlist_id).await;
        if self.cancellation.is_cancelled() {
            self.state.lifecycle.reset();
            return;
        }

        match settled {
            Ok(()) => {
                self.state.all.retain(|playlist| playlist.id != playlist_id);
                self.state
                    .by_teacher
                    .retain(|playlist| playlist.id != playlist_id);
                self.state.lifecycle.finish();
            }
            Err(error) => self.state.lifecycle.fail(OperationError::from_port(
                &error,
                "Failed to delete playlist",
            )),
        }
    }
}

//=========================================================================================
// Tests
//=========================================================================================
