//! crates/chalkboard_core/src/stores/video.rs
//!
//! The video store: a single flat collection mutated by add / update /
//! delete, with one shared request lifecycle.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::domain::{NewVideo, Video, VideoUpdate};
use crate::ports::ApiGateway;
use crate::stores::lifecycle::{OperationError, RequestLifecycle};

//=========================================================================================
// Video State
//=========================================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoState {
    pub videos: Vec<Video>,
    pub lifecycle: RequestLifecycle,
}

//=========================================================================================
// Video Store
//=========================================================================================

pub struct VideoStore {
    gateway: Arc<dyn ApiGateway>,
    cancellation: CancellationToken,
    state: VideoState,
}

impl VideoStore {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self {
            gateway,
            cancellation: CancellationToken::new(),
            state: VideoState::default(),
        }
    }

    pub fn state(&self) -> &VideoState {
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

    /// Uploads a video to the playlist and appends the server's record to
    /// the flat collection. No playlist entity's embedded `videos` held
    /// elsewhere is spliced; callers relying on one must refetch it.
    pub async fn add_to_playlist(&mut self, playlist_id: &str, video: NewVideo) {
        self.state.lifecycle.begin();

        let settled = self.gateway.add_video(playlist_id, video).await;
        if self.cancellation.is_cancelled() {
            self.state.lifecycle.reset();
            return;
        }

        match settled {
            Ok(video) => {
                self.state.videos.push(video);
                self.state.lifecycle.finish();
            }
            Err(error) => self
                .state
                .lifecycle
                .fail(OperationError::from_port(&error, "Failed to add video")),
        }
    }

    /// Replaces the entity with the returned record's id in place;
    /// collection order and length are preserved. Entities are matched by
    /// id, never by index.
    pub async fn update(&mut self, video_id: &str, update: &VideoUpdate) {
        self.state.lifecycle.begin();

        let settled = self.gateway.update_video(video_id, update).await;
        if self.cancellation.is_cancelled() {
            self.state.lifecycle.reset();
            return;
        }

        match settled {
            Ok(updated) => {
                if let Some(slot) = self.state.videos.iter_mut().find(|v| v.id == updated.id) {
                    *slot = updated;
                }
                self.state.lifecycle.finish();
            }
            Err(error) => self
                .state
                .lifecycle
                .fail(OperationError::from_port(&error, "Failed to update video")),
        }
    }

    /// On success removes the entity with the matching id.
    pub async fn delete(&mut self, video_id: &str) {
        self.state.lifecycle.begin();

        let settled = self.gateway.delete_video(video_id).await;
        if self.cancellation.is_cancelled() {
            self.state.lifecycle.reset();
            return;
        }

        match settled {
            Ok(()) => {
                self.state.videos.retain(|video| video.id != video_id);
                self.state.lifecycle.finish();
            }
            Err(error) => self
                .state
                .lifecycle
                .fail(OperationError::from_port(&error, "Failed to delete video")),
        }
    }
}

//=========================================================================================
// Tests
//=========================================================================================
