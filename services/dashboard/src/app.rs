//! services/dashboard/src/app.rs
//!
//! Wires the configuration and the concrete adapters into the three stores.

use std::sync::Arc;

use chalkboard_core::stores::{PlaylistStore, SessionStore, VideoStore};

use crate::adapters::{FileTokenStore, HttpGatewayAdapter};
use crate::config::Config;

/// The application state: one store per state slice, all dispatching
/// through the same gateway. Each store owns its slice exclusively; the
/// session store additionally owns the durable token storage.
pub struct App {
    pub session: SessionStore,
    pub playlists: PlaylistStore,
    pub videos: VideoStore,
}

impl App {
    /// Builds the adapters from `config` and seeds the session store from
    /// durable token storage.
    pub fn new(config: &Config) -> Self {
        let gateway: Arc<HttpGatewayAdapter> = Arc::new(HttpGatewayAdapter::new(
            reqwest::Client::new(),
            config.api_base_url.clone(),
        ));
        let tokens = Arc::new(FileTokenStore::new(config.token_path.clone()));

        Self {
            session: SessionStore::new(gateway.clone(), tokens),
            playlists: PlaylistStore::new(gateway.clone()),
            videos: VideoStore::new(gateway),
        }
    }
}
