//! crates/chalkboard_core/src/stores/mod.rs
//!
//! The three state containers and their shared request-lifecycle flags.
//! Each store owns its slice of state exclusively; operations take
//! `&mut self`, apply the network settlement atomically, and convert every
//! failure into the store's error field instead of propagating it.

pub mod lifecycle;
pub mod playlist;
pub mod session;
pub mod video;

pub use lifecycle::{ErrorKind, OperationError, RequestLifecycle};
pub use playlist::{PlaylistState, PlaylistStore};
pub use session::{SessionState, SessionStore};
pub use video::{VideoState, VideoStore};
