//! crates/chalkboard_core/src/stores/lifecycle.rs
//!
//! The pending/error flag pair every store carries, and the error record a
//! rejected settlement leaves behind.

use std::fmt;

use crate::ports::PortError;

/// Which failure class produced a store error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A protected operation ran without a token; no network call was made.
    Authorization,
    /// The call never reached the server, or no usable response arrived.
    Network,
    /// The server responded with a non-success status.
    Rejection,
}

/// The error a store retains after a rejected settlement.
///
/// `message` is the user-visible text: the server's message when one was
/// parseable, otherwise the operation's fallback string. `kind` tags the
/// failure class without changing that text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationError {
    pub kind: ErrorKind,
    pub message: String,
}

impl OperationError {
    pub fn from_port(error: &PortError, fallback: &str) -> Self {
        let kind = match error {
            PortError::Unauthorized => ErrorKind::Authorization,
            PortError::Network(_) => ErrorKind::Network,
            PortError::Rejected { .. } => ErrorKind::Rejection,
        };
        Self {
            kind,
            message: error.message_or(fallback),
        }
    }
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Tracks one in-flight or settled asynchronous operation.
///
/// Reset to pending (previous error cleared) at call start; resolved to
/// exactly one terminal shape at settlement. A store's lifecycle reflects
/// only the most recently settled call for that store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLifecycle {
    pub loading: bool,
    pub error: Option<OperationError>,
}

impl RequestLifecycle {
    /// Call start: pending, any previous error cleared.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Fulfilled settlement.
    pub fn finish(&mut self) {
        self.loading = false;
    }

    /// Rejected settlement.
    pub fn fail(&mut self, error: OperationError) {
        self.loading = false;
        self.error = Some(error);
    }

    /// Discarded settlement (cancellation): back to idle, nothing recorded.
    pub fn reset(&mut self) {
        self.loading = false;
        self.error = None;
    }
}
