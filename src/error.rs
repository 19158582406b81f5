//! Error types for Redwire
//!
//! Provides a unified error type for all client operations.

use thiserror::Error;

/// Result type alias using RedwireError
pub type Result<T> = std::result::Result<T, RedwireError>;

/// Unified error type for Redwire operations
///
/// The variants split along the retry policy: `Transport` is the only
/// retry-eligible failure, `Protocol` is fatal for the connection, and
/// `Command` is a plain server-side rejection that leaves the connection
/// usable.
#[derive(Debug, Error)]
pub enum RedwireError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Socket-level failure on write or read, including an unexpected end
    /// of stream. Absorbed once by the reconnect-and-retry cycle; a second
    /// occurrence for the same command is fatal.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// The server sent bytes that do not match any expected reply framing.
    /// The stream is desynchronized, so the connection is dropped and the
    /// command is never resent.
    #[error("protocol violation: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Server Errors
    // -------------------------------------------------------------------------
    /// The server returned an explicit error reply (`-` prefix). The
    /// connection remains usable.
    #[error("server error: {0}")]
    Command(String),

    // -------------------------------------------------------------------------
    // Usage Errors
    // -------------------------------------------------------------------------
    /// Command name not present in the command table. Raised before any I/O.
    #[error("unsupported command: {0}")]
    UnsupportedCommand(String),

    /// An operation requiring an open connection was invoked with none.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),
}

impl RedwireError {
    /// True for failures the dispatcher may answer with its single
    /// reconnect-and-retry cycle.
    pub fn is_transport(&self) -> bool {
        matches!(self, RedwireError::Transport(_))
    }
}
