//! # Redwire
//!
//! A synchronous Redis (RESP2) wire-protocol client with:
//! - Multibulk command framing (binary-safe, byte-length prefixed)
//! - Typed reply decoding for the five documented reply prefixes
//! - A single blocking TCP connection with one-shot reconnect-and-retry
//! - Command-keyed post-processing of decoded replies
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Client                              │
//! │        (command table · retry policy · post-process)        │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │ encode                       │ decode
//!                ▼                              ▼
//!        ┌─────────────┐                ┌──────────────┐
//!        │ Frame Codec │                │ Reply Reader │
//!        └──────┬──────┘                └──────┬───────┘
//!               │ frame bytes                  │ buffered reads
//!               ▼                              │
//!        ┌─────────────────────────────────────┴──────┐
//!        │                 Connection                 │
//!        │        (one blocking TCP stream)           │
//!        └────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod command;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RedwireError, Result};
pub use config::Config;
pub use client::Client;
pub use command::{SortOptions, Value};
pub use protocol::Reply;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Redwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
