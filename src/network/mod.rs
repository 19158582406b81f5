//! Network Module
//!
//! The single blocking TCP connection and its lifecycle.
//!
//! ## Architecture
//! - One connection, exclusively owned by one client
//! - Buffered read/write halves over a cloned stream
//! - Reopened by the client's reconnect path on transport failure

mod connection;

pub use connection::Connection;
