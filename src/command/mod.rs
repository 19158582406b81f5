//! Command Module
//!
//! The command table consulted by the dispatcher, the SORT option builder,
//! and the per-command result post-processing applied after decode.
//!
//! Adding a command is a table entry, not a new function: every command
//! flows through the same generic dispatch, and the table entry names the
//! post-processing transform (if any) for its reply.

mod post;
mod sort;
mod table;

pub use post::{post_process, Value};
pub use sort::SortOptions;
pub use table::{CommandSpec, CommandTable, PostOp};
