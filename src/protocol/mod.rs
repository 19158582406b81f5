//! Protocol Module
//!
//! Client-side RESP2 wire protocol: command framing and reply decoding.
//!
//! ## Command Framing (multibulk, the only emitted format)
//! ```text
//! *<argc>\r\n
//! $<len>\r\n<name>\r\n
//! $<len>\r\n<arg>\r\n
//! ...
//! ```
//! `<len>` counts encoded bytes, never characters, so arguments may carry
//! arbitrary binary content including CR/LF.
//!
//! ## Reply Framing (one of five prefixes)
//! ```text
//! +<status>\r\n          simple status ("OK" normalizes to true)
//! -<message>\r\n         server error (surfaces as RedwireError::Command)
//! :<integer>\r\n         signed base-10 integer
//! $<len>\r\n<bytes>\r\n  bulk string; len -1 is nil, no payload follows
//! *<count>\r\n<reply>*   array of replies; count -1 is nil
//! ```
//! Any other prefix byte is a fatal protocol violation.

mod codec;
mod reader;
mod reply;

pub use codec::{encode_command, read_reply};
pub use reader::ReplyReader;
pub use reply::Reply;
