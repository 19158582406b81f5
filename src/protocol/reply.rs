//! Reply definitions
//!
//! Typed reply values produced by the decode path. Decoding is
//! type-transparent to the wire format: the only normalization applied here
//! is folding the literal `+OK` status into a boolean.

/// A decoded RESP2 reply
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Nil bulk string (`$-1`) or nil array (`*-1`)
    Nil,

    /// The literal `+OK` status
    Bool(bool),

    /// Any other `+` status line, verbatim
    Status(String),

    /// `:` integer reply
    Integer(i64),

    /// `$` bulk string payload, binary-safe
    Bulk(Vec<u8>),

    /// `*` array reply; elements may include `Nil`
    Array(Vec<Reply>),
}

impl Reply {
    /// Integer payload, if this is an integer reply
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Reply::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Bulk payload as UTF-8 text, if this is a valid-UTF-8 bulk reply
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Bulk(bytes) => std::str::from_utf8(bytes).ok(),
            Reply::Status(text) => Some(text),
            _ => None,
        }
    }

    /// True for the nil reply
    pub fn is_nil(&self) -> bool {
        matches!(self, Reply::Nil)
    }
}
