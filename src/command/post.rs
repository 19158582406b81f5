//! Result post-processing
//!
//! Command-specific light transforms applied to the generically decoded
//! reply. The numeric-string sniffing used by the INFO and LASTSAVE
//! transforms lives here and only here; the decode path stays transparent
//! to the wire format.

use std::collections::HashMap;
use std::fmt;

use crate::protocol::Reply;
use super::table::PostOp;

/// A post-processed, caller-facing value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Nil reply (missing key, nil array)
    Nil,

    /// Boolean (`+OK`, or a boolean-valued integer reply)
    Bool(bool),

    /// Integer reply or numeric-looking integer text
    Int(i64),

    /// Numeric-looking decimal text
    Float(f64),

    /// Status line or valid-UTF-8 bulk payload
    Text(String),

    /// Bulk payload that is not valid UTF-8
    Bytes(Vec<u8>),

    /// Array reply; elements may include `Nil`
    Array(Vec<Value>),

    /// Parsed INFO output
    Map(HashMap<String, Value>),
}

impl Value {
    /// Text payload, if this value carries one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Integer payload, if this value carries one
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "(nil)"),
            Value::Bool(value) => write!(f, "{}", value),
            Value::Int(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", value),
            Value::Text(text) => write!(f, "{}", text),
            Value::Bytes(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
            Value::Array(elements) => {
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) {}", index + 1, element)?;
                }
                Ok(())
            }
            Value::Map(entries) => {
                let mut keys: Vec<&String> = entries.keys().collect();
                keys.sort();
                for (index, key) in keys.iter().enumerate() {
                    if index > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}: {}", key, entries[*key])?;
                }
                Ok(())
            }
        }
    }
}

impl From<Reply> for Value {
    fn from(reply: Reply) -> Self {
        match reply {
            Reply::Nil => Value::Nil,
            Reply::Bool(value) => Value::Bool(value),
            Reply::Status(text) => Value::Text(text),
            Reply::Integer(value) => Value::Int(value),
            Reply::Bulk(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Value::Text(text),
                Err(err) => Value::Bytes(err.into_bytes()),
            },
            Reply::Array(elements) => {
                Value::Array(elements.into_iter().map(Value::from).collect())
            }
        }
    }
}

/// Apply a command's transform to its decoded reply
pub fn post_process(op: PostOp, reply: Reply) -> Value {
    match op {
        PostOp::Identity => Value::from(reply),
        PostOp::IntToBool => match reply {
            Reply::Integer(value) => Value::Bool(value != 0),
            other => Value::from(other),
        },
        PostOp::InfoMap => match reply {
            Reply::Bulk(bytes) => Value::Map(parse_info(&String::from_utf8_lossy(&bytes))),
            other => Value::from(other),
        },
        PostOp::NumberFromText => match reply {
            Reply::Integer(value) => Value::Int(value),
            Reply::Bulk(bytes) => match String::from_utf8(bytes) {
                Ok(text) => maybe_number(&text),
                Err(err) => Value::Bytes(err.into_bytes()),
            },
            other => Value::from(other),
        },
    }
}

/// Parse an INFO-style `key:value` CRLF-delimited blob into a map
///
/// Lines without a colon (blank lines, `#` section headers) are skipped.
fn parse_info(blob: &str) -> HashMap<String, Value> {
    let mut entries = HashMap::new();
    for line in blob.split("\r\n") {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        entries.insert(key.to_string(), maybe_number(value));
    }
    entries
}

/// Convert numeric-looking text to a number, leaving everything else as text
///
/// All ASCII digits parse as an integer; digits-dot-digits parse as a float.
fn maybe_number(text: &str) -> Value {
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(value) = text.parse::<i64>() {
            return Value::Int(value);
        }
    }
    if let Some((whole, frac)) = text.split_once('.') {
        let both_digits = !whole.is_empty()
            && !frac.is_empty()
            && whole.bytes().all(|b| b.is_ascii_digit())
            && frac.bytes().all(|b| b.is_ascii_digit());
        if both_digits {
            if let Ok(value) = text.parse::<f64>() {
                return Value::Float(value);
            }
        }
    }
    Value::Text(text.to_string())
}
