//! Reply Reader
//!
//! Incremental reader over a blocking byte source. The wire protocol mixes
//! CRLF-delimited ASCII header lines with raw binary payloads of declared
//! length, so a plain line-oriented reader would corrupt payloads containing
//! embedded CR/LF bytes. This reader exposes exactly the two primitives the
//! decode path needs.
//!
//! Error classification: a source that ends mid-reply is a transport error
//! (the reconnect path may retry it once); bytes that are present but
//! malformed are protocol violations and fatal.

use std::io::BufRead;

use crate::error::{RedwireError, Result};

/// Buffered reply reader over a blocking byte source
pub struct ReplyReader<R> {
    inner: R,
}

impl<R: BufRead> ReplyReader<R> {
    /// Wrap a buffered source
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read the single reply-type prefix byte
    pub fn read_prefix(&mut self) -> Result<u8> {
        let mut prefix = [0u8; 1];
        self.inner.read_exact(&mut prefix)?;
        Ok(prefix[0])
    }

    /// Read bytes until CRLF, returning the line with the terminator
    /// discarded
    ///
    /// The line must be valid UTF-8; header lines are ASCII on the wire.
    pub fn read_line(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        let read = self.inner.read_until(b'\n', &mut buf)?;
        if read == 0 || buf.last() != Some(&b'\n') {
            // Source exhausted before the terminator arrived.
            return Err(unexpected_eof());
        }
        if buf.len() < 2 || buf[buf.len() - 2] != b'\r' {
            return Err(RedwireError::Protocol(
                "reply line not terminated by CRLF".to_string(),
            ));
        }
        buf.truncate(buf.len() - 2);
        String::from_utf8(buf)
            .map_err(|_| RedwireError::Protocol("reply line is not valid UTF-8".to_string()))
    }

    /// Read exactly `n` raw payload bytes, then consume the trailing CRLF
    /// that always follows a bulk payload
    pub fn read_exact_payload(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut payload = vec![0u8; n];
        self.inner.read_exact(&mut payload)?;

        let mut crlf = [0u8; 2];
        self.inner.read_exact(&mut crlf)?;
        if crlf != [b'\r', b'\n'] {
            return Err(RedwireError::Protocol(
                "bulk payload not terminated by CRLF".to_string(),
            ));
        }
        Ok(payload)
    }
}

fn unexpected_eof() -> RedwireError {
    RedwireError::Transport(std::io::Error::new(
        std::io::ErrorKind::UnexpectedEof,
        "stream ended mid-reply",
    ))
}
