//! Frame codec
//!
//! Pure conversion between commands and wire bytes. Encoding emits multibulk
//! framing only; decoding dispatches on the five documented reply prefixes.
//! Neither direction performs I/O of its own: encode appends to a caller
//! buffer, decode pulls from a [`ReplyReader`].

use std::io::BufRead;

use crate::error::{RedwireError, Result};
use super::reader::ReplyReader;
use super::reply::Reply;

/// Encode a command into RESP2 multibulk framing
///
/// Appends `*<argc>\r\n` followed by one `$<len>\r\n<bytes>\r\n` block for
/// the name and each argument. Lengths count encoded bytes, so multi-byte
/// UTF-8 arguments and raw binary arguments frame correctly. Never fails.
pub fn encode_command(name: &str, args: &[Vec<u8>], out: &mut Vec<u8>) {
    out.push(b'*');
    out.extend_from_slice((args.len() + 1).to_string().as_bytes());
    out.extend_from_slice(b"\r\n");

    push_bulk(out, name.as_bytes());
    for arg in args {
        push_bulk(out, arg);
    }
}

fn push_bulk(out: &mut Vec<u8>, bytes: &[u8]) {
    out.push(b'$');
    out.extend_from_slice(bytes.len().to_string().as_bytes());
    out.extend_from_slice(b"\r\n");
    out.extend_from_slice(bytes);
    out.extend_from_slice(b"\r\n");
}

/// Decode one complete reply from the reader
///
/// Blocks until a full reply is available. A server error reply (`-`)
/// returns [`RedwireError::Command`] rather than a usable value; an
/// unrecognized prefix byte returns [`RedwireError::Protocol`].
pub fn read_reply<R: BufRead>(reader: &mut ReplyReader<R>) -> Result<Reply> {
    match reader.read_prefix()? {
        b'+' => {
            let line = reader.read_line()?;
            if line == "OK" {
                Ok(Reply::Bool(true))
            } else {
                Ok(Reply::Status(line))
            }
        }
        b'-' => {
            let line = reader.read_line()?;
            let message = line.strip_prefix("ERR ").unwrap_or(&line);
            Err(RedwireError::Command(message.to_string()))
        }
        b':' => {
            let line = reader.read_line()?;
            let value = parse_wire_integer(&line)?;
            Ok(Reply::Integer(value))
        }
        b'$' => {
            let line = reader.read_line()?;
            let len = parse_wire_integer(&line)?;
            if len < 0 {
                return Ok(Reply::Nil);
            }
            let payload = reader.read_exact_payload(len as usize)?;
            Ok(Reply::Bulk(payload))
        }
        b'*' => {
            let line = reader.read_line()?;
            let count = parse_wire_integer(&line)?;
            if count < 0 {
                return Ok(Reply::Nil);
            }
            let mut elements = Vec::with_capacity(count as usize);
            for _ in 0..count {
                elements.push(read_reply(reader)?);
            }
            Ok(Reply::Array(elements))
        }
        other => Err(RedwireError::Protocol(format!(
            "unexpected reply prefix byte 0x{:02x}",
            other
        ))),
    }
}

fn parse_wire_integer(line: &str) -> Result<i64> {
    line.parse::<i64>().map_err(|_| {
        RedwireError::Protocol(format!("expected integer in reply header, got {:?}", line))
    })
}
