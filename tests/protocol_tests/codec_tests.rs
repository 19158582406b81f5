//! Codec Tests
//!
//! Tests for command framing and reply decoding.

use std::io::Cursor;

use redwire::protocol::{encode_command, read_reply, Reply, ReplyReader};
use redwire::RedwireError;

fn decode(bytes: &[u8]) -> redwire::Result<Reply> {
    let mut reader = ReplyReader::new(Cursor::new(bytes.to_vec()));
    read_reply(&mut reader)
}

// =============================================================================
// Command Framing Tests
// =============================================================================

#[test]
fn test_encode_multibulk_frame() {
    let mut out = Vec::new();
    encode_command("get", &[b"key".to_vec()], &mut out);
    assert_eq!(out, b"*2\r\n$3\r\nget\r\n$3\r\nkey\r\n");
}

#[test]
fn test_encode_no_arguments() {
    let mut out = Vec::new();
    encode_command("ping", &[], &mut out);
    assert_eq!(out, b"*1\r\n$4\r\nping\r\n");
}

#[test]
fn test_encode_measures_bytes_not_characters() {
    // "10€" is 3 characters but 5 encoded bytes.
    let mut out = Vec::new();
    encode_command(
        "set",
        &[b"price".to_vec(), "10\u{20ac}".as_bytes().to_vec()],
        &mut out,
    );
    assert_eq!(
        out,
        b"*3\r\n$3\r\nset\r\n$5\r\nprice\r\n$5\r\n10\xe2\x82\xac\r\n"
    );
}

#[test]
fn test_encode_binary_argument() {
    let binary: Vec<u8> = vec![0x00, 0x0d, 0x0a, 0xff];
    let mut out = Vec::new();
    encode_command("set", &[b"blob".to_vec(), binary.clone()], &mut out);

    let mut expected = b"*3\r\n$3\r\nset\r\n$4\r\nblob\r\n$4\r\n".to_vec();
    expected.extend_from_slice(&binary);
    expected.extend_from_slice(b"\r\n");
    assert_eq!(out, expected);
}

// =============================================================================
// Reply Decoding Tests
// =============================================================================

#[test]
fn test_ok_status_normalizes_to_true() {
    assert_eq!(decode(b"+OK\r\n").unwrap(), Reply::Bool(true));
}

#[test]
fn test_other_status_lines_pass_through() {
    assert_eq!(
        decode(b"+PONG\r\n").unwrap(),
        Reply::Status("PONG".to_string())
    );
}

#[test]
fn test_integer_reply() {
    assert_eq!(decode(b":42\r\n").unwrap(), Reply::Integer(42));
    assert_eq!(decode(b":-42\r\n").unwrap(), Reply::Integer(-42));
}

#[test]
fn test_bulk_reply() {
    assert_eq!(
        decode(b"$5\r\nhello\r\n").unwrap(),
        Reply::Bulk(b"hello".to_vec())
    );
}

#[test]
fn test_bulk_reply_is_binary_safe() {
    // Payload bytes containing CR/LF must not terminate the read early.
    assert_eq!(
        decode(b"$4\r\na\r\nb\r\n").unwrap(),
        Reply::Bulk(b"a\r\nb".to_vec())
    );
}

#[test]
fn test_nil_bulk_decodes_to_nil() {
    assert_eq!(decode(b"$-1\r\n").unwrap(), Reply::Nil);
}

#[test]
fn test_empty_bulk_is_not_nil() {
    assert_eq!(decode(b"$0\r\n\r\n").unwrap(), Reply::Bulk(Vec::new()));
}

#[test]
fn test_array_reply() {
    let reply = decode(b"*2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n").unwrap();
    assert_eq!(
        reply,
        Reply::Array(vec![
            Reply::Bulk(b"foo".to_vec()),
            Reply::Bulk(b"bar".to_vec()),
        ])
    );
}

#[test]
fn test_array_with_nil_elements() {
    let reply = decode(b"*3\r\n$1\r\na\r\n$-1\r\n:7\r\n").unwrap();
    assert_eq!(
        reply,
        Reply::Array(vec![
            Reply::Bulk(b"a".to_vec()),
            Reply::Nil,
            Reply::Integer(7),
        ])
    );
}

#[test]
fn test_nested_array_reply() {
    let reply = decode(b"*2\r\n*1\r\n:1\r\n*0\r\n").unwrap();
    assert_eq!(
        reply,
        Reply::Array(vec![
            Reply::Array(vec![Reply::Integer(1)]),
            Reply::Array(Vec::new()),
        ])
    );
}

#[test]
fn test_nil_array_is_distinct_from_empty_array() {
    let nil = decode(b"*-1\r\n").unwrap();
    let empty = decode(b"*0\r\n").unwrap();
    assert_eq!(nil, Reply::Nil);
    assert_eq!(empty, Reply::Array(Vec::new()));
    assert_ne!(nil, empty);
}

// =============================================================================
// Error Reply Tests
// =============================================================================

#[test]
fn test_error_reply_strips_leading_err_token() {
    let err = decode(b"-ERR no such key\r\n").unwrap_err();
    match err {
        RedwireError::Command(message) => assert_eq!(message, "no such key"),
        other => panic!("expected Command error, got {:?}", other),
    }
}

#[test]
fn test_error_reply_without_err_token_is_kept_verbatim() {
    let err = decode(b"-WRONGTYPE not a string\r\n").unwrap_err();
    match err {
        RedwireError::Command(message) => assert_eq!(message, "WRONGTYPE not a string"),
        other => panic!("expected Command error, got {:?}", other),
    }
}

// =============================================================================
// Protocol Violation Tests
// =============================================================================

#[test]
fn test_unknown_prefix_is_protocol_error() {
    let err = decode(b"@boom\r\n").unwrap_err();
    assert!(matches!(err, RedwireError::Protocol(_)));
}

#[test]
fn test_unparsable_length_is_protocol_error() {
    let err = decode(b"$abc\r\n").unwrap_err();
    assert!(matches!(err, RedwireError::Protocol(_)));

    let err = decode(b"*x\r\n").unwrap_err();
    assert!(matches!(err, RedwireError::Protocol(_)));
}

#[test]
fn test_stream_end_at_prefix_is_transport_error() {
    let err = decode(b"").unwrap_err();
    assert!(err.is_transport());
}

#[test]
fn test_stream_end_mid_reply_is_transport_error() {
    let err = decode(b"$10\r\nshort").unwrap_err();
    assert!(err.is_transport());
}
