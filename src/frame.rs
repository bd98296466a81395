//! Frame reader for device replies
//!
//! A reply frame is a run of ASCII bytes terminated by a single carriage
//! return. This module reads exactly one frame from the transport and
//! splits it into its space-separated tokens.

use bytes::BytesMut;

use crate::{Error, Result, Transport};

/// Every command and reply ends with this byte
pub const FRAME_TERMINATOR: u8 = b'\r';

/// Replies are a handful of short tokens; anything this large means we have
/// lost frame sync.
const MAX_FRAME_LEN: usize = 512;

/// Read one reply frame from the transport and return its tokens.
///
/// Bytes are accumulated until a carriage return is seen, so a short
/// physical read cannot truncate a frame. The terminator is not included in
/// the tokens. Token order is preserved and duplicates are allowed.
pub async fn read_reply<T: Transport + ?Sized>(transport: &mut T) -> Result<Vec<String>> {
    let mut buffer = BytesMut::with_capacity(128);
    let mut chunk = [0u8; 64];

    loop {
        if let Some(end) = buffer.iter().position(|&b| b == FRAME_TERMINATOR) {
            return tokenize(&buffer[..end]);
        }

        if buffer.len() >= MAX_FRAME_LEN {
            return Err(Error::framing(format!(
                "no terminator within {} bytes",
                MAX_FRAME_LEN
            )));
        }

        let n = transport.read(&mut chunk).await?;
        if n == 0 {
            return Err(Error::framing("end of stream before frame terminator"));
        }
        buffer.extend_from_slice(&chunk[..n]);
    }
}

/// Split a terminator-stripped frame on single spaces
fn tokenize(frame: &[u8]) -> Result<Vec<String>> {
    let text = std::str::from_utf8(frame)
        .map_err(|_| Error::framing("reply contains non-UTF-8 bytes"))?;
    Ok(text.split(' ').map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::{MockTransport, ReadStep};

    #[tokio::test]
    async fn test_read_reply_single_read() {
        let mut transport = MockTransport::with_replies(&[b"ACK BTS 4\r"]);
        let tokens = read_reply(&mut transport).await.unwrap();
        assert_eq!(tokens, vec!["ACK", "BTS", "4"]);
    }

    #[tokio::test]
    async fn test_read_reply_spans_partial_reads() {
        // The terminator arrives in a later read than the first tokens
        let mut transport = MockTransport::new(vec![
            ReadStep::Data(b"ACK BT".to_vec()),
            ReadStep::Data(b"N living-room\r".to_vec()),
        ]);
        let tokens = read_reply(&mut transport).await.unwrap();
        assert_eq!(tokens, vec!["ACK", "BTN", "living-room"]);
    }

    #[tokio::test]
    async fn test_read_reply_stops_at_terminator() {
        // Bytes after the CR belong to no frame we asked for
        let mut transport = MockTransport::with_replies(&[b"ACK BTB\rgarbage"]);
        let tokens = read_reply(&mut transport).await.unwrap();
        assert_eq!(tokens, vec!["ACK", "BTB"]);
    }

    #[tokio::test]
    async fn test_missing_terminator_is_framing_error() {
        let mut transport = MockTransport::with_replies(&[b"ACK BTB"]);
        let err = read_reply(&mut transport).await.unwrap_err();
        assert!(matches!(err, Error::Framing(_)));
    }

    #[tokio::test]
    async fn test_read_failure_is_transport_error() {
        let mut transport = MockTransport::new(vec![ReadStep::Fail]);
        let err = read_reply(&mut transport).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn test_oversized_frame_is_framing_error() {
        let mut transport = MockTransport::with_replies(&[&[b'x'; 600]]);
        let err = read_reply(&mut transport).await.unwrap_err();
        assert!(matches!(err, Error::Framing(_)));
    }

    #[tokio::test]
    async fn test_empty_frame_yields_one_empty_token() {
        let mut transport = MockTransport::with_replies(&[b"\r"]);
        let tokens = read_reply(&mut transport).await.unwrap();
        assert_eq!(tokens, vec![""]);
    }
}
