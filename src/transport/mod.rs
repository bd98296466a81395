//! Transport abstraction for communicating with the device
//!
//! Implementations of [`Transport`] wrap underlying byte-stream protocols
//! like TCP or serial ports, so the driver can focus on the device protocol
//! and not the mechanism for moving bytes.

use async_trait::async_trait;

use crate::Result;

#[cfg(feature = "serial")]
pub mod serial;
#[cfg(feature = "tcp")]
pub mod tcp;

/// A connect/read/write/close byte stream to the device.
///
/// The driver assumes a single in-flight operation at a time; the transport
/// does not need to provide any multiplexing.
#[async_trait]
pub trait Transport: Send {
    /// Return when a connection to the endpoint has been established, or
    /// none could be. If already connected, return immediately.
    async fn connect(&mut self) -> Result<()>;

    /// Read up to `buf.len()` bytes from the open connection.
    ///
    /// Returns the number of bytes read; `Ok(0)` means end of stream.
    /// May return fewer bytes than requested rather than waiting for the
    /// buffer to fill. Errors if the transport is not connected.
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Write all of `data` to the open connection.
    ///
    /// Errors if the transport is not connected.
    async fn write_all(&mut self, data: &[u8]) -> Result<()>;

    /// Close any open connection and interrupt blocked reads or writes.
    ///
    /// Subsequent calls are a no-op.
    async fn close(&mut self) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted in-memory transport for driver and frame tests

    use std::collections::VecDeque;

    use async_trait::async_trait;

    use crate::{Error, Result};

    use super::Transport;

    /// One scripted outcome for a [`MockTransport::read`] call
    pub(crate) enum ReadStep {
        /// Serve these bytes (split across calls if the caller's buffer is
        /// smaller)
        Data(Vec<u8>),
        /// Fail with a transport error
        Fail,
        /// Never resolve, for timeout tests
        Hang,
    }

    /// Transport that replays a script of read outcomes and records
    /// everything else.
    pub(crate) struct MockTransport {
        pub(crate) reads: VecDeque<ReadStep>,
        pub(crate) written: Vec<u8>,
        pub(crate) connects: usize,
        pub(crate) closes: usize,
        pub(crate) fail_connect: bool,
        pub(crate) fail_close: bool,
    }

    impl MockTransport {
        pub(crate) fn new(reads: Vec<ReadStep>) -> Self {
            Self {
                reads: reads.into(),
                written: Vec::new(),
                connects: 0,
                closes: 0,
                fail_connect: false,
                fail_close: false,
            }
        }

        /// Script each reply as one read
        pub(crate) fn with_replies(replies: &[&[u8]]) -> Self {
            Self::new(replies.iter().map(|r| ReadStep::Data(r.to_vec())).collect())
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn connect(&mut self) -> Result<()> {
            if self.fail_connect {
                return Err(Error::connect("mock refused connection"));
            }
            self.connects += 1;
            Ok(())
        }

        async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
            match self.reads.pop_front() {
                Some(ReadStep::Data(mut data)) => {
                    let n = data.len().min(buf.len());
                    buf[..n].copy_from_slice(&data[..n]);
                    if n < data.len() {
                        self.reads.push_front(ReadStep::Data(data.split_off(n)));
                    }
                    Ok(n)
                }
                Some(ReadStep::Fail) => Err(Error::transport("mock read failure")),
                Some(ReadStep::Hang) => std::future::pending().await,
                None => Ok(0),
            }
        }

        async fn write_all(&mut self, data: &[u8]) -> Result<()> {
            self.written.extend_from_slice(data);
            Ok(())
        }

        async fn close(&mut self) -> Result<()> {
            self.closes += 1;
            if self.fail_close && self.closes == 1 {
                return Err(Error::close("mock close failure"));
            }
            Ok(())
        }
    }
}
