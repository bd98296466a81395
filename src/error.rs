//! Error types for the unD6IO-BT driver

use thiserror::Error;

/// The main error type for driver operations
#[derive(Error, Debug)]
pub enum Error {
    /// The transport could not be opened
    #[error("Connect error: {0}")]
    Connect(String),

    /// A write or read failed at the transport layer
    #[error("Transport error: {0}")]
    Transport(String),

    /// A reply ended without a carriage-return terminator
    #[error("Framing error: {0}")]
    Framing(String),

    /// A well-framed but semantically invalid reply
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The transport failed to release cleanly
    #[error("Close error: {0}")]
    Close(String),

    /// Timeout waiting for an operation to complete
    #[error("Timeout waiting for {0}")]
    Timeout(String),

    /// Serial port errors
    #[cfg(feature = "serial")]
    #[error("Serial error: {0}")]
    Serial(#[from] tokio_serial::Error),
}

impl Error {
    /// Create a connect error
    pub fn connect(msg: impl Into<String>) -> Self {
        Error::Connect(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Error::Transport(msg.into())
    }

    /// Create a framing error
    pub fn framing(msg: impl Into<String>) -> Self {
        Error::Framing(msg.into())
    }

    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Error::Protocol(msg.into())
    }

    /// Create a close error
    pub fn close(msg: impl Into<String>) -> Self {
        Error::Close(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Error::Timeout(msg.into())
    }
}
