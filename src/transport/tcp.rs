//! TCP transport, for devices reachable over a serial-to-ethernet bridge

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::{Error, Result, Transport};

/// [`Transport`] over a TCP connection
pub struct TcpTransport {
    addr: String,
    stream: Option<TcpStream>,
}

impl TcpTransport {
    /// Create a transport for `addr` (`host:port`). No connection is made
    /// until [`Transport::connect`] is called.
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            stream: None,
        }
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }

        let stream = TcpStream::connect(&self.addr)
            .await
            .map_err(|e| Error::connect(format!("Failed to connect to {}: {}", self.addr, e)))?;

        tracing::debug!("Connected to {}", self.addr);
        self.stream = Some(stream);
        Ok(())
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| Error::transport("not connected"))?;

        let n = stream
            .read(buf)
            .await
            .map_err(|e| Error::transport(format!("read failed: {}", e)))?;
        tracing::trace!("RX {} bytes: {:02x?}", n, &buf[..n]);
        Ok(n)
    }

    async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| Error::transport("not connected"))?;

        tracing::trace!("TX {} bytes: {:02x?}", data.len(), data);
        stream
            .write_all(data)
            .await
            .map_err(|e| Error::transport(format!("write failed: {}", e)))
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            tracing::debug!("Closing connection to {}", self.addr);
            stream
                .shutdown()
                .await
                .map_err(|e| Error::close(format!("shutdown failed: {}", e)))?;
        }
        Ok(())
    }
}
