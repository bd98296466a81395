//! Serial transport, for devices wired directly to a serial port

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{SerialPortBuilderExt, SerialStream};

use crate::{Error, Result, Transport};

/// [`Transport`] over a local serial port
pub struct SerialTransport {
    port_name: String,
    baud_rate: u32,
    port: Option<SerialStream>,
}

impl SerialTransport {
    /// Create a transport for the serial port at `port_name`. The port is
    /// not opened until [`Transport::connect`] is called.
    pub fn new(port_name: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port_name: port_name.into(),
            baud_rate,
            port: None,
        }
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.port.is_some() {
            return Ok(());
        }

        let port = tokio_serial::new(&self.port_name, self.baud_rate)
            .open_native_async()
            .map_err(|e| Error::connect(format!("Failed to open serial port: {}", e)))?;

        tracing::debug!("Opened {} at {} baud", self.port_name, self.baud_rate);
        self.port = Some(port);
        Ok(())
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let port = self
            .port
            .as_mut()
            .ok_or_else(|| Error::transport("not connected"))?;

        let n = port
            .read(buf)
            .await
            .map_err(|e| Error::transport(format!("read failed: {}", e)))?;
        tracing::trace!("RX {} bytes: {:02x?}", n, &buf[..n]);
        Ok(n)
    }

    async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let port = self
            .port
            .as_mut()
            .ok_or_else(|| Error::transport("not connected"))?;

        tracing::trace!("TX {} bytes: {:02x?}", data.len(), data);
        port.write_all(data)
            .await
            .map_err(|e| Error::transport(format!("write failed: {}", e)))
    }

    async fn close(&mut self) -> Result<()> {
        if self.port.take().is_some() {
            tracing::debug!("Closed {}", self.port_name);
        }
        Ok(())
    }
}
