//! Driver for the Q-SYS unD6IO-BT device
//!
//! Every operation is one request/response exchange over a freshly opened
//! transport: connect, write the command, read and decode the reply, close.
//! [`Driver::connection_changed`] is the one stateful operation; it opens
//! the transport once, polls `BTS` until the mapped state differs from the
//! caller's last known value, then closes once.

use std::time::Duration;

use async_trait::async_trait;

use crate::bluetooth::{Connection, HasAnnounce, HasConnection, HasName};
use crate::commands::{self, Command};
use crate::{frame, Error, Result, Transport};

/// Default pause between `BTS` polls in [`Driver::connection_changed`].
///
/// `Duration::ZERO` turns the loop into a busy poll paced only by the
/// transport's read latency.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Implements interrogation and control of a Q-SYS unD6IO-BT device.
///
/// The driver owns its transport and assumes a single in-flight operation
/// at a time; taking `&mut self` makes the borrow checker enforce that.
/// It holds no device state between calls.
pub struct Driver<T: Transport> {
    transport: T,
    poll_interval: Duration,
}

impl<T: Transport> Driver<T> {
    /// Create a driver over `transport`. The transport is connected lazily,
    /// once per operation.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the pause between status polls in [`Driver::connection_changed`]
    pub fn set_poll_interval(&mut self, interval: Duration) {
        self.poll_interval = interval;
    }

    /// Trigger the device's Bluetooth pairing flow.
    ///
    /// After this returns the device is discoverable by Bluetooth sources
    /// using their native pairing interfaces.
    pub async fn announce(&mut self) -> Result<()> {
        self.transport.connect().await?;
        let result = self
            .exchange(Command::Announce)
            .await
            .and_then(|tokens| commands::decode_announce(&tokens));
        self.finish(result).await
    }

    /// Return the friendly name the device advertises over Bluetooth.
    pub async fn name(&mut self) -> Result<String> {
        self.transport.connect().await?;
        let result = self
            .exchange(Command::Name)
            .await
            .and_then(|tokens| commands::decode_name(&tokens));
        self.finish(result).await
    }

    /// Block until the device's connection status differs from `last`, then
    /// return the new status.
    ///
    /// Pass [`Connection::Unknown`] when no previous status is known; the
    /// first decoded status then satisfies the change. If the device never
    /// reports a different status this call never returns — use
    /// [`Driver::connection_changed_with_timeout`] or drop the future to
    /// bound it.
    pub async fn connection_changed(&mut self, last: Connection) -> Result<Connection> {
        self.transport.connect().await?;
        let result = self.poll_until_changed(last).await;
        self.finish(result).await
    }

    /// [`Driver::announce`] bounded by `timeout`
    pub async fn announce_with_timeout(&mut self, timeout: Duration) -> Result<()> {
        let outcome = tokio::time::timeout(timeout, self.announce()).await;
        match outcome {
            Ok(result) => result,
            Err(_) => self.timed_out("BTB acknowledgement").await,
        }
    }

    /// [`Driver::name`] bounded by `timeout`
    pub async fn name_with_timeout(&mut self, timeout: Duration) -> Result<String> {
        let outcome = tokio::time::timeout(timeout, self.name()).await;
        match outcome {
            Ok(result) => result,
            Err(_) => self.timed_out("BTN reply").await,
        }
    }

    /// [`Driver::connection_changed`] bounded by `timeout`
    pub async fn connection_changed_with_timeout(
        &mut self,
        last: Connection,
        timeout: Duration,
    ) -> Result<Connection> {
        let outcome = tokio::time::timeout(timeout, self.connection_changed(last)).await;
        match outcome {
            Ok(result) => result,
            Err(_) => self.timed_out("connection state change").await,
        }
    }

    /// One request/response round trip on the already-connected transport
    async fn exchange(&mut self, command: Command) -> Result<Vec<String>> {
        self.transport.write_all(&command.encode()).await?;
        frame::read_reply(&mut self.transport).await
    }

    /// Poll `BTS` until the decoded state differs from `last`
    async fn poll_until_changed(&mut self, last: Connection) -> Result<Connection> {
        loop {
            let tokens = self.exchange(Command::Status).await?;
            let current = commands::decode_status(&tokens)?;
            if current != last {
                return Ok(current);
            }
            if !self.poll_interval.is_zero() {
                tokio::time::sleep(self.poll_interval).await;
            }
        }
    }

    /// Close the transport and settle the operation's result.
    ///
    /// On the success path a close failure overrides the good result, the
    /// behavior the device's reference tooling exhibits. On the error path
    /// the close is best-effort and only logged, so the original error is
    /// what the caller sees.
    async fn finish<R>(&mut self, result: Result<R>) -> Result<R> {
        match result {
            Ok(value) => {
                self.transport.close().await?;
                Ok(value)
            }
            Err(e) => {
                self.close_best_effort().await;
                Err(e)
            }
        }
    }

    async fn close_best_effort(&mut self) {
        if let Err(close_err) = self.transport.close().await {
            tracing::warn!("Failed to close transport after error: {}", close_err);
        }
    }

    async fn timed_out<R>(&mut self, waiting_for: &str) -> Result<R> {
        // The in-flight operation was dropped mid-call; release whatever
        // connection it left open.
        self.close_best_effort().await;
        Err(Error::timeout(waiting_for))
    }
}

#[async_trait]
impl<T: Transport> HasAnnounce for Driver<T> {
    async fn announce(&mut self) -> Result<()> {
        Driver::announce(self).await
    }
}

#[async_trait]
impl<T: Transport> HasName for Driver<T> {
    async fn name(&mut self) -> Result<String> {
        Driver::name(self).await
    }
}

#[async_trait]
impl<T: Transport> HasConnection for Driver<T> {
    async fn connection_changed(&mut self, last: Connection) -> Result<Connection> {
        Driver::connection_changed(self, last).await
    }
}
