//! Command codec for the unD6IO-BT line protocol
//!
//! Each command is its three-letter mnemonic followed by a carriage return;
//! there is no other framing, checksum, or escaping. The device replies
//! with `ACK`, an echo of the mnemonic, and for query commands one value
//! token. A friendly name containing a space would desynchronize
//! tokenization; the protocol offers no way to handle that.

use crate::bluetooth::Connection;
use crate::frame::FRAME_TERMINATOR;
use crate::{Error, Result};

/// The acknowledgement token leading every valid reply
const ACK: &str = "ACK";

/// The negative acknowledgement the device documentation describes
const NACK: &str = "NACK";

/// The three commands the device supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `BTB` — activate the pairing flow
    Announce,
    /// `BTS` — query the Bluetooth connection status
    Status,
    /// `BTN` — query the advertised friendly name
    Name,
}

impl Command {
    /// The command's wire mnemonic, echoed back in its reply
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Command::Announce => "BTB",
            Command::Status => "BTS",
            Command::Name => "BTN",
        }
    }

    /// How many tokens a valid reply to this command carries
    pub const fn reply_tokens(self) -> usize {
        match self {
            Command::Announce => 2,
            Command::Status | Command::Name => 3,
        }
    }

    /// Encode the command for transmission
    pub fn encode(self) -> Vec<u8> {
        let mut bytes = self.mnemonic().as_bytes().to_vec();
        bytes.push(FRAME_TERMINATOR);
        bytes
    }
}

/// Validate the ack shape shared by every reply: exact token count, a
/// leading `ACK`, and an echo of the command mnemonic.
fn validate_ack(command: Command, tokens: &[String]) -> Result<()> {
    if tokens.len() != command.reply_tokens() {
        return Err(Error::protocol(format!(
            "unexpected field count in {} reply: got {}, want {}",
            command.mnemonic(),
            tokens.len(),
            command.reply_tokens()
        )));
    }

    if tokens[0] != ACK {
        // The device documentation implies a distinguishable NACK, but it
        // carries no more information than garbage does, so both are
        // protocol errors with different messages.
        if tokens[0] == NACK {
            return Err(Error::protocol(format!(
                "device answered NACK to {}",
                command.mnemonic()
            )));
        }
        return Err(Error::protocol(format!(
            "expected ACK, got {:?}",
            tokens[0]
        )));
    }

    if tokens[1] != command.mnemonic() {
        return Err(Error::protocol(format!(
            "command echo mismatch: sent {}, reply echoed {:?}",
            command.mnemonic(),
            tokens[1]
        )));
    }

    Ok(())
}

/// Decode a `BTB` reply. Success carries no value.
pub fn decode_announce(tokens: &[String]) -> Result<()> {
    validate_ack(Command::Announce, tokens)
}

/// Decode a `BTS` reply into a [`Connection`] state.
pub fn decode_status(tokens: &[String]) -> Result<Connection> {
    validate_ack(Command::Status, tokens)?;

    let code: u32 = tokens[2]
        .parse()
        .map_err(|_| Error::protocol(format!("non-numeric status {:?}", tokens[2])))?;

    connection_from_status(code)
}

/// Decode a `BTN` reply into the advertised friendly name.
///
/// The name is opaque to the driver and returned verbatim; the device may
/// legitimately send an empty one.
pub fn decode_name(tokens: &[String]) -> Result<String> {
    validate_ack(Command::Name, tokens)?;
    Ok(tokens[2].clone())
}

/// Map a `BTS` status code to a [`Connection`] state.
///
/// | Code | Meaning |
/// |---|---|
/// | 0 | Idle |
/// | 1 | Discoverable |
/// | 2 | Connected, AVRCP support unknown |
/// | 3 | Connected, AVRCP not supported |
/// | 4 | Connected, AVRCP supported |
/// | 5 | Connected, AVRCP + PDU supported |
pub fn connection_from_status(code: u32) -> Result<Connection> {
    match code {
        0 | 1 => Ok(Connection::NotConnected),
        2..=5 => Ok(Connection::Connected),
        other => Err(Error::protocol(format!("status code {} out of range", other))),
    }
}
