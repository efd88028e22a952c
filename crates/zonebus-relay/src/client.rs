use std::io::{Read, Write};
use std::time::{Duration, Instant};

use tracing::debug;
use zonebus_link::{CommandFrame, LinkReader, LinkWriter, Result as LinkResult};

use crate::reply::{describe_reply, ReplyCode, ERR_RELAY};

/// The classified result of one host command round trip.
#[derive(Debug, Clone, Copy)]
pub struct CommandOutcome {
    pub zone: u8,
    pub command: u8,
    /// Raw reply byte as received (or `ERR_RELAY` if the link went silent).
    pub reply: u8,
    /// Round-trip time from frame write to reply read.
    pub elapsed: Duration,
}

impl CommandOutcome {
    /// The decoded reply code, if the byte matches one. Bytes outside the
    /// code set are peripheral status values from a successful transaction.
    pub fn code(&self) -> Option<ReplyCode> {
        ReplyCode::from_byte(self.reply)
    }

    /// Whether the reply byte classifies as a success. Bytes matching a
    /// non-CONFIRM error code classify as failure; everything else is a
    /// forwarded peripheral status. Note the protocol's numeric overlap:
    /// a peripheral's unknown-command status (0x03) is indistinguishable
    /// from `ERR_ADDR` here.
    pub fn is_success(&self) -> bool {
        !self.code().is_some_and(ReplyCode::is_error)
    }

    /// Human-readable reading of the reply byte.
    pub fn description(&self) -> &'static str {
        describe_reply(self.reply)
    }
}

/// The host side of the link: sends request frames, reads reply bytes.
///
/// `send_command` always produces a classified outcome: if the relay link
/// gives no answer, the outcome carries `ERR_RELAY` rather than surfacing a
/// timeout error. Only a broken write path is an `Err`.
pub struct HostClient<R, W> {
    reader: LinkReader<R>,
    writer: LinkWriter<W>,
}

impl<R: Read, W: Write> HostClient<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: LinkReader::new(reader),
            writer: LinkWriter::new(writer),
        }
    }

    /// Send one `{zone, command}` frame and wait for the one-byte reply.
    pub fn send_command(&mut self, zone: u8, command: u8) -> LinkResult<CommandOutcome> {
        let start = Instant::now();

        self.writer.send_frame(&CommandFrame::new(zone, command))?;
        debug!(zone, command, "frame sent");

        let reply = match self.reader.read_reply() {
            Ok(byte) => byte,
            Err(err) if err.is_silence() => {
                debug!(zone, error = %err, "no answer from relay");
                ERR_RELAY
            }
            Err(err) => return Err(err),
        };

        Ok(CommandOutcome {
            zone,
            command,
            reply,
            elapsed: start.elapsed(),
        })
    }

    /// Consume the client and return the underlying link halves.
    pub fn into_parts(self) -> (LinkReader<R>, LinkWriter<W>) {
        (self.reader, self.writer)
    }
}
