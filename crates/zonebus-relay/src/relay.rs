use std::io::{Read, Write};

use tracing::{debug, warn};
use zonebus_bus::BusMaster;
use zonebus_link::{CommandFrame, LinkError, LinkReader, LinkWriter};

use crate::config::RelayConfig;
use crate::error::Result;
use crate::reply::{ERR_ACK, ERR_ADDR, ERR_TX};

/// The bridging controller: link responder and bus master.
///
/// Owns the bus for the duration of each transaction, so there is one
/// transaction in flight at a time by construction.
pub struct RelayNode<B> {
    bus: B,
    config: RelayConfig,
}

impl<B: BusMaster> RelayNode<B> {
    /// Create a relay over `bus` with the default addressing and timeout.
    pub fn new(bus: B) -> Self {
        Self::with_config(bus, RelayConfig::default())
    }

    /// Create a relay with explicit configuration.
    pub fn with_config(bus: B, config: RelayConfig) -> Self {
        Self { bus, config }
    }

    /// Handle one inbound frame and return the single byte to put on the
    /// link: the peripheral's status on success, a synthesized error code
    /// otherwise.
    ///
    /// A single linear attempt: the first failing phase terminates the
    /// transaction. No phase is retried and no partial outcome is reported.
    pub fn process_command(&mut self, frame: &CommandFrame) -> u8 {
        let Some(addr) = self.config.addresses.zone_addr(frame.zone) else {
            warn!(zone = frame.zone, "zone outside valid range");
            return ERR_ADDR;
        };

        let timeout = self.config.bus_timeout;

        if let Err(err) = self.bus.write_byte(addr, frame.command, timeout) {
            warn!(%addr, error = %err, "write phase failed");
            return ERR_TX;
        }

        match self.bus.read_byte(addr, timeout) {
            Ok(status) => {
                debug!(%addr, status, "forwarding peripheral reply");
                status
            }
            Err(err) => {
                warn!(%addr, error = %err, "read phase failed");
                ERR_ACK
            }
        }
    }

    /// Serve frames from the link until it closes.
    ///
    /// Blocks on each 2-byte frame, processes it, and answers with one
    /// reply byte. A cleanly closed link ends the loop without error.
    pub fn serve<R: Read, W: Write>(
        &mut self,
        reader: &mut LinkReader<R>,
        writer: &mut LinkWriter<W>,
    ) -> Result<()> {
        loop {
            let frame = match reader.read_frame() {
                Ok(frame) => frame,
                Err(LinkError::ConnectionClosed) => {
                    debug!("link closed, stopping relay loop");
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            };

            debug!(zone = frame.zone, command = frame.command, "frame received");
            let reply = self.process_command(&frame);
            writer.send_reply(reply)?;
        }
    }

    /// Borrow the underlying bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutably borrow the underlying bus.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Current relay configuration.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use zonebus_bus::{BusAddr, SimBus};
    use zonebus_node::{NoopAction, PeripheralNode};

    use super::*;

    const RECOGNIZED: u8 = 0x05;
    const ZONE_5_ADDR: BusAddr = BusAddr::new(0x25);

    fn relay_with_zone_5() -> RelayNode<SimBus> {
        let mut bus = SimBus::new();
        bus.attach(ZONE_5_ADDR, PeripheralNode::new(RECOGNIZED, NoopAction));
        RelayNode::new(bus)
    }

    #[test]
    fn out_of_range_zone_yields_err_addr_without_bus_activity() {
        let mut relay = relay_with_zone_5();
        for zone in [0u8, 10, 12, 0xFF] {
            let reply = relay.process_command(&CommandFrame::new(zone, RECOGNIZED));
            assert_eq!(reply, ERR_ADDR, "zone {zone}");
        }
        assert_eq!(relay.bus().transaction_count(), 0);
    }

    #[test]
    fn recognized_command_forwards_ok_status() {
        let mut relay = relay_with_zone_5();
        let reply = relay.process_command(&CommandFrame::new(5, RECOGNIZED));
        assert_eq!(reply, 0x00);
        // Write phase plus read phase.
        assert_eq!(relay.bus().transaction_count(), 2);
    }

    #[test]
    fn unrecognized_command_forwards_status_as_success() {
        let mut relay = relay_with_zone_5();
        let reply = relay.process_command(&CommandFrame::new(5, 0x99));
        assert_eq!(reply, 0x03);
    }

    #[test]
    fn write_failure_yields_err_tx_and_skips_read() {
        let mut relay = relay_with_zone_5();
        relay.bus_mut().fail_writes_to(ZONE_5_ADDR);

        let reply = relay.process_command(&CommandFrame::new(5, RECOGNIZED));
        assert_eq!(reply, ERR_TX);
        // Only the write attempt; no read phase after a failed write.
        assert_eq!(relay.bus().transaction_count(), 1);
    }

    #[test]
    fn read_failure_after_write_yields_err_ack() {
        let mut relay = relay_with_zone_5();
        relay.bus_mut().fail_reads_from(ZONE_5_ADDR);

        let reply = relay.process_command(&CommandFrame::new(5, RECOGNIZED));
        assert_eq!(reply, ERR_ACK);
        assert_eq!(relay.bus().transaction_count(), 2);
    }

    #[test]
    fn unpopulated_zone_yields_err_tx() {
        let mut relay = relay_with_zone_5();
        let reply = relay.process_command(&CommandFrame::new(3, RECOGNIZED));
        assert_eq!(reply, ERR_TX);
    }

    #[test]
    fn command_byte_reaches_peripheral_verbatim() {
        let mut bus = SimBus::new();
        bus.attach(ZONE_5_ADDR, PeripheralNode::new(0xA7, NoopAction));
        let mut relay = RelayNode::new(bus);

        assert_eq!(relay.process_command(&CommandFrame::new(5, 0xA7)), 0x00);
    }

    #[test]
    fn serve_answers_each_frame_and_ends_on_close() {
        let mut relay = relay_with_zone_5();

        // Valid command, out-of-range zone, unrecognized command.
        let wire = vec![5, RECOGNIZED, 12, RECOGNIZED, 5, 0x99];
        let mut reader = LinkReader::new(Cursor::new(wire));
        let mut writer = LinkWriter::new(Cursor::new(Vec::new()));

        relay.serve(&mut reader, &mut writer).unwrap();

        let replies = writer.into_inner().into_inner();
        assert_eq!(replies, vec![0x00, ERR_ADDR, 0x03]);
    }

    #[test]
    fn serve_does_not_drop_frame_split_across_reads() {
        struct ByteByByte {
            bytes: Vec<u8>,
            pos: usize,
        }

        impl Read for ByteByByte {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if self.pos >= self.bytes.len() || buf.is_empty() {
                    return Ok(0);
                }
                buf[0] = self.bytes[self.pos];
                self.pos += 1;
                Ok(1)
            }
        }

        let mut relay = relay_with_zone_5();
        let mut reader = LinkReader::new(ByteByByte {
            bytes: vec![5, RECOGNIZED],
            pos: 0,
        });
        let mut writer = LinkWriter::new(Cursor::new(Vec::new()));

        relay.serve(&mut reader, &mut writer).unwrap();
        assert_eq!(writer.into_inner().into_inner(), vec![0x00]);
    }
}
