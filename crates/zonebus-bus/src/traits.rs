use std::time::Duration;

use crate::addr::BusAddr;
use crate::error::Result;

/// A bus master: the single initiator of transactions on the shared bus.
///
/// Both operations are blocking, single-attempt, and bounded by the caller's
/// timeout. Implementations must not retry internally: a failed transaction
/// is reported as-is and the caller decides what to do.
pub trait BusMaster {
    /// Write one byte to the slave at `addr`.
    fn write_byte(&mut self, addr: BusAddr, byte: u8, timeout: Duration) -> Result<()>;

    /// Read one byte from the slave at `addr`.
    fn read_byte(&mut self, addr: BusAddr, timeout: Duration) -> Result<u8>;
}

/// An address-selected bus slave.
///
/// The bus layer invokes these entry points when the slave's address is
/// selected; slaves never initiate traffic. `on_request` must not block:
/// the reply byte has to be available immediately when the master reads.
pub trait BusSlave {
    /// One byte was written to this slave.
    fn on_receive(&mut self, byte: u8);

    /// The master is reading one byte from this slave.
    fn on_request(&mut self) -> u8;
}
