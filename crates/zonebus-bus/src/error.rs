use std::time::Duration;

use crate::addr::BusAddr;

/// Errors that can occur in bus master transactions.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    /// No device acknowledged at the addressed slave.
    #[error("no acknowledgement from {addr}")]
    Nack { addr: BusAddr },

    /// The transaction did not complete within its deadline.
    #[error("transaction with {addr} timed out after {timeout:?}")]
    Timeout { addr: BusAddr, timeout: Duration },

    /// Lost arbitration to another master mid-transaction.
    #[error("bus arbitration lost during transaction with {addr}")]
    ArbitrationLost { addr: BusAddr },

    /// The bus is held busy and the transaction could not start.
    #[error("bus busy, transaction with {addr} not started")]
    Busy { addr: BusAddr },
}

/// Errors constructing an [`AddressMap`](crate::addr::AddressMap).
#[derive(Debug, thiserror::Error)]
pub enum AddressMapError {
    /// The zone range must be non-empty.
    #[error("empty zone range {start}..={end}")]
    EmptyZoneRange { start: u8, end: u8 },

    /// A zone-derived address would collide with a reserved peer.
    #[error("zone {zone} maps to reserved peer address {addr}")]
    ReservedCollision { zone: u8, addr: BusAddr },

    /// base + highest zone must not overflow the address byte.
    #[error("zone {zone} overflows bus address space from base {base}")]
    AddressOverflow { zone: u8, base: BusAddr },
}

pub type Result<T> = std::result::Result<T, BusError>;
