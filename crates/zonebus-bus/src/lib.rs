//! Shared multi-drop bus abstraction for zone-addressed peripherals.
//!
//! Provides the master/slave trait seam the rest of zonebus builds on:
//! - [`BusMaster`] — issues single-byte write/read transactions to an address
//! - [`BusSlave`] — an address-selected responder
//! - [`AddressMap`] — the fixed addressing scheme (reserved peers, zone range)
//! - [`SimBus`] — an in-memory bus with fault injection, for tests and
//!   local harnesses
//!
//! This is the lowest layer of zonebus. Hardware bus backends implement
//! [`BusMaster`] against their own HAL; nothing here touches hardware.

pub mod addr;
pub mod error;
pub mod sim;
pub mod traits;

pub use addr::{AddressMap, BusAddr, HOST_CONTROLLER_ADDR, RELAY_ADDR, ZONE_BASE_ADDR};
pub use error::{AddressMapError, BusError, Result};
pub use sim::SimBus;
pub use traits::{BusMaster, BusSlave};
