//! Zone command relay over a shared peripheral bus.
//!
//! A host controller sends 2-byte `{zone, command}` frames over a
//! point-to-point link to a relay node, which validates the zone, performs
//! a timeout-bounded write-then-read transaction on a shared bus, and
//! answers with a single byte: the addressed peripheral's status register,
//! or a synthesized error code.
//!
//! # Crate Structure
//!
//! - [`bus`] — Multi-drop bus abstraction (addressing, master/slave traits,
//!   simulated bus)
//! - [`link`] — Point-to-point host link framing
//! - [`relay`] — Relay node and host client (both link endpoints)
//! - [`node`] — Bus-slave peripheral node

/// Re-export bus types.
pub mod bus {
    pub use zonebus_bus::*;
}

/// Re-export link types.
pub mod link {
    pub use zonebus_link::*;
}

/// Re-export relay and host-client types.
pub mod relay {
    pub use zonebus_relay::*;
}

/// Re-export peripheral node types.
pub mod node {
    pub use zonebus_node::*;
}
