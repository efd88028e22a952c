use std::time::Duration;

use zonebus_bus::AddressMap;

/// Default deadline for each bus transaction phase.
pub const DEFAULT_BUS_TIMEOUT: Duration = Duration::from_millis(100);

/// Relay configuration: the fixed addressing scheme plus the per-phase bus
/// transaction timeout. Write and read phases share the same deadline.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub addresses: AddressMap,
    pub bus_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            addresses: AddressMap::default(),
            bus_timeout: DEFAULT_BUS_TIMEOUT,
        }
    }
}
