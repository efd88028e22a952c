use std::collections::{HashMap, HashSet};
use std::time::Duration;

use tracing::debug;

use crate::addr::BusAddr;
use crate::error::{BusError, Result};
use crate::traits::{BusMaster, BusSlave};

/// An in-memory bus for tests and local harnesses.
///
/// Slaves are attached at fixed addresses; master transactions are delivered
/// synchronously to the matching slave. Addresses with no slave behave like
/// an unpopulated bus segment and never acknowledge. Per-address fault
/// injection simulates write and read failures, and a transaction counter
/// records every attempted transaction so callers can assert on bus
/// activity.
#[derive(Default)]
pub struct SimBus {
    slaves: HashMap<BusAddr, Box<dyn BusSlave>>,
    failing_writes: HashSet<BusAddr>,
    failing_reads: HashSet<BusAddr>,
    transactions: u64,
}

impl SimBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a slave at `addr`, replacing any previous occupant.
    pub fn attach(&mut self, addr: BusAddr, slave: impl BusSlave + 'static) {
        debug!(%addr, "attaching slave");
        self.slaves.insert(addr, Box::new(slave));
    }

    /// Detach the slave at `addr`. Subsequent transactions to that address
    /// fail with `Nack`.
    pub fn detach(&mut self, addr: BusAddr) {
        debug!(%addr, "detaching slave");
        self.slaves.remove(&addr);
    }

    /// Make write transactions to `addr` fail until cleared.
    pub fn fail_writes_to(&mut self, addr: BusAddr) {
        self.failing_writes.insert(addr);
    }

    /// Make read transactions from `addr` fail until cleared.
    pub fn fail_reads_from(&mut self, addr: BusAddr) {
        self.failing_reads.insert(addr);
    }

    /// Clear all injected faults.
    pub fn clear_faults(&mut self) {
        self.failing_writes.clear();
        self.failing_reads.clear();
    }

    /// Total transactions attempted, including failed ones.
    pub fn transaction_count(&self) -> u64 {
        self.transactions
    }

    /// Number of attached slaves.
    pub fn slave_count(&self) -> usize {
        self.slaves.len()
    }
}

impl BusMaster for SimBus {
    fn write_byte(&mut self, addr: BusAddr, byte: u8, _timeout: Duration) -> Result<()> {
        self.transactions += 1;

        if self.failing_writes.contains(&addr) {
            debug!(%addr, "injected write fault");
            return Err(BusError::Nack { addr });
        }

        match self.slaves.get_mut(&addr) {
            Some(slave) => {
                debug!(%addr, byte, "write");
                slave.on_receive(byte);
                Ok(())
            }
            None => Err(BusError::Nack { addr }),
        }
    }

    fn read_byte(&mut self, addr: BusAddr, _timeout: Duration) -> Result<u8> {
        self.transactions += 1;

        if self.failing_reads.contains(&addr) {
            debug!(%addr, "injected read fault");
            return Err(BusError::Nack { addr });
        }

        match self.slaves.get_mut(&addr) {
            Some(slave) => {
                let byte = slave.on_request();
                debug!(%addr, byte, "read");
                Ok(byte)
            }
            None => Err(BusError::Nack { addr }),
        }
    }
}
