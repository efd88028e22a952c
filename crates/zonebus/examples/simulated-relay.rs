//! Full relay round trip against a simulated bus, no hardware required.
//!
//! Run with:
//!   cargo run --example simulated-relay

use zonebus::bus::{AddressMap, SimBus};
use zonebus::link::CommandFrame;
use zonebus::node::{NoopAction, PeripheralNode};
use zonebus::relay::{reply, RelayNode};

fn main() {
    let map = AddressMap::default();
    let mut bus = SimBus::new();

    // Peripherals at zones 3 and 5, both recognizing command 0x05.
    for zone in [3u8, 5] {
        let addr = map.zone_addr(zone).expect("zone is in range");
        bus.attach(addr, PeripheralNode::new(0x05, NoopAction));
    }

    let mut relay = RelayNode::new(bus);

    let frames = [
        CommandFrame::new(5, 0x05),  // recognized -> peripheral OK
        CommandFrame::new(5, 0x99),  // unrecognized -> peripheral status 0x03
        CommandFrame::new(12, 0x05), // zone out of range -> ERR_ADDR
        CommandFrame::new(7, 0x05),  // no peripheral at zone 7 -> ERR_TX
    ];

    for frame in &frames {
        let reply = relay.process_command(frame);
        println!(
            "zone={:>3} command=0x{:02x} -> reply=0x{:02x} ({})",
            frame.zone,
            frame.command,
            reply,
            reply::describe_reply(reply)
        );
    }

    println!(
        "bus transactions: {}",
        relay.bus().transaction_count()
    );
}
