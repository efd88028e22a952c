use std::fs::OpenOptions;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;
use zonebus_bus::SimBus;
use zonebus_link::{LinkError, LinkReader, LinkWriter};
use zonebus_node::{NoopAction, PeripheralNode};
use zonebus_relay::RelayNode;

use crate::cmd::{parse_byte, ServeArgs};
use crate::exit::{io_error, link_error, CliError, CliResult, SUCCESS, USAGE};

pub fn run(args: ServeArgs) -> CliResult<i32> {
    let recognized = parse_byte(&args.recognized).map_err(|msg| CliError::new(USAGE, msg))?;

    let mut relay = build_relay(&args.zones, recognized)?;

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(&args.device)
        .map_err(|err| io_error(&format!("failed opening {}", args.device.display()), err))?;
    let reader = file
        .try_clone()
        .map_err(|err| io_error("failed cloning device handle", err))?;

    let mut link_reader = LinkReader::new(reader);
    let mut link_writer = LinkWriter::new(file);

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    info!(
        device = %args.device.display(),
        zones = ?args.zones,
        recognized,
        "relay serving"
    );

    while running.load(Ordering::SeqCst) {
        let frame = match link_reader.read_frame() {
            Ok(frame) => frame,
            Err(LinkError::ConnectionClosed) => break,
            Err(err) => return Err(link_error("frame read failed", err)),
        };

        let reply = relay.process_command(&frame);
        link_writer
            .send_reply(reply)
            .map_err(|err| link_error("reply write failed", err))?;
    }

    Ok(SUCCESS)
}

/// Build a relay over a simulated bus populated at the given zones.
pub fn build_relay(zones: &[u8], recognized: u8) -> CliResult<RelayNode<SimBus>> {
    let mut bus = SimBus::new();
    let map = zonebus_bus::AddressMap::default();

    for &zone in zones {
        let addr = map
            .zone_addr(zone)
            .ok_or_else(|| CliError::new(USAGE, format!("zone {zone} outside valid range")))?;
        bus.attach(addr, PeripheralNode::new(recognized, NoopAction));
    }

    Ok(RelayNode::new(bus))
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
