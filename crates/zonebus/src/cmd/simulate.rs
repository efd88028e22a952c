use std::time::Instant;

use zonebus_link::CommandFrame;
use zonebus_relay::CommandOutcome;

use crate::cmd::serve::build_relay;
use crate::cmd::{parse_byte, SimulateArgs};
use crate::exit::{CliError, CliResult, FAILURE, SUCCESS, USAGE};
use crate::output::{print_outcome, OutputFormat};

pub fn run(args: SimulateArgs, format: OutputFormat) -> CliResult<i32> {
    let recognized = parse_byte(&args.recognized).map_err(|msg| CliError::new(USAGE, msg))?;
    let mut relay = build_relay(&args.zones, recognized)?;

    let mut any_failed = false;

    for spec in &args.frames {
        let frame = parse_frame(spec)?;

        let start = Instant::now();
        let reply = relay.process_command(&frame);
        let outcome = CommandOutcome {
            zone: frame.zone,
            command: frame.command,
            reply,
            elapsed: start.elapsed(),
        };

        any_failed |= !outcome.is_success();
        print_outcome(&outcome, format);
    }

    if any_failed {
        Ok(FAILURE)
    } else {
        Ok(SUCCESS)
    }
}

/// Parse a `zone:command` frame spec, e.g. `5:0x05`.
fn parse_frame(spec: &str) -> CliResult<CommandFrame> {
    let (zone, command) = spec
        .split_once(':')
        .ok_or_else(|| CliError::new(USAGE, format!("expected zone:command, got: {spec}")))?;

    let zone = parse_byte(zone).map_err(|msg| CliError::new(USAGE, msg))?;
    let command = parse_byte(command).map_err(|msg| CliError::new(USAGE, msg))?;

    Ok(CommandFrame::new(zone, command))
}
