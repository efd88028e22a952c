use std::fs::OpenOptions;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use zonebus_relay::{CommandOutcome, HostClient, ERR_RELAY};

use crate::cmd::{parse_byte, SendArgs};
use crate::exit::{io_error, link_error, CliError, CliResult, FAILURE, SUCCESS, USAGE};
use crate::output::{print_outcome, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let command = parse_byte(&args.command).map_err(|msg| CliError::new(USAGE, msg))?;
    let reply_timeout = parse_duration(&args.reply_timeout)?;

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(&args.device)
        .map_err(|err| io_error(&format!("failed opening {}", args.device.display()), err))?;
    let reader = file
        .try_clone()
        .map_err(|err| io_error("failed cloning device handle", err))?;

    let mut client = HostClient::new(reader, file);
    let zone = args.zone;

    // The reply read blocks on the device; run the round trip on a worker
    // so the deadline holds even when the device never answers.
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(client.send_command(zone, command));
    });

    let outcome = match rx.recv_timeout(reply_timeout) {
        Ok(result) => result.map_err(|err| link_error("send failed", err))?,
        Err(_) => CommandOutcome {
            zone,
            command,
            reply: ERR_RELAY,
            elapsed: reply_timeout,
        },
    };

    print_outcome(&outcome, format);

    if outcome.is_success() {
        Ok(SUCCESS)
    } else {
        Ok(FAILURE)
    }
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        _ => Err(CliError::new(
            USAGE,
            format!("unsupported duration unit: {unit}"),
        )),
    }
}
