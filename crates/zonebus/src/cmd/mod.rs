use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod info;
pub mod send;
pub mod serve;
pub mod simulate;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send one zone command over a link device and print the reply.
    Send(SendArgs),
    /// Run a relay loop on a link device against a simulated bus.
    Serve(ServeArgs),
    /// Run frames through an in-process relay round trip.
    Simulate(SimulateArgs),
    /// Show the bus address map.
    Info(InfoArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, format),
        Command::Serve(args) => serve::run(args),
        Command::Simulate(args) => simulate::run(args, format),
        Command::Info(args) => info::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Link device to open (e.g. /dev/ttyS0).
    pub device: PathBuf,
    /// Destination zone.
    #[arg(long, short = 'z')]
    pub zone: u8,
    /// Command byte (decimal or 0x-prefixed hex).
    #[arg(long, short = 'c')]
    pub command: String,
    /// Maximum time to wait for the reply byte (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub reply_timeout: String,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Link device to serve (e.g. /dev/ttyS0).
    pub device: PathBuf,
    /// Zones to populate with simulated peripherals (comma-separated).
    #[arg(long, value_delimiter = ',', default_values_t = [1u8, 2, 3, 4, 5, 6, 7, 8, 9])]
    pub zones: Vec<u8>,
    /// Command byte the simulated peripherals recognize.
    #[arg(long, default_value = "0x05")]
    pub recognized: String,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Frames to process, as zone:command pairs (e.g. 5:0x05,12:0x05).
    #[arg(long, value_delimiter = ',', required = true)]
    pub frames: Vec<String>,
    /// Zones to populate with simulated peripherals (comma-separated).
    #[arg(long, value_delimiter = ',', default_values_t = [1u8, 2, 3, 4, 5, 6, 7, 8, 9])]
    pub zones: Vec<u8>,
    /// Command byte the simulated peripherals recognize.
    #[arg(long, default_value = "0x05")]
    pub recognized: String,
}

#[derive(Args, Debug)]
pub struct InfoArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Parse a byte argument given as decimal or 0x-prefixed hex.
pub fn parse_byte(input: &str) -> Result<u8, String> {
    let input = input.trim();
    let parsed = if let Some(hex) = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16)
    } else {
        input.parse()
    };
    parsed.map_err(|_| format!("invalid byte value: {input}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_byte_decimal_and_hex() {
        assert_eq!(parse_byte("5").unwrap(), 5);
        assert_eq!(parse_byte("0x05").unwrap(), 0x05);
        assert_eq!(parse_byte("0xFF").unwrap(), 0xFF);
        assert_eq!(parse_byte("0Xff").unwrap(), 0xFF);
    }

    #[test]
    fn parse_byte_rejects_garbage() {
        assert!(parse_byte("").is_err());
        assert!(parse_byte("0x").is_err());
        assert!(parse_byte("256").is_err());
        assert!(parse_byte("five").is_err());
    }
}
