mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "zonebus", version, about = "Zone command relay CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_send_subcommand() {
        let cli = Cli::try_parse_from([
            "zonebus",
            "send",
            "/dev/ttyS0",
            "--zone",
            "5",
            "--command",
            "0x05",
        ])
        .expect("send args should parse");

        assert!(matches!(cli.command, Command::Send(_)));
    }

    #[test]
    fn parses_simulate_subcommand() {
        let cli = Cli::try_parse_from(["zonebus", "simulate", "--frames", "5:0x05,12:0x05"])
            .expect("simulate args should parse");

        match cli.command {
            Command::Simulate(args) => assert_eq!(args.frames, vec!["5:0x05", "12:0x05"]),
            other => panic!("expected simulate, got {other:?}"),
        }
    }

    #[test]
    fn simulate_requires_frames() {
        let err = Cli::try_parse_from(["zonebus", "simulate"]).expect_err("missing frames");
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn parses_serve_zone_list() {
        let cli = Cli::try_parse_from(["zonebus", "serve", "/dev/ttyS0", "--zones", "1,3,5"])
            .expect("serve args should parse");

        match cli.command {
            Command::Serve(args) => assert_eq!(args.zones, vec![1, 3, 5]),
            other => panic!("expected serve, got {other:?}"),
        }
    }
}
