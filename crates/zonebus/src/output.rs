use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use zonebus_bus::AddressMap;
use zonebus_relay::reply::{CONFIRM, ERR_ACK, ERR_ADDR, ERR_RELAY, ERR_TX};
use zonebus_relay::CommandOutcome;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct OutcomeOutput<'a> {
    zone: u8,
    command: String,
    reply: String,
    reply_name: &'a str,
    description: &'a str,
    success: bool,
    elapsed_ms: u128,
}

impl<'a> OutcomeOutput<'a> {
    fn from(outcome: &'a CommandOutcome) -> Self {
        Self {
            zone: outcome.zone,
            command: format!("0x{:02x}", outcome.command),
            reply: format!("0x{:02x}", outcome.reply),
            reply_name: reply_name(outcome.reply),
            description: outcome.description(),
            success: outcome.is_success(),
            elapsed_ms: outcome.elapsed.as_millis(),
        }
    }
}

pub fn print_outcome(outcome: &CommandOutcome, format: OutputFormat) {
    let out = OutcomeOutput::from(outcome);
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ZONE", "COMMAND", "REPLY", "RESULT", "TIME"])
                .add_row(vec![
                    out.zone.to_string(),
                    out.command.clone(),
                    format!("{} ({})", out.reply, out.reply_name),
                    out.description.to_string(),
                    format!("{}ms", out.elapsed_ms),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "zone={} command={} reply={} ({}) {} [{}ms]",
                out.zone, out.command, out.reply, out.reply_name, out.description, out.elapsed_ms
            );
        }
        OutputFormat::Raw => {
            let mut stdout = std::io::stdout();
            let _ = stdout.write_all(&[outcome.reply]);
            let _ = stdout.flush();
        }
    }
}

#[derive(Serialize)]
struct AddressMapOutput {
    base: String,
    zone_start: u8,
    zone_end: u8,
    zones: Vec<ZoneEntry>,
    reserved: Vec<String>,
}

#[derive(Serialize)]
struct ZoneEntry {
    zone: u8,
    addr: String,
}

pub fn print_address_map(map: &AddressMap, format: OutputFormat) {
    let zones: Vec<ZoneEntry> = map
        .zones()
        .filter_map(|zone| {
            map.zone_addr(zone).map(|addr| ZoneEntry {
                zone,
                addr: addr.to_string(),
            })
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let out = AddressMapOutput {
                base: map.base().to_string(),
                zone_start: *map.zones().start(),
                zone_end: *map.zones().end(),
                zones,
                reserved: map.reserved().iter().map(|a| a.to_string()).collect(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ZONE", "BUS ADDRESS"]);
            for entry in &zones {
                table.add_row(vec![entry.zone.to_string(), entry.addr.clone()]);
            }
            for addr in map.reserved() {
                table.add_row(vec!["(reserved)".to_string(), addr.to_string()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for entry in &zones {
                println!("zone {} -> {}", entry.zone, entry.addr);
            }
            for addr in map.reserved() {
                println!("reserved  {addr}");
            }
        }
    }
}

pub fn reply_name(reply: u8) -> &'static str {
    match reply {
        CONFIRM => "CONFIRM",
        ERR_TX => "ERR_TX",
        ERR_ACK => "ERR_ACK",
        ERR_ADDR => "ERR_ADDR",
        ERR_RELAY => "ERR_RELAY",
        _ => "STATUS",
    }
}
