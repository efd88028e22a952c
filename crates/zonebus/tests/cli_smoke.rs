#![cfg(feature = "cli")]

use std::process::Command;

fn zonebus() -> Command {
    Command::new(env!("CARGO_BIN_EXE_zonebus"))
}

#[test]
fn simulate_reports_each_frame() {
    let output = zonebus()
        .args([
            "--format",
            "json",
            "--log-level",
            "error",
            "simulate",
            "--frames",
            "5:0x05,12:0x05,5:0x99",
        ])
        .output()
        .expect("simulate should run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);

    assert!(lines[0].contains("\"reply\":\"0x00\""));
    assert!(lines[0].contains("\"success\":true"));
    assert!(lines[1].contains("\"reply_name\":\"ERR_ADDR\""));
    assert!(lines[1].contains("\"success\":false"));
    // Unknown command: the peripheral's status byte, forwarded verbatim.
    // 0x03 is numerically identical to ERR_ADDR, so the host-side
    // classification cannot tell them apart.
    assert!(lines[2].contains("\"reply\":\"0x03\""));

    // One frame failed, so the command exits nonzero.
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn simulate_all_ok_exits_zero() {
    let output = zonebus()
        .args([
            "--format",
            "json",
            "--log-level",
            "error",
            "simulate",
            "--frames",
            "5:0x05",
        ])
        .output()
        .expect("simulate should run");

    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn info_lists_zone_addresses() {
    let output = zonebus()
        .args(["--format", "json", "info"])
        .output()
        .expect("info should run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"base\":\"0x20\""));
    assert!(stdout.contains("\"addr\":\"0x25\""));
    assert!(stdout.contains("0x30"));
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn version_prints_crate_version() {
    let output = zonebus().arg("version").output().expect("version should run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("zonebus "));
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn simulate_rejects_malformed_frame_spec() {
    let output = zonebus()
        .args(["simulate", "--frames", "nonsense"])
        .output()
        .expect("simulate should run");

    assert_eq!(output.status.code(), Some(64));
}
