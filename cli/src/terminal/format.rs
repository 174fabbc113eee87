use chrono::DateTime;
use colored::*;
use confkeep_common::backup::BackupRecord;
use confkeep_common::network::host::ScanResult;

use crate::terminal::colors;

pub fn scan_result_to_key_value_pair(result: &ScanResult) -> Vec<(String, ColoredString)> {
    let ports = result
        .open_ports
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let protocols = result
        .protocols
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        ("Ports".to_string(), ports.color(colors::PORT)),
        ("Protocols".to_string(), protocols.color(colors::ACCENT)),
    ]
}

pub fn record_to_key_value_pair(record: &BackupRecord) -> Vec<(String, ColoredString)> {
    let modified = DateTime::from_timestamp(record.modified as i64, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| record.modified.to_string());

    vec![
        ("Path".to_string(), record.path.color(colors::PATH)),
        ("Modified".to_string(), modified.color(colors::TEXT_DEFAULT)),
    ]
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
