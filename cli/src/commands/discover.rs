use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use confkeep_common::config::Config;
use confkeep_common::network::host::ScanResult;
use confkeep_common::network::subnet;
use confkeep_core::discovery::DiscoveryService;
use confkeep_core::events::LogBroadcaster;
use confkeep_core::scanner::PortScanner;
use tracing::info;

use crate::terminal::{colors, format, print, spinner::{self, Spinner}};

pub async fn discover(cidr: &str, cfg: &Config, events: LogBroadcaster) -> anyhow::Result<()> {
    let total = subnet::validate(cidr)
        .with_context(|| format!("cannot scan '{cidr}'"))?
        .host_count();

    let spinner = Spinner::start(cfg, "Probing hosts...");
    let pb = spinner.handle();
    let scanner = PortScanner::new(&cfg.scan)
        .on_host_probed(move |probed| spinner::report_probe_progress(&pb, probed, total));
    let service = DiscoveryService::new(scanner, events);

    let start_time = Instant::now();
    let outcome = service.discover(cidr).await;
    spinner.finish();
    let devices = outcome.with_context(|| format!("discovery of {cidr} failed"))?;

    if cfg.json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    discovery_ends(&devices, start_time.elapsed(), cfg);
    Ok(())
}

fn discovery_ends(devices: &[ScanResult], total_time: Duration, cfg: &Config) {
    if devices.is_empty() {
        print::header("zero devices detected", cfg.quiet);
        if cfg.quiet < 2 {
            print::no_results();
        }
        return;
    }

    print::header("discovered devices", cfg.quiet);
    for (idx, device) in devices.iter().enumerate() {
        match cfg.quiet {
            2 => print::print(&device.ip.to_string()),
            _ => {
                print::tree_head(idx, &device.ip.to_string().color(colors::IPV4_ADDR).to_string());
                print::as_tree_one_level(format::scan_result_to_key_value_pair(device));
            }
        }
    }
    print_summary(devices.len(), total_time, cfg);
}

fn print_summary(found: usize, total_time: Duration, cfg: &Config) {
    let found = format!("{found} device(s)").bold().green();
    let total_time = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output = format!("Discovery complete: {found} found in {total_time}");

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        1 => info!("{output}"),
        _ => {}
    }
}
