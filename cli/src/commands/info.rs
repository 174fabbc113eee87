use colored::*;
use confkeep_common::config::Config;
use confkeep_common::network::subnet::MAX_ADDRESSES;

use crate::terminal::{colors, print};

pub fn info(cfg: &Config) -> anyhow::Result<()> {
    let root = cfg.backup_root.display().to_string();
    let origins = cfg.allowed_origins.join(", ");
    let timeout = format!("{} ms", cfg.scan.probe_timeout.as_millis());

    if cfg.json {
        let body = serde_json::json!({
            "backup_root": root,
            "allowed_origins": cfg.allowed_origins,
            "probe_timeout_ms": cfg.scan.probe_timeout.as_millis() as u64,
            "concurrency": cfg.scan.concurrency,
            "max_addresses": MAX_ADDRESSES,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    print::align_keys(&["Backup root", "Origins", "Probe timeout", "Concurrency", "Max addresses"]);
    print::aligned_line("Backup root", root.color(colors::PATH));
    print::aligned_line("Origins", origins);
    print::aligned_line("Probe timeout", timeout);
    print::aligned_line("Concurrency", cfg.scan.concurrency.to_string());
    print::aligned_line("Max addresses", MAX_ADDRESSES.to_string());
    Ok(())
}
