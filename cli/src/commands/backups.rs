use anyhow::Context;
use confkeep_common::config::Config;
use confkeep_core::storage::BackupStore;

use crate::terminal::{format, print};

pub fn list(cfg: &Config) -> anyhow::Result<()> {
    let store = BackupStore::new(&cfg.backup_root);
    let records = store
        .list()
        .with_context(|| format!("cannot list backups under {}", cfg.backup_root.display()))?;

    if cfg.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        if cfg.quiet < 2 {
            print::print_status(format!("No backups under {}", cfg.backup_root.display()));
        }
        return Ok(());
    }

    for (idx, record) in records.iter().enumerate() {
        match cfg.quiet {
            2 => print::print(&record.path),
            _ => {
                print::tree_head(idx, &record.name);
                print::as_tree_one_level(format::record_to_key_value_pair(record));
            }
        }
    }
    Ok(())
}

pub fn show(relative_path: &str, cfg: &Config) -> anyhow::Result<()> {
    let store = BackupStore::new(&cfg.backup_root);
    let content = store
        .read(relative_path)
        .with_context(|| format!("cannot open backup '{relative_path}'"))?;

    if cfg.json {
        let body = serde_json::json!({ "path": relative_path, "content": content });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print!("{content}");
        if !content.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
