mod commands;
mod terminal;

use commands::{CommandLine, Commands, backups, discover, info};
use confkeep_common::config::Config;
use confkeep_core::events::LogBroadcaster;
use terminal::{logging, print, relay};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let mut cfg = Config::from_env();
    if let Some(root) = commands.backup_root {
        cfg.backup_root = root;
    }
    cfg.quiet = commands.quiet;
    cfg.json = commands.json;

    let events = LogBroadcaster::new();
    let relay_handle = relay::spawn(events.subscribe());

    let outcome = match commands.command {
        Commands::Info => {
            print::header("configuration", cfg.quiet);
            info::info(&cfg)
        }
        Commands::Discover { subnet } => {
            print::header("getting ready for discovery", cfg.quiet);
            discover::discover(&subnet, &cfg, events.clone()).await
        }
        Commands::Backups => {
            print::header("stored backups", cfg.quiet);
            backups::list(&cfg)
        }
        Commands::Show { path } => backups::show(&path, &cfg),
    };

    drop(events);
    let _ = relay_handle.await;

    outcome
}
