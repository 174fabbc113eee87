use std::io;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use colored::*;
use confkeep_common::config::Config;
use indicatif::{ProgressBar, ProgressStyle};

/// The spinner currently on screen, if any. Log lines are routed through it
/// so they do not tear the animation.
static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Starts a spinner, or a hidden one when output is quiet or JSON.
    pub fn start(cfg: &Config, message: &str) -> Self {
        if cfg.quiet > 0 || cfg.json {
            return Self { pb: ProgressBar::hidden() };
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        *ACTIVE.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb.clone());
        Self { pb }
    }

    pub fn handle(&self) -> ProgressBar {
        self.pb.clone()
    }

    pub fn finish(self) {
        ACTIVE.lock().unwrap_or_else(PoisonError::into_inner).take();
        self.pb.finish_and_clear();
    }
}

pub fn report_probe_progress(pb: &ProgressBar, probed: usize, total: u64) {
    pb.set_message(format!(
        "Probed {} of {} hosts...",
        probed.to_string().green().bold(),
        total
    ));
}

pub struct SpinnerWriter;

impl io::Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let active = ACTIVE.lock().unwrap_or_else(PoisonError::into_inner).clone();
        match active {
            Some(pb) => {
                let msg = String::from_utf8_lossy(buf);
                pb.println(msg.trim_end());
                Ok(buf.len())
            }
            None => io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}
