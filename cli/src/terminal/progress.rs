use std::io::{self, Write};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use vhscan_core::scanner::ProgressCallback;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

static PROGRESS: OnceLock<ProgressBar> = OnceLock::new();

/// The process-wide bar. Hidden until [`start`] is called.
pub fn get_bar() -> &'static ProgressBar {
    PROGRESS.get_or_init(ProgressBar::hidden)
}

pub fn start(total: usize) {
    let pb = get_bar();
    let style = ProgressStyle::with_template("{spinner:.blue} [{elapsed_precise}] {bar:32.green/bright_black} {pos}/{len} probes")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICK_STRINGS);

    pb.set_style(style);
    pb.set_length(total as u64);
    pb.set_position(0);
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(100));
}

/// Feeds engine progress into the bar.
pub fn callback() -> ProgressCallback {
    Arc::new(|completed, _total| get_bar().set_position(completed as u64))
}

pub fn finish() {
    get_bar().finish_and_clear();
}

/// Log sink that keeps the bar from being torn by log lines.
pub struct ProgressWriter;

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        get_bar().suspend(|| io::stderr().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}
