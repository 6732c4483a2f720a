use std::time::Duration;

use colored::*;
use tracing::info;
use vhscan_common::warn;

use crate::terminal::colors;
use crate::terminal::logging::PRINT_TARGET;

pub const TOTAL_WIDTH: usize = 64;

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().color(colors::PRIMARY),
        "─".repeat(right)
    )
    .color(colors::SEPARATOR);

    print(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR);
    print(&format!("{}", sep));
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{}{}", space, msg));
}

/// Closing lines of a scan: how many probes were kept out of how many were sent.
pub fn summary(kept: usize, total: usize, elapsed: Duration) {
    fat_separator();

    if kept == 0 {
        warn!("No matching virtual hosts out of {total} probes");
        return;
    }

    let kept: ColoredString = format!("{kept} results").bold().green();
    let total: ColoredString = total.to_string().color(colors::ACCENT);
    let elapsed: ColoredString = format!("{:.2}s", elapsed.as_secs_f64()).bold().yellow();
    let output: String = format!("Scan complete: {kept} from {total} probes in {elapsed}");

    centerln(&output);
}
