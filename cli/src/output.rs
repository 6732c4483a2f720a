//! Rendering and writing of scan results.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use vhscan_common::{models::ProbeResult, success};

const CSV_HEADER: &str = "domain,ip,protocol,status_code,error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Csv,
    Json,
}

pub fn render(results: &[ProbeResult], format: Format) -> anyhow::Result<String> {
    match format {
        Format::Text => Ok(render_text(results)),
        Format::Csv => Ok(render_csv(results)),
        Format::Json => serde_json::to_string_pretty(results).context("failed to encode results as JSON"),
    }
}

fn render_text(results: &[ProbeResult]) -> String {
    results
        .iter()
        .map(|r| match &r.error {
            Some(error) => format!("{}://{} (IP: {}) - Error: {}", r.protocol, r.domain, r.ip, error),
            None => format!("{}://{} (IP: {}) - Status: {}", r.protocol, r.domain, r.ip, r.status_code),
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn render_csv(results: &[ProbeResult]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(results.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(results.iter().map(|r| {
        format!(
            "{},{},{},{},{}",
            r.domain,
            r.ip,
            r.protocol,
            r.status_code,
            r.error.as_deref().unwrap_or_default()
        )
    }));
    lines.join("\n")
}

/// Writes to `path`, creating parent directories, or to stdout when no path is given.
pub fn emit(rendered: &str, path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{rendered}").context("failed to write results to stdout")?;
        return Ok(());
    };

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }
    fs::write(path, rendered).with_context(|| format!("failed to write output file {}", path.display()))?;

    success!("Results written to {}", path.display());
    Ok(())
}
