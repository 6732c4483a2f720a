use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;
use vhscan_common::macros::SUCCESS_TARGET;

use crate::terminal::progress::ProgressWriter;

/// Target for decorative lines that are printed without a symbol prefix.
pub const PRINT_TARGET: &str = "vhscan::print";

const CRATE_TARGETS: &[&str] = &["vhscan", "vhscan_cli", "vhscan_core", "vhscan_common"];

pub struct VhscanFormatter;

impl<S, N> FormatEvent<S, N> for VhscanFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        if meta.target() != PRINT_TARGET {
            let (symbol, color_func) = prefix(meta.target(), *meta.level());
            write!(writer, "{} ", color_func(symbol.into()))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

fn prefix(target: &str, level: Level) -> (&'static str, fn(ColoredString) -> ColoredString) {
    if target == SUCCESS_TARGET {
        return ("[+]", |s| s.green().bold());
    }

    match level {
        Level::TRACE => ("[ ]", |s| s.dimmed()),
        Level::DEBUG => ("[?]", |s| s.blue()),
        Level::INFO => ("[*]", |s| s.cyan().bold()),
        Level::WARN => ("[!]", |s| s.yellow().bold()),
        Level::ERROR => ("[-]", |s| s.red().bold()),
    }
}

/// Builds the default filter: our crates at `info` (or `debug` when verbose), everything else at `warn`.
fn default_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATE_TARGETS.iter().map(|target| format!("{target}={level}")));
    directives.join(",")
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .event_format(VhscanFormatter)
        .with_writer(|| ProgressWriter)
        .with_env_filter(filter)
        .init();
}
