pub mod check;
pub mod scan;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::builder::RangedU64ValueParser;
use clap::{ArgGroup, Args, Parser, Subcommand};
use vhscan_common::{
    config::{Config, FailurePolicy},
    models::{ProbeUnit, Protocol},
    status::StatusFilter,
};
use vhscan_core::scanner;

use crate::output::{self, Format};
use crate::terminal::{print, progress};

#[derive(Parser)]
#[command(name = "vhscan", version)]
#[command(about = "Virtual host discovery: probe IPs while claiming candidate hostnames.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe every IP against every domain over HTTP and HTTPS
    #[command(alias = "s")]
    Scan(ScanArgs),
    /// Probe a list of IPs for a single hostname over one protocol
    #[command(alias = "c")]
    Check(CheckArgs),
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Commands {
    pub fn verbose(&self) -> bool {
        match self {
            Commands::Scan(args) => args.probe.verbose,
            Commands::Check(args) => args.probe.verbose,
        }
    }
}

#[derive(Args)]
#[command(group(ArgGroup::new("domain_source").required(true).args(["domain", "domains"])))]
pub struct ScanArgs {
    /// Target IP, IP range, or CIDR (e.g. 192.168.1.1, 192.168.1.1-10, 192.168.1.0/24)
    #[arg(long, value_name = "SPEC")]
    pub ip: String,

    /// Single domain to test
    #[arg(long)]
    pub domain: Option<String>,

    /// File with one domain per line
    #[arg(long, value_name = "FILE")]
    pub domains: Option<PathBuf>,

    /// File with one subdomain word per line, combined as word.domain
    #[arg(long, value_name = "FILE")]
    pub wordlist: Option<PathBuf>,

    /// Comma-separated status codes to keep
    #[arg(long = "match", value_name = "CODES", default_value = "200")]
    pub match_codes: String,

    /// Keep failed probes as status 0 rows with their error
    #[arg(long)]
    pub show_errors: bool,

    #[command(flatten)]
    pub probe: ProbeArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct CheckArgs {
    /// File with one target (IP, range or CIDR) per line
    #[arg(long, value_name = "FILE")]
    pub ips: PathBuf,

    /// Hostname to claim; omit to probe without a Host override
    #[arg(long)]
    pub host: Option<String>,

    /// Protocol to probe with
    #[arg(long, default_value = "https")]
    pub protocol: Protocol,

    /// Comma-separated status codes to keep (empty keeps all)
    #[arg(long = "match", value_name = "CODES", default_value = "")]
    pub match_codes: String,

    /// Leave failed probes out of the results
    #[arg(long)]
    pub drop_errors: bool,

    #[command(flatten)]
    pub probe: ProbeArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct ProbeArgs {
    /// Number of concurrent probes
    #[arg(short = 't', long, default_value_t = 5, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub threads: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10, value_parser = RangedU64ValueParser::<u64>::new().range(1..))]
    pub timeout: u64,

    /// Comma-separated status codes to drop even if matched
    #[arg(long, value_name = "CODES", default_value = "")]
    pub exclude: String,

    /// Validate TLS certificates (skipped by default)
    #[arg(long)]
    pub verify_tls: bool,

    /// Follow redirects instead of reporting 3xx codes
    #[arg(long)]
    pub follow_redirects: bool,

    /// Port used for http probes
    #[arg(long, default_value_t = 80)]
    pub http_port: u16,

    /// Port used for https probes
    #[arg(long, default_value_t = 443)]
    pub https_port: u16,

    /// Show every request as it is checked
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ProbeArgs {
    pub fn to_config(&self, include: &str, failure_policy: FailurePolicy) -> anyhow::Result<Config> {
        let filter = StatusFilter::parse(include, &self.exclude).context("invalid status code list")?;

        let cfg = Config {
            concurrency: self.threads,
            timeout: Duration::from_secs(self.timeout),
            verify_tls: self.verify_tls,
            follow_redirects: self.follow_redirects,
            filter,
            failure_policy,
            http_port: self.http_port,
            https_port: self.https_port,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Runs the planned units with a progress bar, then renders and writes the results.
async fn run_and_report(units: Vec<ProbeUnit>, cfg: &Config, output_args: &OutputArgs) -> anyhow::Result<()> {
    let total: usize = units.len();
    progress::start(total);

    let start_time: Instant = Instant::now();
    let results = scanner::perform_scan(units, cfg, Some(progress::callback())).await;
    progress::finish();
    let results = results?;

    print::summary(results.len(), total, start_time.elapsed());

    let rendered: String = output::render(&results, output_args.format)?;
    output::emit(&rendered, output_args.output.as_deref())
}
