use std::net::IpAddr;

use anyhow::{Context, ensure};
use tracing::debug;
use vhscan_common::{
    config::FailurePolicy, domains, info, models::Protocol, network::target,
};
use vhscan_core::scanner;

use super::{ScanArgs, run_and_report};
use crate::input;

pub async fn scan(args: ScanArgs) -> anyhow::Result<()> {
    let policy = if args.show_errors {
        FailurePolicy::Record
    } else {
        FailurePolicy::Drop
    };
    let cfg = args.probe.to_config(&args.match_codes, policy)?;

    let ips: Vec<IpAddr> = target::expand(&args.ip).with_context(|| format!("invalid target '{}'", args.ip))?;
    let domains: Vec<String> = collect_domains(&args)?;

    info!("Scanning {} IP(s) with {} domain(s)", ips.len(), domains.len());
    debug!(
        "Total requests: {} (http+https per domain per IP)",
        ips.len() * domains.len() * Protocol::ALL.len()
    );

    let units = scanner::plan(&ips, &domains, &Protocol::ALL);
    run_and_report(units, &cfg, &args.output).await
}

fn collect_domains(args: &ScanArgs) -> anyhow::Result<Vec<String>> {
    let base: Vec<String> = match (&args.domain, &args.domains) {
        (Some(domain), _) => vec![domain.trim().to_string()],
        (None, Some(path)) => input::read_lines(path)?,
        (None, None) => anyhow::bail!("either --domain or --domains is required"),
    };

    let combined = match &args.wordlist {
        Some(path) => domains::combine(&base, &input::read_lines(path)?),
        None => base,
    };
    let combined = domains::dedup(combined);

    ensure!(!combined.is_empty(), "no domains to probe");
    Ok(combined)
}
