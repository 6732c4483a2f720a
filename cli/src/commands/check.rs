use std::net::IpAddr;

use anyhow::{Context, ensure};
use vhscan_common::{config::FailurePolicy, info, network::target};
use vhscan_core::scanner;

use super::{CheckArgs, run_and_report};
use crate::input;

/// Probes every listed IP for one hostname, keeping failures as error rows unless told otherwise.
pub async fn check(args: CheckArgs) -> anyhow::Result<()> {
    let policy = if args.drop_errors {
        FailurePolicy::Drop
    } else {
        FailurePolicy::Record
    };
    let cfg = args.probe.to_config(&args.match_codes, policy)?;

    let specs: Vec<String> = input::read_lines(&args.ips)?;
    let ips: Vec<IpAddr> =
        target::expand_all(&specs).with_context(|| format!("invalid target in {}", args.ips.display()))?;
    ensure!(!ips.is_empty(), "{} contains no targets", args.ips.display());

    let host: String = args.host.map(|h| h.trim().to_string()).unwrap_or_default();
    match host.as_str() {
        "" => info!("Checking {} IP(s) over {} without a host override", ips.len(), args.protocol),
        name => info!("Checking {} IP(s) for {name} over {}", ips.len(), args.protocol),
    }

    let units = scanner::plan(&ips, &[host], &[args.protocol]);
    run_and_report(units, &cfg, &args.output).await
}
