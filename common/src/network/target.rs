//! # Scan Target Model
//!
//! Turns the raw `--ip` argument into the explicit list of addresses to probe.
//!
//! Supported inputs:
//! * A single IP address (`192.168.1.5`, `::1`).
//! * A dashed IPv4 range (`192.168.1.1-192.168.1.50` or `192.168.1.1-50`).
//! * An IPv4 CIDR block (`192.168.1.0/24`).

use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::error::TargetError;
use crate::network::range::{self, Ipv4Range, MAX_RANGE_LEN};

/// A parsed target specification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// A single host.
    Host { target_addr: IpAddr },
    /// A run of IPv4 addresses, already trimmed of boundary addresses for CIDR input.
    Range { ipv4_range: Ipv4Range },
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.contains('/') {
            return parse_cidr_range(s);
        }

        if s.contains('-') {
            return parse_ip_range(s);
        }

        parse_host(s)
    }
}

impl Target {
    /// Materializes the addresses in ascending order.
    pub fn addresses(&self) -> Vec<IpAddr> {
        match self {
            Target::Host { target_addr } => vec![*target_addr],
            Target::Range { ipv4_range } => ipv4_range.to_iter().collect(),
        }
    }
}

/// Expands a single IP, dashed range or CIDR block into explicit addresses.
pub fn expand(spec: &str) -> Result<Vec<IpAddr>, TargetError> {
    let target: Target = spec.parse()?;
    Ok(target.addresses())
}

/// Expands several specifications into one list.
///
/// Overlapping inputs contribute each address once, at its first position.
pub fn expand_all<S: AsRef<str>>(specs: &[S]) -> Result<Vec<IpAddr>, TargetError> {
    let mut seen: HashSet<IpAddr> = HashSet::new();
    let mut ips: Vec<IpAddr> = Vec::new();

    for spec in specs {
        for ip in expand(spec.as_ref())? {
            if seen.insert(ip) {
                ips.push(ip);
            }
        }
    }

    Ok(ips)
}

fn parse_host(s: &str) -> Result<Target, TargetError> {
    s.parse::<IpAddr>()
        .map(|target_addr| Target::Host { target_addr })
        .map_err(|_| TargetError::InvalidIp(s.to_string()))
}

/// Parses a range string like "1.1.1.1-2.2.2.2" or "1.1.1.1-50".
fn parse_ip_range(s: &str) -> Result<Target, TargetError> {
    let invalid = |reason: &str| TargetError::InvalidRange {
        input: s.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = s.split('-');
    let (Some(start_str), Some(end_str), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid("expected exactly one '-'"));
    };

    let start_addr = start_str
        .trim()
        .parse::<Ipv4Addr>()
        .map_err(|_| invalid("invalid start IP"))?;

    let end_addr = parse_range_end_addr(end_str.trim(), &start_addr)
        .ok_or_else(|| invalid("invalid end IP"))?;

    let ipv4_range = Ipv4Range::new(start_addr, end_addr);
    if ipv4_range.size() > MAX_RANGE_LEN {
        return Err(TargetError::RangeTooLarge(s.to_string()));
    }

    Ok(Target::Range { ipv4_range })
}

/// Resolves the end of a range.
///
/// A bare number replaces the last octet of the start address
/// ("192.168.1.1-50" ends at 192.168.1.50); anything dotted must be a full address.
fn parse_range_end_addr(end_str: &str, start_addr: &Ipv4Addr) -> Option<Ipv4Addr> {
    if end_str.contains('.') {
        return end_str.parse::<Ipv4Addr>().ok();
    }

    let is_bare_octet = !end_str.is_empty()
        && end_str.bytes().all(|b| b.is_ascii_digit())
        && (end_str == "0" || !end_str.starts_with('0'));
    if !is_bare_octet {
        return None;
    }

    let last_octet = end_str.parse::<u8>().ok()?;
    let mut octets = start_addr.octets();
    octets[3] = last_octet;
    Some(Ipv4Addr::from(octets))
}

/// Parses CIDR notation like "192.168.1.0/24".
fn parse_cidr_range(s: &str) -> Result<Target, TargetError> {
    let invalid = |reason: String| TargetError::InvalidCidr {
        input: s.to_string(),
        reason,
    };

    let Some((ip_str, prefix_str)) = s.split_once('/') else {
        return Err(invalid("missing prefix".to_string()));
    };

    let ip_addr = ip_str
        .parse::<IpAddr>()
        .map_err(|e| invalid(format!("invalid address '{ip_str}': {e}")))?;

    let IpAddr::V4(ipv4_addr) = ip_addr else {
        return Err(invalid("only IPv4 blocks are supported".to_string()));
    };

    let prefix = prefix_str
        .parse::<u8>()
        .map_err(|e| invalid(format!("invalid prefix '{prefix_str}': {e}")))?;

    let ipv4_range = range::cidr_range(ipv4_addr, prefix)?.usable_hosts();

    Ok(Target::Range { ipv4_range })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
