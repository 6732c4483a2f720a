use std::collections::HashSet;
use std::hash::Hash;
use std::net::IpAddr;

use vhscan_common::models::{ProbeUnit, Protocol};

/// Builds the IP × domain × protocol work set.
///
/// IPs vary slowest and protocols fastest, so for each (IP, domain) pair the
/// protocols appear in the order given. Repeated inputs on any axis are
/// planned once, at their first position.
pub fn plan(ips: &[IpAddr], domains: &[String], protocols: &[Protocol]) -> Vec<ProbeUnit> {
    let ips: Vec<IpAddr> = first_seen(ips.iter().copied());
    let domains: Vec<&str> = first_seen(domains.iter().map(String::as_str));
    let protocols: Vec<Protocol> = first_seen(protocols.iter().copied());

    let mut units = Vec::with_capacity(ips.len() * domains.len() * protocols.len());

    for ip in &ips {
        for domain in &domains {
            for protocol in &protocols {
                units.push(ProbeUnit::new(*ip, *domain, *protocol));
            }
        }
    }

    units
}

fn first_seen<T: Copy + Eq + Hash>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen: HashSet<T> = HashSet::new();
    items.into_iter().filter(|item| seen.insert(*item)).collect()
}
