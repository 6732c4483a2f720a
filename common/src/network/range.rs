use std::net::{IpAddr, Ipv4Addr};

use crate::error::TargetError;

/// Upper bound on addresses produced by a dashed range.
pub const MAX_RANGE_LEN: u64 = 65_536;

/// Shortest accepted CIDR prefix. A /16 holds exactly `MAX_RANGE_LEN` addresses.
pub const MIN_CIDR_PREFIX: u8 = 16;

/// An inclusive run of IPv4 addresses.
///
/// The end may sit numerically below the start; iteration then wraps past
/// `255.255.255.255` the same way a big-endian byte increment with carry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    /// Number of addresses walked from start to end, wraparound included.
    pub fn size(&self) -> u64 {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        u64::from(end.wrapping_sub(start)) + 1
    }

    pub fn to_iter(&self) -> impl Iterator<Item = IpAddr> {
        let start: u32 = self.start_addr.into();
        (0..self.size()).map(move |offset| {
            let addr = start.wrapping_add(offset as u32);
            IpAddr::V4(Ipv4Addr::from(addr))
        })
    }

    /// Strips the network and broadcast addresses when more than two remain.
    pub fn usable_hosts(self) -> Self {
        if self.size() <= 2 {
            return self;
        }
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        Self::new(Ipv4Addr::from(start + 1), Ipv4Addr::from(end - 1))
    }
}

/// Computes the full block containing `ip` for the given prefix length.
pub fn cidr_range(ip: Ipv4Addr, prefix: u8) -> Result<Ipv4Range, TargetError> {
    let input = format!("{ip}/{prefix}");
    if prefix > 32 {
        return Err(TargetError::InvalidCidr {
            input,
            reason: "prefix must be between 0 and 32".to_string(),
        });
    }
    if prefix < MIN_CIDR_PREFIX {
        return Err(TargetError::CidrTooLarge(input));
    }

    let mask: u32 = u32::MAX << (32 - u32::from(prefix));
    let network: u32 = u32::from(ip) & mask;
    let broadcast: u32 = network | !mask;

    Ok(Ipv4Range::new(
        Ipv4Addr::from(network),
        Ipv4Addr::from(broadcast),
    ))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
