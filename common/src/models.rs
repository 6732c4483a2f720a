//! Work items and outcome records of a virtual-host scan.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use serde::Serialize;

/// Application protocol a probe speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    /// Both protocols, in dispatch order.
    pub const ALL: [Protocol; 2] = [Protocol::Http, Protocol::Https];

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Protocol::Http => 80,
            Protocol::Https => 443,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            other => Err(format!("unknown protocol '{other}' (expected http or https)")),
        }
    }
}

/// One scheduled check: which IP to connect to and which host to claim.
///
/// An empty `domain` sends the request without a Host override.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeUnit {
    pub ip: IpAddr,
    pub domain: String,
    pub protocol: Protocol,
}

impl ProbeUnit {
    pub fn new(ip: IpAddr, domain: impl Into<String>, protocol: Protocol) -> Self {
        Self {
            ip,
            domain: domain.into(),
            protocol,
        }
    }

    pub fn has_host_override(&self) -> bool {
        !self.domain.is_empty()
    }
}

impl fmt::Display for ProbeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{} (IP: {})", self.protocol, self.domain, self.ip)
    }
}

/// What a single probe observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered; only the status line is kept.
    Completed { status: u16 },
    /// No response: timeout, refused connection, TLS failure and the like.
    Failed { error: String },
}

/// A kept probe, as handed to the output layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub domain: String,
    pub ip: IpAddr,
    pub protocol: Protocol,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn from_outcome(unit: ProbeUnit, outcome: ProbeOutcome) -> Self {
        let (status_code, error) = match outcome {
            ProbeOutcome::Completed { status } => (status, None),
            ProbeOutcome::Failed { error } => (0, Some(error)),
        };
        Self {
            domain: unit.domain,
            ip: unit.ip,
            protocol: unit.protocol,
            status_code,
            error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
