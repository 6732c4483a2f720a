use std::time::Duration;

use crate::error::ConfigError;
use crate::models::Protocol;
use crate::status::StatusFilter;

/// What happens to probes that never got a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Failed probes leave no trace in the results.
    #[default]
    Drop,
    /// Failed probes are kept with status 0 and their error text.
    Record,
}

/// Tuning shared by every probe of a scan.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of probes with network I/O in flight.
    pub concurrency: usize,
    /// Bound on a whole request/response round trip.
    pub timeout: Duration,
    /// Validate certificate chains and hostnames on HTTPS probes.
    pub verify_tls: bool,
    pub follow_redirects: bool,
    pub filter: StatusFilter,
    pub failure_policy: FailurePolicy,
    pub http_port: u16,
    pub https_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: 5,
            timeout: Duration::from_secs(10),
            verify_tls: false,
            follow_redirects: false,
            filter: StatusFilter::new([200], []),
            failure_policy: FailurePolicy::Drop,
            http_port: Protocol::Http.default_port(),
            https_port: Protocol::Https.default_port(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub fn port_for(&self, protocol: Protocol) -> u16 {
        match protocol {
            Protocol::Http => self.http_port,
            Protocol::Https => self.https_port,
        }
    }
}
