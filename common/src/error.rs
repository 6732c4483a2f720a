use thiserror::Error;

/// Failure to turn a target specification into addresses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("invalid IP address: {0}")]
    InvalidIp(String),

    #[error("invalid CIDR notation '{input}': {reason}")]
    InvalidCidr { input: String, reason: String },

    #[error("CIDR block {0} is too large (prefix must be /{min} or longer)", min = crate::network::range::MIN_CIDR_PREFIX)]
    CidrTooLarge(String),

    #[error("invalid IP range '{input}': {reason}")]
    InvalidRange { input: String, reason: String },

    #[error("IP range {0} too large (max {max} IPs)", max = crate::network::range::MAX_RANGE_LEN)]
    RangeTooLarge(String),
}

/// Failure to parse a comma-separated status code list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid status code '{0}'")]
pub struct StatusCodeError(pub String);

/// Scan parameters that cannot drive a scan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}
