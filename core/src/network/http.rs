//! The HTTP(S) virtual-host probe.
//!
//! The TCP/TLS connection always goes to the unit's IP; the candidate
//! hostname only travels in the `Host` header.

use std::error::Error as StdError;
use std::net::SocketAddr;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, header::HOST, redirect};
use tracing::trace;
use vhscan_common::{
    config::Config,
    models::{ProbeOutcome, ProbeUnit},
};

use crate::scanner::Prober;

const USER_AGENT: &str = concat!("vhscan/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;

/// Probes over a single pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
    cfg: Config,
}

impl HttpProber {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let redirect_policy = if cfg.follow_redirects {
            redirect::Policy::limited(MAX_REDIRECTS)
        } else {
            redirect::Policy::none()
        };

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(cfg.timeout)
            .redirect(redirect_policy)
            .danger_accept_invalid_certs(!cfg.verify_tls)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            cfg: cfg.clone(),
        })
    }

    /// `protocol://ip:port`, with IPv6 addresses bracketed.
    pub fn request_url(&self, unit: &ProbeUnit) -> String {
        let port = self.cfg.port_for(unit.protocol);
        format!("{}://{}", unit.protocol, SocketAddr::new(unit.ip, port))
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, unit: &ProbeUnit) -> ProbeOutcome {
        let url = self.request_url(unit);
        let mut request = self.client.get(&url);
        if unit.has_host_override() {
            request = request.header(HOST, unit.domain.as_str());
        }

        match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                trace!(%url, host = %unit.domain, status, "response received");
                ProbeOutcome::Completed { status }
            }
            Err(e) => ProbeOutcome::Failed {
                error: describe_error(&e),
            },
        }
    }
}

/// Flattens a `reqwest` error and its causes into one line.
fn describe_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return "request timed out".to_string();
    }

    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
