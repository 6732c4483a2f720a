use std::net::{IpAddr, Ipv4Addr, TcpListener};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rcgen::CertifiedKey;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::task::JoinHandle;
use tokio_rustls::TlsAcceptor;
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::rustls::crypto::ring;
use tokio_rustls::rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use vhscan_common::{config::Config, status::StatusFilter};
use wiremock::MockServer;

pub const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// A loopback port with nothing listening on it.
pub fn closed_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .expect("failed to reserve a local port")
}

/// Points `http` at the mock server and `https` at a dead port.
pub fn config_for(server: &MockServer, filter: StatusFilter) -> Config {
    Config {
        concurrency: 4,
        timeout: Duration::from_secs(2),
        filter,
        http_port: server.address().port(),
        https_port: closed_port(),
        ..Config::default()
    }
}

pub fn domains(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// A loopback HTTPS server with a throwaway self-signed certificate.
///
/// Answers 200 when the `Host` header names `live_host` and 404 otherwise.
pub struct TlsServer {
    port: u16,
    hosts: Arc<Mutex<Vec<String>>>,
    task: JoinHandle<()>,
}

impl TlsServer {
    pub async fn start(live_host: &'static str) -> Self {
        let CertifiedKey { cert, key_pair } =
            rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).expect("certificate generation failed");
        let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der()));

        let config = ServerConfig::builder_with_provider(Arc::new(ring::default_provider()))
            .with_safe_default_protocol_versions()
            .expect("no usable TLS versions")
            .with_no_client_auth()
            .with_single_cert(vec![cert.der().clone()], key)
            .expect("invalid server certificate");
        let acceptor = TlsAcceptor::from(Arc::new(config));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
        let port = listener.local_addr().expect("no local address").port();

        let hosts: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&hosts);

        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let acceptor = acceptor.clone();
                let seen = Arc::clone(&seen);

                tokio::spawn(async move {
                    // Handshakes fail on purpose when the client verifies the certificate.
                    let Ok(mut tls) = acceptor.accept(stream).await else {
                        return;
                    };
                    let host = read_host_header(&mut tls).await;
                    let status = match host.as_deref() {
                        Some(host) if host == live_host => "200 OK",
                        _ => "404 Not Found",
                    };
                    if let Some(host) = host {
                        seen.lock().unwrap().push(host);
                    }

                    let response = format!("HTTP/1.1 {status}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
                    let _ = tls.write_all(response.as_bytes()).await;
                    let _ = tls.shutdown().await;
                });
            }
        });

        Self { port, hosts, task }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `Host` header values of every completed request, in arrival order.
    pub fn hosts(&self) -> Vec<String> {
        self.hosts.lock().unwrap().clone()
    }
}

impl Drop for TlsServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn read_host_header<S: AsyncRead + Unpin>(stream: &mut S) -> Option<String> {
    let mut buf: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 1024];

    while !buf.windows(4).any(|w| w == b"\r\n\r\n") && buf.len() < 16 * 1024 {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    String::from_utf8_lossy(&buf)
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("host"))
        .map(|(_, value)| value.trim().to_string())
}
