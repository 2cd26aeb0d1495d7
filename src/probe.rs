//! Health probes.
//!
//! A probe answers one question: is this endpoint serving traffic yet?
//! Only reachability and the status class matter; response bodies are
//! never read.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Outcome of a single health probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Ready,
    NotReady(String),
}

impl ProbeOutcome {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, ProbeOutcome::Ready)
    }
}

/// A readiness check against one URL.
///
/// A failed probe is not an error; the readiness loop retries it. Only
/// construction of the underlying client can fail.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn probe(&self, url: &str) -> ProbeOutcome;
}

/// Per-request timeout so a black-holed endpoint cannot stall a poll
/// iteration indefinitely. The loop's own cadence stays at the
/// configured interval.
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// HTTP GET probe. Any 2xx response counts as ready.
pub struct HttpHealthProbe {
    client: reqwest::Client,
}

impl HttpHealthProbe {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().timeout(PROBE_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => ProbeOutcome::Ready,
            Ok(response) => ProbeOutcome::NotReady(format!("HTTP {}", response.status())),
            Err(e) => ProbeOutcome::NotReady(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn serve_once(listener: TcpListener, response: &'static str) {
        if let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            let _ = stream.write_all(response.as_bytes()).await;
        }
    }

    #[tokio::test]
    async fn probe_reports_ready_on_2xx() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(serve_once(
            listener,
            "HTTP/1.1 200 OK\r\ncontent-length: 2\r\n\r\nOK",
        ));

        let probe = HttpHealthProbe::new().expect("client");
        let outcome = probe.probe(&format!("http://{addr}/ping")).await;
        assert_eq!(outcome, ProbeOutcome::Ready);
    }

    #[tokio::test]
    async fn probe_reports_not_ready_on_5xx() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(serve_once(
            listener,
            "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\n\r\n",
        ));

        let probe = HttpHealthProbe::new().expect("client");
        let outcome = probe.probe(&format!("http://{addr}/api/health")).await;
        assert!(matches!(outcome, ProbeOutcome::NotReady(reason) if reason.contains("503")));
    }

    #[tokio::test]
    async fn probe_reports_not_ready_when_connection_refused() {
        // Bind to grab a free port, then drop the listener so nothing
        // is listening when the probe fires.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let probe = HttpHealthProbe::new().expect("client");
        let outcome = probe.probe(&format!("http://{addr}/ping")).await;
        assert!(!outcome.is_ready());
    }
}
