//! Readiness wait: block until every managed service answers its
//! health probe.
//!
//! Services are polled one at a time, in declaration order (database
//! before dashboard, purely for log readability). A failed probe sleeps
//! one interval and retries the same service; there is no backoff. By
//! default the wait is unbounded — the operator watching an interactive
//! bring-up is the timeout. A deadline is an explicit opt-in
//! (`readiness.timeout_secs`), surfaced through the [`WaitState`]
//! machine rather than buried in loop control flow.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::config::{Config, ReadinessConfig, ServiceConfig};
use crate::error::{Error, Result};
use crate::probe::{HealthProbe, ProbeOutcome};

/// One managed service with its health endpoint and readiness flag.
///
/// `ready` flips exactly once, when the service first answers a probe.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    name: String,
    health_url: String,
    ready: bool,
}

impl ServiceDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, health_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            health_url: health_url.into(),
            ready: false,
        }
    }

    #[must_use]
    pub fn from_config(service: &ServiceConfig, host: &str) -> Self {
        Self::new(service.name.clone(), service.health_url(host))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn health_url(&self) -> &str {
        &self.health_url
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Where the wait currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitState {
    /// Probing the service at this index; earlier services are ready.
    Polling { current: usize },
    /// Every service answered.
    Ready,
    /// The configured deadline passed with at least one service unready.
    TimedOut { waited: Duration },
}

/// Drives the poll/sleep loop over a list of service descriptors.
pub struct ReadinessWait {
    interval: Duration,
    timeout: Option<Duration>,
}

impl ReadinessWait {
    #[must_use]
    pub fn new(interval: Duration, timeout: Option<Duration>) -> Self {
        Self { interval, timeout }
    }

    #[must_use]
    pub fn from_config(readiness: &ReadinessConfig) -> Self {
        Self::new(
            Duration::from_secs(readiness.poll_interval_secs),
            readiness.timeout_secs.map(Duration::from_secs),
        )
    }

    /// Poll until every descriptor is ready.
    ///
    /// Returns [`Error::ReadinessTimeout`] only when a deadline was
    /// configured; otherwise this blocks for as long as it takes.
    pub async fn wait_all<P>(&self, services: &mut [ServiceDescriptor], probe: &P) -> Result<()>
    where
        P: HealthProbe + ?Sized,
    {
        let started = Instant::now();
        let mut state = WaitState::Polling { current: 0 };
        loop {
            state = match state {
                WaitState::Polling { current } => {
                    match services.get_mut(current) {
                        None => WaitState::Ready,
                        Some(service) => {
                            match probe.probe(service.health_url()).await {
                                ProbeOutcome::Ready => {
                                    service.ready = true;
                                    info!(service = %service.name(), "service is ready");
                                    WaitState::Polling {
                                        current: current + 1,
                                    }
                                }
                                ProbeOutcome::NotReady(reason) => {
                                    debug!(
                                        service = %service.name(),
                                        %reason,
                                        "service not ready, retrying"
                                    );
                                    let waited = started.elapsed();
                                    match self.timeout {
                                        Some(limit) if waited >= limit => {
                                            WaitState::TimedOut { waited }
                                        }
                                        _ => {
                                            sleep(self.interval).await;
                                            WaitState::Polling { current }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                WaitState::Ready => {
                    info!("all services are ready");
                    return Ok(());
                }
                WaitState::TimedOut { waited } => {
                    return Err(Error::ReadinessTimeout { waited });
                }
            };
        }
    }
}

/// Build descriptors for every declared service, in declaration order.
#[must_use]
pub fn descriptors(config: &Config) -> Vec<ServiceDescriptor> {
    config
        .services
        .iter()
        .map(|service| ServiceDescriptor::from_config(service, &config.host))
        .collect()
}
