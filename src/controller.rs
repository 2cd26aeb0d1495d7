//! Lifecycle controller.
//!
//! Sequences the three phases of a stack launch: orchestration bring-up,
//! readiness wait, import hand-off. Strictly single-threaded control
//! flow; the only concurrency lives inside the external services, and
//! the health probes observe their effect.

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::importer::{CommandImportTrigger, ImportTrigger};
use crate::orchestrator::{ComposeOrchestrator, Orchestrator};
use crate::probe::{HealthProbe, HttpHealthProbe};
use crate::readiness::{descriptors, ReadinessWait, ServiceDescriptor};

/// Drives the stack through start/stop/restart, generic over its three
/// collaborators so tests can substitute doubles.
pub struct LifecycleController<O, P, T> {
    orchestrator: O,
    probe: P,
    importer: T,
    services: Vec<ServiceDescriptor>,
    wait: ReadinessWait,
}

/// The controller with its production collaborators.
pub type StackController =
    LifecycleController<ComposeOrchestrator, HttpHealthProbe, CommandImportTrigger>;

impl StackController {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            ComposeOrchestrator::new(config.compose.clone()),
            HttpHealthProbe::new()?,
            CommandImportTrigger::new(config.importer.clone()),
            descriptors(config),
            ReadinessWait::from_config(&config.readiness),
        ))
    }
}

impl<O, P, T> LifecycleController<O, P, T>
where
    O: Orchestrator,
    P: HealthProbe,
    T: ImportTrigger,
{
    #[must_use]
    pub fn new(
        orchestrator: O,
        probe: P,
        importer: T,
        services: Vec<ServiceDescriptor>,
        wait: ReadinessWait,
    ) -> Self {
        Self {
            orchestrator,
            probe,
            importer,
            services,
            wait,
        }
    }

    /// Bring the stack up, wait for every service to report healthy,
    /// then hand off to the importer.
    ///
    /// An orchestration failure aborts before the readiness wait ever
    /// begins; the import trigger runs only after the last service is
    /// ready.
    pub async fn start(&mut self) -> Result<()> {
        self.orchestrator.bring_up().await?;
        info!("stack launched, waiting for services");
        self.wait.wait_all(&mut self.services, &self.probe).await?;
        self.importer.run().await
    }

    /// Tear the stack down. No readiness wait, no import.
    pub async fn stop(&self) -> Result<()> {
        self.orchestrator.tear_down().await
    }

    /// Full stop, then full start. Sequential, no interleaving.
    pub async fn restart(&mut self) -> Result<()> {
        self.stop().await?;
        self.start().await
    }

    /// The managed services in declaration order.
    #[must_use]
    pub fn services(&self) -> &[ServiceDescriptor] {
        &self.services
    }
}
