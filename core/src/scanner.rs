//! The central **orchestration** of a virtual-host scan.
//!
//! A scan is a flat list of [`ProbeUnit`]s (see [`plan`]) pushed through a
//! [`Prober`]. Every unit runs as its own task, but a task is only spawned
//! once the [`AdmissionGate`] grants it a slot, so at most
//! `Config::concurrency` probes touch the network at any time.
//!
//! **Architectural Note:**
//! The engine only knows the [`Prober`] abstraction. [`HttpProber`] is the
//! production implementation; tests drive the engine with doubles.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error};
use vhscan_common::{
    config::{Config, FailurePolicy},
    models::{ProbeOutcome, ProbeResult, ProbeUnit},
    status::StatusFilter,
};

use crate::gate::AdmissionGate;
use crate::network::http::HttpProber;
use crate::results::ResultSet;

mod plan;

pub use plan::plan;

/// Called after each unit finishes with `(completed, total)`.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Executes one probe. Never fails: network trouble is an outcome, not an error.
#[async_trait]
pub trait Prober: Send + Sync + 'static {
    async fn probe(&self, unit: &ProbeUnit) -> ProbeOutcome;
}

/// Drives a work set through a [`Prober`] under a concurrency ceiling.
pub struct ScanEngine<P> {
    prober: Arc<P>,
    gate: AdmissionGate,
    filter: Arc<StatusFilter>,
    failure_policy: FailurePolicy,
    on_progress: Option<ProgressCallback>,
}

impl<P: Prober> ScanEngine<P> {
    pub fn new(prober: P, cfg: &Config) -> anyhow::Result<Self> {
        cfg.validate()?;

        Ok(Self {
            prober: Arc::new(prober),
            gate: AdmissionGate::new(cfg.concurrency)?,
            filter: Arc::new(cfg.filter.clone()),
            failure_policy: cfg.failure_policy,
            on_progress: None,
        })
    }

    pub fn with_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    /// Probes every unit and returns the kept results in completion order.
    ///
    /// Returns only once every dispatched unit has finished.
    pub async fn run(&self, units: Vec<ProbeUnit>) -> anyhow::Result<Vec<ProbeResult>> {
        let total: usize = units.len();
        let results = ResultSet::new();
        let mut tasks: JoinSet<()> = JoinSet::new();
        let mut completed: usize = 0;

        for unit in units {
            let slot = self.gate.admit().await?;
            let prober = Arc::clone(&self.prober);
            let filter = Arc::clone(&self.filter);
            let results = results.clone();
            let policy = self.failure_policy;

            tasks.spawn(async move {
                let _slot = slot;
                execute(prober.as_ref(), unit, &filter, policy, &results).await;
            });

            while let Some(joined) = tasks.try_join_next() {
                completed += 1;
                self.on_task_finished(joined, completed, total);
            }
        }

        while let Some(joined) = tasks.join_next().await {
            completed += 1;
            self.on_task_finished(joined, completed, total);
        }

        Ok(results.into_vec())
    }

    fn on_task_finished(&self, joined: Result<(), JoinError>, completed: usize, total: usize) {
        if let Err(e) = joined {
            error!("Probe task aborted: {e}");
        }
        if let Some(on_progress) = &self.on_progress {
            on_progress(completed, total);
        }
    }
}

async fn execute<P: Prober + ?Sized>(
    prober: &P,
    unit: ProbeUnit,
    filter: &StatusFilter,
    policy: FailurePolicy,
    results: &ResultSet,
) {
    debug!("Checking {unit}");
    let outcome = prober.probe(&unit).await;

    let keep = match &outcome {
        ProbeOutcome::Completed { status } => {
            let accepted = filter.matches(*status);
            if !accepted {
                debug!("{unit} - Status: {status} (filtered)");
            }
            accepted
        }
        ProbeOutcome::Failed { error } => {
            debug!("{unit} - Error: {error}");
            policy == FailurePolicy::Record
        }
    };

    if keep {
        results.push(ProbeResult::from_outcome(unit, outcome));
    }
}

/// Runs a scan with the production HTTP prober.
pub async fn perform_scan(
    units: Vec<ProbeUnit>,
    cfg: &Config,
    on_progress: Option<ProgressCallback>,
) -> anyhow::Result<Vec<ProbeResult>> {
    let prober = HttpProber::new(cfg)?;
    let mut engine = ScanEngine::new(prober, cfg)?;
    if let Some(on_progress) = on_progress {
        engine = engine.with_progress(on_progress);
    }
    engine.run(units).await
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
