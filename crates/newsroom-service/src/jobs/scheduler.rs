//! Cron scheduler for recurring in-process jobs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cron::Schedule;
use newsroom_core::{NewsroomError, NewsroomResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::interval;
use tracing::{debug, error, info};

/// Work the scheduler can run.
#[async_trait]
pub trait ScheduledTask: Send + Sync {
    /// Unique job name, used in logs and as the registry key.
    fn name(&self) -> &str;

    /// Runs the job once.
    async fn run(&self) -> NewsroomResult<()>;
}

/// Scheduled job definition.
#[derive(Clone)]
pub struct ScheduledJob {
    /// Unique name for this scheduled job.
    pub name: String,

    /// Cron expression.
    pub cron: String,

    schedule: Schedule,

    task: Arc<dyn ScheduledTask>,

    last_run: Option<DateTime<Utc>>,

    /// Is job enabled.
    pub enabled: bool,
}

impl std::fmt::Debug for ScheduledJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledJob")
            .field("name", &self.name)
            .field("cron", &self.cron)
            .field("enabled", &self.enabled)
            .field("last_run", &self.last_run)
            .finish()
    }
}

impl ScheduledJob {
    /// Creates a scheduled job. Fails with `Configuration` on a bad cron
    /// expression.
    pub fn new(cron_expr: &str, task: Arc<dyn ScheduledTask>) -> NewsroomResult<Self> {
        let schedule = Schedule::from_str(cron_expr).map_err(|e| {
            NewsroomError::Configuration(format!("Invalid cron expression '{}': {}", cron_expr, e))
        })?;

        Ok(Self {
            name: task.name().to_string(),
            cron: cron_expr.to_string(),
            schedule,
            task,
            last_run: None,
            enabled: true,
        })
    }

    /// Set whether the job is enabled.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Calculate the next run time after `from`.
    #[must_use]
    pub fn next_run_from(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&from).next()
    }

    /// Whether the job should run at `now`.
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        if !self.enabled {
            return false;
        }
        match self.last_run {
            None => true,
            Some(last_run) => self
                .next_run_from(last_run)
                .is_some_and(|next_run| next_run <= now),
        }
    }
}

/// Summary of a registered job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledJobInfo {
    pub name: String,
    pub cron: String,
    pub enabled: bool,
    pub last_run: Option<DateTime<Utc>>,
    pub next_run: Option<DateTime<Utc>>,
}

/// In-process cron scheduler.
pub struct Scheduler {
    poll_interval: Duration,

    jobs: Arc<RwLock<HashMap<String, ScheduledJob>>>,

    shutdown_tx: broadcast::Sender<()>,

    running: AtomicBool,

    stop_requested: AtomicBool,

    jobs_executed: AtomicU64,
}

impl Scheduler {
    /// Creates a scheduler that checks for due jobs every `poll_interval`.
    #[must_use]
    pub fn new(poll_interval: Duration) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            poll_interval,
            jobs: Arc::new(RwLock::new(HashMap::new())),
            shutdown_tx,
            running: AtomicBool::new(false),
            stop_requested: AtomicBool::new(false),
            jobs_executed: AtomicU64::new(0),
        }
    }

    /// Register a scheduled job, replacing any job with the same name.
    pub fn register(&self, job: ScheduledJob) {
        let name = job.name.clone();
        info!(job_name = %name, cron = %job.cron, "Registered scheduled job");
        self.jobs.write().insert(name, job);
    }

    /// Register a task with a cron expression.
    pub fn schedule(&self, cron_expr: &str, task: Arc<dyn ScheduledTask>) -> NewsroomResult<()> {
        let job = ScheduledJob::new(cron_expr, task)?;
        self.register(job);
        Ok(())
    }

    /// Unregister a scheduled job.
    pub fn unregister(&self, name: &str) -> Option<ScheduledJob> {
        self.jobs.write().remove(name)
    }

    /// Runs every job due at `now` and returns how many ran.
    ///
    /// A job is marked as run before it starts, so a failing job waits for
    /// its next slot instead of retrying on every poll.
    pub async fn run_due(&self, now: DateTime<Utc>) -> usize {
        let due: Vec<Arc<dyn ScheduledTask>> = {
            let mut jobs = self.jobs.write();
            jobs.values_mut()
                .filter(|job| job.is_due(now))
                .map(|job| {
                    job.last_run = Some(now);
                    job.task.clone()
                })
                .collect()
        };

        for task in &due {
            debug!(job_name = %task.name(), "Running scheduled job");
            match task.run().await {
                Ok(()) => {
                    self.jobs_executed.fetch_add(1, Ordering::Relaxed);
                    info!(job_name = %task.name(), "Scheduled job completed");
                }
                Err(e) => {
                    error!(job_name = %task.name(), error = %e, "Scheduled job failed");
                }
            }
        }

        due.len()
    }

    /// Start the scheduler. Returns once `stop` is called.
    pub async fn start(&self) -> NewsroomResult<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(NewsroomError::Configuration(
                "Scheduler already running".to_string(),
            ));
        }

        info!(
            poll_interval_secs = self.poll_interval.as_secs(),
            jobs = self.jobs.read().len(),
            "Starting scheduler"
        );

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let mut poll_interval = interval(self.poll_interval);

        while !self.stop_requested.load(Ordering::SeqCst) {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Received shutdown signal");
                    break;
                }

                _ = poll_interval.tick() => {
                    self.run_due(Utc::now()).await;
                }
            }
        }

        self.running.store(false, Ordering::SeqCst);
        info!("Scheduler stopped");

        Ok(())
    }

    /// Stop the scheduler.
    pub fn stop(&self) {
        info!("Stopping scheduler...");
        self.stop_requested.store(true, Ordering::SeqCst);
        let _ = self.shutdown_tx.send(());
    }

    /// Whether `start` is currently looping.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Number of successful job runs.
    pub fn jobs_executed(&self) -> u64 {
        self.jobs_executed.load(Ordering::Relaxed)
    }

    /// List all registered scheduled jobs.
    pub fn list_jobs(&self) -> Vec<ScheduledJobInfo> {
        let now = Utc::now();
        let mut jobs: Vec<ScheduledJobInfo> = self
            .jobs
            .read()
            .values()
            .map(|job| ScheduledJobInfo {
                name: job.name.clone(),
                cron: job.cron.clone(),
                enabled: job.enabled,
                last_run: job.last_run,
                next_run: job.next_run_from(now),
            })
            .collect();
        jobs.sort_by(|a, b| a.name.cmp(&b.name));
        jobs
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("poll_interval", &self.poll_interval)
            .field("running", &self.is_running())
            .field("jobs", &self.jobs.read().len())
            .finish()
    }
}
