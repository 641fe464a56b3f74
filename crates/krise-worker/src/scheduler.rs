//! Cron scheduler wiring for periodic tasks.

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing::{error, info};

use krise_core::config::WorkerConfig;
use krise_core::error::AppError;
use krise_core::result::AppResult;
use krise_service::StorageService;

/// Owns the cron scheduler and the registered jobs.
pub struct WorkerScheduler {
    scheduler: JobScheduler,
    config: WorkerConfig,
}

impl std::fmt::Debug for WorkerScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerScheduler")
            .field("config", &self.config)
            .finish()
    }
}

impl WorkerScheduler {
    /// Creates an empty scheduler.
    pub async fn new(config: WorkerConfig) -> AppResult<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;
        Ok(Self { scheduler, config })
    }

    /// Registers the daily storage expiry scan.
    pub async fn register_expiry_scan(&self, storage: StorageService) -> AppResult<()> {
        let window_days = self.config.expiry_window_days;
        let job = CronJob::new_async(self.config.expiry_cron.as_str(), move |_id, _lock| {
            let storage = storage.clone();
            Box::pin(async move {
                match storage.run_expiry_scan(window_days).await {
                    Ok(persisted) => {
                        info!(persisted, "Storage expiry scan finished");
                    }
                    Err(e) => {
                        error!(error = %e, "Storage expiry scan failed");
                    }
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create expiry scan schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add expiry scan schedule: {e}")))?;

        info!(cron = %self.config.expiry_cron, window_days, "Registered: storage expiry scan");
        Ok(())
    }

    /// Starts ticking.
    pub async fn start(&self) -> AppResult<()> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;
        info!("Worker scheduler started");
        Ok(())
    }

    /// Stops the scheduler. Running jobs finish their current tick.
    pub async fn shutdown(&mut self) -> AppResult<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shut down scheduler: {e}")))?;
        info!("Worker scheduler shut down");
        Ok(())
    }
}
