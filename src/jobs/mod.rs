use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info};

pub mod tasks;

/// Job scheduler for background tasks
pub struct JobScheduler {
    context: Arc<crate::context::AppContext>,
}

impl JobScheduler {
    pub fn new(context: Arc<crate::context::AppContext>) -> Self {
        Self { context }
    }

    /// Start background jobs enabled by configuration
    pub fn start(self: Arc<Self>) {
        match self.context.config.retention.cleanup_interval_secs {
            Some(secs) => {
                info!("Starting retention job (every {}s)", secs);
                tokio::spawn(Self::retention_job(Arc::clone(&self), Duration::from_secs(secs)));
            }
            None => info!("Retention job disabled; expiry runs only via POST /cleanup"),
        }
    }

    /// Expire old files on a fixed period
    async fn retention_job(scheduler: Arc<Self>, period: Duration) {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            match tasks::expire_old_files(&scheduler.context).await {
                Ok(count) => {
                    if count > 0 {
                        info!("Retention job expired {} files", count);
                    }
                }
                Err(e) => error!("Retention job failed: {}", e),
            }
        }
    }
}
