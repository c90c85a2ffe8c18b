
pub struct Supervisor {
    scheduler: Arc<Mutex<RedisScheduler>>,
    config: WorkerConfig,
}

impl Supervisor {
    fn new(scheduler: Arc<Mutex<RedisScheduler>>, config: WorkerConfig) -> Self {
        Self { scheduler, config }
    }

    async fn run(&self) {
        loop {
            self.check_worker_health().await;
            self.update_metrics().await;
            sleep(self.config.heartbeat_interval).await;
        }
    }

    async fn check_worker_health(&self) {
        // Implement worker health checking logic
        // For example, checking last heartbeat time
    }

    async fn update_metrics(&self) {
        if let Ok(mut scheduler) = self.scheduler.lock() {
            if let Ok(lengths) = scheduler.get_queue_lengths() {
                // Update Prometheus metrics
                for (i, len) in lengths.iter().enumerate() {
                    gauge!("queue_length", *len as f64, "queue" => i.to_string());
                }
            }
        }
    }
}
