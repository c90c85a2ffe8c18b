use crate::error::TaskError;
use crate::redis_queue::{RedisScheduler, Task};
use metrics::{counter, gauge};
use prometheus::{Counter, Gauge, Registry};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, SystemTime};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::sleep;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TaskStatus {
	Success,
	Failed { error: String, retry_count: u32 },
	Cancelled,
	TimedOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
	pub task_id: String,
	pub status: TaskStatus,
	pub execution_time: Duration,
	pub completed_at: SystemTime,
}

// Worker configuration
#[derive(Clone, Debug)]
pub struct WorkerConfig {
	pub prefetch_count: usize,
	pub max_retries: u32,
	pub retry_delay: Duration,
	pub task_timeout: Duration,
	pub heartbeat_interval: Duration,
}

impl Default for WorkerConfig {
	fn default() -> Self {
		Self {
			prefetch_count: 10,
			max_retries: 3,
			retry_delay: Duration::from_secs(60),
			task_timeout: Duration::from_secs(300),
			heartbeat_interval: Duration::from_secs(30),
		}
	}
}

pub struct WorkerPool {
	config: WorkerConfig,
	scheduler: Arc<Mutex<RedisScheduler>>,
	registry: Registry,
	active_workers: Counter,
	queue_size: Gauge,
	task_counter: Counter,
	error_counter: Counter,
}

impl WorkerPool {
	pub fn new(scheduler: RedisScheduler, config: WorkerConfig, registry: Registry) -> Self {
		let active_workers = Counter::new("worker_pool_active_workers", "Number of active workers").unwrap();
		let queue_size = Gauge::new("worker_pool_queue_size", "Current queue size").unwrap();
		let task_counter = Counter::new("worker_pool_tasks_processed", "Total tasks processed").unwrap();
		let error_counter = Counter::new("worker_pool_task_errors", "Total task errors").unwrap();

		registry.register(Box::new(active_workers.clone())).unwrap();
		registry.register(Box::new(queue_size.clone())).unwrap();
		registry.register(Box::new(task_counter.clone())).unwrap();
		registry.register(Box::new(error_counter.clone())).unwrap();

		Self {
			config,
			scheduler: Arc::new(Mutex::new(scheduler)),
			registry,
			active_workers,
			queue_size,
			task_counter,
			error_counter,
		}
	}

	pub async fn start(&self, num_workers: usize) -> Result<(), TaskError> {
		let (tx, mut rx) = mpsc::channel(100);

		// Start worker threads
		for id in 0..num_workers {
			let worker_tx = tx.clone();
			let scheduler = Arc::clone(&self.scheduler);
			let config = self.config.clone();

			tokio::spawn(async move {
				let worker = Worker::new(id, scheduler, config);
				worker.run(worker_tx).await;
			});

			self.active_workers.inc();
		}

		// Start supervisor thread
		let scheduler = Arc::clone(&self.scheduler);
		let config = self.config.clone();

		tokio::spawn(async move {
			let supervisor = Supervisor::new(scheduler, config);
			supervisor.run().await;
		});

		// Result handler
		while let Some(result) = rx.recv().await {
			self.handle_task_result(result).await?;
		}

		Ok(())
	}

	async fn handle_task_result(&self, result: TaskResult) -> Result<(), TaskError> {
		self.task_counter.inc();

		match result.status {
			TaskStatus::Success => {
				// Store successful result
				let mut scheduler = self.scheduler.lock().unwrap();
				scheduler.set_expiration(&result.task_id, Duration::from_secs(3600))?;
			}
			TaskStatus::Failed { error, retry_count } => {
				self.error_counter.inc();

				if retry_count < self.config.max_retries {
					// Requeue for retry
					let mut scheduler = self.scheduler.lock().unwrap();
					let task = scheduler
						.get_tasks_by_pattern(&format!("task:{}", result.task_id))?
						.pop()
						.ok_or_else(|| TaskError::QueueError("Task not found".into()))?;

					tokio::time::sleep(self.config.retry_delay).await;
					scheduler.enqueue(task)?;
				} else {
					// Move to dead letter queue
					// Implementation depends on your dead letter queue strategy
				}
			}
			TaskStatus::Cancelled | TaskStatus::TimedOut => {
				self.error_counter.inc();
				// Handle cancelled or timed out tasks
			}
		}

		Ok(())
	}
}

// Worker implementation
struct Worker {
	id: usize,
	scheduler: Arc<Mutex<RedisScheduler>>,
	config: WorkerConfig,
}

impl Worker {
	fn new(id: usize, scheduler: Arc<Mutex<RedisScheduler>>, config: WorkerConfig) -> Self {
		Self { id, scheduler, config }
	}

	async fn run(&self, result_tx: mpsc::Sender<TaskResult>) {
		loop {
			// Fetch batch of tasks
			let tasks = {
				let mut scheduler = self.scheduler.lock().unwrap();
				scheduler.dequeue_batch(self.config.prefetch_count).unwrap_or_default()
			};

			for task in tasks {
				let start_time = SystemTime::now();

				// Execute task with timeout
				let status = tokio::select! {
						_ = sleep(self.config.task_timeout) => {
								TaskStatus::TimedOut
						}
						result = self.execute_task(&task) => {
								match result {
										Ok(()) => TaskStatus::Success,
										Err(e) => TaskStatus::Failed {
												error: e.to_string(),
												retry_count: 0,
										},
								}
						}
				};

				let result = TaskResult {
					task_id: task.id,
					status,
					execution_time: start_time.elapsed().unwrap(),
					completed_at: SystemTime::now(),
				};

				if result_tx.send(result).await.is_err() {
					return; // Channel closed, worker should shut down
				}
			}

			// Small delay to prevent tight polling
			sleep(Duration::from_millis(100)).await;
		}
	}

	async fn execute_task(&self, task: &Task) -> Result<(), TaskError> {
		// Actual task execution would go here
		// This is a placeholder that simulates work
		sleep(Duration::from_secs(task.execution_time)).await;
		Ok(())
	}
}

// Supervisor implementation
struct Supervisor {
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
