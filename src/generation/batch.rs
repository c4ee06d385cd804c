use crate::{
    error::{Result, SeedreamError},
    models::{TaskOutcome, MAX_BATCH_CONCURRENCY, MAX_BATCH_TASKS, MIN_BATCH_CONCURRENCY},
};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Drives independent async units of work under a fixed concurrency cap.
///
/// Tasks are admitted in submission order; whichever in-flight task finishes
/// first vacates its slot. Outcomes come back sorted by task index no matter
/// how completion interleaved.
pub struct BatchRunner {
    max_concurrent: usize,
}

impl BatchRunner {
    pub fn new(max_concurrent: usize) -> Result<Self> {
        if !(MIN_BATCH_CONCURRENCY..=MAX_BATCH_CONCURRENCY).contains(&max_concurrent) {
            return Err(SeedreamError::ValidationError(format!(
                "max_concurrent must be between {} and {}",
                MIN_BATCH_CONCURRENCY, MAX_BATCH_CONCURRENCY
            )));
        }
        Ok(Self { max_concurrent })
    }

    pub async fn run_all<T, F, Fut>(&self, tasks: Vec<T>, run_one: F) -> Result<Vec<TaskOutcome>>
    where
        F: Fn(usize, T) -> Fut,
        Fut: Future<Output = TaskOutcome> + Send + 'static,
    {
        if tasks.is_empty() || tasks.len() > MAX_BATCH_TASKS {
            return Err(SeedreamError::ValidationError(format!(
                "tasks must contain between 1 and {} entries",
                MAX_BATCH_TASKS
            )));
        }

        log::info!(
            "📦 Running {} task(s), at most {} concurrent",
            tasks.len(),
            self.max_concurrent
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut handles = Vec::with_capacity(tasks.len());
        for (index, task) in tasks.into_iter().enumerate() {
            // Admission point: waits here while the pool is at capacity, so
            // tasks enter the running state in submission order.
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| SeedreamError::InternalError("semaphore closed".to_string()))?;
            let work = run_one(index, task);
            handles.push(tokio::spawn(async move {
                let outcome = work.await;
                drop(permit);
                outcome
            }));
        }

        let mut outcomes: Vec<TaskOutcome> = futures::future::join_all(handles)
            .await
            .into_iter()
            .enumerate()
            .map(|(index, joined)| match joined {
                Ok(outcome) => outcome,
                Err(e) => TaskOutcome::failed(index, format!("task panicked: {}", e)),
            })
            .collect();

        outcomes.sort_by_key(|outcome| outcome.task_index);
        Ok(outcomes)
    }
}
