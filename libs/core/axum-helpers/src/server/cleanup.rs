use std::future::Future;
use std::pin::Pin;
use tracing::{error, info};

type CleanupTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Collects named shutdown tasks and runs them concurrently on [`run`](Self::run).
///
/// ```ignore
/// let mut cleanup = CleanupCoordinator::new();
/// cleanup.add_task("mongodb", async move { client.shutdown().await });
/// create_production_app(router, &config.server, timeout, cleanup.run()).await?;
/// ```
pub struct CleanupCoordinator {
    tasks: Vec<(&'static str, CleanupTask)>,
}

impl CleanupCoordinator {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Register `task` under `name`; nothing runs until [`run`](Self::run).
    pub fn add_task<F>(&mut self, name: &'static str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.push((name, Box::pin(task)));
    }

    /// Spawn every task and wait for all of them. A panicking task is logged
    /// and does not stop the others.
    pub async fn run(self) {
        info!("Running {} cleanup tasks", self.tasks.len());

        let handles: Vec<_> = self
            .tasks
            .into_iter()
            .map(|(name, task)| (name, tokio::spawn(task)))
            .collect();

        for (name, handle) in handles {
            match handle.await {
                Ok(()) => info!("Cleanup task '{}' completed successfully", name),
                Err(e) => error!("Cleanup task '{}' failed: {}", name, e),
            }
        }
    }
}

impl Default for CleanupCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_tasks_wait_for_run() {
        let done = Arc::new(AtomicUsize::new(0));
        let mut cleanup = CleanupCoordinator::new();

        let counter = done.clone();
        cleanup.add_task("deferred", async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::task::yield_now().await;
        assert_eq!(done.load(Ordering::SeqCst), 0);

        cleanup.run().await;
        assert_eq!(done.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_runs_all_tasks_even_if_one_panics() {
        let done = Arc::new(AtomicUsize::new(0));
        let mut cleanup = CleanupCoordinator::new();

        let counter = done.clone();
        cleanup.add_task("ok", async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        cleanup.add_task("boom", async { panic!("cleanup failed") });
        let counter = done.clone();
        cleanup.add_task("ok-too", async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cleanup.run().await;
        assert_eq!(done.load(Ordering::SeqCst), 2);
    }
}
