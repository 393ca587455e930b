use std::future::Future;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::errors::ScanError;
use crate::plugins::PluginDescriptor;

/// Default per-plugin execution timeout: one hour (spec §4.4).
pub const DEFAULT_PLUGIN_TIMEOUT: Duration = Duration::from_secs(3600);

/// Default pool size when not overridden by configuration: `min(32, cores * 4)`.
pub fn default_pool_size() -> usize {
    let cores = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    (cores * 4).min(32)
}

/// Outcome of running a single plugin unit, mirroring spec §4.4's envelope:
/// the plugin never panics the engine, its error (or timeout) is captured
/// alongside how long it ran.
#[derive(Debug)]
pub struct ExecutionResult<T> {
    pub descriptor: PluginDescriptor,
    pub duration: Duration,
    pub outcome: Result<T, ScanError>,
}

impl<T> ExecutionResult<T> {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Bounded pool of in-flight plugin executions. The semaphore permit count
/// *is* the pool size: each unit of work acquires a permit before running
/// and releases it on completion, so at most `pool_size` plugins run
/// concurrently regardless of how many are submitted (spec §4.4/§5).
pub struct ExecutionEngine {
    semaphore: std::sync::Arc<Semaphore>,
    plugin_timeout: Duration,
    grace_period: Duration,
}

/// Wraps `err` as `PluginExecutionFailed(descriptor, cause)` per spec §4.4,
/// unless it is already that variant (or another engine-originated signal
/// such as a timeout/cancellation, which is already a typed wrap in its own
/// right).
fn wrap_plugin_error(name: &str, err: ScanError) -> ScanError {
    match err {
        ScanError::PluginExecutionFailed { .. }
        | ScanError::TimeoutExceeded { .. }
        | ScanError::Cancelled { .. } => err,
        other => ScanError::execution_failed(name, other),
    }
}

impl ExecutionEngine {
    pub fn new(pool_size: usize, plugin_timeout: Duration) -> Self {
        Self::with_grace_period(pool_size, plugin_timeout, crate::pipeline::DEFAULT_GRACE_PERIOD)
    }

    pub fn with_grace_period(pool_size: usize, plugin_timeout: Duration, grace_period: Duration) -> Self {
        Self {
            semaphore: std::sync::Arc::new(Semaphore::new(pool_size.max(1))),
            plugin_timeout,
            grace_period,
        }
    }

    /// Runs `work` under the pool's concurrency cap and the configured
    /// per-plugin timeout, capturing its error (if any) rather than
    /// propagating it — a single plugin's failure never aborts the engine.
    ///
    /// `cancel` is the workflow-level deadline token (spec §5): once it
    /// fires, `work` is given up to `grace_period` more to finish draining
    /// before being abandoned and reported as [`ScanError::Cancelled`].
    pub async fn execute<F, T>(&self, descriptor: PluginDescriptor, cancel: &CancellationToken, work: F) -> ExecutionResult<T>
    where
        F: Future<Output = Result<T, ScanError>>,
    {
        let start = std::time::Instant::now();
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("engine semaphore is never closed");

        tokio::pin!(work);
        let outcome = tokio::select! {
            biased;
            result = timeout(self.plugin_timeout, &mut work) => match result {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(err)) => Err(wrap_plugin_error(&descriptor.name, err)),
                Err(_) => Err(ScanError::TimeoutExceeded {
                    name: descriptor.name.clone(),
                    limit_secs: self.plugin_timeout.as_secs(),
                }),
            },
            _ = cancel.cancelled() => match timeout(self.grace_period, &mut work).await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(err)) => Err(wrap_plugin_error(&descriptor.name, err)),
                Err(_) => Err(ScanError::Cancelled { name: descriptor.name.clone() }),
            },
        };
        drop(permit);

        if let Err(err) = &outcome {
            warn!(plugin = %descriptor.name, cause = %err, "plugin execution failed");
        }

        ExecutionResult { descriptor, duration: start.elapsed(), outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::PluginType;
    use std::time::Duration;

    fn descriptor() -> PluginDescriptor {
        PluginDescriptor::new(PluginType::VulnDetection, "test-plugin", "1.0.0")
    }

    #[tokio::test]
    async fn successful_work_completes() {
        let engine = ExecutionEngine::new(4, Duration::from_secs(10));
        let cancel = CancellationToken::new();
        let result = engine.execute(descriptor(), &cancel, async { Ok::<_, ScanError>(42) }).await;
        assert!(result.is_ok());
        assert_eq!(result.outcome.unwrap(), 42);
    }

    #[tokio::test]
    async fn timeout_is_reported_as_timeout_exceeded() {
        let engine = ExecutionEngine::new(4, Duration::from_millis(10));
        let cancel = CancellationToken::new();
        let result = engine
            .execute(descriptor(), &cancel, async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, ScanError>(())
            })
            .await;
        assert!(matches!(result.outcome, Err(ScanError::TimeoutExceeded { .. })));
    }

    #[tokio::test]
    async fn non_execution_error_is_wrapped_as_plugin_execution_failed() {
        let engine = ExecutionEngine::new(4, Duration::from_secs(10));
        let cancel = CancellationToken::new();
        let result = engine
            .execute(descriptor(), &cancel, async { Err::<(), _>(ScanError::Internal("boom".into())) })
            .await;
        match result.outcome {
            Err(ScanError::PluginExecutionFailed { name, cause }) => {
                assert_eq!(name, "test-plugin");
                assert!(cause.contains("boom"));
            }
            other => panic!("expected PluginExecutionFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancellation_drains_within_grace_period() {
        let engine = ExecutionEngine::with_grace_period(4, Duration::from_secs(10), Duration::from_millis(200));
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            cancel_clone.cancel();
        });
        let result = engine
            .execute(descriptor(), &cancel, async {
                tokio::time::sleep(Duration::from_millis(30)).await;
                Ok::<_, ScanError>(7)
            })
            .await;
        assert_eq!(result.outcome.unwrap(), 7);
    }

    #[tokio::test]
    async fn cancellation_past_grace_period_is_reported_as_cancelled() {
        let engine = ExecutionEngine::with_grace_period(4, Duration::from_secs(10), Duration::from_millis(10));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = engine
            .execute(descriptor(), &cancel, async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, ScanError>(())
            })
            .await;
        assert!(matches!(result.outcome, Err(ScanError::Cancelled { .. })));
    }

    #[tokio::test]
    async fn pool_size_caps_concurrency() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let engine = ExecutionEngine::new(2, Duration::from_secs(10));
        let active = std::sync::Arc::new(AtomicUsize::new(0));
        let max_seen = std::sync::Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..6 {
            let active = active.clone();
            let max_seen = max_seen.clone();
            let permit = engine.semaphore.clone();
            handles.push(tokio::spawn(async move {
                let _permit = permit.acquire_owned().await.unwrap();
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                active.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert!(max_seen.load(Ordering::SeqCst) <= 2);
    }
}
