use std::future::Future;
use std::time::Duration;

/// Call contract for every remote request: one attempt, bounded by a timeout.
///
/// Nothing is retried. A call that does not finish in time is dropped and the
/// caller receives the error produced by `on_timeout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneShot {
    timeout: Duration,
}

impl OneShot {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn call<T, E, F>(&self, call: F, on_timeout: impl FnOnce() -> E) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "remote call timed out");
                Err(on_timeout())
            }
        }
    }
}

impl Default for OneShot {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}
