use std::time::Instant;

/// Logs how long it lived, at `info` level, when dropped.
pub struct LogDuration {
    operation: String,
    start: Instant,
}

impl LogDuration {
    pub fn new(operation: impl Into<String>) -> Self {
        LogDuration { operation: operation.into(), start: Instant::now() }
    }
}

impl Drop for LogDuration {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        tracing::info!(operation = %self.operation, took_ms = elapsed.as_secs_f64() * 1000.0, "operation finished");
    }
}
