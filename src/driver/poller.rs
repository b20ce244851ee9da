use crate::utils::progress::ProgressReporter;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Waits for an export to appear, checking at a fixed interval.
///
/// There is no upper bound on the wait: the producer writes the file when
/// its model run finishes.
pub struct FilePoller {
    interval: Duration,
}

impl FilePoller {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the number of checks it took to see the file.
    ///
    /// A check that fails with an I/O error counts as "not there yet".
    pub async fn wait_for(&self, path: &Path, progress: Option<&ProgressReporter>) -> u32 {
        let mut checks: u32 = 0;
        loop {
            checks = checks.saturating_add(1);
            let exists = match tokio::fs::try_exists(path).await {
                Ok(exists) => exists,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "could not check for export");
                    false
                }
            };
            if exists {
                debug!(path = %path.display(), checks, "export available");
                return checks;
            }

            if checks == 1 {
                info!(
                    path = %path.display(),
                    interval_secs = self.interval.as_secs(),
                    "export not available yet, waiting"
                );
            }
            if let Some(p) = progress {
                p.set_message(&format!("Waiting for {} (check {})", path.display(), checks));
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}
