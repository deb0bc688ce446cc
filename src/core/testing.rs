//! Mock work implementations shared by unit tests

use crate::core::Work;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Work that sleeps for the given duration, then succeeds
pub(crate) struct SlowWork(pub Duration);

#[async_trait]
impl Work for SlowWork {
    async fn perform(&self) -> anyhow::Result<()> {
        tokio::time::sleep(self.0).await;
        Ok(())
    }
}

/// Work that counts its invocations and optionally fails
pub(crate) struct CountingWork {
    pub calls: Arc<AtomicUsize>,
    pub fail: bool,
}

#[async_trait]
impl Work for CountingWork {
    async fn perform(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("synthetic failure");
        }
        Ok(())
    }
}
