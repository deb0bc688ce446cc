//! Test utility work implementations for jobline

use async_trait::async_trait;
use jobline::Work;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Work that yields once so concurrent runs interleave, then succeeds
pub struct SucceedingWork;

#[async_trait]
impl Work for SucceedingWork {
    async fn perform(&self) -> anyhow::Result<()> {
        tokio::task::yield_now().await;
        Ok(())
    }
}

/// Work that always fails with the given message
pub struct FailingWork(pub &'static str);

#[async_trait]
impl Work for FailingWork {
    async fn perform(&self) -> anyhow::Result<()> {
        anyhow::bail!("{}", self.0)
    }
}

/// Work that sleeps for the given duration, then succeeds
pub struct SlowWork(pub Duration);

#[async_trait]
impl Work for SlowWork {
    async fn perform(&self) -> anyhow::Result<()> {
        tokio::time::sleep(self.0).await;
        Ok(())
    }
}

/// Work that counts its invocations and optionally fails
pub struct CountingWork {
    pub calls: Arc<AtomicUsize>,
    pub fail: bool,
}

impl CountingWork {
    pub fn succeeding(calls: Arc<AtomicUsize>) -> Self {
        Self { calls, fail: false }
    }

    pub fn failing(calls: Arc<AtomicUsize>) -> Self {
        Self { calls, fail: true }
    }
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
