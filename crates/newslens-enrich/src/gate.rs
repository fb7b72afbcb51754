//! Serializes inference on a single accelerator.

use std::future::Future;
use std::sync::Arc;

use newslens_core::InferenceDevice;
use tokio::sync::Semaphore;

/// Admission control shared by every adapter.
///
/// On [`InferenceDevice::Accelerator`] one permit is shared process-wide, so
/// at most one inference call runs at a time. On CPU the gate is open.
#[derive(Debug, Clone, Default)]
pub struct InferenceGate {
    permits: Option<Arc<Semaphore>>,
}

impl InferenceGate {
    #[must_use]
    pub fn for_device(device: InferenceDevice) -> Self {
        match device {
            InferenceDevice::Cpu => Self::open(),
            InferenceDevice::Accelerator => Self::exclusive(),
        }
    }

    #[must_use]
    pub fn open() -> Self {
        Self { permits: None }
    }

    #[must_use]
    pub fn exclusive() -> Self {
        Self {
            permits: Some(Arc::new(Semaphore::new(1))),
        }
    }

    #[must_use]
    pub fn is_exclusive(&self) -> bool {
        self.permits.is_some()
    }

    /// Runs `fut` while holding the permit, if the gate has one.
    pub async fn run<F: Future>(&self, fut: F) -> F::Output {
        let _permit = match &self.permits {
            // The semaphore is never closed, so acquire only fails if that changes.
            Some(permits) => permits.acquire().await.ok(),
            None => None,
        };
        fut.await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    async fn track(active: &AtomicUsize, peak: &AtomicUsize) {
        let now = active.fetch_add(1, Ordering::SeqCst) + 1;
        peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        active.fetch_sub(1, Ordering::SeqCst);
    }

    #[tokio::test]
    async fn exclusive_gate_runs_one_at_a_time() {
        let gate = InferenceGate::for_device(InferenceDevice::Accelerator);
        assert!(gate.is_exclusive());
        let active = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        tokio::join!(
            gate.run(track(&active, &peak)),
            gate.run(track(&active, &peak)),
            gate.run(track(&active, &peak)),
        );
        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn open_gate_allows_overlap() {
        let gate = InferenceGate::for_device(InferenceDevice::Cpu);
        assert!(!gate.is_exclusive());
        let active = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        tokio::join!(
            gate.run(track(&active, &peak)),
            gate.run(track(&active, &peak)),
        );
        assert_eq!(peak.load(Ordering::SeqCst), 2);
    }
}
