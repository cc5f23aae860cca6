//! "Only the latest request wins" slot for tables and comboboxes.

use futures::future::{AbortHandle, Abortable};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct Slot {
    seq: u64,
    handle: Option<AbortHandle>,
}

/// Starting a request aborts the one in flight; [`LatestRequest::cancel`]
/// aborts whatever is running (called on unmount).
#[derive(Clone, Default)]
pub struct LatestRequest {
    slot: Arc<Mutex<Slot>>,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Run `fut`; `None` when a newer request (or a cancel) superseded it
    pub async fn run<F, T>(&self, fut: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let ticket = {
            let mut slot = self.lock();
            if let Some(previous) = slot.handle.replace(handle) {
                previous.abort();
            }
            slot.seq += 1;
            slot.seq
        };

        let result = Abortable::new(fut, registration).await;

        let mut slot = self.lock();
        if slot.seq == ticket {
            slot.handle = None;
        }
        match result {
            Ok(value) => Some(value),
            Err(_) => {
                log::debug!("request #{} superseded, response discarded", ticket);
                None
            }
        }
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.lock().handle.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.lock().handle.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::future::join;

    #[test]
    fn test_newer_request_aborts_older() {
        let latest = LatestRequest::new();
        let (tx_old, rx_old) = oneshot::channel::<&str>();

        let old = latest.run(async move { rx_old.await.unwrap_or("dropped") });
        let newer = {
            let latest = latest.clone();
            async move {
                let value = latest.run(async { "fresh" }).await;
                // the old sender resolves only after it was superseded
                let _ = tx_old.send("stale");
                value
            }
        };

        let (old_result, new_result) = block_on(join(old, newer));
        assert_eq!(old_result, None);
        assert_eq!(new_result, Some("fresh"));
        assert!(!latest.is_pending());
    }

    #[test]
    fn test_cancel_on_unmount() {
        let latest = LatestRequest::new();
        let (_tx, rx) = oneshot::channel::<u32>();
        let pending = latest.run(async move { rx.await.unwrap_or(0) });
        let cancel = {
            let latest = latest.clone();
            async move { latest.cancel() }
        };
        let (result, _) = block_on(join(pending, cancel));
        assert_eq!(result, None);
    }
}
