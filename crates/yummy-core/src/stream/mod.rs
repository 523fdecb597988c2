// ── Reactive state streams ──
//
// Subscription types for consuming root state changes from the Store.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::RootState;

/// A subscription to the root state.
///
/// Provides both point-in-time snapshot access and change notification
/// via `changed()` or by converting to a `Stream`.
pub struct StateStream {
    current: Arc<RootState>,
    receiver: watch::Receiver<Arc<RootState>>,
}

impl StateStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<RootState>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation (or at the last `changed()`).
    pub fn current(&self) -> &Arc<RootState> {
        &self.current
    }

    pub fn latest(&self) -> Arc<RootState> {
        self.receiver.borrow().clone()
    }

    /// Whether a transition was committed since the last `changed()`.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next committed transition, returning the new snapshot.
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<RootState>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    pub fn into_stream(self) -> StateWatchStream {
        StateWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter yielding the current snapshot first, then one
/// snapshot per committed transition.
pub struct StateWatchStream {
    inner: WatchStream<Arc<RootState>>,
}

impl Stream for StateWatchStream {
    type Item = Arc<RootState>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
