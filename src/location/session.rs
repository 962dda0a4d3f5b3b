//! Location fetch scoped to one screen activation.

use crate::app::event::{ActivationId, AppEvent};
use crate::location::{acquire, GeoProvider, Platform};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handle to the acquisition flow of one activation.
///
/// Dropping the handle aborts the task. Events it already sent still carry
/// the activation id, so the handler can discard them once the activation
/// is over.
pub struct LocationTask {
    activation: ActivationId,
    handle: JoinHandle<()>,
}

impl LocationTask {
    pub fn spawn(
        activation: ActivationId,
        provider: Arc<dyn GeoProvider>,
        platform: Platform,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        tracing::debug!(activation, ?platform, "starting location flow");
        let handle = tokio::spawn(async move {
            let notice_tx = event_tx.clone();
            let outcome = acquire(provider.as_ref(), platform, move || {
                let _ = notice_tx.send(AppEvent::BackgroundPermissionDenied { activation });
            })
            .await;
            let _ = event_tx.send(AppEvent::LocationAcquired {
                activation,
                outcome,
            });
        });
        Self { activation, handle }
    }

    pub fn activation(&self) -> ActivationId {
        self.activation
    }

    pub fn cancel(self) {
        if !self.handle.is_finished() {
            tracing::debug!(activation = self.activation, "cancelling location flow");
        }
        // Drop aborts.
    }
}

impl Drop for LocationTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
