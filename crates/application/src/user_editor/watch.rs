use std::time::Duration;

use tokio::sync::mpsc;

use crate::ChangeNotification;

use super::*;

impl UserEditor {
    /// Consumes change notifications for the lifetime of the editing surface.
    ///
    /// After each notification the debounce interval is waited out and only
    /// the latest event of the burst is considered; a matching subject
    /// triggers a full reload. Reload failures are already surfaced by
    /// [`UserEditor::load`], so the listener logs and keeps running. Returns
    /// once the stream closes.
    pub async fn run_change_listener(
        &mut self,
        receiver: &mut mpsc::Receiver<ChangeNotification>,
        debounce: Duration,
    ) {
        while let Some(notification) = receiver.recv().await {
            tokio::time::sleep(debounce).await;
            let mut latest = notification;
            while let Ok(newer) = receiver.try_recv() {
                latest = newer;
            }

            let matches = self
                .current_user_id
                .as_ref()
                .is_some_and(|user_id| user_id.as_str() == latest.subject_id);
            if !matches {
                continue;
            }

            if let Err(error) = self.load().await {
                tracing::warn!(
                    error = %error,
                    kind = error.kind_str(),
                    "reload after change notification failed"
                );
            }
        }
    }
}
