//! Event delivery
//!
//! A session publishes boundary-shaped events into a bounded channel; one
//! normalizer task per mounted surface turns them into [`SessionState`]s and
//! republishes them to the caller's receiver.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};
use visage_core::{normalize, RawEvent, SessionState};

/// Sending half used by a session to publish its transitions
#[derive(Clone, Debug)]
pub struct EventPublisher {
    tx: mpsc::Sender<RawEvent>,
}

impl EventPublisher {
    /// Publish a state in its wire shape
    ///
    /// Returns false once nobody is listening anymore.
    pub async fn publish(&self, state: SessionState) -> bool {
        let event = match state.to_wire() {
            Ok(wire) => RawEvent::Wire(wire),
            Err(err) => {
                debug!(error = %err, "publishing structured state");
                RawEvent::Structured(state)
            }
        };
        self.tx.send(event).await.is_ok()
    }
}

/// Create a publisher and spawn the normalizer forwarding to `caller`
pub fn spawn_normalizer(
    capacity: usize,
    caller: mpsc::Sender<SessionState>,
) -> (EventPublisher, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<RawEvent>(capacity.max(1));

    let handle = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let state = normalize(event);
            trace!(status = %state.status, "delivering session state");
            if caller.send(state).await.is_err() {
                debug!("caller receiver dropped, stopping normalizer");
                break;
            }
        }
    });

    (EventPublisher { tx }, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use visage_core::{SessionError, SessionStatus};

    #[tokio::test]
    async fn test_states_arrive_normalized_and_in_order() {
        let (caller_tx, mut caller_rx) = mpsc::channel(4);
        let (publisher, handle) = spawn_normalizer(4, caller_tx);

        assert!(publisher.publish(SessionState::ready()).await);
        assert!(
            publisher
                .publish(SessionError::Aborted("timeout".into()).into_state())
                .await
        );
        drop(publisher);

        assert_eq!(caller_rx.recv().await.unwrap(), SessionState::ready());
        let cancelled = caller_rx.recv().await.unwrap();
        assert_eq!(cancelled.status, SessionStatus::Cancelled);
        assert_eq!(cancelled.message.as_deref(), Some("timeout"));
        assert_eq!(caller_rx.recv().await, None);
        handle.await.unwrap();
    }
}
