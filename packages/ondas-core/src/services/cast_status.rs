//! Published casting session status.
//!
//! The casting SDK lives in the shell; its session listener posts
//! start/end notifications into an mpsc channel. This adapter mirrors
//! those notifications into a `watch`-published [`CastStatus`] that UI
//! layers bind to, and forwards each notification to the event bridge.
//! No session lifecycle or protocol logic lives here.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::{mpsc, watch};

use crate::events::{CastEvent, EventEmitter};
use crate::runtime::{TaskSpawner, TokioSpawner};

/// Mirrored casting session state for UI binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CastStatus {
    /// Whether a casting session is currently established.
    pub session_active: bool,
    /// Friendly name of the receiver device while a session is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
}

/// Turns SDK session notifications into published state.
pub struct CastStatusAdapter {
    status_tx: watch::Sender<CastStatus>,
    emitter: Arc<dyn EventEmitter>,
    session_rx: Arc<Mutex<Option<mpsc::Receiver<CastEvent>>>>,
    /// Task spawner for the forwarding loop.
    spawner: TokioSpawner,
}

impl CastStatusAdapter {
    /// Creates a new adapter draining the given notification channel.
    pub fn new(
        emitter: Arc<dyn EventEmitter>,
        session_rx: mpsc::Receiver<CastEvent>,
        spawner: TokioSpawner,
    ) -> Self {
        let (status_tx, _) = watch::channel(CastStatus::default());
        Self {
            status_tx,
            emitter,
            session_rx: Arc::new(Mutex::new(Some(session_rx))),
            spawner,
        }
    }

    /// Applies one session notification: updates the published state and
    /// re-emits the event to listeners.
    pub fn handle_event(&self, event: &CastEvent) {
        Self::apply(&self.status_tx, self.emitter.as_ref(), event);
    }

    /// Core mirroring logic shared by direct calls and the forwarder task.
    fn apply(status_tx: &watch::Sender<CastStatus>, emitter: &dyn EventEmitter, event: &CastEvent) {
        match event {
            CastEvent::SessionStarted { device_name, .. } => {
                log::info!("[CastStatus] Session started on {}", device_name);
                status_tx.send_replace(CastStatus {
                    session_active: true,
                    device_name: Some(device_name.clone()),
                });
            }
            CastEvent::SessionEnded { .. } => {
                log::info!("[CastStatus] Session ended");
                status_tx.send_replace(CastStatus::default());
            }
        }
        emitter.emit_cast(event.clone());
    }

    /// Spawns the task that drains SDK notifications into published state.
    ///
    /// The receiver is taken once; calling this a second time spawns a
    /// task that exits immediately. The loop ends when the SDK-side
    /// sender drops.
    pub fn start_event_forwarder(&self) {
        let status_tx = self.status_tx.clone();
        let emitter = Arc::clone(&self.emitter);
        let session_rx = Arc::clone(&self.session_rx);

        self.spawner.spawn(async move {
            let rx = session_rx.lock().take();
            if let Some(mut rx) = rx {
                while let Some(event) = rx.recv().await {
                    Self::apply(&status_tx, emitter.as_ref(), &event);
                }
            }
        });
    }

    /// Returns a receiver observing the published session status.
    pub fn subscribe(&self) -> watch::Receiver<CastStatus> {
        self.status_tx.subscribe()
    }

    /// Snapshot of the current session status.
    pub fn current(&self) -> CastStatus {
        self.status_tx.borrow().clone()
    }

    /// Whether a casting session is currently established.
    pub fn is_casting(&self) -> bool {
        self.status_tx.borrow().session_active
    }
}
