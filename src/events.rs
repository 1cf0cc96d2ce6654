//! Platform events (resize, history, keyboard, infinite-scroll sentinel)
//! fanned out to the pages that listen for them.

use classifieds_ui_state::Key;
use tokio::sync::broadcast;

const CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    Resize { width: u32, height: u32 },
    /// Back/forward history navigation
    PopState,
    KeyDown(Key),
    /// The loader element at the end of a list scrolled into view
    SentinelVisible,
}

/// Event hub fed by the host UI
#[derive(Clone)]
pub struct PlatformEvents {
    tx: broadcast::Sender<PlatformEvent>,
}

impl Default for PlatformEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CAPACITY);
        Self { tx }
    }

    /// Delivers `event` to every live subscription. Returns how many there were.
    pub fn emit(&self, event: PlatformEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A listener. Dropping it detaches it from the hub.
pub struct Subscription {
    rx: broadcast::Receiver<PlatformEvent>,
}

impl Subscription {
    /// Next event, or `None` once the hub is gone. Events dropped because this
    /// listener fell behind are skipped.
    pub async fn recv(&mut self) -> Option<PlatformEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::warn!("Listener fell behind, skipped {} events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next event if one is already queued
    pub fn try_recv(&mut self) -> Option<PlatformEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    log::warn!("Listener fell behind, skipped {} events", skipped);
                }
                Err(_) => return None,
            }
        }
    }
}
