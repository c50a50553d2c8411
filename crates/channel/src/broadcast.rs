//! World-wide notice bus.
//!
//! Cross-channel announcements (the max-level congratulation) are dispatched
//! as fire-and-forget broadcast messages; each channel server subscribes and
//! relays to its own connected players. Publishing never blocks gameplay.

use tokio::sync::broadcast;

use crate::packet::Packet;

/// Fire-and-forget broadcast bus reaching every connected channel.
#[derive(Clone)]
pub struct WorldBroadcast {
    tx: broadcast::Sender<Packet>,
}

impl WorldBroadcast {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish a notice to every subscribed channel.
    ///
    /// Best-effort: a bus with no subscribers is normal (single-channel
    /// deployments, tests), not an error.
    pub fn publish(&self, packet: Packet) {
        if self.tx.send(packet).is_err() {
            tracing::trace!("world broadcast has no subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Packet> {
        self.tx.subscribe()
    }
}

impl Default for WorldBroadcast {
    fn default() -> Self {
        Self::new()
    }
}
