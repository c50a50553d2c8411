//! Semantic outbound payloads.
//!
//! The engine never frames wire messages; it emits these payloads through the
//! session's `send`/`send_to_map` capabilities and the world broadcast bus,
//! and the transport layer owns headers and encoding.

use serde::{Deserialize, Serialize};

use progression::StatUpdate;

/// Client-visible styling for a server notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum NoticeKind {
    Chat,
    Popup,
    Blue,
}

/// One outbound message payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Packet {
    /// Changed persisted fields, bitmask plus ordered new values.
    StatUpdate(StatUpdate),
    /// One chunk of gained experience for the client display.
    ExpGained {
        amount: i32,
        highlighted: bool,
        in_chat: bool,
    },
    /// Map-visible level-up effect for the given character.
    LevelUp { player_id: u32 },
    /// Map-visible job-change effect for the given character.
    JobChange { player_id: u32 },
    /// A loss-protection charm was consumed; `remaining` is what is left.
    CharmUsed { remaining: u8 },
    /// Acknowledges a stat-allocation request before it is applied.
    AllocationAck,
    /// Free-form server notice, also used on the world broadcast bus.
    Notice { kind: NoticeKind, text: String },
}
