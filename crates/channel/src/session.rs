//! The owning-session seam.
//!
//! Every public mutator resolves its owning live session before taking
//! effect. The stats object never owns the session: it holds a weak,
//! resolvable handle, and resolution failure is a fatal invariant violation
//! rather than a recoverable result (see [`VitalsError::SessionDetached`]).

use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};

use crate::collaborators::{ActiveBuffs, Instance, Inventory, Party, PassiveSkills, Summons};
use crate::error::{Result, VitalsError};
use crate::packet::Packet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// What the engine needs to know about the character's current map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapInfo {
    pub id: u32,
    /// Deaths here use the flat reduced experience-loss rate.
    pub reduced_loss: bool,
    /// Deaths here lose no experience at all.
    pub loss_exempt: bool,
}

/// The narrow surface of a live session the progression engine consumes.
///
/// `send` and `send_to_map` are fire-and-forget capabilities; the transport
/// frames and routes the payload. Collaborator accessors borrow from the
/// session for the duration of one mutation.
pub trait Session: Send + Sync {
    fn player_id(&self) -> u32;
    fn name(&self) -> &str;
    fn gender(&self) -> Gender;

    /// Staff characters are exempt from the max-level world announcement.
    fn announce_exempt(&self) -> bool;

    fn map(&self) -> MapInfo;

    fn send(&self, packet: Packet);
    fn send_to_map(&self, packet: Packet);

    fn buffs(&self) -> &dyn ActiveBuffs;
    fn skills(&self) -> &dyn PassiveSkills;
    fn inventory(&self) -> &dyn Inventory;
    fn party(&self) -> Option<&dyn Party>;
    fn instance(&self) -> Option<&dyn Instance>;
    fn summons(&self) -> &dyn Summons;

    /// Record the moment of the most recent level-up.
    fn mark_level_up(&self);

    /// Push the new level to the channel directory (party/buddy views).
    fn publish_level(&self, level: u8);

    /// Push the new job to the channel directory.
    fn publish_job(&self, job: u16);
}

/// Weak, resolve-or-fail handle to the owning session.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Weak<dyn Session>,
}

impl SessionHandle {
    pub fn new(session: &Arc<dyn Session>) -> Self {
        Self {
            inner: Arc::downgrade(session),
        }
    }

    /// Resolve the owning session or fail fatally.
    pub fn resolve(&self) -> Result<Arc<dyn Session>> {
        self.inner.upgrade().ok_or_else(|| {
            tracing::error!("mutator invoked on a detached session");
            VitalsError::SessionDetached
        })
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("attached", &(self.inner.strong_count() > 0))
            .finish()
    }
}
