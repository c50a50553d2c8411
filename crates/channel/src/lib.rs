//! Live-character layer of the progression engine.
//!
//! This crate owns [`PlayerVitals`], the authoritative per-character state
//! object, and wires it to its collaborators: the owning session (resolved
//! through a weak handle on every mutation), the equip qualification catalog,
//! the buff/skill queries, and the world-wide broadcast bus.
//!
//! Modules are organized by responsibility:
//! - [`vitals`] hosts the state object and every public mutator
//! - [`session`] defines the owning-session seam and its resolve-or-fail handle
//! - [`collaborators`] declares the host-supplied query traits
//! - [`packet`] carries the semantic outbound payloads
//! - [`broadcast`] provides the fire-and-forget world notice bus
pub mod broadcast;
pub mod collaborators;
pub mod context;
pub mod error;
pub mod packet;
pub mod session;
pub mod snapshot;
pub mod vitals;

pub use broadcast::WorldBroadcast;
pub use collaborators::{
    ActiveBuffs, BuffKind, CapacityKind, EquipCatalog, Instance, Inventory, Party, PassiveSkills,
    Summons, SummonDismissReason,
};
pub use context::ChannelContext;
pub use error::{Result, VitalsError};
pub use packet::{NoticeKind, Packet};
pub use session::{Gender, MapInfo, Session, SessionHandle};
pub use snapshot::VitalsSnapshot;
pub use vitals::PlayerVitals;
