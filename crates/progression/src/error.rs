//! Error severity taxonomy shared by both crates.
//!
//! The engine admits exactly two failure kinds: fatal invariant violations
//! (a mutator that cannot resolve its owning session) and client-driven
//! requests rejected as suspicious. Rejections are silent no-ops and never
//! surface as `Err`; severity exists so logging and host supervision can
//! tell the two apart at one glance.

/// Severity of a progression-engine failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// A programming-error invariant violation; the operation aborted before
    /// mutating anything and the session should be torn down.
    Fatal,
    /// A malformed or out-of-range client request, dropped without mutation.
    Rejected,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::Rejected => "rejected",
        }
    }

    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}
