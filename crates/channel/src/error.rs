use progression::ErrorSeverity;

/// Errors surfaced by the live-character mutators.
///
/// Rejected-as-suspicious client requests are not errors: they are silent
/// no-ops logged at `warn!`. The only `Err` this crate produces is the fatal
/// invariant below.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VitalsError {
    /// A mutator could not resolve its owning live session.
    ///
    /// Mutators only run inside the owning session's event stream, so this
    /// can only mean retained state after disconnect, a programming error.
    /// The operation aborts before mutating anything.
    #[error("owning session is no longer resolvable")]
    SessionDetached,
}

impl VitalsError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SessionDetached => ErrorSeverity::Fatal,
        }
    }
}

pub type Result<T> = std::result::Result<T, VitalsError>;
