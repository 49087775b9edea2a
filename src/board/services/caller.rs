//! Authenticated caller identity passed into every board operation.

use crate::board::domain::OwnerId;

/// Identity of the authenticated caller of a board operation.
///
/// Services never read ambient request state; the caller is always passed
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallerContext {
    owner: OwnerId,
}

impl CallerContext {
    /// Creates a caller context for `owner`.
    #[must_use]
    pub const fn new(owner: OwnerId) -> Self {
        Self { owner }
    }

    /// Returns the owner identity of the caller.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.owner
    }
}
