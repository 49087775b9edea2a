//! Snapshot, patch, then commit or roll back.

/// An in-flight optimistic change to a list.
///
/// The snapshot is taken before the patch is applied; rolling back restores
/// it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an optimistic update must be committed or rolled back"]
pub struct OptimisticUpdate<T> {
    snapshot: Vec<T>,
}

impl<T: Clone> OptimisticUpdate<T> {
    /// Snapshots `current`.
    pub fn begin(current: &[T]) -> Self {
        Self {
            snapshot: current.to_vec(),
        }
    }

    /// Returns the list as it was when the update began.
    #[must_use]
    pub fn snapshot(&self) -> &[T] {
        &self.snapshot
    }

    /// Replaces `current` with `patch` applied to the snapshot.
    pub fn apply<F>(&self, current: &mut Vec<T>, patch: F)
    where
        F: FnOnce(&[T]) -> Vec<T>,
    {
        *current = patch(&self.snapshot);
    }

    /// Keeps the patched list.
    pub fn commit(self) {}

    /// Restores `current` to the snapshot.
    pub fn rollback(self, current: &mut Vec<T>) {
        *current = self.snapshot;
    }
}
