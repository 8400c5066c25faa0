// Confirmation Gate
//
// Two-step guard in front of removal: a request parks an identifier,
// and only an explicit confirm deletes it. Cancel drops the request.
// There is no timeout.

use std::sync::Arc;

use crate::entity::{Entity, Record, RecordId};
use crate::store::CollectionStore;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GateError {
    #[error("removal of {0} is already awaiting confirmation")]
    AlreadyPending(RecordId),

    #[error("no removal is awaiting confirmation")]
    NothingPending,
}

#[derive(Debug, Default)]
pub struct ConfirmationGate {
    pending: Option<RecordId>,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier awaiting confirmation, if any.
    pub fn pending(&self) -> Option<RecordId> {
        self.pending
    }

    /// Park a removal. Only one request may be open at a time.
    pub fn request(&mut self, id: RecordId) -> Result<(), GateError> {
        if let Some(current) = self.pending {
            return Err(GateError::AlreadyPending(current));
        }

        tracing::debug!(%id, "removal requested");
        self.pending = Some(id);
        Ok(())
    }

    /// Remove the parked record from `store` and close the gate.
    ///
    /// Yields the removed record, or `None` if it was already gone.
    pub fn confirm<E: Entity>(
        &mut self,
        store: &mut CollectionStore<E>,
    ) -> Result<Option<Arc<Record<E>>>, GateError> {
        let id = self.pending.take().ok_or(GateError::NothingPending)?;

        tracing::debug!(kind = E::KIND, %id, "removal confirmed");
        Ok(store.remove(id))
    }

    /// Drop the parked request without touching any store.
    pub fn cancel(&mut self) -> Option<RecordId> {
        let cancelled = self.pending.take();
        if let Some(id) = cancelled {
            tracing::debug!(%id, "removal cancelled");
        }
        cancelled
    }
}
