// Collection Controller
//
// Wires one collection end to end:
// query → view, editor → store, gate → store.
//
// Every call completes synchronously; a rendering layer only reads
// the view and editor state back after each action.

use crate::draft::{DraftEditor, EditorError, EditorMode, Submission};
use crate::entity::{Entity, Record, RecordId};
use crate::gate::{ConfirmationGate, GateError};
use crate::store::{CollectionStore, StoreError};
use crate::validate::ValidationErrors;
use crate::view::{project, Query};

/// Errors returned by controller actions.
///
/// None of these are validation failures; those come back as
/// [`SubmitOutcome::Rejected`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("no {kind} with identifier {id}")]
    UnknownRecord { kind: &'static str, id: RecordId },

    #[error("{kind} {id} is open in the editor")]
    BeingEdited { kind: &'static str, id: RecordId },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("editor error: {0}")]
    Editor(#[from] EditorError),

    #[error("confirmation error: {0}")]
    Gate(#[from] GateError),
}

/// What a submit did to the collection.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<E: Entity> {
    /// Draft kept open; nothing stored.
    Rejected(ValidationErrors<E::Field>),
    Created(RecordId),
    Updated(RecordId),
}

#[derive(Debug)]
pub struct CollectionController<E: Entity> {
    store: CollectionStore<E>,
    query: Query<E>,
    editor: DraftEditor<E>,
    gate: ConfirmationGate,
}

impl<E: Entity> Default for CollectionController<E> {
    fn default() -> Self {
        Self::with_store(CollectionStore::new())
    }
}

impl<E: Entity> CollectionController<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: CollectionStore<E>) -> Self {
        Self {
            store,
            query: Query::default(),
            editor: DraftEditor::new(),
            gate: ConfirmationGate::new(),
        }
    }

    pub fn from_records<I>(records: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = Record<E>>,
    {
        Ok(Self::with_store(CollectionStore::from_records(records)?))
    }

    pub fn store(&self) -> &CollectionStore<E> {
        &self.store
    }

    pub fn query(&self) -> &Query<E> {
        &self.query
    }

    pub fn editor(&self) -> &DraftEditor<E> {
        &self.editor
    }

    pub fn editor_mode(&self) -> EditorMode {
        self.editor.mode()
    }

    pub fn pending_removal(&self) -> Option<RecordId> {
        self.gate.pending()
    }

    /// Rows to display, derived fresh from the store and query.
    pub fn view(&self) -> Vec<&Record<E>> {
        project(self.store.iter(), &self.query)
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query.search = text.into();
    }

    pub fn set_filter(&mut self, filter: E::Filter) {
        self.query.filter = filter;
    }

    /// Back to an empty search with every selector on "all".
    pub fn clear_query(&mut self) {
        self.query = Query::default();
    }

    pub fn open_for_create(&mut self) -> Result<(), ControllerError> {
        Ok(self.editor.open_for_create()?)
    }

    pub fn open_for_edit(&mut self, id: RecordId) -> Result<(), ControllerError> {
        let source = self.store.get(id).ok_or(ControllerError::UnknownRecord {
            kind: E::KIND,
            id,
        })?;
        Ok(self.editor.open_for_edit(source)?)
    }

    pub fn edit(&mut self, edit: E::Edit) -> Result<(), ControllerError> {
        Ok(self.editor.change(edit)?)
    }

    pub fn discard(&mut self) {
        self.editor.discard();
    }

    /// Validate the draft and, if it passes, route it to the store.
    pub fn submit(&mut self) -> Result<SubmitOutcome<E>, ControllerError> {
        let outcome = match self.editor.submit()? {
            Submission::Rejected(errors) => SubmitOutcome::Rejected(errors),
            Submission::Create(candidate) => {
                let record = self.store.add(candidate)?;
                SubmitOutcome::Created(record.id)
            }
            Submission::Update(id, candidate) => {
                if !self.store.update(id, candidate) {
                    return Err(ControllerError::UnknownRecord { kind: E::KIND, id });
                }
                SubmitOutcome::Updated(id)
            }
        };

        Ok(outcome)
    }

    /// Ask for confirmation before removing `id`.
    ///
    /// The record open in the editor cannot be removed until the draft
    /// is submitted or discarded.
    pub fn request_removal(&mut self, id: RecordId) -> Result<(), ControllerError> {
        if !self.store.contains(id) {
            return Err(ControllerError::UnknownRecord { kind: E::KIND, id });
        }
        self.ensure_not_editing(id)?;
        Ok(self.gate.request(id)?)
    }

    /// Carry out the pending removal. Returns the removed identifier.
    ///
    /// Refused while the pending record has since been opened for
    /// editing; the request stays pending.
    pub fn confirm_removal(&mut self) -> Result<Option<RecordId>, ControllerError> {
        if let Some(id) = self.gate.pending() {
            self.ensure_not_editing(id)?;
        }
        let removed = self.gate.confirm(&mut self.store)?;
        Ok(removed.map(|record| record.id))
    }

    pub fn cancel_removal(&mut self) -> Option<RecordId> {
        self.gate.cancel()
    }

    fn ensure_not_editing(&self, id: RecordId) -> Result<(), ControllerError> {
        if self.editor.mode() == EditorMode::Editing(id) {
            return Err(ControllerError::BeingEdited { kind: E::KIND, id });
        }
        Ok(())
    }
}
