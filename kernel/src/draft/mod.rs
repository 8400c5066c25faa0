// Draft Editor State Machine
//
// Holds the in-progress record behind the create/edit dialog. The
// editor never touches a store: a successful submit hands the caller
// a finished candidate and closes.

use serde::Serialize;

use crate::entity::{Entity, Record, RecordId};
use crate::validate::ValidationErrors;

/// Lifecycle state of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "id", rename_all = "snake_case")]
pub enum EditorMode {
    Closed,

    /// Draft started empty; a valid submit becomes an `add`.
    Creating,

    /// Draft copied from the record with this identifier; a valid
    /// submit becomes an `update` of that record.
    Editing(RecordId),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("illegal editor transition: {0}")]
    IllegalTransition(String),
}

/// Result of `submit`.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<E: Entity> {
    /// Validation failed; the editor stays open with these errors.
    Rejected(ValidationErrors<E::Field>),

    /// Candidate for a new record.
    Create(E),

    /// Replacement for an existing record.
    Update(RecordId, E),
}

#[derive(Debug)]
pub struct DraftEditor<E: Entity> {
    mode: EditorMode,
    draft: E::Draft,
    errors: ValidationErrors<E::Field>,
}

impl<E: Entity> Default for DraftEditor<E> {
    fn default() -> Self {
        Self {
            mode: EditorMode::Closed,
            draft: E::Draft::default(),
            errors: ValidationErrors::new(),
        }
    }
}

impl<E: Entity> DraftEditor<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != EditorMode::Closed
    }

    pub fn draft(&self) -> &E::Draft {
        &self.draft
    }

    /// Errors from the last rejected submit.
    pub fn errors(&self) -> &ValidationErrors<E::Field> {
        &self.errors
    }

    pub fn open_for_create(&mut self) -> Result<(), EditorError> {
        self.ensure_closed("open for create")?;

        self.draft = E::Draft::default();
        self.errors.clear();
        self.mode = EditorMode::Creating;

        tracing::debug!(kind = E::KIND, "editor opened for create");
        Ok(())
    }

    pub fn open_for_edit(&mut self, source: &Record<E>) -> Result<(), EditorError> {
        self.ensure_closed("open for edit")?;

        self.draft = source.fields.to_draft();
        self.errors.clear();
        self.mode = EditorMode::Editing(source.id);

        tracing::debug!(kind = E::KIND, id = %source.id, "editor opened for edit");
        Ok(())
    }

    /// Apply one field change. Validation waits for `submit`.
    pub fn change(&mut self, edit: E::Edit) -> Result<(), EditorError> {
        self.ensure_open("change a field")?;
        E::apply_edit(&mut self.draft, edit);
        Ok(())
    }

    /// Close without producing anything. No-op when already closed.
    pub fn discard(&mut self) {
        if self.is_open() {
            tracing::debug!(kind = E::KIND, mode = ?self.mode, "editor discarded");
        }
        self.reset();
    }

    pub fn submit(&mut self) -> Result<Submission<E>, EditorError> {
        self.ensure_open("submit")?;

        let candidate = match E::finalize(&self.draft) {
            Ok(candidate) => candidate,
            Err(errors) => {
                tracing::debug!(kind = E::KIND, fields = errors.len(), "submit rejected");
                self.errors = errors.clone();
                return Ok(Submission::Rejected(errors));
            }
        };

        let submission = match self.mode {
            EditorMode::Editing(id) => Submission::Update(id, candidate),
            _ => Submission::Create(candidate),
        };

        self.reset();
        Ok(submission)
    }

    fn reset(&mut self) {
        self.mode = EditorMode::Closed;
        self.draft = E::Draft::default();
        self.errors.clear();
    }

    fn ensure_open(&self, action: &str) -> Result<(), EditorError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(EditorError::IllegalTransition(format!(
                "cannot {action} while {:?}",
                self.mode
            )))
        }
    }

    fn ensure_closed(&self, action: &str) -> Result<(), EditorError> {
        if self.is_open() {
            Err(EditorError::IllegalTransition(format!(
                "cannot {action} while {:?}",
                self.mode
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::account::{Account, AccountEdit, AccountField, AccountRole, AccountStatus};
    use crate::entity::role::{Permission, Role, RoleEdit};

    fn admin_role() -> Record<Role> {
        Record::new(
            RecordId(1),
            Role {
                name: "Admin".into(),
                permissions: [Permission::Read].into(),
            },
        )
    }

    #[test]
    fn create_lifecycle() {
        let mut editor = DraftEditor::<Account>::new();
        assert_eq!(editor.mode(), EditorMode::Closed);

        editor.open_for_create().unwrap();
        assert_eq!(editor.mode(), EditorMode::Creating);

        editor.change(AccountEdit::Name("Ada".into())).unwrap();
        editor.change(AccountEdit::Email("ada@example.com".into())).unwrap();
        editor.change(AccountEdit::Role(Some(AccountRole::Admin))).unwrap();
        editor.change(AccountEdit::Status(Some(AccountStatus::Active))).unwrap();

        let submission = editor.submit().unwrap();
        assert!(matches!(submission, Submission::Create(ref a) if a.name == "Ada"));
        assert_eq!(editor.mode(), EditorMode::Closed);
        assert_eq!(editor.draft(), &Default::default());
    }

    #[test]
    fn edit_carries_source_identifier() {
        let mut editor = DraftEditor::<Role>::new();
        editor.open_for_edit(&admin_role()).unwrap();
        assert_eq!(editor.mode(), EditorMode::Editing(RecordId(1)));

        editor
            .change(RoleEdit::Permissions([Permission::Read, Permission::Update].into()))
            .unwrap();

        match editor.submit().unwrap() {
            Submission::Update(id, role) => {
                assert_eq!(id, RecordId(1));
                assert_eq!(role.name, "Admin");
                assert_eq!(role.permissions.len(), 2);
            }
            other => panic!("unexpected submission: {other:?}"),
        }
    }

    #[test]
    fn invalid_submit_stays_open_with_errors() {
        let mut editor = DraftEditor::<Account>::new();
        editor.open_for_create().unwrap();
        editor.change(AccountEdit::Email("not-an-email".into())).unwrap();

        let submission = editor.submit().unwrap();

        assert!(matches!(submission, Submission::Rejected(_)));
        assert_eq!(editor.mode(), EditorMode::Creating);
        assert_eq!(editor.errors().get(AccountField::Email), Some("Email is invalid."));
        assert_eq!(editor.draft().email, "not-an-email");
    }

    #[test]
    fn reopening_clears_previous_errors() {
        let mut editor = DraftEditor::<Account>::new();
        editor.open_for_create().unwrap();
        editor.submit().unwrap();
        assert!(!editor.errors().is_empty());

        editor.discard();
        editor.open_for_create().unwrap();
        assert!(editor.errors().is_empty());
    }

    #[test]
    fn field_change_does_not_revalidate() {
        let mut editor = DraftEditor::<Role>::new();
        editor.open_for_create().unwrap();
        editor.submit().unwrap();

        editor.change(RoleEdit::Name("Auditor".into())).unwrap();
        assert!(editor.errors().contains(crate::entity::role::RoleField::Name));
    }

    #[test]
    fn discard_resets_draft() {
        let mut editor = DraftEditor::<Role>::new();
        editor.open_for_edit(&admin_role()).unwrap();
        editor.change(RoleEdit::Name("Changed".into())).unwrap();

        editor.discard();

        assert_eq!(editor.mode(), EditorMode::Closed);
        assert_eq!(editor.draft(), &Default::default());
    }

    #[test]
    fn illegal_transitions_are_rejected() {
        let mut editor = DraftEditor::<Role>::new();

        let err = editor.submit().unwrap_err();
        assert!(matches!(err, EditorError::IllegalTransition(_)));
        assert!(editor.change(RoleEdit::Name("x".into())).is_err());

        editor.open_for_create().unwrap();
        assert!(editor.open_for_edit(&admin_role()).is_err());
        assert_eq!(editor.mode(), EditorMode::Creating);
    }

    #[test]
    fn mode_wire_shape() {
        let json = serde_json::to_value(EditorMode::Editing(RecordId(3))).unwrap();
        assert_eq!(json, serde_json::json!({ "mode": "editing", "id": 3 }));

        let json = serde_json::to_value(EditorMode::Closed).unwrap();
        assert_eq!(json, serde_json::json!({ "mode": "closed" }));
    }
}
