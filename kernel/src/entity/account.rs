// Account Entity
//
// User accounts: a display name, a contact email, an assigned role
// and an activation status.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Entity, Selector};
use crate::validate::{account::validate_account, ValidationErrors};

/// Role granted to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccountRole {
    Admin,
    Editor,
    Viewer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub email: String,
    pub role: AccountRole,
    pub status: AccountStatus,
}

/// Editable copy of an account. Choices stay unset until picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountDraft {
    pub name: String,
    pub email: String,
    pub role: Option<AccountRole>,
    pub status: Option<AccountStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountField {
    Name,
    Email,
    Role,
    Status,
}

impl fmt::Display for AccountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountField::Name => "name",
            AccountField::Email => "email",
            AccountField::Role => "role",
            AccountField::Status => "status",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountEdit {
    Name(String),
    Email(String),
    Role(Option<AccountRole>),
    Status(Option<AccountStatus>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AccountFilter {
    #[serde(default)]
    pub role: Selector<AccountRole>,
    #[serde(default)]
    pub status: Selector<AccountStatus>,
}

impl Entity for Account {
    type Draft = AccountDraft;
    type Field = AccountField;
    type Edit = AccountEdit;
    type Filter = AccountFilter;

    const KIND: &'static str = "account";

    fn to_draft(&self) -> AccountDraft {
        AccountDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            role: Some(self.role),
            status: Some(self.status),
        }
    }

    fn apply_edit(draft: &mut AccountDraft, edit: AccountEdit) {
        match edit {
            AccountEdit::Name(name) => draft.name = name,
            AccountEdit::Email(email) => draft.email = email,
            AccountEdit::Role(role) => draft.role = role,
            AccountEdit::Status(status) => draft.status = status,
        }
    }

    fn finalize(draft: &AccountDraft) -> Result<Self, ValidationErrors<AccountField>> {
        let errors = validate_account(draft);

        match (draft.role, draft.status) {
            (Some(role), Some(status)) if errors.is_empty() => Ok(Account {
                name: draft.name.clone(),
                email: draft.email.clone(),
                role,
                status,
            }),
            _ => Err(errors),
        }
    }

    fn searchable(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    fn matches_filter(&self, filter: &AccountFilter) -> bool {
        filter.role.admits(&self.role) && filter.status.admits(&self.status)
    }
}
