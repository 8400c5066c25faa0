// Role Entity
//
// Named permission bundles. Names are not required to be unique.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Entity, Selector};
use crate::validate::{role::validate_role, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Create,
    Read,
    Update,
    Delete,
}

impl Permission {
    pub const ALL: [Permission; 4] = [
        Permission::Create,
        Permission::Read,
        Permission::Update,
        Permission::Delete,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    pub permissions: BTreeSet<Permission>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDraft {
    pub name: String,
    pub permissions: BTreeSet<Permission>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleField {
    Name,
    Permissions,
}

impl fmt::Display for RoleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleField::Name => f.write_str("name"),
            RoleField::Permissions => f.write_str("permissions"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleEdit {
    Name(String),
    Permissions(BTreeSet<Permission>),
    /// Add the permission if missing, remove it otherwise.
    TogglePermission(Permission),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RoleFilter {
    #[serde(default)]
    pub permission: Selector<Permission>,
}

impl Entity for Role {
    type Draft = RoleDraft;
    type Field = RoleField;
    type Edit = RoleEdit;
    type Filter = RoleFilter;

    const KIND: &'static str = "role";

    fn to_draft(&self) -> RoleDraft {
        RoleDraft {
            name: self.name.clone(),
            permissions: self.permissions.clone(),
        }
    }

    fn apply_edit(draft: &mut RoleDraft, edit: RoleEdit) {
        match edit {
            RoleEdit::Name(name) => draft.name = name,
            RoleEdit::Permissions(permissions) => draft.permissions = permissions,
            RoleEdit::TogglePermission(permission) => {
                if !draft.permissions.remove(&permission) {
                    draft.permissions.insert(permission);
                }
            }
        }
    }

    fn finalize(draft: &RoleDraft) -> Result<Self, ValidationErrors<RoleField>> {
        let errors = validate_role(draft);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Role {
            name: draft.name.clone(),
            permissions: draft.permissions.clone(),
        })
    }

    fn searchable(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn matches_filter(&self, filter: &RoleFilter) -> bool {
        filter.permission.admits_any(&self.permissions)
    }
}
