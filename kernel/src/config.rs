// Console Configuration
//
// Seed records and the initially selected tab.

use serde::{Deserialize, Serialize};

use crate::console::Tab;
use crate::entity::account::{Account, AccountRole, AccountStatus};
use crate::entity::role::{Permission, Role};
use crate::entity::{Record, RecordId};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed console config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Console configuration loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub accounts: Vec<Record<Account>>,

    #[serde(default)]
    pub roles: Vec<Record<Role>>,

    #[serde(default)]
    pub default_tab: Tab,
}

impl ConsoleConfig {
    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Built-in demo data (used if no config is provided).
    pub fn default_seed() -> Self {
        use AccountRole::{Admin, Editor, Viewer};
        use AccountStatus::{Active, Inactive};

        Self {
            accounts: vec![
                account(1, "John Doe", "john@example.com", Admin, Active),
                account(2, "Jane Smith", "jane@example.com", Editor, Active),
                account(3, "Bob Johnson", "bob@example.com", Viewer, Inactive),
            ],
            roles: vec![
                role(1, "Admin", &Permission::ALL),
                role(2, "Editor", &[Permission::Read, Permission::Update]),
                role(3, "Viewer", &[Permission::Read]),
            ],
            default_tab: Tab::Accounts,
        }
    }
}

fn account(
    id: u64,
    name: &str,
    email: &str,
    role: AccountRole,
    status: AccountStatus,
) -> Record<Account> {
    Record::new(
        RecordId(id),
        Account {
            name: name.into(),
            email: email.into(),
            role,
            status,
        },
    )
}

fn role(id: u64, name: &str, permissions: &[Permission]) -> Record<Role> {
    Record::new(
        RecordId(id),
        Role {
            name: name.into(),
            permissions: permissions.iter().copied().collect(),
        },
    )
}
