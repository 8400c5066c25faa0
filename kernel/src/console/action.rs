// Console Actions
//
// Discrete user actions as data. JSON shape:
//
//   { "accounts": { "op": "edit", "edit": { "email": "a@b.co" } } }
//   { "roles": { "op": "request_removal", "id": 2 } }
//   { "select_tab": { "tab": "roles" } }

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Tab;
use crate::entity::account::Account;
use crate::entity::role::Role;
use crate::entity::{Entity, RecordId};

/// One user action against a single collection.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
#[serde(bound(deserialize = ""))]
pub enum CollectionAction<E: Entity> {
    Search { text: String },
    Filter { filter: E::Filter },
    ClearQuery,
    OpenCreate,
    OpenEdit { id: RecordId },
    Edit { edit: E::Edit },
    Discard,
    Submit,
    RequestRemoval { id: RecordId },
    ConfirmRemoval,
    CancelRemoval,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleAction {
    SelectTab { tab: Tab },
    Accounts(CollectionAction<Account>),
    Roles(CollectionAction<Role>),
}

/// Observable result of one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    Done,
    Rejected { errors: BTreeMap<String, String> },
    Created { id: RecordId },
    Updated { id: RecordId },
    Removed { id: RecordId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::account::{AccountEdit, AccountStatus};
    use crate::entity::role::Permission;
    use crate::entity::Selector;

    #[test]
    fn parse_collection_actions() {
        let json = r#"{ "roles": { "op": "filter", "filter": { "permission": "update" } } }"#;
        let action: ConsoleAction = serde_json::from_str(json).unwrap();

        match action {
            ConsoleAction::Roles(CollectionAction::Filter { filter }) => {
                assert_eq!(filter.permission, Selector::Only(Permission::Update));
            }
            other => panic!("unexpected action: {other:?}"),
        }

        let json = r#"{ "accounts": { "op": "edit", "edit": { "status": "Inactive" } } }"#;
        let action: ConsoleAction = serde_json::from_str(json).unwrap();
        assert!(matches!(
            action,
            ConsoleAction::Accounts(CollectionAction::Edit {
                edit: AccountEdit::Status(Some(AccountStatus::Inactive))
            })
        ));
    }

    #[test]
    fn parse_unit_and_tab_actions() {
        let action: ConsoleAction =
            serde_json::from_str(r#"{ "accounts": { "op": "confirm_removal" } }"#).unwrap();
        assert!(matches!(action, ConsoleAction::Accounts(CollectionAction::ConfirmRemoval)));

        let action: ConsoleAction =
            serde_json::from_str(r#"{ "select_tab": { "tab": "roles" } }"#).unwrap();
        assert!(matches!(action, ConsoleAction::SelectTab { tab: Tab::Roles }));
    }

    #[test]
    fn outcome_wire_shape() {
        let json = serde_json::to_value(ActionOutcome::Created { id: RecordId(4) }).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "created", "id": 4 }));
    }
}
