// Console
//
// The two managed collections side by side, plus which one is on
// screen. Actions are plain data so any front end (or a script) can
// drive the console.

use serde::{Deserialize, Serialize};

use crate::config::ConsoleConfig;
use crate::controller::{CollectionController, ControllerError, SubmitOutcome};
use crate::entity::account::Account;
use crate::entity::role::Role;
use crate::entity::Entity;
use crate::store::StoreError;

mod action;

pub use action::{ActionOutcome, CollectionAction, ConsoleAction};

/// Which collection is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Accounts,
    Roles,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("invalid seed data: {0}")]
    Seed(#[from] StoreError),

    #[error("{tab:?}: {source}")]
    Action {
        tab: Tab,
        #[source]
        source: ControllerError,
    },
}

#[derive(Debug)]
pub struct Console {
    accounts: CollectionController<Account>,
    roles: CollectionController<Role>,
    tab: Tab,
}

impl Console {
    pub fn from_config(config: &ConsoleConfig) -> Result<Self, ConsoleError> {
        let console = Self {
            accounts: CollectionController::from_records(config.accounts.iter().cloned())?,
            roles: CollectionController::from_records(config.roles.iter().cloned())?,
            tab: config.default_tab,
        };

        tracing::info!(
            accounts = console.accounts.store().len(),
            roles = console.roles.store().len(),
            tab = ?console.tab,
            "console loaded"
        );
        Ok(console)
    }

    pub fn accounts(&self) -> &CollectionController<Account> {
        &self.accounts
    }

    pub fn roles(&self) -> &CollectionController<Role> {
        &self.roles
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Apply one action. Actions for a collection also bring its tab
    /// on screen.
    pub fn apply(&mut self, action: ConsoleAction) -> Result<ActionOutcome, ConsoleError> {
        match action {
            ConsoleAction::SelectTab { tab } => {
                self.select_tab(tab);
                Ok(ActionOutcome::Done)
            }
            ConsoleAction::Accounts(action) => {
                self.tab = Tab::Accounts;
                run(&mut self.accounts, action).map_err(|source| ConsoleError::Action {
                    tab: Tab::Accounts,
                    source,
                })
            }
            ConsoleAction::Roles(action) => {
                self.tab = Tab::Roles;
                run(&mut self.roles, action).map_err(|source| ConsoleError::Action {
                    tab: Tab::Roles,
                    source,
                })
            }
        }
    }
}

fn run<E: Entity>(
    controller: &mut CollectionController<E>,
    action: CollectionAction<E>,
) -> Result<ActionOutcome, ControllerError> {
    let outcome = match action {
        CollectionAction::Search { text } => {
            controller.set_search(text);
            ActionOutcome::Done
        }
        CollectionAction::Filter { filter } => {
            controller.set_filter(filter);
            ActionOutcome::Done
        }
        CollectionAction::ClearQuery => {
            controller.clear_query();
            ActionOutcome::Done
        }
        CollectionAction::OpenCreate => {
            controller.open_for_create()?;
            ActionOutcome::Done
        }
        CollectionAction::OpenEdit { id } => {
            controller.open_for_edit(id)?;
            ActionOutcome::Done
        }
        CollectionAction::Edit { edit } => {
            controller.edit(edit)?;
            ActionOutcome::Done
        }
        CollectionAction::Discard => {
            controller.discard();
            ActionOutcome::Done
        }
        CollectionAction::Submit => match controller.submit()? {
            SubmitOutcome::Rejected(errors) => ActionOutcome::Rejected {
                errors: errors
                    .iter()
                    .map(|(field, message)| (field.to_string(), message.to_string()))
                    .collect(),
            },
            SubmitOutcome::Created(id) => ActionOutcome::Created { id },
            SubmitOutcome::Updated(id) => ActionOutcome::Updated { id },
        },
        CollectionAction::RequestRemoval { id } => {
            controller.request_removal(id)?;
            ActionOutcome::Done
        }
        CollectionAction::ConfirmRemoval => match controller.confirm_removal()? {
            Some(id) => ActionOutcome::Removed { id },
            None => ActionOutcome::Done,
        },
        CollectionAction::CancelRemoval => {
            controller.cancel_removal();
            ActionOutcome::Done
        }
    };

    Ok(outcome)
}
