// Account Rules

use std::sync::LazyLock;

use regex::Regex;

use super::{Required, Rule, RuleResult, ValidationErrors, Validator};
use crate::entity::account::{AccountDraft, AccountField};

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\S+@\S+\.\S+").expect("email pattern is a valid regex")
});

static ACCOUNT_RULES: LazyLock<Validator<AccountDraft, AccountField>> = LazyLock::new(|| {
    Validator::new()
        .with(Required::new(AccountField::Name, "Name is required.", name))
        .with(Required::new(AccountField::Email, "Email is required.", email))
        .with(EmailShape)
        .with(RoleChosen)
        .with(StatusChosen)
});

fn name(draft: &AccountDraft) -> &str {
    &draft.name
}

fn email(draft: &AccountDraft) -> &str {
    &draft.email
}

/// Loose `local@domain.tld` check, unanchored.
struct EmailShape;

impl Rule<AccountDraft, AccountField> for EmailShape {
    fn field(&self) -> AccountField {
        AccountField::Email
    }

    fn check(&self, draft: &AccountDraft) -> RuleResult {
        if EMAIL_SHAPE.is_match(&draft.email) {
            RuleResult::Pass
        } else {
            RuleResult::Fail("Email is invalid.".into())
        }
    }
}

struct RoleChosen;

impl Rule<AccountDraft, AccountField> for RoleChosen {
    fn field(&self) -> AccountField {
        AccountField::Role
    }

    fn check(&self, draft: &AccountDraft) -> RuleResult {
        match draft.role {
            Some(_) => RuleResult::Pass,
            None => RuleResult::Fail("Role is required.".into()),
        }
    }
}

struct StatusChosen;

impl Rule<AccountDraft, AccountField> for StatusChosen {
    fn field(&self) -> AccountField {
        AccountField::Status
    }

    fn check(&self, draft: &AccountDraft) -> RuleResult {
        match draft.status {
            Some(_) => RuleResult::Pass,
            None => RuleResult::Fail("Status is required.".into()),
        }
    }
}

/// Check an account draft. An empty mapping means it may be saved.
pub fn validate_account(draft: &AccountDraft) -> ValidationErrors<AccountField> {
    ACCOUNT_RULES.evaluate(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::account::{AccountRole, AccountStatus};

    fn draft(email: &str) -> AccountDraft {
        AccountDraft {
            name: "Bob Johnson".into(),
            email: email.into(),
            role: Some(AccountRole::Viewer),
            status: Some(AccountStatus::Inactive),
        }
    }

    #[test]
    fn rejects_malformed_email() {
        let errors = validate_account(&draft("not-an-email"));
        assert_eq!(errors.get(AccountField::Email), Some("Email is invalid."));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn accepts_minimal_email() {
        assert!(validate_account(&draft("a@b.co")).is_empty());
    }

    #[test]
    fn blank_email_reports_required_not_invalid() {
        let errors = validate_account(&draft("  "));
        assert_eq!(errors.get(AccountField::Email), Some("Email is required."));
    }

    #[test]
    fn whitespace_name_is_missing() {
        let mut candidate = draft("a@b.co");
        candidate.name = " \t ".into();

        let errors = validate_account(&candidate);
        assert_eq!(errors.get(AccountField::Name), Some("Name is required."));
    }

    #[test]
    fn empty_draft_reports_every_field() {
        let errors = validate_account(&AccountDraft::default());

        let fields: Vec<_> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(
            fields,
            vec![
                AccountField::Name,
                AccountField::Email,
                AccountField::Role,
                AccountField::Status,
            ]
        );
        assert_eq!(errors.get(AccountField::Role), Some("Role is required."));
        assert_eq!(errors.get(AccountField::Status), Some("Status is required."));
    }
}
