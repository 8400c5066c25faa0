// Role Rules

use std::sync::LazyLock;

use super::{Required, Rule, RuleResult, ValidationErrors, Validator};
use crate::entity::role::{RoleDraft, RoleField};

static ROLE_RULES: LazyLock<Validator<RoleDraft, RoleField>> = LazyLock::new(|| {
    Validator::new()
        .with(Required::new(RoleField::Name, "Role name is required.", name))
        .with(AtLeastOnePermission)
});

fn name(draft: &RoleDraft) -> &str {
    &draft.name
}

struct AtLeastOnePermission;

impl Rule<RoleDraft, RoleField> for AtLeastOnePermission {
    fn field(&self) -> RoleField {
        RoleField::Permissions
    }

    fn check(&self, draft: &RoleDraft) -> RuleResult {
        if draft.permissions.is_empty() {
            RuleResult::Fail("Select at least one permission.".into())
        } else {
            RuleResult::Pass
        }
    }
}

/// Check a role draft. An empty mapping means it may be saved.
pub fn validate_role(draft: &RoleDraft) -> ValidationErrors<RoleField> {
    ROLE_RULES.evaluate(draft)
}
