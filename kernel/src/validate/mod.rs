// Validation Framework
//
// Rules are pure checks over a draft. Each failing rule reports a
// message against one field; the collected mapping is shown by the
// editor and an empty mapping means the draft may be submitted.

use std::collections::BTreeMap;

use serde::Serialize;

pub mod account;
pub mod role;

/// Result of a single rule check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleResult {
    Pass,
    Fail(String),
}

/// Trait implemented by all field rules.
///
/// Rules must be:
/// - Pure
/// - Deterministic
/// - Side-effect free
pub trait Rule<D, F>: Send + Sync {
    /// Field the failure message is attached to.
    fn field(&self) -> F;

    fn check(&self, draft: &D) -> RuleResult;
}

/// Field to message mapping. Absent fields are valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors<F: Ord> {
    messages: BTreeMap<F, String>,
}

impl<F: Ord> Default for ValidationErrors<F> {
    fn default() -> Self {
        Self {
            messages: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> ValidationErrors<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.messages.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: F) -> bool {
        self.messages.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.messages.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Record a failure. The first message for a field is kept.
    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.messages.entry(field).or_insert_with(|| message.into());
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

/// Ordered set of rules evaluated against a draft.
pub struct Validator<D, F> {
    rules: Vec<Box<dyn Rule<D, F>>>,
}

impl<D, F> Default for Validator<D, F> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<D, F: Ord + Copy> Validator<D, F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule. Registration order decides which message wins
    /// when several rules fail on the same field.
    pub fn register<R: Rule<D, F> + 'static>(&mut self, rule: R) {
        self.rules.push(Box::new(rule));
    }

    /// Builder form of [`Validator::register`].
    pub fn with<R: Rule<D, F> + 'static>(mut self, rule: R) -> Self {
        self.register(rule);
        self
    }

    /// Evaluate every rule.
    ///
    /// Unlike a fail-fast check this keeps going so each field gets
    /// its own message; a field that already failed is skipped.
    pub fn evaluate(&self, draft: &D) -> ValidationErrors<F> {
        let mut errors = ValidationErrors::new();

        for rule in &self.rules {
            let field = rule.field();
            if errors.contains(field) {
                continue;
            }
            if let RuleResult::Fail(message) = rule.check(draft) {
                errors.insert(field, message);
            }
        }

        errors
    }
}

/// Rule failing when the selected text is blank after trimming.
pub struct Required<D, F> {
    field: F,
    message: &'static str,
    text: fn(&D) -> &str,
}

impl<D, F> Required<D, F> {
    pub fn new(field: F, message: &'static str, text: fn(&D) -> &str) -> Self {
        Self {
            field,
            message,
            text,
        }
    }
}

impl<D, F: Copy + Send + Sync> Rule<D, F> for Required<D, F> {
    fn field(&self) -> F {
        self.field
    }

    fn check(&self, draft: &D) -> RuleResult {
        if (self.text)(draft).trim().is_empty() {
            RuleResult::Fail(self.message.into())
        } else {
            RuleResult::Pass
        }
    }
}
