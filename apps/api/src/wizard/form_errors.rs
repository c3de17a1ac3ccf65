use std::collections::BTreeMap;

use serde::Serialize;

use crate::wizard::fields::FieldPath;
use crate::wizard::schema::{MessageKey, ValidationIssue};

/// Field-level error map of a form, keyed by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors {
    entries: BTreeMap<FieldPath, MessageKey>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, path: &FieldPath) -> Option<MessageKey> {
        self.entries.get(path).copied()
    }

    pub fn insert(&mut self, path: FieldPath, message: MessageKey) {
        self.entries.insert(path, message);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &MessageKey)> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops every error under one of `scope`, leaving the rest alone.
    pub fn clear_scope(&mut self, scope: &[FieldPath]) {
        self.entries.retain(|path, _| !path.within_any(scope));
    }

    /// Replaces the errors under `scope` with `issues`. The first issue per
    /// path wins.
    pub fn replace_scope(&mut self, scope: &[FieldPath], issues: &[ValidationIssue]) {
        self.clear_scope(scope);
        for issue in issues {
            self.entries.entry(issue.path).or_insert(issue.message);
        }
    }
}

impl FromIterator<ValidationIssue> for FormErrors {
    fn from_iter<I: IntoIterator<Item = ValidationIssue>>(iter: I) -> Self {
        let mut errors = FormErrors::default();
        for issue in iter {
            errors.entries.entry(issue.path).or_insert(issue.message);
        }
        errors
    }
}
