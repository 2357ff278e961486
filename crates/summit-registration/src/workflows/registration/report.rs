use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field order of the visual form layout, top to bottom. Focus moves to the
/// first failing field in this order.
pub const FOCUS_ORDER: &[&str] = &[
    "summitId",
    "salonName",
    "city",
    "state",
    "primaryAttendee.firstName",
    "primaryAttendee.lastName",
    "primaryAttendee.email",
    "primaryAttendee.phone",
    "isAlumni",
    "isLevelMember",
    "totalAttendees",
    "additionalAttendees",
    "paymentMethod",
    "cancellationPolicyAccepted",
];

/// Field path to human-readable messages, e.g. `primaryAttendee.email` or
/// `additionalAttendees.2.fullName`.
///
/// Collection-level failures are reported at the collection path itself
/// (`additionalAttendees`) while item failures use indexed paths beneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(path.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of field paths carrying at least one message.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.errors.contains_key(path)
    }

    pub fn messages(&self, path: &str) -> &[String] {
        self.errors.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors
            .iter()
            .map(|(path, messages)| (path.as_str(), messages.as_slice()))
    }

    /// Drop messages for `field` and every item path nested beneath it.
    pub fn clear_field(&mut self, field: &str) {
        self.errors
            .retain(|path, _| !(path == field || is_nested_under(path, field)));
    }

    pub fn merge(&mut self, other: ValidationReport) {
        for (path, messages) in other.errors {
            self.errors.entry(path).or_default().extend(messages);
        }
    }

    /// Messages for `field` and its nested item paths, as a standalone report.
    pub fn extract(&self, field: &str) -> ValidationReport {
        let errors = self
            .errors
            .iter()
            .filter(|(path, _)| path.as_str() == field || is_nested_under(path, field))
            .map(|(path, messages)| (path.clone(), messages.clone()))
            .collect();
        ValidationReport { errors }
    }

    /// First failing path following `order`; a collection's own message wins
    /// over its items, and items are visited by ascending index.
    pub fn first_in_order<'a>(&'a self, order: &[&str]) -> Option<&'a str> {
        for field in order {
            if let Some((path, _)) = self.errors.get_key_value(*field) {
                return Some(path.as_str());
            }

            let nested = self
                .errors
                .keys()
                .filter(|path| is_nested_under(path, field))
                .min_by_key(|path| item_index(path, field));
            if let Some(path) = nested {
                return Some(path.as_str());
            }
        }

        self.errors.keys().next().map(String::as_str)
    }

    /// Path that should receive focus after a failed submit.
    pub fn first_error(&self) -> Option<&str> {
        self.first_in_order(FOCUS_ORDER)
    }
}

fn is_nested_under(path: &str, field: &str) -> bool {
    path.len() > field.len() && path.starts_with(field) && path.as_bytes()[field.len()] == b'.'
}

fn item_index(path: &str, field: &str) -> usize {
    path[field.len() + 1..]
        .split('.')
        .next()
        .and_then(|segment| segment.parse().ok())
        .unwrap_or(usize::MAX)
}
