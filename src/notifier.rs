//! Data-quality notifications
//!
//! Mapping never aborts on questionable metadata; it records what it
//! found and keeps going. Builders push warnings and errors here, and
//! each one is mirrored to the tracing subscriber as it arrives.

use std::cell::RefCell;

use indexmap::IndexMap;
use serde::Serialize;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A single data-quality finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub context: IndexMap<String, String>,
}

/// Collects notifications emitted while mapping one record
#[derive(Debug, Default)]
pub struct Notifier {
    events: RefCell<Vec<Notification>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning with no context.
    pub fn warn(&self, message: &str) {
        self.push(Severity::Warning, message, &[]);
    }

    /// Record a warning with context pairs.
    pub fn warn_with(&self, message: &str, context: &[(&str, &str)]) {
        self.push(Severity::Warning, message, context);
    }

    /// Record an error with no context.
    pub fn error(&self, message: &str) {
        self.push(Severity::Error, message, &[]);
    }

    /// Record an error with context pairs.
    pub fn error_with(&self, message: &str, context: &[(&str, &str)]) {
        self.push(Severity::Error, message, context);
    }

    fn push(&self, severity: Severity, message: &str, context: &[(&str, &str)]) {
        let context: IndexMap<String, String> = context
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        match severity {
            Severity::Warning if context.is_empty() => tracing::warn!("{}", message),
            Severity::Warning => tracing::warn!("{} {:?}", message, context),
            Severity::Error if context.is_empty() => tracing::error!("{}", message),
            Severity::Error => tracing::error!("{} {:?}", message, context),
        }
        self.events.borrow_mut().push(Notification {
            severity,
            message: message.to_string(),
            context,
        });
    }

    /// Everything recorded so far, in order of arrival.
    pub fn events(&self) -> Vec<Notification> {
        self.events.borrow().clone()
    }

    /// Warnings only.
    pub fn warnings(&self) -> Vec<Notification> {
        self.filtered(Severity::Warning)
    }

    /// Errors only.
    pub fn errors(&self) -> Vec<Notification> {
        self.filtered(Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    fn filtered(&self, severity: Severity) -> Vec<Notification> {
        self.events
            .borrow()
            .iter()
            .filter(|n| n.severity == severity)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let notifier = Notifier::new();
        notifier.warn("first");
        notifier.error_with("second", &[("type", "title")]);
        let events = notifier.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].severity, Severity::Warning);
        assert_eq!(events[0].message, "first");
        assert_eq!(events[1].severity, Severity::Error);
        assert_eq!(events[1].context.get("type").map(String::as_str), Some("title"));
    }

    #[test]
    fn test_filters_by_severity() {
        let notifier = Notifier::new();
        notifier.warn("w");
        notifier.error("e");
        assert_eq!(notifier.warnings().len(), 1);
        assert_eq!(notifier.errors().len(), 1);
        assert!(!notifier.is_empty());
    }
}
