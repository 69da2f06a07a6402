//! Primary-status conflict resolution
//!
//! A record may only flag one value of a kind as primary. When several
//! arrive, the first keeps its status, the rest are demoted, and a
//! single warning is recorded.

use crate::models::{Contributor, DescriptiveValue};
use crate::notifier::Notifier;

/// Anything that can carry `status: primary`.
pub(crate) trait PrimaryCandidate {
    fn primary_status(&self) -> Option<&str>;
    fn clear_primary_status(&mut self);
    fn primary_type(&self) -> Option<&str>;
}

impl PrimaryCandidate for DescriptiveValue {
    fn primary_status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn clear_primary_status(&mut self) {
        self.status = None;
    }

    fn primary_type(&self) -> Option<&str> {
        self.type_.as_deref()
    }
}

impl PrimaryCandidate for Contributor {
    fn primary_status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn clear_primary_status(&mut self) {
        self.status = None;
    }

    fn primary_type(&self) -> Option<&str> {
        self.type_.as_deref()
    }
}

/// Demote every primary after the first, across all items.
pub(crate) fn adjust<T: PrimaryCandidate>(items: &mut [T], label: &str, notifier: &Notifier) {
    adjust_where(items, label, notifier, |_| true);
}

/// Demote extra primaries among items whose type matches the label.
pub(crate) fn adjust_typed<T: PrimaryCandidate>(items: &mut [T], label: &str, notifier: &Notifier) {
    adjust_where(items, label, notifier, |item| {
        item.primary_type() == Some(label)
    });
}

/// Demote extra primaries among items selected by the predicate.
pub(crate) fn adjust_where<T: PrimaryCandidate>(
    items: &mut [T],
    label: &str,
    notifier: &Notifier,
    candidate: impl Fn(&T) -> bool,
) {
    let primaries: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| candidate(item) && item.primary_status() == Some("primary"))
        .map(|(i, _)| i)
        .collect();
    if primaries.len() < 2 {
        return;
    }
    notifier.warn_with("Multiple marked as primary", &[("type", label)]);
    for &i in &primaries[1..] {
        items[i].clear_primary_status();
    }
}
