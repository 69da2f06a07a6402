//! Language mapping
//!
//! A `<language>` pairs a text languageTerm with a code languageTerm
//! into one entry; scriptTerm pairs ride along as the script. Term
//! types other than `code` are read as text.

use crate::models::{DescriptiveValue, ValueContent, ValueScript};
use crate::notifier::Notifier;
use crate::xml::Element;

use super::{alt_rep_group, authority, presence, value_uri};

pub(crate) fn build(resource: &Element, notifier: &Notifier) -> Vec<DescriptiveValue> {
    let nodes = resource.children_named("language");
    let (groups, others) = alt_rep_group::split(&nodes);
    let mut languages = Vec::new();
    for &node in &others {
        languages.extend(language_value(node, notifier));
    }
    for group in groups {
        let mut members: Vec<DescriptiveValue> = group
            .iter()
            .filter_map(|&node| language_value(node, notifier))
            .collect();
        match members.len() {
            0 => {}
            1 => languages.extend(members.pop()),
            _ => languages.push(DescriptiveValue::parallel(members)),
        }
    }
    languages
}

/// The language entry for one language-bearing node.
pub(crate) fn language_value(node: &Element, notifier: &Notifier) -> Option<DescriptiveValue> {
    let terms = node.children_named("languageTerm");
    let text_term = terms
        .iter()
        .copied()
        .find(|term| term.attribute("type") != Some("code") && term.value().is_some());
    let code_term = terms
        .iter()
        .copied()
        .find(|term| term.attribute("type") == Some("code") && term.value().is_some());

    let mut value = DescriptiveValue::default();
    if let Some(term) = text_term {
        value.content = term.value().map(ValueContent::Value);
    }
    if let Some(term) = code_term {
        value.code = term.value();
    }
    value.uri = text_term
        .and_then(|term| value_uri::uri_for(term, notifier))
        .or_else(|| code_term.and_then(|term| value_uri::uri_for(term, notifier)));
    value.source = text_term
        .and_then(|term| authority::source_for(term, notifier))
        .or_else(|| code_term.and_then(|term| authority::source_for(term, notifier)));

    value.script = script_value(node, notifier);
    if node.attribute("usage") == Some("primary") {
        value.status = Some("primary".to_string());
    }
    if let Some(part) = node.attribute("objectPart").and_then(presence) {
        value.applies_to.push(DescriptiveValue::value(part));
    }
    value.display_label = node.attribute("displayLabel").and_then(presence);
    (!value.is_empty()).then_some(value)
}

fn script_value(node: &Element, notifier: &Notifier) -> Option<ValueScript> {
    let terms = node.children_named("scriptTerm");
    let text_term = terms
        .iter()
        .copied()
        .find(|term| term.attribute("type") != Some("code") && term.value().is_some());
    let code_term = terms
        .iter()
        .copied()
        .find(|term| term.attribute("type") == Some("code") && term.value().is_some());
    if text_term.is_none() && code_term.is_none() {
        return None;
    }
    Some(ValueScript {
        value: text_term.and_then(|term| term.value()),
        code: code_term.and_then(|term| term.value()),
        source: text_term
            .and_then(|term| authority::source_for(term, notifier))
            .or_else(|| code_term.and_then(|term| authority::source_for(term, notifier))),
    })
}
