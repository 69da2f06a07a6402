//! Name mapping
//!
//! Turns one `<name>` element, or an alt-rep cluster of them, into a
//! contributor. Name parts keep document order; multiple parts become
//! a structuredValue and a cluster becomes a parallelValue. Roles,
//! affiliations, descriptions and name identifiers ride along on the
//! contributor.

use crate::models::{Contributor, DescriptiveValue, ValueContent};
use crate::notifier::Notifier;
use crate::xml::Element;

use super::{authority, identifiers, language_script, presence, value_uri};

/// namePart type attribute to part type
const NAME_PART_TYPES: [(&str, &str); 4] = [
    ("family", "surname"),
    ("given", "forename"),
    ("termsOfAddress", "term of address"),
    ("date", "life dates"),
];

/// name type attribute to contributor type
const NAME_TYPES: [(&str, &str); 4] = [
    ("personal", "person"),
    ("corporate", "organization"),
    ("family", "family"),
    ("conference", "conference"),
];

/// Date parts with these prefixes describe a period of activity, not a
/// lifespan.
const ACTIVITY_PREFIXES: [&str; 2] = ["active", "fl"];

/// Description text marking a contributor that is not part of the
/// citation.
const UNCITED_DESCRIPTION: &str = "not included in citation";

/// Contributor types that hoist from the name level.
pub(crate) fn is_contributor_type(type_: &str) -> bool {
    NAME_TYPES.iter().any(|(_, mapped)| *mapped == type_)
}

/// Build a contributor from one name element or an alt-rep cluster.
pub(crate) fn build(cluster: &[&Element], notifier: &Notifier) -> Option<Contributor> {
    match cluster {
        [] => None,
        [name] => single(name, notifier),
        _ => parallel(cluster, notifier),
    }
}

fn single(name: &Element, notifier: &Notifier) -> Option<Contributor> {
    if name.first_child("etal").is_some() {
        return Some(Contributor {
            type_: Some("unspecified others".to_string()),
            ..Default::default()
        });
    }
    let roles = roles_for(name, notifier);
    let mut parts = name_parts(name, notifier);
    if parts.is_empty() {
        notifier.warn("Missing name/namePart element");
        return None;
    }
    if let Some(first) = parts.first_mut() {
        first.type_ = name_type(name, &roles, notifier);
        if name.attribute("usage") == Some("primary") {
            first.status = Some("primary".to_string());
        }
    }
    Some(Contributor {
        name: parts,
        role: roles,
        identifier: identifiers_for(name),
        note: notes_for(name),
        ..Default::default()
    })
}

fn parallel(cluster: &[&Element], notifier: &Notifier) -> Option<Contributor> {
    let mut members: Vec<DescriptiveValue> = Vec::new();
    let mut roles: Vec<DescriptiveValue> = Vec::new();
    let mut notes: Vec<DescriptiveValue> = Vec::new();
    let mut ids: Vec<DescriptiveValue> = Vec::new();

    for &name in cluster {
        let mut parts = name_parts(name, notifier);
        if parts.is_empty() {
            notifier.warn("Missing name/namePart element");
        } else {
            let mut member = if parts.len() == 1 {
                parts.remove(0)
            } else {
                DescriptiveValue::grouped(parts)
            };
            if name.attribute("usage") == Some("primary") {
                member.status = Some("primary".to_string());
            }
            members.push(member);
        }
        for role in roles_for(name, notifier) {
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
        for note in notes_for(name) {
            if !notes.contains(&note) {
                notes.push(note);
            }
        }
        for id in identifiers_for(name) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    if members.is_empty() {
        return None;
    }

    // type from the first element, status from the first element that
    // declares usage
    let shared_type = cluster.first().and_then(|el| name_type(el, &roles, notifier));
    let shared_status = cluster
        .iter()
        .find(|el| el.has_attribute("usage"))
        .and_then(|el| (el.attribute("usage") == Some("primary")).then(|| "primary".to_string()));

    let wrapper = DescriptiveValue {
        content: Some(ValueContent::ParallelValue(members)),
        type_: shared_type,
        status: shared_status,
        ..Default::default()
    };
    Some(Contributor {
        name: vec![wrapper],
        role: roles,
        identifier: ids,
        note: notes,
        ..Default::default()
    })
}

/// The name-part values for one name element: zero, one plain part, or
/// a structuredValue, with alternative names grouping everything and a
/// displayForm appended as its own part.
fn name_parts(name: &Element, notifier: &Notifier) -> Vec<DescriptiveValue> {
    let mut parts: Vec<DescriptiveValue> = Vec::new();
    let part_nodes: Vec<(&Element, String)> = name
        .children_named("namePart")
        .into_iter()
        .filter_map(|node| node.value().map(|text| (node, text)))
        .collect();

    match part_nodes.len() {
        0 => {
            if let Some(href) = name.xlink_href().and_then(presence) {
                parts.push(DescriptiveValue {
                    content: Some(ValueContent::ValueAt(href)),
                    ..Default::default()
                });
            } else if let Some(uri) = value_uri::uri_for(name, notifier) {
                parts.push(DescriptiveValue {
                    uri: Some(uri),
                    source: authority::source_for(name, notifier),
                    ..Default::default()
                });
            }
        }
        1 => {
            if let Some((node, text)) = part_nodes.into_iter().next() {
                let mut part = part_value(node, text, notifier);
                apply_name_attrs(&mut part, name, notifier);
                parts.push(part);
            }
        }
        _ => {
            let members: Vec<DescriptiveValue> = part_nodes
                .into_iter()
                .map(|(node, text)| part_value(node, text, notifier))
                .collect();
            let mut wrapper = DescriptiveValue::structured(members);
            apply_name_attrs(&mut wrapper, name, notifier);
            parts.push(wrapper);
        }
    }

    let alternatives: Vec<DescriptiveValue> = name
        .children_named("alternativeName")
        .iter()
        .filter_map(|alt| alt.value())
        .map(|text| DescriptiveValue::typed(text, "alternative"))
        .collect();
    if !alternatives.is_empty() {
        let mut members = std::mem::take(&mut parts);
        members.extend(alternatives);
        parts.push(DescriptiveValue::grouped(members));
    }

    if let Some(display) = name.first_child("displayForm").and_then(|d| d.value()) {
        parts.push(DescriptiveValue::typed(display, "display"));
    }
    parts
}

fn part_value(node: &Element, text: String, notifier: &Notifier) -> DescriptiveValue {
    let part_type = match node.attribute("type") {
        None => None,
        Some(raw) if raw.trim().is_empty() => {
            notifier.warn("Name/namePart type attribute set to \"\"");
            None
        }
        Some("date") if is_activity_date(&text) => Some("activity dates".to_string()),
        Some(raw) => match NAME_PART_TYPES.iter().find(|(attr, _)| *attr == raw) {
            Some((_, mapped)) => Some(mapped.to_string()),
            None => {
                notifier.warn_with("namePart has unknown type assigned", &[("type", raw)]);
                None
            }
        },
    };
    DescriptiveValue {
        content: Some(ValueContent::Value(text)),
        type_: part_type,
        ..Default::default()
    }
}

fn is_activity_date(text: &str) -> bool {
    let lowered = text.to_lowercase();
    ACTIVITY_PREFIXES.iter().any(|prefix| lowered.starts_with(prefix))
}

fn apply_name_attrs(value: &mut DescriptiveValue, name: &Element, notifier: &Notifier) {
    value.uri = value_uri::uri_for(name, notifier);
    value.source = authority::source_for(name, notifier);
    value.value_language = language_script::build(name);
    value.display_label = name.attribute("displayLabel").and_then(presence);
}

fn name_type(name: &Element, roles: &[DescriptiveValue], notifier: &Notifier) -> Option<String> {
    let Some(raw) = name.attribute("type").and_then(presence) else {
        // a role of "event" types the name when nothing else does
        let event_role = roles.iter().any(|role| role.as_value() == Some("event"));
        return event_role.then(|| "event".to_string());
    };
    if let Some((_, mapped)) = NAME_TYPES.iter().find(|(attr, _)| *attr == raw) {
        return Some(mapped.to_string());
    }
    let lowered = raw.to_lowercase();
    if let Some((_, mapped)) = NAME_TYPES.iter().find(|(attr, _)| *attr == lowered) {
        notifier.warn("Name type incorrectly capitalized");
        return Some(mapped.to_string());
    }
    notifier.warn_with("Name type unrecognized", &[("type", raw.as_str())]);
    None
}

fn roles_for(name: &Element, notifier: &Notifier) -> Vec<DescriptiveValue> {
    name.children_named("role")
        .into_iter()
        .filter_map(|role| role_value(role, notifier))
        .collect()
}

fn role_value(role: &Element, notifier: &Notifier) -> Option<DescriptiveValue> {
    let terms = role.children_named("roleTerm");
    let value_term = terms
        .iter()
        .copied()
        .find(|term| term.attribute("type") != Some("code") && term.value().is_some());
    let code_term = terms
        .iter()
        .copied()
        .find(|term| term.attribute("type") == Some("code") && term.value().is_some());
    if value_term.is_none() && code_term.is_none() {
        notifier.warn("Missing or empty roleTerm");
        return None;
    }

    let value = value_term.and_then(|term| term.value());
    let code = code_term.and_then(|term| term.value());
    let uri = value_term
        .and_then(|term| value_uri::uri_for(term, notifier))
        .or_else(|| code_term.and_then(|term| value_uri::uri_for(term, notifier)));
    let source = value_term
        .and_then(|term| authority::source_for(term, notifier))
        .or_else(|| code_term.and_then(|term| authority::source_for(term, notifier)));

    if let Some(code_text) = &code {
        if source.is_none() && uri.is_none() {
            if code_text.chars().count() == 3 {
                notifier.warn("Contributor role code is missing authority");
            } else {
                notifier.error_with(
                    "Contributor role code has unexpected value",
                    &[("role", code_text.as_str())],
                );
                return None;
            }
        }
    }
    Some(DescriptiveValue {
        content: value.map(ValueContent::Value),
        code,
        uri,
        source,
        ..Default::default()
    })
}

fn notes_for(name: &Element) -> Vec<DescriptiveValue> {
    let mut notes: Vec<DescriptiveValue> = name
        .children_named("affiliation")
        .iter()
        .filter_map(|affiliation| affiliation.value())
        .map(|text| DescriptiveValue::typed(text, "affiliation"))
        .collect();
    if let Some(text) = name.first_child("description").and_then(|d| d.value()) {
        if text.eq_ignore_ascii_case(UNCITED_DESCRIPTION) {
            notes.push(DescriptiveValue::typed("false", "citation status"));
        } else {
            notes.push(DescriptiveValue::typed(text, "description"));
        }
    }
    notes
}

fn identifiers_for(name: &Element) -> Vec<DescriptiveValue> {
    name.children_named("nameIdentifier")
        .iter()
        .filter_map(|node| identifiers::name_identifier_value(node))
        .collect()
}

/// Name parts shaped for embedding in a structured title: display
/// forms are dropped, structured parts are flattened, and a plain part
/// is typed as a name.
pub(crate) fn title_name_parts(name: &Element, notifier: &Notifier) -> Vec<DescriptiveValue> {
    let mut out = Vec::new();
    for part in name_parts(name, notifier) {
        if part.type_.as_deref() == Some("display") {
            continue;
        }
        match part.content {
            Some(ValueContent::StructuredValue(members)) => out.extend(members),
            Some(ValueContent::Value(_)) => {
                let mut part = part;
                if part.type_.is_none() {
                    part.type_ = Some("name".to_string());
                }
                out.push(part);
            }
            _ => out.push(part),
        }
    }
    out
}
