//! Subject mapping
//!
//! `<subject>` and `<classification>` nodes dispatch on their shape:
//! plain term children, temporal ranges, hierarchical geography,
//! geographic codes, embedded names and titles. Structured subjects
//! carry authority propagation heuristics that drop a parent source
//! made redundant by its children. Cartographic coordinates anywhere
//! under a subject are collected separately.

use crate::models::{Contributor, DescriptiveValue, Source, ValueContent};
use crate::notifier::Notifier;
use crate::xml::Element;

use super::{alt_rep_group, authority, language_script, names, presence, primary, titles, value_uri};

/// Child tag to subject type for simple term children.
const CHILD_TYPES: [(&str, &str); 6] = [
    ("classification", "classification"),
    ("genre", "genre"),
    ("geographic", "place"),
    ("occupation", "occupation"),
    ("temporal", "time"),
    ("topic", "topic"),
];

/// Source codes treated as interchangeable when comparing a child
/// source against its parent.
const EQUIVALENT_SOURCE_CODES: [&str; 2] = ["lcsh", "naf"];

pub(crate) fn build(resource: &Element, notifier: &Notifier) -> Vec<DescriptiveValue> {
    let nodes: Vec<&Element> = resource
        .child_elements()
        .filter(|el| el.name == "subject" || el.name == "classification")
        .collect();
    let (groups, others) = alt_rep_group::split(&nodes);
    let mut subjects: Vec<DescriptiveValue> = Vec::new();
    for &node in &others {
        if let Some(subject) = subject_for(node, resource, notifier) {
            if !subject.is_empty() {
                subjects.push(subject);
            }
        }
    }
    for group in groups {
        if let Some(subject) = grouped_subject(&group, resource, notifier) {
            if !subject.is_empty() {
                subjects.push(subject);
            }
        }
    }
    primary::adjust_typed(&mut subjects, "classification", notifier);
    primary::adjust_where(&mut subjects, "subject", notifier, |subject| {
        subject.type_.as_deref() != Some("classification")
    });
    subjects.extend(coordinates(&nodes));
    subjects
}

fn subject_for(node: &Element, resource: &Element, notifier: &Notifier) -> Option<DescriptiveValue> {
    if let Some(href) = node.xlink_href().and_then(presence) {
        if node.child_elements().next().is_none() {
            return Some(DescriptiveValue {
                content: Some(ValueContent::ValueAt(href)),
                ..Default::default()
            });
        }
        notifier.warn("Element with both xlink and value");
    }
    if node.name == "classification" {
        return classification_value(node, notifier);
    }

    let children: Vec<&Element> = node.child_elements().collect();
    if children.is_empty() {
        return childless_value(node, notifier);
    }
    if children
        .iter()
        .all(|child| child.name == "temporal" && child.has_attribute("point"))
    {
        return temporal_range(&children, node, notifier);
    }
    if children.len() > 1 {
        if children.iter().any(|child| child.name == "geographicCode") {
            return geographic_code_group(&children, node, resource, notifier);
        }
        return structured_subject(&children, node, resource, notifier);
    }
    single_child_subject(children[0], node, resource, notifier)
}

fn classification_value(node: &Element, notifier: &Notifier) -> Option<DescriptiveValue> {
    let text = node.value()?;
    let mut value = DescriptiveValue::typed(text, "classification");
    value.display_label = node.attribute("displayLabel").and_then(presence);
    if node.attribute("usage") == Some("primary") {
        value.status = Some("primary".to_string());
    }
    value.uri = value_uri::uri_for(node, notifier);
    value.source = authority::source_for(node, notifier);
    if let Some(edition) = node.attribute("edition").and_then(presence) {
        if let Ok(number) = edition.parse::<u32>() {
            let source = value.source.get_or_insert_with(Source::default);
            source.version = Some(format!("{} edition", ordinal(number)));
        }
    }
    if value.uri.is_none() && value.source.is_none() {
        notifier.warn("No source given for classification value");
    }
    Some(value)
}

fn ordinal(number: u32) -> String {
    let suffix = match (number % 10, number % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{number}{suffix}")
}

fn childless_value(node: &Element, notifier: &Notifier) -> Option<DescriptiveValue> {
    if node.has_attribute("valueURI") {
        let mut value = DescriptiveValue::default();
        apply_node_attrs(&mut value, node, notifier);
        return (!value.is_empty()).then_some(value);
    }
    if node.value().is_some() {
        notifier.warn("Subject has text");
    }
    notifier.error("Subject has no children nodes");
    None
}

/// Merge subject-node attributes into a value where unset.
fn apply_node_attrs(value: &mut DescriptiveValue, node: &Element, notifier: &Notifier) {
    if value.uri.is_none() {
        value.uri = value_uri::uri_for(node, notifier);
    }
    if value.source.is_none() {
        value.source = authority::source_for(node, notifier);
    }
    if value.display_label.is_none() {
        value.display_label = node.attribute("displayLabel").and_then(presence);
    }
    if value.status.is_none() && node.attribute("usage") == Some("primary") {
        value.status = Some("primary".to_string());
    }
    if value.value_language.is_none() {
        value.value_language = language_script::build(node);
    }
}

/// Temporal children that all carry a point combine into one time
/// range with shared encoding.
fn temporal_range(
    children: &[&Element],
    node: &Element,
    notifier: &Notifier,
) -> Option<DescriptiveValue> {
    let shared_encoding = children
        .first()
        .and_then(|child| child.attribute("encoding"))
        .filter(|code| {
            children
                .iter()
                .all(|child| child.attribute("encoding") == Some(*code))
        })
        .map(String::from);

    let members: Vec<DescriptiveValue> = children
        .iter()
        .filter_map(|child| {
            let text = child.value()?;
            let mut member = DescriptiveValue::value(text);
            member.type_ = child.attribute("point").map(String::from);
            if shared_encoding.is_none() {
                if let Some(code) = child.attribute("encoding").and_then(presence) {
                    member.encoding = Some(Source {
                        code: Some(code),
                        ..Default::default()
                    });
                }
            }
            Some(member)
        })
        .collect();
    if members.is_empty() {
        return None;
    }

    let mut value = DescriptiveValue::structured(members);
    value.type_ = Some("time".to_string());
    if let Some(code) = shared_encoding {
        value.encoding = Some(Source {
            code: Some(code),
            ..Default::default()
        });
    }
    apply_node_attrs(&mut value, node, notifier);
    Some(value)
}

/// Children alongside a geographicCode collapse into a place wrapper:
/// grouped when the tags match, parallel when mixed, member types
/// stripped.
fn geographic_code_group(
    children: &[&Element],
    node: &Element,
    resource: &Element,
    notifier: &Notifier,
) -> Option<DescriptiveValue> {
    let mut members: Vec<DescriptiveValue> = Vec::new();
    for &child in children {
        if let Some(mut member) = child_value(child, resource, notifier) {
            member.type_ = None;
            members.push(member);
        }
    }
    if members.is_empty() {
        return None;
    }
    let same_tag = children.windows(2).all(|pair| pair[0].name == pair[1].name);
    let content = if same_tag {
        ValueContent::GroupedValue(members)
    } else {
        ValueContent::ParallelValue(members)
    };
    let mut value = DescriptiveValue {
        content: Some(content),
        type_: Some("place".to_string()),
        ..Default::default()
    };
    apply_node_attrs(&mut value, node, notifier);
    Some(value)
}

fn structured_subject(
    children: &[&Element],
    node: &Element,
    resource: &Element,
    notifier: &Notifier,
) -> Option<DescriptiveValue> {
    let mut members: Vec<DescriptiveValue> = children
        .iter()
        .filter_map(|&child| child_value(child, resource, notifier))
        .collect();
    if members.is_empty() {
        return None;
    }
    primary::adjust_typed(&mut members, "genre", notifier);

    let shared_language = members[0].value_language.clone().filter(|language| {
        members
            .iter()
            .all(|member| member.value_language.as_ref() == Some(language))
    });
    if shared_language.is_some() {
        for member in &mut members {
            member.value_language = None;
        }
    }

    let mut value = DescriptiveValue::structured(members);
    value.value_language = shared_language;
    value.display_label = node.attribute("displayLabel").and_then(presence);
    if node.attribute("usage") == Some("primary") {
        value.status = Some("primary".to_string());
    }
    value.uri = value_uri::uri_for(node, notifier);
    value.source = authority::source_for(node, notifier);

    correct_names_source(&mut value);
    remove_redundant_source(&mut value);
    Some(value)
}

fn single_child_subject(
    child: &Element,
    node: &Element,
    resource: &Element,
    notifier: &Notifier,
) -> Option<DescriptiveValue> {
    let mut value = child_value(child, resource, notifier)?;
    apply_node_attrs(&mut value, node, notifier);
    if node.attribute("displayLabel") == Some("Event") {
        value.type_ = Some("event".to_string());
        value.display_label = None;
    }
    (!value.is_empty()).then_some(value)
}

fn child_value(child: &Element, resource: &Element, notifier: &Notifier) -> Option<DescriptiveValue> {
    match child.name.as_str() {
        "name" => name_value(child, notifier),
        "titleInfo" => subject_title_value(child, resource, notifier),
        "geographicCode" => geographic_code_value(child, notifier),
        "hierarchicalGeographic" => hierarchical_value(child),
        "cartographics" => None,
        "Topic" => {
            notifier.warn("Topic incorrectly capitalized");
            simple_value(child, "topic", notifier)
        }
        name => {
            if let Some((_, mapped)) = CHILD_TYPES.iter().find(|(tag, _)| *tag == name) {
                simple_value(child, mapped, notifier)
            } else {
                notifier.warn_with("Unexpected node type for subject", &[("name", name)]);
                None
            }
        }
    }
}

fn simple_value(child: &Element, type_: &str, notifier: &Notifier) -> Option<DescriptiveValue> {
    let text = child.value()?;
    let mut value = DescriptiveValue::typed(text, type_);
    value.uri = value_uri::uri_for(child, notifier);
    value.source = authority::source_for(child, notifier);
    value.display_label = child.attribute("displayLabel").and_then(presence);
    value.value_language = language_script::build(child);
    Some(value)
}

/// A name child goes through the name builder; roles come back as
/// role-typed notes.
fn name_value(child: &Element, notifier: &Notifier) -> Option<DescriptiveValue> {
    let topic_typed = child
        .attribute("type")
        .is_some_and(|kind| kind.eq_ignore_ascii_case("topic"));
    let had_type = child.has_attribute("type");
    let contributor = if topic_typed {
        let mut working = child.clone();
        working.attributes.retain(|a| a.name != "type");
        names::build(&[&working], notifier)?
    } else {
        names::build(&[child], notifier)?
    };

    let Contributor {
        name, role, note, ..
    } = contributor;
    let mut value = name.into_iter().next()?;
    if topic_typed {
        value.type_ = Some("topic".to_string());
    } else if value.type_.is_none() && !had_type {
        value.type_ = Some("name".to_string());
    }
    for mut entry in role {
        entry.type_ = Some("role".to_string());
        value.note.push(entry);
    }
    value.note.extend(note);
    (!value.is_empty()).then_some(value)
}

fn subject_title_value(
    child: &Element,
    resource: &Element,
    notifier: &Notifier,
) -> Option<DescriptiveValue> {
    let mut value = titles::title_value(child, resource, notifier)?;
    if child.attribute("type") == Some("uniform") {
        let uri = value.uri.take();
        let source = value.source.take();
        value = DescriptiveValue {
            content: Some(ValueContent::GroupedValue(vec![value])),
            uri,
            source,
            ..Default::default()
        };
    }
    value.type_ = Some("title".to_string());
    Some(value)
}

fn geographic_code_value(child: &Element, notifier: &Notifier) -> Option<DescriptiveValue> {
    let code = child.value()?;
    let source = authority::source_for(child, notifier);
    let marcgac = source.as_ref().and_then(|s| s.code.as_deref()) == Some("marcgac");
    let code = if marcgac {
        code.trim_end_matches('-').to_string()
    } else {
        code
    };
    Some(DescriptiveValue {
        code: Some(code),
        uri: value_uri::uri_for(child, notifier),
        source,
        type_: Some("place".to_string()),
        ..Default::default()
    })
}

/// hierarchicalGeographic children become place parts typed by their
/// decamelized tag name.
fn hierarchical_value(child: &Element) -> Option<DescriptiveValue> {
    let members: Vec<DescriptiveValue> = child
        .child_elements()
        .filter_map(|part| {
            let text = part.value()?;
            Some(DescriptiveValue::typed(text, decamelize(&part.name)))
        })
        .collect();
    if members.is_empty() {
        return None;
    }
    let mut value = DescriptiveValue::structured(members);
    value.type_ = Some("place".to_string());
    Some(value)
}

fn decamelize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push(' ');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// A parent URI in the names namespace with an lcsh source code is
/// actually naf.
fn correct_names_source(value: &mut DescriptiveValue) {
    let names_uri = value
        .uri
        .as_deref()
        .is_some_and(|uri| uri.contains("id.loc.gov/authorities/names"));
    if !names_uri {
        return;
    }
    if let Some(source) = &mut value.source {
        if source.code.as_deref() == Some("lcsh") {
            source.code = Some("naf".to_string());
        }
    }
}

/// Drop a parent source made redundant by its children: either every
/// child is sourced and none resolves on its own, or the children all
/// agree with the parent and at least one resolves itself.
fn remove_redundant_source(value: &mut DescriptiveValue) {
    if value.source.is_none() {
        return;
    }
    let Some(ValueContent::StructuredValue(members)) = &value.content else {
        return;
    };
    let all_sourced = members.iter().all(|m| m.source.is_some());
    let none_resolvable = members.iter().all(|m| m.uri.is_none() && m.code.is_none());
    if all_sourced && none_resolvable {
        value.source = None;
        return;
    }
    if value.uri.is_none()
        && members
            .iter()
            .all(|m| source_equal(m.source.as_ref(), value.source.as_ref()))
        && members.iter().any(|m| m.uri.is_some() || m.code.is_some())
    {
        value.source = None;
    }
}

fn source_equal(a: Option<&Source>, b: Option<&Source>) -> bool {
    match (
        a.and_then(|s| s.code.as_deref()),
        b.and_then(|s| s.code.as_deref()),
    ) {
        (Some(x), Some(y)) => {
            x == y || (EQUIVALENT_SOURCE_CODES.contains(&x) && EQUIVALENT_SOURCE_CODES.contains(&y))
        }
        (None, None) => true,
        _ => false,
    }
}

fn grouped_subject(
    group: &[&Element],
    resource: &Element,
    notifier: &Notifier,
) -> Option<DescriptiveValue> {
    let mut members: Vec<DescriptiveValue> = Vec::new();
    for &node in group {
        if let Some(member) = subject_for(node, resource, notifier) {
            if !member.is_empty() {
                members.push(member);
            }
        }
    }
    match members.len() {
        0 => None,
        1 => members.pop(),
        _ => {
            let shared = members[0].type_.clone().filter(|kind| {
                members
                    .iter()
                    .all(|member| member.type_.as_deref() == Some(kind.as_str()))
            });
            if shared.is_some() {
                for member in &mut members {
                    member.type_ = None;
                }
            }
            Some(DescriptiveValue {
                content: Some(ValueContent::ParallelValue(members)),
                type_: shared,
                ..Default::default()
            })
        }
    }
}

/// Every cartographic coordinates value under any subject node, in
/// order of first appearance, parentheses stripped.
fn coordinates(nodes: &[&Element]) -> Vec<DescriptiveValue> {
    let mut seen: Vec<String> = Vec::new();
    for node in nodes {
        for cartographics in node.descendants_named("cartographics") {
            for coords in cartographics.children_named("coordinates") {
                let Some(text) = coords.value() else { continue };
                let mut cleaned = text.as_str();
                cleaned = cleaned.strip_prefix('(').unwrap_or(cleaned);
                cleaned = cleaned.strip_suffix(')').unwrap_or(cleaned);
                let cleaned = cleaned.trim().to_string();
                if cleaned.is_empty() || seen.contains(&cleaned) {
                    continue;
                }
                seen.push(cleaned);
            }
        }
    }
    seen.into_iter()
        .map(|value| DescriptiveValue::typed(value, "map coordinates"))
        .collect()
}
