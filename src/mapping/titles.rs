//! Title mapping
//!
//! Builds titles from `<titleInfo>`: plain or structured values,
//! parallel clusters, uniform titles joined to a `<name>` through
//! nameTitleGroup, and a default for Hydrus deposits that carry none.

use crate::models::{DescriptiveValue, ValueContent};
use crate::notifier::Notifier;
use crate::xml::Element;

use super::{alt_rep_group, authority, language_script, names, presence, primary, value_uri};

/// Title part type by child element name. Parts keep document order.
const PART_TYPES: [(&str, &str); 5] = [
    ("nonSort", "nonsorting characters"),
    ("title", "main title"),
    ("subTitle", "subtitle"),
    ("partNumber", "part number"),
    ("partName", "part name"),
];

/// titleInfo type attribute values carried through to the title.
const TYPES: [&str; 5] = ["abbreviated", "alternative", "supplied", "translated", "uniform"];

#[derive(Clone, Copy)]
pub(crate) enum TitleStrategy {
    Standard,
    /// Hydrus deposits sometimes have no real title; their label is the
    /// literal application name.
    HydrusDefault,
}

impl TitleStrategy {
    pub(crate) fn find(label: &str) -> Self {
        if label == "Hydrus" {
            TitleStrategy::HydrusDefault
        } else {
            TitleStrategy::Standard
        }
    }
}

pub(crate) fn build(
    resource: &Element,
    strategy: TitleStrategy,
    notifier: &Notifier,
) -> Vec<DescriptiveValue> {
    let nodes = resource.children_named("titleInfo");
    if nodes.is_empty() {
        return match strategy {
            TitleStrategy::HydrusDefault => vec![DescriptiveValue::value("Hydrus")],
            TitleStrategy::Standard => Vec::new(),
        };
    }
    let (groups, others) = alt_rep_group::split(&nodes);
    let mut titles: Vec<DescriptiveValue> = Vec::new();
    for &node in &others {
        if let Some(title) = title_value(node, resource, notifier) {
            if !title.is_empty() {
                titles.push(title);
            }
        }
    }
    for group in groups {
        if let Some(title) = grouped_title(&group, resource, notifier) {
            if !title.is_empty() {
                titles.push(title);
            }
        }
    }
    primary::adjust(&mut titles, "title", notifier);
    titles
}

/// The title value for one titleInfo element.
pub(crate) fn title_value(
    node: &Element,
    resource: &Element,
    notifier: &Notifier,
) -> Option<DescriptiveValue> {
    if let Some(href) = node.xlink_href().and_then(presence) {
        if node.child_elements().next().is_none() {
            return Some(DescriptiveValue {
                content: Some(ValueContent::ValueAt(href)),
                ..Default::default()
            });
        }
    }

    let group_id = node.attribute("nameTitleGroup").and_then(presence);
    let mut title = match (&group_id, node.has_attribute("primary")) {
        (Some(id), true) => name_title_value(node, id, resource, notifier)?,
        _ => plain_or_structured(node)?,
    };
    if let (Some(id), false) = (&group_id, node.has_attribute("primary")) {
        if let Some(note) = associated_name_note(id, resource, notifier) {
            title.note.push(note);
        }
    }

    if let Some(kind) = node.attribute("type").filter(|kind| TYPES.contains(kind)) {
        title.type_ = Some(kind.to_string());
    }
    if node.attribute("usage") == Some("primary") {
        title.status = Some("primary".to_string());
    }
    if let Some(label) = node.attribute("displayLabel").and_then(presence) {
        title.display_label = Some(label);
    }
    if let Some(uri) = value_uri::uri_for(node, notifier) {
        title.uri = Some(uri);
    }
    if let Some(source) = authority::source_for(node, notifier) {
        title.source = Some(source);
    }
    if let Some(language) = language_script::build(node) {
        title.value_language = Some(language);
    }
    Some(title)
}

/// A structured value joining the title with the name that shares its
/// title group.
fn name_title_value(
    node: &Element,
    group_id: &str,
    resource: &Element,
    notifier: &Notifier,
) -> Option<DescriptiveValue> {
    let mut title_piece = plain_or_structured(node)?;
    let Some(name) = group_name(resource, group_id) else {
        notifier.warn_with("Name not found for title group", &[("nameTitleGroup", group_id)]);
        return Some(title_piece);
    };
    title_piece.type_ = Some("title".to_string());
    let mut members = vec![title_piece];
    members.extend(names::title_name_parts(name, notifier));
    Some(DescriptiveValue::structured(members))
}

fn group_name<'a>(resource: &'a Element, group_id: &str) -> Option<&'a Element> {
    resource
        .children_named("name")
        .into_iter()
        .find(|name| name.attribute("nameTitleGroup") == Some(group_id))
}

/// The associated-name note carried by non-structured titles in a
/// name-title group.
fn associated_name_note(
    group_id: &str,
    resource: &Element,
    notifier: &Notifier,
) -> Option<DescriptiveValue> {
    let name = group_name(resource, group_id)?;
    let parts = names::title_name_parts(name, notifier);
    let mut note = match parts.len() {
        0 => return None,
        1 => parts.into_iter().next()?,
        _ => DescriptiveValue::structured(parts),
    };
    note.type_ = Some("associated name".to_string());
    Some(note)
}

/// The title value from the titleInfo's own children: a plain value
/// when the only part is a title, otherwise a structuredValue carrying
/// the nonsorting character count note.
fn plain_or_structured(node: &Element) -> Option<DescriptiveValue> {
    let parts: Vec<(&Element, &str)> = node
        .child_elements()
        .filter_map(|child| {
            PART_TYPES
                .iter()
                .find(|(tag, _)| *tag == child.name)
                .map(|(_, part_type)| (child, *part_type))
        })
        .collect();

    if parts.is_empty() {
        let text = node.value()?;
        return Some(DescriptiveValue::value(clean_title(&text)));
    }
    if let [(only, "main title")] = parts.as_slice() {
        let text = only.value()?;
        return Some(DescriptiveValue::value(clean_title(&text)));
    }

    let mut members: Vec<DescriptiveValue> = Vec::new();
    let mut nonsort_note: Option<DescriptiveValue> = None;
    for (child, part_type) in parts {
        let Some(text) = child.value() else { continue };
        match part_type {
            "nonsorting characters" => {
                let count = nonsorting_count(&text);
                nonsort_note = Some(DescriptiveValue::typed(
                    count.to_string(),
                    "nonsorting character count",
                ));
                members.push(DescriptiveValue::typed(text, part_type));
            }
            "main title" => members.push(DescriptiveValue::typed(clean_title(&text), part_type)),
            _ => members.push(DescriptiveValue::typed(text, part_type)),
        }
    }
    if members.is_empty() {
        return None;
    }
    let mut value = DescriptiveValue::structured(members);
    if let Some(note) = nonsort_note {
        value.note.push(note);
    }
    Some(value)
}

/// Nonsorting character count: text length plus one for the implied
/// separator, except after a hyphen or apostrophe.
fn nonsorting_count(text: &str) -> usize {
    let count = text.chars().count();
    if text.ends_with(['-', '\'']) {
        count
    } else {
        count + 1
    }
}

/// Strip one trailing comma.
fn clean_title(text: &str) -> String {
    let trimmed = text.trim_end();
    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed);
    trimmed.trim_end().to_string()
}

fn grouped_title(
    group: &[&Element],
    resource: &Element,
    notifier: &Notifier,
) -> Option<DescriptiveValue> {
    let mut members: Vec<DescriptiveValue> = Vec::new();
    for &node in group {
        if let Some(title) = title_value(node, resource, notifier) {
            if !title.is_empty() {
                members.push(title);
            }
        }
    }
    match members.len() {
        0 => None,
        1 => members.pop(),
        _ => {
            let group_type = group_type(group);
            if group_type.is_some() {
                for member in &mut members {
                    member.type_ = None;
                }
            }
            Some(DescriptiveValue {
                content: Some(ValueContent::ParallelValue(members)),
                type_: group_type,
                ..Default::default()
            })
        }
    }
}

/// Cluster-level type: uniform when every member is uniform, parallel
/// unless a member carries both usage and type.
fn group_type(group: &[&Element]) -> Option<String> {
    if group
        .iter()
        .all(|node| node.attribute("type") == Some("uniform"))
    {
        return Some("uniform".to_string());
    }
    if group
        .iter()
        .any(|node| node.has_attribute("usage") && node.has_attribute("type"))
    {
        return None;
    }
    Some("parallel".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Document;
    use serde_json::json;

    fn map(xml: &str, strategy: TitleStrategy) -> (Vec<DescriptiveValue>, Notifier) {
        let doc = Document::parse(xml).unwrap();
        let notifier = Notifier::new();
        let titles = build(doc.root(), strategy, &notifier);
        (titles, notifier)
    }

    #[test]
    fn test_simple_title() {
        let (titles, notifier) = map(
            "<mods><titleInfo><title>Gaudy Night</title></titleInfo></mods>",
            TitleStrategy::Standard,
        );
        assert_eq!(
            serde_json::to_value(&titles).unwrap(),
            json!([{"value": "Gaudy Night"}])
        );
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_trailing_comma_cleaned() {
        let (titles, _) = map(
            "<mods><titleInfo><title>Gaudy Night,</title></titleInfo></mods>",
            TitleStrategy::Standard,
        );
        assert_eq!(titles[0].as_value(), Some("Gaudy Night"));
    }

    #[test]
    fn test_structured_title_with_nonsort() {
        let (titles, _) = map(
            "<mods><titleInfo>\
               <nonSort>The</nonSort>\
               <title>Tempest</title>\
               <subTitle>a comedy</subTitle>\
             </titleInfo></mods>",
            TitleStrategy::Standard,
        );
        assert_eq!(
            serde_json::to_value(&titles).unwrap(),
            json!([{
                "structuredValue": [
                    {"value": "The", "type": "nonsorting characters"},
                    {"value": "Tempest", "type": "main title"},
                    {"value": "a comedy", "type": "subtitle"}
                ],
                "note": [{"value": "4", "type": "nonsorting character count"}]
            }])
        );
    }

    #[test]
    fn test_nonsort_apostrophe_not_counted_for_separator() {
        let (titles, _) = map(
            "<mods><titleInfo>\
               <nonSort>L'</nonSort>\
               <title>Alouette</title>\
             </titleInfo></mods>",
            TitleStrategy::Standard,
        );
        let note = &titles[0].note[0];
        assert_eq!(note.as_value(), Some("2"));
    }

    #[test]
    fn test_type_passes_through() {
        let (titles, _) = map(
            r#"<mods><titleInfo type="alternative"><title>Also known as</title></titleInfo></mods>"#,
            TitleStrategy::Standard,
        );
        assert_eq!(titles[0].type_.as_deref(), Some("alternative"));
    }

    #[test]
    fn test_usage_conflict_demoted() {
        let (titles, notifier) = map(
            r#"<mods>
                 <titleInfo usage="primary"><title>First</title></titleInfo>
                 <titleInfo usage="primary"><title>Second</title></titleInfo>
               </mods>"#,
            TitleStrategy::Standard,
        );
        assert_eq!(titles[0].status.as_deref(), Some("primary"));
        assert_eq!(titles[1].status, None);
        assert_eq!(notifier.warnings()[0].message, "Multiple marked as primary");
    }

    #[test]
    fn test_name_title_group() {
        let (titles, notifier) = map(
            r#"<mods>
                 <titleInfo type="uniform" nameTitleGroup="1" primary="true">
                   <title>Requiem</title>
                 </titleInfo>
                 <name type="personal" nameTitleGroup="1">
                   <namePart>Verdi, Giuseppe</namePart>
                 </name>
               </mods>"#,
            TitleStrategy::Standard,
        );
        assert_eq!(
            serde_json::to_value(&titles).unwrap(),
            json!([{
                "structuredValue": [
                    {"value": "Requiem", "type": "title"},
                    {"value": "Verdi, Giuseppe", "type": "name"}
                ],
                "type": "uniform"
            }])
        );
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_missing_group_name_warns() {
        let (titles, notifier) = map(
            r#"<mods>
                 <titleInfo type="uniform" nameTitleGroup="9" primary="true">
                   <title>Requiem</title>
                 </titleInfo>
               </mods>"#,
            TitleStrategy::Standard,
        );
        assert_eq!(titles[0].as_value(), Some("Requiem"));
        let warnings = notifier.warnings();
        assert_eq!(warnings[0].message, "Name not found for title group");
        assert_eq!(
            warnings[0].context.get("nameTitleGroup").map(String::as_str),
            Some("9")
        );
    }

    #[test]
    fn test_associated_name_note() {
        let (titles, _) = map(
            r#"<mods>
                 <titleInfo nameTitleGroup="1">
                   <title>Requiem</title>
                 </titleInfo>
                 <name type="personal" nameTitleGroup="1">
                   <namePart>Verdi, Giuseppe</namePart>
                 </name>
               </mods>"#,
            TitleStrategy::Standard,
        );
        assert_eq!(
            serde_json::to_value(&titles[0].note).unwrap(),
            json!([{"value": "Verdi, Giuseppe", "type": "associated name"}])
        );
    }

    #[test]
    fn test_parallel_cluster() {
        let (titles, _) = map(
            r#"<mods>
                 <titleInfo altRepGroup="1" usage="primary">
                   <title>Война и мир</title>
                 </titleInfo>
                 <titleInfo altRepGroup="1" type="translated">
                   <title>War and peace</title>
                 </titleInfo>
               </mods>"#,
            TitleStrategy::Standard,
        );
        assert_eq!(
            serde_json::to_value(&titles).unwrap(),
            json!([{
                "parallelValue": [
                    {"value": "Война и мир", "status": "primary"},
                    {"value": "War and peace"}
                ],
                "type": "parallel"
            }])
        );
    }

    #[test]
    fn test_uniform_cluster() {
        let (titles, _) = map(
            r#"<mods>
                 <titleInfo altRepGroup="1" type="uniform"><title>One</title></titleInfo>
                 <titleInfo altRepGroup="1" type="uniform"><title>Two</title></titleInfo>
               </mods>"#,
            TitleStrategy::Standard,
        );
        assert_eq!(titles[0].type_.as_deref(), Some("uniform"));
    }

    #[test]
    fn test_cluster_with_usage_and_type_member_untyped() {
        let (titles, _) = map(
            r#"<mods>
                 <titleInfo altRepGroup="1" usage="primary" type="translated">
                   <title>One</title>
                 </titleInfo>
                 <titleInfo altRepGroup="1"><title>Two</title></titleInfo>
               </mods>"#,
            TitleStrategy::Standard,
        );
        assert_eq!(titles[0].type_, None);
        let members = titles[0].parallel_members().unwrap();
        assert_eq!(members[0].type_.as_deref(), Some("translated"));
    }

    #[test]
    fn test_xlink_title() {
        let (titles, _) = map(
            r#"<mods xmlns:xlink="http://www.w3.org/1999/xlink">
                 <titleInfo xlink:href="http://example.org/title"/>
               </mods>"#,
            TitleStrategy::Standard,
        );
        assert_eq!(
            serde_json::to_value(&titles).unwrap(),
            json!([{"valueAt": "http://example.org/title"}])
        );
    }

    #[test]
    fn test_hydrus_default() {
        let (titles, _) = map("<mods/>", TitleStrategy::HydrusDefault);
        assert_eq!(
            serde_json::to_value(&titles).unwrap(),
            json!([{"value": "Hydrus"}])
        );
        let (titles, _) = map("<mods/>", TitleStrategy::Standard);
        assert!(titles.is_empty());
    }
}
