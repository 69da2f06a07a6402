//! Form mapping
//!
//! Four sources feed the form array: `<genre>` (including the
//! structured self-deposit convention), `<typeOfResource>` with its
//! manuscript/collection flags and the DataCite extension,
//! `<physicalDescription>` with its count-dependent shapes, and map
//! scale/projection nested under subject cartographics.

use crate::models::{DescriptiveValue, Source, ValueContent};
use crate::notifier::Notifier;
use crate::xml::Element;

use super::{alt_rep_group, authority, language_script, presence, primary, value_uri};

const SELF_DEPOSIT_TYPES: &str = "Stanford self-deposit resource types";
const RESOURCE_TYPES: &str = "MODS resource types";
const DATACITE_TYPES: &str = "DataCite resource types";

pub(crate) fn build(resource: &Element, notifier: &Notifier) -> Vec<DescriptiveValue> {
    let mut forms: Vec<DescriptiveValue> = Vec::new();
    forms.extend(genres(resource, notifier));
    forms.extend(resource_types(resource));
    forms.extend(physical_descriptions(resource, notifier));
    forms.extend(cartographic_forms(resource, notifier));
    forms.retain(|form| !form.is_empty());
    primary::adjust_typed(&mut forms, "genre", notifier);
    primary::adjust_typed(&mut forms, "resource type", notifier);
    forms
}

/// Genres with a type prefixed `H2 ` combine into one structured
/// resource-type form; the rest map individually, alt-rep clusters
/// becoming parallel values.
fn genres(resource: &Element, notifier: &Notifier) -> Vec<DescriptiveValue> {
    let (structured, plain): (Vec<&Element>, Vec<&Element>) = resource
        .children_named("genre")
        .into_iter()
        .partition(|el| {
            el.attribute("type")
                .is_some_and(|kind| kind.starts_with("H2 "))
        });

    let mut forms = Vec::new();
    let members: Vec<DescriptiveValue> = structured
        .iter()
        .filter_map(|el| {
            let text = el.value()?;
            let kind = el.attribute("type")?.trim_start_matches("H2 ");
            Some(DescriptiveValue::typed(text, kind))
        })
        .collect();
    if !members.is_empty() {
        let mut form = DescriptiveValue::structured(members);
        form.type_ = Some("resource type".to_string());
        form.source = Some(Source {
            value: Some(SELF_DEPOSIT_TYPES.to_string()),
            ..Default::default()
        });
        forms.push(form);
    }

    let (groups, others) = alt_rep_group::split(&plain);
    for &node in &others {
        forms.extend(genre_value(node, notifier));
    }
    for group in groups {
        let mut members: Vec<DescriptiveValue> = group
            .iter()
            .filter_map(|&node| genre_value(node, notifier))
            .collect();
        match members.len() {
            0 => {}
            1 => forms.extend(members.pop()),
            _ => {
                for member in &mut members {
                    member.type_ = None;
                }
                forms.push(DescriptiveValue {
                    content: Some(ValueContent::ParallelValue(members)),
                    type_: Some("genre".to_string()),
                    ..Default::default()
                });
            }
        }
    }
    forms
}

fn genre_value(node: &Element, notifier: &Notifier) -> Option<DescriptiveValue> {
    let text = node.value()?;
    let mut form = DescriptiveValue::typed(text, "genre");
    if node.attribute("usage") == Some("primary") {
        form.status = Some("primary".to_string());
    }
    form.display_label = node.attribute("displayLabel").and_then(presence);
    form.uri = value_uri::uri_for(node, notifier);
    form.source = authority::source_for(node, notifier);
    form.value_language = language_script::build(node);
    if let Some(kind) = node.attribute("type").and_then(presence) {
        form.note.push(DescriptiveValue::typed(kind, "genre type"));
    }
    Some(form)
}

fn resource_types(resource: &Element) -> Vec<DescriptiveValue> {
    let source = Source {
        value: Some(RESOURCE_TYPES.to_string()),
        ..Default::default()
    };
    let mut forms = Vec::new();
    for node in resource.children_named("typeOfResource") {
        if let Some(text) = node.value() {
            let mut form = DescriptiveValue::typed(text, "resource type");
            form.source = Some(source.clone());
            if node.attribute("usage") == Some("primary") {
                form.status = Some("primary".to_string());
            }
            form.display_label = node.attribute("displayLabel").and_then(presence);
            forms.push(form);
        }
        // the flags synthesize a form even when the element is empty
        if node.attribute("manuscript") == Some("yes") {
            let mut form = DescriptiveValue::typed("manuscript", "resource type");
            form.source = Some(source.clone());
            forms.push(form);
        }
        if node.attribute("collection") == Some("yes") {
            let mut form = DescriptiveValue::typed("collection", "resource type");
            form.source = Some(source.clone());
            forms.push(form);
        }
    }
    for extension in resource.children_named("extension") {
        if extension.attribute("displayLabel") != Some("datacite") {
            continue;
        }
        for node in extension.descendants_named("resourceType") {
            if let Some(general) = node.attribute("resourceTypeGeneral").and_then(presence) {
                let mut form = DescriptiveValue::typed(general, "resource type");
                form.source = Some(Source {
                    value: Some(DATACITE_TYPES.to_string()),
                    ..Default::default()
                });
                forms.push(form);
            }
        }
    }
    forms
}

fn physical_descriptions(resource: &Element, notifier: &Notifier) -> Vec<DescriptiveValue> {
    let nodes: Vec<&Element> = resource.children_named("physicalDescription");
    let (groups, others) = alt_rep_group::split(&nodes);
    let mut forms = Vec::new();
    for &node in &others {
        forms.extend(physical_description(node, notifier));
    }
    for group in groups {
        let mut members: Vec<DescriptiveValue> = Vec::new();
        for &node in &group {
            members.extend(physical_description(node, notifier));
        }
        match members.len() {
            0 => {}
            1 => forms.extend(members.pop()),
            _ => {
                let display_label = shared(&members, |m| m.display_label.clone());
                let type_ = shared(&members, |m| m.type_.clone());
                let source = shared(&members, |m| m.source.clone());
                for member in &mut members {
                    if display_label.is_some() {
                        member.display_label = None;
                    }
                    if type_.is_some() {
                        member.type_ = None;
                    }
                    if source.is_some() {
                        member.source = None;
                    }
                }
                forms.push(DescriptiveValue {
                    content: Some(ValueContent::ParallelValue(members)),
                    display_label,
                    type_,
                    source,
                    ..Default::default()
                });
            }
        }
    }
    forms
}

/// A field every member carries with the same value.
fn shared<T: Clone + PartialEq>(
    members: &[DescriptiveValue],
    pick: impl Fn(&DescriptiveValue) -> Option<T>,
) -> Option<T> {
    let first = pick(members.first()?)?;
    members
        .iter()
        .all(|member| pick(member).as_ref() == Some(&first))
        .then_some(first)
}

/// The shape of one physicalDescription depends on how many form
/// values it yields: one value absorbs the notes and display label,
/// several with a display label wrap into a grouped value, several
/// without flatten and the notes ride in a separate entry.
fn physical_description(node: &Element, notifier: &Notifier) -> Vec<DescriptiveValue> {
    let mut values = form_values(node, notifier);
    let notes = description_notes(node);
    let display_label = node.attribute("displayLabel").and_then(presence);

    if values.len() == 1 {
        let mut value = values.remove(0);
        // an extent keeps its unit note ahead of the merged ones
        value.note.extend(notes);
        value.display_label = display_label;
        return vec![value];
    }
    if display_label.is_some() && !values.is_empty() {
        return vec![DescriptiveValue {
            content: Some(ValueContent::GroupedValue(values)),
            display_label,
            ..Default::default()
        }];
    }
    if !notes.is_empty() {
        values.push(DescriptiveValue {
            note: notes,
            ..Default::default()
        });
    }
    values
}

fn form_values(node: &Element, notifier: &Notifier) -> Vec<DescriptiveValue> {
    let mut values = Vec::new();
    for child in node.child_elements() {
        let value = match child.name.as_str() {
            "form" => form_value(child, notifier),
            "reformattingQuality" => {
                fixed_source_value(child, "reformatting quality", "MODS reformatting quality terms")
            }
            "internetMediaType" => fixed_source_value(child, "media type", "IANA media type terms"),
            "extent" => extent_value(child),
            "digitalOrigin" => fixed_source_value(child, "digital origin", "MODS digital origin terms"),
            _ => None,
        };
        values.extend(value);
    }
    values
}

fn form_value(child: &Element, notifier: &Notifier) -> Option<DescriptiveValue> {
    let text = child.value()?;
    let kind = child
        .attribute("type")
        .and_then(presence)
        .unwrap_or_else(|| "form".to_string());
    let mut value = DescriptiveValue::typed(text, kind);
    value.uri = value_uri::uri_for(child, notifier);
    value.source = authority::source_for(child, notifier);
    value.display_label = child.attribute("displayLabel").and_then(presence);
    Some(value)
}

fn fixed_source_value(child: &Element, type_: &str, source: &str) -> Option<DescriptiveValue> {
    let text = child.value()?;
    let mut value = DescriptiveValue::typed(text, type_);
    value.source = Some(Source {
        value: Some(source.to_string()),
        ..Default::default()
    });
    Some(value)
}

fn extent_value(child: &Element) -> Option<DescriptiveValue> {
    let text = child.value()?;
    let mut value = DescriptiveValue::typed(text, "extent");
    if let Some(unit) = child.attribute("unit").and_then(presence) {
        value.note.push(DescriptiveValue::typed(unit, "unit"));
    }
    Some(value)
}

fn description_notes(node: &Element) -> Vec<DescriptiveValue> {
    node.children_named("note")
        .into_iter()
        .filter_map(|note| {
            let text = note.value()?;
            let kind = note
                .attribute("type")
                .and_then(presence)
                .unwrap_or_else(|| "condition".to_string());
            let mut value = DescriptiveValue::typed(text, kind);
            value.display_label = note.attribute("displayLabel").and_then(presence);
            Some(value)
        })
        .collect()
}

/// Map scale and projection values under subject cartographics. The
/// projection form takes its label, uri and source from the subject
/// node itself.
fn cartographic_forms(resource: &Element, notifier: &Notifier) -> Vec<DescriptiveValue> {
    let subjects: Vec<&Element> = resource.children_named("subject");
    let mut forms = Vec::new();

    let mut scales: Vec<String> = Vec::new();
    for &subject in &subjects {
        for cartographics in subject.descendants_named("cartographics") {
            for scale in cartographics.children_named("scale") {
                if let Some(text) = scale.value() {
                    if !scales.contains(&text) {
                        scales.push(text);
                    }
                }
            }
        }
    }
    match scales.len() {
        0 => {}
        1 => forms.push(DescriptiveValue::typed(scales.remove(0), "map scale")),
        _ => {
            let members = scales.into_iter().map(DescriptiveValue::value).collect();
            forms.push(DescriptiveValue {
                content: Some(ValueContent::GroupedValue(members)),
                type_: Some("map scale".to_string()),
                ..Default::default()
            });
        }
    }

    let mut seen: Vec<String> = Vec::new();
    for &subject in &subjects {
        for cartographics in subject.descendants_named("cartographics") {
            for projection in cartographics.children_named("projection") {
                let Some(text) = projection.value() else { continue };
                if seen.contains(&text) {
                    continue;
                }
                seen.push(text.clone());
                let mut form = DescriptiveValue::typed(text, "map projection");
                form.display_label = subject.attribute("displayLabel").and_then(presence);
                form.uri = value_uri::uri_for(subject, notifier);
                form.source = authority::source_for(subject, notifier);
                forms.push(form);
            }
        }
    }
    forms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Document;
    use serde_json::json;

    fn map(xml: &str) -> (Vec<DescriptiveValue>, Notifier) {
        let doc = Document::parse(xml).unwrap();
        let notifier = Notifier::new();
        let forms = build(doc.root(), &notifier);
        (forms, notifier)
    }

    #[test]
    fn test_plain_genre() {
        let (forms, notifier) = map("<mods><genre>photographs</genre></mods>");
        assert_eq!(
            serde_json::to_value(&forms).unwrap(),
            json!([{"value": "photographs", "type": "genre"}])
        );
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_genre_type_attribute_becomes_note() {
        let (forms, _) = map(r#"<mods><genre type="style">Art Deco</genre></mods>"#);
        assert_eq!(
            serde_json::to_value(&forms).unwrap(),
            json!([{
                "value": "Art Deco",
                "type": "genre",
                "note": [{"value": "style", "type": "genre type"}]
            }])
        );
    }

    #[test]
    fn test_genre_authority_corrected() {
        let (forms, notifier) = map(r#"<mods><genre authority="tgm">Photographs</genre></mods>"#);
        assert_eq!(
            forms[0].source.as_ref().unwrap().code.as_deref(),
            Some("lctgm")
        );
        assert_eq!(notifier.warnings()[0].message, "tgm authority code");
    }

    #[test]
    fn test_self_deposit_genres_combine() {
        let (forms, _) = map(
            r#"<mods>
                 <genre type="H2 type">Text</genre>
                 <genre type="H2 subtype">Article</genre>
               </mods>"#,
        );
        assert_eq!(
            serde_json::to_value(&forms).unwrap(),
            json!([{
                "structuredValue": [
                    {"value": "Text", "type": "type"},
                    {"value": "Article", "type": "subtype"}
                ],
                "type": "resource type",
                "source": {"value": "Stanford self-deposit resource types"}
            }])
        );
    }

    #[test]
    fn test_parallel_genres() {
        let (forms, _) = map(
            r#"<mods>
                 <genre altRepGroup="1">novels</genre>
                 <genre altRepGroup="1">小説</genre>
               </mods>"#,
        );
        assert_eq!(
            serde_json::to_value(&forms).unwrap(),
            json!([{
                "parallelValue": [{"value": "novels"}, {"value": "小説"}],
                "type": "genre"
            }])
        );
    }

    #[test]
    fn test_multiple_primary_genres() {
        let (forms, notifier) = map(
            r#"<mods>
                 <genre usage="primary">lithographs</genre>
                 <genre usage="primary">etchings</genre>
               </mods>"#,
        );
        assert_eq!(forms[0].status.as_deref(), Some("primary"));
        assert_eq!(forms[1].status, None);
        let warnings = notifier.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "Multiple marked as primary");
        assert_eq!(warnings[0].context.get("type").map(String::as_str), Some("genre"));
    }

    #[test]
    fn test_type_of_resource() {
        let (forms, _) = map("<mods><typeOfResource>text</typeOfResource></mods>");
        assert_eq!(
            serde_json::to_value(&forms).unwrap(),
            json!([{
                "value": "text",
                "type": "resource type",
                "source": {"value": "MODS resource types"}
            }])
        );
    }

    #[test]
    fn test_manuscript_flag_synthesizes_form() {
        let (forms, _) = map(
            r#"<mods><typeOfResource manuscript="yes">mixed material</typeOfResource></mods>"#,
        );
        assert_eq!(
            serde_json::to_value(&forms).unwrap(),
            json!([
                {"value": "mixed material", "type": "resource type", "source": {"value": "MODS resource types"}},
                {"value": "manuscript", "type": "resource type", "source": {"value": "MODS resource types"}}
            ])
        );
    }

    #[test]
    fn test_collection_flag_without_text() {
        let (forms, _) = map(r#"<mods><typeOfResource collection="yes"/></mods>"#);
        assert_eq!(
            serde_json::to_value(&forms).unwrap(),
            json!([{
                "value": "collection",
                "type": "resource type",
                "source": {"value": "MODS resource types"}
            }])
        );
    }

    #[test]
    fn test_datacite_resource_type() {
        let (forms, _) = map(
            r#"<mods><extension displayLabel="datacite">
                 <resourceType resourceTypeGeneral="Dataset">data</resourceType>
               </extension></mods>"#,
        );
        assert_eq!(
            serde_json::to_value(&forms).unwrap(),
            json!([{
                "value": "Dataset",
                "type": "resource type",
                "source": {"value": "DataCite resource types"}
            }])
        );
    }

    #[test]
    fn test_single_form_absorbs_notes_and_label() {
        let (forms, _) = map(
            r#"<mods><physicalDescription displayLabel="Condition">
                 <form>ink on paper</form>
                 <note>Slightly faded.</note>
               </physicalDescription></mods>"#,
        );
        assert_eq!(
            serde_json::to_value(&forms).unwrap(),
            json!([{
                "value": "ink on paper",
                "type": "form",
                "displayLabel": "Condition",
                "note": [{"value": "Slightly faded.", "type": "condition"}]
            }])
        );
    }

    #[test]
    fn test_extent_unit_note_precedes_merged_notes() {
        let (forms, _) = map(
            r#"<mods><physicalDescription>
                 <extent unit="pages">125</extent>
                 <note type="arrangement">Three series.</note>
               </physicalDescription></mods>"#,
        );
        assert_eq!(
            serde_json::to_value(&forms).unwrap(),
            json!([{
                "value": "125",
                "type": "extent",
                "note": [
                    {"value": "pages", "type": "unit"},
                    {"value": "Three series.", "type": "arrangement"}
                ]
            }])
        );
    }

    #[test]
    fn test_multiple_forms_flatten_with_separate_note_entry() {
        let (forms, _) = map(
            r#"<mods><physicalDescription>
                 <form>audio disc</form>
                 <internetMediaType>audio/mpeg</internetMediaType>
                 <digitalOrigin>reformatted digital</digitalOrigin>
                 <note displayLabel="Condition">Scratched.</note>
               </physicalDescription></mods>"#,
        );
        assert_eq!(
            serde_json::to_value(&forms).unwrap(),
            json!([
                {"value": "audio disc", "type": "form"},
                {"value": "audio/mpeg", "type": "media type", "source": {"value": "IANA media type terms"}},
                {"value": "reformatted digital", "type": "digital origin", "source": {"value": "MODS digital origin terms"}},
                {"note": [{"value": "Scratched.", "type": "condition", "displayLabel": "Condition"}]}
            ])
        );
    }

    #[test]
    fn test_multiple_forms_with_label_grouped() {
        let (forms, _) = map(
            r#"<mods><physicalDescription displayLabel="Medium">
                 <form>ink</form>
                 <form>paper</form>
               </physicalDescription></mods>"#,
        );
        assert_eq!(
            serde_json::to_value(&forms).unwrap(),
            json!([{
                "groupedValue": [
                    {"value": "ink", "type": "form"},
                    {"value": "paper", "type": "form"}
                ],
                "displayLabel": "Medium"
            }])
        );
    }

    #[test]
    fn test_reformatting_quality() {
        let (forms, _) = map(
            "<mods><physicalDescription><reformattingQuality>access</reformattingQuality></physicalDescription></mods>",
        );
        assert_eq!(
            serde_json::to_value(&forms).unwrap(),
            json!([{
                "value": "access",
                "type": "reformatting quality",
                "source": {"value": "MODS reformatting quality terms"}
            }])
        );
    }

    #[test]
    fn test_parallel_physical_descriptions_hoist_label() {
        let (forms, _) = map(
            r#"<mods>
                 <physicalDescription altRepGroup="1" displayLabel="Medium"><form>绢本</form></physicalDescription>
                 <physicalDescription altRepGroup="1" displayLabel="Medium"><form>silk</form></physicalDescription>
               </mods>"#,
        );
        assert_eq!(
            serde_json::to_value(&forms).unwrap(),
            json!([{
                "parallelValue": [{"value": "绢本"}, {"value": "silk"}],
                "displayLabel": "Medium",
                "type": "form"
            }])
        );
    }

    #[test]
    fn test_map_scale_single() {
        let (forms, _) = map(
            "<mods><subject><cartographics><scale>Scale 1:24,000</scale></cartographics></subject></mods>",
        );
        assert_eq!(
            serde_json::to_value(&forms).unwrap(),
            json!([{"value": "Scale 1:24,000", "type": "map scale"}])
        );
    }

    #[test]
    fn test_map_scales_grouped() {
        let (forms, _) = map(
            r#"<mods><subject><cartographics>
                 <scale>Scale 1:24,000</scale>
                 <scale>Vertical scale 1:12,000</scale>
               </cartographics></subject></mods>"#,
        );
        assert_eq!(
            serde_json::to_value(&forms).unwrap(),
            json!([{
                "groupedValue": [
                    {"value": "Scale 1:24,000"},
                    {"value": "Vertical scale 1:12,000"}
                ],
                "type": "map scale"
            }])
        );
    }

    #[test]
    fn test_map_projection_takes_subject_attrs() {
        let (forms, _) = map(
            r#"<mods><subject authority="EPSG" valueURI="http://opengis.net/def/crs/EPSG/0/4326" displayLabel="WGS84">
                 <cartographics><projection>EPSG::4326</projection></cartographics>
               </subject></mods>"#,
        );
        assert_eq!(
            serde_json::to_value(&forms).unwrap(),
            json!([{
                "value": "EPSG::4326",
                "type": "map projection",
                "displayLabel": "WGS84",
                "uri": "http://opengis.net/def/crs/EPSG/0/4326",
                "source": {"code": "EPSG"}
            }])
        );
    }
}
