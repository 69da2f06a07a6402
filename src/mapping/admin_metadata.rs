//! Administrative metadata mapping
//!
//! `<recordInfo>` describes the catalog record rather than the
//! resource. Multiple recordInfo elements merge into one adminMetadata
//! block.

use crate::models::{AdminMetadata, Contributor, DescriptiveValue, Event, Source, ValueContent};
use crate::notifier::Notifier;
use crate::xml::Element;

use super::{authority, identifiers, languages, presence, value_uri};

pub(crate) fn build(resource: &Element, notifier: &Notifier) -> Option<AdminMetadata> {
    let nodes = resource.children_named("recordInfo");
    if nodes.is_empty() {
        return None;
    }
    let mut admin = AdminMetadata::default();
    for node in nodes {
        collect(node, &mut admin, notifier);
    }
    (!admin.is_empty()).then_some(admin)
}

fn collect(node: &Element, admin: &mut AdminMetadata, notifier: &Notifier) {
    for language in node.children_named("languageOfCataloging") {
        admin
            .language
            .extend(languages::language_value(language, notifier));
    }
    for source in node.children_named("recordContentSource") {
        admin.contributor.extend(content_source(source, notifier));
    }

    let creation: Vec<DescriptiveValue> = node
        .children_named("recordCreationDate")
        .into_iter()
        .filter_map(record_date)
        .collect();
    if !creation.is_empty() {
        admin.event.push(Event {
            type_: Some("creation".to_string()),
            date: creation,
            ..Default::default()
        });
    }
    let changes: Vec<DescriptiveValue> = node
        .children_named("recordChangeDate")
        .into_iter()
        .filter_map(record_date)
        .collect();
    if !changes.is_empty() {
        admin.event.push(Event {
            type_: Some("modification".to_string()),
            date: changes,
            ..Default::default()
        });
    }

    for standard in node.children_named("descriptionStandard") {
        admin
            .metadata_standard
            .extend(metadata_standard(standard, notifier));
    }
    for origin in node.children_named("recordOrigin") {
        if let Some(text) = origin.value() {
            admin.note.push(DescriptiveValue::typed(text, "record origin"));
        }
    }
    for identifier in node.children_named("recordIdentifier") {
        admin
            .identifier
            .extend(identifiers::record_identifier_value(identifier));
    }
}

/// The cataloging agency. Text under an authority is an agency code,
/// bare text is a name.
fn content_source(node: &Element, notifier: &Notifier) -> Option<Contributor> {
    let text = node.value();
    let uri = value_uri::uri_for(node, notifier);
    let source = authority::source_for(node, notifier);
    if text.is_none() && uri.is_none() {
        return None;
    }
    let mut name = DescriptiveValue::default();
    if source.is_some() {
        name.code = text;
    } else {
        name.content = text.map(ValueContent::Value);
    }
    name.uri = uri;
    name.source = source;
    Some(Contributor {
        name: vec![name],
        type_: Some("organization".to_string()),
        role: vec![DescriptiveValue::value("original cataloging agency")],
        ..Default::default()
    })
}

fn record_date(node: &Element) -> Option<DescriptiveValue> {
    let text = node.value()?;
    let mut date = DescriptiveValue::value(text);
    if let Some(encoding) = node.attribute("encoding").and_then(presence) {
        date.encoding = Some(Source {
            code: Some(encoding),
            ..Default::default()
        });
    }
    if node.attribute("keyDate") == Some("yes") {
        date.status = Some("primary".to_string());
    }
    Some(date)
}

fn metadata_standard(node: &Element, notifier: &Notifier) -> Option<DescriptiveValue> {
    let text = node.value()?;
    let mut standard = DescriptiveValue::default();
    if code_like(&text) {
        standard.code = Some(text);
    } else {
        standard.content = Some(ValueContent::Value(text));
    }
    standard.uri = value_uri::uri_for(node, notifier);
    standard.source = authority::source_for(node, notifier);
    Some(standard)
}

/// Vocabulary codes are single lowercase tokens.
fn code_like(text: &str) -> bool {
    !text.contains(char::is_whitespace) && !text.contains(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Document;
    use serde_json::json;

    fn map(xml: &str) -> (Option<AdminMetadata>, Notifier) {
        let doc = Document::parse(xml).unwrap();
        let notifier = Notifier::new();
        let admin = build(doc.root(), &notifier);
        (admin, notifier)
    }

    #[test]
    fn test_content_source_with_authority() {
        let (admin, _) = map(
            r#"<mods><recordInfo>
                 <recordContentSource authority="marcorg">CSt</recordContentSource>
               </recordInfo></mods>"#,
        );
        assert_eq!(
            serde_json::to_value(&admin.unwrap().contributor).unwrap(),
            json!([{
                "name": [{"code": "CSt", "source": {"code": "marcorg"}}],
                "type": "organization",
                "role": [{"value": "original cataloging agency"}]
            }])
        );
    }

    #[test]
    fn test_content_source_plain() {
        let (admin, _) = map(
            "<mods><recordInfo><recordContentSource>Stanford University Libraries</recordContentSource></recordInfo></mods>",
        );
        let contributor = &admin.unwrap().contributor[0];
        assert_eq!(
            contributor.name[0].as_value(),
            Some("Stanford University Libraries")
        );
    }

    #[test]
    fn test_creation_and_change_events() {
        let (admin, _) = map(
            r#"<mods><recordInfo>
                 <recordCreationDate encoding="marc">780512</recordCreationDate>
                 <recordChangeDate encoding="iso8601">20200323000000.0</recordChangeDate>
                 <recordChangeDate encoding="iso8601">20210112000000.0</recordChangeDate>
               </recordInfo></mods>"#,
        );
        assert_eq!(
            serde_json::to_value(&admin.unwrap().event).unwrap(),
            json!([
                {
                    "type": "creation",
                    "date": [{"value": "780512", "encoding": {"code": "marc"}}]
                },
                {
                    "type": "modification",
                    "date": [
                        {"value": "20200323000000.0", "encoding": {"code": "iso8601"}},
                        {"value": "20210112000000.0", "encoding": {"code": "iso8601"}}
                    ]
                }
            ])
        );
    }

    #[test]
    fn test_language_of_cataloging() {
        let (admin, _) = map(
            r#"<mods><recordInfo>
                 <languageOfCataloging usage="primary">
                   <languageTerm type="code" authority="iso639-2b">eng</languageTerm>
                 </languageOfCataloging>
               </recordInfo></mods>"#,
        );
        assert_eq!(
            serde_json::to_value(&admin.unwrap().language).unwrap(),
            json!([{"code": "eng", "status": "primary", "source": {"code": "iso639-2b"}}])
        );
    }

    #[test]
    fn test_description_standard_code() {
        let (admin, _) = map(
            "<mods><recordInfo><descriptionStandard>aacr2</descriptionStandard></recordInfo></mods>",
        );
        assert_eq!(
            serde_json::to_value(&admin.unwrap().metadata_standard).unwrap(),
            json!([{"code": "aacr2"}])
        );
    }

    #[test]
    fn test_description_standard_prose() {
        let (admin, _) = map(
            "<mods><recordInfo><descriptionStandard>Describing Archives: A Content Standard</descriptionStandard></recordInfo></mods>",
        );
        assert_eq!(
            serde_json::to_value(&admin.unwrap().metadata_standard).unwrap(),
            json!([{"value": "Describing Archives: A Content Standard"}])
        );
    }

    #[test]
    fn test_record_origin_and_identifier() {
        let (admin, _) = map(
            r#"<mods><recordInfo>
                 <recordOrigin>human prepared</recordOrigin>
                 <recordIdentifier source="SIRSI">a6789</recordIdentifier>
               </recordInfo></mods>"#,
        );
        let admin = admin.unwrap();
        assert_eq!(
            serde_json::to_value(&admin.note).unwrap(),
            json!([{"value": "human prepared", "type": "record origin"}])
        );
        assert_eq!(
            serde_json::to_value(&admin.identifier).unwrap(),
            json!([{"value": "a6789", "type": "SIRSI"}])
        );
    }

    #[test]
    fn test_empty_record_info_omitted() {
        let (admin, _) = map("<mods><recordInfo/></mods>");
        assert_eq!(admin, None);
        let (admin, _) = map("<mods/>");
        assert_eq!(admin, None);
    }

    #[test]
    fn test_multiple_record_info_merged() {
        let (admin, _) = map(
            r#"<mods>
                 <recordInfo><recordOrigin>human prepared</recordOrigin></recordInfo>
                 <recordInfo><recordOrigin>machine converted</recordOrigin></recordInfo>
               </mods>"#,
        );
        assert_eq!(admin.unwrap().note.len(), 2);
    }
}
