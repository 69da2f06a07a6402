//! Part mapping
//!
//! A `<part>` describes where a constituent sits inside its host. Each
//! part becomes one part-typed note whose groupedValue strings the
//! details, extents, texts and dates together.

use crate::models::{DescriptiveValue, Source};
use crate::xml::Element;

use super::presence;

const DETAIL_PARTS: [(&str, &str); 3] = [
    ("number", "part number"),
    ("caption", "caption"),
    ("title", "part title"),
];

const EXTENT_PARTS: [&str; 4] = ["start", "end", "total", "list"];

pub(crate) fn build(resource: &Element) -> Vec<DescriptiveValue> {
    resource
        .children_named("part")
        .into_iter()
        .filter_map(part_note)
        .collect()
}

fn part_note(part: &Element) -> Option<DescriptiveValue> {
    let mut members: Vec<DescriptiveValue> = Vec::new();
    for child in part.child_elements() {
        match child.name.as_str() {
            "detail" => members.extend(detail_values(child)),
            "extent" => members.extend(extent_values(child)),
            "text" => {
                if let Some(text) = child.value() {
                    members.push(DescriptiveValue::typed(text, "text"));
                }
            }
            "date" => {
                if let Some(text) = child.value() {
                    let mut date = DescriptiveValue::typed(text, "date");
                    if let Some(encoding) = child.attribute("encoding").and_then(presence) {
                        date.encoding = Some(Source {
                            code: Some(encoding),
                            ..Default::default()
                        });
                    }
                    members.push(date);
                }
            }
            _ => {}
        }
    }
    if members.is_empty() {
        return None;
    }
    let mut note = DescriptiveValue::grouped(members);
    note.type_ = Some("part".to_string());
    Some(note)
}

fn detail_values(detail: &Element) -> Vec<DescriptiveValue> {
    let mut values = Vec::new();
    if let Some(kind) = detail.attribute("type").and_then(presence) {
        values.push(DescriptiveValue::typed(kind, "detail type"));
    }
    for child in detail.child_elements() {
        let Some((_, mapped)) = DETAIL_PARTS.iter().find(|(tag, _)| *tag == child.name) else {
            continue;
        };
        if let Some(text) = child.value() {
            values.push(DescriptiveValue::typed(text, *mapped));
        }
    }
    values
}

fn extent_values(extent: &Element) -> Vec<DescriptiveValue> {
    let mut values = Vec::new();
    if let Some(unit) = extent.attribute("unit").and_then(presence) {
        values.push(DescriptiveValue::typed(unit, "extent unit"));
    }
    for child in extent.child_elements() {
        if !EXTENT_PARTS.contains(&child.name.as_str()) {
            continue;
        }
        if let Some(text) = child.value() {
            values.push(DescriptiveValue::typed(text, child.name.as_str()));
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Document;
    use serde_json::json;

    fn map(xml: &str) -> Vec<DescriptiveValue> {
        let doc = Document::parse(xml).unwrap();
        build(doc.root())
    }

    #[test]
    fn test_detail_with_type() {
        let notes = map(
            r#"<relatedItem><part>
                 <detail type="issue">
                   <number>3</number>
                   <caption>no.</caption>
                 </detail>
               </part></relatedItem>"#,
        );
        assert_eq!(
            serde_json::to_value(&notes).unwrap(),
            json!([{
                "type": "part",
                "groupedValue": [
                    {"value": "issue", "type": "detail type"},
                    {"value": "3", "type": "part number"},
                    {"value": "no.", "type": "caption"}
                ]
            }])
        );
    }

    #[test]
    fn test_extent_with_unit() {
        let notes = map(
            r#"<relatedItem><part>
                 <extent unit="pages">
                   <start>127</start>
                   <end>145</end>
                 </extent>
               </part></relatedItem>"#,
        );
        assert_eq!(
            serde_json::to_value(&notes).unwrap(),
            json!([{
                "type": "part",
                "groupedValue": [
                    {"value": "pages", "type": "extent unit"},
                    {"value": "127", "type": "start"},
                    {"value": "145", "type": "end"}
                ]
            }])
        );
    }

    #[test]
    fn test_text_and_date() {
        let notes = map(
            r#"<relatedItem><part>
                 <text>new series</text>
                 <date encoding="w3cdtf">1928</date>
               </part></relatedItem>"#,
        );
        assert_eq!(
            serde_json::to_value(&notes).unwrap(),
            json!([{
                "type": "part",
                "groupedValue": [
                    {"value": "new series", "type": "text"},
                    {"value": "1928", "type": "date", "encoding": {"code": "w3cdtf"}}
                ]
            }])
        );
    }

    #[test]
    fn test_blank_part_dropped() {
        let notes = map("<relatedItem><part><detail/></part></relatedItem>");
        assert!(notes.is_empty());
    }
}
