//! Geographic extension mapping
//!
//! A `geo`-labelled extension holds an RDF description of the
//! resource's spatial footprint: media type and type forms, a bounding
//! box or point geometry, and named coverage areas.

use crate::models::{DescriptiveGeographic, DescriptiveValue, Source, ValueLanguage};
use crate::xml::Element;

use super::presence;

pub(crate) fn build(resource: &Element) -> Vec<DescriptiveGeographic> {
    let mut results = Vec::new();
    for extension in resource.children_named("extension") {
        if extension.attribute("displayLabel") != Some("geo") {
            continue;
        }
        let mut geographic = DescriptiveGeographic::default();
        for description in extension.descendants_named("Description") {
            collect(description, &mut geographic);
        }
        if !geographic.is_empty() {
            results.push(geographic);
        }
    }
    results
}

fn collect(description: &Element, geographic: &mut DescriptiveGeographic) {
    for format in description.children_named("format") {
        if let Some(text) = format.value() {
            let mut form = DescriptiveValue::typed(text, "media type");
            form.source = Some(Source {
                value: Some("IANA media type terms".to_string()),
                ..Default::default()
            });
            geographic.form.push(form);
        }
    }
    for kind in description.children_named("type") {
        if let Some(text) = kind.value() {
            geographic.form.push(DescriptiveValue::typed(text, "type"));
        }
    }
    for bounded in description.children_named("boundedBy") {
        for envelope in bounded.children_named("Envelope") {
            geographic.subject.extend(envelope_subject(envelope));
        }
    }
    for point in description.children_named("Point") {
        geographic.subject.extend(point_subject(point));
    }
    for coverage in description.children_named("coverage") {
        geographic.subject.extend(coverage_subject(coverage));
    }
}

/// Envelope corners split into west/south/east/north decimal parts.
fn envelope_subject(envelope: &Element) -> Option<DescriptiveValue> {
    let lower = envelope.first_child("lowerCorner")?.value()?;
    let upper = envelope.first_child("upperCorner")?.value()?;
    let mut lower_parts = lower.split_whitespace();
    let (west, south) = (lower_parts.next()?, lower_parts.next()?);
    let mut upper_parts = upper.split_whitespace();
    let (east, north) = (upper_parts.next()?, upper_parts.next()?);

    let mut subject = DescriptiveValue::structured(vec![
        DescriptiveValue::typed(west, "west"),
        DescriptiveValue::typed(south, "south"),
        DescriptiveValue::typed(east, "east"),
        DescriptiveValue::typed(north, "north"),
    ]);
    subject.type_ = Some("bounding box coordinates".to_string());
    subject.encoding = Some(Source {
        value: Some("decimal".to_string()),
        ..Default::default()
    });
    if let Some(srs) = envelope.attribute("srsName").and_then(presence) {
        subject.standard = Some(Source {
            code: Some(srs),
            ..Default::default()
        });
    }
    Some(subject)
}

fn point_subject(point: &Element) -> Option<DescriptiveValue> {
    let pos = point.first_child("pos")?.value()?;
    let mut parts = pos.split_whitespace();
    let (latitude, longitude) = (parts.next()?, parts.next()?);
    let mut subject = DescriptiveValue::structured(vec![
        DescriptiveValue::typed(latitude, "latitude"),
        DescriptiveValue::typed(longitude, "longitude"),
    ]);
    subject.type_ = Some("point coordinates".to_string());
    subject.encoding = Some(Source {
        value: Some("decimal".to_string()),
        ..Default::default()
    });
    Some(subject)
}

fn coverage_subject(coverage: &Element) -> Option<DescriptiveValue> {
    let value = coverage
        .attribute("title")
        .and_then(presence)
        .or_else(|| coverage.value())?;
    let mut subject = DescriptiveValue::value(value);
    subject.type_ = Some("coverage".to_string());
    subject.uri = coverage.attribute("resource").and_then(presence);
    if let Some(language) = coverage.attribute("language").and_then(presence) {
        subject.value_language = Some(ValueLanguage {
            code: Some(language),
            source: Some(Source {
                code: Some("iso639-2b".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });
    }
    Some(subject)
}
