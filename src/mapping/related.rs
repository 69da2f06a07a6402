//! Related resource mapping
//!
//! Each `relatedItem` runs back through the same builders that describe
//! the main resource. A related item's own primary PURL becomes its
//! `purl` field, and any further purl-valued urls on the current
//! resource are appended as purl-only related entries.

use crate::models::{DescriptiveValue, RelatedResource, Source, ValueContent};
use crate::notifier::Notifier;
use crate::purl;
use crate::xml::Element;

use super::titles::TitleStrategy;
use super::{
    access, admin_metadata, contributors, events, forms, geographic, identifiers, languages, notes,
    part, presence, subjects, titles,
};

/// relatedItem type attribute to relationship designation.
const TYPES: [(&str, &str); 11] = [
    ("constituent", "has part"),
    ("host", "part of"),
    ("original", "has original version"),
    ("otherFormat", "has other format"),
    ("otherVersion", "has version"),
    ("preceding", "preceded by"),
    ("references", "references"),
    ("isReferencedBy", "referenced by"),
    ("reviewOf", "review of"),
    ("series", "in series"),
    ("succeeding", "succeeded by"),
];

pub(crate) fn build(
    resource: &Element,
    own_purl: Option<&str>,
    notifier: &Notifier,
) -> Vec<RelatedResource> {
    let mut related: Vec<RelatedResource> = resource
        .children_named("relatedItem")
        .into_iter()
        .filter_map(|node| related_resource(node, notifier))
        .collect();
    related.extend(related_purls(resource, own_purl));
    related
}

fn related_resource(node: &Element, notifier: &Notifier) -> Option<RelatedResource> {
    let type_attr = node.attribute("type").and_then(presence);
    let other_type = node.attribute("otherType").and_then(presence);

    let type_ = match type_attr {
        Some(raw) => {
            if other_type.is_some() {
                notifier.warn("Related resource has type and otherType");
            }
            match designation(&raw) {
                Some(label) => Some(label.to_string()),
                None => {
                    notifier.warn("Invalid related resource type");
                    return None;
                }
            }
        }
        None => None,
    };
    let other_note = match (&type_, other_type) {
        (None, Some(other)) => Some(other_type_note(node, other)),
        _ => None,
    };

    let mut related = RelatedResource {
        type_,
        display_label: node.attribute("displayLabel").and_then(presence),
        ..Default::default()
    };

    if node.child_elements().next().is_none() {
        related.value_at = node.xlink_href().and_then(presence);
        related.note.extend(other_note);
        return (!related.is_empty()).then_some(related);
    }

    let own_purl = purl::primary_purl_node(node, None).and_then(Element::value);

    related.title = titles::build(node, TitleStrategy::Standard, notifier);
    related.contributor = contributors::build(node, notifier);
    related.event = events::build(node, notifier);
    related.subject = subjects::build(node, notifier);
    related.form = forms::build(node, notifier);
    related.language = languages::build(node, notifier);
    related.note = notes::build(node, notifier);
    related.note.extend(other_note);
    related.note.extend(part::build(node));
    related.identifier = identifiers::build(node);
    related.admin_metadata = admin_metadata::build(node, notifier);
    related.geographic = geographic::build(node);
    related.access = access::build(node, notifier);
    related.related_resource = build(node, own_purl.as_deref(), notifier);
    related.purl = own_purl;

    (!related.is_empty()).then_some(related)
}

fn designation(raw: &str) -> Option<&'static str> {
    TYPES
        .iter()
        .find(|&&(mods, _)| mods == raw)
        .map(|&(_, label)| label)
}

fn other_type_note(node: &Element, value: String) -> DescriptiveValue {
    let source = node
        .attribute("otherTypeAuth")
        .and_then(presence)
        .map(|auth| Source {
            value: Some(auth),
            ..Default::default()
        });
    DescriptiveValue {
        content: Some(ValueContent::Value(value)),
        type_: Some("other relationship type".to_string()),
        uri: node.attribute("otherTypeURI").and_then(presence),
        source,
        ..Default::default()
    }
}

/// Purl-valued urls beyond the primary one point at other objects.
fn related_purls(resource: &Element, own_purl: Option<&str>) -> Vec<RelatedResource> {
    let primary = purl::primary_purl_node(resource, own_purl);
    let mut purls = Vec::new();
    for location in resource.children_named("location") {
        for url in location.children_named("url") {
            if primary.is_some_and(|node| std::ptr::eq(node, url)) {
                continue;
            }
            if let Some(text) = url.value().filter(|text| purl::is_purl(text)) {
                purls.push(RelatedResource {
                    purl: Some(text),
                    ..Default::default()
                });
            }
        }
    }
    purls
}
