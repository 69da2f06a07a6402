//! Access mapping
//!
//! Physical locations, shelf locators and urls from `location` nodes,
//! plus contact notes. PURL links are reported through the top-level
//! `purl` field and through purl-only related resources, so any
//! purl-valued url is skipped here.

use crate::models::{DescriptiveAccess, DescriptiveValue, ValueContent};
use crate::notifier::Notifier;
use crate::purl;
use crate::xml::Element;

use super::{authority, language_script, presence, value_uri};

pub(crate) fn build(resource: &Element, notifier: &Notifier) -> Option<DescriptiveAccess> {
    let mut access = DescriptiveAccess::default();

    for location in resource.children_named("location") {
        for node in location.child_elements() {
            match node.name.as_str() {
                "physicalLocation" => {
                    if node.attribute("type") == Some("discovery") {
                        continue;
                    }
                    if let Some(value) = physical_location(node, notifier) {
                        access.physical_location.push(value);
                    }
                }
                "shelfLocator" => {
                    if let Some(text) = node.value() {
                        access
                            .physical_location
                            .push(DescriptiveValue::typed(text, "shelf locator"));
                    }
                }
                "url" => {
                    if let Some(value) = url_value(node) {
                        access.url.push(value);
                    }
                }
                _ => {}
            }
        }
    }

    for note in resource.children_named("note") {
        if note.attribute("type") != Some("contact") {
            continue;
        }
        if let Some(value) = contact_value(note) {
            access.access_contact.push(value);
        }
    }

    (!access.is_empty()).then_some(access)
}

fn physical_location(node: &Element, notifier: &Notifier) -> Option<DescriptiveValue> {
    let value = DescriptiveValue {
        content: node.value().map(ValueContent::Value),
        type_: node.attribute("type").and_then(presence),
        uri: value_uri::uri_for(node, notifier),
        source: authority::source_for(node, notifier),
        display_label: node.attribute("displayLabel").and_then(presence),
        value_language: language_script::build(node),
        ..Default::default()
    };
    (!value.is_empty()).then_some(value)
}

fn url_value(node: &Element) -> Option<DescriptiveValue> {
    let text = node.value()?;
    if purl::is_purl(&text) {
        return None;
    }
    let mut value = DescriptiveValue::value(text);
    value.display_label = node.attribute("displayLabel").and_then(presence);
    if node.attribute("usage") == Some("primary display") {
        value.status = Some("primary".to_string());
    }
    if let Some(note) = node.attribute("note").and_then(presence) {
        value.note.push(DescriptiveValue::value(note));
    }
    Some(value)
}

fn contact_value(node: &Element) -> Option<DescriptiveValue> {
    let mut value = DescriptiveValue::typed(node.value()?, "email");
    value.display_label = node.attribute("displayLabel").and_then(presence);
    Some(value)
}
