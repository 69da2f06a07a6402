//! Event mapping
//!
//! Builds events from `<originInfo>`: dates with start/end ranges,
//! places, publishers, and issuance notes. Alt-rep clusters become one
//! event carrying parallelEvent members, with type and displayLabel
//! hoisted only when every member agrees.

use crate::models::{Contributor, DescriptiveValue, Event, Source, ValueContent};
use crate::notifier::Notifier;
use crate::xml::Element;

use super::{alt_rep_group, authority, language_script, presence, value_uri};

/// Preferred event type vocabulary.
const EVENT_TYPES: [&str; 20] = [
    "acquisition",
    "capture",
    "collection",
    "copyright",
    "creation",
    "degree conferral",
    "development",
    "distribution",
    "generation",
    "manufacture",
    "modification",
    "performance",
    "presentation",
    "production",
    "publication",
    "recording",
    "release",
    "submission",
    "validity",
    "withdrawal",
];

/// Legacy displayLabel values promoted to an event type.
const LEGACY_EVENT_TYPES: [(&str, &str); 4] = [
    ("distributor", "distribution"),
    ("manufacturer", "manufacture"),
    ("producer", "production"),
    ("publisher", "publication"),
];

/// Date element names and the date type each maps to. dateOther takes
/// its type from its own attribute instead.
const DATE_ELEMENTS: [(&str, &str); 7] = [
    ("copyrightDate", "copyright"),
    ("dateCaptured", "capture"),
    ("dateCreated", "creation"),
    ("dateIssued", "publication"),
    ("dateModified", "modification"),
    ("dateOther", ""),
    ("dateValid", "validity"),
];

pub(crate) fn build(resource: &Element, notifier: &Notifier) -> Vec<Event> {
    let nodes = resource.children_named("originInfo");
    let (groups, others) = alt_rep_group::split(&nodes);
    let mut events: Vec<Event> = Vec::new();
    for &node in &others {
        if skippable(node) {
            continue;
        }
        if let Some(event) = event_for(node, notifier) {
            if !event.is_empty() {
                events.push(event);
            }
        }
    }
    for group in groups {
        if let Some(event) = grouped_event(&group, notifier) {
            if !event.is_empty() {
                events.push(event);
            }
        }
    }
    events
}

/// Structural noise: no text anywhere, no value URI, no xlink target.
fn skippable(node: &Element) -> bool {
    if !node.text().trim().is_empty() {
        return false;
    }
    let carries = |el: &Element| el.has_attribute("valueURI") || el.xlink_href().is_some();
    if carries(node) {
        return false;
    }
    !node.descendants().into_iter().any(carries)
}

fn event_for(node: &Element, notifier: &Notifier) -> Option<Event> {
    if node.attribute("eventType") == Some("copyright notice") {
        return copyright_notice_event(node);
    }
    let (event_type, display_label) = resolved_type(node, notifier);
    Some(Event {
        display_label,
        value_language: language_script::build(node),
        location: places(node, notifier),
        contributor: publishers(node, event_type.as_deref()),
        date: dates(node, notifier),
        note: origin_notes(node, notifier),
        type_: event_type,
        ..Default::default()
    })
}

/// Resolve the event type and the surviving display label. A legacy
/// display label is promoted to the type and consumed.
fn resolved_type(node: &Element, notifier: &Notifier) -> (Option<String>, Option<String>) {
    let mut event_type = node.attribute("eventType").and_then(presence);
    let mut display_label = node.attribute("displayLabel").and_then(presence);
    if event_type.is_none() {
        let promoted = display_label.as_deref().and_then(|label| {
            LEGACY_EVENT_TYPES
                .iter()
                .find(|(raw, _)| *raw == label)
                .map(|(_, mapped)| (*mapped).to_string())
        });
        if promoted.is_some() {
            event_type = promoted;
            display_label = None;
        }
    }
    if let Some(kind) = &event_type {
        if !EVENT_TYPES.contains(&kind.as_str()) {
            notifier.warn_with("Unrecognized event type", &[("type", kind.as_str())]);
        }
    }
    (event_type, display_label)
}

/// A copyright notice is terminal: only the statement text survives,
/// as a note.
fn copyright_notice_event(node: &Element) -> Option<Event> {
    let statement = node
        .children_named("copyrightDate")
        .iter()
        .find_map(|date| date.value())?;
    Some(Event {
        type_: Some("copyright notice".to_string()),
        note: vec![DescriptiveValue::typed(statement, "copyright statement")],
        ..Default::default()
    })
}

fn places(node: &Element, notifier: &Notifier) -> Vec<DescriptiveValue> {
    node.children_named("place")
        .into_iter()
        .filter_map(|place| place_value(place, notifier))
        .collect()
}

fn place_value(place: &Element, notifier: &Notifier) -> Option<DescriptiveValue> {
    let terms = place.children_named("placeTerm");
    let text_term = terms
        .iter()
        .copied()
        .find(|term| term.attribute("type") != Some("code") && term.value().is_some());
    let code_term = terms
        .iter()
        .copied()
        .find(|term| term.attribute("type") == Some("code") && term.value().is_some());

    let mut value = DescriptiveValue::default();
    match (text_term, code_term) {
        (Some(text), code) => {
            value.content = text.value().map(ValueContent::Value);
            value.code = code.and_then(|term| term.value());
            value.uri = value_uri::uri_for(text, notifier)
                .or_else(|| code.and_then(|term| value_uri::uri_for(term, notifier)));
            value.source = authority::source_for(text, notifier)
                .or_else(|| code.and_then(|term| authority::source_for(term, notifier)));
        }
        (None, Some(code)) => {
            value.content = None;
            value.code = code.value();
            value.uri = value_uri::uri_for(code, notifier);
            value.source = authority::source_for(code, notifier);
            if value.uri.is_none() && value.source.is_none() {
                notifier.warn("Place code missing authority");
            }
        }
        (None, None) => return None,
    }
    if place.attribute("supplied") == Some("yes") {
        value.type_ = Some("supplied".to_string());
    }
    (!value.is_empty()).then_some(value)
}

fn publishers(node: &Element, event_type: Option<&str>) -> Vec<Contributor> {
    node.children_named("publisher")
        .into_iter()
        .filter_map(|publisher| {
            let text = publisher.value()?;
            let mut name = DescriptiveValue::value(text);
            let standard = publisher
                .attribute("transliteration")
                .or_else(|| node.attribute("transliteration"))
                .and_then(presence);
            if let Some(standard) = standard {
                name.type_ = Some("transliteration".to_string());
                name.standard = Some(Source {
                    value: Some(standard),
                    ..Default::default()
                });
            }
            name.value_language = language_script::build(publisher);
            Some(Contributor {
                name: vec![name],
                type_: Some("organization".to_string()),
                role: vec![publisher_role(event_type)],
                ..Default::default()
            })
        })
        .collect()
}

/// Publisher role by event type.
fn publisher_role(event_type: Option<&str>) -> DescriptiveValue {
    let (value, code) = match event_type {
        Some("production") => ("creator", "cre"),
        Some("distribution") => ("distributor", "dst"),
        Some("manufacture") => ("manufacturer", "mfr"),
        _ => ("publisher", "pbl"),
    };
    DescriptiveValue {
        content: Some(ValueContent::Value(value.to_string())),
        code: Some(code.to_string()),
        uri: Some(format!("http://id.loc.gov/vocabulary/relators/{code}")),
        source: Some(Source {
            code: Some("marcrelator".to_string()),
            uri: Some("http://id.loc.gov/vocabulary/relators/".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn origin_notes(node: &Element, notifier: &Notifier) -> Vec<DescriptiveValue> {
    let mut notes = Vec::new();
    for issuance in node.children_named("issuance") {
        if let Some(text) = issuance.value() {
            let mut note = DescriptiveValue::typed(text, "issuance");
            note.source = Some(Source {
                value: Some("MODS issuance terms".to_string()),
                ..Default::default()
            });
            notes.push(note);
        }
    }
    for frequency in node.children_named("frequency") {
        if let Some(text) = frequency.value() {
            let mut note = DescriptiveValue::typed(text, "frequency");
            note.value_language = language_script::build(frequency);
            note.source = authority::source_for(frequency, notifier);
            notes.push(note);
        }
    }
    for edition in node.children_named("edition") {
        if let Some(text) = edition.value() {
            let mut note = DescriptiveValue::typed(text, "edition");
            note.value_language = language_script::build(edition);
            notes.push(note);
        }
    }
    notes
}

fn dates(node: &Element, notifier: &Notifier) -> Vec<DescriptiveValue> {
    let mut dates = Vec::new();
    for (element, mapped) in DATE_ELEMENTS {
        let nodes: Vec<(&Element, String)> = node
            .children_named(element)
            .into_iter()
            .filter_map(|date| date.value().map(|text| (date, text)))
            .collect();
        if nodes.is_empty() {
            continue;
        }
        let (points, plains): (Vec<_>, Vec<_>) = nodes
            .into_iter()
            .partition(|(date, _)| date.has_attribute("point"));

        for (date, text) in plains {
            let date_type = resolved_date_type(element, mapped, date, node, notifier);
            dates.push(date_value(date, text, date_type));
        }
        if !points.is_empty() {
            dates.push(range_value(element, mapped, points, node, notifier));
        }
    }
    dates
}

fn resolved_date_type(
    element: &str,
    mapped: &str,
    date: &Element,
    origin: &Element,
    notifier: &Notifier,
) -> Option<String> {
    if element == "dateOther" {
        let own = date.attribute("type").and_then(presence);
        if own.is_none() && origin.attribute("eventType").and_then(presence).is_none() {
            notifier.warn("Undetermined date type");
        }
        return own;
    }
    Some(mapped.to_string())
}

fn date_value(date: &Element, text: String, date_type: Option<String>) -> DescriptiveValue {
    let cleaned = text.strip_suffix('.').unwrap_or(&text).to_string();
    let mut value = DescriptiveValue {
        content: Some(ValueContent::Value(cleaned)),
        type_: date_type,
        qualifier: date.attribute("qualifier").and_then(presence),
        ..Default::default()
    };
    if let Some(encoding) = date.attribute("encoding").and_then(presence) {
        value.encoding = Some(Source {
            code: Some(encoding),
            ..Default::default()
        });
    }
    if date.attribute("keyDate") == Some("yes") {
        value.status = Some("primary".to_string());
    }
    if let Some(calendar) = date.attribute("calendar").and_then(presence) {
        value.note.push(DescriptiveValue::typed(calendar, "calendar"));
    }
    value
}

/// One structuredValue over all point-carrying dates of an element
/// name. Encoding and qualifier hoist when every point agrees; keyDate
/// on both ends keeps primary on the start only.
fn range_value(
    element: &str,
    mapped: &str,
    points: Vec<(&Element, String)>,
    origin: &Element,
    notifier: &Notifier,
) -> DescriptiveValue {
    let range_type = resolved_date_type(element, mapped, points[0].0, origin, notifier);
    let shared_encoding = shared_attribute(&points, "encoding");
    let shared_qualifier = shared_attribute(&points, "qualifier");

    let mut members: Vec<DescriptiveValue> = points
        .into_iter()
        .map(|(date, text)| {
            let mut member = date_value(date, text, date.attribute("point").map(String::from));
            if shared_encoding.is_some() {
                member.encoding = None;
            }
            if shared_qualifier.is_some() {
                member.qualifier = None;
            }
            member
        })
        .collect();

    let primaries = members.iter().filter(|m| m.status.is_some()).count();
    if primaries > 1 {
        let keep = members
            .iter()
            .position(|m| m.type_.as_deref() == Some("start"))
            .unwrap_or(0);
        for (i, member) in members.iter_mut().enumerate() {
            if i != keep {
                member.status = None;
            }
        }
    }

    let mut value = DescriptiveValue::structured(members);
    value.type_ = range_type;
    value.qualifier = shared_qualifier;
    if let Some(encoding) = shared_encoding {
        value.encoding = Some(Source {
            code: Some(encoding),
            ..Default::default()
        });
    }
    value
}

fn shared_attribute(points: &[(&Element, String)], name: &str) -> Option<String> {
    let first = points.first()?.0.attribute(name)?;
    points
        .iter()
        .all(|(date, _)| date.attribute(name) == Some(first))
        .then(|| first.to_string())
}

fn grouped_event(group: &[&Element], notifier: &Notifier) -> Option<Event> {
    let members: Vec<&Element> = group
        .iter()
        .copied()
        .filter(|&node| !skippable(node))
        .collect();
    match members.len() {
        0 => None,
        1 => event_for(members[0], notifier),
        _ => {
            let mut subs: Vec<Event> = Vec::new();
            for &node in &members {
                if let Some(event) = event_for(node, notifier) {
                    subs.push(event);
                }
            }
            if subs.is_empty() {
                return None;
            }
            let common_type = common(&subs, |event| event.type_.clone());
            let common_label = common(&subs, |event| event.display_label.clone());
            if common_type.is_some() {
                for sub in &mut subs {
                    sub.type_ = None;
                }
            }
            if common_label.is_some() {
                for sub in &mut subs {
                    sub.display_label = None;
                }
            }
            Some(Event {
                type_: common_type,
                display_label: common_label,
                parallel_event: subs,
                ..Default::default()
            })
        }
    }
}

fn common<F>(subs: &[Event], field: F) -> Option<String>
where
    F: Fn(&Event) -> Option<String>,
{
    let first = field(subs.first()?)?;
    subs.iter()
        .all(|event| field(event).as_deref() == Some(first.as_str()))
        .then_some(first)
}
