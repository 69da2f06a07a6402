//! MODS to Cocina mapping
//!
//! One builder per slice of the MODS record, run in a fixed order by
//! [`DescriptiveBuilder`]. Builders read the element tree without
//! touching it (the contributor dedup works on its own copies), and none
//! of them halt on bad data; anomalies go to the
//! [`Notifier`](crate::notifier::Notifier).

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::MapResult;
use crate::models::{Description, DescriptiveValue};
use crate::notifier::Notifier;
use crate::purl;
use crate::xml::{Document, Element};

use self::titles::TitleStrategy;

mod access;
mod admin_metadata;
mod alt_rep_group;
mod authority;
mod contributors;
mod events;
mod forms;
mod geographic;
mod identifier_type;
mod identifiers;
mod language_script;
mod languages;
mod names;
mod notes;
mod part;
mod primary;
mod related;
mod subjects;
mod titles;
mod value_uri;

static MODS_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"MODS version (\d+(?:\.\d+)?)").unwrap());

/// Trimmed text, or None when blank.
pub(crate) fn presence(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Runs every section builder against one resource element.
struct DescriptiveBuilder<'a> {
    druid: &'a str,
    label: &'a str,
    purl_base: &'a str,
    notifier: &'a Notifier,
}

impl DescriptiveBuilder<'_> {
    fn build(&self, resource: &Element) -> Description {
        let strategy = TitleStrategy::find(self.label);
        let purl = presence(self.druid).map(|druid| purl::purl_value(&druid, self.purl_base));

        let mut description = Description {
            title: titles::build(resource, strategy, self.notifier),
            ..Default::default()
        };
        description.note = notes::build(resource, self.notifier);
        description.language = languages::build(resource, self.notifier);
        description.contributor = contributors::build(resource, self.notifier);
        description.event = events::build(resource, self.notifier);
        description.subject = subjects::build(resource, self.notifier);
        description.form = forms::build(resource, self.notifier);
        description.identifier = identifiers::build(resource);
        description.admin_metadata = admin_metadata::build(resource, self.notifier);
        description.related_resource = related::build(resource, purl.as_deref(), self.notifier);
        description.geographic = geographic::build(resource);
        description.access = access::build(resource, self.notifier);
        description.purl = purl;
        description
    }
}

impl Description {
    /// Parses a MODS string and maps it, minting the PURL against `purl_base`.
    pub fn from_xml(
        xml: &str,
        druid: &str,
        label: &str,
        purl_base: &str,
        notifier: &Notifier,
    ) -> MapResult<Description> {
        let document = Document::parse(xml)?;
        Ok(Self::props_with_base(
            &document, druid, label, purl_base, notifier,
        ))
    }

    /// Maps a parsed MODS document with the default PURL base.
    pub fn props(document: &Document, druid: &str, label: &str, notifier: &Notifier) -> Description {
        Self::props_with_base(document, druid, label, purl::DEFAULT_PURL_BASE, notifier)
    }

    /// Maps a parsed MODS document, minting the PURL against `purl_base`.
    pub fn props_with_base(
        document: &Document,
        druid: &str,
        label: &str,
        purl_base: &str,
        notifier: &Notifier,
    ) -> Description {
        let root = document.root();
        check_alt_rep_groups(root, notifier);
        check_version(root, notifier);

        let builder = DescriptiveBuilder {
            druid,
            label,
            purl_base,
            notifier,
        };
        let mut description = builder.build(root);
        if description.title.is_empty() {
            if let Some(label) = presence(label) {
                description.title = vec![DescriptiveValue::value(label)];
            }
        }
        description
    }
}

/// An altRepGroup id shared across different element names cannot be
/// paired by any builder.
fn check_alt_rep_groups(root: &Element, notifier: &Notifier) {
    let mut groups: IndexMap<String, Vec<&str>> = IndexMap::new();
    for node in root.descendants() {
        if let Some(id) = node.attribute("altRepGroup").and_then(presence) {
            groups.entry(id).or_default().push(node.name.as_str());
        }
    }
    for (id, names) in &groups {
        if names.len() >= 2 && names.iter().any(|name| *name != names[0]) {
            notifier.warn_with("Unpaired altRepGroup", &[("altRepGroup", id.as_str())]);
        }
    }
}

/// The version claimed by `recordOrigin` text should agree with the
/// root's version attribute.
fn check_version(root: &Element, notifier: &Notifier) {
    let Some(declared) = root.attribute("version").and_then(presence) else {
        return;
    };
    for info in root.children_named("recordInfo") {
        for origin in info.children_named("recordOrigin") {
            let text = origin.text();
            let Some(claimed) = MODS_VERSION.captures(&text).and_then(|caps| caps.get(1)) else {
                continue;
            };
            if claimed.as_str() != declared {
                notifier.warn("MODS version mismatch");
                return;
            }
        }
    }
}
