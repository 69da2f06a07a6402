//! PURL handling
//!
//! Builds the persistent URL for a druid and recognizes PURLs already
//! present in the source record, so location mapping can keep the
//! object's own PURL out of the access URLs.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::xml::Element;

/// Default PURL base, overridable through configuration.
pub const DEFAULT_PURL_BASE: &str = "https://purl.stanford.edu";

static PURL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://purl\.stanford\.edu/").unwrap());

/// True if the text is a PURL under either scheme.
pub fn is_purl(text: &str) -> bool {
    PURL_PATTERN.is_match(text.trim())
}

/// The PURL for a druid, with or without the `druid:` prefix.
pub fn purl_value(druid: &str, base: &str) -> String {
    let bare = druid.trim().strip_prefix("druid:").unwrap_or(druid.trim());
    format!("{}/{}", base.trim_end_matches('/'), bare)
}

/// Find the location URL node that carries the object's own PURL.
///
/// Prefers an exact match on the given PURL, then any PURL-valued URL
/// flagged `usage="primary display"`, then the first PURL-valued URL.
pub fn primary_purl_node<'a>(resource: &'a Element, purl: Option<&str>) -> Option<&'a Element> {
    let purl_nodes: Vec<&Element> = resource
        .children_named("location")
        .iter()
        .flat_map(|location| location.children_named("url"))
        .filter(|url| url.value().is_some_and(|v| is_purl(&v)))
        .collect();

    if let Some(own) = purl {
        if let Some(node) = purl_nodes
            .iter()
            .find(|url| url.value().as_deref() == Some(own))
        {
            return Some(node);
        }
    }
    purl_nodes
        .iter()
        .find(|url| url.attribute("usage") == Some("primary display"))
        .copied()
        .or_else(|| purl_nodes.first().copied())
}
