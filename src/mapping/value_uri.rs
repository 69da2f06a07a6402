//! valueURI plausibility checks

use crate::notifier::Notifier;
use crate::xml::Element;

use super::presence;

/// Accept a valueURI, warning when it does not look like a URI. The
/// value is kept either way.
pub(crate) fn sniff(uri: &str, notifier: &Notifier) -> Option<String> {
    let uri = presence(uri)?;
    if !uri.starts_with("http") {
        notifier.warn_with("Value URI has unexpected value", &[("value", uri.as_str())]);
    }
    Some(uri)
}

/// The checked valueURI of a node.
pub(crate) fn uri_for(node: &Element, notifier: &Notifier) -> Option<String> {
    node.attribute("valueURI").and_then(|uri| sniff(uri, notifier))
}
