//! Authority code and URI normalization
//!
//! Legacy records carry a handful of obsolete authority spellings and
//! slashless LoC vocabulary URIs. Both are normalized on the way in,
//! with a warning per replaced code.

use crate::models::Source;
use crate::notifier::Notifier;
use crate::xml::Element;

use super::presence;

/// LoC vocabulary bases that are referenced with a trailing slash.
const NORMALIZABLE_AUTHORITY_URIS: [&str; 6] = [
    "http://id.loc.gov/authorities/names",
    "http://id.loc.gov/authorities/subjects",
    "http://id.loc.gov/authorities/genreForms",
    "http://id.loc.gov/vocabulary/relators",
    "http://id.loc.gov/vocabulary/countries",
    "http://id.loc.gov/vocabulary/graphicMaterials",
];

/// Normalize an authority code. Returns None when the code is blank or
/// the `#N/A` placeholder.
pub(crate) fn normalize_code(code: &str, notifier: &Notifier) -> Option<String> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    match code {
        "lcnaf" => {
            notifier.warn("lcnaf authority code");
            Some("naf".to_string())
        }
        "tgm" => {
            notifier.warn("tgm authority code");
            Some("lctgm".to_string())
        }
        "#N/A" => {
            notifier.warn("#N/A authority code");
            None
        }
        "marcountry" => {
            notifier.warn("marcountry authority code");
            Some("marccountry".to_string())
        }
        _ => Some(code.to_string()),
    }
}

/// Normalize an authority URI, adding the trailing slash the LoC
/// vocabulary bases are cited with.
pub(crate) fn normalize_uri(uri: &str) -> Option<String> {
    let uri = presence(uri)?;
    if NORMALIZABLE_AUTHORITY_URIS.contains(&uri.as_str()) {
        Some(format!("{uri}/"))
    } else {
        Some(uri)
    }
}

/// The source drawn from a node's authority and authorityURI attributes.
pub(crate) fn source_for(node: &Element, notifier: &Notifier) -> Option<Source> {
    let code = node
        .attribute("authority")
        .and_then(|code| normalize_code(code, notifier));
    let uri = node.attribute("authorityURI").and_then(normalize_uri);
    if code.is_none() && uri.is_none() {
        return None;
    }
    Some(Source {
        code,
        uri,
        ..Default::default()
    })
}
