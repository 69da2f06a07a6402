//! lang/script attribute mapping
//!
//! Any element can state the language and script of its own text via
//! `lang` and `script` attributes. They become a valueLanguage on the
//! mapped value, with the fixed ISO sources.

use crate::models::{Source, ValueLanguage, ValueScript};
use crate::xml::Element;

use super::presence;

/// The valueLanguage for a node's lang/script attributes, if either is
/// present.
pub(crate) fn build(node: &Element) -> Option<ValueLanguage> {
    let code = node.attribute("lang").and_then(presence);
    let script = node.attribute("script").and_then(presence);
    if code.is_none() && script.is_none() {
        return None;
    }
    let source = code.is_some().then(|| Source {
        code: Some("iso639-2b".to_string()),
        ..Default::default()
    });
    let value_script = script.map(|code| ValueScript {
        code: Some(code),
        source: Some(Source {
            code: Some("iso15924".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    });
    Some(ValueLanguage {
        code,
        source,
        value_script,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Document;

    #[test]
    fn test_lang_and_script() {
        let doc = Document::parse(r#"<title lang="rus" script="Cyrl">X</title>"#).unwrap();
        let vl = build(doc.root()).unwrap();
        assert_eq!(vl.code.as_deref(), Some("rus"));
        assert_eq!(vl.source.unwrap().code.as_deref(), Some("iso639-2b"));
        let script = vl.value_script.unwrap();
        assert_eq!(script.code.as_deref(), Some("Cyrl"));
        assert_eq!(script.source.unwrap().code.as_deref(), Some("iso15924"));
    }

    #[test]
    fn test_script_only() {
        let doc = Document::parse(r#"<title script="Latn">X</title>"#).unwrap();
        let vl = build(doc.root()).unwrap();
        assert_eq!(vl.code, None);
        assert_eq!(vl.source, None);
        assert_eq!(vl.value_script.unwrap().code.as_deref(), Some("Latn"));
    }

    #[test]
    fn test_absent() {
        let doc = Document::parse("<title>X</title>").unwrap();
        assert_eq!(build(doc.root()), None);
    }
}
