//! Identifier type vocabulary
//!
//! Raw identifier type strings are matched case-insensitively against
//! three tiers: types with a resolvable URI scheme, types that double
//! as source codes, and types that are merely recognized. Anything
//! else passes through as written.

/// Types with a resolvable URI scheme, and the scheme base.
const URI_SCHEMES: [(&str, &str); 10] = [
    ("ark", "https://n2t.net/ark:/"),
    ("arxiv", "https://arxiv.org/abs/"),
    ("doi", "https://doi.org/"),
    ("hdl", "https://hdl.handle.net/"),
    ("isni", "https://isni.org/isni/"),
    ("orcid", "https://orcid.org/"),
    ("pmcid", "https://www.ncbi.nlm.nih.gov/pmc/"),
    ("pmid", "https://pubmed.ncbi.nlm.nih.gov/"),
    ("purl", "https://purl.stanford.edu/"),
    ("swh", "https://archive.softwareheritage.org/"),
];

/// Types that double as the source code of the identifier.
const SOURCE_CODES: [&str; 17] = [
    "isbn",
    "issn",
    "issn-l",
    "ismn",
    "isrc",
    "iswc",
    "lccn",
    "local",
    "matrix-number",
    "music-plate",
    "music-publisher",
    "oclc",
    "sici",
    "stock-number",
    "upc",
    "videorecording-identifier",
    "wikidata",
];

/// Types that are recognized but carry no source of their own.
const KNOWN_TYPES: [&str; 8] = [
    "accession number",
    "alternate case number",
    "case number",
    "document number",
    "record id",
    "report number",
    "series",
    "uri",
];

/// How a raw identifier type resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IdentifierType {
    /// Canonical type with a resolvable URI scheme
    Scheme {
        type_name: &'static str,
        uri: &'static str,
    },
    /// Canonical type doubling as a source code
    Code { type_name: &'static str },
    /// Canonical type with no source
    Known { type_name: &'static str },
    /// Not in the vocabulary
    Unknown,
}

/// Resolve a raw type string, case-insensitively, to its canonical
/// vocabulary entry.
pub(crate) fn lookup(raw: &str) -> IdentifierType {
    let raw = raw.trim();
    for (type_name, uri) in URI_SCHEMES {
        if type_name.eq_ignore_ascii_case(raw) {
            return IdentifierType::Scheme { type_name, uri };
        }
    }
    for type_name in SOURCE_CODES {
        if type_name.eq_ignore_ascii_case(raw) {
            return IdentifierType::Code { type_name };
        }
    }
    for type_name in KNOWN_TYPES {
        if type_name.eq_ignore_ascii_case(raw) {
            return IdentifierType::Known { type_name };
        }
    }
    IdentifierType::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_lookup_case_insensitive() {
        assert_eq!(
            lookup("DOI"),
            IdentifierType::Scheme {
                type_name: "doi",
                uri: "https://doi.org/"
            }
        );
    }

    #[test]
    fn test_code_lookup() {
        assert_eq!(lookup("ISBN"), IdentifierType::Code { type_name: "isbn" });
        assert_eq!(lookup("oclc"), IdentifierType::Code { type_name: "oclc" });
    }

    #[test]
    fn test_known_lookup() {
        assert_eq!(
            lookup("Accession Number"),
            IdentifierType::Known {
                type_name: "accession number"
            }
        );
        assert_eq!(lookup("uri"), IdentifierType::Known { type_name: "uri" });
    }

    #[test]
    fn test_unknown() {
        assert_eq!(lookup("barcode-ish"), IdentifierType::Unknown);
    }
}
