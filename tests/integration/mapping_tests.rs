//! End-to-end mapping tests
//!
//! Whole records through `Description::props`, checking the composed
//! output and the notifier side channel together.

use mods_cocina::xml::Document;
use mods_cocina::{Description, Notifier};
use serde_json::json;

fn props(xml: &str, druid: &str, label: &str) -> (Description, Notifier) {
    let doc = Document::parse(xml).unwrap();
    let notifier = Notifier::new();
    let description = Description::props(&doc, druid, label, &notifier);
    (description, notifier)
}

#[test]
fn test_empty_record_gives_empty_map() {
    let (description, notifier) = props(r#"<mods xmlns="http://www.loc.gov/mods/v3"/>"#, "", "");
    assert_eq!(serde_json::to_value(&description).unwrap(), json!({}));
    assert!(notifier.is_empty());
}

#[test]
fn test_label_supplies_fallback_title() {
    let (description, _) = props(
        r#"<mods xmlns="http://www.loc.gov/mods/v3"/>"#,
        "",
        "Oral history interview, 1998",
    );
    assert_eq!(
        serde_json::to_value(&description).unwrap(),
        json!({"title": [{"value": "Oral history interview, 1998"}]})
    );
}

#[test]
fn test_language_round_trip() {
    let (description, notifier) = props(
        r#"<mods xmlns="http://www.loc.gov/mods/v3">
             <language><languageTerm type="code" authority="iso639-2b">eng</languageTerm></language>
           </mods>"#,
        "",
        "",
    );
    assert_eq!(
        serde_json::to_value(&description).unwrap(),
        json!({"language": [{"code": "eng", "source": {"code": "iso639-2b"}}]})
    );
    assert!(notifier.is_empty());
}

#[test]
fn test_alt_rep_titles_partition_and_order() {
    let (description, _) = props(
        r#"<mods xmlns="http://www.loc.gov/mods/v3">
             <titleInfo><title>Plain</title></titleInfo>
             <titleInfo altRepGroup="1" usage="primary"><title>Война и мир</title></titleInfo>
             <titleInfo altRepGroup="1" type="translated"><title>War and peace</title></titleInfo>
           </mods>"#,
        "",
        "",
    );
    assert_eq!(
        serde_json::to_value(&description.title).unwrap(),
        json!([
            {"value": "Plain"},
            {
                "parallelValue": [
                    {"value": "Война и мир", "status": "primary"},
                    {"value": "War and peace"}
                ],
                "type": "parallel"
            }
        ])
    );
}

#[test]
fn test_date_range_key_date_priority() {
    let (description, notifier) = props(
        r#"<mods xmlns="http://www.loc.gov/mods/v3">
             <originInfo>
               <dateCreated keyDate="yes" point="start">1920</dateCreated>
               <dateCreated keyDate="yes" point="end">1930</dateCreated>
             </originInfo>
           </mods>"#,
        "",
        "",
    );
    assert_eq!(
        serde_json::to_value(&description.event).unwrap(),
        json!([{
            "date": [{
                "structuredValue": [
                    {"value": "1920", "type": "start", "status": "primary"},
                    {"value": "1930", "type": "end"}
                ],
                "type": "creation"
            }]
        }])
    );
    assert!(notifier.is_empty());
}

#[test]
fn test_tgm_authority_corrected() {
    let (description, notifier) = props(
        r#"<mods xmlns="http://www.loc.gov/mods/v3">
             <genre authority="tgm">Photographs</genre>
           </mods>"#,
        "",
        "",
    );
    assert_eq!(
        description.form[0].source.as_ref().unwrap().code.as_deref(),
        Some("lctgm")
    );
    let warnings = notifier.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, "tgm authority code");
}

#[test]
fn test_lcnaf_authority_corrected() {
    let (description, notifier) = props(
        r#"<mods xmlns="http://www.loc.gov/mods/v3">
             <name type="personal" authority="lcnaf">
               <namePart>Sayers, Dorothy L. (Dorothy Leigh), 1893-1957</namePart>
             </name>
           </mods>"#,
        "",
        "",
    );
    let name = &description.contributor[0].name[0];
    assert_eq!(name.source.as_ref().unwrap().code.as_deref(), Some("naf"));
    assert!(notifier
        .warnings()
        .iter()
        .any(|warning| warning.message == "lcnaf authority code"));
}

#[test]
fn test_multiple_primary_genres_demoted_once() {
    let (description, notifier) = props(
        r#"<mods xmlns="http://www.loc.gov/mods/v3">
             <genre usage="primary">lithographs</genre>
             <genre usage="primary">etchings</genre>
           </mods>"#,
        "",
        "",
    );
    assert_eq!(description.form[0].status.as_deref(), Some("primary"));
    assert_eq!(description.form[1].status, None);
    let warnings = notifier.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, "Multiple marked as primary");
    assert_eq!(
        warnings[0].context.get("type").map(String::as_str),
        Some("genre")
    );
}

#[test]
fn test_duplicate_names_union_roles() {
    let (description, notifier) = props(
        r#"<mods xmlns="http://www.loc.gov/mods/v3">
             <name type="personal" nameTitleGroup="1">
               <namePart>Austen, Jane</namePart>
               <role><roleTerm type="text">author</roleTerm></role>
             </name>
             <name type="personal">
               <namePart>Austen, Jane</namePart>
             </name>
           </mods>"#,
        "",
        "",
    );
    assert_eq!(description.contributor.len(), 1);
    let roles: Vec<&str> = description.contributor[0]
        .role
        .iter()
        .filter_map(|role| role.as_value())
        .collect();
    assert_eq!(roles, vec!["author"]);
    assert!(notifier
        .warnings()
        .iter()
        .any(|warning| warning.message == "Duplicate name entry"));
}

#[test]
fn test_mapping_is_idempotent() {
    let doc = Document::parse(FULL_RECORD).unwrap();
    let first = Description::props(&doc, "druid:bc123df4567", "Hamlet", &Notifier::new());
    let second = Description::props(&doc, "druid:bc123df4567", "Hamlet", &Notifier::new());
    assert_eq!(first, second);
}

const FULL_RECORD: &str = r#"<mods xmlns="http://www.loc.gov/mods/v3" version="3.7">
  <titleInfo usage="primary"><title>Hamlet</title></titleInfo>
  <name type="personal" usage="primary">
    <namePart>Shakespeare, William, 1564-1616</namePart>
    <role>
      <roleTerm type="text" authority="marcrelator" authorityURI="http://id.loc.gov/vocabulary/relators/">author</roleTerm>
    </role>
  </name>
  <typeOfResource>text</typeOfResource>
  <genre authority="marcgt">drama</genre>
  <language>
    <languageTerm type="code" authority="iso639-2b">eng</languageTerm>
  </language>
  <originInfo eventType="publication">
    <place><placeTerm type="text">London</placeTerm></place>
    <dateIssued keyDate="yes">1604</dateIssued>
  </originInfo>
  <physicalDescription>
    <form authority="marcform">print</form>
  </physicalDescription>
  <abstract>The prince of Denmark avenges his father.</abstract>
  <subject authority="lcsh"><topic>Revenge</topic></subject>
  <identifier type="isbn">1234567890</identifier>
  <location>
    <url usage="primary display">https://purl.stanford.edu/bc123df4567</url>
    <physicalLocation type="repository">Stanford University Libraries</physicalLocation>
  </location>
  <recordInfo>
    <recordContentSource authority="marcorg">CSt</recordContentSource>
    <recordOrigin>Converted from MARCXML to MODS version 3.7 using MARC21slim2MODS3-7.xsl</recordOrigin>
  </recordInfo>
</mods>"#;

#[test]
fn test_full_record() {
    let (description, notifier) = props(FULL_RECORD, "druid:bc123df4567", "Hamlet");
    assert_eq!(
        serde_json::to_value(&description).unwrap(),
        json!({
            "title": [{"value": "Hamlet", "status": "primary"}],
            "purl": "https://purl.stanford.edu/bc123df4567",
            "note": [{"value": "The prince of Denmark avenges his father.", "type": "abstract"}],
            "language": [{"code": "eng", "source": {"code": "iso639-2b"}}],
            "contributor": [{
                "name": [{"value": "Shakespeare, William, 1564-1616"}],
                "type": "person",
                "status": "primary",
                "role": [{
                    "value": "author",
                    "source": {"code": "marcrelator", "uri": "http://id.loc.gov/vocabulary/relators/"}
                }]
            }],
            "event": [{
                "type": "publication",
                "location": [{"value": "London"}],
                "date": [{"value": "1604", "type": "publication", "status": "primary"}]
            }],
            "subject": [{"value": "Revenge", "type": "topic", "source": {"code": "lcsh"}}],
            "form": [
                {"value": "drama", "type": "genre", "source": {"code": "marcgt"}},
                {"value": "text", "type": "resource type", "source": {"value": "MODS resource types"}},
                {"value": "print", "type": "form", "source": {"code": "marcform"}}
            ],
            "identifier": [{"value": "1234567890", "type": "isbn", "source": {"code": "isbn"}}],
            "adminMetadata": {
                "contributor": [{
                    "name": [{"code": "CSt", "source": {"code": "marcorg"}}],
                    "type": "organization",
                    "role": [{"value": "original cataloging agency"}]
                }],
                "note": [{
                    "value": "Converted from MARCXML to MODS version 3.7 using MARC21slim2MODS3-7.xsl",
                    "type": "record origin"
                }]
            },
            "access": {
                "physicalLocation": [{"value": "Stanford University Libraries", "type": "repository"}]
            }
        })
    );
    assert!(notifier.is_empty());
}

#[test]
fn test_related_item_round_trip() {
    let (description, notifier) = props(
        r#"<mods xmlns="http://www.loc.gov/mods/v3">
             <titleInfo><title>Letter to the editor</title></titleInfo>
             <relatedItem type="host">
               <titleInfo><title>The Daily Bugle</title></titleInfo>
               <location><url usage="primary display">https://purl.stanford.edu/zw200wd8767</url></location>
             </relatedItem>
           </mods>"#,
        "",
        "",
    );
    assert_eq!(
        serde_json::to_value(&description.related_resource).unwrap(),
        json!([{
            "type": "part of",
            "title": [{"value": "The Daily Bugle"}],
            "purl": "https://purl.stanford.edu/zw200wd8767"
        }])
    );
    assert!(notifier.is_empty());
}
