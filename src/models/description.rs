//! Top-level descriptive record types

use serde::Serialize;

use super::value::{Contributor, DescriptiveValue, Event};

/// Administrative metadata about the record itself
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMetadata {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contributor: Vec<Contributor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event: Vec<Event>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub language: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata_standard: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<DescriptiveValue>,
}

impl AdminMetadata {
    pub fn is_empty(&self) -> bool {
        self.contributor.is_empty()
            && self.event.is_empty()
            && self.language.is_empty()
            && self.metadata_standard.is_empty()
            && self.note.is_empty()
            && self.identifier.is_empty()
    }
}

/// Geographic description from a geo extension
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveGeographic {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub form: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subject: Vec<DescriptiveValue>,
}

impl DescriptiveGeographic {
    pub fn is_empty(&self) -> bool {
        self.form.is_empty() && self.subject.is_empty()
    }
}

/// How and where the resource can be reached
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveAccess {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub access_contact: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub digital_location: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub physical_location: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub url: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<DescriptiveValue>,
}

impl DescriptiveAccess {
    pub fn is_empty(&self) -> bool {
        self.access_contact.is_empty()
            && self.digital_location.is_empty()
            && self.physical_location.is_empty()
            && self.url.is_empty()
            && self.note.is_empty()
    }
}

/// Another resource related to the one being described
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedResource {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_at: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub title: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contributor: Vec<Contributor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event: Vec<Event>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subject: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub form: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub language: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_metadata: Option<AdminMetadata>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub geographic: Vec<DescriptiveGeographic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<DescriptiveAccess>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_resource: Vec<RelatedResource>,
}

impl RelatedResource {
    pub fn is_empty(&self) -> bool {
        self.type_.is_none()
            && self.display_label.is_none()
            && self.value_at.is_none()
            && self.title.is_empty()
            && self.contributor.is_empty()
            && self.event.is_empty()
            && self.subject.is_empty()
            && self.form.is_empty()
            && self.language.is_empty()
            && self.note.is_empty()
            && self.identifier.is_empty()
            && self.admin_metadata.is_none()
            && self.geographic.is_empty()
            && self.access.is_none()
            && self.purl.is_none()
            && self.related_resource.is_empty()
    }
}

/// The complete descriptive record for one object
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub title: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub language: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contributor: Vec<Contributor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event: Vec<Event>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subject: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub form: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_metadata: Option<AdminMetadata>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_resource: Vec<RelatedResource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub geographic: Vec<DescriptiveGeographic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<DescriptiveAccess>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::value::DescriptiveValue;
    use serde_json::json;

    #[test]
    fn test_empty_description_serializes_empty() {
        let description = Description::default();
        assert_eq!(serde_json::to_value(&description).unwrap(), json!({}));
    }

    #[test]
    fn test_description_key_names() {
        let description = Description {
            title: vec![DescriptiveValue::value("A record")],
            purl: Some("https://purl.stanford.edu/bc123df4567".to_string()),
            admin_metadata: Some(AdminMetadata {
                note: vec![DescriptiveValue::typed("human prepared", "record origin")],
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&description).unwrap(),
            json!({
                "title": [{"value": "A record"}],
                "purl": "https://purl.stanford.edu/bc123df4567",
                "adminMetadata": {"note": [{"value": "human prepared", "type": "record origin"}]}
            })
        );
    }
}
