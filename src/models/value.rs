//! Core descriptive value types
//!
//! Everything the mapping emits is built from `DescriptiveValue`: one
//! map per value, with exactly one content form (plain, structured,
//! parallel, grouped, or an external reference) plus qualifying
//! attributes. Empty fields stay off the serialized output entirely.

use serde::Serialize;

/// The content form of a descriptive value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueContent {
    /// A single plain value
    Value(String),
    /// Ordered parts of one value (e.g. title segments, date ranges)
    StructuredValue(Vec<DescriptiveValue>),
    /// The same value in alternate representations (e.g. scripts)
    ParallelValue(Vec<DescriptiveValue>),
    /// Distinct values grouped as one unit
    GroupedValue(Vec<DescriptiveValue>),
    /// A reference to a value held elsewhere
    ValueAt(String),
}

/// Vocabulary or standard a value or code was drawn from
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Source {
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.uri.is_none() && self.value.is_none() && self.version.is_none()
    }
}

/// Script of a value, or of a language
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueScript {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

/// Language and script of a value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueLanguage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_script: Option<ValueScript>,
}

impl ValueLanguage {
    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.value.is_none()
            && self.uri.is_none()
            && self.source.is_none()
            && self.value_script.is_none()
    }
}

/// One descriptive value with its qualifying attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveValue {
    #[serde(flatten)]
    pub content: Option<ValueContent>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_language: Option<ValueLanguage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub applies_to: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<ValueScript>,
}

impl DescriptiveValue {
    /// A plain value.
    pub fn value(v: impl Into<String>) -> Self {
        DescriptiveValue {
            content: Some(ValueContent::Value(v.into())),
            ..Default::default()
        }
    }

    /// A plain value with a type.
    pub fn typed(v: impl Into<String>, type_: impl Into<String>) -> Self {
        DescriptiveValue {
            content: Some(ValueContent::Value(v.into())),
            type_: Some(type_.into()),
            ..Default::default()
        }
    }

    /// A structuredValue over the given parts.
    pub fn structured(parts: Vec<DescriptiveValue>) -> Self {
        DescriptiveValue {
            content: Some(ValueContent::StructuredValue(parts)),
            ..Default::default()
        }
    }

    /// A parallelValue over the given members.
    pub fn parallel(members: Vec<DescriptiveValue>) -> Self {
        DescriptiveValue {
            content: Some(ValueContent::ParallelValue(members)),
            ..Default::default()
        }
    }

    /// A groupedValue over the given members.
    pub fn grouped(members: Vec<DescriptiveValue>) -> Self {
        DescriptiveValue {
            content: Some(ValueContent::GroupedValue(members)),
            ..Default::default()
        }
    }

    /// The plain value text, when the content is a plain value.
    pub fn as_value(&self) -> Option<&str> {
        match &self.content {
            Some(ValueContent::Value(v)) => Some(v),
            _ => None,
        }
    }

    /// The members of a parallelValue, if that is the content form.
    pub fn parallel_members(&self) -> Option<&[DescriptiveValue]> {
        match &self.content {
            Some(ValueContent::ParallelValue(members)) => Some(members),
            _ => None,
        }
    }

    /// Mutable members of a parallelValue, if that is the content form.
    pub fn parallel_members_mut(&mut self) -> Option<&mut Vec<DescriptiveValue>> {
        match &mut self.content {
            Some(ValueContent::ParallelValue(members)) => Some(members),
            _ => None,
        }
    }

    /// The parts of a structuredValue, if that is the content form.
    pub fn structured_parts(&self) -> Option<&[DescriptiveValue]> {
        match &self.content {
            Some(ValueContent::StructuredValue(parts)) => Some(parts),
            _ => None,
        }
    }

    /// True when the value carries no content worth emitting. Type,
    /// status and label alone do not make a value.
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.code.is_none()
            && self.uri.is_none()
            && self.standard.is_none()
            && self.encoding.is_none()
            && self.source.is_none()
            && self.identifier.is_empty()
            && self.note.is_empty()
            && self.value_language.is_none()
            && self.applies_to.is_empty()
            && self.script.is_none()
    }
}

/// An agent contributing to the resource
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<DescriptiveValue>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub role: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<DescriptiveValue>,
}

impl Contributor {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.type_.is_none()
            && self.role.is_empty()
            && self.identifier.is_empty()
            && self.note.is_empty()
    }
}

/// An event in the life of the resource
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_language: Option<ValueLanguage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub location: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contributor: Vec<Contributor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub date: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<DescriptiveValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parallel_event: Vec<Event>,
}

impl Event {
    pub fn is_empty(&self) -> bool {
        self.type_.is_none()
            && self.display_label.is_none()
            && self.value_language.is_none()
            && self.location.is_empty()
            && self.contributor.is_empty()
            && self.date.is_empty()
            && self.note.is_empty()
            && self.parallel_event.is_empty()
    }
}
