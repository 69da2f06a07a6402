//! Cocina descriptive data models

pub mod description;
pub mod value;

// Re-export commonly used types
pub use description::{
    AdminMetadata, Description, DescriptiveAccess, DescriptiveGeographic, RelatedResource,
};
pub use value::{Contributor, DescriptiveValue, Event, Source, ValueContent, ValueLanguage, ValueScript};
