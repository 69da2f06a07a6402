//! MODS to Cocina descriptive mapping
//!
//! Maps MODS v3 XML bibliographic records onto the Cocina descriptive
//! model, a normalized JSON shape. The transform is a pure, synchronous
//! fold over one parsed record; irregular input is reported through a
//! [`notifier::Notifier`] and worked around rather than raised.

pub mod config;
pub mod error;
pub mod mapping;
pub mod models;
pub mod notifier;
pub mod purl;
pub mod xml;

pub use config::AppConfig;
pub use error::{MapError, MapResult};
pub use models::Description;
pub use notifier::Notifier;
