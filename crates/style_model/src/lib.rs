//! Style Model - OOXML style registry and inheritance resolution
//!
//! This crate holds the styles of one document: paragraph, character, table
//! and numbering styles keyed by identifier, each with optional paragraph,
//! run and table property sets. Styles inherit through `based_on` links,
//! which are resolved on demand by layering a style's own properties over
//! its parent's effective properties.

mod error;
mod projection;
mod properties;
mod quick;
mod registry;
mod resolve;
mod style;
pub mod builtin;

pub use error::*;
pub use projection::*;
pub use properties::*;
pub use quick::*;
pub use registry::*;
pub use style::*;
