//! Style Store - styles.xml import/export
//!
//! This crate reads and writes the WordprocessingML styles part, loads
//! registries from document payloads with a fallback to the built-in
//! catalog, and persists import/export settings.

mod error;
mod loader;
mod reader;
mod settings;
mod styles;
mod styles_writer;

pub use error::*;
pub use loader::*;
pub use reader::XmlParser;
pub use settings::*;
pub use styles::StylesParser;
pub use styles_writer::StylesWriter;

/// XML namespaces used in the styles part
pub mod namespaces {
    /// Main WordprocessingML namespace
    pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
}
