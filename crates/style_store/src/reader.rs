//! XML parsing utilities for the styles part

use quick_xml::events::BytesStart;
use quick_xml::Reader;

/// Helpers shared by the styles parser
pub struct XmlParser;

impl XmlParser {
    /// Create a new XML reader from a string
    pub fn from_string(content: &str) -> Reader<&[u8]> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);
        reader
    }

    /// Get an attribute value by local name, whatever its namespace prefix.
    /// Entity references in the value are expanded.
    pub fn get_w_attribute(event: &BytesStart, name: &str) -> Option<String> {
        event
            .attributes()
            .filter_map(|a| a.ok())
            .find(|a| a.key.local_name().as_ref() == name.as_bytes())
            .and_then(|a| a.unescape_value().ok())
            .map(|v| v.into_owned())
    }

    /// Parse a numeric attribute, ignoring values that do not fit `T`
    pub fn get_number<T: std::str::FromStr>(event: &BytesStart, name: &str) -> Option<T> {
        Self::get_w_attribute(event, name).and_then(|v| v.trim().parse().ok())
    }

    /// Parse a boolean value (0/1, true/false, on/off)
    pub fn parse_bool(value: &str) -> bool {
        matches!(value.to_lowercase().as_str(), "1" | "true" | "on" | "yes")
    }

    /// Whether a toggle element such as `<w:b/>` switches its flag on.
    /// A missing `w:val` means on.
    pub fn flag_enabled(event: &BytesStart) -> bool {
        match Self::get_w_attribute(event, "val") {
            Some(val) => !matches!(val.to_lowercase().as_str(), "0" | "false" | "off"),
            None => true,
        }
    }

    /// Element name with any namespace prefix removed
    pub fn local_name(name: &[u8]) -> &[u8] {
        match name.iter().position(|b| *b == b':') {
            Some(pos) => &name[pos + 1..],
            None => name,
        }
    }
}
