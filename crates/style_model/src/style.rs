//! Style entity - identifier, kind, and the per-kind property sets

use crate::error::StyleError;
use crate::properties::{
    ParagraphProperties, RunProperties, TableCellProperties, TableProperties, TableRowProperties,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// =============================================================================
// Style Identifier
// =============================================================================

/// Unique identifier for a style
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StyleId(pub String);

impl StyleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for StyleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StyleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StyleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for StyleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&StyleId> for StyleId {
    fn from(id: &StyleId) -> Self {
        id.clone()
    }
}

impl std::fmt::Display for StyleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Style Types
// =============================================================================

/// The type of style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleType {
    /// Paragraph style - applied to entire paragraphs
    Paragraph,
    /// Character style - applied to text runs
    Character,
    /// Table style - applied to tables
    Table,
    /// Numbering style - for list formatting
    Numbering,
}

impl StyleType {
    /// Value used for `w:style/@w:type`
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            StyleType::Paragraph => "paragraph",
            StyleType::Character => "character",
            StyleType::Table => "table",
            StyleType::Numbering => "numbering",
        }
    }
}

impl FromStr for StyleType {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paragraph" => Ok(StyleType::Paragraph),
            "character" => Ok(StyleType::Character),
            "table" => Ok(StyleType::Table),
            "numbering" => Ok(StyleType::Numbering),
            other => Err(StyleError::InvalidValue {
                field: "style type",
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for StyleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_ooxml())
    }
}

// =============================================================================
// Style Definition
// =============================================================================

/// A complete style definition
///
/// `based_on` and `next_style` are lookup keys into the owning registry,
/// never references; either may name a style that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    /// Unique identifier for this style
    pub id: StyleId,
    /// Style type
    pub style_type: StyleType,
    /// Display name
    pub name: Option<String>,
    /// Base style this style inherits from
    pub based_on: Option<StyleId>,
    /// Style to use for the following paragraph
    pub next_style: Option<StyleId>,
    /// Default style for its type
    pub is_default: bool,
    /// Created by a caller rather than seeded from the built-in catalog
    pub custom: bool,
    pub paragraph: Option<ParagraphProperties>,
    pub run: Option<RunProperties>,
    pub table: Option<TableProperties>,
    pub table_row: Option<TableRowProperties>,
    pub table_cell: Option<TableCellProperties>,
}

impl Style {
    /// Create an empty style of the given type
    pub fn new(id: impl Into<StyleId>, style_type: StyleType) -> Self {
        Self {
            id: id.into(),
            style_type,
            name: None,
            based_on: None,
            next_style: None,
            is_default: false,
            custom: false,
            paragraph: None,
            run: None,
            table: None,
            table_row: None,
            table_cell: None,
        }
    }

    /// Create a new paragraph style
    pub fn paragraph(id: impl Into<StyleId>, name: impl Into<String>) -> Self {
        Self::new(id, StyleType::Paragraph).with_name(name)
    }

    /// Create a new character style
    pub fn character(id: impl Into<StyleId>, name: impl Into<String>) -> Self {
        Self::new(id, StyleType::Character).with_name(name)
    }

    /// Create a new table style
    pub fn table(id: impl Into<StyleId>, name: impl Into<String>) -> Self {
        Self::new(id, StyleType::Table).with_name(name)
    }

    /// Name shown to users, falling back to the identifier
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the base style
    pub fn with_based_on(mut self, base: impl Into<StyleId>) -> Self {
        self.based_on = Some(base.into());
        self
    }

    /// Set next style
    pub fn with_next_style(mut self, next: impl Into<StyleId>) -> Self {
        self.next_style = Some(next.into());
        self
    }

    /// Mark as the default style for its type
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Mark as caller-created
    pub fn as_custom(mut self) -> Self {
        self.custom = true;
        self
    }

    /// Set paragraph properties
    pub fn with_paragraph_props(mut self, props: ParagraphProperties) -> Self {
        self.paragraph = Some(props);
        self
    }

    /// Set run properties
    pub fn with_run_props(mut self, props: RunProperties) -> Self {
        self.run = Some(props);
        self
    }

    /// Set table properties
    pub fn with_table_props(mut self, props: TableProperties) -> Self {
        self.table = Some(props);
        self
    }

    /// Whether this style came from the built-in catalog or an imported document
    pub fn is_built_in(&self) -> bool {
        !self.custom
    }
}
