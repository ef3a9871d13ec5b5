//! Property model - paragraph, run, and table formatting sets
//!
//! Every field is independently optional: `None` (or an unset flag) means
//! "this style says nothing about it", which is distinct from a value that
//! switches the feature off. Units follow the styles part directly:
//! spacing and indentation in twips, font sizes in half-points, border
//! weights in eighths of a point.
//!
//! Merging is field-by-field: the overlay (derived style) wins wherever it
//! defines a field, the base fills every gap, and a field neither defines
//! stays unset. Compound fields such as [`Spacing`] or [`FontFamily`] are
//! treated as single fields.

use crate::error::StyleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Merge Engine
// =============================================================================

/// A property set that can be layered on top of another of the same kind
pub trait Merge: Clone {
    /// Merge `overlay` on top of `self`; overlay fields win when present
    fn merge(&self, overlay: &Self) -> Self;
}

/// Merge two optional property sets.
///
/// When only one side is present it is passed through as-is.
pub fn merge_layers<T: Merge>(base: Option<&T>, overlay: Option<&T>) -> Option<T> {
    match (base, overlay) {
        (None, None) => None,
        (Some(base), None) => Some(base.clone()),
        (None, Some(overlay)) => Some(overlay.clone()),
        (Some(base), Some(overlay)) => Some(base.merge(overlay)),
    }
}

// =============================================================================
// Shared Enumerations
// =============================================================================

/// Paragraph justification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Justification {
    Left,
    Center,
    Right,
    Justify,
}

impl Justification {
    /// Value used for `w:jc/@w:val`
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Justification::Left => "left",
            Justification::Center => "center",
            Justification::Right => "right",
            Justification::Justify => "both",
        }
    }
}

impl FromStr for Justification {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" | "start" => Ok(Justification::Left),
            "center" => Ok(Justification::Center),
            "right" | "end" => Ok(Justification::Right),
            "both" | "justify" | "distribute" => Ok(Justification::Justify),
            other => Err(StyleError::InvalidValue {
                field: "justification",
                value: other.to_string(),
            }),
        }
    }
}

/// How `Spacing::line` is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineRule {
    /// Line is in 240ths of a line (240 = single spacing)
    Auto,
    /// Line is an exact height in twips
    Exact,
    /// Line is a minimum height in twips
    AtLeast,
}

impl LineRule {
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            LineRule::Auto => "auto",
            LineRule::Exact => "exact",
            LineRule::AtLeast => "atLeast",
        }
    }
}

impl FromStr for LineRule {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(LineRule::Auto),
            "exact" => Ok(LineRule::Exact),
            "atLeast" => Ok(LineRule::AtLeast),
            other => Err(StyleError::InvalidValue {
                field: "lineRule",
                value: other.to_string(),
            }),
        }
    }
}

/// A single border edge, shared by paragraph and table borders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderLine {
    /// Border style name (`single`, `thick`, `double`, ...)
    pub style: String,
    /// Hex RGB color or `auto`
    pub color: String,
    /// Weight in eighths of a point
    pub size: u32,
    /// Spacing between border and content in points
    pub space: u32,
}

impl BorderLine {
    pub fn new(style: impl Into<String>, color: impl Into<String>, size: u32, space: u32) -> Self {
        Self {
            style: style.into(),
            color: color.into(),
            size,
            space,
        }
    }
}

// =============================================================================
// Paragraph Properties
// =============================================================================

/// Paragraph borders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphBorders {
    pub top: Option<BorderLine>,
    pub left: Option<BorderLine>,
    pub bottom: Option<BorderLine>,
    pub right: Option<BorderLine>,
}

impl ParagraphBorders {
    /// The same line on all four sides
    pub fn uniform(line: BorderLine) -> Self {
        Self {
            top: Some(line.clone()),
            left: Some(line.clone()),
            bottom: Some(line.clone()),
            right: Some(line),
        }
    }
}

/// Background shading
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shading {
    /// Fill color (hex RGB)
    pub fill: String,
    /// Shading pattern (`clear`, `solid`, ...)
    pub pattern: Option<String>,
}

/// Vertical spacing, in twips
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    pub before: Option<u32>,
    pub after: Option<u32>,
    pub line: Option<u32>,
    pub line_rule: Option<LineRule>,
}

/// Horizontal indentation, in twips
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indentation {
    pub first_line: Option<i32>,
    pub left: Option<i32>,
    pub right: Option<i32>,
}

/// Paragraph formatting properties
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphProperties {
    /// Keep with next paragraph
    pub keep_with_next: bool,
    /// Keep lines together (no page break within)
    pub keep_lines_together: bool,
    /// Page break before
    pub page_break_before: bool,
    pub borders: Option<ParagraphBorders>,
    pub shading: Option<Shading>,
    /// `Some(false)` explicitly disables grid snapping, `None` leaves it unset
    pub snap_to_grid: Option<bool>,
    pub spacing: Option<Spacing>,
    pub indentation: Option<Indentation>,
    pub justification: Option<Justification>,
    /// Outline level (0 = heading 1 ... 8 = heading 9)
    pub outline_level: Option<u8>,
}

impl ParagraphProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing is specified
    pub fn is_empty(&self) -> bool {
        !self.keep_with_next
            && !self.keep_lines_together
            && !self.page_break_before
            && self.borders.is_none()
            && self.shading.is_none()
            && self.snap_to_grid.is_none()
            && self.spacing.is_none()
            && self.indentation.is_none()
            && self.justification.is_none()
            && self.outline_level.is_none()
    }
}

impl Merge for ParagraphProperties {
    fn merge(&self, overlay: &Self) -> Self {
        ParagraphProperties {
            keep_with_next: overlay.keep_with_next || self.keep_with_next,
            keep_lines_together: overlay.keep_lines_together || self.keep_lines_together,
            page_break_before: overlay.page_break_before || self.page_break_before,
            borders: overlay.borders.clone().or_else(|| self.borders.clone()),
            shading: overlay.shading.clone().or_else(|| self.shading.clone()),
            snap_to_grid: overlay.snap_to_grid.or(self.snap_to_grid),
            spacing: overlay.spacing.clone().or_else(|| self.spacing.clone()),
            indentation: overlay.indentation.clone().or_else(|| self.indentation.clone()),
            justification: overlay.justification.or(self.justification),
            outline_level: overlay.outline_level.or(self.outline_level),
        }
    }
}

// =============================================================================
// Run Properties
// =============================================================================

/// Font slots for the different script classes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFamily {
    pub ascii: Option<String>,
    pub east_asia: Option<String>,
    pub h_ansi: Option<String>,
    pub cs: Option<String>,
}

impl FontFamily {
    /// Use one font for every slot
    pub fn uniform(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            ascii: Some(name.clone()),
            east_asia: Some(name.clone()),
            h_ansi: Some(name.clone()),
            cs: Some(name),
        }
    }

    pub fn new(ascii: &str, east_asia: &str, h_ansi: &str, cs: &str) -> Self {
        Self {
            ascii: Some(ascii.to_string()),
            east_asia: Some(east_asia.to_string()),
            h_ansi: Some(h_ansi.to_string()),
            cs: Some(cs.to_string()),
        }
    }
}

/// Underline style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnderlineStyle {
    #[default]
    Single,
    Words,
    Double,
    Thick,
    Dotted,
    Dash,
    DotDash,
    DotDotDash,
    Wave,
    None,
}

impl UnderlineStyle {
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            UnderlineStyle::Single => "single",
            UnderlineStyle::Words => "words",
            UnderlineStyle::Double => "double",
            UnderlineStyle::Thick => "thick",
            UnderlineStyle::Dotted => "dotted",
            UnderlineStyle::Dash => "dash",
            UnderlineStyle::DotDash => "dotDash",
            UnderlineStyle::DotDotDash => "dotDotDash",
            UnderlineStyle::Wave => "wave",
            UnderlineStyle::None => "none",
        }
    }
}

impl FromStr for UnderlineStyle {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(UnderlineStyle::Single),
            "words" => Ok(UnderlineStyle::Words),
            "double" => Ok(UnderlineStyle::Double),
            "thick" => Ok(UnderlineStyle::Thick),
            "dotted" => Ok(UnderlineStyle::Dotted),
            "dash" => Ok(UnderlineStyle::Dash),
            "dotDash" => Ok(UnderlineStyle::DotDash),
            "dotDotDash" => Ok(UnderlineStyle::DotDotDash),
            "wave" => Ok(UnderlineStyle::Wave),
            "none" => Ok(UnderlineStyle::None),
            other => Err(StyleError::InvalidValue {
                field: "underline",
                value: other.to_string(),
            }),
        }
    }
}

/// Named highlight colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighlightColor {
    Black,
    Blue,
    Cyan,
    Green,
    Magenta,
    Red,
    Yellow,
    White,
    DarkBlue,
    DarkCyan,
    DarkGreen,
    DarkMagenta,
    DarkRed,
    DarkYellow,
    DarkGray,
    LightGray,
    None,
}

impl HighlightColor {
    pub const ALL: [HighlightColor; 17] = [
        HighlightColor::Black,
        HighlightColor::Blue,
        HighlightColor::Cyan,
        HighlightColor::Green,
        HighlightColor::Magenta,
        HighlightColor::Red,
        HighlightColor::Yellow,
        HighlightColor::White,
        HighlightColor::DarkBlue,
        HighlightColor::DarkCyan,
        HighlightColor::DarkGreen,
        HighlightColor::DarkMagenta,
        HighlightColor::DarkRed,
        HighlightColor::DarkYellow,
        HighlightColor::DarkGray,
        HighlightColor::LightGray,
        HighlightColor::None,
    ];

    pub fn as_ooxml(&self) -> &'static str {
        match self {
            HighlightColor::Black => "black",
            HighlightColor::Blue => "blue",
            HighlightColor::Cyan => "cyan",
            HighlightColor::Green => "green",
            HighlightColor::Magenta => "magenta",
            HighlightColor::Red => "red",
            HighlightColor::Yellow => "yellow",
            HighlightColor::White => "white",
            HighlightColor::DarkBlue => "darkBlue",
            HighlightColor::DarkCyan => "darkCyan",
            HighlightColor::DarkGreen => "darkGreen",
            HighlightColor::DarkMagenta => "darkMagenta",
            HighlightColor::DarkRed => "darkRed",
            HighlightColor::DarkYellow => "darkYellow",
            HighlightColor::DarkGray => "darkGray",
            HighlightColor::LightGray => "lightGray",
            HighlightColor::None => "none",
        }
    }
}

impl FromStr for HighlightColor {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HighlightColor::ALL
            .iter()
            .copied()
            .find(|c| c.as_ooxml() == s)
            .ok_or_else(|| StyleError::InvalidValue {
                field: "highlight",
                value: s.to_string(),
            })
    }
}

/// Run (character) formatting properties
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunProperties {
    pub font_family: Option<FontFamily>,
    pub bold: bool,
    pub italic: bool,
    pub underline: Option<UnderlineStyle>,
    pub strike: bool,
    /// Hex RGB without a leading `#`
    pub color: Option<String>,
    /// Font size in half-points (10.5pt = 21)
    pub font_size: Option<u32>,
    pub highlight: Option<HighlightColor>,
}

impl RunProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing is specified
    pub fn is_empty(&self) -> bool {
        self.font_family.is_none()
            && !self.bold
            && !self.italic
            && self.underline.is_none()
            && !self.strike
            && self.color.is_none()
            && self.font_size.is_none()
            && self.highlight.is_none()
    }
}

impl Merge for RunProperties {
    fn merge(&self, overlay: &Self) -> Self {
        RunProperties {
            font_family: overlay.font_family.clone().or_else(|| self.font_family.clone()),
            bold: overlay.bold || self.bold,
            italic: overlay.italic || self.italic,
            underline: overlay.underline.or(self.underline),
            strike: overlay.strike || self.strike,
            color: overlay.color.clone().or_else(|| self.color.clone()),
            font_size: overlay.font_size.or(self.font_size),
            highlight: overlay.highlight.or(self.highlight),
        }
    }
}

// =============================================================================
// Table Properties
// =============================================================================

/// Unit of a table measurement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidthType {
    /// Twips
    #[default]
    Dxa,
    /// Fiftieths of a percent
    Pct,
    Auto,
    Nil,
}

impl WidthType {
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            WidthType::Dxa => "dxa",
            WidthType::Pct => "pct",
            WidthType::Auto => "auto",
            WidthType::Nil => "nil",
        }
    }
}

impl FromStr for WidthType {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dxa" => Ok(WidthType::Dxa),
            "pct" => Ok(WidthType::Pct),
            "auto" => Ok(WidthType::Auto),
            "nil" => Ok(WidthType::Nil),
            other => Err(StyleError::InvalidValue {
                field: "width type",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for WidthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ooxml())
    }
}

/// A width with its unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableWidth {
    pub width: i32,
    pub width_type: WidthType,
}

impl TableWidth {
    pub fn dxa(width: i32) -> Self {
        Self {
            width,
            width_type: WidthType::Dxa,
        }
    }
}

/// Default cell margins for a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCellMargins {
    pub top: Option<TableWidth>,
    pub left: Option<TableWidth>,
    pub bottom: Option<TableWidth>,
    pub right: Option<TableWidth>,
}

/// Table borders, including the inner grid lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBorders {
    pub top: Option<BorderLine>,
    pub left: Option<BorderLine>,
    pub bottom: Option<BorderLine>,
    pub right: Option<BorderLine>,
    pub inside_h: Option<BorderLine>,
    pub inside_v: Option<BorderLine>,
}

impl TableBorders {
    /// The same line on all six positions
    pub fn grid(line: BorderLine) -> Self {
        Self {
            top: Some(line.clone()),
            left: Some(line.clone()),
            bottom: Some(line.clone()),
            right: Some(line.clone()),
            inside_h: Some(line.clone()),
            inside_v: Some(line),
        }
    }
}

/// Table-level formatting properties
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableProperties {
    pub indentation: Option<TableWidth>,
    pub cell_margins: Option<TableCellMargins>,
    pub borders: Option<TableBorders>,
}

impl TableProperties {
    pub fn is_empty(&self) -> bool {
        self.indentation.is_none() && self.cell_margins.is_none() && self.borders.is_none()
    }
}

impl Merge for TableProperties {
    fn merge(&self, overlay: &Self) -> Self {
        TableProperties {
            indentation: overlay.indentation.or(self.indentation),
            cell_margins: overlay.cell_margins.clone().or_else(|| self.cell_margins.clone()),
            borders: overlay.borders.clone().or_else(|| self.borders.clone()),
        }
    }
}

/// Table row properties (no fields yet)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRowProperties {}

/// Table cell properties (no fields yet)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCellProperties {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_properties_merge() {
        let base = RunProperties {
            font_family: Some(FontFamily::uniform("Arial")),
            font_size: Some(24),
            color: Some("000000".to_string()),
            ..Default::default()
        };
        let derived = RunProperties {
            bold: true,
            color: Some("FF0000".to_string()),
            ..Default::default()
        };

        let merged = base.merge(&derived);

        // base properties preserved
        assert_eq!(merged.font_family, Some(FontFamily::uniform("Arial")));
        assert_eq!(merged.font_size, Some(24));
        // derived properties override
        assert!(merged.bold);
        assert_eq!(merged.color, Some("FF0000".to_string()));
        // neither side sets these
        assert!(!merged.italic);
        assert_eq!(merged.highlight, None);
    }

    #[test]
    fn test_paragraph_properties_merge() {
        let base = ParagraphProperties {
            justification: Some(Justification::Left),
            spacing: Some(Spacing {
                after: Some(160),
                ..Default::default()
            }),
            keep_with_next: true,
            ..Default::default()
        };
        let derived = ParagraphProperties {
            justification: Some(Justification::Center),
            indentation: Some(Indentation {
                left: Some(720),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = base.merge(&derived);

        assert_eq!(merged.justification, Some(Justification::Center));
        assert_eq!(merged.spacing.and_then(|s| s.after), Some(160));
        assert_eq!(merged.indentation.and_then(|i| i.left), Some(720));
        assert!(merged.keep_with_next);
    }

    #[test]
    fn test_snap_to_grid_disabled_is_not_unset() {
        let base = ParagraphProperties {
            snap_to_grid: Some(true),
            ..Default::default()
        };
        let disabled = ParagraphProperties {
            snap_to_grid: Some(false),
            ..Default::default()
        };
        let unset = ParagraphProperties::default();

        assert_eq!(base.merge(&disabled).snap_to_grid, Some(false));
        assert_eq!(base.merge(&unset).snap_to_grid, Some(true));
        assert_eq!(unset.merge(&unset).snap_to_grid, None);
    }

    #[test]
    fn test_compound_fields_replace_whole() {
        let base = ParagraphProperties {
            spacing: Some(Spacing {
                before: Some(240),
                after: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let derived = ParagraphProperties {
            spacing: Some(Spacing {
                after: Some(120),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = base.merge(&derived);
        assert_eq!(
            merged.spacing,
            Some(Spacing {
                after: Some(120),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_table_properties_merge() {
        let base = TableProperties {
            indentation: Some(TableWidth::dxa(0)),
            cell_margins: Some(TableCellMargins {
                left: Some(TableWidth::dxa(108)),
                ..Default::default()
            }),
            borders: None,
        };
        let derived = TableProperties {
            borders: Some(TableBorders::grid(BorderLine::new("single", "auto", 4, 0))),
            ..Default::default()
        };

        let merged = base.merge(&derived);
        assert_eq!(merged.indentation, Some(TableWidth::dxa(0)));
        assert!(merged.cell_margins.is_some());
        assert!(merged.borders.is_some());
    }

    #[test]
    fn test_merge_layers_pass_through() {
        let props = RunProperties {
            italic: true,
            ..Default::default()
        };

        assert_eq!(merge_layers::<RunProperties>(None, None), None);
        assert_eq!(merge_layers(Some(&props), None), Some(props.clone()));
        assert_eq!(merge_layers(None, Some(&props)), Some(props.clone()));
    }

    #[test]
    fn test_enum_round_trip_strings() {
        assert_eq!("both".parse::<Justification>(), Ok(Justification::Justify));
        assert_eq!(Justification::Justify.as_ooxml(), "both");
        assert_eq!("atLeast".parse::<LineRule>(), Ok(LineRule::AtLeast));
        assert_eq!("darkBlue".parse::<HighlightColor>(), Ok(HighlightColor::DarkBlue));
        assert_eq!("dotDash".parse::<UnderlineStyle>(), Ok(UnderlineStyle::DotDash));
        assert_eq!("pct".parse::<WidthType>(), Ok(WidthType::Pct));
        assert!("sideways".parse::<Justification>().is_err());
    }

    #[test]
    fn test_is_empty() {
        assert!(ParagraphProperties::new().is_empty());
        assert!(RunProperties::new().is_empty());
        assert!(TableProperties::default().is_empty());

        let run = RunProperties {
            strike: true,
            ..Default::default()
        };
        assert!(!run.is_empty());
    }
}
