//! Quick-style layer - style summaries and scalar style configuration
//!
//! Callers that think in points and font names describe a style with the
//! config structs here; conversion produces the twip/half-point property sets
//! the registry stores.

use crate::builtin;
use crate::error::{Result, StyleError};
use crate::properties::{
    FontFamily, HighlightColor, Indentation, Justification, LineRule, ParagraphProperties,
    RunProperties, Spacing, UnderlineStyle,
};
use crate::registry::StyleRegistry;
use crate::style::{Style, StyleId, StyleType};
use serde::{Deserialize, Serialize};

/// Twips per point
const TWIPS_PER_POINT: f64 = 20.0;

/// `w:spacing/@w:line` value for single spacing under the `auto` rule
const AUTO_LINE_UNIT: f64 = 240.0;

// =============================================================================
// Style Summaries
// =============================================================================

/// Summary of a registered style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub style_type: StyleType,
    /// Static description for built-in identifiers, empty otherwise
    pub description: String,
    pub is_built_in: bool,
    pub based_on: Option<String>,
}

impl From<&Style> for StyleInfo {
    fn from(style: &Style) -> Self {
        Self {
            id: style.id.to_string(),
            name: style.display_name().to_string(),
            style_type: style.style_type,
            description: builtin::description(style.id.as_str())
                .unwrap_or_default()
                .to_string(),
            is_built_in: style.is_built_in(),
            based_on: style.based_on.as_ref().map(|s| s.to_string()),
        }
    }
}

// =============================================================================
// Quick Configuration
// =============================================================================

/// Paragraph settings in user units. Zero numeric values mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuickParagraphConfig {
    /// "left", "center", "right" or "both"/"justify"
    pub alignment: Option<String>,
    /// Points
    pub space_before: Option<f64>,
    /// Points
    pub space_after: Option<f64>,
    /// Multiple of single spacing (1.5 = one and a half lines)
    pub line_spacing: Option<f64>,
    /// Points
    pub left_indent: Option<f64>,
    /// Points
    pub right_indent: Option<f64>,
    /// Points; negative values hang
    pub first_line_indent: Option<f64>,
    pub snap_to_grid: Option<bool>,
}

/// Run settings in user units
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuickRunConfig {
    /// Applied to every font slot
    pub font_name: Option<String>,
    /// Points
    pub font_size: Option<f64>,
    /// Hex RGB, with or without a leading `#`
    pub font_color: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub highlight: Option<String>,
}

/// Everything needed to create a custom style in one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStyleConfig {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub style_type: StyleType,
    #[serde(default)]
    pub based_on: Option<String>,
    #[serde(default)]
    pub paragraph_config: Option<QuickParagraphConfig>,
    #[serde(default)]
    pub run_config: Option<QuickRunConfig>,
}

fn points_to_twips(points: f64) -> i64 {
    (points * TWIPS_PER_POINT).round() as i64
}

/// Non-zero value in twips, or `None` when unset or zero
fn twips(points: Option<f64>) -> Option<i64> {
    points.map(points_to_twips).filter(|t| *t != 0)
}

fn unsigned_twips(points: Option<f64>, field: &'static str) -> Result<Option<u32>> {
    match twips(points) {
        None => Ok(None),
        Some(value) => u32::try_from(value)
            .map(Some)
            .map_err(|_| invalid(field, value)),
    }
}

fn signed_twips(points: Option<f64>, field: &'static str) -> Result<Option<i32>> {
    match twips(points) {
        None => Ok(None),
        Some(value) => i32::try_from(value)
            .map(Some)
            .map_err(|_| invalid(field, value)),
    }
}

fn invalid(field: &'static str, value: impl ToString) -> StyleError {
    StyleError::InvalidValue {
        field,
        value: value.to_string(),
    }
}

impl QuickParagraphConfig {
    /// Convert to paragraph properties; `None` when nothing is set
    pub fn to_properties(&self) -> Result<Option<ParagraphProperties>> {
        let justification = self
            .alignment
            .as_deref()
            .filter(|a| !a.is_empty())
            .map(str::parse::<Justification>)
            .transpose()?;

        let before = unsigned_twips(self.space_before, "spaceBefore")?;
        let after = unsigned_twips(self.space_after, "spaceAfter")?;
        let line = match self.line_spacing.filter(|l| *l > 0.0) {
            Some(multiple) => {
                let value = (multiple * AUTO_LINE_UNIT).round();
                if value > f64::from(u32::MAX) {
                    return Err(invalid("lineSpacing", multiple));
                }
                Some(value as u32)
            }
            None => None,
        };
        let spacing = (before.is_some() || after.is_some() || line.is_some()).then(|| Spacing {
            before,
            after,
            line,
            line_rule: line.map(|_| LineRule::Auto),
        });

        let left = signed_twips(self.left_indent, "leftIndent")?;
        let right = signed_twips(self.right_indent, "rightIndent")?;
        let first_line = signed_twips(self.first_line_indent, "firstLineIndent")?;
        let indentation = (left.is_some() || right.is_some() || first_line.is_some()).then(|| {
            Indentation {
                first_line,
                left,
                right,
            }
        });

        let props = ParagraphProperties {
            justification,
            spacing,
            indentation,
            snap_to_grid: self.snap_to_grid,
            ..Default::default()
        };
        Ok((!props.is_empty()).then_some(props))
    }
}

impl QuickRunConfig {
    /// Convert to run properties; `None` when nothing is set
    pub fn to_properties(&self) -> Result<Option<RunProperties>> {
        let font_size = match self.font_size.filter(|s| *s > 0.0) {
            Some(points) => {
                let half_points = (points * 2.0).round();
                if half_points > f64::from(u32::MAX) {
                    return Err(invalid("fontSize", points));
                }
                Some(half_points as u32)
            }
            None => None,
        };

        let highlight = self
            .highlight
            .as_deref()
            .filter(|h| !h.is_empty())
            .map(str::parse::<HighlightColor>)
            .transpose()?;

        let props = RunProperties {
            font_family: self
                .font_name
                .as_deref()
                .filter(|f| !f.is_empty())
                .map(FontFamily::uniform),
            bold: self.bold,
            italic: self.italic,
            underline: self.underline.then_some(UnderlineStyle::Single),
            strike: self.strike,
            color: self
                .font_color
                .as_deref()
                .map(|c| c.trim_start_matches('#'))
                .filter(|c| !c.is_empty())
                .map(str::to_uppercase),
            font_size,
            highlight,
        };
        Ok((!props.is_empty()).then_some(props))
    }
}

// =============================================================================
// Registry Queries
// =============================================================================

impl StyleRegistry {
    /// Summary of one style
    pub fn style_info(&self, id: &str) -> Result<StyleInfo> {
        self.get(id)
            .map(StyleInfo::from)
            .ok_or_else(|| StyleError::NotFound(StyleId::new(id)))
    }

    /// Summaries of every style, ordered by identifier
    pub fn all_styles_info(&self) -> Vec<StyleInfo> {
        let mut infos: Vec<_> = self.all_styles().map(StyleInfo::from).collect();
        infos.sort_by(|a, b| a.id.cmp(&b.id));
        infos
    }

    /// Summaries of Heading1..Heading9 in level order
    pub fn heading_styles_info(&self) -> Vec<StyleInfo> {
        self.heading_styles()
            .into_iter()
            .map(StyleInfo::from)
            .collect()
    }

    /// Summaries of every style of one kind, ordered by identifier
    pub fn styles_info_by_kind(&self, style_type: StyleType) -> Vec<StyleInfo> {
        let mut infos: Vec<_> = self
            .styles_of_type(style_type)
            .map(StyleInfo::from)
            .collect();
        infos.sort_by(|a, b| a.id.cmp(&b.id));
        infos
    }

    /// Create a custom style from a quick config.
    ///
    /// Unlike [`StyleRegistry::create_custom`] this refuses to replace an
    /// existing style. Nothing is registered if a config value is invalid.
    pub fn create_quick_style(&mut self, config: &QuickStyleConfig) -> Result<Style> {
        if self.contains(&config.id) {
            return Err(StyleError::DuplicateIdentifier(StyleId::new(&config.id)));
        }

        let paragraph = match &config.paragraph_config {
            Some(quick) => quick.to_properties()?,
            None => None,
        };
        let run = match &config.run_config {
            Some(quick) => quick.to_properties()?,
            None => None,
        };

        self.create_custom(
            config.id.as_str(),
            config.name.as_str(),
            config.style_type,
            config.based_on.as_deref(),
        )?;
        if paragraph.is_some() {
            self.set_paragraph_props(&config.id, paragraph)?;
        }
        if run.is_some() {
            self.set_run_props(&config.id, run)?;
        }

        tracing::debug!(style = %config.id, "created quick style");
        self.get(&config.id)
            .cloned()
            .ok_or_else(|| StyleError::NotFound(StyleId::new(&config.id)))
    }
}
