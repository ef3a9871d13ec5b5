//! Built-in style catalog
//!
//! The catalog is fixed data. Every call builds fresh `Style` values so each
//! registry owns its own copy.

use crate::properties::{
    BorderLine, FontFamily, Indentation, Justification, ParagraphBorders, ParagraphProperties,
    RunProperties, Shading, Spacing, TableBorders, TableCellMargins, TableProperties, TableWidth,
};
use crate::style::{Style, StyleId};

/// Identifier of the default paragraph style
pub const NORMAL: &str = "Normal";

/// Identifier of the default table style
pub const NORMAL_TABLE: &str = "a1";

/// Identifier of the bordered grid table style
pub const TABLE_GRID: &str = "ab";

/// Identifier of the table-of-contents heading style
pub const TOC_HEADING: &str = "12";

/// Heading identifiers, level 1 through 9
pub const HEADING_IDS: [&str; 9] = [
    "Heading1", "Heading2", "Heading3", "Heading4", "Heading5", "Heading6", "Heading7",
    "Heading8", "Heading9",
];

/// Indentation step per TOC level, in twips
pub const TOC_INDENT_STEP: i32 = 240;

const TOC_ID_OFFSET: u8 = 12;

/// Short descriptions of the built-in styles, keyed by identifier
pub const BUILTIN_DESCRIPTIONS: &[(&str, &str)] = &[
    ("Normal", "Default body text style"),
    ("Heading1", "Top-level heading"),
    ("Heading2", "Second-level heading"),
    ("Heading3", "Third-level heading"),
    ("Heading4", "Fourth-level heading"),
    ("Heading5", "Fifth-level heading"),
    ("Heading6", "Sixth-level heading"),
    ("Heading7", "Seventh-level heading"),
    ("Heading8", "Eighth-level heading"),
    ("Heading9", "Ninth-level heading"),
    ("Title", "Centered document title"),
    ("Subtitle", "Centered document subtitle"),
    ("Quote", "Indented italic quotation"),
    ("CodeBlock", "Monospaced, shaded code block"),
    ("CodeChar", "Monospaced inline code"),
    ("ListParagraph", "Indented paragraph for list items"),
    ("Emphasis", "Italic emphasis"),
    ("Strong", "Bold emphasis"),
    ("12", "Table of contents heading"),
    ("a1", "Default table without borders"),
    ("ab", "Table with single-line grid borders"),
];

/// Description of a built-in style, if it has one
pub fn description(id: &str) -> Option<&'static str> {
    BUILTIN_DESCRIPTIONS
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, text)| *text)
}

/// Identifier for TOC level `level` (1-9)
pub fn toc_style_id(level: u8) -> StyleId {
    StyleId::new((TOC_ID_OFFSET + level).to_string())
}

/// The complete catalog
pub fn builtin_styles() -> Vec<Style> {
    let mut styles = vec![normal_style()];
    styles.extend(heading_styles());
    styles.push(title_style());
    styles.push(subtitle_style());
    styles.extend(toc_styles());
    styles.push(list_paragraph_style());
    styles.push(emphasis_style());
    styles.push(strong_style());
    styles.push(quote_style());
    styles.push(code_block_style());
    styles.push(code_char_style());
    styles.extend(table_styles());
    styles
}

fn body_fonts() -> FontFamily {
    FontFamily::new("Calibri", "宋体", "Calibri", "Times New Roman")
}

/// Normal - the default paragraph style (10.5pt)
pub fn normal_style() -> Style {
    Style::paragraph(NORMAL, "Normal")
        .as_default()
        .with_run_props(RunProperties {
            font_size: Some(21),
            font_family: Some(body_fonts()),
            ..Default::default()
        })
}

struct HeadingLook {
    bold: bool,
    italic: bool,
    size: u32,
    color: &'static str,
    before: u32,
}

const HEADINGS: [HeadingLook; 9] = [
    HeadingLook { bold: true, italic: false, size: 32, color: "2F5496", before: 240 },
    HeadingLook { bold: true, italic: false, size: 26, color: "2F5496", before: 120 },
    HeadingLook { bold: true, italic: false, size: 24, color: "1F3763", before: 120 },
    HeadingLook { bold: true, italic: true, size: 22, color: "2F5496", before: 120 },
    HeadingLook { bold: false, italic: false, size: 22, color: "2F5496", before: 120 },
    HeadingLook { bold: false, italic: true, size: 22, color: "1F3763", before: 120 },
    HeadingLook { bold: false, italic: false, size: 20, color: "1F3763", before: 120 },
    HeadingLook { bold: false, italic: true, size: 20, color: "272727", before: 120 },
    HeadingLook { bold: false, italic: false, size: 18, color: "272727", before: 120 },
];

/// Heading 1 through Heading 9
pub fn heading_styles() -> Vec<Style> {
    HEADINGS
        .iter()
        .zip(HEADING_IDS)
        .enumerate()
        .map(|(index, (spec, id))| {
            Style::paragraph(id, format!("heading {}", index + 1))
                .with_based_on(NORMAL)
                .with_next_style(NORMAL)
                .with_paragraph_props(ParagraphProperties {
                    keep_with_next: true,
                    keep_lines_together: true,
                    spacing: Some(Spacing {
                        before: Some(spec.before),
                        after: Some(0),
                        ..Default::default()
                    }),
                    outline_level: Some(index as u8),
                    ..Default::default()
                })
                .with_run_props(RunProperties {
                    bold: spec.bold,
                    italic: spec.italic,
                    font_size: Some(spec.size),
                    color: Some(spec.color.to_string()),
                    ..Default::default()
                })
        })
        .collect()
}

fn title_style() -> Style {
    Style::paragraph("Title", "Title")
        .with_based_on(NORMAL)
        .with_next_style(NORMAL)
        .with_paragraph_props(ParagraphProperties {
            justification: Some(Justification::Center),
            spacing: Some(Spacing {
                before: Some(240),
                after: Some(60),
                ..Default::default()
            }),
            ..Default::default()
        })
        .with_run_props(RunProperties {
            bold: true,
            font_size: Some(56),
            font_family: Some(FontFamily::new(
                "Calibri Light",
                "微软雅黑 Light",
                "Calibri Light",
                "Calibri Light",
            )),
            color: Some("2F5496".to_string()),
            ..Default::default()
        })
}

fn subtitle_style() -> Style {
    Style::paragraph("Subtitle", "Subtitle")
        .with_based_on(NORMAL)
        .with_next_style(NORMAL)
        .with_paragraph_props(ParagraphProperties {
            justification: Some(Justification::Center),
            spacing: Some(Spacing {
                before: Some(0),
                after: Some(160),
                ..Default::default()
            }),
            ..Default::default()
        })
        .with_run_props(RunProperties {
            italic: true,
            font_size: Some(30),
            font_family: Some(FontFamily::new("Calibri", "微软雅黑", "Calibri", "Calibri")),
            color: Some("7030A0".to_string()),
            ..Default::default()
        })
}

/// TOC heading plus TOC levels 1-9
fn toc_styles() -> Vec<Style> {
    let mut styles: Vec<Style> = (1..=9u8)
        .map(|level| {
            Style::paragraph(toc_style_id(level), format!("toc {}", level))
                .with_based_on(NORMAL)
                .with_next_style(NORMAL)
                .with_paragraph_props(ParagraphProperties {
                    spacing: Some(Spacing {
                        after: Some(100),
                        ..Default::default()
                    }),
                    indentation: Some(Indentation {
                        left: Some(toc_indent(level)),
                        ..Default::default()
                    }),
                    ..Default::default()
                })
                .with_run_props(RunProperties {
                    font_size: Some(22),
                    font_family: Some(body_fonts()),
                    ..Default::default()
                })
        })
        .collect();

    styles.push(
        Style::paragraph(TOC_HEADING, "TOC Heading")
            .with_based_on(NORMAL)
            .with_next_style(NORMAL)
            .with_paragraph_props(ParagraphProperties {
                spacing: Some(Spacing {
                    before: Some(240),
                    after: Some(120),
                    ..Default::default()
                }),
                justification: Some(Justification::Center),
                ..Default::default()
            })
            .with_run_props(RunProperties {
                bold: true,
                font_size: Some(26),
                font_family: Some(body_fonts()),
                ..Default::default()
            }),
    );
    styles
}

/// Left indentation of a TOC level. Levels 1-3 step from zero; from level 4
/// on the indent is `level * 240`.
fn toc_indent(level: u8) -> i32 {
    if level <= 3 {
        (i32::from(level) - 1) * TOC_INDENT_STEP
    } else {
        i32::from(level) * TOC_INDENT_STEP
    }
}

fn list_paragraph_style() -> Style {
    Style::paragraph("ListParagraph", "List Paragraph")
        .with_based_on(NORMAL)
        .with_paragraph_props(ParagraphProperties {
            indentation: Some(Indentation {
                left: Some(720),
                ..Default::default()
            }),
            spacing: Some(Spacing {
                after: Some(120),
                line: Some(276),
                line_rule: Some(crate::properties::LineRule::Auto),
                ..Default::default()
            }),
            ..Default::default()
        })
}

fn emphasis_style() -> Style {
    Style::character("Emphasis", "Emphasis").with_run_props(RunProperties {
        italic: true,
        ..Default::default()
    })
}

fn strong_style() -> Style {
    Style::character("Strong", "Strong").with_run_props(RunProperties {
        bold: true,
        ..Default::default()
    })
}

fn quote_style() -> Style {
    Style::paragraph("Quote", "Quote")
        .with_based_on(NORMAL)
        .with_paragraph_props(ParagraphProperties {
            indentation: Some(Indentation {
                left: Some(720),
                right: Some(720),
                ..Default::default()
            }),
            spacing: Some(Spacing {
                before: Some(120),
                after: Some(120),
                ..Default::default()
            }),
            ..Default::default()
        })
        .with_run_props(RunProperties {
            italic: true,
            color: Some("666666".to_string()),
            ..Default::default()
        })
}

fn code_block_style() -> Style {
    Style::paragraph("CodeBlock", "Code Block")
        .with_based_on(NORMAL)
        .with_paragraph_props(ParagraphProperties {
            indentation: Some(Indentation {
                left: Some(360),
                ..Default::default()
            }),
            spacing: Some(Spacing {
                before: Some(60),
                after: Some(60),
                ..Default::default()
            }),
            borders: Some(ParagraphBorders::uniform(BorderLine::new(
                "thick", "E9E7E7", 8, 8,
            ))),
            shading: Some(Shading {
                fill: "F6F5F5".to_string(),
                pattern: Some("clear".to_string()),
            }),
            ..Default::default()
        })
        .with_run_props(RunProperties {
            font_family: Some(FontFamily::uniform("Consolas")),
            font_size: Some(18),
            ..Default::default()
        })
}

fn code_char_style() -> Style {
    Style::character("CodeChar", "Code Char").with_run_props(RunProperties {
        font_family: Some(FontFamily::uniform("Consolas")),
        font_size: Some(18),
        ..Default::default()
    })
}

fn table_styles() -> Vec<Style> {
    let normal_table = Style::table(NORMAL_TABLE, "Normal Table")
        .as_default()
        .with_table_props(TableProperties {
            indentation: Some(TableWidth::dxa(0)),
            cell_margins: Some(TableCellMargins {
                top: Some(TableWidth::dxa(0)),
                left: Some(TableWidth::dxa(108)),
                bottom: Some(TableWidth::dxa(0)),
                right: Some(TableWidth::dxa(108)),
            }),
            borders: None,
        });

    let table_grid = Style::table(TABLE_GRID, "Table Grid")
        .with_based_on(NORMAL_TABLE)
        .with_table_props(TableProperties {
            borders: Some(TableBorders::grid(BorderLine::new("single", "auto", 4, 0))),
            ..Default::default()
        });

    vec![normal_table, table_grid]
}
