//! Styles.xml writer
//!
//! Generates styles.xml from a style registry. Child elements are written in
//! schema order so the output is accepted by strict consumers.

use crate::namespaces;
use crate::settings::WriterSettings;
use quick_xml::escape::escape;
use style_model::{
    BorderLine, FontFamily, ParagraphBorders, ParagraphProperties, RunProperties, Style,
    StyleRegistry, TableBorders, TableCellMargins, TableProperties, TableWidth,
};

/// Writer for styles.xml
#[derive(Debug, Clone, Default)]
pub struct StylesWriter {
    settings: WriterSettings,
}

impl StylesWriter {
    /// Create a new styles writer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a styles writer with explicit settings
    pub fn with_settings(settings: WriterSettings) -> Self {
        Self { settings }
    }

    /// Generate styles.xml content for every style in the registry
    pub fn write(&self, registry: &StyleRegistry) -> String {
        let mut styles: Vec<&Style> = registry.all_styles().collect();
        if self.settings.sort_by_id {
            styles.sort_by(|a, b| a.id.cmp(&b.id));
        }
        self.write_styles(styles)
    }

    /// Generate styles.xml content for the given styles, in order
    pub fn write_styles<'a>(&self, styles: impl IntoIterator<Item = &'a Style>) -> String {
        let mut xml = String::new();

        // XML declaration
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');

        // Styles element with namespace
        xml.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, namespaces::W));

        if self.settings.include_doc_defaults {
            self.write_doc_defaults(&mut xml);
        }

        let mut count = 0usize;
        for style in styles {
            self.write_style(&mut xml, style);
            count += 1;
        }

        xml.push_str("</w:styles>");
        tracing::debug!(count, "wrote styles part");
        xml
    }

    /// Write document defaults
    fn write_doc_defaults(&self, xml: &mut String) {
        xml.push_str("<w:docDefaults>");

        xml.push_str("<w:rPrDefault>");
        xml.push_str("<w:rPr>");
        write_fonts(xml, &self.settings.default_fonts);
        xml.push_str(&format!(r#"<w:sz w:val="{}"/>"#, self.settings.default_font_size));
        xml.push_str(&format!(r#"<w:szCs w:val="{}"/>"#, self.settings.default_font_size));
        xml.push_str("</w:rPr>");
        xml.push_str("</w:rPrDefault>");

        xml.push_str("<w:pPrDefault><w:pPr/></w:pPrDefault>");

        xml.push_str("</w:docDefaults>");
    }

    /// Write a single style definition
    fn write_style(&self, xml: &mut String, style: &Style) {
        xml.push_str(&format!(
            r#"<w:style w:type="{}" w:styleId="{}""#,
            style.style_type.as_ooxml(),
            escape(style.id.as_str())
        ));

        if style.is_default {
            xml.push_str(r#" w:default="1""#);
        }
        if style.custom {
            xml.push_str(r#" w:customStyle="1""#);
        }

        xml.push('>');

        if let Some(ref name) = style.name {
            xml.push_str(&format!(r#"<w:name w:val="{}"/>"#, escape(name.as_str())));
        }

        if let Some(ref based_on) = style.based_on {
            xml.push_str(&format!(
                r#"<w:basedOn w:val="{}"/>"#,
                escape(based_on.as_str())
            ));
        }

        if let Some(ref next) = style.next_style {
            xml.push_str(&format!(r#"<w:next w:val="{}"/>"#, escape(next.as_str())));
        }

        if let Some(ref props) = style.paragraph {
            self.write_paragraph_properties(xml, props);
        }

        if let Some(ref props) = style.run {
            self.write_run_properties(xml, props);
        }

        if let Some(ref props) = style.table {
            self.write_table_properties(xml, props);
        }

        if style.table_row.is_some() {
            xml.push_str("<w:trPr/>");
        }

        if style.table_cell.is_some() {
            xml.push_str("<w:tcPr/>");
        }

        xml.push_str("</w:style>");
    }

    /// Write paragraph properties
    fn write_paragraph_properties(&self, xml: &mut String, props: &ParagraphProperties) {
        if props.is_empty() {
            xml.push_str("<w:pPr/>");
            return;
        }

        xml.push_str("<w:pPr>");

        if props.keep_with_next {
            xml.push_str("<w:keepNext/>");
        }
        if props.keep_lines_together {
            xml.push_str("<w:keepLines/>");
        }
        if props.page_break_before {
            xml.push_str("<w:pageBreakBefore/>");
        }

        if let Some(ref borders) = props.borders {
            write_paragraph_borders(xml, borders);
        }

        if let Some(ref shading) = props.shading {
            xml.push_str("<w:shd");
            if let Some(ref pattern) = shading.pattern {
                xml.push_str(&format!(r#" w:val="{}""#, escape(pattern.as_str())));
            }
            xml.push_str(&format!(r#" w:fill="{}"/>"#, escape(shading.fill.as_str())));
        }

        if let Some(snap) = props.snap_to_grid {
            xml.push_str(&format!(
                r#"<w:snapToGrid w:val="{}"/>"#,
                if snap { "1" } else { "0" }
            ));
        }

        if let Some(ref spacing) = props.spacing {
            xml.push_str("<w:spacing");
            if let Some(before) = spacing.before {
                xml.push_str(&format!(r#" w:before="{}""#, before));
            }
            if let Some(after) = spacing.after {
                xml.push_str(&format!(r#" w:after="{}""#, after));
            }
            if let Some(line) = spacing.line {
                xml.push_str(&format!(r#" w:line="{}""#, line));
            }
            if let Some(rule) = spacing.line_rule {
                xml.push_str(&format!(r#" w:lineRule="{}""#, rule.as_ooxml()));
            }
            xml.push_str("/>");
        }

        if let Some(ref ind) = props.indentation {
            xml.push_str("<w:ind");
            if let Some(left) = ind.left {
                xml.push_str(&format!(r#" w:left="{}""#, left));
            }
            if let Some(right) = ind.right {
                xml.push_str(&format!(r#" w:right="{}""#, right));
            }
            match ind.first_line {
                Some(first) if first < 0 => {
                    xml.push_str(&format!(r#" w:hanging="{}""#, first.unsigned_abs()));
                }
                Some(first) => {
                    xml.push_str(&format!(r#" w:firstLine="{}""#, first));
                }
                None => {}
            }
            xml.push_str("/>");
        }

        if let Some(jc) = props.justification {
            xml.push_str(&format!(r#"<w:jc w:val="{}"/>"#, jc.as_ooxml()));
        }

        if let Some(level) = props.outline_level {
            xml.push_str(&format!(r#"<w:outlineLvl w:val="{}"/>"#, level));
        }

        xml.push_str("</w:pPr>");
    }

    /// Write run properties
    fn write_run_properties(&self, xml: &mut String, props: &RunProperties) {
        if props.is_empty() {
            xml.push_str("<w:rPr/>");
            return;
        }

        xml.push_str("<w:rPr>");

        if let Some(ref fonts) = props.font_family {
            write_fonts(xml, fonts);
        }
        if props.bold {
            xml.push_str("<w:b/>");
        }
        if props.italic {
            xml.push_str("<w:i/>");
        }
        if props.strike {
            xml.push_str("<w:strike/>");
        }
        if let Some(ref color) = props.color {
            xml.push_str(&format!(r#"<w:color w:val="{}"/>"#, escape(color.as_str())));
        }
        if let Some(size) = props.font_size {
            xml.push_str(&format!(r#"<w:sz w:val="{}"/>"#, size));
            xml.push_str(&format!(r#"<w:szCs w:val="{}"/>"#, size));
        }
        if let Some(highlight) = props.highlight {
            xml.push_str(&format!(r#"<w:highlight w:val="{}"/>"#, highlight.as_ooxml()));
        }
        if let Some(underline) = props.underline {
            xml.push_str(&format!(r#"<w:u w:val="{}"/>"#, underline.as_ooxml()));
        }

        xml.push_str("</w:rPr>");
    }

    /// Write table properties
    fn write_table_properties(&self, xml: &mut String, props: &TableProperties) {
        if props.is_empty() {
            xml.push_str("<w:tblPr/>");
            return;
        }

        xml.push_str("<w:tblPr>");

        if let Some(ref ind) = props.indentation {
            write_width(xml, "tblInd", ind);
        }
        if let Some(ref borders) = props.borders {
            write_table_borders(xml, borders);
        }
        if let Some(ref margins) = props.cell_margins {
            write_cell_margins(xml, margins);
        }

        xml.push_str("</w:tblPr>");
    }
}

fn write_fonts(xml: &mut String, fonts: &FontFamily) {
    xml.push_str("<w:rFonts");
    for (attr, value) in [
        ("ascii", &fonts.ascii),
        ("eastAsia", &fonts.east_asia),
        ("hAnsi", &fonts.h_ansi),
        ("cs", &fonts.cs),
    ] {
        if let Some(value) = value {
            xml.push_str(&format!(r#" w:{}="{}""#, attr, escape(value.as_str())));
        }
    }
    xml.push_str("/>");
}

fn write_border(xml: &mut String, element: &str, line: &BorderLine) {
    xml.push_str(&format!(
        r#"<w:{} w:val="{}" w:sz="{}" w:space="{}" w:color="{}"/>"#,
        element,
        escape(line.style.as_str()),
        line.size,
        line.space,
        escape(line.color.as_str())
    ));
}

fn write_paragraph_borders(xml: &mut String, borders: &ParagraphBorders) {
    xml.push_str("<w:pBdr>");
    for (element, line) in [
        ("top", &borders.top),
        ("left", &borders.left),
        ("bottom", &borders.bottom),
        ("right", &borders.right),
    ] {
        if let Some(line) = line {
            write_border(xml, element, line);
        }
    }
    xml.push_str("</w:pBdr>");
}

fn write_table_borders(xml: &mut String, borders: &TableBorders) {
    xml.push_str("<w:tblBorders>");
    for (element, line) in [
        ("top", &borders.top),
        ("left", &borders.left),
        ("bottom", &borders.bottom),
        ("right", &borders.right),
        ("insideH", &borders.inside_h),
        ("insideV", &borders.inside_v),
    ] {
        if let Some(line) = line {
            write_border(xml, element, line);
        }
    }
    xml.push_str("</w:tblBorders>");
}

fn write_width(xml: &mut String, element: &str, width: &TableWidth) {
    xml.push_str(&format!(
        r#"<w:{} w:w="{}" w:type="{}"/>"#,
        element, width.width, width.width_type
    ));
}

fn write_cell_margins(xml: &mut String, margins: &TableCellMargins) {
    xml.push_str("<w:tblCellMar>");
    for (element, width) in [
        ("top", &margins.top),
        ("left", &margins.left),
        ("bottom", &margins.bottom),
        ("right", &margins.right),
    ] {
        if let Some(width) = width {
            write_width(xml, element, width);
        }
    }
    xml.push_str("</w:tblCellMar>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use style_model::{Indentation, StyleType};

    #[test]
    fn test_write_builtins_header() {
        let xml = StylesWriter::new().write(&StyleRegistry::new());

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(namespaces::W));
        assert!(xml.contains("<w:docDefaults>"));
        assert!(xml.contains(r#"<w:sz w:val="21"/>"#));
        assert!(xml.contains(r#"<w:style w:type="paragraph" w:styleId="Normal" w:default="1">"#));
        assert!(xml.contains(r#"<w:style w:type="table" w:styleId="ab">"#));
        assert!(xml.ends_with("</w:styles>"));
    }

    #[test]
    fn test_schema_order_within_style() {
        let xml = StylesWriter::new().write(&StyleRegistry::new());
        let start = xml.find(r#"w:styleId="Heading1""#).unwrap();
        let style = &xml[start..];
        let style = &style[..style.find("</w:style>").unwrap()];

        let positions: Vec<usize> = ["<w:name", "<w:basedOn", "<w:next", "<w:pPr>", "<w:rPr>"]
            .iter()
            .map(|tag| style.find(tag).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sorted_output_is_deterministic() {
        let registry = StyleRegistry::new();
        let writer = StylesWriter::new();
        assert_eq!(writer.write(&registry), writer.write(&registry.duplicate()));

        let xml = writer.write(&registry);
        assert!(xml.find(r#"w:styleId="12""#).unwrap() < xml.find(r#"w:styleId="Normal""#).unwrap());
    }

    #[test]
    fn test_custom_and_escaped_values() {
        let mut registry = StyleRegistry::empty();
        registry
            .create_custom("A&B", "Fish & \"Chips\"", StyleType::Character, None)
            .unwrap();

        let xml = StylesWriter::new().write(&registry);
        assert!(xml.contains(r#"w:styleId="A&amp;B" w:customStyle="1""#));
        assert!(xml.contains(r#"<w:name w:val="Fish &amp; &quot;Chips&quot;"/>"#));
    }

    #[test]
    fn test_without_doc_defaults() {
        let writer = StylesWriter::with_settings(WriterSettings {
            include_doc_defaults: false,
            ..Default::default()
        });
        let xml = writer.write(&StyleRegistry::empty());
        assert!(!xml.contains("docDefaults"));
    }

    #[test]
    fn test_hanging_indent() {
        let mut xml = String::new();
        StylesWriter::new().write_paragraph_properties(
            &mut xml,
            &ParagraphProperties {
                indentation: Some(Indentation {
                    first_line: Some(-360),
                    left: Some(720),
                    right: None,
                }),
                ..Default::default()
            },
        );
        assert_eq!(xml, r#"<w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr>"#);
    }

    #[test]
    fn test_code_block_borders_and_shading() {
        let registry = StyleRegistry::new();
        let style = registry.get("CodeBlock").unwrap();
        let xml = StylesWriter::new().write_styles([style]);

        assert!(xml.contains(
            r#"<w:pBdr><w:top w:val="thick" w:sz="8" w:space="8" w:color="E9E7E7"/>"#
        ));
        assert!(xml.contains(r#"<w:shd w:val="clear" w:fill="F6F5F5"/>"#));
        assert!(xml.contains(r#"<w:rFonts w:ascii="Consolas" w:eastAsia="Consolas""#));
    }
}
