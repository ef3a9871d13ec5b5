//! Styles.xml parser
//!
//! Parses `w:style` definitions into style_model styles. Document defaults,
//! latent styles and conditional table formatting are not part of the model
//! and are skipped.

use crate::error::{StoreError, StoreResult};
use crate::reader::XmlParser;
use quick_xml::events::{BytesStart, Event};
use std::str::FromStr;
use style_model::{
    BorderLine, FontFamily, Indentation, ParagraphBorders, ParagraphProperties, RunProperties,
    Shading, Spacing, Style, StyleError, StyleType, TableBorders, TableCellMargins,
    TableCellProperties, TableProperties, TableRowProperties, TableWidth, UnderlineStyle,
};

/// Parser for styles.xml
#[derive(Debug, Default)]
pub struct StylesParser;

impl StylesParser {
    /// Create a new styles parser
    pub fn new() -> Self {
        Self
    }

    /// Parse styles.xml and return the styles in document order.
    ///
    /// Style elements with an unknown type or without an identifier are
    /// skipped. Anything that is not a well-formed `styles` document fails
    /// with [`StoreError::MalformedMarkup`].
    pub fn parse(&self, content: &str) -> StoreResult<Vec<Style>> {
        let mut reader = XmlParser::from_string(content);
        let mut buf = Vec::new();

        let mut styles = Vec::new();
        let mut current: Option<Style> = None;
        // local names of the currently open elements
        let mut path: Vec<String> = Vec::new();
        let mut seen_root = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let name = element_name(e)?;
                    self.open(&path, &name, e, &mut current, &mut seen_root)?;
                    path.push(name);
                }
                Ok(Event::Empty(ref e)) => {
                    let name = element_name(e)?;
                    self.open(&path, &name, e, &mut current, &mut seen_root)?;
                    close(&path, &name, &mut current, &mut styles);
                }
                Ok(Event::End(ref e)) => {
                    let name = std::str::from_utf8(XmlParser::local_name(e.name().as_ref()))?
                        .to_string();
                    match path.pop() {
                        Some(open) if open == name => {}
                        Some(open) => {
                            return Err(StoreError::MalformedMarkup(format!(
                                "expected </{}>, found </{}>",
                                open, name
                            )))
                        }
                        None => {
                            return Err(StoreError::MalformedMarkup(format!(
                                "unexpected </{}>",
                                name
                            )))
                        }
                    }
                    close(&path, &name, &mut current, &mut styles);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(StoreError::from(e)),
                _ => {}
            }
            buf.clear();
        }

        if !seen_root {
            return Err(StoreError::MalformedMarkup("missing styles root element".into()));
        }
        if let Some(open) = path.last() {
            return Err(StoreError::MalformedMarkup(format!("unclosed element <{}>", open)));
        }

        tracing::debug!(count = styles.len(), "parsed styles part");
        Ok(styles)
    }

    /// Handle an opening (or self-closing) element. `path` holds its ancestors.
    fn open(
        &self,
        path: &[String],
        name: &str,
        e: &BytesStart,
        current: &mut Option<Style>,
        seen_root: &mut bool,
    ) -> StoreResult<()> {
        let ancestors: Vec<&str> = path.iter().map(String::as_str).collect();

        match ancestors.as_slice() {
            [] => {
                if *seen_root {
                    return Err(StoreError::MalformedMarkup(format!(
                        "unexpected second root element <{}>",
                        name
                    )));
                }
                if name != "styles" {
                    return Err(StoreError::MalformedMarkup(format!(
                        "expected <styles> root, found <{}>",
                        name
                    )));
                }
                *seen_root = true;
            }
            ["styles"] if name == "style" => {
                *current = begin_style(e);
            }
            ["styles", "style", within @ ..] => {
                // children of a skipped style are ignored
                if let Some(style) = current.as_mut() {
                    self.parse_style_child(within, name, e, style);
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Dispatch an element inside `w:style` by where it sits
    fn parse_style_child(&self, within: &[&str], name: &str, e: &BytesStart, style: &mut Style) {
        match within {
            [] => self.parse_style_element(name, e, style),
            ["pPr"] => {
                let props = style.paragraph.get_or_insert_with(Default::default);
                self.parse_para_property(name, e, props);
            }
            ["pPr", "pBdr"] => {
                let props = style.paragraph.get_or_insert_with(Default::default);
                let borders = props.borders.get_or_insert_with(Default::default);
                set_paragraph_border(borders, name, border_line(e));
            }
            ["rPr"] => {
                let props = style.run.get_or_insert_with(Default::default);
                self.parse_run_property(name, e, props);
            }
            ["tblPr"] => {
                let props = style.table.get_or_insert_with(Default::default);
                self.parse_table_property(name, e, props);
            }
            ["tblPr", "tblCellMar"] => {
                let props = style.table.get_or_insert_with(Default::default);
                let margins = props.cell_margins.get_or_insert_with(Default::default);
                set_cell_margin(margins, name, table_width(e));
            }
            ["tblPr", "tblBorders"] => {
                let props = style.table.get_or_insert_with(Default::default);
                let borders = props.borders.get_or_insert_with(Default::default);
                set_table_border(borders, name, border_line(e));
            }
            _ => {}
        }
    }

    /// Parse a direct child of `w:style` (name, basedOn, next, property blocks)
    fn parse_style_element(&self, name: &str, e: &BytesStart, style: &mut Style) {
        match name {
            "name" => {
                if let Some(val) = XmlParser::get_w_attribute(e, "val") {
                    style.name = Some(val);
                }
            }
            "basedOn" => {
                style.based_on = XmlParser::get_w_attribute(e, "val")
                    .filter(|v| !v.is_empty())
                    .map(Into::into);
            }
            "next" => {
                style.next_style = XmlParser::get_w_attribute(e, "val")
                    .filter(|v| !v.is_empty())
                    .map(Into::into);
            }
            "pPr" => {
                style.paragraph.get_or_insert_with(ParagraphProperties::default);
            }
            "rPr" => {
                style.run.get_or_insert_with(RunProperties::default);
            }
            "tblPr" => {
                style.table.get_or_insert_with(TableProperties::default);
            }
            "trPr" => {
                style.table_row.get_or_insert_with(TableRowProperties::default);
            }
            "tcPr" => {
                style.table_cell.get_or_insert_with(TableCellProperties::default);
            }
            _ => {}
        }
    }

    /// Parse a paragraph property element
    fn parse_para_property(&self, name: &str, e: &BytesStart, props: &mut ParagraphProperties) {
        match name {
            "keepNext" => props.keep_with_next |= XmlParser::flag_enabled(e),
            "keepLines" => props.keep_lines_together |= XmlParser::flag_enabled(e),
            "pageBreakBefore" => props.page_break_before |= XmlParser::flag_enabled(e),
            "pBdr" => {
                props.borders.get_or_insert_with(ParagraphBorders::default);
            }
            "shd" => {
                props.shading = Some(Shading {
                    fill: XmlParser::get_w_attribute(e, "fill").unwrap_or_default(),
                    pattern: XmlParser::get_w_attribute(e, "val"),
                });
            }
            "snapToGrid" => props.snap_to_grid = Some(XmlParser::flag_enabled(e)),
            "spacing" => {
                props.spacing = Some(Spacing {
                    before: XmlParser::get_number(e, "before"),
                    after: XmlParser::get_number(e, "after"),
                    line: XmlParser::get_number(e, "line"),
                    line_rule: parse_value(e, "lineRule"),
                });
            }
            "ind" => {
                // a hanging of 2^31 is a first line of i32::MIN
                let hanging = XmlParser::get_number::<i64>(e, "hanging")
                    .and_then(|h| i32::try_from(-h).ok());
                props.indentation = Some(Indentation {
                    first_line: hanging.or_else(|| XmlParser::get_number(e, "firstLine")),
                    left: XmlParser::get_number(e, "left")
                        .or_else(|| XmlParser::get_number(e, "start")),
                    right: XmlParser::get_number(e, "right")
                        .or_else(|| XmlParser::get_number(e, "end")),
                });
            }
            "jc" => props.justification = parse_value(e, "val"),
            "outlineLvl" => props.outline_level = XmlParser::get_number(e, "val"),
            _ => {}
        }
    }

    /// Parse a run property element
    fn parse_run_property(&self, name: &str, e: &BytesStart, props: &mut RunProperties) {
        match name {
            "rFonts" => {
                props.font_family = Some(FontFamily {
                    ascii: XmlParser::get_w_attribute(e, "ascii"),
                    east_asia: XmlParser::get_w_attribute(e, "eastAsia"),
                    h_ansi: XmlParser::get_w_attribute(e, "hAnsi"),
                    cs: XmlParser::get_w_attribute(e, "cs"),
                });
            }
            "b" => props.bold |= XmlParser::flag_enabled(e),
            "i" => props.italic |= XmlParser::flag_enabled(e),
            "strike" => props.strike |= XmlParser::flag_enabled(e),
            "u" => {
                props.underline = match XmlParser::get_w_attribute(e, "val") {
                    None => Some(UnderlineStyle::Single),
                    Some(_) => parse_value(e, "val"),
                };
            }
            "color" => props.color = XmlParser::get_w_attribute(e, "val"),
            "sz" => props.font_size = XmlParser::get_number(e, "val"),
            "highlight" => props.highlight = parse_value(e, "val"),
            _ => {}
        }
    }

    /// Parse a table property element
    fn parse_table_property(&self, name: &str, e: &BytesStart, props: &mut TableProperties) {
        match name {
            "tblInd" => props.indentation = Some(table_width(e)),
            "tblCellMar" => {
                props.cell_margins.get_or_insert_with(TableCellMargins::default);
            }
            "tblBorders" => {
                props.borders.get_or_insert_with(TableBorders::default);
            }
            _ => {}
        }
    }
}

/// Handle the end of an element. `path` holds its ancestors.
fn close(path: &[String], name: &str, current: &mut Option<Style>, styles: &mut Vec<Style>) {
    if name == "style" && path.len() == 1 {
        if let Some(style) = current.take() {
            styles.push(style);
        }
    }
}

fn element_name(e: &BytesStart) -> StoreResult<String> {
    Ok(std::str::from_utf8(XmlParser::local_name(e.name().as_ref()))?.to_string())
}

/// Start a style from the attributes of `w:style`, or `None` to skip it
fn begin_style(e: &BytesStart) -> Option<Style> {
    let Some(id) = XmlParser::get_w_attribute(e, "styleId").filter(|id| !id.is_empty()) else {
        tracing::warn!("skipping style element without a styleId");
        return None;
    };

    // the schema default for a missing type is paragraph
    let style_type = match XmlParser::get_w_attribute(e, "type") {
        None => StyleType::Paragraph,
        Some(raw) => match raw.parse::<StyleType>() {
            Ok(style_type) => style_type,
            Err(_) => {
                tracing::warn!(style = %id, kind = %raw, "skipping style with unknown type");
                return None;
            }
        },
    };

    let mut style = Style::new(id, style_type);
    style.is_default = XmlParser::get_w_attribute(e, "default")
        .map(|v| XmlParser::parse_bool(&v))
        .unwrap_or(false);
    style.custom = XmlParser::get_w_attribute(e, "customStyle")
        .map(|v| XmlParser::parse_bool(&v))
        .unwrap_or(false);
    Some(style)
}

/// Parse an enumerated attribute, dropping values the model does not know
fn parse_value<T>(e: &BytesStart, attr: &str) -> Option<T>
where
    T: FromStr<Err = StyleError>,
{
    let raw = XmlParser::get_w_attribute(e, attr)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(%err, "ignoring unrecognized attribute value");
            None
        }
    }
}

fn border_line(e: &BytesStart) -> BorderLine {
    BorderLine {
        style: XmlParser::get_w_attribute(e, "val").unwrap_or_else(|| "none".to_string()),
        color: XmlParser::get_w_attribute(e, "color").unwrap_or_else(|| "auto".to_string()),
        size: XmlParser::get_number(e, "sz").unwrap_or(0),
        space: XmlParser::get_number(e, "space").unwrap_or(0),
    }
}

fn table_width(e: &BytesStart) -> TableWidth {
    TableWidth {
        width: XmlParser::get_number(e, "w").unwrap_or(0),
        width_type: parse_value(e, "type").unwrap_or_default(),
    }
}

fn set_paragraph_border(borders: &mut ParagraphBorders, side: &str, line: BorderLine) {
    match side {
        "top" => borders.top = Some(line),
        "left" | "start" => borders.left = Some(line),
        "bottom" => borders.bottom = Some(line),
        "right" | "end" => borders.right = Some(line),
        _ => {}
    }
}

fn set_table_border(borders: &mut TableBorders, side: &str, line: BorderLine) {
    match side {
        "top" => borders.top = Some(line),
        "left" | "start" => borders.left = Some(line),
        "bottom" => borders.bottom = Some(line),
        "right" | "end" => borders.right = Some(line),
        "insideH" => borders.inside_h = Some(line),
        "insideV" => borders.inside_v = Some(line),
        _ => {}
    }
}

fn set_cell_margin(margins: &mut TableCellMargins, side: &str, width: TableWidth) {
    match side {
        "top" => margins.top = Some(width),
        "left" | "start" => margins.left = Some(width),
        "bottom" => margins.bottom = Some(width),
        "right" | "end" => margins.right = Some(width),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use style_model::{HighlightColor, Justification, LineRule, StyleId, WidthType};

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults>
    <w:rPrDefault><w:rPr><w:sz w:val="22"/></w:rPr></w:rPrDefault>
  </w:docDefaults>
  <w:latentStyles w:count="1"><w:lsdException w:name="Normal"/></w:latentStyles>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:rPr>
      <w:rFonts w:ascii="Cambria" w:eastAsia="SimSun" w:hAnsi="Cambria" w:cs="Arial"/>
      <w:sz w:val="24"/>
      <w:szCs w:val="24"/>
    </w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading1">
    <w:name w:val="heading 1"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:pPr>
      <w:keepNext/>
      <w:keepLines w:val="0"/>
      <w:pBdr><w:bottom w:val="single" w:sz="6" w:space="1" w:color="4472C4"/></w:pBdr>
      <w:shd w:val="clear" w:color="auto" w:fill="EEEEEE"/>
      <w:snapToGrid w:val="0"/>
      <w:spacing w:before="480" w:after="120" w:line="276" w:lineRule="auto"/>
      <w:ind w:left="360" w:hanging="360"/>
      <w:jc w:val="both"/>
      <w:outlineLvl w:val="0"/>
      <w:rPr><w:b/></w:rPr>
    </w:pPr>
    <w:rPr>
      <w:b/>
      <w:i w:val="false"/>
      <w:color w:val="2F5496"/>
      <w:sz w:val="32"/>
      <w:highlight w:val="yellow"/>
      <w:u w:val="double"/>
    </w:rPr>
  </w:style>
  <w:style w:type="character" w:customStyle="1" w:styleId="Code&amp;Co">
    <w:name w:val="Code &amp; Co"/>
    <w:rPr><w:strike/><w:u/></w:rPr>
  </w:style>
  <w:style w:type="table" w:styleId="Grid">
    <w:name w:val="Grid"/>
    <w:tblPr>
      <w:tblInd w:w="0" w:type="dxa"/>
      <w:tblBorders>
        <w:top w:val="single" w:sz="4" w:space="0" w:color="auto"/>
        <w:insideV w:val="single" w:sz="4" w:space="0" w:color="auto"/>
      </w:tblBorders>
      <w:tblCellMar>
        <w:left w:w="108" w:type="dxa"/>
        <w:right w:w="5" w:type="pct"/>
      </w:tblCellMar>
    </w:tblPr>
    <w:tblStylePr w:type="firstRow"><w:rPr><w:b/></w:rPr></w:tblStylePr>
    <w:trPr/>
  </w:style>
</w:styles>"#;

    fn parse(xml: &str) -> StoreResult<Vec<Style>> {
        StylesParser::new().parse(xml)
    }

    fn find<'a>(styles: &'a [Style], id: &str) -> &'a Style {
        styles.iter().find(|s| s.id.as_str() == id).unwrap()
    }

    #[test]
    fn test_parse_style_headers() {
        let styles = parse(SAMPLE).unwrap();
        assert_eq!(styles.len(), 4);

        let normal = find(&styles, "Normal");
        assert!(normal.is_default);
        assert!(!normal.custom);
        assert_eq!(normal.paragraph, None);

        let heading = find(&styles, "Heading1");
        assert_eq!(heading.display_name(), "heading 1");
        assert_eq!(heading.based_on, Some(StyleId::new("Normal")));
        assert_eq!(heading.next_style, Some(StyleId::new("Normal")));

        let code = find(&styles, "Code&Co");
        assert_eq!(code.style_type, StyleType::Character);
        assert!(code.custom);
        assert_eq!(code.display_name(), "Code & Co");
    }

    #[test]
    fn test_doc_defaults_are_not_a_style() {
        let styles = parse(SAMPLE).unwrap();
        let normal = find(&styles, "Normal");
        let run = normal.run.as_ref().unwrap();
        // docDefaults says 22, Normal itself says 24
        assert_eq!(run.font_size, Some(24));
        assert_eq!(run.font_family, Some(FontFamily::new("Cambria", "SimSun", "Cambria", "Arial")));
    }

    #[test]
    fn test_parse_paragraph_properties() {
        let styles = parse(SAMPLE).unwrap();
        let props = find(&styles, "Heading1").paragraph.clone().unwrap();

        assert!(props.keep_with_next);
        assert!(!props.keep_lines_together);
        assert_eq!(props.snap_to_grid, Some(false));
        assert_eq!(
            props.spacing,
            Some(Spacing {
                before: Some(480),
                after: Some(120),
                line: Some(276),
                line_rule: Some(LineRule::Auto),
            })
        );
        assert_eq!(
            props.indentation,
            Some(Indentation {
                first_line: Some(-360),
                left: Some(360),
                right: None,
            })
        );
        assert_eq!(props.justification, Some(Justification::Justify));
        assert_eq!(props.outline_level, Some(0));

        let borders = props.borders.unwrap();
        assert_eq!(borders.bottom, Some(BorderLine::new("single", "4472C4", 6, 1)));
        assert_eq!(borders.top, None);
        assert_eq!(
            props.shading,
            Some(Shading {
                fill: "EEEEEE".to_string(),
                pattern: Some("clear".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_run_properties() {
        let styles = parse(SAMPLE).unwrap();
        let run = find(&styles, "Heading1").run.clone().unwrap();

        assert!(run.bold);
        assert!(!run.italic);
        assert_eq!(run.color.as_deref(), Some("2F5496"));
        assert_eq!(run.font_size, Some(32));
        assert_eq!(run.highlight, Some(HighlightColor::Yellow));
        assert_eq!(run.underline, Some(UnderlineStyle::Double));

        let code = find(&styles, "Code&Co").run.clone().unwrap();
        assert!(code.strike);
        assert_eq!(code.underline, Some(UnderlineStyle::Single));
    }

    #[test]
    fn test_parse_table_properties() {
        let styles = parse(SAMPLE).unwrap();
        let grid = find(&styles, "Grid");
        let table = grid.table.clone().unwrap();

        assert_eq!(table.indentation, Some(TableWidth::dxa(0)));
        let borders = table.borders.unwrap();
        assert!(borders.top.is_some());
        assert!(borders.inside_v.is_some());
        assert!(borders.inside_h.is_none());

        let margins = table.cell_margins.unwrap();
        assert_eq!(margins.left, Some(TableWidth::dxa(108)));
        assert_eq!(
            margins.right,
            Some(TableWidth {
                width: 5,
                width_type: WidthType::Pct,
            })
        );
        // conditional formatting is outside the model
        assert_eq!(grid.run, None);
        assert_eq!(grid.table_row, Some(TableRowProperties::default()));
    }

    #[test]
    fn test_skips_unknown_type_and_missing_id() {
        let xml = r#"<w:styles xmlns:w="urn:w">
            <w:style w:type="bogus" w:styleId="Weird"><w:name w:val="Weird"/></w:style>
            <w:style w:type="paragraph"><w:name w:val="No Id"/></w:style>
            <w:style w:styleId="Untyped"/>
        </w:styles>"#;

        let styles = parse(xml).unwrap();
        assert_eq!(styles.len(), 1);
        assert_eq!(styles[0].id, StyleId::new("Untyped"));
        assert_eq!(styles[0].style_type, StyleType::Paragraph);
    }

    #[test]
    fn test_unknown_values_are_dropped() {
        let xml = r#"<styles>
            <style type="paragraph" styleId="P">
              <pPr><jc w:val="sideways"/><spacing w:before="abc" w:after="10"/></pPr>
            </style>
        </styles>"#;

        let styles = parse(xml).unwrap();
        let props = styles[0].paragraph.as_ref().unwrap();
        assert_eq!(props.justification, None);
        assert_eq!(props.spacing.as_ref().and_then(|s| s.before), None);
        assert_eq!(props.spacing.as_ref().and_then(|s| s.after), Some(10));
    }

    #[test]
    fn test_hanging_indent_extremes() {
        let xml = r#"<w:styles>
            <w:style w:type="paragraph" w:styleId="Min">
              <w:pPr><w:ind w:hanging="2147483648"/></w:pPr>
            </w:style>
            <w:style w:type="paragraph" w:styleId="TooFar">
              <w:pPr><w:ind w:hanging="2147483649" w:left="10"/></w:pPr>
            </w:style>
        </w:styles>"#;

        let styles = parse(xml).unwrap();
        let first_line = |id| {
            find(&styles, id)
                .paragraph
                .as_ref()
                .and_then(|p| p.indentation.as_ref())
                .map(|ind| (ind.first_line, ind.left))
        };
        assert_eq!(first_line("Min"), Some((Some(i32::MIN), None)));
        assert_eq!(first_line("TooFar"), Some((None, Some(10))));
    }

    #[test]
    fn test_empty_styles_root() {
        assert!(parse("<w:styles/>").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_payloads() {
        for xml in [
            "",
            "not xml at all",
            "<w:document></w:document>",
            r#"<w:styles><w:style w:styleId="A"></w:styles>"#,
            r#"<w:styles><w:style w:styleId="A">"#,
            "<w:styles></w:styles><w:styles/>",
        ] {
            assert!(
                matches!(parse(xml), Err(StoreError::MalformedMarkup(_))),
                "accepted {:?}",
                xml
            );
        }
    }
}
