//! Attribute-map projection of resolved styles
//!
//! Produces nested JSON objects keyed by the styles-part attribute names
//! (`spacing.before`, `fontFamily.eastAsia`, ...). Unset fields are left
//! out entirely rather than written as nulls.

use crate::error::Result;
use crate::properties::{
    BorderLine, ParagraphBorders, ParagraphProperties, RunProperties, TableBorders,
    TableCellMargins, TableProperties, TableWidth,
};
use crate::registry::StyleRegistry;
use crate::style::Style;
use serde_json::{json, Map, Value};

impl StyleRegistry {
    /// Resolve a style with inheritance and flatten it into an attribute map
    pub fn project(&self, id: &str) -> Result<Map<String, Value>> {
        let resolved = self.resolve_required(id)?;
        Ok(project_style(&resolved))
    }
}

/// Flatten a style as-is, without resolving inheritance
pub fn project_style(style: &Style) -> Map<String, Value> {
    let mut result = Map::new();
    result.insert("styleId".into(), json!(style.id.as_str()));
    result.insert("type".into(), json!(style.style_type.as_ooxml()));
    result.insert("name".into(), json!(style.display_name()));

    if let Some(based_on) = &style.based_on {
        result.insert("basedOn".into(), json!(based_on.as_str()));
    }
    if let Some(paragraph) = &style.paragraph {
        result.insert("paragraphProperties".into(), Value::Object(paragraph_map(paragraph)));
    }
    if let Some(run) = &style.run {
        result.insert("runProperties".into(), Value::Object(run_map(run)));
    }
    if let Some(table) = &style.table {
        result.insert("tableProperties".into(), Value::Object(table_map(table)));
    }

    result
}

fn paragraph_map(props: &ParagraphProperties) -> Map<String, Value> {
    let mut result = Map::new();

    if props.keep_with_next {
        result.insert("keepNext".into(), json!(true));
    }
    if props.keep_lines_together {
        result.insert("keepLines".into(), json!(true));
    }
    if props.page_break_before {
        result.insert("pageBreakBefore".into(), json!(true));
    }
    if let Some(borders) = &props.borders {
        result.insert("borders".into(), Value::Object(paragraph_borders_map(borders)));
    }
    if let Some(shading) = &props.shading {
        let mut map = Map::new();
        map.insert("fill".into(), json!(shading.fill));
        if let Some(pattern) = &shading.pattern {
            map.insert("pattern".into(), json!(pattern));
        }
        result.insert("shading".into(), Value::Object(map));
    }
    if let Some(snap) = props.snap_to_grid {
        result.insert("snapToGrid".into(), json!(snap));
    }
    if let Some(spacing) = &props.spacing {
        let mut map = Map::new();
        insert_opt(&mut map, "before", spacing.before);
        insert_opt(&mut map, "after", spacing.after);
        insert_opt(&mut map, "line", spacing.line);
        insert_opt(&mut map, "lineRule", spacing.line_rule.map(|r| r.as_ooxml()));
        result.insert("spacing".into(), Value::Object(map));
    }
    if let Some(indentation) = &props.indentation {
        let mut map = Map::new();
        insert_opt(&mut map, "firstLine", indentation.first_line);
        insert_opt(&mut map, "left", indentation.left);
        insert_opt(&mut map, "right", indentation.right);
        result.insert("indentation".into(), Value::Object(map));
    }
    if let Some(justification) = props.justification {
        result.insert("justification".into(), json!(justification.as_ooxml()));
    }
    if let Some(level) = props.outline_level {
        result.insert("outlineLevel".into(), json!(level));
    }

    result
}

fn run_map(props: &RunProperties) -> Map<String, Value> {
    let mut result = Map::new();

    if let Some(fonts) = &props.font_family {
        let mut map = Map::new();
        insert_opt(&mut map, "ascii", fonts.ascii.as_deref());
        insert_opt(&mut map, "eastAsia", fonts.east_asia.as_deref());
        insert_opt(&mut map, "hAnsi", fonts.h_ansi.as_deref());
        insert_opt(&mut map, "cs", fonts.cs.as_deref());
        result.insert("fontFamily".into(), Value::Object(map));
    }
    if props.bold {
        result.insert("bold".into(), json!(true));
    }
    if props.italic {
        result.insert("italic".into(), json!(true));
    }
    if let Some(underline) = props.underline {
        result.insert("underline".into(), json!(underline.as_ooxml()));
    }
    if props.strike {
        result.insert("strike".into(), json!(true));
    }
    insert_opt(&mut result, "color", props.color.as_deref());
    insert_opt(&mut result, "fontSize", props.font_size);
    insert_opt(&mut result, "highlight", props.highlight.map(|h| h.as_ooxml()));

    result
}

fn table_map(props: &TableProperties) -> Map<String, Value> {
    let mut result = Map::new();

    if let Some(indentation) = &props.indentation {
        result.insert("indentation".into(), width_value(indentation));
    }
    if let Some(margins) = &props.cell_margins {
        result.insert("cellMargins".into(), Value::Object(cell_margins_map(margins)));
    }
    if let Some(borders) = &props.borders {
        result.insert("borders".into(), Value::Object(table_borders_map(borders)));
    }

    result
}

fn paragraph_borders_map(borders: &ParagraphBorders) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, line) in [
        ("top", &borders.top),
        ("left", &borders.left),
        ("bottom", &borders.bottom),
        ("right", &borders.right),
    ] {
        if let Some(line) = line {
            map.insert(key.into(), border_value(line));
        }
    }
    map
}

fn table_borders_map(borders: &TableBorders) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, line) in [
        ("top", &borders.top),
        ("left", &borders.left),
        ("bottom", &borders.bottom),
        ("right", &borders.right),
        ("insideH", &borders.inside_h),
        ("insideV", &borders.inside_v),
    ] {
        if let Some(line) = line {
            map.insert(key.into(), border_value(line));
        }
    }
    map
}

fn cell_margins_map(margins: &TableCellMargins) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, width) in [
        ("top", &margins.top),
        ("left", &margins.left),
        ("bottom", &margins.bottom),
        ("right", &margins.right),
    ] {
        if let Some(width) = width {
            map.insert(key.into(), width_value(width));
        }
    }
    map
}

fn border_value(line: &BorderLine) -> Value {
    json!({
        "val": line.style,
        "color": line.color,
        "sz": line.size,
        "space": line.space,
    })
}

fn width_value(width: &TableWidth) -> Value {
    json!({ "w": width.width, "type": width.width_type.as_ooxml() })
}

fn insert_opt<T: Into<Value>>(map: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StyleError;
    use crate::StyleId;

    #[test]
    fn test_project_heading_includes_inherited_fonts() {
        let registry = StyleRegistry::new();
        let map = registry.project("Heading1").unwrap();

        assert_eq!(map["styleId"], json!("Heading1"));
        assert_eq!(map["type"], json!("paragraph"));

        let run = map["runProperties"].as_object().unwrap();
        assert_eq!(run["bold"], json!(true));
        assert_eq!(run["fontSize"], json!(32));
        assert_eq!(run["color"], json!("2F5496"));
        assert_eq!(run["fontFamily"]["eastAsia"], json!("宋体"));

        let paragraph = map["paragraphProperties"].as_object().unwrap();
        assert_eq!(paragraph["spacing"]["before"], json!(240));
        assert_eq!(paragraph["outlineLevel"], json!(0));
        assert_eq!(paragraph["keepNext"], json!(true));
    }

    #[test]
    fn test_project_omits_unset_fields() {
        let registry = StyleRegistry::new();
        let map = registry.project("Strong").unwrap();

        assert!(!map.contains_key("paragraphProperties"));
        assert!(!map.contains_key("basedOn"));
        let run = map["runProperties"].as_object().unwrap();
        assert_eq!(run.len(), 1);
        assert!(!run.contains_key("italic"));
        assert!(!run.contains_key("color"));
    }

    #[test]
    fn test_project_missing_style() {
        let registry = StyleRegistry::new();
        assert_eq!(
            registry.project("Missing"),
            Err(StyleError::NotFound(StyleId::new("Missing")))
        );
    }

    #[test]
    fn test_project_table_style() {
        let registry = StyleRegistry::new();
        let map = registry.project("ab").unwrap();
        let table = map["tableProperties"].as_object().unwrap();

        assert_eq!(table["borders"]["insideH"]["val"], json!("single"));
        assert_eq!(table["cellMargins"]["left"]["w"], json!(108));
        assert_eq!(table["indentation"]["type"], json!("dxa"));
    }

    #[test]
    fn test_project_code_block_borders_and_shading() {
        let registry = StyleRegistry::new();
        let map = registry.project("CodeBlock").unwrap();
        let paragraph = &map["paragraphProperties"];

        assert_eq!(paragraph["borders"]["top"]["val"], json!("thick"));
        assert_eq!(paragraph["shading"]["fill"], json!("F6F5F5"));
        assert_eq!(paragraph["shading"]["pattern"], json!("clear"));
    }
}
