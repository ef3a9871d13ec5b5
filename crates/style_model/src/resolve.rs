//! Based-on inheritance resolution
//!
//! A style's effective formatting is its own property sets layered over the
//! effective formatting of its parent. Missing parents and cycles both end
//! the chain: the style is used as-is from that point.

use crate::error::{Result, StyleError};
use crate::properties::merge_layers;
use crate::registry::StyleRegistry;
use crate::style::{Style, StyleId};
use std::borrow::Cow;
use std::collections::HashSet;

impl StyleRegistry {
    /// Resolve a style by walking the inheritance chain and merging properties.
    ///
    /// Returns the stored style borrowed when nothing is inherited, and an
    /// owned merged copy otherwise.
    pub fn resolve(&self, id: &str) -> Option<Cow<'_, Style>> {
        let mut visited = HashSet::new();
        self.resolve_with(id, &mut visited)
    }

    /// Like [`StyleRegistry::resolve`] but reports a missing style as an error
    pub fn resolve_required(&self, id: &str) -> Result<Cow<'_, Style>> {
        self.resolve(id)
            .ok_or_else(|| StyleError::NotFound(StyleId::new(id)))
    }

    fn resolve_with<'a>(
        &'a self,
        id: &str,
        visited: &mut HashSet<&'a str>,
    ) -> Option<Cow<'a, Style>> {
        let style = self.get(id)?;

        if !visited.insert(style.id.as_str()) {
            tracing::warn!(style = %style.id, "based-on cycle detected, inheritance stops here");
            return None;
        }

        let Some(parent_id) = style.based_on.as_ref() else {
            return Some(Cow::Borrowed(style));
        };

        match self.resolve_with(parent_id.as_str(), visited) {
            Some(parent) => Some(Cow::Owned(inherit(&parent, style))),
            None => Some(Cow::Borrowed(style)),
        }
    }

    /// The based-on chain of a style, from the root ancestor to the style
    /// itself. Stops at the first missing or repeated ID.
    pub fn inheritance_chain(&self, id: &str) -> Vec<StyleId> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = self.get(id);

        while let Some(style) = current {
            if !visited.insert(style.id.as_str()) {
                break;
            }
            chain.push(style.id.clone());
            current = style
                .based_on
                .as_ref()
                .and_then(|parent| self.get(parent.as_str()));
        }

        chain.reverse();
        chain
    }
}

/// Layer `child` over its already-resolved `parent`
fn inherit(parent: &Style, child: &Style) -> Style {
    Style {
        id: child.id.clone(),
        style_type: child.style_type,
        name: child.name.clone(),
        based_on: child.based_on.clone(),
        next_style: child.next_style.clone(),
        is_default: child.is_default,
        custom: child.custom,
        paragraph: merge_layers(parent.paragraph.as_ref(), child.paragraph.as_ref()),
        run: merge_layers(parent.run.as_ref(), child.run.as_ref()),
        table: merge_layers(parent.table.as_ref(), child.table.as_ref()),
        table_row: child.table_row.clone(),
        table_cell: child.table_cell.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::{FontFamily, RunProperties, TableWidth};
    use crate::StyleType;

    #[test]
    fn test_resolve_missing_is_none() {
        let registry = StyleRegistry::new();
        assert!(registry.resolve("Nope").is_none());
        assert_eq!(
            registry.resolve_required("Nope").err(),
            Some(StyleError::NotFound(StyleId::new("Nope")))
        );
    }

    #[test]
    fn test_resolve_without_parent_borrows() {
        let registry = StyleRegistry::new();
        let resolved = registry.resolve("Normal").unwrap();

        assert!(matches!(resolved, Cow::Borrowed(_)));
        assert_eq!(resolved.as_ref(), registry.get("Normal").unwrap());
    }

    #[test]
    fn test_heading2_inherits_fonts_from_normal() {
        let registry = StyleRegistry::new();
        let resolved = registry.resolve("Heading2").unwrap();
        let run = resolved.run.as_ref().unwrap();

        assert!(run.bold);
        assert_eq!(run.font_size, Some(26));
        assert_eq!(run.color.as_deref(), Some("2F5496"));
        assert_eq!(
            run.font_family,
            Some(FontFamily::new("Calibri", "宋体", "Calibri", "Times New Roman"))
        );
        // identity stays with the child
        assert_eq!(resolved.id, StyleId::new("Heading2"));
        assert_eq!(resolved.based_on, Some(StyleId::new("Normal")));
    }

    #[test]
    fn test_custom_style_overrides_and_inherits() {
        let mut registry = StyleRegistry::new();
        registry
            .create_custom("X", "X", StyleType::Paragraph, Some("Quote"))
            .unwrap();
        registry
            .set_run_props(
                "X",
                Some(RunProperties {
                    color: Some("00FF00".to_string()),
                    ..Default::default()
                }),
            )
            .unwrap();

        let resolved = registry.resolve("X").unwrap();
        let run = resolved.run.as_ref().unwrap();

        assert!(run.italic);
        assert_eq!(run.color.as_deref(), Some("00FF00"));
        // Quote's paragraph settings come through unchanged
        assert_eq!(
            resolved.paragraph.as_ref().and_then(|p| p.indentation.as_ref()).and_then(|i| i.left),
            Some(720)
        );
        assert!(resolved.custom);
    }

    #[test]
    fn test_dangling_parent_returns_child() {
        let mut registry = StyleRegistry::empty();
        registry.register(Style::paragraph("Orphan", "Orphan").with_based_on("Gone"));

        let resolved = registry.resolve("Orphan").unwrap();
        assert_eq!(resolved.as_ref(), registry.get("Orphan").unwrap());
    }

    #[test]
    fn test_removed_parent_stops_inheritance() {
        let mut registry = StyleRegistry::new();
        registry.remove("Normal");

        let resolved = registry.resolve("Heading1").unwrap();
        let run = resolved.run.as_ref().unwrap();
        assert_eq!(run.font_family, None);
        assert_eq!(run.font_size, Some(32));
    }

    #[test]
    fn test_circular_reference_protection() {
        let mut registry = StyleRegistry::empty();
        registry.register(
            Style::paragraph("StyleA", "Style A")
                .with_based_on("StyleB")
                .with_run_props(RunProperties {
                    bold: true,
                    ..Default::default()
                }),
        );
        registry.register(
            Style::paragraph("StyleB", "Style B")
                .with_based_on("StyleA")
                .with_run_props(RunProperties {
                    color: Some("123456".to_string()),
                    ..Default::default()
                }),
        );

        let resolved = registry.resolve("StyleA").unwrap();
        let run = resolved.run.as_ref().unwrap();
        assert!(run.bold);
        assert_eq!(run.color.as_deref(), Some("123456"));
    }

    #[test]
    fn test_self_reference_terminates() {
        let mut registry = StyleRegistry::empty();
        registry.register(Style::paragraph("Loop", "Loop").with_based_on("Loop"));

        let resolved = registry.resolve("Loop").unwrap();
        assert_eq!(resolved.id, StyleId::new("Loop"));
    }

    #[test]
    fn test_table_grid_inherits_margins() {
        let registry = StyleRegistry::new();
        let resolved = registry.resolve("ab").unwrap();
        let table = resolved.table.as_ref().unwrap();

        assert!(table.borders.is_some());
        assert_eq!(table.indentation, Some(TableWidth::dxa(0)));
        assert_eq!(
            table.cell_margins.as_ref().and_then(|m| m.left),
            Some(TableWidth::dxa(108))
        );
    }

    #[test]
    fn test_three_level_chain() {
        let mut registry = StyleRegistry::new();
        registry.register(
            Style::paragraph("Level3", "Level 3")
                .with_based_on("Heading1")
                .with_run_props(RunProperties {
                    italic: true,
                    ..Default::default()
                }),
        );

        let resolved = registry.resolve("Level3").unwrap();
        let run = resolved.run.as_ref().unwrap();
        assert!(run.italic);
        assert!(run.bold);
        assert_eq!(run.font_size, Some(32));
        assert!(run.font_family.is_some());

        assert_eq!(
            registry.inheritance_chain("Level3"),
            vec![StyleId::new("Normal"), StyleId::new("Heading1"), StyleId::new("Level3")]
        );
    }

    #[test]
    fn test_inheritance_chain_with_cycle() {
        let mut registry = StyleRegistry::empty();
        registry.register(Style::paragraph("A", "A").with_based_on("B"));
        registry.register(Style::paragraph("B", "B").with_based_on("A"));

        assert_eq!(
            registry.inheritance_chain("A"),
            vec![StyleId::new("B"), StyleId::new("A")]
        );
        assert!(registry.inheritance_chain("Missing").is_empty());
    }
}
