//! Style registry - owns style identity and lifecycle for one document
//!
//! The registry is a plain owned map. It is not synchronized; hand each
//! concurrent render its own [`StyleRegistry::duplicate`] instead of sharing
//! one behind a lock.

use crate::builtin;
use crate::error::{Result, StyleError};
use crate::properties::{ParagraphProperties, RunProperties, TableProperties};
use crate::style::{Style, StyleId, StyleType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Registry for storing and looking up styles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleRegistry {
    /// All styles indexed by ID
    styles: HashMap<StyleId, Style>,
}

impl StyleRegistry {
    /// Create a new style registry with built-in styles
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.seed_builtins();
        registry
    }

    /// Create a registry without any styles
    pub fn empty() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    /// Register every style from the built-in catalog, replacing any entry
    /// with the same ID
    pub fn seed_builtins(&mut self) {
        let styles = builtin::builtin_styles();
        tracing::debug!(count = styles.len(), "seeding built-in styles");
        for style in styles {
            self.register(style);
        }
    }

    /// Add the built-in Normal style if it is missing. Returns whether it
    /// was added.
    pub fn seed_normal(&mut self) -> bool {
        if self.contains(builtin::NORMAL) {
            return false;
        }
        self.register(builtin::normal_style());
        true
    }

    /// Add whichever of the built-in Heading1..Heading9 styles are missing.
    /// Headings already present are kept. Returns the IDs that were added.
    pub fn seed_headings(&mut self) -> Vec<StyleId> {
        let mut added = Vec::new();
        for heading in builtin::heading_styles() {
            if !self.contains(heading.id.as_str()) {
                added.push(heading.id.clone());
                self.register(heading);
            }
        }
        added
    }

    /// Make sure Normal and all nine headings exist, adding the catalog
    /// version of each missing one. Returns the IDs that were added.
    pub fn ensure_required_styles(&mut self) -> Vec<StyleId> {
        let mut added = Vec::new();
        if self.seed_normal() {
            added.push(StyleId::new(builtin::NORMAL));
        }
        added.extend(self.seed_headings());

        if !added.is_empty() {
            tracing::debug!(?added, "re-seeded required styles");
        }
        added
    }

    /// Register a style, replacing any existing entry with the same ID.
    /// Returns the replaced style.
    ///
    /// A style with an empty ID is not registered.
    pub fn register(&mut self, style: Style) -> Option<Style> {
        if style.id.as_str().is_empty() {
            tracing::warn!(name = style.display_name(), "ignoring style without an ID");
            return None;
        }
        self.styles.insert(style.id.clone(), style)
    }

    /// Get a style by ID
    pub fn get(&self, id: &str) -> Option<&Style> {
        self.styles.get(id)
    }

    /// Check if a style exists
    pub fn contains(&self, id: &str) -> bool {
        self.styles.contains_key(id)
    }

    /// Remove a style. Removing a missing ID is a no-op.
    ///
    /// Styles based on the removed one are left in place; they simply stop
    /// inheriting from it.
    pub fn remove(&mut self, id: &str) -> Option<Style> {
        self.styles.remove(id)
    }

    /// Remove every style
    pub fn clear(&mut self) {
        self.styles.clear();
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Get all styles, in no particular order
    pub fn all_styles(&self) -> impl Iterator<Item = &Style> {
        self.styles.values()
    }

    /// Get all styles of one type
    pub fn styles_of_type(&self, style_type: StyleType) -> impl Iterator<Item = &Style> {
        self.styles
            .values()
            .filter(move |s| s.style_type == style_type)
    }

    /// Heading1..Heading9 in level order, skipping missing ones
    pub fn heading_styles(&self) -> Vec<&Style> {
        builtin::HEADING_IDS
            .iter()
            .filter_map(|id| self.get(id))
            .collect()
    }

    /// The style flagged as default for a type
    pub fn default_style(&self, style_type: StyleType) -> Option<&Style> {
        self.styles_of_type(style_type).find(|s| s.is_default)
    }

    /// Create and register a minimal caller-owned style.
    ///
    /// An existing style with the same ID is replaced; callers that need
    /// uniqueness check [`StyleRegistry::contains`] first. An empty ID is
    /// rejected with [`StyleError::MissingIdentifier`].
    pub fn create_custom(
        &mut self,
        id: impl Into<StyleId>,
        name: impl Into<String>,
        style_type: StyleType,
        based_on: Option<&str>,
    ) -> Result<&Style> {
        let mut style = Style::new(id, style_type).with_name(name).as_custom();
        if style.id.as_str().is_empty() {
            return Err(StyleError::MissingIdentifier);
        }
        if let Some(base) = based_on.filter(|b| !b.is_empty()) {
            style = style.with_based_on(base);
        }

        let id = style.id.clone();
        self.styles.insert(id.clone(), style);
        Ok(&self.styles[&id])
    }

    /// Replace the paragraph properties of a style
    pub fn set_paragraph_props(&mut self, id: &str, props: Option<ParagraphProperties>) -> Result<()> {
        self.style_mut(id)?.paragraph = props;
        Ok(())
    }

    /// Replace the run properties of a style
    pub fn set_run_props(&mut self, id: &str, props: Option<RunProperties>) -> Result<()> {
        self.style_mut(id)?.run = props;
        Ok(())
    }

    /// Replace the table properties of a style
    pub fn set_table_props(&mut self, id: &str, props: Option<TableProperties>) -> Result<()> {
        self.style_mut(id)?.table = props;
        Ok(())
    }

    fn style_mut(&mut self, id: &str) -> Result<&mut Style> {
        self.styles
            .get_mut(id)
            .ok_or_else(|| StyleError::NotFound(StyleId::new(id)))
    }

    /// Fully independent copy of this registry
    pub fn duplicate(&self) -> Self {
        tracing::debug!(count = self.styles.len(), "duplicating style registry");
        Self {
            styles: self
                .styles
                .iter()
                .map(|(id, style)| (id.clone(), style.clone()))
                .collect(),
        }
    }
}

impl Extend<Style> for StyleRegistry {
    fn extend<I: IntoIterator<Item = Style>>(&mut self, iter: I) {
        for style in iter {
            self.register(style);
        }
    }
}

impl FromIterator<Style> for StyleRegistry {
    fn from_iter<I: IntoIterator<Item = Style>>(iter: I) -> Self {
        let mut registry = Self::empty();
        registry.extend(iter);
        registry
    }
}
