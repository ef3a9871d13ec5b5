//! Loading registries from styles.xml payloads

use crate::error::{StoreError, StoreResult};
use crate::settings::{LoaderSettings, WriterSettings};
use crate::styles::StylesParser;
use crate::styles_writer::StylesWriter;
use style_model::{StyleId, StyleRegistry};

/// Where the styles of a loaded registry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Payload was empty; the built-in catalog was used
    Builtins,
    /// Styles were parsed from the payload
    Document,
    /// Payload could not be parsed; the built-in catalog was used instead
    FallbackBuiltins,
}

/// Outcome of [`StylesPartExt::load_from_document_or_default`]
#[derive(Debug)]
pub struct LoadReport {
    pub source: LoadSource,
    /// Parse failure that triggered the fallback, if any
    pub warning: Option<StoreError>,
    /// Required styles that were missing and re-seeded from the catalog
    pub reseeded: Vec<StyleId>,
}

impl LoadReport {
    pub fn is_fallback(&self) -> bool {
        self.source == LoadSource::FallbackBuiltins
    }
}

/// styles.xml operations on a [`StyleRegistry`]
pub trait StylesPartExt {
    /// Replace the whole registry with the styles in `payload`.
    ///
    /// The registry is left untouched when the payload does not parse.
    /// Returns the number of styles now registered.
    fn parse_all(&mut self, payload: &str) -> StoreResult<usize>;

    /// Add the styles from `payload` whose identifiers are not registered
    /// yet. Existing entries are never replaced. Returns the added IDs.
    fn merge_parsed_in(&mut self, payload: &str) -> StoreResult<Vec<StyleId>>;

    /// Load a document's styles part, degrading to the built-in catalog.
    fn load_from_document_or_default(&mut self, payload: &str) -> LoadReport {
        self.load_with_settings(payload, &LoaderSettings::default())
    }

    /// [`StylesPartExt::load_from_document_or_default`] with explicit settings
    fn load_with_settings(&mut self, payload: &str, settings: &LoaderSettings) -> LoadReport;

    /// Serialize the registry as a styles part
    fn to_styles_xml(&self, settings: &WriterSettings) -> String;
}

impl StylesPartExt for StyleRegistry {
    fn parse_all(&mut self, payload: &str) -> StoreResult<usize> {
        let styles = StylesParser::new().parse(payload)?;

        self.clear();
        self.extend(styles);
        Ok(self.len())
    }

    fn merge_parsed_in(&mut self, payload: &str) -> StoreResult<Vec<StyleId>> {
        let styles = StylesParser::new().parse(payload)?;

        let mut added = Vec::new();
        for style in styles {
            if self.contains(style.id.as_str()) {
                tracing::debug!(style = %style.id, "keeping existing style");
                continue;
            }
            added.push(style.id.clone());
            self.register(style);
        }
        Ok(added)
    }

    fn load_with_settings(&mut self, payload: &str, settings: &LoaderSettings) -> LoadReport {
        let (source, warning) = if payload.trim().is_empty() {
            self.clear();
            self.seed_builtins();
            (LoadSource::Builtins, None)
        } else {
            match self.parse_all(payload) {
                Ok(_) => (LoadSource::Document, None),
                Err(err) => {
                    tracing::warn!(error = %err, "failed to parse styles part, using built-in styles");
                    self.clear();
                    self.seed_builtins();
                    (LoadSource::FallbackBuiltins, Some(err))
                }
            }
        };

        let reseeded = if settings.required_styles_check {
            self.ensure_required_styles()
        } else {
            Vec::new()
        };

        LoadReport {
            source,
            warning,
            reseeded,
        }
    }

    fn to_styles_xml(&self, settings: &WriterSettings) -> String {
        StylesWriter::with_settings(settings.clone()).write(self)
    }
}
