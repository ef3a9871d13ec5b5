//! stylectl - inspect, resolve, and convert styles.xml parts

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use style_model::{StyleInfo, StyleRegistry, StyleType};
use style_store::{SettingsManager, StyleSettings, StylesPartExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Inspect and convert the styles part of word-processing documents.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Settings JSON file used by every command
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the built-in style catalog as styles.xml
    Builtins {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List styles as id, kind and name
    List {
        /// styles.xml to load instead of the built-in catalog
        #[arg(long)]
        styles: Option<PathBuf>,
        /// Only list styles of this kind
        #[arg(long, value_enum)]
        kind: Option<Kind>,
    },
    /// Print the resolved attribute map of one style as JSON
    Resolve {
        /// Style identifier
        id: String,
        /// styles.xml to load instead of the built-in catalog
        #[arg(long)]
        styles: Option<PathBuf>,
    },
    /// Load a styles.xml and write it back out
    Convert {
        /// styles.xml to read
        file: PathBuf,
        /// Add the file's styles to the built-in catalog instead of replacing it
        #[arg(long)]
        merge: bool,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a settings file with every option filled in
    InitSettings {
        /// Settings file to create or complete
        path: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Paragraph,
    Character,
    Table,
    Numbering,
}

impl From<Kind> for StyleType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Paragraph => StyleType::Paragraph,
            Kind::Character => StyleType::Character,
            Kind::Table => StyleType::Table,
            Kind::Numbering => StyleType::Numbering,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let settings = load_settings(args.settings.as_deref())?;

    match args.command {
        Command::Builtins { output } => {
            let xml = StyleRegistry::new().to_styles_xml(&settings.writer);
            emit(output.as_deref(), &xml)
        }
        Command::List { styles, kind } => {
            let registry = load_registry(styles.as_deref(), &settings)?;
            let infos = match kind {
                Some(kind) => registry.styles_info_by_kind(kind.into()),
                None => registry.all_styles_info(),
            };
            emit(None, &format_listing(&infos))
        }
        Command::Resolve { id, styles } => {
            let registry = load_registry(styles.as_deref(), &settings)?;
            let map = registry.project(&id)?;
            let json = serde_json::to_string_pretty(&map)?;
            emit(None, &format!("{}\n", json))
        }
        Command::Convert {
            file,
            merge,
            output,
        } => {
            let payload = read_payload(&file)?;
            let mut registry = if merge {
                StyleRegistry::new()
            } else {
                StyleRegistry::empty()
            };

            if merge {
                let added = registry.merge_parsed_in(&payload)?;
                tracing::info!(added = added.len(), "merged styles over built-in catalog");
            } else {
                let count = registry.parse_all(&payload)?;
                tracing::info!(count, "loaded styles");
            }

            emit(output.as_deref(), &registry.to_styles_xml(&settings.writer))
        }
        Command::InitSettings { path } => init_settings(&path),
    }
}

/// Load `path` (defaults for anything missing) and write it back complete
fn init_settings(path: &Path) -> Result<()> {
    let mut manager = SettingsManager::new(path);
    manager
        .load()
        .with_context(|| format!("reading settings from {}", path.display()))?;
    manager
        .save()
        .with_context(|| format!("writing settings to {}", path.display()))?;

    tracing::info!(path = %manager.settings_path().display(), "wrote settings");
    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<StyleSettings> {
    match path {
        Some(path) => {
            let mut manager = SettingsManager::new(path);
            let settings = manager
                .load()
                .with_context(|| format!("reading settings from {}", path.display()))?;
            Ok(settings.clone())
        }
        None => Ok(StyleSettings::default()),
    }
}

fn read_payload(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// The built-in catalog, or a document's styles with the usual fallback
fn load_registry(path: Option<&Path>, settings: &StyleSettings) -> Result<StyleRegistry> {
    let Some(path) = path else {
        return Ok(StyleRegistry::new());
    };

    let payload = read_payload(path)?;
    let mut registry = StyleRegistry::empty();
    let report = registry.load_with_settings(&payload, &settings.loader);

    if let Some(warning) = &report.warning {
        tracing::warn!(path = %path.display(), "{}; using built-in styles", warning);
    }
    if !report.reseeded.is_empty() {
        tracing::info!(reseeded = ?report.reseeded, "added missing required styles");
    }
    Ok(registry)
}

fn format_listing(infos: &[StyleInfo]) -> String {
    let mut out = String::new();
    for info in infos {
        out.push_str(&format!("{:<16} {:<10} {}\n", info.id, info.style_type, info.name));
    }
    out
}

fn emit(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("writing {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_kind() {
        let args = Args::parse_from(["stylectl", "list", "--kind", "table"]);
        match args.command {
            Command::List { styles, kind } => {
                assert_eq!(styles, None);
                assert_eq!(kind, Some(Kind::Table));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_settings_flag() {
        let args = Args::parse_from(["stylectl", "resolve", "Heading1", "--settings", "s.json"]);
        assert_eq!(args.settings, Some(PathBuf::from("s.json")));
    }

    #[test]
    fn test_init_settings_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("conf").join("stylectl.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"loader": {"required_styles_check": false}}"#).unwrap();

        init_settings(&path).unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert!(!settings.loader.required_styles_check);
        assert_eq!(settings.writer, StyleSettings::default().writer);
        assert!(fs::read_to_string(&path).unwrap().contains("default_fonts"));
    }

    #[test]
    fn test_format_listing() {
        let registry = StyleRegistry::new();
        let listing = format_listing(&registry.styles_info_by_kind(StyleType::Table));
        let lines: Vec<_> = listing.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("a1"));
        assert!(lines[0].contains("table"));
        assert!(lines[1].ends_with("Table Grid"));
    }

    #[test]
    fn test_load_registry_falls_back_on_bad_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("styles.xml");
        fs::write(&path, "<w:styles><oops>").unwrap();

        let registry = load_registry(Some(&path), &StyleSettings::default()).unwrap();
        assert_eq!(registry, StyleRegistry::new());
    }

    #[test]
    fn test_load_registry_reseeds_required() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("styles.xml");
        fs::write(
            &path,
            r#"<w:styles><w:style w:type="paragraph" w:styleId="Body"/></w:styles>"#,
        )
        .unwrap();

        let registry = load_registry(Some(&path), &StyleSettings::default()).unwrap();
        assert!(registry.contains("Body"));
        assert!(registry.contains("Normal"));
        assert!(registry.contains("Heading9"));
        assert!(!registry.contains("Quote"));
    }
}
