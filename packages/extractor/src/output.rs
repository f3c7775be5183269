//! JSON and YAML output for parsed documents.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

/// Serialization format for written documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// File extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Render a value as pretty-printed JSON with a trailing newline.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    Ok(content)
}

/// Render a value as a YAML document.
pub fn render_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let yaml = serde_yaml_ng::to_string(value)?;
    Ok(format!("---\n{yaml}"))
}

/// Render a value in the given format.
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(value),
        OutputFormat::Yaml => render_yaml(value),
    }
}

/// Save a value as `{name}.{ext}` in `output_dir`.
///
/// Uses atomic write pattern: writes to a hidden temp file, syncs to disk,
/// then renames over the destination. The directory is created if needed.
///
/// # Arguments
/// * `value` - The value to serialize (a `Document` or its flat list)
/// * `name` - File stem, usually the document key
/// * `output_dir` - Target directory
/// * `format` - Serialization format
///
/// # Returns
/// Path to the saved file
pub fn save<T: Serialize + ?Sized>(
    value: &T,
    name: &str,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;

    let extension = format.extension();
    let output_file = output_dir.join(format!("{name}.{extension}"));
    let temp_file = output_dir.join(format!(".{name}.{extension}.tmp"));

    let content = render(value, format)?;

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output_file.exists() {
        fs::remove_file(&output_file)?;
    }

    fs::rename(&temp_file, &output_file)?;
    tracing::debug!(path = %output_file.display(), "Saved output");

    Ok(output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::parse_document;
    use crate::types::Document;
    use tempfile::tempdir;

    fn sample() -> Document {
        let xml = r#"<Statute>
            <Identification><ShortTitle>Sample Act</ShortTitle></Identification>
            <Section><Label>1</Label><Text>Sample.</Text></Section>
        </Statute>"#;
        parse_document(xml, "S-1", Some("eng")).unwrap()
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["type"], "act");
        assert_eq!(value["doc_id"], "S-1_eng");
        assert_eq!(value["sections"][0]["kind"], "section");
        assert_eq!(value["sections"][0]["label_str"], "Section 1");
        assert!(value["preamble"].is_null());
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_render_yaml() {
        let yaml = render_yaml(&sample()).unwrap();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("doc_id: S-1_eng"));
        assert!(yaml.contains("title_str: Sample Act"));
    }

    #[test]
    fn test_save_roundtrip() {
        let document = sample();
        let dir = tempdir().unwrap();
        let path = save(&document, &document.doc_id, dir.path(), OutputFormat::Json).unwrap();

        assert_eq!(path, dir.path().join("S-1_eng.json"));
        let read_back: Document =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read_back, document);
        assert!(!dir.path().join(".S-1_eng.json.tmp").exists());
    }

    #[test]
    fn test_save_creates_directory_and_overwrites() {
        let document = sample();
        let dir = tempdir().unwrap();
        let nested = dir.path().join("out").join("eng");

        let flat = &document.all_chunkable_sections;
        save(flat, "flat", &nested, OutputFormat::Yaml).unwrap();
        let path = save(flat, "flat", &nested, OutputFormat::Yaml).unwrap();

        assert_eq!(path, nested.join("flat.yaml"));
        assert!(fs::read_to_string(path)
            .unwrap()
            .contains("section_id: S-1_eng_section_1"));
    }
}
