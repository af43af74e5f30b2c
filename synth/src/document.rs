//! Doctypes and document output.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use interface_dita_core::xml::Document;
use tracing::debug;

use crate::error::{Result, SynthError};

pub const REFERENCE_DOCTYPE: &str = r#"reference PUBLIC "-//OASIS//DTD DITA Reference//EN" "reference.dtd""#;
pub const CONCEPT_DOCTYPE: &str = r#"concept PUBLIC "-//OASIS//DTD DITA Concept//EN" "concept.dtd""#;
pub const MAP_DOCTYPE: &str = r#"map PUBLIC "-//OASIS//DTD DITA Map//EN" "map.dtd""#;

/// Serializes `document` to `path`, creating parent directories.
pub fn write_document(document: &Document, path: &Path) -> Result<()> {
    let xml = document.to_xml_string()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(SynthError::io(parent))?;
    }
    let file = File::create(path).map_err(SynthError::io(path))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(xml.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(SynthError::io(path))?;
    debug!(path = %path.display(), "Wrote document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use interface_dita_core::xml::Element;

    #[test]
    fn test_write_document_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en").join("commands").join("s").join("r_command_setupfoo.dita");
        let document = Document::new(Element::new("reference").with_attr("id", "r_command_setupfoo"), Some(REFERENCE_DOCTYPE));

        write_document(&document, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<?xml"));
        assert!(written.contains("<!DOCTYPE reference PUBLIC"));
        assert!(written.contains(r#"<reference id="r_command_setupfoo"/>"#));
    }
}
