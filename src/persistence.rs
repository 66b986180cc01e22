// File: src/persistence.rs
use crate::error::{FastFontError, Result};
use crate::font::FontDocument;
use log::debug;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Leading bytes of every saved document.
const MAGIC: &[u8; 4] = b"FFNT";
const FORMAT_VERSION: u32 = 1;
pub const DOCUMENT_EXTENSION: &str = "ffnt";

#[derive(serde::Serialize, serde::Deserialize)]
struct SerializableState {
    version: u32,
    document: FontDocument,
}

/// Writes to a temporary file next to `path` and renames it into place, so a
/// failed save never leaves a truncated document behind.
pub fn save_to_disk(document: &FontDocument, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let state = SerializableState { version: FORMAT_VERSION, document: document.clone() };

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        writer.write_all(MAGIC)?;
        bincode::serialize_into(&mut writer, &state)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| FastFontError::Io(e.error))?;
    debug!("saved font document to {}", path.display());
    Ok(())
}

pub fn is_saved_document(data: &[u8]) -> bool {
    data.starts_with(MAGIC)
}

pub fn from_bytes(data: &[u8], path: &Path) -> Result<FontDocument> {
    if !is_saved_document(data) {
        return Err(FastFontError::NotAFontDocument(path.to_path_buf()));
    }
    let state: SerializableState = bincode::deserialize(&data[MAGIC.len()..])?;
    if state.version != FORMAT_VERSION {
        return Err(FastFontError::FontParse(format!(
            "unsupported document version {} in {}",
            state.version,
            path.display()
        )));
    }
    Ok(state.document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Outline, PathCommand};
    use crate::font::{FontResource, GlyphStore, NameKind};

    fn document() -> FontDocument {
        let mut doc = FontDocument::new(1000);
        doc.names.set(NameKind::Family, "Sample");
        doc.glyphs.map_char('a', "a".into());
        doc.glyphs.insert(
            "a".into(),
            Outline::new(vec![
                PathCommand::MoveTo([10.0, 0.0]),
                PathCommand::QuadTo([250.0, 700.0], [490.0, 0.0]),
                PathCommand::Close,
            ]),
            500,
        );
        doc
    }

    #[test]
    fn save_then_load_restores_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sample.ffnt");
        save_to_disk(&document(), &path).unwrap();
        assert_eq!(FontDocument::load(&path).unwrap(), document());
    }

    #[test]
    fn foreign_files_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"hello").unwrap();
        assert!(matches!(FontDocument::load(&path), Err(FastFontError::NotAFontDocument(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FontDocument::load(&dir.path().join("absent.ffnt")).unwrap_err();
        assert!(matches!(err, FastFontError::Io(_)));
    }
}
