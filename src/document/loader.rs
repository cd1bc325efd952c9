//! Plain text file loading.

use super::Document;
use crate::config::Settings;
use crate::error::Result;
use std::path::Path;
use tracing::{debug, instrument};

/// Load a UTF-8 text file as a single document.
///
/// The path may start with `~`. The returned document carries the expanded
/// path under the `source` metadata key.
#[instrument]
pub fn load_text_file(path: &str) -> Result<Document> {
    let expanded = Settings::expand_path(path);
    let bytes = std::fs::read(&expanded)?;
    let text = String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    debug!("Loaded {} characters from {}", text.chars().count(), expanded.display());

    Ok(Document::new(text).with_metadata("source", source_name(&expanded)))
}

fn source_name(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParleyError;
    use std::io::Write;

    #[test]
    fn test_load_text_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "First paragraph.\n\nSecond paragraph.").unwrap();

        let doc = load_text_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(doc.text, "First paragraph.\n\nSecond paragraph.");
        assert_eq!(
            doc.metadata.get("source").map(String::as_str),
            file.path().to_str()
        );
    }

    #[test]
    fn test_load_rejects_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();

        let err = load_text_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ParleyError::Io(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_text_file("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, ParleyError::Io(_)));
    }
}
