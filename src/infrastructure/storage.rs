use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::{AppError, Result};

pub fn read_import_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        AppError::IoError(format!("Failed to read import file {}: {}", path.display(), e))
    })
}

/// Writes `content` as `dir/filename`, creating `dir` when needed.
pub fn write_export_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(filename);
    fs::write(&path, content).map_err(|e| {
        AppError::IoError(format!("Failed to write export {}: {}", path.display(), e))
    })?;
    Ok(path)
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("daily");
        let path = write_export_file(&nested, "faqs-2024-01-01.json", "[]").unwrap();
        assert_eq!(path, nested.join("faqs-2024-01-01.json"));
        assert_eq!(read_import_file(&path).unwrap(), b"[]".to_vec());
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_import_file(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, AppError::IoError(_)));
    }
}
