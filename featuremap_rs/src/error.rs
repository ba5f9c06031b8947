//! Error types shared by the analyzers and the feature scanner.
//!
//! Most failures in this crate are recovered at the file boundary (logged and
//! turned into an omission), so these errors rarely travel far. They exist so
//! that helpers can use `?` and so that the boundary has something to log.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// A source file could not be read (missing, permissions, not UTF-8).
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory listing failed somewhere below the scan root.
    #[error("failed to list directory {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration could not be read, parsed or applied.
    #[error("invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// A catalog pattern failed to compile.
    #[error("invalid pattern for element kind '{kind}': {source}")]
    Pattern {
        kind: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScanError>;

/// Read a source file, mapping the io error onto [`ScanError::FileRead`].
pub fn read_source(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ScanError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_maps_to_file_read() {
        let err = read_source(std::path::Path::new("/definitely/not/here.tsx")).unwrap_err();
        assert!(matches!(err, ScanError::FileRead { .. }));
        assert!(err.to_string().contains("/definitely/not/here.tsx"));
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        let path = temp.path().join("Broken.tsx");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0xc3]).expect("write bytes");
        assert!(matches!(
            read_source(&path),
            Err(ScanError::FileRead { .. })
        ));
    }
}
