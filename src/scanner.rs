//! Receipt file discovery
//!
//! Lists the top level of a directory and keeps regular files whose
//! lowercased name ends with a supported extension.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions accepted as receipts (compared against the lowercased file name)
pub const SUPPORTED_EXTENSIONS: &[&str] = &[".pdf", ".jpg", ".jpeg", ".png", ".gif", ".bmp"];

/// A receipt file found by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFile {
    /// Full path to the file
    pub path: PathBuf,
    /// Bare file name, used as the store key
    pub filename: String,
}

/// Check whether a file name carries a supported extension
pub fn is_supported(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    SUPPORTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FileScanner;

impl FileScanner {
    pub fn new() -> Self {
        Self
    }

    /// Scan a directory for receipt files.
    ///
    /// A missing, unreadable or non-directory path yields an empty list.
    /// Subdirectories are not entered and symlinks are not followed.
    /// Order is whatever the filesystem returns.
    pub fn scan(&self, directory: &Path) -> Vec<ReceiptFile> {
        if !directory.is_dir() {
            tracing::debug!("Not a directory, nothing to scan: {}", directory.display());
            return Vec::new();
        }

        WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::debug!("Skipping unreadable entry in {}: {}", directory.display(), err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter_map(|entry| {
                let Some(filename) = entry.file_name().to_str() else {
                    tracing::debug!("Skipping non UTF-8 file name: {:?}", entry.file_name());
                    return None;
                };
                if !is_supported(filename) {
                    return None;
                }
                Some(ReceiptFile {
                    filename: filename.to_string(),
                    path: entry.into_path(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(files: &[ReceiptFile]) -> Vec<String> {
        let mut names: Vec<String> = files.iter().map(|f| f.filename.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_is_supported_case_insensitive() {
        assert!(is_supported("receipt.PDF"));
        assert!(is_supported("photo.JpEg"));
        assert!(is_supported("scan.bmp"));
        assert!(!is_supported("notes.txt"));
        assert!(!is_supported("pdf"));
        assert!(!is_supported("archive.pdf.zip"));
    }

    #[test]
    fn test_scan_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.pdf"), b"%PDF").unwrap();
        fs::write(dir.path().join("b.jpg"), b"jpg").unwrap();
        fs::write(dir.path().join("c.txt"), b"text").unwrap();

        let files = FileScanner::new().scan(dir.path());
        assert_eq!(names(&files), vec!["a.pdf", "b.jpg"]);
        assert!(files.iter().all(|f| f.path.starts_with(dir.path())));
    }

    #[test]
    fn test_scan_does_not_recurse() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("top.png"), b"png").unwrap();
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();
        fs::write(dir.path().join("nested.pdf").join("inner.pdf"), b"%PDF").unwrap();

        let files = FileScanner::new().scan(dir.path());
        assert_eq!(names(&files), vec!["top.png"]);
    }

    #[test]
    fn test_scan_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(FileScanner::new().scan(&missing).is_empty());
    }

    #[test]
    fn test_scan_file_path_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.pdf");
        fs::write(&file, b"%PDF").unwrap();
        assert!(FileScanner::new().scan(&file).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("real.pdf"), b"%PDF").unwrap();
        std::os::unix::fs::symlink(dir.path().join("real.pdf"), dir.path().join("link.pdf")).unwrap();

        let files = FileScanner::new().scan(dir.path());
        assert_eq!(names(&files), vec!["real.pdf"]);
    }
}
