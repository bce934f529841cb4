use crate::error::{PageCleanError, Result};
use crate::renderer::format_size;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// One saved page archive found in the source directory.
#[derive(Debug, Clone)]
pub struct ArchiveFile {
    pub source_path: PathBuf,
    pub filename: String,
    pub size: u64,
    pub modified: SystemTime,
}

impl ArchiveFile {
    pub fn new(source_path: PathBuf, size: u64, modified: SystemTime) -> Self {
        let filename = source_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();

        Self {
            source_path,
            filename,
            size,
            modified,
        }
    }

    pub fn format_size(&self) -> String {
        format_size(self.size)
    }
}

/// Enumerates page archives in a flat source directory.
pub struct ArchiveScanner {
    extension: String,
}

impl ArchiveScanner {
    pub fn new<S: Into<String>>(extension: S) -> Self {
        Self {
            extension: extension.into().to_lowercase(),
        }
    }

    /// Lists every archive directly inside `root`. Subdirectories are not
    /// descended into; a page archive is always a single flat file.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<ArchiveFile>> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            return Err(PageCleanError::InvalidPath {
                path: root_path.display().to_string(),
            });
        }

        if !root_path.is_dir() {
            return Err(PageCleanError::InvalidPath {
                path: format!("{} is not a directory", root_path.display()),
            });
        }

        let mut archives = Vec::new();
        let mut scan_errors = Vec::new();

        let walker = WalkDir::new(root_path)
            .max_depth(1)
            .follow_links(false)
            .into_iter();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    scan_errors.push(format!("Scan error: {}", err));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if !self.matches_extension(entry.path()) {
                continue;
            }

            let metadata = entry.metadata().map_err(|e| {
                PageCleanError::Io(e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::Other, "metadata unavailable")
                }))
            })?;

            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            archives.push(ArchiveFile::new(
                entry.path().to_path_buf(),
                metadata.len(),
                modified,
            ));
        }

        if !scan_errors.is_empty() && archives.is_empty() {
            return Err(PageCleanError::Permission {
                path: format!("Multiple scan errors: {}", scan_errors.join(", ")),
            });
        }

        // An empty listing is not an error: the run completes with zero
        // conversions. Only a missing/unreadable directory is fatal.

        // Directory listing order is platform-dependent; sort for stable output.
        archives.sort_by(|a, b| a.filename.cmp(&b.filename));

        Ok(archives)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase() == self.extension)
            .unwrap_or(false)
    }

    pub fn get_statistics(&self, archives: &[ArchiveFile]) -> ScanStatistics {
        let total_files = archives.len();
        let total_size = archives.iter().map(|a| a.size).sum();

        let (largest_file_size, largest_file_name) = archives
            .iter()
            .max_by_key(|a| a.size)
            .map(|a| (a.size, a.filename.clone()))
            .unwrap_or((0, String::new()));

        ScanStatistics {
            total_files,
            total_size,
            largest_file_size,
            largest_file_name,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanStatistics {
    pub total_files: usize,
    pub total_size: u64,
    pub largest_file_size: u64,
    pub largest_file_name: String,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Scan Results:\n  Archives found: {}\n  Total size: {}\n",
            self.total_files,
            format_size(self.total_size)
        );

        if self.largest_file_size > 0 {
            summary.push_str(&format!(
                "  Largest archive: {} ({})\n",
                self.largest_file_name,
                format_size(self.largest_file_size)
            ));
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_archive_file_creation() {
        let archive = ArchiveFile::new(PathBuf::from("saved/page.html"), 1536, SystemTime::UNIX_EPOCH);

        assert_eq!(archive.filename, "page.html");
        assert_eq!(archive.size, 1536);
        assert_eq!(archive.format_size(), "1.5KB");
    }

    #[test]
    fn test_scanner_finds_archives_in_listing_order() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.html"), "<html></html>").unwrap();
        fs::write(temp_dir.path().join("a.html"), "<html></html>").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "skip me").unwrap();

        let scanner = ArchiveScanner::new("html");
        let archives = scanner.scan_directory(temp_dir.path()).unwrap();

        let names: Vec<&str> = archives.iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(names, vec!["a.html", "b.html"]);
    }

    #[test]
    fn test_scanner_does_not_descend_into_subdirectories() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("top.html"), "<html></html>").unwrap();

        let nested = temp_dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("deep.html"), "<html></html>").unwrap();

        let scanner = ArchiveScanner::new("html");
        let archives = scanner.scan_directory(temp_dir.path()).unwrap();

        assert_eq!(archives.len(), 1);
        assert_eq!(archives[0].filename, "top.html");
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let scanner = ArchiveScanner::new("html");
        let result = scanner.scan_directory("definitely/not/a/real/path");
        assert!(matches!(result, Err(PageCleanError::InvalidPath { .. })));
    }

    #[test]
    fn test_empty_directory_yields_empty_listing() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = ArchiveScanner::new("html");
        let archives = scanner.scan_directory(temp_dir.path()).unwrap();
        assert!(archives.is_empty());
    }

    #[test]
    fn test_scan_statistics() {
        let archives = vec![
            ArchiveFile::new(PathBuf::from("a.html"), 100, SystemTime::UNIX_EPOCH),
            ArchiveFile::new(PathBuf::from("b.html"), 200, SystemTime::UNIX_EPOCH),
        ];

        let scanner = ArchiveScanner::new("html");
        let stats = scanner.get_statistics(&archives);

        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.total_size, 300);
        assert_eq!(stats.largest_file_name, "b.html");
    }
}
