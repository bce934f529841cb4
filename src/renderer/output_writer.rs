use crate::config::ExtractConfig;
use crate::error::{PageCleanError, Result};
use crate::renderer::page_template::{render_index, IndexEntry};
use crate::scanner::ArchiveFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ConversionProgress {
    pub files_processed: usize,
    pub total_files: usize,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub current_file: Option<String>,
    pub start_time: Instant,
    pub errors: Vec<String>,
}

impl ConversionProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            files_processed: 0,
            total_files,
            bytes_in: 0,
            bytes_out: 0,
            current_file: None,
            start_time: Instant::now(),
            errors: Vec::new(),
        }
    }

    pub fn update_file(&mut self, filename: String, bytes_in: u64, bytes_out: u64) {
        self.files_processed += 1;
        self.bytes_in += bytes_in;
        self.bytes_out += bytes_out;
        self.current_file = Some(filename);
    }

    pub fn add_error<S: Into<String>>(&mut self, error: S) {
        self.errors.push(error.into());
    }

    pub fn percentage(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.files_processed as f64 / self.total_files as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn estimated_remaining(&self) -> Duration {
        if self.files_processed == 0 {
            return Duration::from_secs(0);
        }

        let elapsed = self.elapsed();
        let rate = self.files_processed as f64 / elapsed.as_secs_f64();
        let remaining_files = self.total_files - self.files_processed;

        if rate > 0.0 {
            Duration::from_secs_f64(remaining_files as f64 / rate)
        } else {
            Duration::from_secs(0)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub source_dir: String,
    pub dest_dir: String,
    pub converted_at: DateTime<Utc>,
    pub files_processed: usize,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub duration: Duration,
    pub errors: Vec<String>,
    pub pages: Vec<PageInfo>,
    pub selectors_used: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub filename: String,
    pub title: String,
    pub size: u64,
}

/// Writes converted pages into the destination directory.
///
/// Write failures are environment anomalies, not content anomalies, so every
/// method here propagates errors and terminates the batch.
pub struct OutputWriter {
    dest_dir: PathBuf,
}

impl OutputWriter {
    pub fn new(dest_dir: PathBuf) -> Self {
        Self { dest_dir }
    }

    pub fn initialize(&self) -> Result<()> {
        if self.dest_dir.exists() && !self.dest_dir.is_dir() {
            return Err(PageCleanError::InvalidPath {
                path: format!("{} is not a directory", self.dest_dir.display()),
            });
        }

        fs::create_dir_all(&self.dest_dir).map_err(PageCleanError::Io)?;

        // Probe write permission up front so the batch does not fail halfway.
        let test_file = self.dest_dir.join(".pageclean_write_test");
        match fs::File::create(&test_file) {
            Ok(_) => {
                let _ = fs::remove_file(&test_file);
            }
            Err(e) => {
                return Err(PageCleanError::Permission {
                    path: format!(
                        "No write permission for directory {}: {}",
                        self.dest_dir.display(),
                        e
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    /// Writes one rendered page under the same filename as its source archive
    /// and mirrors the archive's modification time onto the output.
    pub fn write_page(&self, archive: &ArchiveFile, html: &str) -> Result<u64> {
        let dest_path = self.dest_dir.join(&archive.filename);

        fs::write(&dest_path, html).map_err(PageCleanError::Io)?;

        let _ = filetime::set_file_mtime(
            &dest_path,
            filetime::FileTime::from_system_time(archive.modified),
        );

        Ok(html.len() as u64)
    }

    pub fn write_index(&self, entries: &[IndexEntry]) -> Result<u64> {
        let index_path = self.dest_dir.join("index.html");
        let html = render_index(entries);
        fs::write(&index_path, &html).map_err(PageCleanError::Io)?;
        Ok(html.len() as u64)
    }

    pub fn create_conversion_report(
        &self,
        source_dir: &Path,
        progress: &ConversionProgress,
        pages: Vec<PageInfo>,
        extract_config: &ExtractConfig,
        write_to_disk: bool,
    ) -> Result<ConversionReport> {
        let report = ConversionReport {
            source_dir: source_dir.display().to_string(),
            dest_dir: self.dest_dir.display().to_string(),
            converted_at: Utc::now(),
            files_processed: progress.files_processed,
            bytes_in: progress.bytes_in,
            bytes_out: progress.bytes_out,
            duration: progress.elapsed(),
            errors: progress.errors.clone(),
            pages,
            selectors_used: extract_config.selectors.clone(),
        };

        if write_to_disk {
            self.save_report_json(&report)?;
        }

        Ok(report)
    }

    fn save_report_json(&self, report: &ConversionReport) -> Result<()> {
        let metadata_dir = self.dest_dir.join(".pageclean");
        fs::create_dir_all(&metadata_dir).map_err(PageCleanError::Io)?;

        let report_path = metadata_dir.join("conversion_report.json");
        let json_content =
            serde_json::to_string_pretty(report).map_err(|e| PageCleanError::Config {
                message: format!("Failed to serialize report to JSON: {}", e),
            })?;

        fs::write(&report_path, json_content).map_err(PageCleanError::Io)?;

        Ok(())
    }
}
