pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod renderer;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, ExtractConfig, OutputConfig};
pub use error::{PageCleanError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{ContentExtractor, ExtractedContent};
pub use renderer::{
    derive_title, format_size, render_page, ConversionProgress, ConversionReport, IndexEntry,
    OutputWriter, PageInfo,
};
pub use scanner::{ArchiveFile, ArchiveScanner, ScanStatistics};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::fs;
use std::path::Path;

/// Main library interface: drives the scan -> extract -> render -> write batch.
pub struct PageClean {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl PageClean {
    /// Create a new PageClean instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create PageClean instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            crate::cli::OutputFormat::Human => OutputMode::Human,
            crate::cli::OutputFormat::Json => OutputMode::Json,
            crate::cli::OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Convert every page archive in the source directory.
    ///
    /// Content-shape anomalies are recovered per file inside the extractor;
    /// filesystem anomalies (unreadable source, unwritable destination)
    /// propagate and terminate the run. That asymmetry is deliberate.
    pub fn run(&self) -> Result<ConversionReport> {
        self.output_formatter
            .start_operation("Starting page conversion");

        let archives = self.scan_archives()?;
        if archives.is_empty() {
            // Nothing to convert is still a completed run, not a failure.
            self.output_formatter.warning(&format!(
                "No .{} page archives found in {}",
                self.config.output.extension,
                self.config.output.source_dir.display()
            ));
        }
        self.output_formatter
            .info(&format!("Found {} page archives", archives.len()));

        let writer = OutputWriter::new(self.config.output.dest_dir.clone());
        writer.initialize()?;
        self.output_formatter.debug(&format!(
            "Initialized destination directory: {}",
            writer.dest_dir().display()
        ));

        let progress_bar = self
            .progress_manager
            .create_file_progress(archives.len() as u64);
        let extractor = ContentExtractor::new(&self.config.extract);

        let mut progress = ConversionProgress::new(archives.len());
        let mut pages = Vec::with_capacity(archives.len());
        let mut index_entries = Vec::with_capacity(archives.len());

        for archive in &archives {
            self.progress_manager.suspend(|| {
                self.output_formatter
                    .progress_line(&format!("Processing {}...", archive.filename));
            });

            let raw = fs::read_to_string(&archive.source_path)?;

            let extracted = extractor.extract(&raw);
            if let Some(ref err) = extracted.error {
                let message = format!("{}: {}", archive.filename, err);
                self.progress_manager
                    .suspend(|| self.output_formatter.warning(&message));
                progress.add_error(message);
            }

            let title = derive_title(&archive.filename, &self.config.output.extension);
            let size_str = format_size(archive.size);
            let html = render_page(&title, &size_str, &extracted.fragment);

            let bytes_out = writer.write_page(archive, &html)?;
            progress.update_file(archive.filename.clone(), archive.size, bytes_out);
            ui::progress::update_file_progress(&progress_bar, &progress);

            self.progress_manager.suspend(|| {
                self.output_formatter.progress_line(&format!(
                    "  -> Created {}",
                    writer.dest_dir().join(&archive.filename).display()
                ));
            });

            pages.push(PageInfo {
                filename: archive.filename.clone(),
                title: title.clone(),
                size: archive.size,
            });
            index_entries.push(IndexEntry {
                filename: archive.filename.clone(),
                title,
                size: size_str,
            });
        }

        ui::progress::finish_progress_with_summary(
            &progress_bar,
            &format!("Converted {} archives", progress.files_processed),
            progress.elapsed(),
        );

        if self.config.output.create_index {
            writer.write_index(&index_entries)?;
            self.output_formatter.info("Generated destination index page");
        }

        let report = writer.create_conversion_report(
            &self.config.output.source_dir,
            &progress,
            pages,
            &self.config.extract,
            self.config.output.generate_report,
        )?;

        self.output_formatter.print_conversion_summary(&progress);

        Ok(report)
    }

    fn scan_archives(&self) -> Result<Vec<ArchiveFile>> {
        self.output_formatter
            .start_operation("Scanning for page archives");

        let scanner = ArchiveScanner::new(self.config.output.extension.clone());
        let archives = scanner.scan_directory(&self.config.output.source_dir)?;

        let stats = scanner.get_statistics(&archives);
        self.output_formatter.debug(&stats.display_summary());

        Ok(archives)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        fs::write(output_path.as_ref(), sample_config).map_err(PageCleanError::Io)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &PageCleanError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convenience function to convert a directory of archives with minimal setup
pub fn convert_pages_simple(
    source_dir: &Path,
    dest_dir: &Path,
    verbose: bool,
) -> Result<ConversionReport> {
    let mut config = Config::default();
    config.output.source_dir = source_dir.to_path_buf();
    config.output.dest_dir = dest_dir.to_path_buf();

    let pageclean = PageClean::new(
        config,
        OutputMode::Human,
        if verbose { 1 } else { 0 },
        false,
    );

    pageclean.run()
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_instance(source: &Path, dest: &Path) -> PageClean {
        let mut config = Config::default();
        config.output.source_dir = source.to_path_buf();
        config.output.dest_dir = dest.to_path_buf();
        PageClean::new(config, OutputMode::Plain, 0, true)
    }

    #[test]
    fn test_pageclean_creation() {
        let config = Config::default();
        let pageclean = PageClean::new(config, OutputMode::Human, 1, false);
        assert_eq!(pageclean.config().extract.selectors.len(), 14);
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        PageClean::generate_sample_config(&config_path).unwrap();
        assert!(config_path.exists());

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[extract]"));
        assert!(content.contains("[output]"));
    }

    #[test]
    fn test_run_converts_every_archive() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let dest_path = dest.path().join("out");

        fs::write(
            source.path().join("a.html"),
            "<html><body><article>A poem with quite enough text to stand on its own here</article></body></html>",
        )
        .unwrap();
        fs::write(
            source.path().join("b.html"),
            "<html><body><article>Another page with plenty of text for the extractor</article></body></html>",
        )
        .unwrap();

        let report = test_instance(source.path(), &dest_path).run().unwrap();

        assert_eq!(report.files_processed, 2);
        assert!(report.errors.is_empty());
        assert!(dest_path.join("a.html").exists());
        assert!(dest_path.join("b.html").exists());
        assert!(dest_path.join("index.html").exists());
        assert!(dest_path
            .join(".pageclean")
            .join("conversion_report.json")
            .exists());

        let converted = fs::read_to_string(dest_path.join("a.html")).unwrap();
        assert!(converted
            .contains("<article>A poem with quite enough text to stand on its own here</article>"));
        assert!(converted.contains("来源: 知乎专栏"));
    }

    #[test]
    fn test_empty_source_directory_completes_with_zero_conversions() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let dest_path = dest.path().join("out");

        let report = test_instance(source.path(), &dest_path).run().unwrap();

        assert_eq!(report.files_processed, 0);
        assert!(report.errors.is_empty());
        assert!(dest_path.is_dir());
    }

    #[test]
    fn test_missing_source_directory_is_fatal() {
        let dest = TempDir::new().unwrap();
        let instance = test_instance(Path::new("no/such/source"), dest.path());

        let result = instance.run();
        assert!(matches!(result, Err(PageCleanError::InvalidPath { .. })));
    }

    #[test]
    fn test_index_generation_can_be_disabled() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let dest_path = dest.path().join("out");

        fs::write(
            source.path().join("a.html"),
            "<html><body><article>Enough words here to satisfy the minimum text requirement</article></body></html>",
        )
        .unwrap();

        let mut config = Config::default();
        config.output.source_dir = source.path().to_path_buf();
        config.output.dest_dir = dest_path.clone();
        config.output.create_index = false;
        config.output.generate_report = false;

        let instance = PageClean::new(config, OutputMode::Plain, 0, true);
        instance.run().unwrap();

        assert!(dest_path.join("a.html").exists());
        assert!(!dest_path.join("index.html").exists());
        assert!(!dest_path.join(".pageclean").exists());
    }

    #[test]
    fn test_version_info() {
        assert!(!version_info().is_empty());
    }
}
