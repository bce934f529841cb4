use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pageclean")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract main content from saved HTML page archives")]
#[command(
    long_about = "PageClean reads saved page archives from a source directory, extracts the \
                       main content region from each one and re-renders it inside a clean, \
                       standardized page template in the destination directory."
)]
#[command(after_help = "EXAMPLES:\n  \
    pageclean\n  \
    pageclean gushi gushi2 --verbose\n  \
    pageclean saved cleaned --selectors article,.entry-content --min-text 80\n  \
    pageclean --config my-config.toml\n\n\
    For more information, visit: https://github.com/user/pageclean")]
pub struct Cli {
    /// Source directory containing saved page archives
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// Destination directory for converted pages
    #[arg(value_name = "DEST")]
    pub dest: Option<PathBuf>,

    /// Content selectors tried in priority order (comma-separated)
    #[arg(
        short,
        long,
        help = "CSS selectors tried in priority order (e.g. article,.entry-content)"
    )]
    pub selectors: Option<String>,

    /// Minimum visible text length for fallback content blocks
    #[arg(long, help = "Minimum trimmed text length for a fallback block")]
    pub min_text: Option<usize>,

    /// Archive file extension to process
    #[arg(short, long, help = "File extension of page archives (default: html)")]
    pub extension: Option<String>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Skip generating the destination index page
    #[arg(long, help = "Do not generate index.html in the destination directory")]
    pub no_index: bool,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "Show what would be converted without actually doing it")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        let create_index = if self.no_index { Some(false) } else { None };

        CliOverrides::new()
            .with_selectors(self.selectors.clone())
            .with_min_text_len(self.min_text)
            .with_source_dir(self.source.clone())
            .with_dest_dir(self.dest.clone())
            .with_extension(self.extension.clone())
            .with_create_index(create_index)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn base_cli() -> Cli {
        Cli {
            source: None,
            dest: None,
            selectors: None,
            min_text: None,
            extension: None,
            config: None,
            output_format: OutputFormat::Human,
            no_index: false,
            verbose: 0,
            quiet: false,
            dry_run: false,
            generate_config: false,
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_load_without_arguments() {
        let cli = base_cli();
        let config = cli.load_config().unwrap();

        assert_eq!(config.output.source_dir, PathBuf::from("gushi"));
        assert_eq!(config.output.dest_dir, PathBuf::from("gushi2"));
        assert!(config.output.create_index);
    }

    #[test]
    fn test_positional_directories_override_config() {
        let mut cli = base_cli();
        cli.source = Some(PathBuf::from("saved"));
        cli.dest = Some(PathBuf::from("cleaned"));
        cli.no_index = true;

        let config = cli.load_config().unwrap();
        assert_eq!(config.output.source_dir, PathBuf::from("saved"));
        assert_eq!(config.output.dest_dir, PathBuf::from("cleaned"));
        assert!(!config.output.create_index);
    }

    #[test]
    fn test_selector_override() {
        let mut cli = base_cli();
        cli.selectors = Some("main, #post".to_string());

        let config = cli.load_config().unwrap();
        assert_eq!(config.extract.selectors, vec!["main", "#post"]);
    }

    #[test]
    fn test_verbosity_level() {
        let mut cli = base_cli();
        cli.verbose = 2;
        assert_eq!(cli.verbosity_level(), 2);

        cli.quiet = true;
        assert_eq!(cli.verbosity_level(), 0);
    }
}
