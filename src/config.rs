use crate::error::{PageCleanError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub extract: ExtractConfig,
    pub output: OutputConfig,
}

/// Controls how the main content region is chosen from a parsed archive.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractConfig {
    /// CSS selectors tried in priority order; the first one that matches wins.
    pub selectors: Vec<String>,
    /// Elements removed from the tree before the longest-block fallback runs.
    pub strip_elements: Vec<String>,
    /// Minimum trimmed visible text length for a fallback candidate block.
    pub min_text_len: usize,
    /// Maximum number of characters of raw input used as the last-resort fragment.
    pub raw_fallback_limit: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub extension: String,
    pub create_index: bool,
    pub generate_report: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extract: ExtractConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            // Content containers commonly used by websites, most specific hosts
            // (Zhihu) first among the class selectors.
            selectors: vec![
                "article".to_string(),
                ".RichContent".to_string(),
                ".Post-RichTextContainer".to_string(),
                ".Article-content".to_string(),
                ".entry-content".to_string(),
                ".post-content".to_string(),
                ".content".to_string(),
                ".main-content".to_string(),
                "#content".to_string(),
                "#article".to_string(),
                "[data-role=\"article-content\"]".to_string(),
                ".zhuanlan-post-content".to_string(),
                ".RichText".to_string(),
                ".Post-Title".to_string(),
            ],
            strip_elements: vec![
                "script".to_string(),
                "style".to_string(),
                "nav".to_string(),
                "header".to_string(),
                "footer".to_string(),
                "aside".to_string(),
            ],
            min_text_len: 50,
            raw_fallback_limit: 5000,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("gushi"),
            dest_dir: PathBuf::from("gushi2"),
            extension: "html".to_string(),
            create_index: true,
            generate_report: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PageCleanError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| PageCleanError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| PageCleanError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["pageclean.toml", "pageclean.config.toml", ".pageclean.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref selectors) = cli_args.selectors {
            self.extract.selectors = selectors
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(min_text_len) = cli_args.min_text_len {
            self.extract.min_text_len = min_text_len;
        }

        if let Some(ref source_dir) = cli_args.source_dir {
            self.output.source_dir = source_dir.clone();
        }

        if let Some(ref dest_dir) = cli_args.dest_dir {
            self.output.dest_dir = dest_dir.clone();
        }

        if let Some(ref extension) = cli_args.extension {
            self.output.extension = extension.trim_start_matches('.').to_lowercase();
        }

        if let Some(create_index) = cli_args.create_index {
            self.output.create_index = create_index;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| PageCleanError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| PageCleanError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.extract.selectors.is_empty() {
            return Err(PageCleanError::Config {
                message: "At least one content selector must be specified".to_string(),
            });
        }

        if self.extract.raw_fallback_limit == 0 {
            return Err(PageCleanError::Config {
                message: "Raw fallback limit must be greater than 0".to_string(),
            });
        }

        if self.output.extension.is_empty() {
            return Err(PageCleanError::Config {
                message: "Archive extension must not be empty".to_string(),
            });
        }

        if self.output.source_dir == self.output.dest_dir {
            return Err(PageCleanError::Config {
                message: "Source and destination directories must differ".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub selectors: Option<String>,
    pub min_text_len: Option<usize>,
    pub source_dir: Option<PathBuf>,
    pub dest_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub create_index: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selectors(mut self, selectors: Option<String>) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn with_min_text_len(mut self, min_text_len: Option<usize>) -> Self {
        self.min_text_len = min_text_len;
        self
    }

    pub fn with_source_dir(mut self, source_dir: Option<PathBuf>) -> Self {
        self.source_dir = source_dir;
        self
    }

    pub fn with_dest_dir(mut self, dest_dir: Option<PathBuf>) -> Self {
        self.dest_dir = dest_dir;
        self
    }

    pub fn with_extension(mut self, extension: Option<String>) -> Self {
        self.extension = extension;
        self
    }

    pub fn with_create_index(mut self, create_index: Option<bool>) -> Self {
        self.create_index = create_index;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.extract.selectors.first().unwrap(), "article");
        assert_eq!(config.extract.min_text_len, 50);
        assert_eq!(config.extract.raw_fallback_limit, 5000);
        assert_eq!(config.output.extension, "html");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.extract.selectors.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_same_source_and_dest_rejected() {
        let mut config = Config::default();
        config.output.dest_dir = config.output.source_dir.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let config = Config::default();
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.extract.selectors, loaded_config.extract.selectors);
        assert_eq!(config.output.dest_dir, loaded_config.output.dest_dir);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_selectors(Some("main, .body-text".to_string()))
            .with_min_text_len(Some(80))
            .with_extension(Some(".htm".to_string()));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.extract.selectors, vec!["main", ".body-text"]);
        assert_eq!(config.extract.min_text_len, 80);
        assert_eq!(config.output.extension, "htm");
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(!sample.is_empty());
        assert!(sample.contains("[extract]"));
        assert!(sample.contains("[output]"));
        assert!(sample.contains("RichContent"));
    }
}
