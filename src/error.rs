use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageCleanError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Permission denied: {path}")]
    Permission { path: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Invalid CSS selector: {message}")]
    Selector { message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for PageCleanError {
    fn user_message(&self) -> String {
        match self {
            PageCleanError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            PageCleanError::Permission { path } => {
                format!("Permission denied accessing: {}", path)
            }
            PageCleanError::InvalidPath { path } => {
                format!("Invalid path: {}", path)
            }
            PageCleanError::Selector { message } => {
                format!("Invalid CSS selector: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            PageCleanError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            PageCleanError::Permission { .. } => Some(
                "Ensure you have read permission on the source directory and write permission on the destination directory.".to_string()
            ),
            PageCleanError::InvalidPath { .. } => Some(
                "Verify the source and destination directories exist and are directories, not files.".to_string()
            ),
            PageCleanError::Selector { .. } => Some(
                "Check the selector list in your configuration or the --selectors argument for typos.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for PageCleanError {
    fn from(error: toml::de::Error) -> Self {
        PageCleanError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PageCleanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = PageCleanError::InvalidPath {
            path: "no/such/dir".to_string(),
        };
        assert!(error.user_message().contains("no/such/dir"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = PageCleanError::from(io_error);
        assert!(matches!(error, PageCleanError::Io(_)));
        assert!(error.suggestion().is_none());
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse_error = toml::from_str::<toml::Value>("not [ valid").unwrap_err();
        let error = PageCleanError::from(parse_error);
        assert!(matches!(error, PageCleanError::Config { .. }));
    }
}
