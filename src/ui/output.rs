use crate::error::{PageCleanError, UserFriendlyError};
use crate::renderer::{format_size, ConversionProgress, ConversionReport};
use console::{style, Emoji, Term};
use serde_json;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

pub struct OutputFormatter {
    #[allow(dead_code)]
    term: Term,
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let term = Term::stdout();
        let use_colors = match mode {
            OutputMode::Human => term.features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            term,
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Success, message),
            OutputMode::Json => self.print_json_message("success", message),
            OutputMode::Plain => println!("SUCCESS: {}", message),
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Warning, message),
            OutputMode::Json => self.print_json_message("warning", message),
            OutputMode::Plain => println!("WARNING: {}", message),
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    /// Per-file progress line, shown at every verbosity level unless quiet.
    pub fn progress_line(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("progress", message),
                OutputMode::Plain => println!("{}", message),
            }
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &PageCleanError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    println!();
                    if self.use_colors {
                        println!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        println!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    println!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    // Summary and reporting
    pub fn print_conversion_summary(&self, progress: &ConversionProgress) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => self.print_human_summary(progress),
            OutputMode::Json => self.print_json_summary(progress),
            OutputMode::Plain => self.print_plain_summary(progress),
        }
    }

    pub fn print_conversion_report(&self, report: &ConversionReport) {
        match self.mode {
            OutputMode::Human => {} // Summary already printed during the run
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => {
                println!(
                    "RESULT: {} files converted from {} to {}",
                    report.files_processed, report.source_dir, report.dest_dir
                );
            }
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {} // No separator in JSON mode
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            match msg_type {
                MessageType::Error => eprintln!("{}", message),
                _ => println!("{}", message),
            }
        }
    }

    fn print_json_message(&self, message_type: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": message_type,
            "message": message
        }));
    }

    fn print_json_object(&self, object: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(object).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_summary(&self, progress: &ConversionProgress) {
        println!();
        self.print_separator();

        let headline = format!(
            "Converted {} of {} archives ({} in, {} out)",
            progress.files_processed,
            progress.total_files,
            format_size(progress.bytes_in),
            format_size(progress.bytes_out),
        );

        if self.use_colors {
            println!("{}{}", CHECKMARK, style(&headline).green().bold());
        } else {
            println!("{}", headline);
        }

        if !progress.errors.is_empty() {
            let warning_line = format!(
                "{} archive(s) fell back to an error placeholder:",
                progress.errors.len()
            );
            if self.use_colors {
                println!("{}{}", WARNING, style(&warning_line).yellow());
            } else {
                println!("{}", warning_line);
            }
            for error in &progress.errors {
                println!("  - {}", error);
            }
        }
    }

    fn print_json_summary(&self, progress: &ConversionProgress) {
        self.print_json_object(&serde_json::json!({
            "type": "summary",
            "files_processed": progress.files_processed,
            "total_files": progress.total_files,
            "bytes_in": progress.bytes_in,
            "bytes_out": progress.bytes_out,
            "errors": progress.errors,
        }));
    }

    fn print_plain_summary(&self, progress: &ConversionProgress) {
        println!(
            "SUMMARY: {}/{} files, {} bytes in, {} bytes out, {} errors",
            progress.files_processed,
            progress.total_files,
            progress.bytes_in,
            progress.bytes_out,
            progress.errors.len()
        );
        for error in &progress.errors {
            println!("SUMMARY ERROR: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatter_creation() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 1, false);
        assert!(formatter.should_show_message(1));
        assert!(!formatter.should_show_message(2));
    }

    #[test]
    fn test_quiet_suppresses_everything() {
        let formatter = OutputFormatter::new(OutputMode::Human, 3, true);
        assert!(!formatter.should_show_message(0));
    }

    #[test]
    fn test_summary_printing_does_not_panic() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 0, false);
        let mut progress = ConversionProgress::new(2);
        progress.update_file("a.html".to_string(), 100, 200);
        progress.add_error("a.html: odd content");

        formatter.print_conversion_summary(&progress);
    }
}
