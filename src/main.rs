use clap::Parser;
use pageclean::{Cli, OutputFormatter, OutputMode, PageClean, PageCleanError, UserFriendlyError};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let pageclean = match PageClean::from_cli(&cli) {
        Ok(pageclean) => pageclean,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    if cli.dry_run {
        return handle_dry_run(&pageclean);
    }

    match pageclean.run() {
        Ok(report) => {
            pageclean.output_formatter().print_conversion_report(&report);

            if report.errors.is_empty() {
                0 // Success
            } else {
                2 // Success with per-file extraction warnings
            }
        }
        Err(e) => {
            pageclean.handle_error(&e);

            match e {
                PageCleanError::InvalidPath { .. } => 4,
                PageCleanError::Permission { .. } => 5,
                PageCleanError::Selector { .. } => 6,
                PageCleanError::Config { .. } => 7,
                _ => 1, // General error
            }
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "pageclean.toml".to_string());

    match PageClean::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  pageclean --config {}", config_path);
            println!("\nEdit the file to customize the selector list and directories.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(pageclean: &PageClean) -> i32 {
    let formatter = pageclean.output_formatter();
    let config = pageclean.config();

    formatter.start_operation("DRY RUN MODE - No files will be converted");
    formatter.print_separator();

    println!("Configuration that would be used:");
    println!("  Source directory: {}", config.output.source_dir.display());
    println!(
        "  Destination directory: {}",
        config.output.dest_dir.display()
    );
    println!("  Archive extension: .{}", config.output.extension);
    println!("  Selectors: {}", config.extract.selectors.join(", "));
    println!("  Minimum fallback text: {} chars", config.extract.min_text_len);
    println!("  Raw fallback limit: {} chars", config.extract.raw_fallback_limit);
    println!("  Generate index page: {}", config.output.create_index);

    formatter.print_separator();

    if !config.output.source_dir.is_dir() {
        formatter.error(&format!(
            "Source directory does not exist: {}",
            config.output.source_dir.display()
        ));
        return 1;
    }

    formatter.success("Dry run completed successfully");
    println!("Run without --dry-run to perform the conversion");

    0
}

fn print_startup_error(error: &PageCleanError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
