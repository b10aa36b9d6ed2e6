//! Command-line interface module

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::conversion::ConversionConfig;
use crate::error::{ConversionError, ConversionErrorKind};

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "xmlconv")]
#[command(about = "Convert XML documents to pretty-printed JSON")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Input XML file
    #[arg()]
    pub input: Option<PathBuf>,

    /// Output file path (default: input path with a .json extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the JSON to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Read XML from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Spaces per indentation level (0-8, default: 2)
    #[arg(long)]
    pub indent: Option<u8>,

    /// Prefix marking attribute keys (default: @)
    #[arg(long)]
    pub attr_prefix: Option<String>,

    /// Key holding element text alongside attributes or children (default: #text)
    #[arg(long)]
    pub text_key: Option<String>,

    /// Disable pretty-printing
    #[arg(long)]
    pub plain: bool,

    /// Maximum input size (e.g. 100MB, default: 100MB)
    #[arg(long)]
    pub memory_limit: Option<String>,

    /// Only check the XML is well-formed, don't convert
    #[arg(long)]
    pub validate_only: bool,

    /// Output conversion statistics
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub conversion_config: ConversionConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> Result<Self, ConversionError> {
        let conversion_config = Self::create_conversion_config(&args)?;

        Ok(Self {
            args,
            conversion_config,
        })
    }

    /// Create conversion configuration from CLI arguments
    fn create_conversion_config(args: &Args) -> Result<ConversionConfig, ConversionError> {
        let memory_limit = parse_memory_limit(&args.memory_limit)?;
        let defaults = ConversionConfig::default();

        let config = ConversionConfig {
            indent_size: args.indent.unwrap_or(defaults.indent_size),
            attribute_prefix: args
                .attr_prefix
                .clone()
                .unwrap_or(defaults.attribute_prefix),
            text_key: args.text_key.clone().unwrap_or(defaults.text_key),
            memory_limit,
            max_depth: defaults.max_depth,
            pretty: !args.plain,
            validate_output: true,
        };

        config
            .validate()
            .map_err(|e| ConversionError::conversion(ConversionErrorKind::configuration(e)))?;

        Ok(config)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.args.verbose
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    /// Check if only validation is requested
    pub fn is_validate_only(&self) -> bool {
        self.args.validate_only
    }

    /// Get input source description
    pub fn input_description(&self) -> String {
        if self.args.stdin {
            "standard input".to_string()
        } else if let Some(input) = &self.args.input {
            format!("'{}'", input.display())
        } else {
            "no input specified".to_string()
        }
    }

    /// Get output destination description
    pub fn output_description(&self) -> String {
        if let Some(output) = &self.args.output {
            format!("'{}'", output.display())
        } else if self.args.stdout {
            "standard output".to_string()
        } else {
            "derived output path".to_string()
        }
    }
}

/// Parse memory limit string (e.g., "100MB", "1GB", "500KB")
fn parse_memory_limit(limit: &Option<String>) -> Result<usize, ConversionError> {
    let invalid = |limit_str: &str| {
        ConversionError::conversion(ConversionErrorKind::Configuration {
            message: format!("Invalid memory limit: {}", limit_str),
        })
    };

    match limit {
        None => Ok(100 * 1024 * 1024), // 100MB default
        Some(limit_str) => {
            let limit_str = limit_str.trim().to_uppercase();

            if let Some(size) = limit_str.strip_suffix("GB") {
                let gb = size.parse::<f64>().map_err(|_| invalid(&limit_str))?;
                Ok((gb * 1024.0 * 1024.0 * 1024.0) as usize)
            } else if let Some(size) = limit_str.strip_suffix("MB") {
                let mb = size.parse::<f64>().map_err(|_| invalid(&limit_str))?;
                Ok((mb * 1024.0 * 1024.0) as usize)
            } else if let Some(size) = limit_str.strip_suffix("KB") {
                let kb = size.parse::<f64>().map_err(|_| invalid(&limit_str))?;
                Ok((kb * 1024.0) as usize)
            } else if let Some(size) = limit_str.strip_suffix('B') {
                size.parse::<usize>().map_err(|_| invalid(&limit_str))
            } else {
                // Assume bytes
                limit_str.parse::<usize>().map_err(|_| invalid(&limit_str))
            }
        }
    }
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if quiet {
            return;
        }
        if Self::should_use_color() {
            println!("{} {}", console::style("✓").green(), message);
        } else {
            println!("✓ {}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        if Self::should_use_color() {
            eprintln!("{} {}", console::style("✗").red(), message);
        } else {
            eprintln!("✗ {}", message);
        }
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if quiet {
            return;
        }
        if Self::should_use_color() {
            eprintln!("{} {}", console::style("⚠").yellow(), message);
        } else {
            eprintln!("⚠ {}", message);
        }
    }

    /// Check if output should be colored
    pub fn should_use_color() -> bool {
        atty::is(atty::Stream::Stdout) && std::env::var("NO_COLOR").is_err()
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    let message = error.user_message();
    CliUtils::show_error(&message);

    // Provide helpful suggestions
    if message.contains("XML parse error") {
        eprintln!("\nTip: Use --validate-only to check the XML is well-formed");
    } else if message.contains("Input too large") {
        eprintln!("\nTip: Use --memory-limit to increase the input size allowance");
    }

    // Show usage hint
    eprintln!("\nTry 'xmlconv --help' for usage information.");
}
