use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use xmlconv::cli::{self, path_mapping, Args, CliConfig, CliUtils};
use xmlconv::conversion::stats::ConversionStatistics;
use xmlconv::conversion::{ConversionEngine, JsonData};
use xmlconv::error::{ConversionError, ConversionErrorKind};
use xmlconv::parser::validation::validate_xml_structure;
use xmlconv::parser::XmlSource;

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match CliConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            cli::handle_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let result = if config.is_validate_only() {
        handle_validation(&config)
    } else {
        handle_conversion(&config)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::handle_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn handle_validation(config: &CliConfig) -> Result<(), ConversionError> {
    let source = input_source(config)?;
    let content = read_source(&source)?;
    validate_xml_structure(&content)?;
    CliUtils::show_success("Well-formed XML", config.is_quiet());
    Ok(())
}

fn handle_conversion(config: &CliConfig) -> Result<(), ConversionError> {
    let source = input_source(config)?;
    if config.is_verbose() {
        eprintln!("Reading {}", source.source_type().description());
    }

    let engine = ConversionEngine::new(config.conversion_config.clone());
    let data = engine.convert_source(&source)?;

    write_result(config, &source, &data)?;

    if config.want_stats() {
        output_statistics(&data, config.is_quiet());
    }

    Ok(())
}

/// Resolve the input source from the CLI arguments
fn input_source(config: &CliConfig) -> Result<XmlSource, ConversionError> {
    if config.args.stdin {
        return Ok(XmlSource::Stdin);
    }

    let input = match &config.args.input {
        Some(input) => input,
        None => {
            return Err(ConversionError::conversion(
                ConversionErrorKind::Configuration {
                    message: "no input provided; pass an XML file path or use --stdin".to_string(),
                },
            ));
        }
    };

    if !input.is_file() {
        return Err(ConversionError::conversion(ConversionErrorKind::Io {
            message: format!("input file not found: {}", input.display()),
            path: Some(input.clone()),
        }));
    }

    if input
        .extension()
        .map_or(true, |ext| !ext.eq_ignore_ascii_case("xml"))
    {
        CliUtils::show_warning(
            &format!(
                "input {} does not have an .xml extension; converting anyway",
                input.display()
            ),
            config.is_quiet(),
        );
    }

    Ok(XmlSource::File(input.clone()))
}

fn read_source(source: &XmlSource) -> Result<String, ConversionError> {
    source.read_content().map_err(|e| {
        ConversionError::conversion(ConversionErrorKind::Io {
            message: format!(
                "failed to read {}: {}",
                source.source_type().description(),
                e
            ),
            path: source.file_path().cloned(),
        })
    })
}

fn write_result(
    config: &CliConfig,
    source: &XmlSource,
    data: &JsonData,
) -> Result<(), ConversionError> {
    // Stdin input without an explicit output goes to stdout, as does --stdout
    if config.args.stdout || (config.args.stdin && config.args.output.is_none()) {
        println!("{}", data.content);
        return Ok(());
    }

    let output_path = resolve_output_path(config, source)?;
    write_atomic(&output_path, &data.content)?;
    CliUtils::show_success(
        &format!("Converted to: {}", output_path.display()),
        config.is_quiet(),
    );
    Ok(())
}

fn resolve_output_path(
    config: &CliConfig,
    source: &XmlSource,
) -> Result<PathBuf, ConversionError> {
    if let Some(output) = &config.args.output {
        return Ok(output.clone());
    }

    match source.file_path() {
        Some(input) => {
            let output = path_mapping::default_output_path(input);
            if &output == input {
                return Err(ConversionError::conversion(
                    ConversionErrorKind::Configuration {
                        message: format!(
                            "derived output path equals the input path: {}; pass --output",
                            output.display()
                        ),
                    },
                ));
            }
            Ok(output)
        }
        None => Err(ConversionError::conversion(
            ConversionErrorKind::Configuration {
                message: "--output is required for this input".to_string(),
            },
        )),
    }
}

/// Write the output through a temporary sibling file and rename it into
/// place, so a failed run never leaves a partial output file behind.
fn write_atomic(path: &Path, content: &str) -> Result<(), ConversionError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                io_error(
                    format!("failed to create {}: {}", parent.display(), e),
                    Some(parent.to_path_buf()),
                )
            })?;
        }
    }

    let tmp = path_mapping::temp_output_path(path);
    let mut payload = String::with_capacity(content.len() + 1);
    payload.push_str(content);
    payload.push('\n');

    fs::write(&tmp, payload).map_err(|e| {
        io_error(
            format!("failed to write {}: {}", tmp.display(), e),
            Some(tmp.clone()),
        )
    })?;

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        io_error(
            format!("failed to move output into place at {}: {}", path.display(), e),
            Some(path.to_path_buf()),
        )
    })
}

fn io_error(message: String, path: Option<PathBuf>) -> ConversionError {
    ConversionError::conversion(ConversionErrorKind::Io { message, path })
}

fn output_statistics(data: &JsonData, quiet: bool) {
    if quiet {
        return;
    }

    let stats = ConversionStatistics::from_metadata(&data.metadata);

    println!("\nConversion statistics:");
    println!(
        "Input size: {}",
        CliUtils::format_file_size(stats.input_size_bytes)
    );
    println!(
        "Output size: {}",
        CliUtils::format_file_size(stats.output_size_bytes)
    );
    println!("Size change: {:+.1}%", stats.size_change_percent);
    println!("Elements: {}", stats.element_count);
    println!("Attributes: {}", stats.attribute_count);
    println!("Max depth: {}", stats.max_depth);
    println!("Processing time: {}ms", stats.processing_time_ms);
}
