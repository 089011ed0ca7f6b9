//! Minimal CLI: load schema files → (catalog JSON | diagnostics report)
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use json_schema_catalog::{SchemaResult, parse_schema_files};
use tracing_subscriber::EnvFilter;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// parse JSON Schema documents into a catalog of type definitions for codegen
#[derive(Parser, Debug)]
#[command(name = "schema-catalog", version)]
pub struct CommandLineInterface {
    /// more logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// parse and print the aggregated catalog as JSON
    Parse(ParseOut),
    /// parse and report diagnostics; exits non-zero if any error was found
    Check(CheckOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer selecting the schema node in each document (e.g. /components/schemas/Pet)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct ParseOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// pretty-print the output
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// treat warnings as errors
    #[arg(long, default_value_t = false)]
    deny_warnings: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> Result<Vec<(PathBuf, serde_json::Value)>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let mut documents = Vec::with_capacity(source_paths.len());
        for source_path in source_paths {
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read {}", source_path.display()))?;
            let json_value = serde_json::from_str::<serde_json::Value>(&source)
                .with_context(|| format!("failed to parse JSON source file {}", source_path.display()))?;
            let json_value = match self.json_pointer.as_deref() {
                None => json_value,
                Some(pointer) => json_value
                    .pointer(pointer)
                    .cloned()
                    .ok_or_else(|| anyhow!("{pointer} selects nothing in {}", source_path.display()))?,
            };
            tracing::debug!(file = %source_path.display(), "loaded schema document");
            documents.push((source_path, json_value));
        }
        Ok(documents)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn init_tracing(&self) {
        let filter = match self.verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn run(&self) -> Result<ExitCode> {
        match &self.cmd {
            Command::Parse(target) => {
                let documents = target.input_settings.load()?;
                let result = parse_schema_files(&documents);
                let catalog_src = if target.pretty {
                    serde_json::to_string_pretty(&result)?
                } else {
                    serde_json::to_string(&result)?
                };
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(out, &catalog_src)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                } else {
                    println!("{catalog_src}");
                }
                Ok(ExitCode::SUCCESS)
            }
            Command::Check(target) => {
                let documents = target.input_settings.load()?;
                let result = parse_schema_files(&documents);
                print_report(&result);
                let failed = result.has_errors() || (target.deny_warnings && result.warning_count() > 0);
                Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
            }
        }
    }
}

fn print_report(result: &SchemaResult) {
    for (file, errors) in &result.schema_errors {
        for error in errors {
            println!("{} {}: {error}", "error".red().bold(), file.display().to_string().bold());
        }
    }
    for (file, warnings) in &result.schema_warnings {
        for warning in warnings {
            println!("{} {}: {warning}", "warning".yellow().bold(), file.display().to_string().bold());
        }
    }
    let types: usize = result.schema_dict.values().map(|s| s.types.len()).sum();
    println!(
        "{} schemas, {types} types, {} errors, {} warnings",
        result.schema_dict.len(),
        result.error_count(),
        result.warning_count(),
    );
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                matched_any = true;
                out.push(entry?);
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
