//! json-vars: Turn a JSON document into variable assignments
//!
//! Usage:
//!   # Read from file, output to stdout
//!   json-vars data.json
//!
//!   # Read from stdin
//!   echo '{"a": 1, "b": {"c": 2}}' | json-vars
//!
//!   # Different root variable, fenced for pasting into markdown
//!   json-vars --root-name payload --markdown response.json
//!
//!   # Structured listing instead of code
//!   json-vars --emit json data.json -o vars.json

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use json_vars::logging::{init_logging, LogConfig, LogFormat};
use json_vars::{parse_document, CodeGenerator, CodegenConfig, CollisionPolicy, Error};
use serde_json::Value;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const EMPTY_INPUT_PROMPT: &str = "Paste or pipe a JSON document to convert.";

#[derive(Parser, Debug)]
#[command(name = "json-vars", version)]
#[command(about = "Turn a JSON document into variable assignments", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted or "-")
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Write the listing to this file instead of stdout
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Variable the accessor chains are rooted at (default: json_data)
    #[arg(long)]
    root_name: Option<String>,

    /// Prefix for identifiers that would start with a digit (default: v_)
    #[arg(long)]
    digit_prefix: Option<String>,

    /// Identifier used when the document is a single scalar (default: root)
    #[arg(long)]
    scalar_name: Option<String>,

    /// Keep duplicate identifiers instead of appending _2, _3, ...
    #[arg(long)]
    allow_duplicates: bool,

    /// Append each leaf value as a trailing comment
    #[arg(long)]
    with_values: bool,

    /// Wrap the listing in a ```python fenced block (code output only)
    #[arg(long)]
    markdown: bool,

    /// Output kind
    #[arg(long, value_enum, default_value = "code")]
    emit: EmitArg,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormatArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EmitArg {
    /// Assignment statements
    Code,
    /// JSON array of {identifier, path, expression, value}
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_format = match args.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let log_config = LogConfig::from_verbosity(args.verbose, args.quiet)
        .with_format(log_format)
        .with_ansi(io::stderr().is_terminal());
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let (status, message) = failure_report(&error);
            eprintln!("{}", message);
            ExitCode::from(status)
        }
    }
}

/// Exit status and stderr message for a failed run.
///
/// Blank input is the neutral "nothing to do yet" state and exits 0.
fn failure_report(error: &anyhow::Error) -> (u8, String) {
    match error.downcast_ref::<Error>() {
        Some(Error::EmptyInput) => (0, EMPTY_INPUT_PROMPT.to_string()),
        Some(parse_error) => (1, parse_error.to_string()),
        None => (1, format!("error: {error:#}")),
    }
}

fn run(args: &Args) -> Result<()> {
    let config = build_config(args);

    let text = read_input(args.input.as_deref())?;
    let document = parse_document(&text)?;

    let generator = CodeGenerator::new(config);
    let rendered = render(&generator, &document, args.emit, args.markdown)?;

    write_output(args.output.as_ref(), &rendered)
}

/// Render `document` in the requested output kind
fn render(generator: &CodeGenerator, document: &Value, emit: EmitArg, markdown: bool) -> Result<String> {
    match emit {
        EmitArg::Code => {
            let code = generator.generate(document);
            if markdown {
                Ok(format!("```python\n{}\n```", code))
            } else {
                Ok(code)
            }
        }
        EmitArg::Json => {
            let assignments = generator.assignments(document);
            serde_json::to_string_pretty(&assignments).context("Failed to serialize assignments")
        }
    }
}

/// Build the generator config from CLI flags on top of the defaults
fn build_config(args: &Args) -> CodegenConfig {
    let mut config = CodegenConfig::default();
    if let Some(root) = &args.root_name {
        config.root_name = root.clone();
    }
    if let Some(prefix) = &args.digit_prefix {
        config.digit_prefix = prefix.clone();
    }
    if let Some(name) = &args.scalar_name {
        config.scalar_name = name.clone();
    }
    if args.allow_duplicates {
        config.collisions = CollisionPolicy::Overwrite;
    }
    config.value_comments = args.with_values;
    config
}

fn read_input(input: Option<&str>) -> Result<String> {
    match input {
        Some(path) if path != "-" => {
            tracing::info!(path, "reading input file");
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path))
        }
        _ => {
            tracing::info!("reading input from stdin");
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn write_output(output: Option<&PathBuf>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            std::fs::write(path, format!("{}\n", rendered))
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote listing");
        }
        None => {
            if rendered.is_empty() {
                tracing::info!("document has no leaf values");
                return Ok(());
            }
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", rendered).context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("json-vars-{}-{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_input(dir: &Path, text: &str) -> String {
        let path = dir.join("input.json");
        std::fs::write(&path, text).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_build_config_defaults() {
        let args = Args::parse_from(["json-vars"]);

        let config = build_config(&args);

        assert_eq!(config.root_name, "json_data");
        assert_eq!(config.digit_prefix, "v_");
        assert_eq!(config.scalar_name, "root");
        assert_eq!(config.collisions, CollisionPolicy::Disambiguate);
        assert!(!config.value_comments);
    }

    #[test]
    fn test_build_config_overlays_flags() {
        let args = Args::parse_from([
            "json-vars",
            "--root-name",
            "payload",
            "--digit-prefix",
            "n_",
            "--scalar-name",
            "value",
            "--allow-duplicates",
            "--with-values",
        ]);

        let config = build_config(&args);

        assert_eq!(config.root_name, "payload");
        assert_eq!(config.digit_prefix, "n_");
        assert_eq!(config.scalar_name, "value");
        assert_eq!(config.collisions, CollisionPolicy::Overwrite);
        assert!(config.value_comments);
    }

    #[test]
    fn test_render_markdown_fence() {
        let generator = CodeGenerator::default();

        let rendered = render(&generator, &json!({"a": 1}), EmitArg::Code, true).unwrap();

        assert_eq!(rendered, "```python\na = json_data[\"a\"]\n```");
    }

    #[test]
    fn test_render_plain_code() {
        let generator = CodeGenerator::default();

        let rendered = render(&generator, &json!({"a": 1}), EmitArg::Code, false).unwrap();

        assert_eq!(rendered, r#"a = json_data["a"]"#);
    }

    #[test]
    fn test_render_json_shape() {
        let generator = CodeGenerator::default();

        let rendered = render(&generator, &json!({"items": [10]}), EmitArg::Json, false).unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(
            parsed,
            json!([{
                "identifier": "items_0",
                "path": ["items", 0],
                "expression": "json_data[\"items\"][0]",
                "value": 10
            }])
        );
    }

    #[test]
    fn test_blank_input_is_a_prompt() {
        let dir = scratch_dir("blank");
        let input = write_input(&dir, "  \n");
        let args = Args::parse_from(["json-vars", input.as_str()]);

        let error = run(&args).unwrap_err();

        assert_eq!(failure_report(&error), (0, EMPTY_INPUT_PROMPT.to_string()));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_json_fails() {
        let dir = scratch_dir("invalid");
        let input = write_input(&dir, r#"{"a": }"#);
        let out = dir.join("out.py");
        let out_arg = out.to_string_lossy().to_string();
        let args = Args::parse_from(["json-vars", input.as_str(), "-o", out_arg.as_str()]);

        let error = run(&args).unwrap_err();
        let (status, message) = failure_report(&error);

        assert_eq!(status, 1);
        assert!(message.starts_with("Invalid JSON input"), "{}", message);
        assert!(!out.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_fails() {
        let args = Args::parse_from(["json-vars", "/nonexistent/json-vars/input.json"]);

        let error = run(&args).unwrap_err();
        let (status, message) = failure_report(&error);

        assert_eq!(status, 1);
        assert!(message.starts_with("error: Failed to read input file"), "{}", message);
    }

    #[test]
    fn test_output_creates_parent_dirs() {
        let dir = scratch_dir("output");
        let input = write_input(&dir, r#"{"items": [10, 20]}"#);
        let out = dir.join("nested").join("deeper").join("vars.py");
        let out_arg = out.to_string_lossy().to_string();
        let args = Args::parse_from(["json-vars", input.as_str(), "-o", out_arg.as_str()]);

        run(&args).unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(
            written,
            "items_0 = json_data[\"items\"][0]\nitems_1 = json_data[\"items\"][1]\n"
        );
        let _ = std::fs::remove_dir_all(&dir);
    }
}
