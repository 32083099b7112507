//! Field mask command line interface
//!
//! Try presets, schemas and validators from a shell.
//!
//! # Usage
//!
//! ```bash
//! # Format a phone number
//! fieldmask process --preset phone 5551234567
//!
//! # Simulate backspacing over a literal
//! fieldmask process --preset phone --caret 9 --previous "(555) 123 45 67" "(555) 12345 67"
//!
//! # Process a field from a schema file, with sibling values
//! fieldmask process --schema payment.yaml --field cvv --value number=378282246310005 1234
//!
//! # Run a validator
//! fieldmask validate tckn 12345678950
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use field_mask::config::{FieldValues, Preset, Schema, SchemaLoader};
use field_mask::processor::{Mode, ProcessingResult};
use field_mask::validators::{DateOrder, ValidatorKind};
use field_mask::{classify, slug};

#[derive(Parser)]
#[command(name = "fieldmask")]
#[command(version = "0.1.0")]
#[command(about = "Format, mask and validate structured text fields")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one edit of a field
    Process {
        /// Built-in preset to use
        #[arg(long, conflicts_with = "schema")]
        preset: Option<Preset>,

        /// Schema file (YAML, or JSON by extension). Defaults to
        /// $FIELDMASK_SCHEMA, then ./fieldmask.yaml
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Field name within the schema
        #[arg(long)]
        field: Option<String>,

        /// Caret position (characters) after the edit
        #[arg(long)]
        caret: Option<usize>,

        /// Display text before the edit
        #[arg(long, default_value = "")]
        previous: String,

        /// Sibling field value as name=value (repeatable)
        #[arg(long = "value")]
        values: Vec<String>,

        /// Text of the input element after the edit
        text: String,
    },

    /// Run a validator against a raw value
    Validate {
        /// Validator name: national-id (tckn), luhn, email, expiry, date, iban, url, tax-id (vkn)
        validator: ValidatorKind,

        value: String,

        /// Field order for the date validator: DMY, MDY or YMD
        #[arg(long, default_value = "DMY")]
        date_order: DateOrder,
    },

    /// Convert text to a username slug
    Slug { text: String },

    /// Classify a card number by issuer
    Classify { number: String },

    /// List the built-in presets
    Presets,
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process {
            preset,
            schema,
            field,
            caret,
            previous,
            values,
            text,
        } => cmd_process(
            preset,
            schema,
            field,
            caret,
            &previous,
            &values,
            &text,
            cli.format,
        ),
        Commands::Validate {
            validator,
            value,
            date_order,
        } => cmd_validate(validator, &value, date_order, cli.format),
        Commands::Slug { text } => cmd_slug(&text, cli.format),
        Commands::Classify { number } => cmd_classify(&number, cli.format),
        Commands::Presets => cmd_presets(cli.format),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn cmd_process(
    preset: Option<Preset>,
    schema_path: Option<PathBuf>,
    field: Option<String>,
    caret: Option<usize>,
    previous: &str,
    values: &[String],
    text: &str,
    format: OutputFormat,
) -> Result<ExitCode> {
    let (schema, field) = match preset {
        Some(preset) => (
            Schema::new().with_field(preset.name(), preset),
            preset.name().to_string(),
        ),
        None => {
            let loader = schema_path.map_or_else(SchemaLoader::from_env, SchemaLoader::new);
            let schema = loader.load()?;
            let field = field.ok_or_else(|| anyhow!("--field is required without --preset"))?;
            (schema, field)
        }
    };

    let values = parse_values(values)?;
    let result = schema
        .process(&field, text, caret, previous, &values)
        .with_context(|| format!("Failed to process field '{}'", field))?;

    print_result(&result, format)?;
    Ok(ExitCode::SUCCESS)
}

fn parse_values(pairs: &[String]) -> Result<FieldValues> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .ok_or_else(|| anyhow!("expected name=value, got '{}'", pair))
        })
        .collect()
}

fn print_result(result: &ProcessingResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Text => {
            println!("{:8} {}", "display".cyan(), result.display.bold());
            println!("{:8} {}", "value".cyan(), result.value);
            println!("{:8} {}", "caret".cyan(), result.caret);
            if let Some(issuer) = result.issuer {
                println!("{:8} {}", "issuer".cyan(), issuer);
            }
        }
    }
    Ok(())
}

fn cmd_validate(
    validator: ValidatorKind,
    value: &str,
    date_order: DateOrder,
    format: OutputFormat,
) -> Result<ExitCode> {
    let valid = validator.check(value, date_order);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "validator": validator.name(),
                "valid": valid,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            if valid {
                println!("{} valid {}", "OK".green().bold(), validator);
            } else {
                println!("{} not a valid {}", "FAIL".red().bold(), validator);
            }
        }
    }

    Ok(if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_slug(text: &str, format: OutputFormat) -> Result<ExitCode> {
    let slug = slug::slugify(text);
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "slug": slug })),
        OutputFormat::Text => println!("{}", slug),
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_classify(number: &str, format: OutputFormat) -> Result<ExitCode> {
    let issuer = classify(number);
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "issuer": issuer })),
        OutputFormat::Text => println!("{}", issuer),
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_presets(format: OutputFormat) -> Result<ExitCode> {
    let rows: Vec<_> = Preset::ALL
        .into_iter()
        .map(|preset| {
            let config = preset.config();
            let mode = format!("{:?}", Mode::for_config(&config)).to_lowercase();
            let validator = config
                .validator
                .as_ref()
                .and_then(|v| serde_json::to_value(v).ok());
            (preset, mode, config.mask, validator)
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let output: Vec<_> = rows
                .iter()
                .map(|(preset, mode, mask, validator)| {
                    serde_json::json!({
                        "name": preset.name(),
                        "mode": mode,
                        "mask": mask,
                        "validator": validator,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            for (preset, mode, mask, validator) in &rows {
                let validator = validator
                    .as_ref()
                    .and_then(|v| v.as_str())
                    .unwrap_or("-");
                println!(
                    "{:12} {:9} {:32} {}",
                    preset.name().green().bold(),
                    mode,
                    mask.as_deref().unwrap_or("-"),
                    validator.dimmed()
                );
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
