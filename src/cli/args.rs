//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::CsvOptions;

/// Tabscore - Score tabular datasets with fitted preprocessing artifacts and a pretrained model
#[derive(Parser, Debug)]
#[command(name = "tabscore")]
#[command(author, version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input dataset path (CSV or Parquet)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Artifact bundle directory containing pipeline.json and model.json
    #[arg(short, long)]
    pub artifacts: Option<PathBuf>,

    /// Output file path (CSV or Parquet, determined by extension).
    /// Defaults to input directory with '_scored' suffix (e.g., data.csv -> data_scored.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// CSV field separator of the input file
    #[arg(long, default_value = ",", value_parser = validate_separator)]
    pub separator: char,

    /// Parse ',' as the decimal separator (CSV only).
    /// Some exports use ';'-separated fields with decimal commas.
    #[arg(long, default_value = "false")]
    pub decimal_comma: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Higher values improve type detection for ambiguous columns but may be slower.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Absolute tolerance when comparing fitted statistics against new data
    #[arg(long, default_value = "1e-9")]
    pub drift_tolerance: f64,

    /// Abort before writing predictions when any drift check is flagged
    #[arg(long, default_value = "false")]
    pub fail_on_drift: bool,

    /// Skip the drift checks entirely
    #[arg(long, default_value = "false")]
    pub no_drift_check: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare the fitted statistics in an artifact bundle against a new dataset
    Drift {
        /// Input dataset path (CSV or Parquet)
        input: PathBuf,

        /// Artifact bundle directory containing pipeline.json and model.json
        artifacts: PathBuf,

        /// Write the drift report as JSON to this path
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Absolute tolerance when comparing fitted statistics against new data
        #[arg(long, default_value = "1e-9")]
        tolerance: f64,

        /// CSV field separator of the input file
        #[arg(long, default_value = ",", value_parser = validate_separator)]
        separator: char,

        /// Parse ',' as the decimal separator (CSV only)
        #[arg(long, default_value = "false")]
        decimal_comma: bool,

        /// Number of rows to use for schema inference (CSV only)
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },
}

impl Cli {
    /// Get the output path, deriving from input if not explicitly provided.
    /// The derived path will be in the same directory as the input with a '_scored' suffix.
    pub fn output_path(&self) -> Option<PathBuf> {
        let input = self.input.as_ref()?;
        Some(self.output.clone().unwrap_or_else(|| {
            let parent = input.parent().unwrap_or_else(|| std::path::Path::new("."));
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            let extension = input.extension().and_then(|e| e.to_str()).unwrap_or("csv");
            parent.join(format!("{}_scored.{}", stem, extension))
        }))
    }

    /// CSV conventions derived from the flags.
    pub fn csv_options(&self) -> CsvOptions {
        CsvOptions {
            separator: self.separator as u8,
            decimal_comma: self.decimal_comma,
            infer_schema_length: self.infer_schema_length,
        }
    }
}

/// Validator for the separator parameter
fn validate_separator(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err(format!(
            "separator must be a single ASCII character, got '{}'",
            s
        )),
    }
}
