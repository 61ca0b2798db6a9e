//! Shiplabel CLI - Turn a CSV of shipments into printable labels
//!
//! # Main Commands
//!
//! ```bash
//! shiplabel generate shipments.csv             # Write labels.pdf (4x6)
//! shiplabel generate shipments.csv -f a6 -o out.pdf
//! shiplabel check shipments.csv                # Header check and row flags
//! shiplabel template                           # Print sample.csv
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! shiplabel parse shipments.csv                # Parsed rows as JSON
//! shiplabel preview shipments.csv              # Preview cards as JSON
//! ```
//!
//! `SHIPLABEL_FORMAT` and `SHIPLABEL_OUTPUT` (environment or `.env`) set the
//! defaults for `generate`.

use clap::{Parser, Subcommand};
use log::debug;
use shiplabel::{
    assemble, parse_file, render, validate, CsvStatus, PageFormat, PdfOptions, Settings,
    ValidationError, SAMPLE_CSV, SAMPLE_FILENAME,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "shiplabel")]
#[command(about = "Generate printable shipping labels from a CSV of shipments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a CSV file and output JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check required columns and report flagged rows
    Check {
        /// Input CSV file
        input: PathBuf,
    },

    /// Output preview cards as JSON
    Preview {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate the label PDF
    Generate {
        /// Input CSV file
        input: PathBuf,

        /// Page format: 4x6, a6 or a4-4 (default: SHIPLABEL_FORMAT or 4x6)
        #[arg(short, long)]
        format: Option<PageFormat>,

        /// Output PDF (default: SHIPLABEL_OUTPUT or labels.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the sample CSV template
    Template {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),

        Commands::Check { input } => cmd_check(&input),

        Commands::Preview { input, output } => cmd_preview(&input, output.as_deref()),

        Commands::Generate {
            input,
            format,
            output,
        } => cmd_generate(&input, format, output),

        Commands::Template { output } => cmd_template(output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let result = parse_file(input)?;

    eprintln!("   Encoding: {}", result.encoding);
    eprintln!("   Delimiter: '{}' (auto-detected)", format_delimiter(result.delimiter));
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✅ Parsed {} records", result.records.len());

    let json = serde_json::to_string_pretty(&result.records)?;
    write_output(json.as_bytes(), output)?;

    Ok(())
}

fn cmd_check(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("✔️  Checking: {}", input.display());

    let parsed = parse_file(input)?;
    let records = match validate(parsed.records) {
        Ok(records) => records,
        Err(ValidationError::MissingColumns(cols)) => {
            eprintln!("❌ {}", CsvStatus::MissingColumns(cols));
            std::process::exit(1);
        }
    };

    eprintln!("✅ {}", CsvStatus::Ok);
    eprintln!("   {} Labels Loaded", records.len());

    let flagged: Vec<_> = records.iter().filter(|r| r.is_flagged()).collect();
    if flagged.is_empty() {
        eprintln!("   No flagged rows");
    } else {
        eprintln!("\n⚠️  {} flagged rows:", flagged.len());
        for entry in flagged {
            let mut reasons = Vec::new();
            if entry.flags.duplicate_tracking {
                reasons.push("duplicate tracking");
            }
            if entry.flags.missing_field {
                reasons.push("missing field");
            }
            eprintln!(
                "   Label {} ({}): {}",
                entry.index + 1,
                display_tracking(entry.record.tracking()),
                reasons.join(", ")
            );
        }
    }

    Ok(())
}

fn cmd_preview(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("🔍 Previewing: {}", input.display());

    let records = validate(parse_file(input)?.records)?;
    let preview = render(&records);

    eprintln!("   {}", preview.summary());
    if preview.flagged_count() > 0 {
        eprintln!("   ⚠️  {} flagged", preview.flagged_count());
    }

    let json = serde_json::to_string_pretty(&preview)?;
    write_output(json.as_bytes(), output)?;

    Ok(())
}

fn cmd_generate(
    input: &Path,
    format: Option<PageFormat>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env();
    let format = format.unwrap_or(settings.default_format);
    let output = output.unwrap_or(settings.output);
    debug!("Generating {} labels into {}", format, output.display());

    eprintln!("📄 Processing: {}", input.display());

    let records = validate(parse_file(input)?.records)?;
    eprintln!("   {} Labels Loaded", records.len());
    if records.flagged_count() > 0 {
        eprintln!("   ⚠️  {} flagged rows (run 'shiplabel check' for details)", records.flagged_count());
    }

    let document = assemble(&records, format)?;
    let options = PdfOptions {
        title: input
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| format!("Shipping labels - {}", s))
            .unwrap_or_else(|| PdfOptions::default().title),
        creation_date: Some(chrono::Local::now().date_naive()),
    };

    eprintln!("\n🖨️  Format: {} ({} pages)", format.label(), document.page_count());
    document.save(&output, &options)?;
    eprintln!("💾 Saved to: {}", output.display());

    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_template(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if output.is_none() {
        eprintln!("📋 {}", SAMPLE_FILENAME);
    }
    write_output(SAMPLE_CSV.as_bytes(), output)
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn display_tracking(tracking: &str) -> &str {
    if tracking.trim().is_empty() {
        "no tracking"
    } else {
        tracking
    }
}

fn write_output(content: &[u8], path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", String::from_utf8_lossy(content).trim_end());
        }
    }
    Ok(())
}
