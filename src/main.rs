use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use tour_importer::app::ports::TourSinkPort;
use tour_importer::audit::audit_factors;
use tour_importer::config::{Config, ImportConfig};
use tour_importer::constants::{DEFAULT_WHITE_THRESHOLD, MAX_FACTOR, MIN_FACTOR};
use tour_importer::imaging::{clean_image_file, BackgroundMode};
use tour_importer::infra::{HttpTourSink, JsonLinesSink};
use tour_importer::logging;
use tour_importer::normalize::RowNormalizer;
use tour_importer::pipeline::{ImportPipeline, ProgressOutput};
use tour_importer::source::{IndexedRow, SheetReader};

#[derive(Parser)]
#[command(name = "tour_importer")]
#[command(about = "Import tour spreadsheet exports into the tours API")]
#[command(version = "0.1.0")]
struct Cli {
    /// Config file (defaults to ./tour_importer.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize every row of the export and POST it to the tours API
    Import {
        #[command(flatten)]
        sheet: SheetArgs,
        /// Tours endpoint
        #[arg(long)]
        api_url: Option<String>,
        /// Per-request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Write JSON lines instead of calling the API
        #[arg(long)]
        dry_run: bool,
        /// Dry-run destination (stdout when omitted)
        #[arg(long, requires = "dry_run")]
        output: Option<PathBuf>,
        /// Log the economics of tours whose name contains this text
        #[arg(long)]
        preview: Option<String>,
    },
    /// Report tours whose pricing factors look wrong
    Audit {
        #[command(flatten)]
        sheet: SheetArgs,
    },
    /// Make the background of a logo image transparent
    CleanImage {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = ModeArg::White)]
        mode: ModeArg,
        /// Channel cut-off for white mode
        #[arg(long, default_value_t = DEFAULT_WHITE_THRESHOLD)]
        threshold: u8,
    },
}

#[derive(clap::Args)]
struct SheetArgs {
    /// Spreadsheet export to read
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Header and metadata records before the first data row
    #[arg(long)]
    header_rows: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    White,
    Checkerboard,
}

impl SheetArgs {
    fn apply(self, import: &mut ImportConfig) {
        if let Some(csv) = self.csv {
            import.csv_path = csv;
        }
        if let Some(rows) = self.header_rows {
            import.header_rows = rows;
        }
    }
}

fn read_rows(import: &ImportConfig, progress: ProgressOutput) -> anyhow::Result<Vec<IndexedRow>> {
    progress.line(format_args!("Reading: {}\n", import.csv_path.display()));
    let reader = SheetReader::new(import.delimiter_byte()?, import.header_rows);
    reader
        .read_path(&import.csv_path)
        .with_context(|| format!("failed to read {}", import.csv_path.display()))
}

fn build_sink(import: &ImportConfig, dry_run: bool, output: Option<&Path>) -> anyhow::Result<Box<dyn TourSinkPort>> {
    if !dry_run {
        let sink = HttpTourSink::new(&import.api_url, import.timeout())?;
        info!("Posting tours to {}", sink.api_url());
        return Ok(Box::new(sink));
    }
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            info!("Dry run, writing tours to {}", path.display());
            Ok(Box::new(JsonLinesSink::new(BufWriter::new(file))))
        }
        None => {
            info!("Dry run, writing tours to stdout");
            Ok(Box::new(JsonLinesSink::new(std::io::stdout())))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging(Path::new("logs"));

    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            sheet,
            api_url,
            timeout_secs,
            dry_run,
            output,
            preview,
        } => {
            let mut config = Config::load(cli.config.as_deref())?;
            sheet.apply(&mut config.import);
            if let Some(url) = api_url {
                config.import.api_url = url;
            }
            if let Some(secs) = timeout_secs {
                config.import.timeout_seconds = secs;
            }

            // Records own stdout when a dry run has no output file
            let progress = if dry_run && output.is_none() {
                ProgressOutput::Stderr
            } else {
                ProgressOutput::Stdout
            };

            progress.line("Starting CSV import...");
            let rows = read_rows(&config.import, progress)?;
            let sink = build_sink(&config.import, dry_run, output.as_deref())?;

            let mut pipeline = ImportPipeline::new(sink).with_progress_output(progress);
            if let Some(needle) = preview {
                pipeline = pipeline.with_preview(needle);
            }
            let summary = pipeline.run(&rows).await;

            let rule = "=".repeat(60);
            progress.line(format_args!("\n\n{}", rule));
            progress.line("Import Complete!");
            progress.line(format_args!("Created: {}", summary.created));
            progress.line(format_args!("Failed: {}", summary.failed));
            progress.line(format_args!("Skipped: {}", summary.skipped));
            progress.line(format_args!("{}\n", rule));
        }
        Commands::Audit { sheet } => {
            let mut config = Config::load(cli.config.as_deref())?;
            sheet.apply(&mut config.import);

            let rows = read_rows(&config.import, ProgressOutput::Stdout)?;
            let normalizer = RowNormalizer::new();
            let records: Vec<_> = rows.iter().filter_map(|r| normalizer.normalize(&r.cells)).collect();

            println!(
                "Checking {} tours for factors outside {}-{}...\n",
                records.len(),
                MIN_FACTOR,
                MAX_FACTOR
            );
            let issues = audit_factors(&records);
            for issue in &issues {
                warn!(tour = %issue.id, "Factor out of range");
                println!("Tour ID: {}", issue.id);
                println!("Product: {}", issue.name);
                println!("  Shared Factor: {}", issue.factor_shared);
                println!("  Private Factor: {}", issue.factor_private);
                println!("---");
            }
            println!("Found {} tours with invalid factors", issues.len());
        }
        Commands::CleanImage {
            input,
            output,
            mode,
            threshold,
        } => {
            let mode = match mode {
                ModeArg::White => BackgroundMode::White { threshold },
                ModeArg::Checkerboard => BackgroundMode::Checkerboard,
            };
            println!("Processing {}...", input.display());
            match clean_image_file(&input, &output, mode) {
                Ok(report) => {
                    println!(
                        "Removed background from {} of {} pixels",
                        report.cleared,
                        report.width as u64 * report.height as u64
                    );
                    println!("Saved cleaned image to {}", output.display());
                }
                Err(e) => {
                    error!("Image cleanup failed: {}", e);
                    return Err(e.into());
                }
            }
        }
    }
    Ok(())
}
