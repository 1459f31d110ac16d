//! Reporter CLI
//!
//! Command-line interface for Reporter app exports:
//! - Inspect the latest or a given day's export
//! - Re-encode exports in the layout they were read from
//! - Derived noise levels and time zone lookups

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use reporter::config::{generate_default_config, Config};
use reporter::integrations::{timezone_for_snapshot, GoogleTimezoneClient, TimezoneConfig};
use reporter::report::{decode_document, decode_file, encode_document_pretty, encode_document_with};
use reporter::source::{FilesystemSource, ReportSource, SourceError};
use reporter::{Day, Snapshot};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "reporter")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Read and re-encode Reporter app daily exports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/reporter/config.toml or ./reporter.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Summary,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarise the export with the newest filename date
    Latest,

    /// Summarise one export file
    Show {
        path: PathBuf,
    },

    /// List exports in the source directory
    List,

    /// Decode and re-encode an export in its own layout
    Reencode {
        path: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Positive-scale noise levels for every snapshot
    Audio {
        /// Export file (default: latest)
        path: Option<PathBuf>,
    },

    /// Time zone of the latest located snapshot
    Timezone {
        /// Export file (default: latest)
        path: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&config);

    match cli.command {
        Commands::Latest => {
            let file = export_source(&config)?.latest_report()?;
            let day = decode_file(&file)?;
            print_day(&day, cli.format)?;
        }

        Commands::Show { path } => {
            let day = load(&path)?;
            print_day(&day, cli.format)?;
        }

        Commands::List => {
            let source = export_source(&config)?;
            let reports = source.list_reports()?;
            match cli.format {
                OutputFormat::Json => {
                    let rows: Vec<_> = reports
                        .iter()
                        .map(|p| {
                            json!({
                                "date": p.date.to_string(),
                                "name": p.name,
                                "path": p.path,
                                "modified": p.modified.map(|m| m.to_rfc3339()),
                            })
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                }
                OutputFormat::Summary => {
                    if reports.is_empty() {
                        println!("No exports in {}", source.storage_dir().display());
                    }
                    for report in &reports {
                        println!("{}  {}", report.date, report.name);
                    }
                }
            }
        }

        Commands::Reencode { path, output } => {
            let day = load(&path)?;
            let policy = config.codec.unknown_schema;
            let bytes = if config.codec.pretty {
                encode_document_pretty(&day, policy)?
            } else {
                encode_document_with(&day, policy)?
            };
            match output {
                Some(out) => {
                    std::fs::write(&out, &bytes)
                        .with_context(|| format!("writing {}", out.display()))?;
                    tracing::info!(path = ?out, schema = %day.schema_version, "Wrote export");
                }
                None => println!("{}", String::from_utf8_lossy(&bytes)),
            }
        }

        Commands::Audio { path } => {
            let day = load_or_latest(&config, path.as_deref())?;
            let mut rows = Vec::new();
            for snapshot in &day.snapshots {
                let Some(audio) = &snapshot.audio else { continue };
                rows.push((
                    snapshot.date.map(|d| d.to_iso8601()),
                    audio.positive_average_db(true)?,
                    audio.positive_peak_db(true)?,
                ));
            }

            match cli.format {
                OutputFormat::Json => {
                    let rows: Vec<_> = rows
                        .iter()
                        .map(|(date, avg, peak)| json!({"date": date, "average": avg, "peak": peak}))
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                }
                OutputFormat::Summary => {
                    println!("{:<26} {:>8} {:>8}", "date", "avg dB", "peak dB");
                    for (date, avg, peak) in &rows {
                        let date = date.as_deref().unwrap_or("-");
                        println!("{:<26} {:>8.2} {:>8.2}", date, avg, peak);
                    }
                }
            }
        }

        Commands::Timezone { path } => {
            let day = load_or_latest(&config, path.as_deref())?;
            let client = GoogleTimezoneClient::new(TimezoneConfig::from(&config.timezone));

            let Some(snapshot) = day.snapshots.iter().rev().find(|s| s.coordinates().is_some())
            else {
                bail!("no snapshot in this export has a location");
            };

            match timezone_for_snapshot(&client, snapshot).await? {
                Some(zone) => println!("{}", zone),
                None => bail!("the located snapshot has no date"),
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("reporter={}", config.logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Decode any JSON file, attaching provenance when it has an export filename
fn load(path: &Path) -> Result<Day> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    match FilesystemSource::new(dir).report_for_path(path) {
        Ok(file) => Ok(decode_file(&file)?),
        Err(SourceError::InvalidFilename(_)) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            Ok(decode_document(&bytes)?)
        }
        Err(e) => Err(e.into()),
    }
}

/// Configured export directory, falling back to the Dropbox app folder
fn export_source(config: &Config) -> Result<FilesystemSource> {
    Ok(match &config.source.dir {
        Some(dir) => FilesystemSource::new(dir),
        None => FilesystemSource::default_location()?,
    })
}

fn load_or_latest(config: &Config, path: Option<&Path>) -> Result<Day> {
    match path {
        Some(path) => load(path),
        None => Ok(decode_file(&export_source(config)?.latest_report()?)?),
    }
}

fn snapshot_summary(snapshot: &Snapshot) -> serde_json::Value {
    json!({
        "date": snapshot.date.map(|d| d.to_iso8601()),
        "impetus": snapshot.report_impetus.map(|i| i.description()),
        "battery": snapshot.battery,
        "steps": snapshot.steps,
        "connection": snapshot.connection.map(|c| c.description()),
        "coordinates": snapshot.coordinates(),
        "responses": snapshot.response_count(),
    })
}

fn print_day(day: &Day, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let summary = json!({
                "name": day.provenance.as_ref().map(|p| p.name.clone()),
                "date": day.date().map(|d| d.to_string()),
                "schema": day.schema_version.to_string(),
                "snapshots": day.snapshot_count(),
                "questions": day.questions().iter().map(|q| q.prompt.clone()).collect::<Vec<_>>(),
                "earliest": day.earliest_snapshot().map(snapshot_summary),
                "latest": day.latest_snapshot().map(snapshot_summary),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Summary => {
            if let Some(provenance) = &day.provenance {
                println!("File:      {}", provenance.path.display());
            }
            println!("Schema:    {}", day.schema_version);
            println!("Snapshots: {}", day.snapshot_count());
            println!("Questions: {}", day.questions().len());

            for (label, snapshot) in [
                ("Earliest", day.earliest_snapshot()),
                ("Latest", day.latest_snapshot()),
            ] {
                let Some(snapshot) = snapshot else { continue };
                let date = snapshot
                    .date
                    .map(|d| d.to_iso8601())
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<10} {}", format!("{}:", label), date);
                if let Some(impetus) = snapshot.report_impetus {
                    println!("           {}", impetus.description());
                }
                if let Some((lat, lon)) = snapshot.coordinates() {
                    println!("           at {:.5}, {:.5}", lat, lon);
                }
            }
        }
    }
    Ok(())
}
