use anyhow::Context;
use blm_to_json::{Converter, blm, validate_structure};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "blm-to-json")]
#[command(about = "Convert RightMove BLM feeds to JSON", long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. "debug", "blm_to_json=trace").
    #[arg(long, global = true, default_value = "blm_to_json=info")]
    log_level: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a BLM file to JSON (validates structure while running).
    Convert {
        #[arg(long)]
        blm: PathBuf,

        /// Output file; stdout when omitted.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,
    },
    /// Parse a BLM file and report structural problems without converting.
    Check {
        #[arg(long)]
        blm: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only JSON.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    match cli.cmd {
        Commands::Convert { blm, out, pretty } => {
            let converter = Converter::from_file(&blm)?;
            let json = if pretty {
                converter.as_json_pretty()?
            } else {
                converter.as_json()?
            };

            match out {
                Some(out) => {
                    std::fs::write(&out, json)
                        .with_context(|| format!("write {}", out.display()))?;
                    eprintln!("Wrote {}", out.display());
                }
                None => println!("{}", json),
            }
        }
        Commands::Check { blm } => {
            let doc = blm::read_file(&blm)?;
            validate_structure(&doc.records)
                .with_context(|| format!("check {}", blm.display()))?;
            println!("OK: {} record(s)", doc.records.len());
        }
    }

    Ok(())
}
