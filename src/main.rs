use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use tagtree::{Document, Formatter, OutlineFormatter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input document
    input: PathBuf,

    /// Write the serialized document to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Don't print the outline
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr) // stdout carries the outline
        .init();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    info!("Reading file: {}", args.input.display());
    let mut document = Document::with_path(&args.input);
    if !document.load_file() {
        bail!(
            "failed to load {}: {}",
            args.input.display(),
            document.error().trim_end()
        );
    }

    if !args.quiet {
        if let Some(root) = document.root() {
            let outline = OutlineFormatter
                .format(document.tree(), root)
                .context("rendering outline")?;
            print!("{outline}");
        }
    }

    if let Some(output) = args.output {
        document
            .try_save_file_to(&output)
            .with_context(|| format!("writing {}", output.display()))?;
        info!("Wrote {}", output.display());
    }

    Ok(())
}
