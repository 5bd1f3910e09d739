//! Command-line entry point.
//!
//! Run with: `cargo run -p bromastub -- [INPUTS]... --out <DIR>`

use anyhow::{Context, Result};
use bromastub::codegen::{GeneratorConfig, default_inputs, generate_from_str, read_sources};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Description files, concatenated in order
    /// [default: .temp/Cocos2d.bro .temp/GeometryDash.bro .temp/Extras.bro]
    inputs: Vec<PathBuf>,

    /// Directory the headers/, src/ and .vscode/ trees are written under
    #[arg(long, short, default_value = ".")]
    out: PathBuf,

    /// Skip writing .vscode/c_cpp_properties.json
    #[arg(long)]
    no_ide_config: bool,

    /// Also write the concatenated description to this file
    #[arg(long, value_name = "FILE")]
    dump_merged: Option<PathBuf>,
}

impl Cli {
    fn inputs(&self) -> Vec<PathBuf> {
        if self.inputs.is_empty() {
            default_inputs()
        } else {
            self.inputs.clone()
        }
    }

    fn config(&self) -> GeneratorConfig {
        GeneratorConfig::new()
            .output_root(&self.out)
            .ide_config(!self.no_ide_config)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let inputs = cli.inputs();
    let source = read_sources(&inputs).context("failed to read descriptions")?;

    if let Some(path) = &cli.dump_merged {
        std::fs::write(path, &source)
            .with_context(|| format!("failed to write merged description to {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote merged description");
    }

    let report = generate_from_str(&source, cli.config()).context("generation failed")?;
    tracing::info!(
        headers = report.headers.len(),
        sources = report.sources.len(),
        delegates = report.delegates.len(),
        warnings = report.diagnostics.len(),
        umbrella = %report.umbrella.display(),
        "generation complete"
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    run(&Cli::parse())
}
