use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use jsbundle_core::split::{split_bundle, write_segment};
use jsbundle_core::term::{ColorConfig, Style};

#[derive(Parser)]
#[command(
    name = "jssplit",
    version,
    about = "Split an annotated bundle back into its original source files",
    after_help = "Output files are written into the current working directory, named per\n\
                  the bundle's markers; content ahead of the first marker goes to\n\
                  setup.js. Existing files are never overwritten."
)]
struct Cli {
    /// Bundle file previously produced by jsmerge.
    file: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let colors = ColorConfig::from_env();
    let cli = Cli::parse();

    let Some(file) = cli.file else {
        colors.cprint("Error! The file name is mandatory!\n", &Style::Red);
        process::exit(1);
    };

    if let Err(err) = run(&file) {
        colors.cprint(&format!("ERROR: {err:#}\n"), &Style::Red);
        process::exit(1);
    }
}

fn run(file: &Path) -> Result<()> {
    let contents =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;

    let segments = split_bundle(&contents);
    if segments.is_empty() {
        log::info!("no segments found in {}", file.display());
    }

    for segment in &segments {
        let path = write_segment(segment, Path::new("."))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}
