use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use jsbundle_core::merge::{MergeOptions, merge_dir};

#[derive(Parser)]
#[command(
    name = "jsmerge",
    version,
    about = "Unify all JavaScript files in a directory. Does not support ES6 exports/modules.",
    after_help = "All output is sent to stdout. Exports should be a newline-separated list\n\
                  of the global-scope objects that should be exported from the given\n\
                  directory; including the generated bundle then puts those objects in\n\
                  the project's global scope."
)]
struct Cli {
    /// Unify all JavaScript files in this directory. Does not recurse.
    directory: Option<PathBuf>,

    /// Wrap the bundle in "use strict"; and a self-invoking function scope.
    #[arg(short, long)]
    wrap: bool,

    /// Read exports from stdin, one name per line. Implies --wrap.
    #[arg(short, long)]
    exports: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let Some(directory) = cli.directory else {
        let program = env::args().next().unwrap_or_else(|| "jsmerge".to_string());
        eprintln!("Usage: {program} [DIRNAME] ... other args ...");
        eprintln!("Sends output to stdout.");
        process::exit(1);
    };

    let exports = if cli.exports {
        read_exports(io::stdin().lock())?
    } else {
        Vec::new()
    };

    let options = MergeOptions {
        wrap: cli.wrap || cli.exports,
        exports,
    };

    let bundle = merge_dir(&directory, &options)?;
    io::stdout()
        .write_all(bundle.as_bytes())
        .context("failed to write bundle to stdout")?;
    Ok(())
}

/// One export name per line; trailing whitespace dropped, blank lines
/// skipped.
fn read_exports(input: impl BufRead) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for line in input.lines() {
        let line = line.context("failed to read export names from stdin")?;
        let name = line.trim_end();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    log::debug!("read {} export names from stdin", names.len());
    Ok(names)
}
