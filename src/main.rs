//! keil2qt CLI.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use keil2qt::convert::NOT_FOUND_MESSAGE;
use keil2qt::{ConvertOptions, Converter, TargetNamePolicy, logger};

#[derive(Debug, Parser)]
#[command(name = "keil2qt")]
#[command(about = "Convert a Keil .uvprojx project into a Qt Creator .pro project")]
struct Cli {
    /// Directory searched for the .uvprojx file.
    #[arg(short = 'C', long, default_value = ".")]
    dir: PathBuf,

    /// Use this .uvprojx file instead of searching.
    #[arg(short, long)]
    project: Option<PathBuf>,

    /// Directory the .pro file is written to (defaults to the project's).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Fail when the project declares more than one <TargetName>.
    #[arg(long)]
    strict_target: bool,

    /// Print the generated project without writing it.
    #[arg(long)]
    dry_run: bool,

    /// Wait for Enter before exiting.
    #[arg(long)]
    pause: bool,

    #[arg(short, long, help = "Enable verbose output")]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            root: self.dir.clone(),
            project: self.project.clone(),
            output_dir: self.output_dir.clone(),
            target_policy: if self.strict_target {
                TargetNamePolicy::Unique
            } else {
                TargetNamePolicy::LastMatch
            },
            dry_run: self.dry_run,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    let result = Converter::new(cli.options())
        .run_with(|content| println!("{content}"))
        .with_context(|| format!("converting Keil project in {}", cli.dir.display()));

    if let Ok(None) = &result {
        println!("{NOT_FOUND_MESSAGE}");
    }

    if cli.pause {
        wait_for_enter();
    }

    result.map(|_| ())
}

fn wait_for_enter() {
    eprintln!("Press Enter to continue...");
    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line);
}
