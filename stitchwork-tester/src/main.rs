mod common;
mod spawn;
mod validation;

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use stitchwork_game::{DirectorySource, EmbeddedSource, Forge, ResourceSource};

use common::{OutputTarget, parse_seeds, split_csv};
use spawn::{spawn_parts, write_spawn_report};
use validation::{validate_documents, write_validation_report};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestMode {
    /// Check catalog documents against their schema
    Validate,
    /// Build parts from the catalog and print them
    Spawn,
    /// Validate, then spawn
    Both,
}

#[derive(Debug, Parser)]
#[command(name = "stitchwork-tester", version = "0.1.0")]
#[command(about = "Catalog validation and spawn smoke runs for Stitchwork")]
struct Args {
    /// What to run
    #[arg(long, value_enum, default_value_t = TestMode::Validate)]
    mode: TestMode,

    /// Directory holding parts.jsonc and titles.jsonc (bundled catalogs when omitted)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Documents to validate (comma-separated)
    #[arg(long, default_value = "parts,titles")]
    documents: String,

    /// Parts to spawn (comma-separated, `all` for every catalog entry)
    #[arg(long, default_value = "all")]
    parts: String,

    /// Titles applied to every spawned part, in order (comma-separated)
    #[arg(long, default_value = "")]
    titles: String,

    /// Seeds to spawn with (comma-separated, decimal or 0x-hex)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.output.is_some() {
        colored::control::set_override(false);
    }

    let passed = match &args.data_dir {
        Some(dir) => {
            log::info!("reading catalogs from {}", dir.display());
            run(&args, DirectorySource::new(dir))?
        }
        None => run(&args, EmbeddedSource)?,
    };

    if !passed {
        std::process::exit(1);
    }
    Ok(())
}

fn announce_banner() {
    println!("{}", "🧟 Stitchwork Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn run<S: ResourceSource>(args: &Args, source: S) -> Result<bool> {
    announce_banner();
    let start_time = Instant::now();
    let mut output_target = OutputTarget::new(args.output.clone())?;
    let mut passed = true;

    if matches!(args.mode, TestMode::Validate | TestMode::Both) {
        println!("{}", "📐 Validating catalogs".bright_yellow().bold());
        let documents = split_csv(&args.documents);
        let reports = validate_documents(&source, &documents);
        write_validation_report(&mut output_target, &reports, args.verbose)?;
        passed &= reports.iter().all(validation::DocumentReport::passed);
    }

    if matches!(args.mode, TestMode::Spawn | TestMode::Both) {
        if passed {
            println!("{}", "🧪 Spawning parts".bright_blue().bold());
            let seeds = parse_seeds(&split_csv(&args.seeds))?;
            let forge = Forge::new(source);
            let records = spawn_parts(
                &forge,
                &split_csv(&args.parts),
                &split_csv(&args.titles),
                &seeds,
            )?;
            write_spawn_report(&mut output_target, &records)?;
        } else {
            eprintln!("⚠️  Skipping spawn: catalogs failed validation");
        }
    }

    writeln!(&mut output_target)?;
    writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
    output_target.flush_inner()?;
    Ok(passed)
}
