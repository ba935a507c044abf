//! Vector sorter CLI

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::LevelFilter;
use u_vecsort_cli::{parse, write_job, ParsedJob, SyntheticGenerator};
use u_vecsort_core::{Point, SortConfig};
use u_vecsort_cutting::{optimize_job, ChainStats};

#[derive(Parser)]
#[command(name = "vecsort")]
#[command(about = "Reorder laser cutter strokes to minimize beam-off travel")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort a vector file and write the command stream
    Sort {
        /// Input vector file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Refinement attempts per pass after greedy sequencing
        #[arg(short, long, default_value = "0", conflicts_with = "auto_refine")]
        refine: usize,

        /// Allow up to twice the pass size in refinement attempts
        #[arg(long)]
        auto_refine: bool,

        /// Head position before the first pass, as X,Y
        #[arg(long, value_parser = parse_point, default_value = "0,0", allow_hyphen_values = true)]
        home: Point,

        /// Write a JSON summary of the run
        #[arg(long)]
        stats_json: Option<PathBuf>,
    },

    /// Print per-pass statistics before and after greedy sequencing
    Stats {
        /// Input vector file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Generate a synthetic vector file
    Generate {
        /// Number of shapes
        #[arg(short, long, default_value = "200")]
        count: usize,

        /// Random seed for reproducibility
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Side length of the square work area
        #[arg(long, default_value = "500")]
        extent: f64,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad X '{}': {}", x, e))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad Y '{}': {}", y, e))?;
    Ok(Point::new(x, y))
}

fn read_job(input: Option<&Path>) -> anyhow::Result<ParsedJob> {
    let job = match input {
        Some(path) => parse(BufReader::new(File::open(path)?))?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            parse(text.as_bytes())?
        }
    };
    Ok(job)
}

fn open_output(output: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        LevelFilter::Error
    } else {
        match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Sort {
            input,
            output,
            refine,
            auto_refine,
            home,
            stats_json,
        } => {
            let parsed = read_job(input.as_deref())?;

            let mut config = SortConfig::new().with_home_position(home);
            config = if auto_refine {
                config.with_auto_refine()
            } else {
                config.with_refine_iterations(refine)
            };

            let result = optimize_job(parsed.passes, &config)?;

            let mut out = open_output(output.as_deref())?;
            write_job(&mut out, &result)?;
            out.flush()?;

            let totals = result.totals();
            log::info!(
                "Sorted {} passes in {}ms: transit {:.3}, efficiency {:.1}%",
                result.passes.len(),
                result.computation_time_ms,
                totals.transit_length,
                totals.efficiency() * 100.0
            );

            if let Some(path) = stats_json {
                let json = serde_json::to_string_pretty(&result.summary())?;
                std::fs::write(&path, json)?;
                log::info!("Summary saved to: {}", path.display());
            }
        }

        Commands::Stats { input } => {
            let parsed = read_job(input.as_deref())?;
            println!(
                "Read {} segments, {} kept",
                parsed.segments_read,
                parsed.segments_kept()
            );

            let result = optimize_job(parsed.passes, &SortConfig::default())?;
            for pass in &result.passes {
                println!("\nPass {} ({} segments)", pass.index, pass.chain.len());
                println!("{:-<40}", "");
                println!("Input order:\n{}", pass.before);
                println!("Sorted:\n{}", pass.after);
            }

            let totals: ChainStats = result.totals();
            println!("\nTotal:\n{}", totals);
        }

        Commands::Generate {
            count,
            seed,
            extent,
            output,
        } => {
            let text = SyntheticGenerator::with_seed(seed)
                .with_extent(extent)
                .generate(count);
            let mut out = open_output(output.as_deref())?;
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }
    }

    Ok(())
}
