//! Command-line boundary over the confidence-sequence engine (§6): `mean`
//! and `abtest` sub-commands read a declared spec and a tabular stream, fold
//! every row through the recommended method, and print per-row progress plus
//! a final snapshot.

mod dispatch;
mod tabular;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cs_core::cs::{OneSampleCs, TwoSampleCS};
use cs_core::{recommend_ab, recommend_cs};
use cs_types::{Arm, Error, Interval, StructuredError};
use dispatch::AnyOneSample;

#[derive(Parser)]
#[command(name = "cs-cli")]
#[command(author, version, about = "Time-uniform confidence sequences from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Emit every snapshot as a line of JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Track a time-uniform interval/e-process for a single bounded or
    /// Bernoulli stream.
    Mean {
        /// Path to a `StreamSpec` YAML file.
        #[arg(long, env = "CS_STREAM_SPEC")]
        spec: PathBuf,
        /// Path to the tabular data file (newline/comma separated, no header).
        #[arg(long)]
        data: PathBuf,
        /// 0-based column index holding the numeric observation.
        #[arg(long, default_value_t = 0)]
        column: usize,
    },
    /// Track a two-sample mean-difference CS over a paired A/B stream.
    Abtest {
        /// Path to an `ABSpec` YAML file.
        #[arg(long, env = "CS_AB_SPEC")]
        spec: PathBuf,
        /// Path to the tabular data file (newline/comma separated, no header).
        #[arg(long)]
        data: PathBuf,
        /// 0-based column index holding the numeric observation.
        #[arg(long, default_value_t = 0)]
        column: usize,
        /// 0-based column index holding the arm label ("A" or "B").
        #[arg(long, default_value_t = 1)]
        arm_column: usize,
    },
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_writer(std::io::stderr).with_env_filter(filter).init();
}

fn print_interval(iv: &Interval, json: bool) {
    if json {
        println!("{}", serde_json::to_string(iv).unwrap_or_default());
    } else {
        println!(
            "t={:>6}  [{:>10.4}, {:>10.4}]  estimate={:>10.4}  tier={}",
            iv.t, iv.lo, iv.hi, iv.estimate, iv.tier
        );
    }
}

fn run_mean(spec_path: PathBuf, data_path: PathBuf, column: usize, json: bool) -> Result<(), Error> {
    let spec = cs_config::load_stream_spec(&spec_path)?;
    let rec = recommend_cs(&spec, None);
    tracing::info!(method = %rec.method, reason = %rec.reason, "recommended method");
    let mut cs = AnyOneSample::build(&rec.method, spec)?;

    let contents = std::fs::read_to_string(&data_path)?;
    for row in tabular::read_rows(&contents) {
        cs.update(row.field_f64(column))?;
        print_interval(&cs.interval(), json);
    }

    println!("--- final ---");
    print_interval(&cs.interval(), json);
    Ok(())
}

fn run_abtest(
    spec_path: PathBuf,
    data_path: PathBuf,
    column: usize,
    arm_column: usize,
    json: bool,
) -> Result<(), Error> {
    let spec = cs_config::load_ab_spec(&spec_path)?;
    let rec = recommend_ab(&spec, None);
    tracing::info!(method = %rec.method, reason = %rec.reason, "recommended method");
    let method = rec.method.clone();
    let mut cs = TwoSampleCS::new(spec, |s| AnyOneSample::build(&method, s))?;

    let contents = std::fs::read_to_string(&data_path)?;
    for row in tabular::read_rows(&contents) {
        let arm: Arm = row.field_str(arm_column).parse()?;
        cs.update(arm, row.field_f64(column))?;
        print_interval(&cs.interval(), json);
    }

    println!("--- final ---");
    print_interval(&cs.interval(), json);
    Ok(())
}

fn report_error(err: &Error, json: bool) {
    if json {
        eprintln!("{}", StructuredError::from(err).to_json());
    } else {
        eprintln!("{}", cs_types::format_error_human(err, std::io::stderr().is_terminal()));
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Mean { spec, data, column } => run_mean(spec, data, column, cli.json),
        Commands::Abtest {
            spec,
            data,
            column,
            arm_column,
        } => run_abtest(spec, data, column, arm_column, cli.json),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            report_error(&err, cli.json);
            std::process::exit(err.exit_code());
        }
    }
}
