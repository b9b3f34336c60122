use crate::utils::{Result, Toggle};
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="strio",
          version=&**FULL_VERSION,
          about="Trio-based Mendelian violation and de novo expansion caller for short tandem repeats",
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Trio Mendelian Violation Caller")]
    Call(CallArgs),
    #[clap(about = "Result Summary Reporter")]
    Summary(SummaryArgs),
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("call")))]
#[command(arg_required_else_help(true))]
pub struct CallArgs {
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "outliers")]
    #[clap(help = "Outlier table produced by the upstream genotyper (plain or gzipped)")]
    #[clap(value_name = "TABLE")]
    #[arg(value_parser = check_file_exists)]
    pub outliers_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'p')]
    #[clap(long = "ped")]
    #[clap(help = "PED file defining the trios")]
    #[clap(value_name = "PED")]
    #[arg(value_parser = check_file_exists)]
    pub ped_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "out")]
    #[clap(help = "Output TSV path")]
    #[clap(value_name = "OUT")]
    #[arg(value_parser = check_output_path)]
    pub output_path: PathBuf,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "wiggle")]
    #[clap(value_name = "PROPORTION")]
    #[clap(help = "Tolerated proportional deviation around a parental allele")]
    #[clap(default_value = "0.1")]
    #[arg(value_parser = ensure_unit_float)]
    pub wiggle: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "minwig")]
    #[clap(value_name = "SIZE")]
    #[clap(help = "Minimum tolerance half-width for small alleles")]
    #[clap(default_value = "10.0")]
    #[arg(value_parser = ensure_non_negative)]
    pub min_wiggle: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "depth")]
    #[clap(value_name = "DEPTH")]
    #[clap(help = "Minimum locus depth required of every trio member")]
    #[clap(default_value = "15.0")]
    pub min_depth: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "ampsize")]
    #[clap(value_name = "SIZE")]
    #[clap(help = "Minimum size excess over both parents to call a novel amplification")]
    #[clap(default_value = "150.0")]
    pub ampsize: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "allele-cutoff")]
    #[clap(value_name = "SIZE")]
    #[clap(help = "Detection ceiling for allele sizes")]
    #[clap(default_value = "350.0")]
    pub allele_cutoff: f64,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "include-dmv")]
    #[clap(value_name = "YES/NO")]
    #[clap(help = "Report amplifications for double Mendelian violations (Yes or No)")]
    #[clap(default_value = "No")]
    pub include_dmv: Toggle,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "include-allele-diff")]
    #[clap(value_name = "YES/NO")]
    #[clap(help = "Add columns with per-allele differences to the closest parental allele (Yes or No)")]
    #[clap(default_value = "No")]
    pub include_allele_diff: Toggle,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("summary")))]
#[command(arg_required_else_help(true))]
pub struct SummaryArgs {
    #[clap(required = true)]
    #[clap(short = 'r')]
    #[clap(long = "results")]
    #[clap(help = "Results TSV written by the call subcommand")]
    #[clap(value_name = "RESULTS")]
    #[arg(value_parser = check_file_exists)]
    pub results_path: PathBuf,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn check_output_path(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(path.to_path_buf())
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid thread number", s))?;
    if thread >= 1 {
        Ok(thread)
    } else {
        Err("Number of threads must be at least 1".into())
    }
}

fn ensure_unit_float(s: &str) -> Result<f64> {
    let value = s
        .parse::<f64>()
        .map_err(|e| format!("Could not parse float: {}", e))?;
    if !(0.0..=1.0).contains(&value) {
        Err(format!(
            "The value must be between 0.0 and 1.0, got: {}",
            value
        ))
    } else {
        Ok(value)
    }
}

fn ensure_non_negative(s: &str) -> Result<f64> {
    let value = s
        .parse::<f64>()
        .map_err(|e| format!("Could not parse float: {}", e))?;
    if value < 0.0 {
        Err(format!("The value must be non-negative, got: {}", value))
    } else {
        Ok(value)
    }
}
