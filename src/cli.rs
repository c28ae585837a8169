// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};

use crate::{
    config::{file as config_file, options::RunOptions},
    core::net::HttpFetcher,
    progress::LogProgress,
    runner, verify,
};

#[derive(Debug, Parser)]
#[command(name = "wordle_data", version, about = "Scrape, reconcile and publish Wordle word lists")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// More log output (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch sources and write artifacts (default)
    Run(RunArgs),
    /// Re-check the artifacts in a data directory
    Verify {
        #[arg(long, value_name = "DIR", default_value = crate::config::consts::DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
    },
}

#[derive(Debug, Default, Clone, Args)]
pub struct RunArgs {
    /// TOML file overriding the built-in sources and paths
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, value_name = "DIR")]
    pub public_dir: Option<PathBuf>,

    /// Skip mirroring the JSON artifacts
    #[arg(long)]
    pub no_mirror: bool,

    /// Minimum cross-source agreement before trusting the intersection
    #[arg(long, value_name = "N")]
    pub min_confidence: Option<usize>,

    /// Generation date stamped into artifacts (default: today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

impl RunArgs {
    /// Defaults, then the config file, then flags.
    pub fn resolve(&self) -> Result<RunOptions> {
        let mut opts = RunOptions::default();

        if let Some(path) = &self.config {
            config_file::load(path)?.apply(&mut opts);
        }
        if let Some(dir) = &self.data_dir {
            opts.output.data_dir = dir.clone();
        }
        if let Some(dir) = &self.public_dir {
            opts.output.public_dir = Some(dir.clone());
        }
        if self.no_mirror {
            opts.output.public_dir = None;
        }
        if let Some(n) = self.min_confidence {
            opts.min_confidence = n;
        }
        if let Some(d) = self.date {
            opts.date = Some(d);
        }
        if let Some(secs) = self.timeout_secs {
            opts.timeout = Duration::from_secs(secs);
        }
        Ok(opts)
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose);

    match cli.command {
        Some(Command::Verify { data_dir }) => {
            let report = verify::verify_dir(&data_dir)
                .wrap_err_with(|| format!("verification of {} failed", data_dir.display()))?;
            for (name, digest) in &report.digests {
                println!("{digest}  {name}");
            }
            println!("allowed={} used={} diff={}", report.allowed, report.used, report.diff);
        }
        Some(Command::Run(args)) => run_pipeline(&args)?,
        None => run_pipeline(&cli.run)?,
    }
    Ok(())
}

fn run_pipeline(args: &RunArgs) -> Result<()> {
    let opts = args.resolve()?;
    let fetcher = HttpFetcher::new(opts.timeout).wrap_err("cannot build HTTP client")?;

    let mut progress = LogProgress::default();
    let summary = runner::run(&opts, &fetcher, Some(&mut progress))?;

    logf!(
        "Reconciled with {} over {} source(s), {} dropped",
        summary.strategy,
        summary.sources_used.len(),
        summary.sources_failed
    );
    for (name, digest) in &summary.digests {
        logd!("{digest}  {name}");
    }
    println!("{}", summary.counts);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_runs_with_defaults() {
        let cli = Cli::try_parse_from(["wordle_data"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.run.resolve().unwrap(), RunOptions::default());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "wordle_data", "run", "--min-confidence", "5", "--date", "2025-10-16",
            "--data-dir", "d", "--no-mirror",
        ])
        .unwrap();
        let Some(Command::Run(args)) = cli.command else { panic!("expected run") };
        let opts = args.resolve().unwrap();
        assert_eq!(opts.min_confidence, 5);
        assert_eq!(opts.date, NaiveDate::from_ymd_opt(2025, 10, 16));
        assert_eq!(opts.output.data_dir, PathBuf::from("d"));
        assert_eq!(opts.output.public_dir, None);
    }

    #[test]
    fn bad_date_rejected() {
        assert!(Cli::try_parse_from(["wordle_data", "--date", "16/10/2025"]).is_err());
    }

    #[test]
    fn top_level_run_flags_rejected_with_subcommand() {
        assert!(Cli::try_parse_from(["wordle_data", "--data-dir", "x", "run"]).is_err());
        assert!(Cli::try_parse_from(["wordle_data", "--data-dir", "x", "verify"]).is_err());
        assert!(Cli::try_parse_from(["wordle_data", "run", "-v", "--data-dir", "x"]).is_ok());
    }

    #[test]
    fn verify_subcommand() {
        let cli = Cli::try_parse_from(["wordle_data", "verify", "--data-dir", "x"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Verify { .. })));
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
