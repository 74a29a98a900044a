use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use env_logger::Env;

use segfit_rs::prelude::*;

/// Fit piecewise models to 20-point segments and print the total reconstruction error.
#[derive(Debug, Parser)]
#[command(name = "segfit", version, about)]
struct Cli {
    /// Headerless two-column (x, y) file; row count must be a multiple of 20.
    file: PathBuf,

    /// Render the segments and fitted curves to an SVG file.
    #[arg(long)]
    plot: bool,

    /// Output path of the plot.
    #[arg(long, value_name = "PATH", default_value = "segments.svg")]
    plot_output: PathBuf,

    /// Candidate models, comma separated.
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [ModelArg::Linear, ModelArg::Cubic, ModelArg::Sine]
    )]
    candidates: Vec<ModelArg>,

    /// Composition of the exponential basis.
    #[arg(long, value_enum, default_value_t = ExponentialArg::Isolated)]
    exponential: ExponentialArg,

    /// Cross-validation strategy.
    #[arg(long, value_enum, default_value_t = CvArg::Loocv)]
    cv: CvArg,

    /// Number of folds for k-fold cross-validation.
    #[arg(long, default_value_t = 5)]
    folds: usize,

    /// Held-out fraction for the hold-out split; test points are drawn at random.
    #[arg(long, default_value_t = 0.2)]
    test_fraction: f64,

    /// Seed for shuffling k-fold and hold-out indices (unseeded k-fold keeps input order).
    #[arg(long)]
    seed: Option<u64>,

    /// Regularization threshold: a non-linear model must beat `threshold * linear error`.
    #[arg(long)]
    threshold: Option<f64>,

    /// Linear solve strategy.
    #[arg(long, value_enum, default_value_t = SolverArg::Svd)]
    solver: SolverArg,

    /// Field delimiter of the input file.
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Write the per-segment report as JSON.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModelArg {
    Linear,
    Quadratic,
    Cubic,
    Sine,
    Exponential,
}

impl From<ModelArg> for BasisKind {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Linear => Linear,
            ModelArg::Quadratic => Quadratic,
            ModelArg::Cubic => Cubic,
            ModelArg::Sine => Sine,
            ModelArg::Exponential => Exponential,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExponentialArg {
    Isolated,
    WithCubic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CvArg {
    Loocv,
    Kfold,
    Holdout,
    InSample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SolverArg {
    Svd,
    NormalEquations,
}

impl Cli {
    fn cv_config(&self) -> CVConfig {
        let config = match self.cv {
            CvArg::Loocv => LOOCV(),
            CvArg::Kfold => KFold(self.folds),
            CvArg::Holdout => HoldOut(self.test_fraction),
            CvArg::InSample => InSample(),
        };
        match self.seed {
            Some(seed) => config.seed(seed),
            None => config,
        }
    }

    fn model(&self) -> Result<SegfitModel<f64>> {
        let candidates: Vec<BasisKind> = self.candidates.iter().map(|&c| c.into()).collect();
        let mut builder = Segfit::new()
            .candidates(&candidates)
            .exponential_mode(match self.exponential {
                ExponentialArg::Isolated => Isolated,
                ExponentialArg::WithCubic => WithCubic,
            })
            .cross_validate(self.cv_config())
            .solver(match self.solver {
                SolverArg::Svd => Svd,
                SolverArg::NormalEquations => NormalEquations,
            });
        if let Some(threshold) = self.threshold {
            builder = builder.threshold(threshold);
        }
        builder.build().context("invalid configuration")
    }

    fn delimiter(&self) -> Result<u8> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got '{}'", self.delimiter);
        }
        Ok(self.delimiter as u8)
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();
}

fn execute(cli: &Cli) -> Result<()> {
    let model = cli.model()?;
    let options = RunOptions {
        delimiter: Some(cli.delimiter()?),
        plot: cli.plot.then_some(cli.plot_output.as_path()),
        report: cli.report.as_deref(),
    };

    let report = run(&cli.file, &model, &options)
        .with_context(|| format!("failed to process {}", cli.file.display()))?;

    println!("{}", report.total_error);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
