//! johansen CLI: run the Johansen cointegration test on CSV price series.

use clap::{Parser, Subcommand};
use cointegration_analysis::{
    data_loader::{load_series_matrix, write_series_csv, SERIES_COLUMN},
    generate_cointegrated_pair, johansen_test, CointegratedPairConfig, ConfidenceLevel,
    DeterministicOrder, JohansenConfig, StatisticKind,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(Parser)]
#[command(name = "johansen")]
#[command(about = "Johansen cointegration test for multivariate price series")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the test on two or more series files
    Test {
        /// Comma-separated CSV files, one series per file
        #[arg(long, value_delimiter = ',', required = true)]
        files: Vec<PathBuf>,

        /// Number of lagged differences
        #[arg(long, default_value_t = 1)]
        lags: usize,

        /// Deterministic order: -1 none, 0 constant, 1 constant and trend
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        det_order: i32,

        /// Column holding the series values
        #[arg(long, default_value = SERIES_COLUMN)]
        column: String,

        /// Confidence level for the rank decision (90, 95 or 99)
        #[arg(long, default_value_t = 95)]
        confidence: u8,
    },

    /// Write a synthetic cointegrated pair as series1.csv and series2.csv
    Generate {
        /// Directory to write into
        #[arg(long)]
        output_dir: PathBuf,

        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Observations per series
        #[arg(long, default_value_t = 1000)]
        observations: usize,

        /// Per-step drift of the random walk
        #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
        drift: f64,

        /// Standard deviation of the random-walk innovations
        #[arg(long, default_value_t = 1.0)]
        noise_std: f64,

        /// Standard deviation of the deviation from the long-run relation
        #[arg(long, default_value_t = 0.5)]
        cointegration_noise_std: f64,

        /// Long-run multiplier of series2 on series1
        #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
        loading: f64,
    },
}

/// Route the library's `log` records to stderr, `RUST_LOG` overriding the warn default.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Test {
            files,
            lags,
            det_order,
            column,
            confidence,
        } => cmd_test(&files, lags, det_order, &column, confidence),
        Commands::Generate {
            output_dir,
            seed,
            observations,
            drift,
            noise_std,
            cointegration_noise_std,
            loading,
        } => cmd_generate(
            &output_dir,
            CointegratedPairConfig {
                seed,
                observations,
                drift,
                noise_std,
                cointegration_noise_std,
                loading,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_test(
    files: &[PathBuf],
    lags: usize,
    det_order: i32,
    column: &str,
    confidence: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = ConfidenceLevel::from_percent(confidence)?;
    let config = JohansenConfig::new(lags, DeterministicOrder::try_from(det_order)?);
    config.validate()?;

    let series = load_series_matrix(files, column)?;
    let report = johansen_test(&series, &config)?;

    println!("{report}");
    println!("Rank decision at {level}");
    println!(
        "  trace:           {}",
        report.select_rank(StatisticKind::Trace, level)
    );
    println!(
        "  max-eigenvalue:  {}",
        report.select_rank(StatisticKind::MaxEigen, level)
    );
    println!("  combined:        {}", report.cointegration_rank(level));
    if report.rejects_no_cointegration(level) {
        println!("Series are cointegrated at {level}");
    } else {
        println!("No cointegration detected at {level}");
    }

    Ok(())
}

fn cmd_generate(
    output_dir: &Path,
    config: CointegratedPairConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let pair = generate_cointegrated_pair(&config)?;

    std::fs::create_dir_all(output_dir)?;
    let first = output_dir.join("series1.csv");
    let second = output_dir.join("series2.csv");
    write_series_csv(&first, &pair.series1)?;
    write_series_csv(&second, &pair.series2)?;

    println!(
        "Wrote {} observations to {} and {}",
        config.observations,
        first.display(),
        second.display()
    );
    Ok(())
}
