//! ashare-daily - A-share daily deep-dive report generator

use anyhow::Result;
use ashare_cli::{run_case, run_daily};
use ashare_core::ReportConfig;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ashare-daily")]
#[command(about = "Generate the A-share daily deep-dive report")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the daily report
    Daily {
        /// Report date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Generate a single-stock case study
    Case {
        /// Stock code, e.g. 688031
        #[arg(long)]
        code: String,

        /// Stock name used in the title and file name
        #[arg(long)]
        name: String,

        /// Report date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn main() -> Result<()> {
    let loaded = ReportConfig::load();
    let config = &loaded.config;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!("ashare-daily v{}", env!("CARGO_PKG_VERSION"));
    loaded.log();
    info!(
        stocks = %config.paths.stocks.display(),
        output_dir = %config.paths.output_dir.display(),
        "Configuration loaded"
    );

    let cli = Cli::parse();
    let today = Local::now().date_naive();

    let result = match cli.command {
        Commands::Daily { date } => run_daily(config, date.unwrap_or(today)),
        Commands::Case { code, name, date } => run_case(config, &code, &name, date.unwrap_or(today)),
    };

    match result {
        Ok(path) => {
            println!("{}", path.display());
            Ok(())
        }
        Err(e) => {
            error!(error = %format!("{:#}", e), "Report generation failed");
            Err(e)
        }
    }
}
