use chrono::{Timelike, Utc};
use clap::Parser;
use meltano_monitor::config::MonitorConfig;
use meltano_monitor::report::ReportMode;
use meltano_monitor::slack::SlackClient;
use meltano_monitor::{Context, RunOutcome, db, run_report};

/// Posts Meltano job status reports to Slack. Intended to run from cron
/// once an hour, after the scheduled pipeline syncs.
#[derive(Parser, Debug)]
struct Opt {
    /// If specified, the document is printed instead of posted.
    #[arg(long)]
    dry_run: bool,

    /// Force a report mode instead of deriving it from the clock.
    #[arg(long, value_enum)]
    mode: Option<Mode>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Hourly,
    Summary,
}

impl From<Mode> for ReportMode {
    fn from(mode: Mode) -> ReportMode {
        match mode {
            Mode::Hourly => ReportMode::Hourly,
            Mode::Summary => ReportMode::DailySummary,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let opt = Opt::parse();
    if let Err(e) = run(opt).await {
        tracing::error!("monitor run failed: {:?}", e);
        std::process::exit(1);
    }
}

async fn run(opt: Opt) -> anyhow::Result<()> {
    let config = MonitorConfig::from_env()?;
    let mode = opt
        .mode
        .map(ReportMode::from)
        .unwrap_or_else(|| ReportMode::for_hour(Utc::now().hour(), config.daily_summary_hour));

    let db = db::connect_from_env().await?;
    let slack = SlackClient::new_from_env()?;
    let ctx = Context { db, slack, config };

    match run_report(&ctx, mode, opt.dry_run).await? {
        RunOutcome::Delivered { records } => {
            tracing::info!("delivered {:?} report with {} records", mode, records);
        }
        RunOutcome::NothingToReport => {
            tracing::info!("no records in the {:?} window, skipping delivery", mode);
        }
    }

    Ok(())
}
