use anyhow::Context as _;
use chrono::Utc;

pub mod catalog;
pub mod config;
pub mod db;
pub mod duration;
pub mod report;
pub mod slack;

use crate::config::MonitorConfig;
use crate::report::ReportMode;
use crate::slack::SlackClient;

/// Everything one invocation needs: the store client, the webhook client
/// and the resolved configuration.
pub struct Context {
    pub db: tokio_postgres::Client,
    pub slack: SlackClient,
    pub config: MonitorConfig,
}

/// What a completed invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The report was assembled and handed to the sink.
    Delivered { records: usize },
    /// The window held nothing newsworthy; no document was built.
    NothingToReport,
}

/// One monitor run: query the window for `mode`, then either deliver the
/// assembled document or stop silently when the result set is empty. With
/// `dry_run` the document is printed instead of posted.
pub async fn run_report(
    ctx: &Context,
    mode: ReportMode,
    dry_run: bool,
) -> anyhow::Result<RunOutcome> {
    let rows = db::runs::fetch(&ctx.db, mode)
        .await
        .context("querying the scheduler metadata store")?;
    if rows.is_empty() {
        return Ok(RunOutcome::NothingToReport);
    }

    let records = rows.len();
    let message = report::build_document(
        Utc::now(),
        &rows,
        &ctx.config.catalog,
        &ctx.config.normalize,
    )?;

    if dry_run {
        println!("{}", serde_json::to_string_pretty(&message)?);
    } else {
        ctx.slack
            .post(&message)
            .await
            .context("delivering the report to the Slack webhook")?;
    }

    Ok(RunOutcome::Delivered { records })
}
