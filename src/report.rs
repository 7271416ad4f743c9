//! The report-assembly engine: mode selection, per-record formatting and
//! document construction.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::catalog::{EmojiCatalog, NormalizeRule};
use crate::db::runs::{FailedRun, JobSummary, ReportRows, RunState};
use crate::duration::format_duration;
use crate::slack::api::{Block, Message, Text};

const BANNER: &str = " :snowflake: *SNOWFLAKE DATA LOADS* :snowflake:";
const CONTEXT_LABEL: &str = "Meltano Job Status";
const AVG_RUN_TIME_PATTERN: &str = "Avg. Run Time: %M min %S sec";

// Strictly greater than: a pipeline sitting at exactly 95.00% is a failure.
const UPTIME_THRESHOLD: f64 = 95.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Hourly,
    DailySummary,
}

impl ReportMode {
    /// Picks the mode for an invocation from the UTC hour: the configured
    /// daily hour produces the 24-hour summary, every other hour the
    /// failure report.
    pub fn for_hour(hour: u32, daily_summary_hour: u32) -> ReportMode {
        if hour == daily_summary_hour {
            ReportMode::DailySummary
        } else {
            ReportMode::Hourly
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportMode::Hourly => ":alert: Meltano Monitor - Hourly Job Report :alert:",
            ReportMode::DailySummary => ":eyes:  Meltano Monitor - 24 Hour Job Summary :eyes:",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ReportMode::Hourly => {
                "This hourly report shows which jobs have failed within the past hour."
            }
            ReportMode::DailySummary => {
                "This Daily Summary Report shows job performance over the last 24 hours \
                 including average run time, average uptime percentage, and a `fail` or \
                 `pass` status if uptime percentage is over 95%."
            }
        }
    }
}

/// Assembles the outbound document: the fixed five-block preamble followed
/// by one fragment per result row, in store order. Any row that cannot be
/// rendered aborts the whole document; a partial report is worse than none.
pub fn build_document(
    generated_at: DateTime<Utc>,
    rows: &ReportRows,
    catalog: &EmojiCatalog,
    rule: &NormalizeRule,
) -> Result<Message> {
    let mode = rows.mode();
    let timestamp = generated_at.format("%B %-d, %Y @ %H:00 UTC");

    let mut blocks = vec![
        Block::header(mode.title()),
        Block::context([Text::mrkdwn(format!("*{}*  |  {}", timestamp, CONTEXT_LABEL))]),
        Block::section(BANNER),
        Block::section(mode.description()),
        Block::Divider,
    ];

    match rows {
        ReportRows::Hourly(runs) => {
            for run in runs {
                blocks.push(failed_run_block(run, catalog, rule)?);
            }
        }
        ReportRows::Summary(summaries) => {
            for summary in summaries {
                let (section, context) = job_summary_blocks(summary, catalog, rule)?;
                blocks.push(section);
                blocks.push(context);
            }
        }
    }

    Ok(Message { blocks })
}

fn failed_run_block(
    run: &FailedRun,
    catalog: &EmojiCatalog,
    rule: &NormalizeRule,
) -> Result<Block> {
    let job_id = rule.canonicalize(&run.job_id);
    let job_emoji = catalog.job_emoji(&job_id)?;
    let status_emoji = catalog.status_emoji(run.state.as_str())?;

    Ok(Block::section(format!(
        "{} *{}* - {}",
        job_emoji, job_id, status_emoji
    )))
}

fn job_summary_blocks(
    summary: &JobSummary,
    catalog: &EmojiCatalog,
    rule: &NormalizeRule,
) -> Result<(Block, Block)> {
    let job_id = rule.canonicalize(&summary.job_id);
    let uptime_pct = round2(summary.success_rate * 100.0);
    let status = if uptime_pct > UPTIME_THRESHOLD {
        RunState::Success
    } else {
        RunState::Fail
    };

    let job_emoji = catalog.job_emoji(&job_id)?;
    let status_emoji = catalog.status_emoji(status.as_str())?;

    let section = Block::section(format!("{} *{}* - {}", job_emoji, job_id, status_emoji));
    let context = Block::context([
        Text::mrkdwn(format_duration(summary.avg_run_time, AVG_RUN_TIME_PATTERN)?),
        Text::mrkdwn(format!("Uptime Percentage: {}%", format_pct(uptime_pct))),
    ]);

    Ok((section, context))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// At most two decimal places, at least one: 94 -> "94.0", 95.67 -> "95.67".
fn format_pct(value: f64) -> String {
    let mut s = format!("{:.2}", value);
    if s.ends_with('0') {
        s.truncate(s.len() - 1);
    }
    s
}
