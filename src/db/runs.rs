//! Read-only queries over the scheduler's `job` table.

use anyhow::{Context as _, Result};
use chrono::Duration;
use std::fmt;
use std::str::FromStr;
use tokio_postgres::Client as DbClient;

use crate::report::ReportMode;

/// Terminal state of a scheduler run. `RUNNING` rows are excluded by the
/// queries and are not representable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Success,
    Fail,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Success => "SUCCESS",
            RunState::Fail => "FAIL",
        }
    }
}

impl FromStr for RunState {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<RunState> {
        match s {
            "SUCCESS" => Ok(RunState::Success),
            "FAIL" => Ok(RunState::Fail),
            other => anyhow::bail!("unexpected run state `{}`", other),
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One production job execution that failed within the current hour.
#[derive(Debug, Clone)]
pub struct FailedRun {
    pub job_id: String,
    pub state: RunState,
}

/// Per-job aggregates over the trailing 24 hours.
#[derive(Debug, Clone)]
pub struct JobSummary {
    pub job_id: String,
    pub success_rate: f64,
    pub avg_run_time: Duration,
}

/// Result rows tagged with the mode whose query produced them, so the
/// formatting branch can never disagree with the query shape.
#[derive(Debug)]
pub enum ReportRows {
    Hourly(Vec<FailedRun>),
    Summary(Vec<JobSummary>),
}

impl ReportRows {
    pub fn mode(&self) -> ReportMode {
        match self {
            ReportRows::Hourly(_) => ReportMode::Hourly,
            ReportRows::Summary(_) => ReportMode::DailySummary,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ReportRows::Hourly(rows) => rows.len(),
            ReportRows::Summary(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Issues the one query appropriate to `mode`.
pub async fn fetch(db: &DbClient, mode: ReportMode) -> Result<ReportRows> {
    match mode {
        ReportMode::Hourly => Ok(ReportRows::Hourly(failed_runs_this_hour(db).await?)),
        ReportMode::DailySummary => Ok(ReportRows::Summary(job_summaries_last_day(db).await?)),
    }
}

pub async fn failed_runs_this_hour(db: &DbClient) -> Result<Vec<FailedRun>> {
    tracing::trace!("failed_runs_this_hour");

    let rows = db
        .query(
            "SELECT job_id, state FROM job \
             WHERE started_at >= date_trunc('hour', now()) \
               AND state = 'FAIL' \
               AND job_id LIKE '%prod%'",
            &[],
        )
        .await
        .context("Getting failed runs")?;

    let mut data = Vec::with_capacity(rows.len());
    for row in rows {
        let job_id: String = row.get(0);
        let state: String = row.get(1);

        data.push(FailedRun {
            job_id,
            state: state.parse()?,
        });
    }

    Ok(data)
}

// The success indicator and run time are averaged in SQL and cast to float8;
// tokio-postgres has no mapping for NUMERIC or INTERVAL values.
pub async fn job_summaries_last_day(db: &DbClient) -> Result<Vec<JobSummary>> {
    tracing::trace!("job_summaries_last_day");

    let rows = db
        .query(
            "WITH job_data AS ( \
                 SELECT job_id, \
                        CASE WHEN state = 'SUCCESS' THEN 1.0 ELSE 0.0 END AS success, \
                        ended_at - started_at AS run_time \
                 FROM job \
                 WHERE started_at >= now() - INTERVAL '24 hours' \
                   AND state != 'RUNNING' \
             ) \
             SELECT job_id, \
                    avg(success)::float8, \
                    extract(epoch FROM avg(run_time))::float8 \
             FROM job_data \
             WHERE job_id LIKE '%prod%' \
             GROUP BY job_id",
            &[],
        )
        .await
        .context("Getting job summaries")?;

    let mut data = Vec::with_capacity(rows.len());
    for row in rows {
        let job_id: String = row.get(0);
        let success_rate: f64 = row.try_get(1).context("averaging the success indicator")?;
        let avg_seconds: f64 = row.try_get(2).context("averaging the run time")?;

        data.push(JobSummary {
            job_id,
            success_rate,
            avg_run_time: Duration::seconds(avg_seconds as i64),
        });
    }

    Ok(data)
}
