//! End-to-end document assembly checks against the exact webhook payload.

use chrono::{Duration, TimeZone, Utc};
use meltano_monitor::catalog::{EmojiCatalog, NormalizeRule};
use meltano_monitor::db::runs::{FailedRun, JobSummary, ReportRows, RunState};
use meltano_monitor::report::build_document;
use serde_json::json;

#[test]
fn hourly_document_matches_the_webhook_schema() {
    let rows = ReportRows::Hourly(vec![FailedRun {
        job_id: "gitlab-to-snowflake-prod".to_string(),
        state: RunState::Fail,
    }]);
    let generated_at = Utc.with_ymd_and_hms(2022, 2, 1, 9, 0, 0).unwrap();

    let message = build_document(
        generated_at,
        &rows,
        &EmojiCatalog::production(),
        &NormalizeRule::production(),
    )
    .unwrap();

    assert_eq!(
        serde_json::to_value(&message).unwrap(),
        json!({
            "blocks": [
                {
                    "type": "header",
                    "text": {
                        "type": "plain_text",
                        "text": ":alert: Meltano Monitor - Hourly Job Report :alert:"
                    }
                },
                {
                    "type": "context",
                    "elements": [{
                        "type": "mrkdwn",
                        "text": "*February 1, 2022 @ 09:00 UTC*  |  Meltano Job Status"
                    }]
                },
                {
                    "type": "section",
                    "text": {
                        "type": "mrkdwn",
                        "text": " :snowflake: *SNOWFLAKE DATA LOADS* :snowflake:"
                    }
                },
                {
                    "type": "section",
                    "text": {
                        "type": "mrkdwn",
                        "text": "This hourly report shows which jobs have failed within the past hour."
                    }
                },
                { "type": "divider" },
                {
                    "type": "section",
                    "text": {
                        "type": "mrkdwn",
                        "text": ":gitlab: *gitlab-to-snowflake-prod* - :fail:"
                    }
                },
            ]
        })
    );
}

#[test]
fn summary_document_collapses_normalized_rows() {
    let rows = ReportRows::Summary(vec![JobSummary {
        job_id: "clickup-xyz-prod".to_string(),
        success_rate: 0.94,
        avg_run_time: Duration::seconds(125),
    }]);
    let generated_at = Utc.with_ymd_and_hms(2022, 2, 1, 16, 0, 0).unwrap();

    let message = build_document(
        generated_at,
        &rows,
        &EmojiCatalog::production(),
        &NormalizeRule::production(),
    )
    .unwrap();
    let value = serde_json::to_value(&message).unwrap();
    let blocks = value["blocks"].as_array().unwrap();

    assert_eq!(blocks.len(), 7);
    assert_eq!(
        blocks[0]["text"]["text"],
        ":eyes:  Meltano Monitor - 24 Hour Job Summary :eyes:"
    );
    assert_eq!(
        blocks[5],
        json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": ":clickup: *clickup-to-snowflake-prod* - :fail:"
            }
        })
    );
    assert_eq!(
        blocks[6],
        json!({
            "type": "context",
            "elements": [
                { "type": "mrkdwn", "text": "Avg. Run Time: 2 min 5 sec" },
                { "type": "mrkdwn", "text": "Uptime Percentage: 94.0%" },
            ]
        })
    );
}
