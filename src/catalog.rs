//! Identifier normalization and the icon catalog for rendered reports.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

/// Collapses provider-specific scheduler identifiers onto the canonical
/// production pipeline name used for display and icon lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeRule {
    marker: String,
    canonical: String,
}

impl NormalizeRule {
    pub fn production() -> Self {
        NormalizeRule {
            marker: "clickup".to_string(),
            canonical: "clickup-to-snowflake-prod".to_string(),
        }
    }

    /// Any identifier containing the marker collapses to the canonical id;
    /// everything else passes through unchanged.
    pub fn canonicalize<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        if raw.contains(&self.marker) {
            self.canonical.clone().into()
        } else {
            raw.into()
        }
    }
}

/// Icon tables for the production pipelines and run statuses. The catalog is
/// closed: a miss means a pipeline was deployed without the catalog being
/// updated, and the report must abort rather than mislabel the job.
#[derive(Debug, Clone, Deserialize)]
pub struct EmojiCatalog {
    jobs: HashMap<String, String>,
    status: HashMap<String, String>,
}

impl EmojiCatalog {
    pub fn production() -> Self {
        let jobs = [
            ("salesforce-to-snowflake-prod", ":salesforce:"),
            ("meltano-to-snowflake-prod", ":postgresql:"),
            ("gitlab-to-snowflake-prod", ":gitlab:"),
            (
                "tap-sheet-feature-usage-to-snowflake-prod",
                ":google_spreadsheets:",
            ),
            ("clickup-to-snowflake-prod", ":clickup:"),
            ("metadata-to-snowflake-prod", ":postgresql:"),
            ("daily-aws-cost-to-snowflake-prod", ":aws:"),
            ("hourly-aws-cost-to-snowflake-prod", ":aws:"),
        ];
        let status = [("SUCCESS", ":pass:"), ("FAIL", ":fail:")];

        EmojiCatalog {
            jobs: jobs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            status: status
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn job_emoji(&self, canonical_id: &str) -> Result<&str, CatalogError> {
        self.jobs
            .get(canonical_id)
            .map(String::as_str)
            .ok_or_else(|| CatalogError::UnknownJob(canonical_id.to_string()))
    }

    pub fn status_emoji(&self, status: &str) -> Result<&str, CatalogError> {
        self.status
            .get(status)
            .map(String::as_str)
            .ok_or_else(|| CatalogError::UnknownStatus(status.to_string()))
    }
}

#[derive(Debug)]
pub enum CatalogError {
    UnknownJob(String),
    UnknownStatus(String),
}

impl std::error::Error for CatalogError {}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CatalogError::UnknownJob(id) => {
                write!(f, "no icon registered for job `{}`", id)
            }
            CatalogError::UnknownStatus(status) => {
                write!(f, "no icon registered for status `{}`", status)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_collapses_to_canonical() {
        let rule = NormalizeRule::production();
        assert_eq!(rule.canonicalize("clickup-xyz-prod"), "clickup-to-snowflake-prod");
        assert_eq!(
            rule.canonicalize("tap-clickup-to-snowflake-prod"),
            "clickup-to-snowflake-prod"
        );
    }

    #[test]
    fn other_identifiers_pass_through() {
        let rule = NormalizeRule::production();
        assert_eq!(
            rule.canonicalize("gitlab-to-snowflake-prod"),
            "gitlab-to-snowflake-prod"
        );
        assert_eq!(rule.canonicalize(""), "");
    }

    #[test]
    fn production_catalog_covers_every_pipeline() {
        let catalog = EmojiCatalog::production();
        for job in [
            "salesforce-to-snowflake-prod",
            "meltano-to-snowflake-prod",
            "gitlab-to-snowflake-prod",
            "tap-sheet-feature-usage-to-snowflake-prod",
            "clickup-to-snowflake-prod",
            "metadata-to-snowflake-prod",
            "daily-aws-cost-to-snowflake-prod",
            "hourly-aws-cost-to-snowflake-prod",
        ] {
            assert!(catalog.job_emoji(job).is_ok(), "missing icon for {}", job);
        }
        assert_eq!(catalog.status_emoji("SUCCESS").unwrap(), ":pass:");
        assert_eq!(catalog.status_emoji("FAIL").unwrap(), ":fail:");
    }

    #[test]
    fn unknown_keys_are_errors() {
        let catalog = EmojiCatalog::production();
        assert!(matches!(
            catalog.job_emoji("brand-new-pipeline-prod"),
            Err(CatalogError::UnknownJob(_))
        ));
        assert!(matches!(
            catalog.status_emoji("RUNNING"),
            Err(CatalogError::UnknownStatus(_))
        ));
    }
}
