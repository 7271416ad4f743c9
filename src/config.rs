//! Environment-driven configuration for a monitor invocation.

use anyhow::Context as _;
use serde::Deserialize;
use std::env;

use crate::catalog::{EmojiCatalog, NormalizeRule};

pub const DEFAULT_DAILY_SUMMARY_HOUR: u32 = 16;

#[derive(Debug)]
pub struct MonitorConfig {
    /// UTC hour that produces the 24-hour summary instead of the failure
    /// report.
    pub daily_summary_hour: u32,
    pub catalog: EmojiCatalog,
    pub normalize: NormalizeRule,
}

/// Shape of the optional TOML file named by `MELTANO_MONITOR_CONFIG`:
/// `[jobs]` and `[status]` icon tables plus a `[normalize]` rule. The file
/// replaces the compiled-in production tables wholesale.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(flatten)]
    catalog: EmojiCatalog,
    normalize: NormalizeRule,
}

impl MonitorConfig {
    pub fn from_env() -> anyhow::Result<MonitorConfig> {
        let daily_summary_hour = match env::var("DAILY_SUMMARY_HOUR") {
            Ok(raw) => {
                let hour: u32 = raw
                    .parse()
                    .context("DAILY_SUMMARY_HOUR must be an hour (0-23)")?;
                anyhow::ensure!(hour < 24, "DAILY_SUMMARY_HOUR must be an hour (0-23)");
                hour
            }
            Err(_) => DEFAULT_DAILY_SUMMARY_HOUR,
        };

        let (catalog, normalize) = match env::var("MELTANO_MONITOR_CONFIG") {
            Ok(path) => {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path))?;
                let file: ConfigFile =
                    toml::from_str(&contents).with_context(|| format!("parsing {}", path))?;
                (file.catalog, file.normalize)
            }
            Err(_) => (EmojiCatalog::production(), NormalizeRule::production()),
        };

        Ok(MonitorConfig {
            daily_summary_hour,
            catalog,
            normalize,
        })
    }
}
