//! Pager behaviour knobs shared by the browser adapter and the CLI.

use serde::{Deserialize, Serialize};

pub const DEFAULT_POLL_INTERVAL_MS: u32 = 500;
pub const DEFAULT_BOTTOM_SLACK_PX: f64 = 20.0;
pub const DEFAULT_TOP_ZONE_PX: f64 = 51.0;
pub const DEFAULT_HEADING_LEAD_PX: f64 = 27.0;

/// How the browser adapter learns about fragment navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HashWatch {
    /// Native `hashchange` notifications.
    #[default]
    Event,
    /// Self-rescheduling timer reading `location.hash`.
    Poll,
}

/// Scroll thresholds, in CSS pixels, used to pick the active sidebar item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollThresholds {
    pub bottom_slack: f64,
    pub top_zone: f64,
    pub heading_lead: f64,
}

impl Default for ScrollThresholds {
    fn default() -> Self {
        Self {
            bottom_slack: DEFAULT_BOTTOM_SLACK_PX,
            top_zone: DEFAULT_TOP_ZONE_PX,
            heading_lead: DEFAULT_HEADING_LEAD_PX,
        }
    }
}

/// CSS selectors and ids forming the archive's DOM contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selectors {
    pub content: String,
    pub article: String,
    pub heading: String,
    pub sidebar: String,
    pub sidebar_bottom: String,
    pub footer: String,
    /// Id given to the inserted pagination container.
    pub pagination_id: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            content: "#content".to_string(),
            article: ".article".to_string(),
            heading: ".article-header h1".to_string(),
            sidebar: "#articles-sidebar".to_string(),
            sidebar_bottom: "#articles-sidebar-item-bottom".to_string(),
            footer: "#footer".to_string(),
            pagination_id: "pagination".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct PagerSettings {
    pub selectors: Selectors,
    pub thresholds: ScrollThresholds,
    pub hash_watch: HashWatch,
    pub poll_interval: PollInterval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PollInterval(u32);

impl PollInterval {
    pub fn new(millis: u32) -> Option<Self> {
        (millis > 0).then_some(Self(millis))
    }

    pub fn millis(self) -> u32 {
        self.0
    }
}

impl Default for PollInterval {
    fn default() -> Self {
        Self(DEFAULT_POLL_INTERVAL_MS)
    }
}

/// Partially specified pager options, as found in config files or `mount` options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPagerOptions {
    #[serde(alias = "hashWatch")]
    pub hash_watch: Option<HashWatch>,
    #[serde(alias = "pollIntervalMs")]
    pub poll_interval_ms: Option<u32>,
    #[serde(alias = "bottomSlackPx")]
    pub bottom_slack_px: Option<f64>,
    #[serde(alias = "topZonePx")]
    pub top_zone_px: Option<f64>,
    #[serde(alias = "headingLeadPx")]
    pub heading_lead_px: Option<f64>,
    pub selectors: RawSelectors,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSelectors {
    pub content: Option<String>,
    pub article: Option<String>,
    pub heading: Option<String>,
    pub sidebar: Option<String>,
    #[serde(alias = "sidebarBottom")]
    pub sidebar_bottom: Option<String>,
    pub footer: Option<String>,
    #[serde(alias = "paginationId")]
    pub pagination_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid pager option `{key}`: {reason}")]
pub struct OptionError {
    pub key: &'static str,
    pub reason: String,
}

impl OptionError {
    fn new(key: &'static str, reason: impl Into<String>) -> Self {
        Self {
            key,
            reason: reason.into(),
        }
    }
}

impl PagerSettings {
    pub fn from_raw(raw: RawPagerOptions) -> Result<Self, OptionError> {
        let RawPagerOptions {
            hash_watch,
            poll_interval_ms,
            bottom_slack_px,
            top_zone_px,
            heading_lead_px,
            selectors,
        } = raw;

        let poll_interval = match poll_interval_ms {
            Some(value) => PollInterval::new(value)
                .ok_or_else(|| OptionError::new("poll_interval_ms", "must be greater than zero"))?,
            None => PollInterval::default(),
        };

        let defaults = ScrollThresholds::default();
        let thresholds = ScrollThresholds {
            bottom_slack: non_negative(bottom_slack_px, defaults.bottom_slack, "bottom_slack_px")?,
            top_zone: non_negative(top_zone_px, defaults.top_zone, "top_zone_px")?,
            heading_lead: non_negative(heading_lead_px, defaults.heading_lead, "heading_lead_px")?,
        };

        Ok(Self {
            selectors: build_selectors(selectors)?,
            thresholds,
            hash_watch: hash_watch.unwrap_or_default(),
            poll_interval,
        })
    }
}

fn non_negative(value: Option<f64>, default: f64, key: &'static str) -> Result<f64, OptionError> {
    match value {
        Some(px) if px.is_finite() && px >= 0.0 => Ok(px),
        Some(_) => Err(OptionError::new(key, "must be a finite, non-negative pixel value")),
        None => Ok(default),
    }
}

fn build_selectors(raw: RawSelectors) -> Result<Selectors, OptionError> {
    let defaults = Selectors::default();
    Ok(Selectors {
        content: selector(raw.content, defaults.content, "selectors.content")?,
        article: selector(raw.article, defaults.article, "selectors.article")?,
        heading: selector(raw.heading, defaults.heading, "selectors.heading")?,
        sidebar: selector(raw.sidebar, defaults.sidebar, "selectors.sidebar")?,
        sidebar_bottom: selector(
            raw.sidebar_bottom,
            defaults.sidebar_bottom,
            "selectors.sidebar_bottom",
        )?,
        footer: selector(raw.footer, defaults.footer, "selectors.footer")?,
        pagination_id: selector(
            raw.pagination_id,
            defaults.pagination_id,
            "selectors.pagination_id",
        )?,
    })
}

fn selector(value: Option<String>, default: String, key: &'static str) -> Result<String, OptionError> {
    match value {
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(OptionError::new(key, "selector must not be empty"))
            } else {
                Ok(trimmed.to_string())
            }
        }
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_archive_contract() {
        let settings = PagerSettings::from_raw(RawPagerOptions::default()).expect("defaults");
        assert_eq!(settings.poll_interval.millis(), 500);
        assert_eq!(settings.hash_watch, HashWatch::Event);
        assert_eq!(settings.thresholds.bottom_slack, 20.0);
        assert_eq!(settings.thresholds.top_zone, 51.0);
        assert_eq!(settings.thresholds.heading_lead, 27.0);
        assert_eq!(settings.selectors.heading, ".article-header h1");
    }

    #[test]
    fn camel_case_aliases_are_accepted() {
        let raw: RawPagerOptions = serde_json::from_str(
            r##"{"hashWatch":"poll","pollIntervalMs":250,"selectors":{"sidebarBottom":"#end"}}"##,
        )
        .expect("options parse");
        let settings = PagerSettings::from_raw(raw).expect("valid options");
        assert_eq!(settings.hash_watch, HashWatch::Poll);
        assert_eq!(settings.poll_interval.millis(), 250);
        assert_eq!(settings.selectors.sidebar_bottom, "#end");
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let raw = RawPagerOptions {
            poll_interval_ms: Some(0),
            ..Default::default()
        };
        let err = PagerSettings::from_raw(raw).expect_err("zero interval rejected");
        assert_eq!(err.key, "poll_interval_ms");
    }

    #[test]
    fn blank_selector_is_rejected() {
        let raw = RawPagerOptions {
            selectors: RawSelectors {
                article: Some("  ".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = PagerSettings::from_raw(raw).expect_err("blank selector rejected");
        assert_eq!(err.key, "selectors.article");
    }
}
