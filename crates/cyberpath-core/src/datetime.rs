use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::messages;
use crate::prefs::Language;

const TIMEZONE_CONFIG_FILE: &str = "cyberpath-time.toml";
const TIMEZONE_ENV_VAR: &str = "CYBERPATH_TIMEZONE";
const TIMEZONE_CONFIG_ENV_VAR: &str = "CYBERPATH_TIME_CONFIG";
const DEFAULT_DISPLAY_TIMEZONE: &str = "Asia/Riyadh";

#[derive(Debug, Deserialize)]
struct TimezoneConfig {
    timezone: Option<String>,
    time: Option<TimezoneSection>,
}

#[derive(Debug, Deserialize)]
struct TimezoneSection {
    timezone: Option<String>,
}

/// Timezone the relative-date buckets are computed in. Resolved once, from
/// the environment, then a config file, then the built-in default.
pub fn display_timezone() -> &'static Tz {
    static DISPLAY_TZ: OnceLock<Tz> = OnceLock::new();
    DISPLAY_TZ.get_or_init(resolve_display_timezone)
}

/// Relative age of a task: same calendar day is "Today", the previous day
/// "Yesterday", anything within a week "N days ago", and older entries an
/// absolute date formatted for the active language.
#[must_use]
pub fn humanize_age(created_at: DateTime<Utc>, now: DateTime<Utc>, language: Language) -> String {
    humanize_age_in(created_at, now, language, display_timezone())
}

fn humanize_age_in(
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
    language: Language,
    tz: &Tz,
) -> String {
    let created = to_date_in(created_at, tz);
    let today = to_date_in(now, tz);
    let days = (today - created).num_days();

    match days {
        0 => messages::age_today(language).to_string(),
        1 => messages::age_yesterday(language).to_string(),
        2..=7 => messages::age_days_ago(language, days),
        _ => format_absolute_in(created_at, language, tz),
    }
}

fn format_absolute_in(dt: DateTime<Utc>, language: Language, tz: &Tz) -> String {
    let local = dt.with_timezone(tz);
    match language {
        Language::En => local.format("%b %-d, %Y").to_string(),
        Language::Ar => local.format("%Y/%m/%d").to_string(),
    }
}

fn to_date_in(dt: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    dt.with_timezone(tz).date_naive()
}

fn resolve_display_timezone() -> Tz {
    if let Ok(raw) = std::env::var(TIMEZONE_ENV_VAR)
        && let Some(tz) = parse_timezone(&raw, TIMEZONE_ENV_VAR)
    {
        return tz;
    }

    if let Some(path) = timezone_config_path()
        && let Some(tz) = load_timezone_from_file(&path)
    {
        return tz;
    }

    parse_timezone(DEFAULT_DISPLAY_TIMEZONE, "DEFAULT_DISPLAY_TIMEZONE").unwrap_or_else(|| {
        tracing::error!("failed to parse fallback timezone; using UTC");
        chrono_tz::UTC
    })
}

fn timezone_config_path() -> Option<PathBuf> {
    if let Ok(raw) = std::env::var(TIMEZONE_CONFIG_ENV_VAR) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    std::env::current_dir()
        .ok()
        .map(|dir| dir.join(TIMEZONE_CONFIG_FILE))
}

fn load_timezone_from_file(path: &PathBuf) -> Option<Tz> {
    if !path.exists() {
        tracing::debug!(file = %path.display(), "timezone config file not found");
        return None;
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::error!(
                file = %path.display(),
                error = %err,
                "failed reading timezone config file"
            );
            return None;
        }
    };

    let parsed = match toml::from_str::<TimezoneConfig>(&raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::error!(
                file = %path.display(),
                error = %err,
                "failed parsing timezone config file"
            );
            return None;
        }
    };

    let timezone = parsed
        .timezone
        .or_else(|| parsed.time.and_then(|section| section.timezone));
    let Some(timezone) = timezone else {
        tracing::warn!(file = %path.display(), "timezone config had no timezone field");
        return None;
    };

    parse_timezone(timezone.as_str(), &format!("file:{}", path.display()))
}

fn parse_timezone(raw: &str, source: &str) -> Option<Tz> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        tracing::warn!(source, "timezone source was empty");
        return None;
    }

    match trimmed.parse::<Tz>() {
        Ok(tz) => {
            tracing::debug!(source, timezone = %trimmed, "resolved display timezone");
            Some(tz)
        }
        Err(err) => {
            tracing::warn!(source, timezone = %trimmed, error = %err, "invalid timezone");
            None
        }
    }
}
