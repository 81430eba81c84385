// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de;

use crate::{Schedule, TimeSlot};

/// The name of the slate application.
pub const APP_NAME: &str = "slate";

/// Configuration for the slate application.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct Config {
    /// Directory for the event database. Defaults to the user state
    /// directory when unset.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Start slot for fresh event drafts, e.g. "09:00".
    #[serde(default)]
    pub default_start: Option<TimeSlot>,

    /// Duration for fresh event drafts, e.g. "1h", "90m" or "01:30".
    /// Rounded up to whole half-hour slots.
    #[serde(default)]
    pub default_duration: Option<ConfigDuration>,
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(
                    expand_path(a)
                        .map_err(|e| format!("Failed to expand state directory path: {e}"))?,
                )
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!("Failed to get state directory: {e}"),
            },
        };

        Ok(())
    }

    /// The start slot for fresh drafts, falling back to 09:00.
    pub fn default_start(&self) -> TimeSlot {
        self.default_start.unwrap_or(Schedule::DEFAULT_START)
    }

    /// The duration for fresh drafts in slots, falling back to one hour.
    pub fn default_duration_slots(&self) -> u8 {
        self.default_duration
            .map(|a| a.slots())
            .unwrap_or(Schedule::DEFAULT_DURATION_SLOTS)
    }
}

/// A duration measured in half-hour slots.
#[derive(Debug, Clone, Copy)]
pub struct ConfigDuration(u8);

impl ConfigDuration {
    pub fn slots(&self) -> u8 {
        self.0
    }
}

impl<'de> serde::Deserialize<'de> for ConfigDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DurationVisitor;

        impl de::Visitor<'_> for DurationVisitor {
            type Value = ConfigDuration;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(r#"a duration string like "HH:MM", "2h" or "90m""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_duration_slots(value)
                    .map(ConfigDuration)
                    .map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(DurationVisitor)
    }
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle state directories
    let state_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_STATE_HOME/", "${XDG_STATE_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in state_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_state_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or("User-specific home directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or("User-specific state directory not found".into())
}

/// Parse a duration string in the format "HH:MM" / "2h" / "90m" and round
/// it up to whole half-hour slots.
fn parse_duration_slots(s: &str) -> Result<u8, Box<dyn Error>> {
    let minutes: i64 = if let Some((h, m)) = s.split_once(':') {
        let hours: i64 = h.trim().parse()?;
        let minutes: i64 = m.trim().parse()?;
        hours * 60 + minutes
    } else if let Some(rest) = s.strip_suffix("h") {
        let hours: i64 = rest.trim().parse()?;
        hours * 60
    } else if let Some(rest) = s.strip_suffix("m") {
        rest.trim().parse()?
    } else {
        return Err(format!("Invalid duration format: {s}").into());
    };

    if minutes <= 0 {
        return Err(format!("Duration must be positive: {s}").into());
    }

    let slots = (minutes + 29) / 30;
    if slots >= i64::from(TimeSlot::PER_DAY) {
        return Err(format!("Duration must be shorter than a day: {s}").into());
    }
    Ok(slots as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_home() {
        let home = get_home_dir().unwrap();
        let home_prefixes: &[&str] = if cfg!(unix) {
            &["~", "$HOME", "${HOME}"]
        } else {
            &[r"~", r"%UserProfile%"]
        };
        for prefix in home_prefixes {
            let result = expand_path(&PathBuf::from(format!("{prefix}/slate"))).unwrap();
            assert_eq!(result, home.join("slate"));
            assert!(result.is_absolute());
        }
    }

    #[test]
    fn test_expand_path_absolute() {
        let absolute_path = PathBuf::from("/var/lib/slate");
        let result = expand_path(&absolute_path).unwrap();
        assert_eq!(result, absolute_path);
    }

    #[test]
    fn test_expand_path_relative() {
        let relative_path = PathBuf::from("relative/path");
        let result = expand_path(&relative_path).unwrap();
        assert_eq!(result, relative_path);
    }

    #[test]
    fn test_parse_duration_slots() {
        assert_eq!(parse_duration_slots("01:30").unwrap(), 3);
        assert_eq!(parse_duration_slots("2h").unwrap(), 4);
        assert_eq!(parse_duration_slots("90m").unwrap(), 3);
        // Rounded up to the enclosing slot
        assert_eq!(parse_duration_slots("45m").unwrap(), 2);
        assert_eq!(parse_duration_slots("1m").unwrap(), 1);
    }

    #[test]
    fn test_parse_duration_slots_invalid() {
        assert!(parse_duration_slots("abc").is_err());
        assert!(parse_duration_slots("0m").is_err());
        assert!(parse_duration_slots("-1h").is_err());
        assert!(parse_duration_slots("25h").is_err());
        assert!(parse_duration_slots("12").is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.default_start(), Schedule::DEFAULT_START);
        assert_eq!(config.default_duration_slots(), 2);
    }

    #[test]
    fn test_config_from_toml() {
        let config: Config = toml::from_str(
            r#"
state_dir = "/tmp/slate"
default_start = "10:30"
default_duration = "2h"
"#,
        )
        .unwrap();

        assert_eq!(config.state_dir, Some(PathBuf::from("/tmp/slate")));
        assert_eq!(config.default_start(), "10:30".parse().unwrap());
        assert_eq!(config.default_duration_slots(), 4);
    }
}
