// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use clap::{Arg, ArgMatches, arg, value_parser};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

/// Parses a date argument, accepting "today", "tomorrow" or "YYYY-MM-DD".
pub fn parse_date(s: &str) -> Result<NaiveDate, &'static str> {
    match s {
        "today" => Ok(Local::now().date_naive()),
        "tomorrow" => Ok(Local::now().date_naive() + Duration::days(1)),
        _ => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| "Invalid date format. Expected format: YYYY-MM-DD"),
    }
}

pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// Display width of the first `first_n_chars` chars of `s`.
pub fn unicode_width_of_slice(s: &str, first_n_chars: usize) -> usize {
    if first_n_chars == 0 || s.is_empty() {
        0
    } else if let Some((idx, ch)) = s.char_indices().nth(first_n_chars - 1) {
        let byte_idx = idx + ch.len_utf8();
        s[..byte_idx].width()
    } else {
        s.width()
    }
}

/// Return the byte range of the grapheme cluster at index `g_idx` in `s`.
/// If out of bounds, returns None.
pub fn byte_range_of_grapheme_at(s: &str, g_idx: usize) -> Option<std::ops::Range<usize>> {
    for (i, (byte_start, g)) in s.grapheme_indices(true).enumerate() {
        if i == g_idx {
            let byte_end = byte_start + g.len();
            return Some(byte_start..byte_end);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-09-01").unwrap(),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
        );
        assert_eq!(parse_date("today").unwrap(), Local::now().date_naive());
        assert_eq!(
            parse_date("tomorrow").unwrap(),
            Local::now().date_naive() + Duration::days(1)
        );
        assert!(parse_date("2026-13-01").is_err());
        assert!(parse_date("soon").is_err());
    }

    #[test]
    fn test_format_datetime() {
        let dt = NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(format_datetime(dt), "2026-09-01 09:30");
    }

    #[test]
    fn test_unicode_width_ascii_only() {
        let s = "hello world";
        assert_eq!(unicode_width_of_slice(s, 100), 11);
        assert_eq!(unicode_width_of_slice(s, 5), 5);
        assert_eq!(unicode_width_of_slice(s, 0), 0);
    }

    #[test]
    fn test_unicode_width_mixed_widths() {
        let s = "abc中文def";
        assert_eq!(unicode_width_of_slice(s, 4), "abc中".width());
        assert_eq!(unicode_width_of_slice(s, 8), s.width());
        assert_eq!(unicode_width_of_slice(s, 9), s.width());
    }

    #[test]
    fn test_byte_range_ascii_basic() {
        let s = "hello";
        assert_eq!(byte_range_of_grapheme_at(s, 0), Some(0..1));
        assert_eq!(byte_range_of_grapheme_at(s, 4), Some(4..5));
        assert_eq!(byte_range_of_grapheme_at(s, 5), None);
    }

    #[test]
    fn test_byte_range_multibyte() {
        let s = "a中b";
        assert_eq!(byte_range_of_grapheme_at(s, 0), Some(0..1));
        assert_eq!(byte_range_of_grapheme_at(s, 1), Some(1..4));
        assert_eq!(byte_range_of_grapheme_at(s, 2), Some(4..5));
        assert_eq!(byte_range_of_grapheme_at(s, 3), None);
    }

    #[test]
    fn test_byte_range_combining_mark() {
        // 'e' + combining acute accent is a single grapheme cluster
        let s = "e\u{0301}b";
        assert_eq!(byte_range_of_grapheme_at(s, 0), Some(0..3));
        assert_eq!(byte_range_of_grapheme_at(s, 1), Some(3..4));
    }

    #[test]
    fn test_byte_range_empty_string() {
        assert_eq!(byte_range_of_grapheme_at("", 0), None);
    }
}
