// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;

/// Trait representing a planned event.
pub trait Event {
    /// The unique identifier for the event.
    fn uid(&self) -> &str;

    /// The title of the event.
    fn title(&self) -> &str;

    /// The description of the event, if available.
    fn description(&self) -> Option<&str>;

    /// The location of the event, if available.
    fn location(&self) -> Option<&str>;

    /// The category of the event.
    fn category(&self) -> EventCategory;

    /// Whether the event spans whole days rather than slot times.
    fn all_day(&self) -> bool;

    /// The start date and time, or `None` if the stored value is malformed.
    fn start(&self) -> Option<NaiveDateTime>;

    /// The end date and time, or `None` if the stored value is malformed.
    fn end(&self) -> Option<NaiveDateTime>;
}

/// Draft for an event, handed to the store on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// The title of the event. Non-empty; the editor rejects an empty title
    /// before building a draft.
    pub title: String,

    /// The description of the event, if any.
    pub description: Option<String>,

    /// The location of the event, if any.
    pub location: Option<String>,

    /// The category of the event.
    pub category: EventCategory,

    /// Whether the event spans whole days.
    pub all_day: bool,

    /// The start date and time.
    pub start: NaiveDateTime,

    /// The end date and time. Never precedes `start` for drafts built by
    /// the editor.
    pub end: NaiveDateTime,
}

/// The category of an event in the program calendar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    /// A regular class session.
    #[default]
    Class,

    /// A competition or tournament.
    Competition,

    /// A parent or staff meeting.
    Meeting,

    /// A holiday; typically all-day.
    Holiday,

    /// Anything else.
    Other,
}

const CATEGORY_CLASS: &str = "class";
const CATEGORY_COMPETITION: &str = "competition";
const CATEGORY_MEETING: &str = "meeting";
const CATEGORY_HOLIDAY: &str = "holiday";
const CATEGORY_OTHER: &str = "other";

impl EventCategory {
    /// All categories, in display order.
    pub const ALL: [EventCategory; 5] = [
        EventCategory::Class,
        EventCategory::Competition,
        EventCategory::Meeting,
        EventCategory::Holiday,
        EventCategory::Other,
    ];
}

impl AsRef<str> for EventCategory {
    fn as_ref(&self) -> &str {
        match self {
            EventCategory::Class => CATEGORY_CLASS,
            EventCategory::Competition => CATEGORY_COMPETITION,
            EventCategory::Meeting => CATEGORY_MEETING,
            EventCategory::Holiday => CATEGORY_HOLIDAY,
            EventCategory::Other => CATEGORY_OTHER,
        }
    }
}

impl Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for EventCategory {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            CATEGORY_CLASS => Ok(EventCategory::Class),
            CATEGORY_COMPETITION => Ok(EventCategory::Competition),
            CATEGORY_MEETING => Ok(EventCategory::Meeting),
            CATEGORY_HOLIDAY => Ok(EventCategory::Holiday),
            CATEGORY_OTHER => Ok(EventCategory::Other),
            _ => Err(()),
        }
    }
}

/// Conditions for filtering events in list queries.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventConditions {
    /// Only events ending at or after this instant.
    pub ending_after: Option<NaiveDateTime>,

    /// Only events starting at or before this instant.
    pub starting_before: Option<NaiveDateTime>,

    /// Only events of this category.
    pub category: Option<EventCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_string_round_trip() {
        for category in EventCategory::ALL {
            let parsed: EventCategory = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_category_rejects_unknown_names() {
        assert!("recital".parse::<EventCategory>().is_err());
        assert!("Class".parse::<EventCategory>().is_err());
    }
}
