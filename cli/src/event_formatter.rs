// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDateTime;
use colored::Color;
use slate_core::{Event, EventCategory};

use crate::table::{Column, PaddingDirection, Table};
use crate::util::{ArgOutputFormat, format_datetime};

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    output_format: ArgOutputFormat,
}

impl EventFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                EventColumn::Uid(EventColumnUid),
                EventColumn::When(EventColumnWhen),
                EventColumn::Category(EventColumnCategory),
                EventColumn::Title(EventColumnTitle),
            ],
            output_format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, output_format: ArgOutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    pub fn format(&self, events: &[impl Event]) -> String {
        match self.output_format {
            ArgOutputFormat::Table => Table {
                columns: self.columns.clone(),
                separator: "  ".to_string(),
                padding: true,
                data: events,
            }
            .to_string(),

            ArgOutputFormat::Json => {
                let rows: Vec<EventJson> = events.iter().map(EventJson::from_event).collect();
                serde_json::to_string_pretty(&rows).unwrap_or_else(|e| {
                    tracing::error!(error = %e, "failed to serialize events");
                    "[]".to_string()
                })
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum EventColumn {
    Uid(EventColumnUid),
    When(EventColumnWhen),
    Category(EventColumnCategory),
    Title(EventColumnTitle),
}

impl<E: Event> Column<E> for EventColumn {
    fn format(&self, data: &E) -> String {
        match self {
            EventColumn::Uid(a) => a.format(data),
            EventColumn::When(a) => a.format(data),
            EventColumn::Category(a) => a.format(data),
            EventColumn::Title(a) => a.format(data),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::Uid(_) => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, data: &E) -> Option<Color> {
        match self {
            EventColumn::Category(a) => a.get_color(data),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnUid;

impl EventColumnUid {
    fn format(&self, event: &impl Event) -> String {
        // uids are uuids, the first group is plenty to copy-paste from
        event.uid().chars().take(8).collect()
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnWhen;

impl EventColumnWhen {
    fn format(&self, event: &impl Event) -> String {
        match (event.start(), event.end()) {
            (Some(start), Some(end)) if event.all_day() => match start.date() == end.date() {
                true => start.date().format("%Y-%m-%d").to_string(),
                false => format!(
                    "{}~{}",
                    start.date().format("%Y-%m-%d"),
                    end.date().format("%Y-%m-%d")
                ),
            },
            (Some(start), Some(end)) if start.date() == end.date() => format!(
                "{} {}~{}",
                start.date().format("%Y-%m-%d"),
                start.time().format("%H:%M"),
                end.time().format("%H:%M")
            ),
            (Some(start), Some(end)) => {
                format!("{}~{}", format_datetime(start), format_datetime(end))
            }
            (Some(start), None) => format_datetime(start),
            (None, Some(end)) => format!("~{}", format_datetime(end)),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnCategory;

impl EventColumnCategory {
    fn format(&self, event: &impl Event) -> String {
        event.category().to_string()
    }

    fn get_color(&self, event: &impl Event) -> Option<Color> {
        match event.category() {
            EventCategory::Class => Some(Color::Blue),
            EventCategory::Competition => Some(Color::Red),
            EventCategory::Meeting => Some(Color::Yellow),
            EventCategory::Holiday => Some(Color::Green),
            EventCategory::Other => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnTitle;

impl EventColumnTitle {
    fn format(&self, event: &impl Event) -> String {
        event.title().to_string()
    }
}

#[derive(Debug, serde::Serialize)]
struct EventJson {
    uid: String,
    title: String,
    category: EventCategory,
    all_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl EventJson {
    fn from_event(event: &impl Event) -> Self {
        Self {
            uid: event.uid().to_string(),
            title: event.title().to_string(),
            category: event.category(),
            all_day: event.all_day(),
            location: event.location().map(str::to_string),
            description: event.description().map(str::to_string),
            start: event.start(),
            end: event.end(),
        }
    }
}
