// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::Local;
use clap::{Arg, ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use slate_core::{Event, EventCategory, EventConditions, Pager, Planner};

use crate::event_formatter::EventFormatter;
use crate::util::ArgOutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CmdEventList {
    /// Include events that have already ended.
    pub all: bool,
    pub category: Option<EventCategory>,
    pub output_format: ArgOutputFormat,
}

impl Default for CmdEventList {
    fn default() -> Self {
        Self {
            all: false,
            category: None,
            output_format: ArgOutputFormat::Table,
        }
    }
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List upcoming events")
            .arg(arg!(-a --all "Include events that have already ended"))
            .arg(
                arg!(--category <CATEGORY> "Only show events of this category")
                    .value_parser(value_parser!(EventCategory)),
            )
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            all: matches.get_flag("all"),
            category: matches.get_one("category").copied(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events");
        let conds = EventConditions {
            ending_after: (!self.all).then(|| Local::now().naive_local()),
            category: self.category,
            ..Default::default()
        };
        Self::list(planner, &conds, self.output_format).await
    }

    /// List events with the given conditions and output format.
    pub async fn list(
        planner: &Planner,
        conds: &EventConditions,
        output_format: ArgOutputFormat,
    ) -> Result<(), Box<dyn Error>> {
        const MAX: i64 = 128;
        let pager: Pager = (MAX, 0).into();
        let events = planner.list_events(conds, &pager).await?;
        if events.len() >= (MAX as usize) {
            let total = planner.count_events(conds).await?;
            if total > MAX {
                let prompt = format!("Displaying the {MAX}/{total} events");
                println!("{}", prompt.italic());
            }
        } else if events.is_empty() && output_format == ArgOutputFormat::Table {
            println!("{}", "No events found".italic());
            return Ok(());
        }

        print_events(&events, output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub uid: String,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete an event")
            .arg(arg_uid())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            uid: get_uid(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting event");
        planner.delete_event(&self.uid).await?;
        println!("Deleted event {}", self.uid);
        Ok(())
    }
}

pub fn arg_uid() -> Arg {
    arg!(uid: <UID> "The uid of the event")
}

pub fn get_uid(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("uid")
        .cloned()
        .unwrap_or_default()
}

pub fn print_events(events: &[impl Event], output_format: ArgOutputFormat) {
    let formatter = EventFormatter::new().with_output_format(output_format);
    println!("{}", formatter.format(events));
}

#[cfg(test)]
mod tests {
    use clap::Command;

    use super::*;

    #[test]
    fn test_parse_list() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventList::command());

        let matches = cmd
            .try_get_matches_from([
                "test",
                "list",
                "--all",
                "--category",
                "holiday",
                "--output-format",
                "json",
            ])
            .unwrap();
        let sub_matches = matches.subcommand_matches("list").unwrap();
        let parsed = CmdEventList::from(sub_matches);

        assert!(parsed.all);
        assert_eq!(parsed.category, Some(EventCategory::Holiday));
        assert_eq!(parsed.output_format, ArgOutputFormat::Json);
    }

    #[test]
    fn test_parse_list_defaults() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventList::command());

        let matches = cmd.try_get_matches_from(["test", "list"]).unwrap();
        let sub_matches = matches.subcommand_matches("list").unwrap();
        let parsed = CmdEventList::from(sub_matches);

        assert!(!parsed.all);
        assert_eq!(parsed.category, None);
        assert_eq!(parsed.output_format, ArgOutputFormat::Table);
    }

    #[test]
    fn test_parse_delete() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEventDelete::command());

        let matches = cmd.try_get_matches_from(["test", "delete", "uid1"]).unwrap();
        let sub_matches = matches.subcommand_matches("delete").unwrap();
        let parsed = CmdEventDelete::from(sub_matches);
        assert_eq!(parsed.uid, "uid1");
    }
}
