// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

//! The TUI-backed commands of the slate CLI. They provide only a thin
//! argument surface and hand off to the event editor.

use std::error::Error;

use chrono::NaiveDate;
use clap::{ArgMatches, Command, arg, builder::ValueParser};
use slate_core::{Event, Planner};

use crate::cmd_event::{arg_uid, get_uid, print_events};
use crate::tui;
use crate::util::{ArgOutputFormat, parse_date};

#[derive(Debug, Clone, Copy)]
pub struct CmdNew {
    /// Start date for the fresh draft. Defaults to today.
    pub date: Option<NaiveDate>,
    pub output_format: ArgOutputFormat,
}

impl CmdNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new event using the TUI editor")
            .arg(
                arg!(-d --date [DATE] "Start date of the event, e.g. 2026-09-01 or tomorrow")
                    .value_parser(ValueParser::new(parse_date)),
            )
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            date: matches.get_one("date").copied(),
            output_format: ArgOutputFormat::from(matches),
        })
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "drafting new event");
        let draft = match tui::draft_event(planner, self.date)? {
            Some(draft) => draft,
            None => {
                tracing::info!("user cancelled the event creation");
                return Ok(());
            }
        };

        let event = planner.new_event(&draft).await?;
        print_events(&[event], self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEdit {
    pub uid: String,
    pub output_format: ArgOutputFormat,
}

impl CmdEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an event using the TUI editor")
            .arg(arg_uid())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            uid: get_uid(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event");
        let event = planner.get_event(&self.uid).await?;
        let draft = match tui::patch_event(&event)? {
            Some(draft) => draft,
            None => {
                tracing::info!(uid = self.uid, "user cancelled the event editing");
                return Ok(());
            }
        };

        let event = planner.update_event(&self.uid, &draft).await?;
        print_events(&[event], self.output_format);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Command;

    use super::*;

    #[test]
    fn test_parse_new_with_date() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdNew::command());

        let matches = cmd
            .try_get_matches_from(["test", "new", "--date", "2026-09-01"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("new").unwrap();
        let parsed = CmdNew::from(sub_matches).unwrap();
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2026, 9, 1));
    }

    #[test]
    fn test_parse_new_rejects_bad_date() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdNew::command());

        let result = cmd.try_get_matches_from(["test", "new", "--date", "someday"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_edit() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdEdit::command());

        let matches = cmd.try_get_matches_from(["test", "edit", "uid1"]).unwrap();
        let sub_matches = matches.subcommand_matches("edit").unwrap();
        let parsed = CmdEdit::from(sub_matches);
        assert_eq!(parsed.uid, "uid1");
    }
}
