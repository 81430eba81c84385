// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::styling;
use clap::{ArgMatches, Command, ValueHint, arg, crate_version, value_parser};
use colored::Colorize;
use slate_core::{APP_NAME, Planner};

use crate::cmd_event::{CmdEventDelete, CmdEventList};
use crate::cmd_tui::{CmdEdit, CmdNew};
use crate::config::parse_config;

/// Run the slate command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Plan community program events on a half-hour grid")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to list
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/slate/config.toml on Linux and \
MacOS, %LOCALAPPDATA%/slate/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdEventList::command())
            .subcommand(CmdNew::command())
            .subcommand(CmdEdit::command())
            .subcommand(CmdEventDelete::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdEventList::NAME, matches)) => List(CmdEventList::from(matches)),
            Some((CmdNew::NAME, matches)) => New(CmdNew::from(matches)?),
            Some((CmdEdit::NAME, matches)) => Edit(CmdEdit::from(matches)),
            Some((CmdEventDelete::NAME, matches)) => Delete(CmdEventDelete::from(matches)),
            None => List(CmdEventList::default()),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// List events
    List(CmdEventList),

    /// Add a new event using the TUI editor
    New(CmdNew),

    /// Edit an event using the TUI editor
    Edit(CmdEdit),

    /// Delete an event
    Delete(CmdEventDelete),
}

impl Commands {
    /// Run the command with the given configuration
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        tracing::debug!("parsing configuration");
        let config = parse_config(config).await?;
        let planner = Planner::new(config).await?;

        use Commands::*;
        let result = match self {
            List(a) => a.run(&planner).await,
            New(a) => a.run(&planner).await,
            Edit(a) => a.run(&planner).await,
            Delete(a) => a.run(&planner).await,
        };

        planner.close().await?;
        result
    }
}

#[cfg(test)]
mod tests {
    use slate_core::EventCategory;

    use super::*;
    use crate::util::ArgOutputFormat;

    #[test]
    fn test_parse_config() {
        let cli = Cli::try_parse_from(vec!["test", "-c", "/tmp/config.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn test_parse_default_list() {
        let cli = Cli::try_parse_from(vec!["test"]).unwrap();
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::try_parse_from(vec!["test", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn test_parse_list_json() {
        let args = vec!["test", "list", "--output-format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::List(cmd) => {
                assert_eq!(cmd.output_format, ArgOutputFormat::Json);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_parse_list_category() {
        let args = vec!["test", "list", "--category", "meeting"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::List(cmd) => {
                assert_eq!(cmd.category, Some(EventCategory::Meeting));
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_parse_new() {
        let cli = Cli::try_parse_from(vec!["test", "new"]).unwrap();
        assert!(matches!(cli.command, Commands::New(_)));
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(vec!["test", "add"]).unwrap();
        assert!(matches!(cli.command, Commands::New(_)));
    }

    #[test]
    fn test_parse_new_with_date() {
        let cli = Cli::try_parse_from(vec!["test", "new", "--date", "2026-09-01"]).unwrap();
        match cli.command {
            Commands::New(cmd) => {
                assert_eq!(
                    cmd.date,
                    Some(chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
                );
            }
            _ => panic!("Expected New command"),
        }
    }

    #[test]
    fn test_parse_edit() {
        let cli = Cli::try_parse_from(vec!["test", "edit", "uid1"]).unwrap();
        match cli.command {
            Commands::Edit(cmd) => assert_eq!(cmd.uid, "uid1"),
            _ => panic!("Expected Edit command"),
        }
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from(vec!["test", "delete", "uid1"]).unwrap();
        match cli.command {
            Commands::Delete(cmd) => assert_eq!(cmd.uid, "uid1"),
            _ => panic!("Expected Delete command"),
        }
    }

    #[test]
    fn test_parse_rm_alias() {
        let cli = Cli::try_parse_from(vec!["test", "rm", "uid1"]).unwrap();
        assert!(matches!(cli.command, Commands::Delete(_)));
    }
}
