// SPDX-FileCopyrightText: 2026 slate contributors
//
// SPDX-License-Identifier: Apache-2.0

mod cli;
mod cmd_event;
mod cmd_tui;
mod config;
mod event_formatter;
mod table;
mod tui;
mod util;

pub use crate::cli::{Cli, Commands, run};
